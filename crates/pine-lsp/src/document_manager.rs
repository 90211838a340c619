// Dweve Pine - Pine Script Language Tools
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Open document storage.
//!
//! The store holds the latest full text of every open document together
//! with the client-assigned version. Text is replaced wholesale on every
//! change; nothing derived from it is cached here, so readers always see
//! the then-current text.
//!
//! # Thread Safety
//!
//! Documents live in a `DashMap` keyed by URI, each behind its own
//! `parking_lot::Mutex`. Locks are only held to copy text in or out.

use dashmap::DashMap;
use parking_lot::{Mutex, RwLock};
use ropey::Rope;
use std::sync::Arc;
use tower_lsp::lsp_types::Url;
use tracing::{debug, warn};

pub use crate::constants::DEFAULT_MAX_DOCUMENT_SIZE;

/// State of one open document.
pub struct DocumentState {
    /// Current text.
    pub rope: Rope,
    /// Version reported by the client with the last change.
    pub version: i32,
}

/// Store of open documents.
///
/// # Example
///
/// ```
/// use pine_lsp::document_manager::DocumentManager;
/// use tower_lsp::lsp_types::Url;
///
/// let manager = DocumentManager::new(1024 * 1024);
/// let uri = Url::parse("file:///demo.pine").unwrap();
///
/// assert!(manager.insert_or_update(&uri, "//@version=5", 1));
/// assert_eq!(manager.text(&uri).as_deref(), Some("//@version=5"));
/// assert_eq!(manager.version(&uri), Some(1));
/// ```
pub struct DocumentManager {
    documents: DashMap<Url, Arc<Mutex<DocumentState>>>,
    max_document_size: RwLock<usize>,
}

impl Default for DocumentManager {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DOCUMENT_SIZE)
    }
}

impl DocumentManager {
    /// Create a store that rejects documents larger than `max_document_size` bytes.
    pub fn new(max_document_size: usize) -> Self {
        Self {
            documents: DashMap::new(),
            max_document_size: RwLock::new(max_document_size),
        }
    }

    /// Update maximum document size (can be called during runtime).
    pub fn set_max_document_size(&self, new_max: usize) {
        *self.max_document_size.write() = new_max;
        debug!("Max document size updated to: {} bytes", new_max);
    }

    /// Get current maximum document size.
    pub fn max_document_size(&self) -> usize {
        *self.max_document_size.read()
    }

    /// Insert or replace a document's text.
    ///
    /// Returns `false` (and leaves any previous text in place) when the
    /// content exceeds the maximum document size.
    pub fn insert_or_update(&self, uri: &Url, content: &str, version: i32) -> bool {
        let max_size = self.max_document_size();
        if content.len() > max_size {
            warn!(
                "Document size limit exceeded for {}: {} bytes > {} bytes maximum (rejected)",
                uri,
                content.len(),
                max_size
            );
            return false;
        }

        let rope = Rope::from_str(content);

        if let Some(state_ref) = self.documents.get(uri) {
            let mut state = state_ref.lock();
            debug!(
                "Document updated: {} v{} -> v{} ({} bytes)",
                uri,
                state.version,
                version,
                content.len()
            );
            state.rope = rope;
            state.version = version;
            return true;
        }

        debug!(
            "New document registered: {} v{} ({} bytes, {} lines)",
            uri,
            version,
            content.len(),
            rope.len_lines()
        );
        self.documents.insert(
            uri.clone(),
            Arc::new(Mutex::new(DocumentState { rope, version })),
        );
        true
    }

    /// Current text of a document.
    pub fn text(&self, uri: &Url) -> Option<String> {
        self.documents
            .get(uri)
            .map(|entry| entry.lock().rope.to_string())
    }

    /// Current client version of a document.
    pub fn version(&self, uri: &Url) -> Option<i32> {
        self.documents.get(uri).map(|entry| entry.lock().version)
    }

    /// Text and version read under one lock.
    pub fn snapshot(&self, uri: &Url) -> Option<(String, i32)> {
        self.documents.get(uri).map(|entry| {
            let state = entry.lock();
            (state.rope.to_string(), state.version)
        })
    }

    /// Remove a document. Returns `true` if it was open.
    pub fn remove(&self, uri: &Url) -> bool {
        self.documents.remove(uri).is_some()
    }

    /// URIs of all open documents.
    pub fn all_uris(&self) -> Vec<Url> {
        self.documents.iter().map(|entry| entry.key().clone()).collect()
    }

    pub fn contains(&self, uri: &Url) -> bool {
        self.documents.contains_key(uri)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}
