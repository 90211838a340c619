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

//! Immutable catalog of built-in identifiers.
//!
//! Lookups return borrowed entries in catalog order. The catalog never
//! changes after construction, so a single instance can be shared across
//! threads behind an `Arc`.

use crate::builtins;
use crate::entry::{last_segment, CatalogEntry, Category};

/// Read-only table of documented built-ins.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Build a catalog from an explicit entry list. Order is preserved.
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    /// The built-in Pine Script catalog.
    pub fn builtin() -> Self {
        Self::new(builtins::builtin_entries())
    }

    /// All entries in catalog order.
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries of one category.
    pub fn by_category(&self, category: Category) -> impl Iterator<Item = &CatalogEntry> + '_ {
        self.entries.iter().filter(move |e| e.category == category)
    }

    /// Functions whose name lives under `namespace.`.
    pub fn lookup_by_prefix(&self, namespace: &str) -> Vec<&CatalogEntry> {
        self.lookup_namespace(namespace, Category::Function)
    }

    /// Entries of `category` whose name lives under `namespace.`.
    pub fn lookup_namespace(&self, namespace: &str, category: Category) -> Vec<&CatalogEntry> {
        self.by_category(category)
            .filter(|e| e.in_namespace(namespace))
            .collect()
    }

    /// Entries whose name starts with `prefix`, compared ASCII case-insensitively.
    ///
    /// An empty prefix matches every entry.
    pub fn lookup_by_word_prefix(&self, prefix: &str) -> Vec<&CatalogEntry> {
        self.entries
            .iter()
            .filter(|e| starts_with_ignore_ascii_case(&e.name, prefix))
            .collect()
    }

    /// Exact name match first, otherwise the first entry whose last
    /// dotted segment equals the last segment of `word`.
    pub fn lookup_exact_or_suffix(&self, word: &str) -> Option<&CatalogEntry> {
        if word.is_empty() {
            return None;
        }

        if let Some(exact) = self.entries.iter().find(|e| e.name == word) {
            return Some(exact);
        }

        let tail = last_segment(word);
        if tail.is_empty() {
            return None;
        }
        self.entries.iter().find(|e| e.last_segment() == tail)
    }

    /// Whether `name` is a catalog type name.
    pub fn is_type_name(&self, name: &str) -> bool {
        self.by_category(Category::Type).any(|e| e.name == name)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn starts_with_ignore_ascii_case(haystack: &str, prefix: &str) -> bool {
    haystack.len() >= prefix.len()
        && haystack.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
}
