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

//! Per-document settings resolution.
//!
//! Clients that support `workspace/configuration` are asked for the
//! `pinescript` section scoped to each document; answers are cached per
//! URI until the configuration changes or the document closes. Clients
//! without that capability push a single global settings object through
//! `workspace/didChangeConfiguration` instead.
//!
//! Any failure while fetching or decoding settings falls back to the
//! defaults. A broken configuration never disables the server.

use crate::constants::SETTINGS_SECTION;
use dashmap::DashMap;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;
use tower_lsp::lsp_types::{ConfigurationItem, Url};
use tower_lsp::Client;
use tracing::{debug, warn};

/// Feature switches in effect for one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectiveSettings {
    pub enable_diagnostics: bool,
    pub enable_hover: bool,
    pub enable_completion: bool,
}

impl Default for EffectiveSettings {
    fn default() -> Self {
        Self {
            enable_diagnostics: true,
            enable_hover: true,
            enable_completion: true,
        }
    }
}

/// Partial settings as sent by the client. Absent keys keep the default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsOverride {
    pub enable_diagnostics: Option<bool>,
    pub enable_hover: Option<bool>,
    pub enable_completion: Option<bool>,
}

impl SettingsOverride {
    /// Overlay onto `base`.
    pub fn apply(&self, base: EffectiveSettings) -> EffectiveSettings {
        EffectiveSettings {
            enable_diagnostics: self.enable_diagnostics.unwrap_or(base.enable_diagnostics),
            enable_hover: self.enable_hover.unwrap_or(base.enable_hover),
            enable_completion: self.enable_completion.unwrap_or(base.enable_completion),
        }
    }
}

/// Settings could not be obtained.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("configuration request failed: {0}")]
    Request(#[from] tower_lsp::jsonrpc::Error),

    #[error("client returned no configuration item")]
    EmptyResponse,

    #[error("malformed settings payload: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Decode a `pinescript` section and overlay it on the defaults.
///
/// `null` means "no overrides".
pub fn parse_section(value: &Value) -> Result<EffectiveSettings, SettingsError> {
    let overrides: Option<SettingsOverride> = serde_json::from_value(value.clone())?;
    Ok(overrides
        .unwrap_or_default()
        .apply(EffectiveSettings::default()))
}

/// Somewhere to fetch a scoped configuration section from.
#[tower_lsp::async_trait]
pub trait ConfigurationSource: Send + Sync {
    async fn section(&self, scope_uri: &Url, section: &str) -> Result<Value, SettingsError>;
}

#[tower_lsp::async_trait]
impl ConfigurationSource for Client {
    async fn section(&self, scope_uri: &Url, section: &str) -> Result<Value, SettingsError> {
        let values = self
            .configuration(vec![ConfigurationItem {
                scope_uri: Some(scope_uri.clone()),
                section: Some(section.to_string()),
            }])
            .await?;
        values.into_iter().next().ok_or(SettingsError::EmptyResponse)
    }
}

/// Cache of effective settings per document.
pub struct SettingsResolver {
    cache: DashMap<Url, EffectiveSettings>,
    global: RwLock<EffectiveSettings>,
    scoped: AtomicBool,
    /// Bumped whenever cached entries are dropped. A fetch is cached only
    /// if the generation is unchanged when it completes.
    generation: RwLock<u64>,
}

impl Default for SettingsResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsResolver {
    pub fn new() -> Self {
        Self {
            cache: DashMap::new(),
            global: RwLock::new(EffectiveSettings::default()),
            scoped: AtomicBool::new(false),
            generation: RwLock::new(0),
        }
    }

    /// Record whether the client answers `workspace/configuration`.
    pub fn set_configuration_support(&self, supported: bool) {
        self.scoped.store(supported, Ordering::Release);
    }

    pub fn supports_configuration(&self) -> bool {
        self.scoped.load(Ordering::Acquire)
    }

    /// Settings pushed by a client without configuration support.
    pub fn global(&self) -> EffectiveSettings {
        *self.global.read()
    }

    /// Effective settings for `uri`.
    pub async fn resolve(&self, uri: &Url, source: &dyn ConfigurationSource) -> EffectiveSettings {
        if !self.supports_configuration() {
            return self.global();
        }

        if let Some(cached) = self.cache.get(uri) {
            return *cached;
        }

        let generation = *self.generation.read();

        let settings = match source.section(uri, SETTINGS_SECTION).await {
            Ok(value) => parse_section(&value).unwrap_or_else(|e| {
                warn!("Ignoring settings for {}: {}", uri, e);
                EffectiveSettings::default()
            }),
            Err(e) => {
                warn!("Could not fetch settings for {}: {}", uri, e);
                EffectiveSettings::default()
            }
        };

        debug!("Resolved settings for {}: {:?}", uri, settings);
        let current = self.generation.read();
        if *current == generation {
            self.cache.insert(uri.clone(), settings);
        } else {
            debug!("Settings for {} were invalidated during fetch, not caching", uri);
        }
        settings
    }

    /// Handle `workspace/didChangeConfiguration`.
    ///
    /// `payload` is the notification's `settings` value, which holds the
    /// `pinescript` section when the client pushes settings globally.
    pub fn configuration_changed(&self, payload: Option<&Value>) {
        if self.supports_configuration() {
            self.invalidate_all();
            return;
        }

        let section = payload.and_then(|p| p.get(SETTINGS_SECTION));
        let settings = match section {
            Some(value) => parse_section(value).unwrap_or_else(|e| {
                warn!("Ignoring global settings: {}", e);
                EffectiveSettings::default()
            }),
            None => EffectiveSettings::default(),
        };

        debug!("Global settings updated: {:?}", settings);
        *self.global.write() = settings;
    }

    /// Forget the cached settings of a closed document.
    pub fn evict(&self, uri: &Url) {
        let mut generation = self.generation.write();
        *generation = generation.wrapping_add(1);
        self.cache.remove(uri);
    }

    /// Forget every cached entry.
    pub fn invalidate_all(&self) {
        let mut generation = self.generation.write();
        *generation = generation.wrapping_add(1);
        debug!("Invalidating {} cached settings entries", self.cache.len());
        self.cache.clear();
    }

    /// Number of cached entries.
    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }
}
