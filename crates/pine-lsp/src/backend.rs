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

//! LSP backend implementation.
//!
//! Every open or change triggers an immediate revalidation: resolve the
//! document's settings (the only await point), then lint whatever text is
//! current at that moment and publish the result. Completion, hover and
//! symbol requests are answered synchronously from the current text.

use crate::completion::{get_completions, resolve_completion};
use crate::constants::{
    BYTES_PER_MEGABYTE, COMPLETION_TRIGGER_CHARACTERS, DEFAULT_MAX_DOCUMENT_SIZE,
    DID_CHANGE_CONFIGURATION_METHOD, SERVER_NAME,
};
use crate::diagnostics::to_lsp_diagnostics;
use crate::document_manager::DocumentManager;
use crate::hover::get_hover;
use crate::settings::{EffectiveSettings, SettingsResolver};
use crate::symbols::get_document_symbols;
use pine_core::Catalog;
use pine_lint::{LintConfig, LintRunner};
use std::sync::Arc;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer};
use tracing::{debug, error, info, warn};

/// Pine Script Language Server backend.
pub struct PineLanguageServer {
    /// LSP client connection.
    client: Client,
    /// Built-in identifiers, shared read-only.
    catalog: Arc<Catalog>,
    /// Open documents.
    document_manager: Arc<DocumentManager>,
    /// Per-document settings.
    settings: Arc<SettingsResolver>,
    /// Diagnostic rules.
    lint_runner: Arc<LintRunner>,
}

impl PineLanguageServer {
    /// Create a new language server with default configuration.
    pub fn new(client: Client) -> Self {
        Self::with_config(client, DEFAULT_MAX_DOCUMENT_SIZE)
    }

    /// Create a new language server with a custom document size limit.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use pine_lsp::PineLanguageServer;
    /// use tower_lsp::Client;
    ///
    /// fn create_server(client: Client) -> PineLanguageServer {
    ///     PineLanguageServer::with_config(client, 16 * 1024 * 1024)
    /// }
    /// ```
    pub fn with_config(client: Client, max_document_size: usize) -> Self {
        Self::with_lint_config(client, max_document_size, LintConfig::default())
    }

    /// Create a new language server with custom lint rules configuration.
    pub fn with_lint_config(
        client: Client,
        max_document_size: usize,
        lint_config: LintConfig,
    ) -> Self {
        let lint_config = match lint_config.validate() {
            Ok(()) => lint_config,
            Err(e) => {
                warn!("Invalid lint configuration, using defaults: {}", e);
                LintConfig::default()
            }
        };

        let catalog = Arc::new(Catalog::builtin());
        let lint_runner = Arc::new(LintRunner::new(lint_config, &catalog));

        Self {
            client,
            catalog,
            document_manager: Arc::new(DocumentManager::new(max_document_size)),
            settings: Arc::new(SettingsResolver::new()),
            lint_runner,
        }
    }

    /// The built-in catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Open documents.
    pub fn document_manager(&self) -> &DocumentManager {
        &self.document_manager
    }

    /// Settings cache.
    pub fn settings(&self) -> &SettingsResolver {
        &self.settings
    }

    /// Update maximum document size (can be called during runtime).
    pub fn set_max_document_size(&self, new_max: usize) {
        self.document_manager.set_max_document_size(new_max);
    }

    /// Get current maximum document size.
    pub fn max_document_size(&self) -> usize {
        self.document_manager.max_document_size()
    }

    async fn effective_settings(&self, uri: &Url) -> EffectiveSettings {
        self.settings.resolve(uri, &self.client).await
    }

    /// Diagnostics a revalidation of `uri` would publish, paired with the
    /// document version they were computed from.
    ///
    /// `None` for unknown documents, including documents closed while
    /// settings were being fetched. Text and version are read together
    /// after settings resolution, so edits that land during the fetch are
    /// included and labelled with their own version.
    pub async fn versioned_diagnostics(&self, uri: &Url) -> Option<(Vec<Diagnostic>, i32)> {
        if !self.document_manager.contains(uri) {
            return None;
        }

        let enabled = self.effective_settings(uri).await.enable_diagnostics;
        let (text, version) = self.document_manager.snapshot(uri)?;

        if !enabled {
            debug!("Diagnostics disabled for {}", uri);
            return Some((Vec::new(), version));
        }

        let diagnostics = to_lsp_diagnostics(&self.lint_runner.run(&text));
        debug!(
            "Computed {} diagnostics for {} v{}",
            diagnostics.len(),
            uri,
            version
        );
        Some((diagnostics, version))
    }

    /// Diagnostics a revalidation of `uri` would publish. Empty for unknown
    /// documents and when diagnostics are disabled.
    pub async fn diagnostics(&self, uri: &Url) -> Vec<Diagnostic> {
        self.versioned_diagnostics(uri)
            .await
            .map(|(diagnostics, _)| diagnostics)
            .unwrap_or_default()
    }

    /// Recompute and publish diagnostics for `uri`.
    pub async fn validate(&self, uri: &Url) {
        let Some((diagnostics, version)) = self.versioned_diagnostics(uri).await else {
            debug!("Skipping diagnostics for closed document {}", uri);
            return;
        };

        debug!("Publishing {} diagnostics for {}", diagnostics.len(), uri);
        self.client
            .publish_diagnostics(uri.clone(), diagnostics, Some(version))
            .await;
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for PineLanguageServer {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        info!("Pine Script Language Server initializing");

        let workspace = params.capabilities.workspace.as_ref();
        let has_configuration = workspace.and_then(|w| w.configuration).unwrap_or(false);
        let has_workspace_folders = workspace.and_then(|w| w.workspace_folders).unwrap_or(false);

        debug!(
            "Client capabilities: configuration={}, workspace folders={}",
            has_configuration, has_workspace_folders
        );
        self.settings.set_configuration_support(has_configuration);

        let workspace_capabilities = has_workspace_folders.then(|| WorkspaceServerCapabilities {
            workspace_folders: Some(WorkspaceFoldersServerCapabilities {
                supported: Some(true),
                change_notifications: Some(OneOf::Left(true)),
            }),
            file_operations: None,
        });

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Options(
                    TextDocumentSyncOptions {
                        open_close: Some(true),
                        change: Some(TextDocumentSyncKind::FULL),
                        ..Default::default()
                    },
                )),
                completion_provider: Some(CompletionOptions {
                    resolve_provider: Some(true),
                    trigger_characters: Some(
                        COMPLETION_TRIGGER_CHARACTERS
                            .iter()
                            .map(|c| c.to_string())
                            .collect(),
                    ),
                    ..Default::default()
                }),
                hover_provider: Some(HoverProviderCapability::Simple(true)),
                document_symbol_provider: Some(OneOf::Left(true)),
                workspace: workspace_capabilities,
                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: SERVER_NAME.to_string(),
                version: Some(crate::VERSION.to_string()),
            }),
        })
    }

    async fn initialized(&self, _params: InitializedParams) {
        info!("Pine Script Language Server initialized");

        if !self.settings.supports_configuration() {
            return;
        }

        let registration = Registration {
            id: "pinescript-did-change-configuration".to_string(),
            method: DID_CHANGE_CONFIGURATION_METHOD.to_string(),
            register_options: None,
        };
        if let Err(e) = self.client.register_capability(vec![registration]).await {
            warn!("Failed to register configuration change notifications: {}", e);
        }
    }

    async fn shutdown(&self) -> Result<()> {
        info!("Pine Script Language Server shutting down");
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let doc = params.text_document;
        info!(
            "Document opened: {} v{} ({} bytes)",
            doc.uri,
            doc.version,
            doc.text.len()
        );

        if self
            .document_manager
            .insert_or_update(&doc.uri, &doc.text, doc.version)
        {
            self.validate(&doc.uri).await;
        } else {
            let max_size = self.document_manager.max_document_size();
            error!(
                "Document size limit exceeded on open: {} has {} bytes > {} bytes maximum",
                doc.uri,
                doc.text.len(),
                max_size
            );
            self.client
                .show_message(
                    MessageType::ERROR,
                    format!(
                        "Document too large: {} bytes exceeds maximum of {} bytes ({} MB)",
                        doc.text.len(),
                        max_size,
                        max_size / BYTES_PER_MEGABYTE
                    ),
                )
                .await;
        }
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;
        let version = params.text_document.version;

        let Some(change) = params.content_changes.into_iter().last() else {
            warn!("Document change event for {} had no content changes", uri);
            return;
        };

        debug!("Document changed: {} v{} ({} bytes)", uri, version, change.text.len());
        if self
            .document_manager
            .insert_or_update(&uri, &change.text, version)
        {
            self.validate(&uri).await;
        } else {
            warn!(
                "Failed to update document {} (size limit exceeded: {} bytes)",
                uri,
                change.text.len()
            );
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;
        debug!("Document closed: {}", uri);
        self.document_manager.remove(&uri);
        self.settings.evict(&uri);
        self.client.publish_diagnostics(uri, vec![], None).await;
    }

    async fn did_change_configuration(&self, params: DidChangeConfigurationParams) {
        info!("Configuration changed");
        self.settings.configuration_changed(Some(&params.settings));

        for uri in self.document_manager.all_uris() {
            self.validate(&uri).await;
        }
    }

    async fn did_change_workspace_folders(&self, params: DidChangeWorkspaceFoldersParams) {
        info!(
            "Workspace folders changed: {} added, {} removed",
            params.event.added.len(),
            params.event.removed.len()
        );
    }

    async fn did_change_watched_files(&self, params: DidChangeWatchedFilesParams) {
        debug!("Watched files changed: {} events", params.changes.len());
    }

    async fn completion(&self, params: CompletionParams) -> Result<Option<CompletionResponse>> {
        let uri = &params.text_document_position.text_document.uri;
        let position = params.text_document_position.position;

        debug!(
            "Completion request for {} at {}:{}",
            uri, position.line, position.character
        );

        if !self.document_manager.contains(uri) {
            debug!("No completion available for {} (document not open)", uri);
            return Ok(Some(CompletionResponse::Array(Vec::new())));
        }
        if !self.effective_settings(uri).await.enable_completion {
            return Ok(Some(CompletionResponse::Array(Vec::new())));
        }

        let items = self
            .document_manager
            .text(uri)
            .map(|text| get_completions(&self.catalog, &text, position))
            .unwrap_or_default();

        debug!("Providing {} completion items for {}", items.len(), uri);
        Ok(Some(CompletionResponse::Array(items)))
    }

    async fn completion_resolve(&self, item: CompletionItem) -> Result<CompletionItem> {
        Ok(resolve_completion(item))
    }

    async fn hover(&self, params: HoverParams) -> Result<Option<Hover>> {
        let uri = &params.text_document_position_params.text_document.uri;
        let position = params.text_document_position_params.position;

        if !self.document_manager.contains(uri) {
            return Ok(None);
        }
        if !self.effective_settings(uri).await.enable_hover {
            return Ok(None);
        }

        Ok(self
            .document_manager
            .text(uri)
            .and_then(|text| get_hover(&self.catalog, &text, position)))
    }

    async fn document_symbol(
        &self,
        params: DocumentSymbolParams,
    ) -> Result<Option<DocumentSymbolResponse>> {
        let uri = &params.text_document.uri;

        let symbols = self
            .document_manager
            .text(uri)
            .map(|text| get_document_symbols(uri, &text))
            .unwrap_or_default();

        Ok(Some(DocumentSymbolResponse::Flat(symbols)))
    }
}
