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

//! End-to-end tests of the language server handlers.
//!
//! The service is never connected to a real client, so every notification
//! the server sends is dropped and every request it makes (such as
//! `workspace/configuration`) fails. That exercises the fallback paths.

use pine_lsp::PineLanguageServer;
use serde_json::json;
use tower_lsp::lsp_types::*;
use tower_lsp::{LanguageServer, LspService};

macro_rules! test_server {
    () => {{
        let (service, _socket) = LspService::new(PineLanguageServer::new);
        service
    }};
    ($max_doc_size:expr) => {{
        let (service, _socket) =
            LspService::new(move |client| PineLanguageServer::with_config(client, $max_doc_size));
        service
    }};
}

const SCRIPT: &str = "//@version=5\nindicator(\"Test\")\nfast = ta.ema(close, 9)\nf(x) => x * 2\nvar int total = 0";

fn uri(name: &str) -> Url {
    Url::parse(&format!("file:///{}", name)).unwrap()
}

fn open_params(uri: &Url, text: &str, version: i32) -> DidOpenTextDocumentParams {
    DidOpenTextDocumentParams {
        text_document: TextDocumentItem {
            uri: uri.clone(),
            language_id: "pine".to_string(),
            version,
            text: text.to_string(),
        },
    }
}

fn change_params(uri: &Url, texts: &[&str], version: i32) -> DidChangeTextDocumentParams {
    DidChangeTextDocumentParams {
        text_document: VersionedTextDocumentIdentifier {
            uri: uri.clone(),
            version,
        },
        content_changes: texts
            .iter()
            .map(|text| TextDocumentContentChangeEvent {
                range: None,
                range_length: None,
                text: text.to_string(),
            })
            .collect(),
    }
}

fn position_params(uri: &Url, line: u32, character: u32) -> TextDocumentPositionParams {
    TextDocumentPositionParams {
        text_document: TextDocumentIdentifier { uri: uri.clone() },
        position: Position::new(line, character),
    }
}

fn completion_params(uri: &Url, line: u32, character: u32) -> CompletionParams {
    CompletionParams {
        text_document_position: position_params(uri, line, character),
        work_done_progress_params: Default::default(),
        partial_result_params: Default::default(),
        context: None,
    }
}

fn hover_params(uri: &Url, line: u32, character: u32) -> HoverParams {
    HoverParams {
        text_document_position_params: position_params(uri, line, character),
        work_done_progress_params: Default::default(),
    }
}

fn symbol_params(uri: &Url) -> DocumentSymbolParams {
    DocumentSymbolParams {
        text_document: TextDocumentIdentifier { uri: uri.clone() },
        work_done_progress_params: Default::default(),
        partial_result_params: Default::default(),
    }
}

fn completion_labels(response: Option<CompletionResponse>) -> Vec<String> {
    match response {
        Some(CompletionResponse::Array(items)) => items.into_iter().map(|i| i.label).collect(),
        other => panic!("unexpected completion response: {:?}", other),
    }
}

fn configuration_capable_client() -> InitializeParams {
    InitializeParams {
        capabilities: ClientCapabilities {
            workspace: Some(WorkspaceClientCapabilities {
                configuration: Some(true),
                workspace_folders: Some(true),
                ..Default::default()
            }),
            ..Default::default()
        },
        ..Default::default()
    }
}

// ============================================================================
// Initialize/Shutdown Tests
// ============================================================================

#[tokio::test]
async fn test_initialize_capabilities() {
    let service = test_server!();
    let server = service.inner();

    let result = server.initialize(InitializeParams::default()).await.unwrap();
    let caps = result.capabilities;

    match caps.text_document_sync {
        Some(TextDocumentSyncCapability::Options(options)) => {
            assert_eq!(options.open_close, Some(true));
            assert_eq!(options.change, Some(TextDocumentSyncKind::FULL));
        }
        other => panic!("unexpected sync capability: {:?}", other),
    }

    let completion = caps.completion_provider.unwrap();
    assert_eq!(completion.resolve_provider, Some(true));
    assert_eq!(
        completion.trigger_characters,
        Some(vec![".".to_string(), "(".to_string(), "[".to_string()])
    );
    assert_eq!(caps.hover_provider, Some(HoverProviderCapability::Simple(true)));
    assert_eq!(caps.document_symbol_provider, Some(OneOf::Left(true)));
    // No workspace folder support advertised unless the client has it
    assert!(caps.workspace.is_none());

    let info = result.server_info.unwrap();
    assert_eq!(info.name, "pine-lsp");
    assert_eq!(info.version.as_deref(), Some(pine_lsp::VERSION));
}

#[tokio::test]
async fn test_initialize_with_workspace_capabilities() {
    let service = test_server!();
    let server = service.inner();

    let result = server.initialize(configuration_capable_client()).await.unwrap();
    let folders = result.capabilities.workspace.unwrap().workspace_folders.unwrap();
    assert_eq!(folders.supported, Some(true));
    assert!(server.settings().supports_configuration());
}

#[tokio::test]
async fn test_initialized_and_shutdown() {
    let service = test_server!();
    let server = service.inner();

    server.initialize(configuration_capable_client()).await.unwrap();
    // Registration fails against an unconnected client; must not panic
    server.initialized(InitializedParams {}).await;
    assert!(server.shutdown().await.is_ok());
}

// ============================================================================
// Document Lifecycle Tests
// ============================================================================

#[tokio::test]
async fn test_did_open_stores_document() {
    let service = test_server!();
    let server = service.inner();
    let uri = uri("open.pine");

    server.did_open(open_params(&uri, SCRIPT, 3)).await;

    assert_eq!(server.document_manager().text(&uri).as_deref(), Some(SCRIPT));
    assert_eq!(server.document_manager().version(&uri), Some(3));
}

#[tokio::test]
async fn test_did_open_oversized_document() {
    let service = test_server!(100);
    let server = service.inner();
    let uri = uri("large.pine");

    server.did_open(open_params(&uri, &"x".repeat(200), 1)).await;

    assert!(!server.document_manager().contains(&uri));
    assert!(server.diagnostics(&uri).await.is_empty());
}

#[tokio::test]
async fn test_did_change_last_change_wins() {
    let service = test_server!();
    let server = service.inner();
    let uri = uri("change.pine");

    server.did_open(open_params(&uri, SCRIPT, 1)).await;
    server
        .did_change(change_params(&uri, &["//@version=5\na = 1", "//@version=5\nb = 2"], 2))
        .await;

    assert_eq!(
        server.document_manager().text(&uri).as_deref(),
        Some("//@version=5\nb = 2")
    );
    assert_eq!(server.document_manager().version(&uri), Some(2));
}

#[tokio::test]
async fn test_did_change_oversized_keeps_previous_text() {
    let service = test_server!(64);
    let server = service.inner();
    let uri = uri("grow.pine");

    server.did_open(open_params(&uri, "//@version=5", 1)).await;
    let large = "y".repeat(100);
    server.did_change(change_params(&uri, &[&large], 2)).await;

    assert_eq!(
        server.document_manager().text(&uri).as_deref(),
        Some("//@version=5")
    );
    assert_eq!(server.document_manager().version(&uri), Some(1));
}

#[tokio::test]
async fn test_did_change_without_changes_is_ignored() {
    let service = test_server!();
    let server = service.inner();
    let uri = uri("empty-change.pine");

    server.did_open(open_params(&uri, SCRIPT, 1)).await;
    server.did_change(change_params(&uri, &[], 2)).await;

    assert_eq!(server.document_manager().version(&uri), Some(1));
}

#[tokio::test]
async fn test_did_close_clears_state() {
    let service = test_server!();
    let server = service.inner();
    server.initialize(configuration_capable_client()).await.unwrap();
    let uri = uri("close.pine");

    server.did_open(open_params(&uri, SCRIPT, 1)).await;
    assert_eq!(server.settings().cached_len(), 1);

    server
        .did_close(DidCloseTextDocumentParams {
            text_document: TextDocumentIdentifier { uri: uri.clone() },
        })
        .await;

    assert!(!server.document_manager().contains(&uri));
    assert_eq!(server.settings().cached_len(), 0);
    assert!(server.diagnostics(&uri).await.is_empty());
}

#[tokio::test]
async fn test_runtime_size_limit_change() {
    let service = test_server!();
    let server = service.inner();

    server.set_max_document_size(10);
    assert_eq!(server.max_document_size(), 10);

    let uri = uri("small.pine");
    server.did_open(open_params(&uri, "//@version=5\nplot(close)", 1)).await;
    assert!(!server.document_manager().contains(&uri));
}

// ============================================================================
// Diagnostics Tests
// ============================================================================

#[tokio::test]
async fn test_diagnostics_for_broken_script() {
    let service = test_server!();
    let server = service.inner();
    let uri = uri("broken.pine");

    server
        .did_open(open_params(&uri, "plot(close\nvar money m = 1", 1))
        .await;
    let diags = server.diagnostics(&uri).await;

    let codes: Vec<_> = diags.iter().map(|d| d.code.clone()).collect();
    assert_eq!(
        codes,
        vec![
            Some(NumberOrString::String("version-directive".to_string())),
            Some(NumberOrString::String("paren-balance".to_string())),
            Some(NumberOrString::String("declaration-type".to_string())),
        ]
    );
    assert!(diags
        .iter()
        .all(|d| d.source.as_deref() == Some("pinescript")));
    assert_eq!(diags[2].message, "Unknown type: money");
}

#[tokio::test]
async fn test_diagnostics_for_clean_script() {
    let service = test_server!();
    let server = service.inner();
    let uri = uri("clean.pine");

    server.did_open(open_params(&uri, SCRIPT, 1)).await;
    assert!(server.diagnostics(&uri).await.is_empty());
}

#[tokio::test]
async fn test_diagnostics_follow_changes() {
    let service = test_server!();
    let server = service.inner();
    let uri = uri("edit.pine");

    server.did_open(open_params(&uri, "x = 1", 1)).await;
    assert_eq!(server.diagnostics(&uri).await.len(), 1);

    server
        .did_change(change_params(&uri, &["//@version=5\nx = 1"], 2))
        .await;
    assert!(server.diagnostics(&uri).await.is_empty());
}

#[tokio::test]
async fn test_diagnostics_carry_linted_version() {
    let service = test_server!();
    let server = service.inner();
    let uri = uri("versioned.pine");

    server.did_open(open_params(&uri, "x = 1", 4)).await;
    let (diags, version) = server.versioned_diagnostics(&uri).await.unwrap();
    assert_eq!((diags.len(), version), (1, 4));

    server
        .did_change(change_params(&uri, &["//@version=5
x = 1"], 5))
        .await;
    let (diags, version) = server.versioned_diagnostics(&uri).await.unwrap();
    assert_eq!((diags.len(), version), (0, 5));

    server
        .did_change_configuration(DidChangeConfigurationParams {
            settings: json!({ "pinescript": { "enableDiagnostics": false } }),
        })
        .await;
    let (diags, version) = server.versioned_diagnostics(&uri).await.unwrap();
    assert!(diags.is_empty());
    assert_eq!(version, 5);

    server
        .did_close(DidCloseTextDocumentParams {
            text_document: TextDocumentIdentifier { uri: uri.clone() },
        })
        .await;
    assert!(server.versioned_diagnostics(&uri).await.is_none());
}

#[tokio::test]
async fn test_diagnostics_unknown_document() {
    let service = test_server!();
    let server = service.inner();
    assert!(server.diagnostics(&uri("missing.pine")).await.is_empty());
}

// ============================================================================
// Settings Tests
// ============================================================================

#[tokio::test]
async fn test_global_settings_disable_features() {
    let service = test_server!();
    let server = service.inner();
    let uri = uri("settings.pine");

    server.did_open(open_params(&uri, "x = ta.", 1)).await;
    assert!(!server.diagnostics(&uri).await.is_empty());

    server
        .did_change_configuration(DidChangeConfigurationParams {
            settings: json!({
                "pinescript": {
                    "enableDiagnostics": false,
                    "enableHover": false,
                    "enableCompletion": false
                }
            }),
        })
        .await;

    assert!(server.diagnostics(&uri).await.is_empty());
    assert!(completion_labels(server.completion(completion_params(&uri, 0, 7)).await.unwrap())
        .is_empty());
    assert!(server.hover(hover_params(&uri, 0, 5)).await.unwrap().is_none());

    // Symbols have no switch
    assert!(server.document_symbol(symbol_params(&uri)).await.unwrap().is_some());
}

#[tokio::test]
async fn test_global_settings_partial_override() {
    let service = test_server!();
    let server = service.inner();

    server
        .did_change_configuration(DidChangeConfigurationParams {
            settings: json!({ "pinescript": { "enableHover": false } }),
        })
        .await;

    let global = server.settings().global();
    assert!(!global.enable_hover);
    assert!(global.enable_diagnostics);
    assert!(global.enable_completion);
}

#[tokio::test]
async fn test_malformed_global_settings_fall_back_to_defaults() {
    let service = test_server!();
    let server = service.inner();

    server
        .did_change_configuration(DidChangeConfigurationParams {
            settings: json!({ "pinescript": { "enableHover": false } }),
        })
        .await;
    server
        .did_change_configuration(DidChangeConfigurationParams {
            settings: json!({ "pinescript": { "enableHover": "sometimes" } }),
        })
        .await;

    assert!(server.settings().global().enable_hover);
}

#[tokio::test]
async fn test_scoped_settings_fall_back_when_request_fails() {
    let service = test_server!();
    let server = service.inner();
    server.initialize(configuration_capable_client()).await.unwrap();
    let uri = uri("scoped.pine");

    server.did_open(open_params(&uri, "x = 1", 1)).await;
    // The failed workspace/configuration request yields the defaults
    assert_eq!(server.diagnostics(&uri).await.len(), 1);
    assert_eq!(server.settings().cached_len(), 1);

    server
        .did_change_configuration(DidChangeConfigurationParams {
            settings: serde_json::Value::Null,
        })
        .await;
    // Revalidation after the change re-fetches and re-caches
    assert_eq!(server.settings().cached_len(), 1);
}

// ============================================================================
// Completion / Hover / Symbols Tests
// ============================================================================

#[tokio::test]
async fn test_completion_namespace() {
    let service = test_server!();
    let server = service.inner();
    let uri = uri("complete.pine");

    server.did_open(open_params(&uri, "c = color.", 1)).await;
    let labels = completion_labels(server.completion(completion_params(&uri, 0, 10)).await.unwrap());
    assert_eq!(labels, vec!["color.new", "color.rgb"]);
}

#[tokio::test]
async fn test_completion_unknown_document() {
    let service = test_server!();
    let server = service.inner();

    let response = server
        .completion(completion_params(&uri("missing.pine"), 0, 0))
        .await
        .unwrap();
    assert!(completion_labels(response).is_empty());
}

#[tokio::test]
async fn test_completion_resolve_returns_item() {
    let service = test_server!();
    let server = service.inner();

    let uri = uri("resolve.pine");

    server.did_open(open_params(&uri, "x = ta.", 1)).await;
    let items = match server.completion(completion_params(&uri, 0, 7)).await.unwrap() {
        Some(CompletionResponse::Array(items)) => items,
        other => panic!("unexpected completion response: {:?}", other),
    };
    assert!(!items.is_empty());
    for item in items {
        assert_eq!(server.completion_resolve(item.clone()).await.unwrap(), item);
    }
}

#[tokio::test]
async fn test_hover_builtin() {
    let service = test_server!();
    let server = service.inner();
    let uri = uri("hover.pine");

    server.did_open(open_params(&uri, SCRIPT, 1)).await;
    let hover = server.hover(hover_params(&uri, 2, 11)).await.unwrap().unwrap();
    match hover.contents {
        HoverContents::Markup(markup) => assert!(markup.value.starts_with("**ta.ema**")),
        other => panic!("unexpected hover contents: {:?}", other),
    }
}

#[tokio::test]
async fn test_hover_unknown_document() {
    let service = test_server!();
    let server = service.inner();
    assert!(server
        .hover(hover_params(&uri("missing.pine"), 0, 0))
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
#[allow(deprecated)]
async fn test_document_symbols() {
    let service = test_server!();
    let server = service.inner();
    let uri = uri("symbols.pine");

    server.did_open(open_params(&uri, SCRIPT, 1)).await;
    let response = server.document_symbol(symbol_params(&uri)).await.unwrap();

    let symbols = match response {
        Some(DocumentSymbolResponse::Flat(symbols)) => symbols,
        other => panic!("unexpected symbol response: {:?}", other),
    };
    let names: Vec<&str> = symbols.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Indicator", "f", "total"]);
    assert!(symbols.iter().all(|s| s.location.uri == uri));
}

#[tokio::test]
async fn test_document_symbols_unknown_document() {
    let service = test_server!();
    let server = service.inner();

    let response = server
        .document_symbol(symbol_params(&uri("missing.pine")))
        .await
        .unwrap();
    match response {
        Some(DocumentSymbolResponse::Flat(symbols)) => assert!(symbols.is_empty()),
        other => panic!("unexpected symbol response: {:?}", other),
    }
}

#[tokio::test]
async fn test_workspace_notifications_do_not_panic() {
    let service = test_server!();
    let server = service.inner();

    server
        .did_change_workspace_folders(DidChangeWorkspaceFoldersParams {
            event: WorkspaceFoldersChangeEvent {
                added: vec![WorkspaceFolder {
                    uri: uri("project"),
                    name: "project".to_string(),
                }],
                removed: vec![],
            },
        })
        .await;
    server
        .did_change_watched_files(DidChangeWatchedFilesParams {
            changes: vec![FileEvent {
                uri: uri("a.pine"),
                typ: FileChangeType::CHANGED,
            }],
        })
        .await;
}
