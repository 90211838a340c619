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

//! Pine Script Language Server Protocol (LSP) Implementation
//!
//! This crate provides IDE integration for TradingView Pine Script through
//! the Language Server Protocol, for editors like VS Code, Neovim and Emacs.
//!
//! # Features
//!
//! - **Diagnostics**: Line-level lint checks published on every open and change
//! - **Autocomplete**: Namespace members after `ta.`, `math.`, `color.` and
//!   friends, prefix matches on partial identifiers, snippet templates for
//!   function calls
//! - **Hover**: Signature and documentation of built-in identifiers
//! - **Document Symbols**: Script declaration, user functions and `var` variables
//! - **Per-document settings**: `pinescript.enableDiagnostics`,
//!   `pinescript.enableHover` and `pinescript.enableCompletion`
//!
//! # Memory Management
//!
//! - **Document Size Limit**: Maximum 500MB per document (configurable)
//! - **UTF-16 Positions**: All LSP columns are UTF-16 code units; string
//!   slicing never splits a UTF-8 character
//!
//! # Usage
//!
//! ## Running the Server
//!
//! ```bash
//! # Run the language server (stdio transport)
//! pine-lsp
//!
//! # With debug logging
//! RUST_LOG=debug pine-lsp
//! ```
//!
//! ## Programmatic Usage
//!
//! ```no_run
//! use pine_lsp::PineLanguageServer;
//! use tower_lsp::{LspService, Server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let stdin = tokio::io::stdin();
//!     let stdout = tokio::io::stdout();
//!
//!     let (service, socket) = LspService::new(|client| {
//!         PineLanguageServer::with_config(
//!             client,
//!             64 * 1024 * 1024 // 64 MB max document size
//!         )
//!     });
//!
//!     Server::new(stdin, stdout, socket).serve(service).await;
//! }
//! ```
//!
//! # Architecture
//!
//! - `backend`: LSP server implementation and request routing
//! - [`completion`]: Context-aware autocompletion
//! - [`diagnostics`]: Lint diagnostics to LSP diagnostics
//! - [`document_manager`]: Open document storage
//! - [`hover`]: Hover documentation
//! - [`settings`]: Per-document settings resolution and caching
//! - [`symbols`]: Document symbol provider
//! - [`utils`]: Cursor and range helpers

mod backend;
pub mod completion;
pub mod constants;
pub mod diagnostics;
pub mod document_manager;
pub mod hover;
pub mod settings;
pub mod symbols;
pub mod utils;


pub use backend::PineLanguageServer;
pub use document_manager::DocumentManager;
pub use settings::{ConfigurationSource, EffectiveSettings, SettingsError, SettingsResolver};

/// LSP server version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
