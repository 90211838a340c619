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

//! LSP constants.
//!
//! Constants are organized by category:
//! - **Memory Limits**: Document size constraints
//! - **LSP Protocol**: Identifiers exchanged with the client
//! - **Completion**: Trigger characters

// ============================================================================
// Memory Limits
// ============================================================================

/// Bytes per megabyte (1024 * 1024).
pub const BYTES_PER_MEGABYTE: usize = 1024 * 1024;

/// Default maximum document size in bytes (500 MB).
///
/// Pine scripts are rarely more than a few thousand lines; the limit only
/// exists to keep a runaway buffer from exhausting memory.
pub const DEFAULT_MAX_DOCUMENT_SIZE: usize = 500 * BYTES_PER_MEGABYTE;

// ============================================================================
// LSP Protocol Constants
// ============================================================================

/// Server name reported in `initialize`.
pub const SERVER_NAME: &str = "pine-lsp";

/// `source` field on every published diagnostic.
pub const DIAGNOSTIC_SOURCE: &str = "pinescript";

/// Configuration section requested through `workspace/configuration`.
pub const SETTINGS_SECTION: &str = "pinescript";

/// Method name for dynamic configuration-change registration.
pub const DID_CHANGE_CONFIGURATION_METHOD: &str = "workspace/didChangeConfiguration";

// ============================================================================
// Completion
// ============================================================================

/// Characters that trigger completion without an explicit request.
pub const COMPLETION_TRIGGER_CHARACTERS: &[&str] = &[".", "(", "["];
