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

//! Position helpers for LSP requests.
//!
//! LSP positions count UTF-16 code units. These helpers map a `Position`
//! onto the document's UTF-8 text without panicking on out-of-range or
//! mid-character input.

use pine_core::text::{lines, utf16_len, utf16_to_byte};
use tower_lsp::lsp_types::{Position, Range};

/// The cursor's line split at the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorLine<'a> {
    /// Full line text
    pub line: &'a str,
    /// Byte offset of the cursor within `line`
    pub offset: usize,
}

impl<'a> CursorLine<'a> {
    /// Text before the cursor.
    pub fn before(&self) -> &'a str {
        &self.line[..self.offset]
    }

    /// Text from the cursor onwards.
    pub fn after(&self) -> &'a str {
        &self.line[self.offset..]
    }
}

/// Locate `position` in `content`.
///
/// Returns `None` when the line does not exist. A column past the end of
/// the line is clamped to the line end.
pub fn cursor_line(content: &str, position: Position) -> Option<CursorLine<'_>> {
    let line = *lines(content).get(position.line as usize)?;
    let offset = utf16_to_byte(line, position.character).unwrap_or(line.len());
    Some(CursorLine { line, offset })
}

/// Range covering the whole of `line_text` on line `line`.
pub fn full_line_range(line: u32, line_text: &str) -> Range {
    Range {
        start: Position::new(line, 0),
        end: Position::new(line, utf16_len(line_text)),
    }
}
