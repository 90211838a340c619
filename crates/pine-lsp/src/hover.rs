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

//! Hover documentation for built-in identifiers.
//!
//! Hovering anywhere on `ta.sma` (or on a bare `sma`) shows the catalog
//! signature and documentation of `ta.sma`.

use crate::utils::cursor_line;
use pine_core::text::{byte_to_utf16, is_word_char};
use pine_core::Catalog;
use tower_lsp::lsp_types::*;

/// Dotted identifier under the cursor as `(token, start_byte, end_byte)`.
///
/// Word and dot characters before the cursor plus word characters after
/// it, with leading and trailing dots dropped.
pub fn token_at(line: &str, offset: usize) -> Option<(&str, usize, usize)> {
    let before = &line[..offset];
    let after = &line[offset..];

    let back = before
        .chars()
        .rev()
        .take_while(|c| is_word_char(*c) || *c == '.')
        .map(char::len_utf8)
        .sum::<usize>();
    let forward = after
        .chars()
        .take_while(|c| is_word_char(*c))
        .map(char::len_utf8)
        .sum::<usize>();

    let raw = &line[offset - back..offset + forward];
    let token = raw.trim_matches('.');
    if token.is_empty() {
        return None;
    }

    let start = offset - back + (raw.len() - raw.trim_start_matches('.').len());
    Some((token, start, start + token.len()))
}

/// Get hover information for a position.
///
/// Returns `None` if the line does not exist, no identifier sits under the
/// cursor, or the identifier is not a documented built-in.
pub fn get_hover(catalog: &Catalog, content: &str, position: Position) -> Option<Hover> {
    let cursor = cursor_line(content, position)?;
    let (token, start, end) = token_at(cursor.line, cursor.offset)?;

    let entry = catalog.lookup_exact_or_suffix(token)?;
    if entry.documentation.is_empty() {
        return None;
    }

    Some(Hover {
        contents: HoverContents::Markup(MarkupContent {
            kind: MarkupKind::Markdown,
            value: format!(
                "**{}**\n\n{}\n\n{}",
                entry.name, entry.signature, entry.documentation
            ),
        }),
        range: Some(Range {
            start: Position::new(position.line, byte_to_utf16(cursor.line, start)),
            end: Position::new(position.line, byte_to_utf16(cursor.line, end)),
        }),
    })
}
