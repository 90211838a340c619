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

//! Document symbols for Pine Script files.
//!
//! Symbols come from four line-level pattern detectors, not from a parse:
//!
//! - `indicator(` declares the script as `Indicator`
//! - `strategy(` declares the script as `Strategy`
//! - `name(args) =>` defines a function
//! - `var`/`varip` [type] `name =` declares a persistent variable
//!
//! Every detector runs on every line, so one line can yield several symbols.

use crate::utils::full_line_range;
use once_cell::sync::Lazy;
use pine_core::language::DECLARATION_KEYWORDS;
use pine_core::text::lines;
use regex::Regex;
use tower_lsp::lsp_types::*;
use tracing::debug;

static INDICATOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"indicator\s*\(").expect("indicator regex is valid"));

static STRATEGY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"strategy\s*\(").expect("strategy regex is valid"));

static FUNCTION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\w+)\s*\([^)]*\)\s*=>").expect("function regex is valid"));

static VARIABLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"\b(?:{})\s+(?:\w+\s+)?(\w+)\s*=",
        DECLARATION_KEYWORDS.join("|")
    ))
    .expect("variable regex is valid")
});

/// Kind of an indexed symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolEntryKind {
    Function,
    Variable,
}

impl From<SymbolEntryKind> for SymbolKind {
    fn from(kind: SymbolEntryKind) -> Self {
        match kind {
            SymbolEntryKind::Function => SymbolKind::FUNCTION,
            SymbolEntryKind::Variable => SymbolKind::VARIABLE,
        }
    }
}

/// A symbol found on one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolEntry {
    pub name: String,
    pub kind: SymbolEntryKind,
    /// Zero-based line
    pub line: u32,
}

/// Index every symbol in `content`, ordered by line then detector.
pub fn index_symbols(content: &str) -> Vec<SymbolEntry> {
    let mut symbols = Vec::new();

    for (number, text) in lines(content).into_iter().enumerate() {
        let line = number as u32;
        let mut push = |name: &str, kind| {
            symbols.push(SymbolEntry {
                name: name.to_string(),
                kind,
                line,
            })
        };

        if INDICATOR_RE.is_match(text) {
            push("Indicator", SymbolEntryKind::Function);
        }
        if STRATEGY_RE.is_match(text) {
            push("Strategy", SymbolEntryKind::Function);
        }
        if let Some(caps) = FUNCTION_RE.captures(text) {
            push(&caps[1], SymbolEntryKind::Function);
        }
        if let Some(caps) = VARIABLE_RE.captures(text) {
            push(&caps[1], SymbolEntryKind::Variable);
        }
    }

    symbols
}

/// Get document symbols as a flat list for `uri`.
///
/// Each symbol's range covers its whole line.
#[allow(deprecated)]
pub fn get_document_symbols(uri: &Url, content: &str) -> Vec<SymbolInformation> {
    let lines = lines(content);
    let symbols: Vec<SymbolInformation> = index_symbols(content)
        .into_iter()
        .map(|entry| {
            let text = lines.get(entry.line as usize).copied().unwrap_or_default();
            SymbolInformation {
                name: entry.name,
                kind: entry.kind.into(),
                tags: None,
                deprecated: None,
                location: Location {
                    uri: uri.clone(),
                    range: full_line_range(entry.line, text),
                },
                container_name: None,
            }
        })
        .collect();

    debug!("Extracted {} symbols from {}", symbols.len(), uri);
    symbols
}
