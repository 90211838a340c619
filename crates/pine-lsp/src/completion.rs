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

//! Autocompletion for Pine Script files.
//!
//! The text before the cursor selects one context, first match wins:
//!
//! - **Namespace**: the text before the cursor ends with `<ns>.` for a
//!   known namespace; only that namespace's members are offered
//! - **Word**: a partial identifier; every catalog entry starting with it
//! - **Everything**: nothing typed yet; the whole catalog
//!
//! # Examples
//!
//! ```text
//! x = ta.|          → ta.sma, ta.ema, ...
//! c = color.|       → color.new, color.rgb
//! plot(cl|          → close
//! ```

use crate::utils::cursor_line;
use once_cell::sync::Lazy;
use pine_core::text::is_word_char;
use pine_core::{Catalog, CatalogEntry, Category};
use tower_lsp::lsp_types::*;

/// Where a namespace's members come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamespaceSource {
    /// Catalog entries of this category under `<ns>.`
    Catalog(Category),
    /// The hand-written `color` constructors
    ColorConstructors,
}

/// A namespace that triggers member completion after `<name>.`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Namespace {
    pub name: &'static str,
    pub source: NamespaceSource,
}

/// Namespaces with member completion, in match order.
pub const NAMESPACES: &[Namespace] = &[
    Namespace {
        name: "ta",
        source: NamespaceSource::Catalog(Category::Function),
    },
    Namespace {
        name: "math",
        source: NamespaceSource::Catalog(Category::Function),
    },
    Namespace {
        name: "str",
        source: NamespaceSource::Catalog(Category::Function),
    },
    Namespace {
        name: "array",
        source: NamespaceSource::Catalog(Category::Function),
    },
    Namespace {
        name: "input",
        source: NamespaceSource::Catalog(Category::Function),
    },
    Namespace {
        name: "strategy",
        source: NamespaceSource::Catalog(Category::Function),
    },
    Namespace {
        name: "syminfo",
        source: NamespaceSource::Catalog(Category::Variable),
    },
    Namespace {
        name: "color",
        source: NamespaceSource::ColorConstructors,
    },
];

static COLOR_CONSTRUCTORS: Lazy<Vec<CatalogEntry>> = Lazy::new(|| {
    vec![
        CatalogEntry::new(
            "color.new",
            Category::Function,
            "color.new(color, transparency) -> color",
            "Create a new color with transparency.",
        )
        .with_template("color.new(${1:color.blue}, ${2:0})"),
        CatalogEntry::new(
            "color.rgb",
            Category::Function,
            "color.rgb(red, green, blue, transparency) -> color",
            "Create color from RGB values.",
        )
        .with_template("color.rgb(${1:255}, ${2:255}, ${3:255}, ${4:0})"),
    ]
});

/// Completion context for the text before the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionContext<'a> {
    /// Right after `<ns>.`
    Namespace(Namespace),
    /// Trailing partial identifier
    Word(&'a str),
    /// No partial identifier
    Everything,
}

/// Classify the text before the cursor.
pub fn determine_context(before: &str) -> CompletionContext<'_> {
    if let Some(head) = before.strip_suffix('.') {
        if let Some(ns) = NAMESPACES.iter().find(|ns| head.ends_with(ns.name)) {
            return CompletionContext::Namespace(*ns);
        }
    }

    let word_start = before
        .char_indices()
        .rev()
        .take_while(|(_, c)| is_word_char(*c))
        .last()
        .map(|(i, _)| i);

    match word_start {
        Some(start) => CompletionContext::Word(&before[start..]),
        None => CompletionContext::Everything,
    }
}

/// Get completions for a position in the document.
///
/// Returns an empty list when the line does not exist.
pub fn get_completions(catalog: &Catalog, content: &str, position: Position) -> Vec<CompletionItem> {
    let Some(cursor) = cursor_line(content, position) else {
        return Vec::new();
    };

    let entries: Vec<&CatalogEntry> = match determine_context(cursor.before()) {
        CompletionContext::Namespace(ns) => match ns.source {
            NamespaceSource::Catalog(category) => catalog.lookup_namespace(ns.name, category),
            NamespaceSource::ColorConstructors => COLOR_CONSTRUCTORS.iter().collect(),
        },
        CompletionContext::Word(word) => catalog.lookup_by_word_prefix(word),
        CompletionContext::Everything => catalog.entries().iter().collect(),
    };

    entries.into_iter().map(to_completion_item).collect()
}

/// `completionItem/resolve`: items are complete when first sent.
pub fn resolve_completion(item: CompletionItem) -> CompletionItem {
    item
}

fn completion_kind(category: Category) -> CompletionItemKind {
    match category {
        Category::Function => CompletionItemKind::FUNCTION,
        Category::Variable => CompletionItemKind::VARIABLE,
        Category::Keyword => CompletionItemKind::KEYWORD,
        Category::Type => CompletionItemKind::TYPE_PARAMETER,
    }
}

fn to_completion_item(entry: &CatalogEntry) -> CompletionItem {
    let format = if entry.insert_template.is_some() {
        InsertTextFormat::SNIPPET
    } else {
        InsertTextFormat::PLAIN_TEXT
    };

    CompletionItem {
        label: entry.name.clone(),
        kind: Some(completion_kind(entry.category)),
        detail: Some(entry.signature.clone()),
        documentation: Some(Documentation::String(entry.documentation.clone())),
        insert_text: Some(entry.insert_text().to_string()),
        insert_text_format: Some(format),
        ..Default::default()
    }
}
