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

//! Catalog entry types

/// Category of a built-in identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Callable built-in (`ta.sma`, `plot`, ...)
    Function,
    /// Built-in series or constant (`close`, `syminfo.ticker`, ...)
    Variable,
    /// Reserved word (`if`, `var`, ...)
    Keyword,
    /// Type name (`int`, `float`, ...)
    Type,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Function => write!(f, "function"),
            Self::Variable => write!(f, "variable"),
            Self::Keyword => write!(f, "keyword"),
            Self::Type => write!(f, "type"),
        }
    }
}

/// One documented built-in identifier.
///
/// `insert_template` uses snippet placeholders (`${1:source}`); when absent,
/// editors insert the bare `name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Dotted-path identifier, e.g. `ta.sma`
    pub name: String,
    /// Category the entry belongs to
    pub category: Category,
    /// Signature text shown as completion detail
    pub signature: String,
    /// Free-text documentation
    pub documentation: String,
    /// Templated insertion snippet
    pub insert_template: Option<String>,
}

impl CatalogEntry {
    pub fn new(
        name: impl Into<String>,
        category: Category,
        signature: impl Into<String>,
        documentation: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            category,
            signature: signature.into(),
            documentation: documentation.into(),
            insert_template: None,
        }
    }

    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.insert_template = Some(template.into());
        self
    }

    /// Last dotted segment of the name (`sma` for `ta.sma`).
    pub fn last_segment(&self) -> &str {
        last_segment(&self.name)
    }

    /// Text to insert on completion: the template, or the bare name.
    pub fn insert_text(&self) -> &str {
        self.insert_template.as_deref().unwrap_or(&self.name)
    }

    /// Whether the name lives under `namespace.`.
    pub fn in_namespace(&self, namespace: &str) -> bool {
        self.name
            .strip_prefix(namespace)
            .is_some_and(|rest| rest.starts_with('.'))
    }
}

pub(crate) fn last_segment(name: &str) -> &str {
    name.rsplit('.').next().unwrap_or(name)
}
