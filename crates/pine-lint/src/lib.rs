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

//! Pine Script Linting
//!
//! Heuristic, line-oriented diagnostics for Pine Script source. This is not
//! a parser: every rule inspects one line (and at most the line after it)
//! with simple pattern checks.
//!
//! ## Quick Start
//!
//! ```rust
//! use pine_core::Catalog;
//! use pine_lint::{lint, Severity};
//!
//! let catalog = Catalog::builtin();
//! let diagnostics = lint("//@version=9\nplot(close)", &catalog);
//!
//! assert_eq!(diagnostics.len(), 1);
//! assert_eq!(diagnostics[0].severity(), Severity::Warning);
//! ```
//!
//! ## Custom Configuration
//!
//! ```rust
//! use pine_core::Catalog;
//! use pine_lint::{lint_with_config, LintConfig};
//!
//! let mut config = LintConfig::default();
//! config.disable_rule("missing-colon");
//! config.set_rule_error("declaration-type");
//!
//! let diagnostics = lint_with_config("//@version=5\nif close > open", &Catalog::builtin(), config);
//! assert!(diagnostics.is_empty());
//! ```
//!
//! ## Custom Rules
//!
//! ```rust
//! use pine_core::Catalog;
//! use pine_lint::{Diagnostic, LineContext, LintConfig, LintRule, LintRunner};
//!
//! struct NoTabs;
//!
//! impl LintRule for NoTabs {
//!     fn id(&self) -> &str { "no-tabs" }
//!     fn description(&self) -> &str { "Disallow tab characters" }
//!     fn check_line(&self, _line: &LineContext<'_>) -> Vec<Diagnostic> {
//!         vec![]
//!     }
//! }
//!
//! let mut runner = LintRunner::new(LintConfig::default(), &Catalog::builtin());
//! runner.add_rule(Box::new(NoTabs));
//! let diagnostics = runner.run("//@version=5");
//! assert!(diagnostics.is_empty());
//! ```

mod diagnostic;
mod rules;
mod runner;

pub use diagnostic::{Diagnostic, DiagnosticKind, Severity, Span};
pub use rules::{
    default_rules, DeclarationTypeRule, LineContext, LintRule, MissingColonRule,
    ParenBalanceRule, RuleConfig, VersionDirectiveRule,
};
pub use runner::{LintConfig, LintConfigError, LintRunner, LIMIT_RULE_ID};

use pine_core::Catalog;

/// Lint a document with the default configuration
pub fn lint(text: &str, catalog: &Catalog) -> Vec<Diagnostic> {
    lint_with_config(text, catalog, LintConfig::default())
}

/// Lint a document with custom configuration
pub fn lint_with_config(text: &str, catalog: &Catalog, config: LintConfig) -> Vec<Diagnostic> {
    LintRunner::new(config, catalog).run(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lint_empty_document() {
        assert!(lint("", &Catalog::builtin()).is_empty());
    }

    #[test]
    fn test_lint_clean_script() {
        let text = "//@version=5\nindicator(\"Demo\")\nvar float level = 0.0\nplot(close)";
        assert!(lint(text, &Catalog::builtin()).is_empty());
    }

    #[test]
    fn test_lint_with_config_disables() {
        let mut config = LintConfig::default();
        config.disable_rule("version-directive");
        assert!(lint_with_config("plot(close)", &Catalog::builtin(), config).is_empty());
    }
}
