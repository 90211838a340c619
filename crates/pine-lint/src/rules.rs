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

//! Lint rules
//!
//! Every rule looks at one line at a time (plus, for parenthesis balance,
//! the line after it). Rules never see each other's output.

use crate::diagnostic::{Diagnostic, DiagnosticKind, Span};
use once_cell::sync::Lazy;
use pine_core::language::{
    is_supported_version, CONTROL_KEYWORDS, DECLARATION_KEYWORDS, RECOMMENDED_VERSION,
    VERSION_DIRECTIVE_PREFIX,
};
use pine_core::text::{byte_to_utf16, utf16_len};
use pine_core::{Catalog, Category};
use regex::Regex;
use std::collections::HashSet;

static VERSION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"^{}(\d+)", regex::escape(VERSION_DIRECTIVE_PREFIX)))
        .expect("version directive regex is valid")
});

static DECLARATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"\b(?P<keyword>{})\s+(?P<ty>\w+)",
        DECLARATION_KEYWORDS.join("|")
    ))
    .expect("declaration regex is valid")
});

static CONTROL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"\b({})\s+[^:]+$", CONTROL_KEYWORDS.join("|")))
        .expect("control statement regex is valid")
});

/// Configuration for a single rule
#[derive(Debug, Clone)]
pub struct RuleConfig {
    /// Whether the rule is enabled
    pub enabled: bool,
    /// Whether to treat warnings as errors
    pub error: bool,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            error: false,
        }
    }
}

/// One line of the document as seen by a rule.
#[derive(Debug, Clone, Copy)]
pub struct LineContext<'a> {
    /// Zero-based line number
    pub number: u32,
    /// Line text without its terminator
    pub text: &'a str,
    /// The following line, if any
    pub next: Option<&'a str>,
}

impl LineContext<'_> {
    /// Span covering the whole line.
    pub fn full_span(&self) -> Span {
        Span::new(self.number, 0, utf16_len(self.text))
    }
}

/// Lint rule trait
pub trait LintRule: Send + Sync {
    /// Rule identifier
    fn id(&self) -> &str;

    /// Rule description
    fn description(&self) -> &str;

    /// Check a single line
    fn check_line(&self, line: &LineContext<'_>) -> Vec<Diagnostic>;
}

/// Rule: `//@version=` directive on the first line
pub struct VersionDirectiveRule;

impl LintRule for VersionDirectiveRule {
    fn id(&self) -> &str {
        "version-directive"
    }

    fn description(&self) -> &str {
        "First line must declare a supported //@version"
    }

    fn check_line(&self, line: &LineContext<'_>) -> Vec<Diagnostic> {
        if line.number != 0 {
            return Vec::new();
        }

        let Some(caps) = VERSION_RE.captures(line.text) else {
            if line.text.trim().is_empty() {
                return Vec::new();
            }
            return vec![Diagnostic::warning(
                DiagnosticKind::MissingVersion,
                format!(
                    "Missing version directive. Add //@version={} at the top of the file.",
                    RECOMMENDED_VERSION
                ),
                self.id(),
            )
            .with_span(line.full_span())];
        };

        let digits = &caps[1];
        // Digit runs too long for u32 are unsupported by definition.
        let supported = digits.parse::<u32>().is_ok_and(is_supported_version);
        if supported {
            return Vec::new();
        }

        vec![Diagnostic::warning(
            DiagnosticKind::UnsupportedVersion,
            format!(
                "Pine Script version {} is not supported. Use version {}.",
                digits, RECOMMENDED_VERSION
            ),
            self.id(),
        )
        .with_span(line.full_span())]
    }
}

/// Rule: parenthesis balance across a line and its successor
pub struct ParenBalanceRule;

impl ParenBalanceRule {
    fn balance(text: &str) -> i64 {
        text.chars().fold(0i64, |acc, c| match c {
            '(' => acc + 1,
            ')' => acc - 1,
            _ => acc,
        })
    }
}

impl LintRule for ParenBalanceRule {
    fn id(&self) -> &str {
        "paren-balance"
    }

    fn description(&self) -> &str {
        "Parentheses opened on a line must close on it or the next line"
    }

    fn check_line(&self, line: &LineContext<'_>) -> Vec<Diagnostic> {
        let own = Self::balance(line.text);
        if own == 0 {
            return Vec::new();
        }

        // The last line has nothing to continue into.
        let Some(next) = line.next else {
            return Vec::new();
        };

        if own + Self::balance(next) == 0 {
            return Vec::new();
        }

        let end = utf16_len(line.text);
        vec![Diagnostic::error(
            DiagnosticKind::MismatchedParentheses,
            "Mismatched parentheses.",
            self.id(),
        )
        .with_span(Span::new(line.number, end.saturating_sub(1), end))]
    }
}

/// Rule: `var`/`varip` declarations must name a known type
pub struct DeclarationTypeRule {
    types: HashSet<String>,
}

impl DeclarationTypeRule {
    /// Build the rule from the catalog's type names.
    pub fn new(catalog: &Catalog) -> Self {
        Self {
            types: catalog
                .by_category(Category::Type)
                .map(|e| e.name.clone())
                .collect(),
        }
    }
}

impl LintRule for DeclarationTypeRule {
    fn id(&self) -> &str {
        "declaration-type"
    }

    fn description(&self) -> &str {
        "Type in a var/varip declaration must be a known type"
    }

    fn check_line(&self, line: &LineContext<'_>) -> Vec<Diagnostic> {
        DECLARATION_RE
            .captures_iter(line.text)
            .filter_map(|caps| {
                let keyword = caps.name("keyword")?;
                let ty = caps.name("ty")?;
                // only declarations: the keyword must be followed by `=`
                if !line.text[ty.end()..].contains('=') || self.types.contains(ty.as_str()) {
                    return None;
                }
                Some(
                    Diagnostic::warning(
                        DiagnosticKind::UnknownType,
                        format!("Unknown type: {}", ty.as_str()),
                        self.id(),
                    )
                    .with_span(Span::new(
                        line.number,
                        byte_to_utf16(line.text, keyword.start()),
                        byte_to_utf16(line.text, ty.end()),
                    )),
                )
            })
            .collect()
    }
}

/// Rule: control statement headers end with `:`
pub struct MissingColonRule;

impl LintRule for MissingColonRule {
    fn id(&self) -> &str {
        "missing-colon"
    }

    fn description(&self) -> &str {
        "Control statement headers must contain a colon"
    }

    fn check_line(&self, line: &LineContext<'_>) -> Vec<Diagnostic> {
        let text = line.text;
        if !CONTROL_RE.is_match(text) || text.contains("=>") || text.contains(':') {
            return Vec::new();
        }

        vec![Diagnostic::error(
            DiagnosticKind::MissingColon,
            "Missing colon (:) after control statement.",
            self.id(),
        )
        .with_span(line.full_span())]
    }
}

/// Get default lint rules in evaluation order
pub fn default_rules(catalog: &Catalog) -> Vec<Box<dyn LintRule>> {
    vec![
        Box::new(VersionDirectiveRule),
        Box::new(ParenBalanceRule),
        Box::new(DeclarationTypeRule::new(catalog)),
        Box::new(MissingColonRule),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::Severity;

    fn ctx<'a>(number: u32, text: &'a str, next: Option<&'a str>) -> LineContext<'a> {
        LineContext { number, text, next }
    }

    // ==================== default_rules tests ====================

    #[test]
    fn test_default_rules_ids_in_order() {
        let catalog = Catalog::builtin();
        let ids: Vec<String> = default_rules(&catalog)
            .iter()
            .map(|r| r.id().to_string())
            .collect();
        assert_eq!(
            ids,
            vec![
                "version-directive",
                "paren-balance",
                "declaration-type",
                "missing-colon"
            ]
        );
    }

    #[test]
    fn test_default_rules_have_descriptions() {
        let catalog = Catalog::builtin();
        for rule in default_rules(&catalog) {
            assert!(!rule.description().is_empty());
        }
    }

    // ==================== VersionDirectiveRule tests ====================

    #[test]
    fn test_version_supported() {
        for v in 1..=5 {
            let text = format!("//@version={}", v);
            assert!(VersionDirectiveRule.check_line(&ctx(0, &text, None)).is_empty());
        }
    }

    #[test]
    fn test_version_unsupported() {
        let diags = VersionDirectiveRule.check_line(&ctx(0, "//@version=9", None));
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].kind(), &DiagnosticKind::UnsupportedVersion);
        assert_eq!(
            diags[0].message(),
            "Pine Script version 9 is not supported. Use version 5."
        );
        assert_eq!(diags[0].span(), Span::new(0, 0, 12));
    }

    #[test]
    fn test_version_zero_and_overflow() {
        let diags = VersionDirectiveRule.check_line(&ctx(0, "//@version=0", None));
        assert_eq!(diags.len(), 1);

        let huge = "//@version=99999999999999999999";
        let diags = VersionDirectiveRule.check_line(&ctx(0, huge, None));
        assert_eq!(diags.len(), 1);
        assert!(diags[0].message().contains("99999999999999999999"));
    }

    #[test]
    fn test_version_missing() {
        let diags = VersionDirectiveRule.check_line(&ctx(0, "plot(close)", None));
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].kind(), &DiagnosticKind::MissingVersion);
        assert_eq!(diags[0].severity(), Severity::Warning);
        assert_eq!(
            diags[0].message(),
            "Missing version directive. Add //@version=5 at the top of the file."
        );
    }

    #[test]
    fn test_version_blank_first_line() {
        assert!(VersionDirectiveRule.check_line(&ctx(0, "   ", None)).is_empty());
    }

    #[test]
    fn test_version_only_first_line() {
        assert!(VersionDirectiveRule
            .check_line(&ctx(1, "plot(close)", None))
            .is_empty());
    }

    // ==================== ParenBalanceRule tests ====================

    #[test]
    fn test_paren_balanced_line() {
        let diags = ParenBalanceRule.check_line(&ctx(0, "plot(close)", Some("x = 1")));
        assert!(diags.is_empty());
    }

    #[test]
    fn test_paren_last_line_ignored() {
        assert!(ParenBalanceRule.check_line(&ctx(0, "plot(close", None)).is_empty());
    }

    #[test]
    fn test_paren_offset_by_next_line() {
        let diags = ParenBalanceRule.check_line(&ctx(0, "plot(close,", Some("  color.red)")));
        assert!(diags.is_empty());
    }

    #[test]
    fn test_paren_mismatch() {
        let diags = ParenBalanceRule.check_line(&ctx(0, "plot(close", Some("x = 1")));
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].severity(), Severity::Error);
        assert_eq!(diags[0].message(), "Mismatched parentheses.");
        assert_eq!(diags[0].span(), Span::new(0, 9, 10));
    }

    #[test]
    fn test_paren_extra_closing() {
        let diags = ParenBalanceRule.check_line(&ctx(2, "x = a)", Some("y = 2")));
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].line(), 2);
    }

    // ==================== DeclarationTypeRule tests ====================

    #[test]
    fn test_declaration_known_type() {
        let rule = DeclarationTypeRule::new(&Catalog::builtin());
        assert!(rule.check_line(&ctx(0, "var float x = 1.0", None)).is_empty());
        assert!(rule.check_line(&ctx(0, "varip int n = 0", None)).is_empty());
    }

    #[test]
    fn test_declaration_untyped() {
        // the token after the keyword is always read as the type
        let rule = DeclarationTypeRule::new(&Catalog::builtin());
        let diags = rule.check_line(&ctx(0, "var myCount = 0", None));
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].message(), "Unknown type: myCount");
        assert_eq!(diags[0].span(), Span::new(0, 0, 11));
    }

    #[test]
    fn test_declaration_without_assignment() {
        let rule = DeclarationTypeRule::new(&Catalog::builtin());
        assert!(rule.check_line(&ctx(0, "var myCount", None)).is_empty());
        assert!(rule.check_line(&ctx(0, "x == 1 or var", None)).is_empty());
    }

    #[test]
    fn test_declaration_unknown_type() {
        let rule = DeclarationTypeRule::new(&Catalog::builtin());
        let diags = rule.check_line(&ctx(4, "  var flaot x = 1.0", None));
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].message(), "Unknown type: flaot");
        assert_eq!(diags[0].severity(), Severity::Warning);
        assert_eq!(diags[0].span(), Span::new(4, 2, 11));
    }

    #[test]
    fn test_declaration_varip_unknown_type() {
        let rule = DeclarationTypeRule::new(&Catalog::builtin());
        let diags = rule.check_line(&ctx(0, "varip series x = close", None));
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].span(), Span::new(0, 0, 12));
    }

    #[test]
    fn test_declaration_not_a_keyword() {
        let rule = DeclarationTypeRule::new(&Catalog::builtin());
        assert!(rule.check_line(&ctx(0, "myvar foo x = 1", None)).is_empty());
    }

    // ==================== MissingColonRule tests ====================

    #[test]
    fn test_missing_colon() {
        let diags = MissingColonRule.check_line(&ctx(1, "if close > open", None));
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].severity(), Severity::Error);
        assert_eq!(diags[0].span(), Span::new(1, 0, 15));
        assert_eq!(
            diags[0].message(),
            "Missing colon (:) after control statement."
        );
    }

    #[test]
    fn test_colon_present() {
        assert!(MissingColonRule
            .check_line(&ctx(0, "if close > open:", None))
            .is_empty());
    }

    #[test]
    fn test_arrow_function_exempt() {
        assert!(MissingColonRule
            .check_line(&ctx(0, "function f(x) => x * 2", None))
            .is_empty());
    }

    #[test]
    fn test_every_control_keyword() {
        for header in ["if x > 1", "for i = 0 to 10", "while running", "function f"] {
            assert_eq!(
                MissingColonRule.check_line(&ctx(0, header, None)).len(),
                1,
                "{}",
                header
            );
        }
        assert!(MissingColonRule.check_line(&ctx(0, "else x", None)).is_empty());
    }

    #[test]
    fn test_keyword_inside_identifier() {
        assert!(MissingColonRule
            .check_line(&ctx(0, "iffy = 1", None))
            .is_empty());
    }
}
