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

//! Lint runner

use crate::diagnostic::{Diagnostic, DiagnosticKind, Severity};
use crate::rules::{default_rules, LineContext, LintRule, RuleConfig};
use pine_core::text::lines;
use pine_core::Catalog;
use std::collections::HashMap;
use thiserror::Error;

const MAX_DIAGNOSTICS: usize = 10_000;
const MAX_RULE_ID_LENGTH: usize = 100;
const MAX_RULES: usize = 1000;

/// Rule id attached to the limit-exceeded warning.
pub const LIMIT_RULE_ID: &str = "lint-runner";

/// Invalid [`LintConfig`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LintConfigError {
    #[error("Too many rule configurations: {count} (max: {max})")]
    TooManyRules { count: usize, max: usize },

    #[error("Empty rule ID not allowed")]
    EmptyRuleId,

    #[error("Rule ID too long: {len} bytes (max: {max})")]
    RuleIdTooLong { len: usize, max: usize },
}

/// Lint configuration
#[derive(Debug, Clone)]
pub struct LintConfig {
    /// Rule configurations by rule ID
    pub rules: HashMap<String, RuleConfig>,
    /// Minimum severity to report
    pub min_severity: Severity,
    /// Maximum number of diagnostics to collect (default: 10,000)
    ///
    /// Once reached, collection stops and a single
    /// `diagnostic-limit-exceeded` warning is appended.
    pub max_diagnostics: usize,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            rules: HashMap::new(),
            min_severity: Severity::Hint,
            max_diagnostics: MAX_DIAGNOSTICS,
        }
    }
}

impl LintConfig {
    /// Validate configuration (checks rule ID lengths and limits).
    pub fn validate(&self) -> Result<(), LintConfigError> {
        if self.rules.len() > MAX_RULES {
            return Err(LintConfigError::TooManyRules {
                count: self.rules.len(),
                max: MAX_RULES,
            });
        }

        for id in self.rules.keys() {
            if id.is_empty() {
                return Err(LintConfigError::EmptyRuleId);
            }
            if id.len() > MAX_RULE_ID_LENGTH {
                return Err(LintConfigError::RuleIdTooLong {
                    len: id.len(),
                    max: MAX_RULE_ID_LENGTH,
                });
            }
        }

        Ok(())
    }

    /// Disable a specific rule
    pub fn disable_rule(&mut self, rule_id: &str) {
        self.set(rule_id, false, false);
    }

    /// Enable a specific rule
    pub fn enable_rule(&mut self, rule_id: &str) {
        self.set(rule_id, true, false);
    }

    /// Report a rule's warnings as errors
    pub fn set_rule_error(&mut self, rule_id: &str) {
        self.set(rule_id, true, true);
    }

    fn set(&mut self, rule_id: &str, enabled: bool, error: bool) {
        self.rules
            .insert(rule_id.to_string(), RuleConfig { enabled, error });
    }
}

/// Lint runner
pub struct LintRunner {
    config: LintConfig,
    rules: Vec<Box<dyn LintRule>>,
}

impl LintRunner {
    /// Create a runner with the default rules for `catalog`
    pub fn new(config: LintConfig, catalog: &Catalog) -> Self {
        Self {
            config,
            rules: default_rules(catalog),
        }
    }

    /// Create a lint runner with custom rules
    pub fn with_rules(config: LintConfig, rules: Vec<Box<dyn LintRule>>) -> Self {
        Self { config, rules }
    }

    /// Add a custom rule, evaluated after the existing ones
    pub fn add_rule(&mut self, rule: Box<dyn LintRule>) {
        self.rules.push(rule);
    }

    pub fn config(&self) -> &LintConfig {
        &self.config
    }

    /// Run all enabled rules over `text`.
    ///
    /// Diagnostics come out line by line in source order; within a line,
    /// in rule order. The list is never re-sorted.
    pub fn run(&self, text: &str) -> Vec<Diagnostic> {
        let active: Vec<(&dyn LintRule, RuleConfig)> = self
            .rules
            .iter()
            .filter_map(|rule| {
                let config = self.config.rules.get(rule.id()).cloned().unwrap_or_default();
                config.enabled.then_some((rule.as_ref(), config))
            })
            .collect();

        let lines = lines(text);
        let mut diagnostics = Vec::new();
        let mut limit_exceeded = false;

        'lines: for (index, line) in lines.iter().enumerate() {
            let context = LineContext {
                number: index as u32,
                text: line,
                next: lines.get(index + 1).copied(),
            };

            for (rule, rule_config) in &active {
                for mut diag in rule.check_line(&context) {
                    if rule_config.error && diag.severity() == Severity::Warning {
                        diag.escalate_to_error();
                    }
                    if diag.severity() < self.config.min_severity {
                        continue;
                    }
                    if diagnostics.len() >= self.config.max_diagnostics {
                        limit_exceeded = true;
                        break 'lines;
                    }
                    diagnostics.push(diag);
                }
            }
        }

        if limit_exceeded {
            diagnostics.push(Diagnostic::warning(
                DiagnosticKind::Custom("diagnostic-limit-exceeded".to_string()),
                format!(
                    "Diagnostic limit of {} exceeded. Further diagnostics have been suppressed.",
                    self.config.max_diagnostics
                ),
                LIMIT_RULE_ID,
            ));
        }

        diagnostics
    }

    /// Check if any errors were found
    pub fn has_errors(&self, diagnostics: &[Diagnostic]) -> bool {
        diagnostics.iter().any(|d| d.severity() == Severity::Error)
    }
}
