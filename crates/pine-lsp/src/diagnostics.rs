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

//! Conversion of lint diagnostics to LSP diagnostics.

use crate::constants::DIAGNOSTIC_SOURCE;
use pine_lint::Severity;
use tower_lsp::lsp_types::{Diagnostic, DiagnosticSeverity, NumberOrString, Position, Range};

/// Convert one lint diagnostic. Spans are already in UTF-16 columns.
pub fn to_lsp_diagnostic(diag: &pine_lint::Diagnostic) -> Diagnostic {
    let severity = match diag.severity() {
        Severity::Hint => DiagnosticSeverity::HINT,
        Severity::Warning => DiagnosticSeverity::WARNING,
        Severity::Error => DiagnosticSeverity::ERROR,
    };
    let span = diag.span();

    Diagnostic {
        range: Range {
            start: Position::new(span.line, span.start),
            end: Position::new(span.line, span.end),
        },
        severity: Some(severity),
        code: Some(NumberOrString::String(diag.rule_id().to_string())),
        source: Some(DIAGNOSTIC_SOURCE.to_string()),
        message: diag.message().to_string(),
        ..Default::default()
    }
}

/// Convert a list, keeping its order.
pub fn to_lsp_diagnostics(diagnostics: &[pine_lint::Diagnostic]) -> Vec<Diagnostic> {
    diagnostics.iter().map(to_lsp_diagnostic).collect()
}
