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

//! Language-level constants.

use std::ops::RangeInclusive;

/// Script versions accepted by the `//@version=` directive.
pub const SUPPORTED_VERSIONS: RangeInclusive<u32> = 1..=5;

/// Version suggested in diagnostics.
pub const RECOMMENDED_VERSION: u32 = 5;

/// Prefix of the version directive line.
pub const VERSION_DIRECTIVE_PREFIX: &str = "//@version=";

/// Keywords that introduce a persistent variable declaration.
pub const DECLARATION_KEYWORDS: &[&str] = &["var", "varip"];

/// Statements whose header must contain a `:`.
pub const CONTROL_KEYWORDS: &[&str] = &["if", "for", "while", "function"];

/// Whether `version` is in [`SUPPORTED_VERSIONS`].
pub fn is_supported_version(version: u32) -> bool {
    SUPPORTED_VERSIONS.contains(&version)
}
