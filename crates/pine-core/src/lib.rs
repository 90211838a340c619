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

//! Pine Script Core
//!
//! Shared building blocks for the Pine Script tooling crates:
//!
//! - [`Catalog`]: the immutable table of documented built-in identifiers
//!   (functions, variables, keywords and types)
//! - [`language`]: language-level constants such as the supported
//!   `//@version=` range
//! - [`text`]: line splitting and UTF-16 column arithmetic shared by the
//!   diagnostic engine and the language server
//!
//! ## Quick Start
//!
//! ```rust
//! use pine_core::{Catalog, Category};
//!
//! let catalog = Catalog::builtin();
//!
//! let ta: Vec<_> = catalog.lookup_by_prefix("ta");
//! assert!(ta.iter().all(|e| e.name.starts_with("ta.")));
//!
//! let rsi = catalog.lookup_exact_or_suffix("rsi").unwrap();
//! assert_eq!(rsi.name, "ta.rsi");
//! assert_eq!(rsi.category, Category::Function);
//! ```
//!
//! The catalog is built once and shared read-only (typically behind an
//! `Arc`), so every consumer can read it concurrently without locking.

mod builtins;
mod catalog;
mod entry;
pub mod language;
pub mod text;

pub use catalog::Catalog;
pub use entry::{CatalogEntry, Category};
