//! Cadence language vocabulary registries.
//!
//! This module is the "front door" for language-level vocabulary: reserved keywords, operators and punctuation.
//!
//! The design goal is to avoid stringly-typed checks scattered across the lexer and parser. Callers work with
//! **stable IDs** (e.g. `KeywordId`, `PunctuationId`) and look up spellings/metadata via registry tables.
//!
//! ## Notes
//! - Registries are intentionally **pure**: no AST types, no IO, no side effects.
//! - Keywords are not reserved at the token level. The lexer emits identifiers and the parser resolves their
//!   spelling through [`keywords::from_str`] once per identifier token.
//!
//! ## Examples
//! ```rust
//! use cadence_core::lang::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::from_str("import"), Some(KeywordId::Import));
//! assert_eq!(keywords::as_str(KeywordId::Import), "import");
//! ```

pub mod keywords;
pub mod operators;
pub mod punctuation;
pub mod registry;
