//! Declaration-level syntax frontend for the Cadence language: lexer, parser, AST, diagnostics.
//!
//! ## Notes
//! - This crate is “syntax-only”: it does not resolve names, check types or enforce the resource-transfer
//!   discipline. It records which transfer operator was written and leaves the rules to later phases.
//! - Vocabulary identity (keywords/operators/punctuation) comes from `cadence_core::lang` registries.
//!
//! ## Examples
//! ```rust
//! use cadence_syntax::{lexer, parser};
//!
//! let tokens = lexer::lex("import a, b from \"x\"\nlet y: Int = 1").unwrap();
//! let program = parser::parse(&tokens).unwrap();
//! assert_eq!(program.declarations.len(), 2);
//! ```
//!
//! ## See also
//! - `cadence_core::lang` for registry-backed language vocabulary.

pub mod ast;
pub mod diagnostics;
pub mod lexer;
pub mod parser;
pub mod token_helpers;
