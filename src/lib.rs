#![forbid(unsafe_code)]
//! Cadence declaration-level syntax front end
//!
//! This crate bundles the front end for the Cadence smart contract language: the shared vocabulary
//! ([`cadence_core`]), the lexer and declaration parser ([`syntax`]), and the `cadence` command-line tool ([`cli`]).
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module enforces
//!   `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **Parser bugs**: A state the parser should never reach is reported as
//!   [`ParseError::Internal`](syntax::diagnostics::ParseError::Internal), not as a panic.

pub mod cli;

pub use cadence_core;
pub use cadence_syntax as syntax;

pub use cadence_syntax::ast;
pub use cadence_syntax::diagnostics;
pub use cadence_syntax::lexer;
pub use cadence_syntax::parser;
