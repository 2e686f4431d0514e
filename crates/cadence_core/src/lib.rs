//! Provide shared, pure vocabulary and literal helpers for the Cadence syntax front end.
//!
//! This crate is intentionally small and dependency-light. It contains deterministic helpers that the lexer, the
//! parser and any future tooling (formatter, language server) can share without depending on AST types.
//!
//! ## Notes
//!
//! - This is a "vocabulary" crate: **no IO**, no global state, and no parser-specific types.
//! - Current scope: reserved keywords, punctuation and operator registries, string-literal decoding, and the
//!   recursion limits the parser enforces.

pub mod lang;
pub mod limits;
pub mod strings;
