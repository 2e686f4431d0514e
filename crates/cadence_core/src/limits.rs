//! Centralized limits shared by the lexer and parser.
//!
//! Recursive descent over untrusted input needs a hard ceiling on nesting, otherwise a short program made of
//! `((((...` or `[[[[...` can exhaust the native stack before the parser reports anything.

// =============================================================================
// Recursion Depth Limits (Parser)
// =============================================================================

/// Maximum nesting depth for types, expressions, blocks and parameter lists.
///
/// Each nested construct adds a frame to the parser's call stack. Past this depth the parser stops with a syntax
/// error instead of recursing further.
///
/// # Cadence example
///
/// ```text
/// let x: [[[[[[Int]]]]]] = [[[[[[1]]]]]]
/// ```
pub const MAX_NESTING_DEPTH: u32 = 64;

// =============================================================================
// Capacity Limits
// =============================================================================

/// Maximum size in bytes of a single source file accepted by the CLI.
pub const MAX_SOURCE_SIZE: u64 = 16 * 1024 * 1024;
