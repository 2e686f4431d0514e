//! Shareable metadata for `cadence_core::lang` registries.
//!
//! The `cadence_core::lang` module is a set of **registry-first** vocabularies: keywords, operators and
//! punctuation. This submodule provides the small, dependency-free metadata types reused across them.
//!
//! ## Notes
//! - These types are `Copy` so registries can live in `const` tables.
//! - Metadata is meant for tooling/docs/diagnostics; enforcement of syntax rules lives in the lexer/parser.

/// Describe the lifecycle status of a language vocabulary item.
///
/// ## Notes
/// - This is intended for docs/tooling (e.g. to warn on legacy spellings), not for feature-gating by itself.
///
/// ## Examples
/// ```rust
/// use cadence_core::lang::registry::Stability;
///
/// let s = Stability::Stable;
/// assert_eq!(format!("{s:?}"), "Stable");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stability {
    Stable,
    /// Still accepted, but superseded by a newer spelling (e.g. `pub` by `access(all)`).
    Legacy,
}

/// Represent a small example snippet for documentation.
///
/// ## Notes
/// - `code` is the example body, in Cadence syntax.
/// - `note` is an optional short explanation.
#[derive(Debug, Clone, Copy)]
pub struct Example {
    pub code: &'static str,
    pub note: Option<&'static str>,
}
