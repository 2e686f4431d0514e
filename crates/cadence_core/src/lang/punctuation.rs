//! Punctuation vocabulary.
//!
//! This module defines the canonical set of non-operator punctuation tokens used by the lexer/parser: delimiters,
//! separators, member-access markers, and the resource transfer arrows.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**.
//! - This module is vocabulary only (spellings + metadata). It does not tokenize source text.
//!
//! ## Examples
//! ```rust
//! use cadence_core::lang::punctuation::{self, PunctuationId};
//!
//! assert_eq!(punctuation::from_str("<-!"), Some(PunctuationId::LeftArrowExclamation));
//! assert_eq!(punctuation::as_str(PunctuationId::LeftArrow), "<-");
//! ```

/// Broad syntactic grouping for punctuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PunctuationCategory {
    /// Brackets and braces.
    Delimiter,
    /// Separators like `,`, `:` and `;`.
    Separator,
    /// Member access markers like `.` and `?.`.
    Access,
    /// Type markers like `?`, `@` and `&`.
    Marker,
    /// Resource transfer symbols: `=`, `<-`, `<-!`, `<->`.
    Transfer,
}

/// Stable identifier for punctuation tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PunctuationId {
    // Delimiters
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,

    // Separators
    Comma,
    Colon,
    Semicolon,

    // Access
    Dot,
    QuestionDot,

    // Markers
    Question,
    At,
    Ampersand,

    // Transfers
    Equal,
    LeftArrow,
    LeftArrowExclamation,
    Swap,
}

/// Metadata for a punctuation token.
#[derive(Debug, Clone, Copy)]
pub struct PunctuationInfo {
    pub id: PunctuationId,
    pub canonical: &'static str,
    pub category: PunctuationCategory,
}

/// Registry of all punctuation tokens.
pub const PUNCTUATION: &[PunctuationInfo] = &[
    // Delimiters
    info(PunctuationId::LParen, "(", PunctuationCategory::Delimiter),
    info(PunctuationId::RParen, ")", PunctuationCategory::Delimiter),
    info(PunctuationId::LBracket, "[", PunctuationCategory::Delimiter),
    info(PunctuationId::RBracket, "]", PunctuationCategory::Delimiter),
    info(PunctuationId::LBrace, "{", PunctuationCategory::Delimiter),
    info(PunctuationId::RBrace, "}", PunctuationCategory::Delimiter),
    // Separators
    info(PunctuationId::Comma, ",", PunctuationCategory::Separator),
    info(PunctuationId::Colon, ":", PunctuationCategory::Separator),
    info(PunctuationId::Semicolon, ";", PunctuationCategory::Separator),
    // Access
    info(PunctuationId::Dot, ".", PunctuationCategory::Access),
    info(PunctuationId::QuestionDot, "?.", PunctuationCategory::Access),
    // Markers
    info(PunctuationId::Question, "?", PunctuationCategory::Marker),
    info(PunctuationId::At, "@", PunctuationCategory::Marker),
    info(PunctuationId::Ampersand, "&", PunctuationCategory::Marker),
    // Transfers
    info(PunctuationId::Equal, "=", PunctuationCategory::Transfer),
    info(PunctuationId::LeftArrow, "<-", PunctuationCategory::Transfer),
    info(PunctuationId::LeftArrowExclamation, "<-!", PunctuationCategory::Transfer),
    info(PunctuationId::Swap, "<->", PunctuationCategory::Transfer),
];

/// Canonical spelling.
pub fn as_str(id: PunctuationId) -> &'static str {
    info_for(id).canonical
}

/// Category.
pub fn category(id: PunctuationId) -> PunctuationCategory {
    info_for(id).category
}

/// Full metadata.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: PunctuationId) -> &'static PunctuationInfo {
    PUNCTUATION
        .iter()
        .find(|p| p.id == id)
        .expect("punctuation info missing")
}

/// Lookup by spelling.
pub fn from_str(s: &str) -> Option<PunctuationId> {
    PUNCTUATION.iter().find(|p| p.canonical == s).map(|p| p.id)
}

const fn info(id: PunctuationId, canonical: &'static str, category: PunctuationCategory) -> PunctuationInfo {
    PunctuationInfo { id, canonical, category }
}
