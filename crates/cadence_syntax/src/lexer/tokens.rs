//! Token types for the Cadence lexer.
//!
//! Vocabulary tokens carry **registry-backed IDs**:
//! - `Operator(OperatorId)` for operators
//! - `Punctuation(PunctuationId)` for punctuation, including the transfer arrows
//!
//! ## Notes
//! - Keywords are not a separate token kind. They are lexed as `Identifier` and resolved against the keyword
//!   registry at the point of use, so a grammar layer that does not know a keyword still sees a plain identifier.
//! - Literal tokens keep their raw source text; decoding happens in the parser.

use std::fmt;

use crate::ast::Span;
use cadence_core::lang::keywords::{self, KeywordId};
use cadence_core::lang::operators::{self, OperatorId};
use cadence_core::lang::punctuation::{self, PunctuationId};

// ============================================================================
// TOKEN TYPES
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    // ========== Operator / punctuation (ID-based) ==========
    Operator(OperatorId),
    Punctuation(PunctuationId),

    // ========== Identifiers and Literals ==========
    Identifier(String),
    /// Raw literal text, quotes and escapes included.
    String(String),
    DecimalLiteral(String),
    /// Raw text, `0x` prefix and `_` separators included.
    HexadecimalLiteral(String),
    BinaryLiteral(String),
    OctalLiteral(String),

    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Operator(id) => write!(f, "'{}'", operators::as_str(*id)),
            TokenKind::Punctuation(id) => write!(f, "'{}'", punctuation::as_str(*id)),
            TokenKind::Identifier(name) if keyword_id(name).is_some() => write!(f, "keyword {name:?}"),
            TokenKind::Identifier(name) => write!(f, "identifier {name:?}"),
            TokenKind::String(_) => write!(f, "string literal"),
            TokenKind::DecimalLiteral(_) => write!(f, "decimal literal"),
            TokenKind::HexadecimalLiteral(_) => write!(f, "hexadecimal literal"),
            TokenKind::BinaryLiteral(_) => write!(f, "binary literal"),
            TokenKind::OctalLiteral(_) => write!(f, "octal literal"),
            TokenKind::Eof => write!(f, "end of input"),
        }
    }
}

/// A token with its kind and source span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// Resolve an identifier spelling to a keyword id, if reserved.
pub fn keyword_id(name: &str) -> Option<KeywordId> {
    keywords::from_str(name)
}
