//! Parse errors and non-fatal diagnostics.
//!
//! Parsing is fail-fast: the first [`ParseError`] aborts the parse and is returned to the caller. Problems that do
//! not invalidate the tree (malformed escapes inside string literals) are collected as [`SoftDiagnostic`]s instead.
//!
//! Both types implement [`miette::Diagnostic`], so the CLI can render them against the source with labels.

use cadence_core::strings::StringLiteralError;
use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

use crate::ast::Span;

impl From<Span> for SourceSpan {
    fn from(span: Span) -> Self {
        SourceSpan::new(span.start.offset.into(), span.len())
    }
}

/// A fatal error raised while lexing or parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum ParseError {
    /// The input does not match the grammar.
    #[error("{message}")]
    #[diagnostic(code(cadence::syntax))]
    Syntax {
        message: String,
        #[label("here")]
        span: Span,
    },

    /// The parser reached a state its own control flow should rule out.
    #[error("internal parser error: {message}")]
    #[diagnostic(
        code(cadence::internal),
        help("this is a bug in the Cadence parser, not in the program being parsed")
    )]
    Internal {
        message: String,
        #[label]
        span: Span,
    },
}

impl ParseError {
    pub fn syntax(message: impl Into<String>, span: Span) -> Self {
        ParseError::Syntax {
            message: message.into(),
            span,
        }
    }

    pub fn internal(message: impl Into<String>, span: Span) -> Self {
        ParseError::Internal {
            message: message.into(),
            span,
        }
    }

    /// The message without the `internal parser error:` prefix.
    pub fn message(&self) -> &str {
        match self {
            ParseError::Syntax { message, .. } | ParseError::Internal { message, .. } => message,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            ParseError::Syntax { span, .. } | ParseError::Internal { span, .. } => *span,
        }
    }

    pub fn is_internal(&self) -> bool {
        matches!(self, ParseError::Internal { .. })
    }
}

/// A recoverable problem in a string literal, reported alongside a successful parse.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("{error}")]
#[diagnostic(code(cadence::string_literal), severity(Warning))]
pub struct SoftDiagnostic {
    pub error: StringLiteralError,
    /// Range of the whole literal token.
    #[label("in this string literal")]
    pub span: Span,
}
