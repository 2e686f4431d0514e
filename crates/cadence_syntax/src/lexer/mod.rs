//! Lexer for the Cadence programming language
//!
//! Handles tokenization including:
//! - Identifiers (keywords are identifiers; see [`tokens`])
//! - String literals and numeric literals in all four bases
//! - Operators, punctuation and the resource transfer arrows (`<-`, `<-!`, `<->`)
//! - Line comments and nested block comments
//!
//! Whitespace, newlines included, carries no meaning and is skipped.
//!
//! ## Module Structure
//!
//! - `tokens` - Token types (TokenKind, Token)

pub mod tokens;

pub use tokens::{Token, TokenKind, keyword_id};

use crate::ast::{NumberBase, Position, Span};
use crate::diagnostics::ParseError;
use cadence_core::lang::operators::OperatorId;
use cadence_core::lang::punctuation::PunctuationId;

/// Lexer for Cadence source code.
///
/// Tracks byte offset, line and column for every token so spans can be mapped back to source text directly.
pub struct Lexer<'a> {
    source: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    position: Position,
    tokens: Vec<Token>,
    errors: Vec<ParseError>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source code.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            position: Position::new(0, 1, 0),
            tokens: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Tokenize the entire source code.
    ///
    /// Returns a vector of tokens on success, or every lexing error on failure.
    /// The token stream always ends with exactly one `Eof` token.
    pub fn tokenize(mut self) -> Result<Vec<Token>, Vec<ParseError>> {
        while !self.is_at_end() {
            self.scan_token();
        }

        self.tokens
            .push(Token::new(TokenKind::Eof, Span::point(self.position)));

        if self.errors.is_empty() {
            Ok(self.tokens)
        } else {
            Err(self.errors)
        }
    }

    // ========================================================================
    // Core character handling
    // ========================================================================

    fn is_at_end(&mut self) -> bool {
        self.chars.peek().is_none()
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    fn advance(&mut self) -> Option<char> {
        let (offset, c) = self.chars.next()?;
        self.position.offset = offset + c.len_utf8();
        if c == '\n' {
            self.position.line += 1;
            self.position.column = 0;
        } else {
            self.position.column += 1;
        }
        Some(c)
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    // ========================================================================
    // Main scanning dispatch
    // ========================================================================

    fn scan_token(&mut self) {
        let start = self.position;

        let Some(c) = self.advance() else {
            return;
        };

        match c {
            ' ' | '\t' | '\r' | '\n' => {}

            '/' => {
                if self.match_char('/') {
                    self.skip_line_comment();
                } else if self.match_char('*') {
                    self.skip_block_comment(start);
                } else {
                    self.add_op(OperatorId::Slash, start);
                }
            }

            // Operators
            '+' => self.add_op(OperatorId::Plus, start),
            '-' => self.add_op(OperatorId::Minus, start),
            '*' => self.add_op(OperatorId::Star, start),
            '%' => self.add_op(OperatorId::Percent, start),
            '!' => {
                if self.match_char('=') {
                    self.add_op(OperatorId::NotEq, start);
                } else {
                    self.add_op(OperatorId::Bang, start);
                }
            }
            '|' => {
                if self.match_char('|') {
                    self.add_op(OperatorId::OrOr, start);
                } else {
                    self.error("unexpected character '|'", start);
                }
            }
            '>' => {
                if self.match_char('=') {
                    self.add_op(OperatorId::GtEq, start);
                } else {
                    self.add_op(OperatorId::Gt, start);
                }
            }
            '<' => self.scan_less_than(start),

            // Punctuation
            '(' => self.add_punct(PunctuationId::LParen, start),
            ')' => self.add_punct(PunctuationId::RParen, start),
            '[' => self.add_punct(PunctuationId::LBracket, start),
            ']' => self.add_punct(PunctuationId::RBracket, start),
            '{' => self.add_punct(PunctuationId::LBrace, start),
            '}' => self.add_punct(PunctuationId::RBrace, start),
            ',' => self.add_punct(PunctuationId::Comma, start),
            ':' => self.add_punct(PunctuationId::Colon, start),
            ';' => self.add_punct(PunctuationId::Semicolon, start),
            '.' => self.add_punct(PunctuationId::Dot, start),
            '@' => self.add_punct(PunctuationId::At, start),
            '&' => {
                if self.match_char('&') {
                    self.add_op(OperatorId::AndAnd, start);
                } else {
                    self.add_punct(PunctuationId::Ampersand, start);
                }
            }
            '?' => {
                if self.match_char('?') {
                    self.add_op(OperatorId::NilCoalescing, start);
                } else if self.match_char('.') {
                    self.add_punct(PunctuationId::QuestionDot, start);
                } else {
                    self.add_punct(PunctuationId::Question, start);
                }
            }
            '=' => {
                if self.match_char('=') {
                    self.add_op(OperatorId::EqEq, start);
                } else {
                    self.add_punct(PunctuationId::Equal, start);
                }
            }

            '"' => self.scan_string(start),

            '0'..='9' => self.scan_number(start, c),

            _ if is_ident_start(c) => self.scan_identifier(start),

            _ => self.error(format!("unexpected character {c:?}"), start),
        }
    }

    // ========================================================================
    // Token helpers
    // ========================================================================

    fn add_token(&mut self, kind: TokenKind, start: Position) {
        self.tokens.push(Token::new(kind, Span::new(start, self.position)));
    }

    fn add_op(&mut self, id: OperatorId, start: Position) {
        self.add_token(TokenKind::Operator(id), start);
    }

    fn add_punct(&mut self, id: PunctuationId, start: Position) {
        self.add_token(TokenKind::Punctuation(id), start);
    }

    fn error(&mut self, message: impl Into<String>, start: Position) {
        self.errors
            .push(ParseError::syntax(message, Span::new(start, self.position)));
    }

    /// Scan `<`, `<=`, `<-`, `<-!` and `<->`. Arrows are matched greedily.
    fn scan_less_than(&mut self, start: Position) {
        if self.match_char('-') {
            if self.match_char('!') {
                self.add_punct(PunctuationId::LeftArrowExclamation, start);
            } else if self.match_char('>') {
                self.add_punct(PunctuationId::Swap, start);
            } else {
                self.add_punct(PunctuationId::LeftArrow, start);
            }
        } else if self.match_char('=') {
            self.add_op(OperatorId::LtEq, start);
        } else {
            self.add_op(OperatorId::Lt, start);
        }
    }

    // ========================================================================
    // Comments
    // ========================================================================

    fn skip_line_comment(&mut self) {
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            self.advance();
        }
    }

    /// Skip a `/* ... */` comment. Block comments nest.
    fn skip_block_comment(&mut self, start: Position) {
        let mut depth = 1usize;
        while depth > 0 {
            match self.advance() {
                Some('/') if self.match_char('*') => depth += 1,
                Some('*') if self.match_char('/') => depth -= 1,
                Some(_) => {}
                None => {
                    self.error("unterminated block comment", start);
                    return;
                }
            }
        }
    }

    // ========================================================================
    // Literals and identifiers
    // ========================================================================

    /// Scan a string literal, keeping the raw text.
    ///
    /// An unterminated literal stops at the end of the line; the parser's string decoder reports the missing quote
    /// as a soft diagnostic.
    fn scan_string(&mut self, start: Position) {
        loop {
            match self.peek() {
                None | Some('\n') => break,
                Some('"') => {
                    self.advance();
                    break;
                }
                Some('\\') => {
                    self.advance();
                    if self.peek().is_some_and(|c| c != '\n') {
                        self.advance();
                    }
                }
                Some(_) => {
                    self.advance();
                }
            }
        }

        let raw = self.source[start.offset..self.position.offset].to_string();
        self.add_token(TokenKind::String(raw), start);
    }

    fn scan_number(&mut self, start: Position, first: char) {
        let base = if first == '0' {
            match self.peek() {
                Some('x' | 'X') => NumberBase::Hexadecimal,
                Some('b' | 'B') => NumberBase::Binary,
                Some('o' | 'O') => NumberBase::Octal,
                _ => NumberBase::Decimal,
            }
        } else {
            NumberBase::Decimal
        };
        if base != NumberBase::Decimal {
            self.advance();
        }

        // Take trailing alphanumerics too, so `0xZZ` is one invalid literal rather than `0x` + `ZZ`.
        while self.peek().is_some_and(|c| c.is_ascii_alphanumeric() || c == '_') {
            self.advance();
        }

        let source = self.source;
        let raw = &source[start.offset..self.position.offset];
        let digits = if base == NumberBase::Decimal { raw } else { &raw[2..] };
        let has_digit = digits.chars().any(|c| c != '_');
        let valid = digits.chars().all(|c| c == '_' || c.is_digit(base.radix()));

        let (name, kind): (&str, fn(String) -> TokenKind) = match base {
            NumberBase::Decimal => ("decimal", TokenKind::DecimalLiteral),
            NumberBase::Hexadecimal => ("hexadecimal", TokenKind::HexadecimalLiteral),
            NumberBase::Binary => ("binary", TokenKind::BinaryLiteral),
            NumberBase::Octal => ("octal", TokenKind::OctalLiteral),
        };

        if !has_digit {
            self.error(format!("missing digits in {name} literal {raw:?}"), start);
        } else if !valid {
            self.error(format!("invalid {name} literal {raw:?}"), start);
        } else {
            let raw = raw.to_string();
            self.add_token(kind(raw), start);
        }
    }

    fn scan_identifier(&mut self, start: Position) {
        while self.peek().is_some_and(is_ident_continue) {
            self.advance();
        }

        let spelling = self.source[start.offset..self.position.offset].to_string();
        self.add_token(TokenKind::Identifier(spelling), start);
    }
}

// ============================================================================
// Helper functions
// ============================================================================

/// Check if a character can start an identifier (ASCII-only).
fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// Check if a character can continue an identifier (ASCII-only).
fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Convenience function to lex a source string.
///
/// This is a shorthand for `Lexer::new(source).tokenize()`.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn lex(source: &str) -> Result<Vec<Token>, Vec<ParseError>> {
    Lexer::new(source).tokenize()
}

// ============================================================================
// TESTS
// ============================================================================
