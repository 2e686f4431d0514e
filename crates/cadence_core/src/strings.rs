//! Decode string literals.
//!
//! The lexer hands the parser the raw literal text (quotes and escape sequences included). Decoding it is a pure,
//! best-effort operation: malformed input never aborts, it yields the text that could be decoded plus a list of
//! [`StringLiteralError`]s for the caller to report.
//!
//! ## Notes
//! - Supported escapes: `\0`, `\n`, `\r`, `\t`, `\"`, `\'`, `\\` and `\u{X}` with 1 to 8 hex digits.
//! - Offsets in errors are byte offsets into the raw literal, opening quote included.
//!
//! ## Examples
//! ```rust
//! use cadence_core::strings::parse_string_literal;
//!
//! let (text, errors) = parse_string_literal(r#""a\tb\u{1F600}""#);
//! assert_eq!(text, "a\tb\u{1F600}");
//! assert!(errors.is_empty());
//! ```

use thiserror::Error;

/// A recoverable problem found while decoding a string literal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StringLiteralError {
    #[error("missing start quote in string literal")]
    MissingStartQuote,

    #[error("missing end quote in string literal")]
    MissingEndQuote,

    #[error("incomplete escape sequence at offset {offset}")]
    IncompleteEscape { offset: usize },

    #[error("invalid escape character {found:?} at offset {offset}")]
    InvalidEscapeCharacter { offset: usize, found: char },

    #[error("invalid unicode escape sequence at offset {offset}: {reason}")]
    InvalidUnicodeEscape { offset: usize, reason: &'static str },
}

/// Maximum number of hex digits in a `\u{...}` escape.
const MAX_UNICODE_ESCAPE_DIGITS: usize = 8;

/// Decode a raw string literal.
///
/// ## Parameters
/// - `literal`: The literal as written in source, including the surrounding double quotes.
///
/// ## Returns
/// - `(String, Vec<StringLiteralError>)`: the decoded text and every problem found. The text is always produced,
///   invalid escapes are dropped from it.
pub fn parse_string_literal(literal: &str) -> (String, Vec<StringLiteralError>) {
    let mut errors = Vec::new();

    let mut body = literal;
    let mut body_offset = 0;

    match body.strip_prefix('"') {
        Some(rest) => {
            body = rest;
            body_offset = 1;
        }
        None => errors.push(StringLiteralError::MissingStartQuote),
    }

    match body.strip_suffix('"') {
        Some(rest) if !ends_with_escaped_quote(body) => body = rest,
        _ => errors.push(StringLiteralError::MissingEndQuote),
    }

    let mut decoded = String::with_capacity(body.len());
    let mut chars = body.char_indices().peekable();

    while let Some((index, c)) = chars.next() {
        if c != '\\' {
            decoded.push(c);
            continue;
        }

        let offset = body_offset + index;
        let Some((_, escaped)) = chars.next() else {
            errors.push(StringLiteralError::IncompleteEscape { offset });
            break;
        };

        match escaped {
            '0' => decoded.push('\0'),
            'n' => decoded.push('\n'),
            'r' => decoded.push('\r'),
            't' => decoded.push('\t'),
            '"' => decoded.push('"'),
            '\'' => decoded.push('\''),
            '\\' => decoded.push('\\'),
            'u' => match decode_unicode_escape(&mut chars) {
                Ok(c) => decoded.push(c),
                Err(reason) => errors.push(StringLiteralError::InvalidUnicodeEscape { offset, reason }),
            },
            found => errors.push(StringLiteralError::InvalidEscapeCharacter { offset, found }),
        }
    }

    (decoded, errors)
}

/// Decode the `{X...}` part of a `\u{X...}` escape.
fn decode_unicode_escape(
    chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>,
) -> Result<char, &'static str> {
    if chars.next_if(|&(_, c)| c == '{').is_none() {
        return Err("expected '{'");
    }

    let mut digits = String::new();
    loop {
        match chars.next() {
            Some((_, '}')) => break,
            Some((_, c)) if c.is_ascii_hexdigit() => digits.push(c),
            Some(_) => return Err("expected hexadecimal digit or '}'"),
            None => return Err("missing '}'"),
        }
    }

    if digits.is_empty() || digits.len() > MAX_UNICODE_ESCAPE_DIGITS {
        return Err("expected between 1 and 8 hexadecimal digits");
    }

    u32::from_str_radix(&digits, 16)
        .ok()
        .and_then(char::from_u32)
        .ok_or("not a valid unicode scalar value")
}

/// Return `true` if the trailing quote of `body` is itself escaped (odd number of preceding backslashes).
fn ends_with_escaped_quote(body: &str) -> bool {
    let Some(without_quote) = body.strip_suffix('"') else {
        return false;
    };
    let backslashes = without_quote.chars().rev().take_while(|&c| c == '\\').count();
    backslashes % 2 == 1
}
