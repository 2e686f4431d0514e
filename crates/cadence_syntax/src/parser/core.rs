/// Parser core types and entrypoint.
///
/// This chunk defines the [`Parser`] type and its top-level `parse()` entrypoint.
///
/// ## Notes
/// - This file is `include!`'d into `crate::parser` to keep all parser methods in a
///   single module while avoiding a single “god file”.

/// Fallback returned by `peek()` past the end of a stream that lacks its `Eof` token.
static EOF_TOKEN: Token = Token::new(TokenKind::Eof, Span::point(Position::new(0, 1, 0)));

/// Parser state.
///
/// ## Notes
/// - The parser is single-pass and fail-fast: the first [`ParseError`] aborts the parse.
/// - Non-fatal problems (malformed string escapes) are collected in `diagnostics` and never abort.
/// - Most parsing helpers are implemented on `Parser` but split across multiple files.
pub struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    /// Current nesting depth of types/expressions/blocks, bounded by [`MAX_NESTING_DEPTH`].
    depth: u32,
    diagnostics: Vec<SoftDiagnostic>,
}

impl<'a> Parser<'a> {
    /// Create a new parser for a token stream.
    ///
    /// ## Parameters
    /// - `tokens`: Token stream produced by `cadence_syntax::lexer`.
    pub fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
            diagnostics: Vec::new(),
        }
    }

    /// Parse the entire token stream into a [`Program`].
    ///
    /// ## Errors
    /// Returns the first fatal [`ParseError`]. No partial declaration list is produced.
    pub fn parse(mut self) -> Result<Program, ParseError> {
        let declarations = self.parse_declarations(None)?;

        // The dispatcher stops on anything it cannot classify. At the top level there is no
        // grammar layer above it to take over, so that token is an error.
        if !self.is_at_end() {
            return Err(ParseError::syntax(
                format!("unexpected token at top level: got {}, expected declaration", self.peek().kind),
                self.current_span(),
            ));
        }

        Ok(Program {
            declarations,
            diagnostics: self.diagnostics,
        })
    }

    /// Soft diagnostics collected so far.
    pub fn diagnostics(&self) -> &[SoftDiagnostic] {
        &self.diagnostics
    }

    /// Consume the parser and return the soft diagnostics it collected.
    pub fn into_diagnostics(self) -> Vec<SoftDiagnostic> {
        self.diagnostics
    }
}
