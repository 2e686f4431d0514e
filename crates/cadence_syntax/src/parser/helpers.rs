/// Token-stream helpers.
///
/// This chunk contains the low-level primitives used throughout parsing:
/// - Peeking/consuming tokens (`peek`, `advance`)
/// - Matching / expecting keywords, operators, and punctuation
/// - Error construction (`unexpected`) and the nesting guard (`nested`)
///
/// Most functions in this file are internal (`fn`) and are documented primarily
/// to aid maintenance and onboarding.
impl<'a> Parser<'a> {
    // ========================================================================
    // Helpers
    // ========================================================================

    /// Return `true` if the current token is [`TokenKind::Eof`].
    fn is_at_end(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Eof)
    }

    /// Return the current token without consuming it.
    ///
    /// Past the end of the stream this keeps returning the final token (normally `Eof`).
    pub fn peek(&self) -> &'a Token {
        let tokens = self.tokens;
        tokens.get(self.pos).or_else(|| tokens.last()).unwrap_or(&EOF_TOKEN)
    }

    /// Return the token after the current token without consuming it.
    fn peek_next(&self) -> &'a Token {
        let tokens = self.tokens;
        tokens.get(self.pos + 1).or_else(|| tokens.last()).unwrap_or(&EOF_TOKEN)
    }

    /// Advance to the next token and return the token we just consumed.
    fn advance(&mut self) -> &'a Token {
        let token = self.peek();
        if !self.is_at_end() {
            self.pos += 1;
        }
        token
    }

    /// Return the most recently consumed token.
    fn previous(&self) -> &'a Token {
        let tokens = self.tokens;
        self.pos.checked_sub(1).and_then(|i| tokens.get(i)).unwrap_or(&EOF_TOKEN)
    }

    fn current_span(&self) -> Span {
        self.peek().span
    }

    /// End position of the most recently consumed token.
    fn previous_end(&self) -> Position {
        self.previous().span.end
    }

    /// Keyword spelled by the current token, if it is an identifier naming one.
    fn current_keyword(&self) -> Option<KeywordId> {
        self.peek().kind.keyword_id()
    }

    fn check_keyword(&self, id: KeywordId) -> bool {
        self.peek().kind.is_keyword(id)
    }

    fn check_punct(&self, id: PunctuationId) -> bool {
        self.peek().kind.is_punctuation(id)
    }

    fn check_op(&self, id: OperatorId) -> bool {
        self.peek().kind.is_operator(id)
    }

    fn match_keyword(&mut self, id: KeywordId) -> bool {
        if self.check_keyword(id) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn match_punct(&mut self, id: PunctuationId) -> bool {
        if self.check_punct(id) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn match_op(&mut self, id: OperatorId) -> bool {
        if self.check_op(id) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume the given punctuation or fail with `expected '<p>', got <token>`.
    fn expect_punct(&mut self, id: PunctuationId) -> Result<&'a Token, ParseError> {
        if self.check_punct(id) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(&format!("'{}'", cadence_core::lang::punctuation::as_str(id))))
        }
    }

    /// Build `expected <expected>, got <current token>` at the current token.
    fn unexpected(&self, expected: &str) -> ParseError {
        ParseError::syntax(
            format!("expected {}, got {}", expected, self.peek().kind),
            self.current_span(),
        )
    }

    /// Run `f` one nesting level deeper, failing once [`MAX_NESTING_DEPTH`] is exceeded.
    fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T, ParseError>) -> Result<T, ParseError> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(ParseError::syntax(
                format!("nesting too deep: more than {MAX_NESTING_DEPTH} levels"),
                self.current_span(),
            ));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    /// Check if the current token can start an expression.
    fn is_at_expr_start(&self) -> bool {
        match &self.peek().kind {
            TokenKind::Identifier(name) => !matches!(
                keywords::from_str(name),
                Some(
                    KeywordId::Let
                        | KeywordId::Var
                        | KeywordId::Fun
                        | KeywordId::Event
                        | KeywordId::Import
                        | KeywordId::Priv
                        | KeywordId::Pub
                        | KeywordId::Access
                        | KeywordId::Return
                )
            ),
            TokenKind::String(_)
            | TokenKind::DecimalLiteral(_)
            | TokenKind::HexadecimalLiteral(_)
            | TokenKind::BinaryLiteral(_)
            | TokenKind::OctalLiteral(_) => true,
            TokenKind::Punctuation(p) => matches!(
                p,
                PunctuationId::LParen | PunctuationId::LBracket | PunctuationId::LBrace | PunctuationId::LeftArrow
            ),
            TokenKind::Operator(o) => matches!(o, OperatorId::Minus | OperatorId::Bang),
            TokenKind::Eof => false,
        }
    }
}
