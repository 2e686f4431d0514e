/// Miscellaneous parser utilities.
///
/// This chunk contains small shared parsing helpers that don’t cleanly fit into
/// “decl”, “stmt”, “expr”, or “types” (identifier parsing and literal decoding).
impl<'a> Parser<'a> {
    // ========================================================================
    // Utilities
    // ========================================================================

    /// Consume an identifier, or fail with `expected <expected>, got <token>`.
    ///
    /// Keyword spellings are accepted: keywords are identifiers to every grammar that does not reserve them.
    fn identifier_spanned(&mut self, expected: &str) -> Result<Spanned<Ident>, ParseError> {
        match &self.peek().kind {
            TokenKind::Identifier(name) => {
                let span = self.advance().span;
                Ok(Spanned::new(name.clone(), span))
            }
            _ => Err(self.unexpected(expected)),
        }
    }

    /// Decode a raw string literal, recording any problems as soft diagnostics spanning the token.
    fn decode_string(&mut self, raw: &str, span: Span) -> String {
        let (text, errors) = parse_string_literal(raw);
        self.diagnostics
            .extend(errors.into_iter().map(|error| SoftDiagnostic { error, span }));
        text
    }

    /// Consume an integer literal token of any base.
    fn integer_literal(&mut self) -> Result<Spanned<(u128, NumberBase)>, ParseError> {
        let token = self.advance();

        let Some((raw, base)) = integer_parts(&token.kind) else {
            return Err(ParseError::internal(
                format!("integer literal grammar entered on {}", token.kind),
                token.span,
            ));
        };

        match parse_integer(raw, base) {
            Some(value) => Ok(Spanned::new((value, base), token.span)),
            None => Err(ParseError::syntax(format!("invalid integer literal {raw}"), token.span)),
        }
    }
}

/// Raw text and base of an integer literal token.
fn integer_parts(kind: &TokenKind) -> Option<(&str, NumberBase)> {
    match kind {
        TokenKind::DecimalLiteral(raw) => Some((raw.as_str(), NumberBase::Decimal)),
        TokenKind::HexadecimalLiteral(raw) => Some((raw.as_str(), NumberBase::Hexadecimal)),
        TokenKind::BinaryLiteral(raw) => Some((raw.as_str(), NumberBase::Binary)),
        TokenKind::OctalLiteral(raw) => Some((raw.as_str(), NumberBase::Octal)),
        _ => None,
    }
}

/// Value of an integer literal; `None` if it is malformed or does not fit in a `u128`.
fn parse_integer(raw: &str, base: NumberBase) -> Option<u128> {
    let digits = match base {
        NumberBase::Decimal => raw,
        _ => raw.get(2..)?,
    };
    let digits: String = digits.chars().filter(|&c| c != '_').collect();
    u128::from_str_radix(&digits, base.radix()).ok()
}
