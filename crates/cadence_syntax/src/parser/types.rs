/// Type-expression parsing methods.
///
/// This chunk parses type annotations:
/// - Nominal types, optionally nested (`Int`, `A.B`)
/// - Optionals (`T?`, `T??`)
/// - Arrays (`[T]`, `[T; 3]`) and dictionaries (`{K: V}`)
/// - References (`&T`) and the resource marker (`@T`)
///
/// ## Notes
/// - Parsing is purely syntactic; whether a type exists is decided by later phases.
impl<'a> Parser<'a> {
    // ========================================================================
    // Types
    // ========================================================================

    /// `'@'? type`
    fn type_annotation(&mut self) -> Result<Spanned<TypeAnnotation>, ParseError> {
        let start = self.current_span().start;
        let is_resource = self.match_punct(PunctuationId::At);
        let ty = self.type_expr()?;
        let span = Span::new(start, ty.span.end);
        Ok(Spanned::new(TypeAnnotation { is_resource, ty }, span))
    }

    fn type_expr(&mut self) -> Result<Spanned<Type>, ParseError> {
        self.nested(|p| {
            let mut ty = p.primary_type()?;

            loop {
                if p.match_punct(PunctuationId::Question) {
                    ty = optional_type(ty, p.previous_end());
                } else if p.match_op(OperatorId::NilCoalescing) {
                    // `??` is lexed as a single operator; split it back into two optional markers.
                    let token = p.previous();
                    let first_end = Position::new(
                        token.span.start.offset + 1,
                        token.span.start.line,
                        token.span.start.column + 1,
                    );
                    ty = optional_type(optional_type(ty, first_end), token.span.end);
                } else {
                    break;
                }
            }

            Ok(ty)
        })
    }

    fn primary_type(&mut self) -> Result<Spanned<Type>, ParseError> {
        let start = self.current_span().start;

        if self.match_punct(PunctuationId::Ampersand) {
            let referenced = self.type_expr()?;
            let span = Span::new(start, referenced.span.end);
            return Ok(Spanned::new(Type::Reference(Box::new(referenced)), span));
        }

        if self.match_punct(PunctuationId::LBracket) {
            let element = Box::new(self.type_expr()?);
            let ty = if self.match_punct(PunctuationId::Semicolon) {
                let size = self.constant_array_size()?;
                Type::ConstantSized { ty: element, size }
            } else {
                Type::VariableSized(element)
            };
            let end = self.expect_punct(PunctuationId::RBracket)?.span.end;
            return Ok(Spanned::new(ty, Span::new(start, end)));
        }

        if self.match_punct(PunctuationId::LBrace) {
            let key = Box::new(self.type_expr()?);
            self.expect_punct(PunctuationId::Colon)?;
            let value = Box::new(self.type_expr()?);
            let end = self.expect_punct(PunctuationId::RBrace)?.span.end;
            return Ok(Spanned::new(Type::Dictionary { key, value }, Span::new(start, end)));
        }

        let identifier = self.identifier_spanned("type")?;
        let mut end = identifier.span.end;
        let mut nested = Vec::new();
        while self.match_punct(PunctuationId::Dot) {
            let name = self.identifier_spanned("nested type name")?;
            end = name.span.end;
            nested.push(name.node);
        }

        Ok(Spanned::new(
            Type::Nominal {
                identifier: identifier.node,
                nested,
            },
            Span::new(start, end),
        ))
    }

    /// The `N` in `[T; N]`.
    fn constant_array_size(&mut self) -> Result<u64, ParseError> {
        if !self.peek().kind.is_integer_literal() {
            return Err(self.unexpected("integer array size"));
        }
        let literal = self.integer_literal()?;
        u64::try_from(literal.node.0)
            .map_err(|_| ParseError::syntax("array size is too large", literal.span))
    }
}

fn optional_type(inner: Spanned<Type>, end: Position) -> Spanned<Type> {
    let span = Span::new(inner.span.start, end);
    Spanned::new(Type::Optional(Box::new(inner)), span)
}
