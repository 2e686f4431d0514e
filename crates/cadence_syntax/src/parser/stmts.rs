/// Statement parsing methods.
///
/// Function bodies are blocks of statements. Declarations inside a block go through the same dispatcher as
/// top-level ones, with `}` as the end token; whatever the dispatcher declines is parsed as a statement here.
impl<'a> Parser<'a> {
    // ========================================================================
    // Statements
    // ========================================================================

    /// `'{' (declaration | statement)* '}'`
    fn block(&mut self) -> Result<Spanned<Block>, ParseError> {
        self.nested(|p| {
            let start = p.expect_punct(PunctuationId::LBrace)?.span.start;
            let mut statements = Vec::new();

            loop {
                for declaration in p.parse_declarations(Some(PunctuationId::RBrace))? {
                    statements.push(declaration.map(Statement::Declaration));
                }
                if p.is_at_end() || p.check_punct(PunctuationId::RBrace) {
                    break;
                }
                statements.push(p.statement()?);
            }

            let end = p.expect_punct(PunctuationId::RBrace)?.span.end;
            Ok(Spanned::new(Block { statements }, Span::new(start, end)))
        })
    }

    fn statement(&mut self) -> Result<Spanned<Statement>, ParseError> {
        if self.check_keyword(KeywordId::Return) {
            return self.return_statement();
        }

        let expr = self.expression(LOWEST_BINDING_POWER)?;

        if self.match_punct(PunctuationId::Swap) {
            let right = self.expression(LOWEST_BINDING_POWER)?;
            let span = expr.span.merge(right.span);
            return Ok(Spanned::new(Statement::Swap { left: expr, right }, span));
        }

        if let Some(transfer) = self.transfer() {
            let value = self.expression(LOWEST_BINDING_POWER)?;
            let span = expr.span.merge(value.span);
            return Ok(Spanned::new(
                Statement::Assignment {
                    target: expr,
                    transfer,
                    value,
                },
                span,
            ));
        }

        let span = expr.span;
        Ok(Spanned::new(Statement::Expression(expr), span))
    }

    /// `return expression?`
    fn return_statement(&mut self) -> Result<Spanned<Statement>, ParseError> {
        let keyword = self.advance();

        let value = if self.is_at_expr_start() {
            Some(self.expression(LOWEST_BINDING_POWER)?)
        } else {
            None
        };
        let end = value.as_ref().map_or(keyword.span.end, |v| v.span.end);

        Ok(Spanned::new(Statement::Return(value), Span::new(keyword.span.start, end)))
    }
}
