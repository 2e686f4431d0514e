/// Expression parsing methods.
///
/// Infix operators are parsed by precedence climbing over the binding powers in the operator registry
/// (`cadence_core::lang::operators`), lowest first:
/// `??` → `||` → `&&` → comparison → additive → multiplicative → prefix (`-`, `!`, `<-`) → postfix → primary.
///
/// ## Notes
/// - `??` is the only right-associative infix operator.
/// - Postfix forms are calls (with optional argument labels), `.member`, `?.member`, `[index]` and force `!`.
/// - Parentheses do not produce a node; they widen the span of the inner expression instead.
impl<'a> Parser<'a> {
    // ========================================================================
    // Expressions
    // ========================================================================

    /// Parse an expression containing only infix operators that bind tighter than `min_bp`.
    ///
    /// Declarations pass [`LOWEST_BINDING_POWER`] to get a complete expression. Each call counts as one nesting
    /// level, so brackets, indexing and argument lists are bounded by the nesting limit.
    fn expression(&mut self, min_bp: u8) -> Result<Spanned<Expr>, ParseError> {
        self.nested(|p| p.binary(min_bp))
    }

    /// Precedence climbing without a nesting charge.
    ///
    /// Operands recurse only into strictly tighter operators, so recursion here is bounded by the number of
    /// precedence levels. A run of right-associative operators is collected in a loop and folded from the right
    /// once the run ends, so `a ?? b ?? ...` of any length costs no extra depth.
    fn binary(&mut self, min_bp: u8) -> Result<Spanned<Expr>, ParseError> {
        let mut left = self.unary()?;
        let mut chain: Vec<(Spanned<Expr>, BinaryOp)> = Vec::new();
        let mut chain_bp: Option<u8> = None;

        loop {
            let Some(id) = self.peek().kind.operator_id() else {
                break;
            };
            if !operators::is_infix(id) {
                break;
            }
            let info = operators::info_for(id);
            if info.precedence <= min_bp {
                break;
            }
            if chain_bp.is_some_and(|bp| bp != info.precedence) {
                left = fold_right(std::mem::take(&mut chain), left);
                chain_bp = None;
            }
            let op_span = self.advance().span;

            let Some(op) = BinaryOp::from_operator(id) else {
                return Err(ParseError::internal(
                    format!("no binary operator for '{}'", info.canonical),
                    op_span,
                ));
            };
            let right = self.binary(info.precedence)?;

            match info.associativity {
                Associativity::Left => {
                    let span = left.span.merge(right.span);
                    left = Spanned::new(Expr::Binary(Box::new(left), op, Box::new(right)), span);
                }
                Associativity::Right => {
                    chain.push((left, op));
                    chain_bp = Some(info.precedence);
                    left = right;
                }
            }
        }

        Ok(fold_right(chain, left))
    }

    fn unary(&mut self) -> Result<Spanned<Expr>, ParseError> {
        let start = self.current_span().start;

        let wrap: fn(Box<Spanned<Expr>>) -> Expr = if self.match_op(OperatorId::Minus) {
            |operand| Expr::Unary(UnaryOp::Negate, operand)
        } else if self.match_op(OperatorId::Bang) {
            |operand| Expr::Unary(UnaryOp::Not, operand)
        } else if self.match_punct(PunctuationId::LeftArrow) {
            Expr::Move
        } else {
            return self.postfix();
        };

        let operand = self.nested(Self::unary)?;
        let span = Span::new(start, operand.span.end);
        Ok(Spanned::new(wrap(Box::new(operand)), span))
    }

    fn postfix(&mut self) -> Result<Spanned<Expr>, ParseError> {
        let mut expr = self.primary()?;

        loop {
            let start = expr.span.start;

            if self.check_punct(PunctuationId::LParen) {
                let arguments = self.arguments()?;
                let span = Span::new(start, self.previous_end());
                expr = Spanned::new(
                    Expr::Call {
                        callee: Box::new(expr),
                        arguments,
                    },
                    span,
                );
            } else if self.check_punct(PunctuationId::Dot) || self.check_punct(PunctuationId::QuestionDot) {
                let optional = self.advance().kind.is_punctuation(PunctuationId::QuestionDot);
                let name = self.identifier_spanned("member name")?;
                let span = Span::new(start, name.span.end);
                expr = Spanned::new(
                    Expr::Member {
                        expr: Box::new(expr),
                        optional,
                        name,
                    },
                    span,
                );
            } else if self.match_punct(PunctuationId::LBracket) {
                let index = self.expression(LOWEST_BINDING_POWER)?;
                let end = self.expect_punct(PunctuationId::RBracket)?.span.end;
                expr = Spanned::new(
                    Expr::Index {
                        expr: Box::new(expr),
                        index: Box::new(index),
                    },
                    Span::new(start, end),
                );
            } else if self.match_op(OperatorId::Bang) {
                let span = Span::new(start, self.previous_end());
                expr = Spanned::new(Expr::Force(Box::new(expr)), span);
            } else {
                break;
            }
        }

        Ok(expr)
    }

    /// `'(' (argument (',' argument)*)? ')'` where `argument = (label ':')? expression`
    fn arguments(&mut self) -> Result<Vec<Argument>, ParseError> {
        self.expect_punct(PunctuationId::LParen)?;

        let mut arguments = Vec::new();
        if !self.check_punct(PunctuationId::RParen) {
            loop {
                let label = if matches!(self.peek().kind, TokenKind::Identifier(_))
                    && self.peek_next().kind.is_punctuation(PunctuationId::Colon)
                {
                    let label = self.identifier_spanned("argument label")?;
                    self.advance();
                    Some(label)
                } else {
                    None
                };
                let value = self.expression(LOWEST_BINDING_POWER)?;
                arguments.push(Argument { label, value });

                if !self.match_punct(PunctuationId::Comma) {
                    break;
                }
            }
        }

        self.expect_punct(PunctuationId::RParen)?;
        Ok(arguments)
    }

    fn primary(&mut self) -> Result<Spanned<Expr>, ParseError> {
        let token = self.peek();

        match &token.kind {
            kind if kind.is_integer_literal() => {
                let literal = self.integer_literal()?;
                Ok(literal.map(|(value, base)| Expr::Integer { value, base }))
            }
            TokenKind::String(raw) => {
                self.advance();
                let text = self.decode_string(raw, token.span);
                Ok(Spanned::new(Expr::String(text), token.span))
            }
            TokenKind::Identifier(name) => {
                let expr = match keywords::from_str(name) {
                    Some(KeywordId::Create) => return self.create_expression(),
                    Some(KeywordId::True) => Expr::Bool(true),
                    Some(KeywordId::False) => Expr::Bool(false),
                    Some(KeywordId::Nil) => Expr::Nil,
                    _ => Expr::Identifier(name.clone()),
                };
                self.advance();
                Ok(Spanned::new(expr, token.span))
            }
            TokenKind::Punctuation(PunctuationId::LParen) => {
                self.advance();
                let inner = self.expression(LOWEST_BINDING_POWER)?;
                let end = self.expect_punct(PunctuationId::RParen)?.span.end;
                Ok(Spanned::new(inner.node, Span::new(token.span.start, end)))
            }
            TokenKind::Punctuation(PunctuationId::LBracket) => self.array_literal(),
            TokenKind::Punctuation(PunctuationId::LBrace) => self.dictionary_literal(),
            _ => Err(self.unexpected("expression")),
        }
    }

    /// `create` followed by an invocation, e.g. `create R(a: 1)`.
    fn create_expression(&mut self) -> Result<Spanned<Expr>, ParseError> {
        let start = self.advance().span.start;

        let invocation = self.nested(Self::postfix)?;
        if !matches!(invocation.node, Expr::Call { .. }) {
            return Err(ParseError::syntax(
                "expected invocation after 'create'",
                invocation.span,
            ));
        }

        let span = Span::new(start, invocation.span.end);
        Ok(Spanned::new(Expr::Create(Box::new(invocation)), span))
    }

    /// `'[' (expression (',' expression)*)? ']'`
    fn array_literal(&mut self) -> Result<Spanned<Expr>, ParseError> {
        let start = self.expect_punct(PunctuationId::LBracket)?.span.start;

        let mut elements = Vec::new();
        if !self.check_punct(PunctuationId::RBracket) {
            loop {
                elements.push(self.expression(LOWEST_BINDING_POWER)?);
                if !self.match_punct(PunctuationId::Comma) {
                    break;
                }
            }
        }

        let end = self.expect_punct(PunctuationId::RBracket)?.span.end;
        Ok(Spanned::new(Expr::Array(elements), Span::new(start, end)))
    }

    /// `'{' (expression ':' expression (',' ...)*)? '}'`
    fn dictionary_literal(&mut self) -> Result<Spanned<Expr>, ParseError> {
        let start = self.expect_punct(PunctuationId::LBrace)?.span.start;

        let mut entries = Vec::new();
        if !self.check_punct(PunctuationId::RBrace) {
            loop {
                let key = self.expression(LOWEST_BINDING_POWER)?;
                self.expect_punct(PunctuationId::Colon)?;
                let value = self.expression(LOWEST_BINDING_POWER)?;
                entries.push(DictionaryEntry { key, value });
                if !self.match_punct(PunctuationId::Comma) {
                    break;
                }
            }
        }

        let end = self.expect_punct(PunctuationId::RBrace)?.span.end;
        Ok(Spanned::new(Expr::Dictionary(entries), Span::new(start, end)))
    }
}

/// Fold `a op b op ... last` into `a op (b op (... last))`.
fn fold_right(chain: Vec<(Spanned<Expr>, BinaryOp)>, last: Spanned<Expr>) -> Spanned<Expr> {
    chain.into_iter().rev().fold(last, |right, (left, op)| {
        let span = left.span.merge(right.span);
        Spanned::new(Expr::Binary(Box::new(left), op, Box::new(right)), span)
    })
}
