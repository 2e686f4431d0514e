/// Expected-set wording for the scope inside `access(...)`.
const ACCESS_SCOPES: &str = r#"keyword "all", "account", "contract", or "self""#;

/// Which token the import identifier list accepts next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ImportListState {
    ExpectIdentifier,
    ExpectCommaOrFrom,
}

impl ImportListState {
    fn expected(self) -> &'static str {
        match self {
            ImportListState::ExpectIdentifier => "identifier",
            ImportListState::ExpectCommaOrFrom => r#"',' or keyword "from""#,
        }
    }
}

/// Declaration parsing methods.
///
/// This chunk holds the declaration dispatcher and the grammars it routes to: access modifiers, variable
/// declarations and their transfer operators, imports, events and functions.
///
/// ## Notes
/// - Every entrypoint returns [`Spanned<T>`]. A declaration's span starts at its access modifier when one was
///   written, otherwise at its keyword.
/// - Errors are fatal and propagate with `?`; there is no recovery.
impl<'a> Parser<'a> {
    // ========================================================================
    // Dispatcher
    // ========================================================================

    /// Parse declarations until `end` (or end of input), skipping `;` separators.
    ///
    /// Stops without consuming anything at the first token that does not start a declaration. The caller decides
    /// whether that token belongs to an enclosing grammar or is an error.
    ///
    /// ## Parameters
    /// - `end`: Punctuation that closes the enclosing construct (e.g. `}`), or `None` at the top level.
    ///
    /// ## Errors
    /// Returns the first [`ParseError`] raised by any declaration grammar.
    pub fn parse_declarations(
        &mut self,
        end: Option<PunctuationId>,
    ) -> Result<Vec<Spanned<Declaration>>, ParseError> {
        let mut declarations = Vec::new();

        loop {
            if self.match_punct(PunctuationId::Semicolon) {
                continue;
            }
            if self.is_at_end() || end.is_some_and(|id| self.check_punct(id)) {
                break;
            }

            let Some(declaration) = self.declaration()? else {
                break;
            };
            tracing::debug!(
                kind = declaration.node.kind_name(),
                offset = declaration.span.start.offset,
                "parsed declaration"
            );
            declarations.push(declaration);
        }

        Ok(declarations)
    }

    /// Parse a single declaration, or return `Ok(None)` if the current token does not start one.
    ///
    /// An access modifier followed by anything other than a declaration keyword also yields `Ok(None)`, with the
    /// position reset to the modifier so the caller sees the whole unclassified construct.
    fn declaration(&mut self) -> Result<Option<Spanned<Declaration>>, ParseError> {
        let checkpoint = self.pos;
        let mut access = Access::NotSpecified;
        let mut access_start: Option<Position> = None;

        loop {
            let declaration = match self.current_keyword() {
                Some(KeywordId::Let | KeywordId::Var) => self
                    .variable_declaration(access, access_start)?
                    .map(Declaration::Variable),
                Some(KeywordId::Fun) => self
                    .function_declaration(access, access_start)?
                    .map(Declaration::Function),
                Some(KeywordId::Event) => self
                    .event_declaration(access, access_start)?
                    .map(Declaration::Composite),
                // Imports have no access control; a written modifier is accepted and dropped.
                Some(KeywordId::Import) => self.import_declaration(access_start)?.map(Declaration::Import),
                Some(KeywordId::Priv | KeywordId::Pub | KeywordId::Access) => {
                    if access_start.is_some() {
                        return Err(ParseError::syntax("unexpected access modifier", self.current_span()));
                    }
                    access_start = Some(self.current_span().start);
                    access = self.access()?;
                    continue;
                }
                _ => {
                    self.pos = checkpoint;
                    return Ok(None);
                }
            };

            return Ok(Some(declaration));
        }
    }

    // ========================================================================
    // Access modifiers
    // ========================================================================

    /// `priv` | `pub` ( `(` `set` `)` )? | `access` `(` ( `all` | `account` | `contract` | `self` ) `)`
    fn access(&mut self) -> Result<Access, ParseError> {
        match self.current_keyword() {
            Some(KeywordId::Priv) => {
                self.advance();
                Ok(Access::Private)
            }
            Some(KeywordId::Pub) => {
                self.advance();
                if !self.match_punct(PunctuationId::LParen) {
                    return Ok(Access::Public);
                }
                if !self.match_keyword(KeywordId::Set) {
                    return Err(self.unexpected(r#"keyword "set""#));
                }
                self.expect_punct(PunctuationId::RParen)?;
                Ok(Access::PublicSettable)
            }
            Some(KeywordId::Access) => {
                self.advance();
                if !self.match_punct(PunctuationId::LParen) {
                    return Err(self.unexpected(&format!("'(' followed by {ACCESS_SCOPES}")));
                }
                let access = match self.current_keyword() {
                    Some(KeywordId::All) => Access::Public,
                    Some(KeywordId::Account) => Access::Account,
                    Some(KeywordId::Contract) => Access::Contract,
                    Some(KeywordId::SelfKw) => Access::Private,
                    _ => return Err(self.unexpected(ACCESS_SCOPES)),
                };
                self.advance();
                self.expect_punct(PunctuationId::RParen)?;
                Ok(access)
            }
            _ => Err(ParseError::internal(
                format!("access modifier grammar entered on {}", self.peek().kind),
                self.current_span(),
            )),
        }
    }

    // ========================================================================
    // Variables
    // ========================================================================

    /// `(let|var) identifier (':' typeAnnotation)? transfer expression (transfer expression)?`
    fn variable_declaration(
        &mut self,
        access: Access,
        access_start: Option<Position>,
    ) -> Result<Spanned<VariableDecl>, ParseError> {
        let keyword = self.advance();
        let is_constant = keyword.kind.is_keyword(KeywordId::Let);
        let start = access_start.unwrap_or(keyword.span.start);

        let identifier = self.identifier_spanned("identifier after start of variable declaration")?;

        let type_annotation = if self.match_punct(PunctuationId::Colon) {
            Some(self.type_annotation()?)
        } else {
            None
        };

        let Some(transfer) = self.transfer() else {
            return Err(self.unexpected("transfer"));
        };
        let value = self.expression(LOWEST_BINDING_POWER)?;

        let second = match self.transfer() {
            Some(transfer) => Some(SecondValue {
                transfer,
                value: self.expression(LOWEST_BINDING_POWER)?,
            }),
            None => None,
        };

        let end = second.as_ref().map_or(value.span.end, |s| s.value.span.end);

        Ok(Spanned::new(
            VariableDecl {
                access,
                is_constant,
                identifier,
                type_annotation,
                transfer,
                value,
                second,
            },
            Span::new(start, end),
        ))
    }

    /// `=` | `<-` | `<-!`. Consumes nothing and returns `None` for any other token.
    fn transfer(&mut self) -> Option<Transfer> {
        let operation = match self.peek().kind.punctuation_id()? {
            PunctuationId::Equal => TransferOperation::Copy,
            PunctuationId::LeftArrow => TransferOperation::Move,
            PunctuationId::LeftArrowExclamation => TransferOperation::MoveForced,
            _ => return None,
        };
        let span = self.advance().span;
        Some(Transfer { operation, span })
    }

    // ========================================================================
    // Imports
    // ========================================================================

    /// `import ( identifier (',' identifier)* 'from' )? ( string | hexadecimalLiteral | identifier )`
    ///
    /// Whether a leading identifier is an imported name or the location itself is only known from the token
    /// after it, so this looks one token ahead instead of backtracking.
    fn import_declaration(&mut self, access_start: Option<Position>) -> Result<Spanned<ImportDecl>, ParseError> {
        let keyword = self.advance();
        let start = access_start.unwrap_or(keyword.span.start);
        let mut identifiers = Vec::new();

        let location = match &self.peek().kind {
            TokenKind::String(_) | TokenKind::HexadecimalLiteral(_) => {
                tracing::trace!("import of a whole location");
                self.string_or_address_location()?
            }
            TokenKind::Identifier(_) => {
                let identifier = self.identifier_spanned("identifier")?;

                if self.check_punct(PunctuationId::Comma) {
                    tracing::trace!("import of an identifier list");
                    identifiers.push(identifier);
                    self.import_identifier_list(&mut identifiers)?;
                    self.import_location()?
                } else if self.match_keyword(KeywordId::From) {
                    tracing::trace!("import of a single identifier");
                    identifiers.push(identifier);
                    self.import_location()?
                } else {
                    match &self.peek().kind {
                        TokenKind::Eof => {
                            tracing::trace!("import of an identifier location");
                            identifier.map(Location::Identifier)
                        }
                        TokenKind::Identifier(_) => {
                            return Err(ParseError::syntax(
                                format!(
                                    r#"unexpected identifier in import declaration: got {}, expected keyword "from""#,
                                    self.peek().kind
                                ),
                                self.current_span(),
                            ));
                        }
                        kind => {
                            return Err(ParseError::syntax(
                                format!(
                                    r#"unexpected token in import declaration: got {kind}, expected keyword "from" or ','"#
                                ),
                                self.current_span(),
                            ));
                        }
                    }
                }
            }
            TokenKind::Eof => {
                return Err(ParseError::syntax(
                    "unexpected end in import declaration: expected string, address, or identifier",
                    self.current_span(),
                ));
            }
            kind => {
                return Err(ParseError::syntax(
                    format!("unexpected token in import declaration: got {kind}, expected string, address, or identifier"),
                    self.current_span(),
                ));
            }
        };

        let span = Span::new(start, location.span.end);
        Ok(Spanned::new(ImportDecl { identifiers, location }, span))
    }

    /// Parse `, b, c from` after the first imported name, consuming the `from`.
    ///
    /// Alternates between expecting an identifier and expecting `,` or `from`; anything out of turn is fatal.
    fn import_identifier_list(&mut self, identifiers: &mut Vec<Spanned<Ident>>) -> Result<(), ParseError> {
        let mut state = ImportListState::ExpectCommaOrFrom;

        loop {
            if self.check_keyword(KeywordId::From) {
                if state == ImportListState::ExpectIdentifier {
                    return Err(self.unexpected(state.expected()));
                }
                self.advance();
                return Ok(());
            }

            match (&self.peek().kind, state) {
                (TokenKind::Punctuation(PunctuationId::Comma), ImportListState::ExpectCommaOrFrom) => {
                    self.advance();
                    state = ImportListState::ExpectIdentifier;
                }
                (TokenKind::Identifier(_), ImportListState::ExpectIdentifier) => {
                    identifiers.push(self.identifier_spanned(state.expected())?);
                    state = ImportListState::ExpectCommaOrFrom;
                }
                (TokenKind::Eof, _) => {
                    return Err(ParseError::syntax(
                        format!("unexpected end in import declaration: expected {}", state.expected()),
                        self.current_span(),
                    ));
                }
                (kind, _) => {
                    return Err(ParseError::syntax(
                        format!(
                            "unexpected token in import declaration: got {kind}, expected {}",
                            state.expected()
                        ),
                        self.current_span(),
                    ));
                }
            }
        }
    }

    /// The location after `from`. Only string and address locations are accepted here.
    fn import_location(&mut self) -> Result<Spanned<Location>, ParseError> {
        match &self.peek().kind {
            TokenKind::String(_) | TokenKind::HexadecimalLiteral(_) => self.string_or_address_location(),
            TokenKind::Eof => Err(ParseError::syntax(
                "unexpected end in import declaration: expected string or address",
                self.current_span(),
            )),
            kind => Err(ParseError::syntax(
                format!("unexpected token in import declaration: got {kind}, expected string or address"),
                self.current_span(),
            )),
        }
    }

    /// Decode the current string or hexadecimal token into a [`Location`] spanning just that token.
    fn string_or_address_location(&mut self) -> Result<Spanned<Location>, ParseError> {
        let token = self.advance();

        let location = match &token.kind {
            TokenKind::String(raw) => Location::String(self.decode_string(raw, token.span)),
            TokenKind::HexadecimalLiteral(raw) => match decode_hexadecimal_location(raw) {
                Some(bytes) => Location::Address(bytes),
                None => {
                    return Err(ParseError::internal(
                        format!("invalid hexadecimal location {raw:?}"),
                        token.span,
                    ));
                }
            },
            kind => {
                return Err(ParseError::internal(
                    format!("location grammar entered on {kind}"),
                    token.span,
                ));
            }
        };

        Ok(Spanned::new(location, token.span))
    }

    // ========================================================================
    // Events
    // ========================================================================

    /// `event identifier parameterList`
    ///
    /// Produces an event composite whose only member is an initializer taking the event's parameters.
    fn event_declaration(
        &mut self,
        access: Access,
        access_start: Option<Position>,
    ) -> Result<Spanned<CompositeDecl>, ParseError> {
        let keyword = self.advance();
        let start = access_start.unwrap_or(keyword.span.start);

        let identifier = self.identifier_spanned("identifier after start of event declaration")?;
        let parameters = self.parameter_list()?;
        let parameters_span = parameters.span;

        let initializer = Spanned::new(
            SpecialFunctionDecl {
                kind: SpecialFunctionKind::Initializer,
                parameters,
                body: None,
            },
            parameters_span,
        );

        Ok(Spanned::new(
            CompositeDecl {
                access,
                kind: CompositeKind::Event,
                identifier,
                members: Members {
                    special_functions: vec![initializer],
                },
            },
            Span::new(start, parameters_span.end),
        ))
    }

    // ========================================================================
    // Functions
    // ========================================================================

    /// `fun identifier parameterList (':' typeAnnotation)? block?`
    fn function_declaration(
        &mut self,
        access: Access,
        access_start: Option<Position>,
    ) -> Result<Spanned<FunctionDecl>, ParseError> {
        let keyword = self.advance();
        let start = access_start.unwrap_or(keyword.span.start);

        let identifier = self.identifier_spanned("identifier after start of function declaration")?;
        let parameters = self.parameter_list()?;

        let return_type = if self.match_punct(PunctuationId::Colon) {
            Some(self.type_annotation()?)
        } else {
            None
        };

        let body = if self.check_punct(PunctuationId::LBrace) {
            Some(self.block()?)
        } else {
            None
        };

        Ok(Spanned::new(
            FunctionDecl {
                access,
                identifier,
                parameters,
                return_type,
                body,
            },
            Span::new(start, self.previous_end()),
        ))
    }

    /// `'(' (parameter (',' parameter)*)? ')'`
    fn parameter_list(&mut self) -> Result<Spanned<ParameterList>, ParseError> {
        let start = self.expect_punct(PunctuationId::LParen)?.span.start;

        let mut parameters = Vec::new();
        if !self.check_punct(PunctuationId::RParen) {
            loop {
                parameters.push(self.parameter()?);
                if !self.match_punct(PunctuationId::Comma) {
                    break;
                }
            }
        }

        let end = self.expect_punct(PunctuationId::RParen)?.span.end;
        Ok(Spanned::new(ParameterList { parameters }, Span::new(start, end)))
    }

    /// `label? name ':' typeAnnotation`
    fn parameter(&mut self) -> Result<Spanned<Parameter>, ParseError> {
        let first = self.identifier_spanned("parameter name")?;

        let (label, identifier) = if matches!(self.peek().kind, TokenKind::Identifier(_)) {
            (Some(first), self.identifier_spanned("parameter name")?)
        } else {
            (None, first)
        };
        let start = label.as_ref().map_or(identifier.span.start, |l| l.span.start);

        self.expect_punct(PunctuationId::Colon)?;
        let type_annotation = self.type_annotation()?;
        let span = Span::new(start, type_annotation.span.end);

        Ok(Spanned::new(
            Parameter {
                label,
                identifier,
                type_annotation,
            },
            span,
        ))
    }
}

/// Decode the digits of a `0x` literal into big-endian bytes.
///
/// `_` separators are dropped and an odd digit count is left-padded with `0`, so `0x1` is `[0x01]`.
/// Returns `None` if the literal is not a well-formed hexadecimal literal.
fn decode_hexadecimal_location(literal: &str) -> Option<Vec<u8>> {
    let digits = literal
        .strip_prefix("0x")
        .or_else(|| literal.strip_prefix("0X"))?;

    let mut digits: String = digits.chars().filter(|&c| c != '_').collect();
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    if digits.len() % 2 == 1 {
        digits.insert(0, '0');
    }

    digits
        .as_bytes()
        .chunks(2)
        .map(|pair| {
            std::str::from_utf8(pair)
                .ok()
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
        })
        .collect()
}
