/// Parser unit tests.
///
/// These exercise the parser through the lexer on small sources, plus a few hand-built token streams for paths
/// the lexer can never produce.
#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer;
    use cadence_core::strings::StringLiteralError;

    fn tokens_of(source: &str) -> Vec<Token> {
        lexer::lex(source).unwrap_or_else(|errs| panic!("lex({source:?}) failed: {errs:?}"))
    }

    fn parse_str(source: &str) -> Result<Program, ParseError> {
        parse(&tokens_of(source))
    }

    fn parse_ok(source: &str) -> Program {
        parse_str(source).unwrap_or_else(|err| panic!("parse({source:?}) failed: {err}"))
    }

    fn parse_err(source: &str) -> ParseError {
        match parse_str(source) {
            Ok(program) => panic!("parse({source:?}) unexpectedly succeeded: {program:?}"),
            Err(err) => err,
        }
    }

    fn single(source: &str) -> Spanned<Declaration> {
        let mut program = parse_ok(source);
        assert_eq!(program.declarations.len(), 1, "expected one declaration in {source:?}");
        program.declarations.remove(0)
    }

    fn variable(source: &str) -> VariableDecl {
        match single(source).node {
            Declaration::Variable(decl) => decl,
            other => panic!("expected variable declaration, got {other:?}"),
        }
    }

    fn import(source: &str) -> ImportDecl {
        match single(source).node {
            Declaration::Import(decl) => decl,
            other => panic!("expected import declaration, got {other:?}"),
        }
    }

    fn names(identifiers: &[Spanned<Ident>]) -> Vec<&str> {
        identifiers.iter().map(|i| i.node.as_str()).collect()
    }

    /// Compact prefix rendering of an expression tree, for precedence checks.
    fn render(expr: &Expr) -> String {
        fn list(items: impl Iterator<Item = String>) -> String {
            items.collect::<Vec<_>>().join(", ")
        }

        match expr {
            Expr::Integer { value, .. } => value.to_string(),
            Expr::String(text) => format!("{text:?}"),
            Expr::Bool(value) => value.to_string(),
            Expr::Nil => "nil".to_string(),
            Expr::Identifier(name) => name.clone(),
            Expr::Array(items) => format!("[{}]", list(items.iter().map(|i| render(&i.node)))),
            Expr::Dictionary(entries) => format!(
                "{{{}}}",
                list(
                    entries
                        .iter()
                        .map(|e| format!("{}: {}", render(&e.key.node), render(&e.value.node)))
                )
            ),
            Expr::Unary(op, operand) => format!("({op:?} {})", render(&operand.node)),
            Expr::Binary(left, op, right) => format!("({op:?} {} {})", render(&left.node), render(&right.node)),
            Expr::Move(inner) => format!("(<- {})", render(&inner.node)),
            Expr::Force(inner) => format!("{}!", render(&inner.node)),
            Expr::Member { expr, optional, name } => {
                format!("{}{}{}", render(&expr.node), if *optional { "?." } else { "." }, name.node)
            }
            Expr::Index { expr, index } => format!("{}[{}]", render(&expr.node), render(&index.node)),
            Expr::Call { callee, arguments } => format!(
                "{}({})",
                render(&callee.node),
                list(arguments.iter().map(|a| match &a.label {
                    Some(label) => format!("{}: {}", label.node, render(&a.value.node)),
                    None => render(&a.value.node),
                }))
            ),
            Expr::Create(inner) => format!("create {}", render(&inner.node)),
        }
    }

    fn nominal(name: &str) -> Type {
        Type::Nominal {
            identifier: name.to_string(),
            nested: Vec::new(),
        }
    }

    // ========================================================================
    // Dispatcher
    // ========================================================================

    #[test]
    fn test_empty_input() {
        let program = parse_ok("");
        assert!(program.declarations.is_empty());
        assert!(program.diagnostics.is_empty());
    }

    #[test]
    fn test_empty_token_stream() {
        let program = Parser::new(&[]).parse().unwrap();
        assert!(program.declarations.is_empty());
    }

    #[test]
    fn test_semicolons_are_skipped() {
        let program = parse_ok(";;let a = 1;;; let b = 2;");
        assert_eq!(program.declarations.len(), 2);
    }

    #[test]
    fn test_declarations_in_source_order_with_exact_spans() {
        let source = "import a from \"x\"\n\
                      pub let b: Int? = 1\n\
                      event E(x: Int)\n\
                      access(contract) fun f(): @R? {}\n\
                      var c <- d";
        let expected = [
            ("import", "import a from \"x\""),
            ("let", "pub let b: Int? = 1"),
            ("event", "event E(x: Int)"),
            ("fun", "access(contract) fun f(): @R? {}"),
            ("var", "var c <- d"),
        ];

        let program = parse_ok(source);
        assert_eq!(program.declarations.len(), expected.len());
        for (decl, (kind, text)) in program.declarations.iter().zip(expected) {
            assert_eq!(decl.node.kind_name(), kind);
            assert_eq!(decl.span.source_text(source), Some(text));
        }
    }

    #[test]
    fn test_dispatcher_stops_at_end_token_without_consuming_it() {
        let tokens = tokens_of("let a = 1; let b = 2 } let c = 3");
        let mut parser = Parser::new(&tokens);

        let declarations = parser.parse_declarations(Some(PunctuationId::RBrace)).unwrap();
        assert_eq!(declarations.len(), 2);
        assert!(parser.peek().kind.is_punctuation(PunctuationId::RBrace));
    }

    #[test]
    fn test_dispatcher_stops_at_non_declaration_without_consuming_it() {
        let tokens = tokens_of("let a = 1 foo");
        let mut parser = Parser::new(&tokens);

        let declarations = parser.parse_declarations(None).unwrap();
        assert_eq!(declarations.len(), 1);
        assert_eq!(parser.peek().kind, TokenKind::Identifier("foo".to_string()));
    }

    #[test]
    fn test_top_level_non_declaration_is_error() {
        let err = parse_err("let a = 1 foo");
        insta::assert_snapshot!(err.to_string(), @r#"unexpected token at top level: got identifier "foo", expected declaration"#);
        assert_eq!(err.span().start.offset, 10);
        assert!(!err.is_internal());
    }

    #[test]
    fn test_keyword_registry_examples_parse() {
        for info in keywords::KEYWORDS {
            for example in info.examples {
                if let Err(err) = parse_str(example.code) {
                    panic!("example for {:?} failed to parse: {:?}: {err}", info.canonical, example.code);
                }
            }
        }
    }

    // ========================================================================
    // Access modifiers
    // ========================================================================

    #[test]
    fn test_access_modifiers() {
        let cases = [
            ("let a = 1", Access::NotSpecified),
            ("priv let a = 1", Access::Private),
            ("pub let a = 1", Access::Public),
            ("pub(set) var a = 1", Access::PublicSettable),
            ("access(all) let a = 1", Access::Public),
            ("access(account) let a = 1", Access::Account),
            ("access(contract) let a = 1", Access::Contract),
            ("access(self) let a = 1", Access::Private),
        ];

        for (source, expected) in cases {
            let decl = single(source);
            assert_eq!(decl.node.access(), Some(expected), "access of {source:?}");
            assert_eq!(decl.span.source_text(source), Some(source));
        }
    }

    #[test]
    fn test_two_access_modifiers_is_error() {
        let err = parse_err("pub priv let x = 1");
        insta::assert_snapshot!(err.to_string(), @"unexpected access modifier");
        assert_eq!(err.span().start.offset, 4);
        assert_eq!(err.span().end.offset, 8);
    }

    #[test]
    fn test_pub_requires_set() {
        let err = parse_err("pub(get) var x = 1");
        insta::assert_snapshot!(err.to_string(), @r#"expected keyword "set", got identifier "get""#);
    }

    #[test]
    fn test_pub_set_requires_closing_paren() {
        let err = parse_err("pub(set let x = 1");
        insta::assert_snapshot!(err.to_string(), @r#"expected ')', got keyword "let""#);
    }

    #[test]
    fn test_access_requires_known_scope() {
        let err = parse_err("access(public) let x = 1");
        insta::assert_snapshot!(err.to_string(), @r#"expected keyword "all", "account", "contract", or "self", got identifier "public""#);
    }

    #[test]
    fn test_access_requires_parenthesis() {
        let err = parse_err("access let x = 1");
        insta::assert_snapshot!(err.to_string(), @r#"expected '(' followed by keyword "all", "account", "contract", or "self", got keyword "let""#);
    }

    #[test]
    fn test_access_modifier_without_declaration_stops_dispatch() {
        let tokens = tokens_of("pub x }");
        let mut parser = Parser::new(&tokens);

        let declarations = parser.parse_declarations(Some(PunctuationId::RBrace)).unwrap();
        assert!(declarations.is_empty());
        assert!(parser.peek().kind.is_keyword(KeywordId::Pub));
    }

    #[test]
    fn test_access_modifier_without_declaration_at_top_level() {
        let err = parse_err("pub 1");
        insta::assert_snapshot!(err.to_string(), @r#"unexpected token at top level: got keyword "pub", expected declaration"#);
        assert_eq!(err.span().start.offset, 0);

        let err = parse_err("let a = 1\naccess(all)");
        insta::assert_snapshot!(err.to_string(), @r#"unexpected token at top level: got keyword "access", expected declaration"#);
        assert_eq!(err.span().start.line, 2);
    }

    #[test]
    fn test_access_modifier_on_import_is_dropped() {
        let program = parse_ok("pub import \"x\"\naccess(all) import a");
        assert_eq!(program.declarations.len(), 2);

        let first = &program.declarations[0];
        assert_eq!(first.span.start.offset, 0);
        assert_eq!(first.span.end.offset, r#"pub import "x""#.len());
        assert_eq!(first.node.access(), None);

        let Declaration::Import(import) = &program.declarations[1].node else {
            panic!("expected import declaration");
        };
        assert_eq!(import.location.node, Location::Identifier("a".to_string()));
    }

    #[test]
    fn test_access_grammar_on_wrong_token_is_internal() {
        let tokens = tokens_of("let");
        let err = Parser::new(&tokens).access().unwrap_err();
        assert!(err.is_internal());
        insta::assert_snapshot!(err.to_string(), @r#"internal parser error: access modifier grammar entered on keyword "let""#);
    }

    // ========================================================================
    // Variables and transfers
    // ========================================================================

    #[test]
    fn test_transfer_operators() {
        let cases = [
            ("=", Some(TransferOperation::Copy)),
            ("<-", Some(TransferOperation::Move)),
            ("<-!", Some(TransferOperation::MoveForced)),
            ("<->", None),
            ("==", None),
            ("x", None),
            ("", None),
        ];

        for (source, expected) in cases {
            let tokens = tokens_of(source);
            let mut parser = Parser::new(&tokens);

            let transfer = parser.transfer();
            assert_eq!(transfer.map(|t| t.operation), expected, "transfer of {source:?}");
            match transfer {
                Some(transfer) => {
                    assert_eq!(transfer.span, tokens[0].span);
                    assert_eq!(parser.pos, 1);
                }
                None => assert_eq!(parser.pos, 0, "{source:?} consumed a token"),
            }
        }
    }

    #[test]
    fn test_let_with_type_annotation() {
        let decl = single("let x: Int = 1");
        assert_eq!(decl.span.start.offset, 0);
        assert_eq!(decl.span.end.offset, 14);

        let Declaration::Variable(var) = decl.node else {
            panic!("expected variable declaration");
        };
        assert!(var.is_constant);
        assert_eq!(var.access, Access::NotSpecified);
        assert_eq!(var.identifier.node, "x");
        let annotation = var.type_annotation.unwrap();
        assert!(!annotation.node.is_resource);
        assert_eq!(annotation.node.ty.node, nominal("Int"));
        assert_eq!(var.transfer.operation, TransferOperation::Copy);
        assert_eq!(
            var.value.node,
            Expr::Integer {
                value: 1,
                base: NumberBase::Decimal
            }
        );
        assert!(var.second.is_none());
    }

    #[test]
    fn test_var_with_move_and_create() {
        let var = variable("var y <- create R()");
        assert!(!var.is_constant);
        assert!(var.type_annotation.is_none());
        assert_eq!(var.transfer.operation, TransferOperation::Move);
        assert_eq!(render(&var.value.node), "create R()");
        assert_eq!(var.value.span.start.offset, 9);
    }

    #[test]
    fn test_pub_set_var_span_starts_at_modifier() {
        let source = "pub(set) var z = 1";
        let decl = single(source);
        assert_eq!(decl.node.access(), Some(Access::PublicSettable));
        assert_eq!(decl.span.source_text(source), Some(source));
    }

    #[test]
    fn test_second_value() {
        let source = "let r <- a <-! b";
        let decl = single(source);
        assert_eq!(decl.span.source_text(source), Some(source));

        let Declaration::Variable(var) = decl.node else {
            panic!("expected variable declaration");
        };
        assert_eq!(var.transfer.operation, TransferOperation::Move);
        assert_eq!(var.value.node, Expr::Identifier("a".to_string()));
        let second = var.second.unwrap();
        assert_eq!(second.transfer.operation, TransferOperation::MoveForced);
        assert_eq!(second.value.node, Expr::Identifier("b".to_string()));
    }

    #[test]
    fn test_variable_errors() {
        let err = parse_err("let = 1");
        insta::assert_snapshot!(err.to_string(), @"expected identifier after start of variable declaration, got '='");

        let err = parse_err("var");
        insta::assert_snapshot!(err.to_string(), @"expected identifier after start of variable declaration, got end of input");

        let err = parse_err("let x 1");
        insta::assert_snapshot!(err.to_string(), @"expected transfer, got decimal literal");

        let err = parse_err("let x: Int");
        insta::assert_snapshot!(err.to_string(), @"expected transfer, got end of input");
    }

    // ========================================================================
    // Imports
    // ========================================================================

    #[test]
    fn test_import_identifier_list() {
        let source = r#"import a, b from "x""#;
        let decl = single(source);
        assert_eq!(decl.span.source_text(source), Some(source));

        let Declaration::Import(import) = decl.node else {
            panic!("expected import declaration");
        };
        assert_eq!(names(&import.identifiers), vec!["a", "b"]);
        assert_eq!(import.identifiers[0].span.start.offset, 7);
        assert_eq!(import.identifiers[1].span.start.offset, 10);
        assert_eq!(import.location.node, Location::String("x".to_string()));
        assert_eq!(import.location.span.source_text(source), Some(r#""x""#));
    }

    #[test]
    fn test_import_single_identifier() {
        let import = import(r#"import a from 0x0102"#);
        assert_eq!(names(&import.identifiers), vec!["a"]);
        assert_eq!(import.location.node, Location::Address(vec![0x01, 0x02]));
    }

    #[test]
    fn test_import_whole_location() {
        let import = import(r#"import "x""#);
        assert!(import.identifiers.is_empty());
        assert_eq!(import.location.node, Location::String("x".to_string()));

        let source = "import 0x1";
        let import = self::import(source);
        assert!(import.identifiers.is_empty());
        assert_eq!(import.location.node, Location::Address(vec![0x01]));
        assert_eq!(import.location.span.source_text(source), Some("0x1"));
    }

    #[test]
    fn test_import_address_separators_and_padding() {
        assert_eq!(import("import 0xA_B").location.node, Location::Address(vec![0xAB]));
        assert_eq!(import("import 0x102").location.node, Location::Address(vec![0x01, 0x02]));
        assert_eq!(import("import 0x0").location.node, Location::Address(vec![0x00]));
    }

    #[test]
    fn test_import_identifier_location_at_end_of_input() {
        let source = "import a";
        let decl = single(source);
        assert_eq!(decl.span.source_text(source), Some(source));

        let Declaration::Import(import) = decl.node else {
            panic!("expected import declaration");
        };
        assert!(import.identifiers.is_empty());
        assert_eq!(import.location.node, Location::Identifier("a".to_string()));
        assert_eq!(import.location.span.source_text(source), Some("a"));
    }

    #[test]
    fn test_import_keyword_spelled_names() {
        let import = import(r#"import event, fun from "x""#);
        assert_eq!(names(&import.identifiers), vec!["event", "fun"]);
    }

    #[test]
    fn test_import_location_errors() {
        let err = parse_err("import");
        insta::assert_snapshot!(err.to_string(), @"unexpected end in import declaration: expected string, address, or identifier");

        let err = parse_err("import 1");
        insta::assert_snapshot!(err.to_string(), @"unexpected token in import declaration: got decimal literal, expected string, address, or identifier");

        let err = parse_err("import a from");
        insta::assert_snapshot!(err.to_string(), @"unexpected end in import declaration: expected string or address");

        let err = parse_err("import a from b");
        insta::assert_snapshot!(err.to_string(), @r#"unexpected token in import declaration: got identifier "b", expected string or address"#);

        let err = parse_err("import a from 0b1");
        insta::assert_snapshot!(err.to_string(), @"unexpected token in import declaration: got binary literal, expected string or address");
    }

    #[test]
    fn test_import_after_single_identifier_errors() {
        let err = parse_err("import a b");
        insta::assert_snapshot!(err.to_string(), @r#"unexpected identifier in import declaration: got identifier "b", expected keyword "from""#);
        assert_eq!(err.span().start.offset, 9);

        let err = parse_err("import a\nlet x = 1");
        insta::assert_snapshot!(err.to_string(), @r#"unexpected identifier in import declaration: got keyword "let", expected keyword "from""#);

        let err = parse_err("import a; let x = 1");
        insta::assert_snapshot!(err.to_string(), @r#"unexpected token in import declaration: got ';', expected keyword "from" or ','"#);
    }

    #[test]
    fn test_import_identifier_list_errors() {
        let err = parse_err(r#"import a, from "x""#);
        insta::assert_snapshot!(err.to_string(), @r#"expected identifier, got keyword "from""#);

        let err = parse_err(r#"import a,, b from "x""#);
        insta::assert_snapshot!(err.to_string(), @"unexpected token in import declaration: got ',', expected identifier");

        let err = parse_err(r#"import a, b c from "x""#);
        insta::assert_snapshot!(err.to_string(), @r#"unexpected token in import declaration: got identifier "c", expected ',' or keyword "from""#);

        let err = parse_err("import a, b");
        insta::assert_snapshot!(err.to_string(), @r#"unexpected end in import declaration: expected ',' or keyword "from""#);

        let err = parse_err("import a,");
        insta::assert_snapshot!(err.to_string(), @"unexpected end in import declaration: expected identifier");
    }

    #[test]
    fn test_import_string_escape_is_soft_diagnostic() {
        let source = r#"import "a\qb""#;
        let program = parse_ok(source);

        let Declaration::Import(import) = &program.declarations[0].node else {
            panic!("expected import declaration");
        };
        assert_eq!(import.location.node, Location::String("ab".to_string()));
        assert_eq!(program.diagnostics.len(), 1);
        assert_eq!(
            program.diagnostics[0].error,
            StringLiteralError::InvalidEscapeCharacter { offset: 2, found: 'q' }
        );
        assert_eq!(program.diagnostics[0].span, import.location.span);
    }

    #[test]
    fn test_malformed_hexadecimal_token_is_internal() {
        let at = |offset| Span::point(Position::new(offset, 1, offset));
        let tokens = vec![
            Token::new(TokenKind::Identifier("import".to_string()), at(0)),
            Token::new(TokenKind::HexadecimalLiteral("0xZZ".to_string()), at(7)),
            Token::new(TokenKind::Eof, at(11)),
        ];

        let err = parse(&tokens).unwrap_err();
        assert!(err.is_internal());
        insta::assert_snapshot!(err.to_string(), @r#"internal parser error: invalid hexadecimal location "0xZZ""#);
    }

    #[test]
    fn test_decode_hexadecimal_location() {
        let cases: [(&str, Option<Vec<u8>>); 8] = [
            ("0x1", Some(vec![0x01])),
            ("0x0001", Some(vec![0x00, 0x01])),
            ("0xA_B", Some(vec![0xAB])),
            ("0xabc", Some(vec![0x0a, 0xbc])),
            ("0xf8d6e0586b0a20c7", Some(vec![0xf8, 0xd6, 0xe0, 0x58, 0x6b, 0x0a, 0x20, 0xc7])),
            ("0x", Some(Vec::new())),
            ("1", None),
            ("0xG", None),
        ];

        for (literal, expected) in cases {
            assert_eq!(decode_hexadecimal_location(literal), expected, "decoding {literal:?}");
        }
    }

    // ========================================================================
    // Events and functions
    // ========================================================================

    #[test]
    fn test_event_declaration() {
        let source = "event Transfer(to: Address)";
        let decl = single(source);
        assert_eq!(decl.span.source_text(source), Some(source));

        let Declaration::Composite(event) = decl.node else {
            panic!("expected composite declaration");
        };
        assert_eq!(event.kind, CompositeKind::Event);
        assert_eq!(event.access, Access::NotSpecified);
        assert_eq!(event.identifier.node, "Transfer");

        let [initializer] = event.members.special_functions.as_slice() else {
            panic!("expected exactly one special function");
        };
        assert_eq!(initializer.node.kind, SpecialFunctionKind::Initializer);
        assert!(initializer.node.body.is_none());
        assert_eq!(initializer.span, initializer.node.parameters.span);
        assert_eq!(initializer.span.source_text(source), Some("(to: Address)"));

        let [parameter] = initializer.node.parameters.node.parameters.as_slice() else {
            panic!("expected exactly one parameter");
        };
        assert!(parameter.node.label.is_none());
        assert_eq!(parameter.node.identifier.node, "to");
        assert_eq!(parameter.node.type_annotation.node.ty.node, nominal("Address"));
    }

    #[test]
    fn test_event_with_access_and_labels() {
        let source = "access(all) event Foo()";
        let decl = single(source);
        assert_eq!(decl.node.access(), Some(Access::Public));
        assert_eq!(decl.span.source_text(source), Some(source));

        let Declaration::Composite(event) = single("event E(from a: Address, to b: @R)").node else {
            panic!("expected composite declaration");
        };
        let parameters = &event.members.special_functions[0].node.parameters.node.parameters;
        let labels: Vec<_> = parameters
            .iter()
            .map(|p| p.node.label.as_ref().map(|l| l.node.as_str()))
            .collect();
        assert_eq!(labels, vec![Some("from"), Some("to")]);
        assert!(parameters[1].node.type_annotation.node.is_resource);
    }

    #[test]
    fn test_event_errors() {
        let err = parse_err("event (x: Int)");
        insta::assert_snapshot!(err.to_string(), @"expected identifier after start of event declaration, got '('");

        let err = parse_err("event E");
        insta::assert_snapshot!(err.to_string(), @"expected '(', got end of input");

        let err = parse_err("event E(x Int)");
        insta::assert_snapshot!(err.to_string(), @"expected ':', got ')'");
    }

    #[test]
    fn test_function_with_return_type_and_body() {
        let Declaration::Function(fun) = single("fun add(a: Int, b: Int): Int { return a + b }").node else {
            panic!("expected function declaration");
        };
        assert_eq!(fun.identifier.node, "add");
        assert_eq!(fun.parameters.node.parameters.len(), 2);
        assert_eq!(fun.return_type.unwrap().node.ty.node, nominal("Int"));

        let body = fun.body.unwrap();
        let [statement] = body.node.statements.as_slice() else {
            panic!("expected exactly one statement");
        };
        let Statement::Return(Some(value)) = &statement.node else {
            panic!("expected return with a value");
        };
        assert_eq!(render(&value.node), "(Add a b)");
    }

    #[test]
    fn test_function_without_body() {
        let Declaration::Function(fun) = single("fun f()").node else {
            panic!("expected function declaration");
        };
        assert!(fun.return_type.is_none());
        assert!(fun.body.is_none());
    }

    #[test]
    fn test_block_mixes_declarations_and_statements() {
        let source = "fun f() {\n    let a = 1;\n    a = 2\n    a <-> b\n    g(x: 1, 2)\n    return\n}";
        let Declaration::Function(fun) = single(source).node else {
            panic!("expected function declaration");
        };
        let statements = fun.body.unwrap().node.statements;
        assert_eq!(statements.len(), 5);

        assert!(matches!(statements[0].node, Statement::Declaration(Declaration::Variable(_))));
        match &statements[1].node {
            Statement::Assignment { target, transfer, value } => {
                assert_eq!(render(&target.node), "a");
                assert_eq!(transfer.operation, TransferOperation::Copy);
                assert_eq!(render(&value.node), "2");
            }
            other => panic!("expected assignment, got {other:?}"),
        }
        match &statements[2].node {
            Statement::Swap { left, right } => {
                assert_eq!(render(&left.node), "a");
                assert_eq!(render(&right.node), "b");
            }
            other => panic!("expected swap, got {other:?}"),
        }
        match &statements[3].node {
            Statement::Expression(expr) => assert_eq!(render(&expr.node), "g(x: 1, 2)"),
            other => panic!("expected expression statement, got {other:?}"),
        }
        assert!(matches!(statements[4].node, Statement::Return(None)));
        assert_eq!(statements[4].span.source_text(source), Some("return"));
    }

    #[test]
    fn test_unclosed_block() {
        let err = parse_err("fun f() { let a = 1");
        insta::assert_snapshot!(err.to_string(), @"expected '}', got end of input");
    }

    // ========================================================================
    // Types
    // ========================================================================

    #[test]
    fn test_type_annotations() {
        let cases = [
            ("let x: {String: [Int; 3]}? = nil", "{String: [Int; 3]}?"),
            ("let x: &A.B?? = nil", "&A.B??"),
            ("let x: [[String]] = []", "[[String]]"),
            ("let x: @R? <- r", "@R?"),
        ];

        for (source, expected) in cases {
            let var = variable(source);
            assert_eq!(var.type_annotation.unwrap().node.to_string(), expected, "type in {source:?}");
        }
    }

    #[test]
    fn test_double_optional_spans() {
        let var = variable("let y: A?? = nil");
        let ty = var.type_annotation.unwrap().node.ty;
        assert_eq!((ty.span.start.offset, ty.span.end.offset), (7, 10));

        let Type::Optional(inner) = ty.node else {
            panic!("expected optional type");
        };
        assert_eq!((inner.span.start.offset, inner.span.end.offset), (7, 9));
        let Type::Optional(innermost) = inner.node else {
            panic!("expected nested optional type");
        };
        assert_eq!(innermost.node, nominal("A"));
    }

    #[test]
    fn test_type_errors() {
        let err = parse_err("let x: = 1");
        insta::assert_snapshot!(err.to_string(), @"expected type, got '='");

        let err = parse_err("let x: [Int; n] = []");
        insta::assert_snapshot!(err.to_string(), @r#"expected integer array size, got identifier "n""#);

        let err = parse_err("let x: [Int; 0x1_0000_0000_0000_0000] = []");
        insta::assert_snapshot!(err.to_string(), @"array size is too large");
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    #[test]
    fn test_expression_precedence_and_associativity() {
        let cases = [
            ("1 + 2 * 3", "(Add 1 (Mul 2 3))"),
            ("1 - 2 - 3", "(Sub (Sub 1 2) 3)"),
            ("(1 + 2) * 3", "(Mul (Add 1 2) 3)"),
            ("a ?? b ?? c", "(NilCoalescing a (NilCoalescing b c))"),
            ("a == b ?? c", "(NilCoalescing (Eq a b) c)"),
            ("!a && b || c", "(Or (And (Not a) b) c)"),
            ("x % 2 != 0", "(NotEq (Mod x 2) 0)"),
            ("-a.b[0]!", "(Negate a.b[0]!)"),
            ("f(a: 1)?.g", "f(a: 1)?.g"),
            ("<-r", "(<- r)"),
            ("[1, {\"k\": nil}, true]", "[1, {\"k\": nil}, true]"),
        ];

        for (source, expected) in cases {
            let var = variable(&format!("let x = {source}"));
            assert_eq!(render(&var.value.node), expected, "rendering {source:?}");
        }
    }

    #[test]
    fn test_parentheses_widen_span() {
        let var = variable("let x = (1)");
        assert_eq!(
            var.value.node,
            Expr::Integer {
                value: 1,
                base: NumberBase::Decimal
            }
        );
        assert_eq!((var.value.span.start.offset, var.value.span.end.offset), (8, 11));
    }

    #[test]
    fn test_integer_literals() {
        let cases = [
            ("0xFF", 255, NumberBase::Hexadecimal),
            ("0b101", 5, NumberBase::Binary),
            ("0o17", 15, NumberBase::Octal),
            ("1_000", 1000, NumberBase::Decimal),
        ];

        for (literal, value, base) in cases {
            let var = variable(&format!("let x = {literal}"));
            assert_eq!(var.value.node, Expr::Integer { value, base }, "value of {literal}");
        }
    }

    #[test]
    fn test_integer_literal_overflow() {
        let err = parse_err("let x = 340282366920938463463374607431768211456");
        insta::assert_snapshot!(err.to_string(), @"invalid integer literal 340282366920938463463374607431768211456");
    }

    #[test]
    fn test_expression_errors() {
        let err = parse_err("let x = )");
        insta::assert_snapshot!(err.to_string(), @"expected expression, got ')'");

        let err = parse_err("let r <- create R");
        insta::assert_snapshot!(err.to_string(), @"expected invocation after 'create'");

        let err = parse_err("let x = [1, 2");
        insta::assert_snapshot!(err.to_string(), @"expected ']', got end of input");
    }

    #[test]
    fn test_expression_string_soft_diagnostic() {
        let program = parse_ok(r#"let s = "\u{zz}""#);
        assert_eq!(program.diagnostics.len(), 1);
        assert!(matches!(
            program.diagnostics[0].error,
            StringLiteralError::InvalidUnicodeEscape { offset: 1, .. }
        ));
    }

    #[test]
    fn test_parser_diagnostics_accessors() {
        let tokens = tokens_of(r#"let a = "\q" let b = "\w""#);
        let mut parser = Parser::new(&tokens);
        parser.parse_declarations(None).unwrap();
        assert_eq!(parser.diagnostics().len(), 2);
        assert_eq!(parser.into_diagnostics().len(), 2);
    }

    // ========================================================================
    // Nesting limit
    // ========================================================================

    #[test]
    fn test_moderate_nesting_is_accepted() {
        let source = format!("let x = {}1{}", "(".repeat(30), ")".repeat(30));
        assert_eq!(render(&variable(&source).value.node), "1");
    }

    #[test]
    fn test_deep_expression_nesting_is_error() {
        let source = format!("let x = {}1{}", "(".repeat(200), ")".repeat(200));
        let err = parse_err(&source);
        insta::assert_snapshot!(err.to_string(), @"nesting too deep: more than 64 levels");
        assert!(!err.is_internal());
    }

    #[test]
    fn test_long_nil_coalescing_chain_is_not_nesting() {
        let names: Vec<String> = (0..200).map(|i| format!("a{i}")).collect();
        let source = format!("let x = {}", names.join(" ?? "));
        let value = variable(&source).value;

        let mut depth = 0;
        let mut expr = &value;
        while let Expr::Binary(left, BinaryOp::NilCoalescing, right) = &expr.node {
            assert!(matches!(left.node, Expr::Identifier(_)));
            depth += 1;
            expr = right;
        }
        assert_eq!(depth, 199);
        assert_eq!(render(&expr.node), "a199");
        assert_eq!(value.span.end.offset, source.len());
    }

    #[test]
    fn test_mixed_chain_folds_at_tighter_operators() {
        let value = variable("let x = a ?? b || c ?? d").value;
        assert_eq!(render(&value.node), "(NilCoalescing a (NilCoalescing (Or b c) d))");
    }

    #[test]
    fn test_deep_type_nesting_is_error() {
        let source = format!("let x: {}Int{} = []", "[".repeat(200), "]".repeat(200));
        let err = parse_err(&source);
        insta::assert_snapshot!(err.to_string(), @"nesting too deep: more than 64 levels");
    }
}
