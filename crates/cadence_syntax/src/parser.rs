//! Parser for the Cadence programming language
//!
//! Converts a token stream into declaration-level AST nodes. The entry point of the grammar is the declaration
//! dispatcher ([`Parser::parse_declarations`]), which can also be embedded in a larger grammar: it stops, without
//! consuming anything, on the first token it cannot classify.
//!
//! ## Examples
//!
//! ```rust
//! use cadence_syntax::ast::{Declaration, Location};
//! use cadence_syntax::{lexer, parser};
//!
//! let tokens = lexer::lex("import 0x1").unwrap();
//! let program = parser::parse(&tokens).unwrap();
//! let Declaration::Import(import) = &program.declarations[0].node else { unreachable!() };
//! assert_eq!(import.location.node, Location::Address(vec![0x01]));
//! ```

use crate::ast::*;
use crate::diagnostics::{ParseError, SoftDiagnostic};
use crate::lexer::{Token, TokenKind};
use cadence_core::lang::keywords::{self, KeywordId};
use cadence_core::lang::operators::{self, Associativity, LOWEST_BINDING_POWER, OperatorId};
use cadence_core::lang::punctuation::PunctuationId;
use cadence_core::limits::MAX_NESTING_DEPTH;
use cadence_core::strings::parse_string_literal;

// NOTE: This module is split across multiple files using `include!` to keep all parser
// methods in the same Rust module (preserving privacy + call patterns) while avoiding
// a single large source file.

include!("parser/core.rs");
include!("parser/helpers.rs");
include!("parser/decl.rs");
include!("parser/types.rs");
include!("parser/stmts.rs");
include!("parser/expr.rs");
include!("parser/util.rs");
include!("parser/api.rs");
include!("parser/tests.rs");
