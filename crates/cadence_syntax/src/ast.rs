//! Abstract Syntax Tree definitions for Cadence
//!
//! This module defines the declaration-level AST: variable bindings, imports, event composites and functions, plus
//! the type, expression and statement nodes they carry.
//!
//! ## Notes
//! - Every node is created once by the sub-parser that owns it and then moved into its parent. Nothing is mutated
//!   after construction.
//! - Spans are half-open: `&source[span.start.offset..span.end.offset]` is exactly the text of the node.

use std::fmt;

use cadence_core::lang::operators::OperatorId;

use crate::diagnostics::SoftDiagnostic;

/// A point in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    /// Byte offset from the start of the source.
    pub offset: usize,
    /// 1-based line number.
    pub line: usize,
    /// 0-based column, counted in characters.
    pub column: usize,
}

impl Position {
    pub const fn new(offset: usize, line: usize, column: usize) -> Self {
        Self { offset, line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Source range, half-open (`end` is the position just past the last character).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Empty span at `position`.
    pub const fn point(position: Position) -> Self {
        Self {
            start: position,
            end: position,
        }
    }

    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.end.offset.saturating_sub(self.start.offset)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Return the slice of `source` covered by this span, if it is in bounds.
    pub fn source_text<'s>(&self, source: &'s str) -> Option<&'s str> {
        source.get(self.start.offset..self.end.offset)
    }
}

/// A node with source location
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }

    /// Transform the node, keeping the span.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Spanned<U> {
        Spanned {
            node: f(self.node),
            span: self.span,
        }
    }
}

pub type Ident = String;

/// A parsed source file: its declarations in source order plus any non-fatal diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub declarations: Vec<Spanned<Declaration>>,
    pub diagnostics: Vec<SoftDiagnostic>,
}

/// Declarations recognised by the declaration dispatcher.
///
/// The declaration's full range lives on the surrounding [`Spanned`].
#[derive(Debug, Clone, PartialEq)]
pub enum Declaration {
    Variable(VariableDecl),
    Import(ImportDecl),
    Composite(CompositeDecl),
    Function(FunctionDecl),
}

impl Declaration {
    /// Short name of the declaration kind, for logs and debug output.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Declaration::Variable(v) if v.is_constant => "let",
            Declaration::Variable(_) => "var",
            Declaration::Import(_) => "import",
            Declaration::Composite(c) => c.kind.keyword(),
            Declaration::Function(_) => "fun",
        }
    }

    /// Access modifier, if this kind of declaration carries one.
    pub fn access(&self) -> Option<Access> {
        match self {
            Declaration::Variable(v) => Some(v.access),
            Declaration::Import(_) => None,
            Declaration::Composite(c) => Some(c.access),
            Declaration::Function(f) => Some(f.access),
        }
    }
}

// ============================================================================
// Access control
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Access {
    #[default]
    NotSpecified,
    /// `priv` or `access(self)`
    Private,
    /// `pub` or `access(all)`
    Public,
    /// `pub(set)`
    PublicSettable,
    /// `access(account)`
    Account,
    /// `access(contract)`
    Contract,
}

impl Access {
    /// Keyword form of the modifier (the `access(...)` spelling where one exists).
    pub fn keyword(self) -> &'static str {
        match self {
            Access::NotSpecified => "",
            Access::Private => "access(self)",
            Access::Public => "access(all)",
            Access::PublicSettable => "pub(set)",
            Access::Account => "access(account)",
            Access::Contract => "access(contract)",
        }
    }
}

// ============================================================================
// Resource transfer
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransferOperation {
    /// `=`
    Copy,
    /// `<-`
    Move,
    /// `<-!`
    MoveForced,
}

impl TransferOperation {
    pub fn as_str(self) -> &'static str {
        match self {
            TransferOperation::Copy => "=",
            TransferOperation::Move => "<-",
            TransferOperation::MoveForced => "<-!",
        }
    }
}

/// A transfer operator together with the range of its token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transfer {
    pub operation: TransferOperation,
    pub span: Span,
}

// ============================================================================
// Variable declarations
// ============================================================================

/// `(let|var) name (: Type)? transfer value (transfer value)?`
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDecl {
    pub access: Access,
    /// `true` for `let`, `false` for `var`.
    pub is_constant: bool,
    pub identifier: Spanned<Ident>,
    pub type_annotation: Option<Spanned<TypeAnnotation>>,
    pub transfer: Transfer,
    pub value: Spanned<Expr>,
    pub second: Option<SecondValue>,
}

/// Optional second transfer and value of a variable declaration, kept verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct SecondValue {
    pub transfer: Transfer,
    pub value: Spanned<Expr>,
}

// ============================================================================
// Imports
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ImportDecl {
    /// Imported names; empty when the whole location is imported.
    pub identifiers: Vec<Spanned<Ident>>,
    /// Where the names come from. The span covers only the location token.
    pub location: Spanned<Location>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Location {
    /// `import "path"`
    String(String),
    /// `import 0x01`
    Address(Vec<u8>),
    /// `import name` with nothing after it.
    Identifier(Ident),
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::String(s) => write!(f, "{s:?}"),
            Location::Address(bytes) => {
                write!(f, "0x")?;
                for b in bytes {
                    write!(f, "{b:02x}")?;
                }
                Ok(())
            }
            Location::Identifier(name) => write!(f, "{name}"),
        }
    }
}

// ============================================================================
// Composites (events)
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompositeKind {
    Event,
}

impl CompositeKind {
    pub fn keyword(self) -> &'static str {
        match self {
            CompositeKind::Event => "event",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompositeDecl {
    pub access: Access,
    pub kind: CompositeKind,
    pub identifier: Spanned<Ident>,
    pub members: Members,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Members {
    pub special_functions: Vec<Spanned<SpecialFunctionDecl>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecialFunctionKind {
    Initializer,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpecialFunctionDecl {
    pub kind: SpecialFunctionKind,
    pub parameters: Spanned<ParameterList>,
    /// Always `None` for event initializers.
    pub body: Option<Spanned<Block>>,
}

// ============================================================================
// Functions
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    pub access: Access,
    pub identifier: Spanned<Ident>,
    pub parameters: Spanned<ParameterList>,
    pub return_type: Option<Spanned<TypeAnnotation>>,
    pub body: Option<Spanned<Block>>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParameterList {
    pub parameters: Vec<Spanned<Parameter>>,
}

/// `label? name: TypeAnnotation`
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub label: Option<Spanned<Ident>>,
    pub identifier: Spanned<Ident>,
    pub type_annotation: Spanned<TypeAnnotation>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    pub statements: Vec<Spanned<Statement>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Return(Option<Spanned<Expr>>),
    Declaration(Declaration),
    Assignment {
        target: Spanned<Expr>,
        transfer: Transfer,
        value: Spanned<Expr>,
    },
    /// `left <-> right`
    Swap {
        left: Spanned<Expr>,
        right: Spanned<Expr>,
    },
    Expression(Spanned<Expr>),
}

// ============================================================================
// Types
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct TypeAnnotation {
    /// Set by a leading `@`.
    pub is_resource: bool,
    pub ty: Spanned<Type>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    /// `Name` or `Name.Nested.Deeper`
    Nominal { identifier: Ident, nested: Vec<Ident> },
    /// `T?`
    Optional(Box<Spanned<Type>>),
    /// `[T]`
    VariableSized(Box<Spanned<Type>>),
    /// `[T; N]`
    ConstantSized { ty: Box<Spanned<Type>>, size: u64 },
    /// `{K: V}`
    Dictionary {
        key: Box<Spanned<Type>>,
        value: Box<Spanned<Type>>,
    },
    /// `&T`
    Reference(Box<Spanned<Type>>),
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Nominal { identifier, nested } => {
                write!(f, "{identifier}")?;
                for n in nested {
                    write!(f, ".{n}")?;
                }
                Ok(())
            }
            Type::Optional(inner) => write!(f, "{}?", inner.node),
            Type::VariableSized(inner) => write!(f, "[{}]", inner.node),
            Type::ConstantSized { ty, size } => write!(f, "[{}; {size}]", ty.node),
            Type::Dictionary { key, value } => write!(f, "{{{}: {}}}", key.node, value.node),
            Type::Reference(inner) => write!(f, "&{}", inner.node),
        }
    }
}

impl fmt::Display for TypeAnnotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_resource {
            write!(f, "@")?;
        }
        write!(f, "{}", self.ty.node)
    }
}

// ============================================================================
// Expressions
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumberBase {
    Binary,
    Octal,
    Decimal,
    Hexadecimal,
}

impl NumberBase {
    pub fn radix(self) -> u32 {
        match self {
            NumberBase::Binary => 2,
            NumberBase::Octal => 8,
            NumberBase::Decimal => 10,
            NumberBase::Hexadecimal => 16,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Integer { value: u128, base: NumberBase },
    String(String),
    Bool(bool),
    Nil,
    Identifier(Ident),
    Array(Vec<Spanned<Expr>>),
    Dictionary(Vec<DictionaryEntry>),
    Unary(UnaryOp, Box<Spanned<Expr>>),
    Binary(Box<Spanned<Expr>>, BinaryOp, Box<Spanned<Expr>>),
    /// Prefix `<-`
    Move(Box<Spanned<Expr>>),
    /// Postfix `!`
    Force(Box<Spanned<Expr>>),
    Member {
        expr: Box<Spanned<Expr>>,
        optional: bool,
        name: Spanned<Ident>,
    },
    Index {
        expr: Box<Spanned<Expr>>,
        index: Box<Spanned<Expr>>,
    },
    Call {
        callee: Box<Spanned<Expr>>,
        arguments: Vec<Argument>,
    },
    /// `create T(...)`, always wrapping a [`Expr::Call`].
    Create(Box<Spanned<Expr>>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DictionaryEntry {
    pub key: Spanned<Expr>,
    pub value: Spanned<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    pub label: Option<Spanned<Ident>>,
    pub value: Spanned<Expr>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Negate,
    Not,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    NilCoalescing,
    Or,
    And,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

impl BinaryOp {
    /// Map an infix operator token to its AST operator.
    pub fn from_operator(id: OperatorId) -> Option<BinaryOp> {
        Some(match id {
            OperatorId::NilCoalescing => BinaryOp::NilCoalescing,
            OperatorId::OrOr => BinaryOp::Or,
            OperatorId::AndAnd => BinaryOp::And,
            OperatorId::EqEq => BinaryOp::Eq,
            OperatorId::NotEq => BinaryOp::NotEq,
            OperatorId::Lt => BinaryOp::Lt,
            OperatorId::LtEq => BinaryOp::LtEq,
            OperatorId::Gt => BinaryOp::Gt,
            OperatorId::GtEq => BinaryOp::GtEq,
            OperatorId::Plus => BinaryOp::Add,
            OperatorId::Minus => BinaryOp::Sub,
            OperatorId::Star => BinaryOp::Mul,
            OperatorId::Slash => BinaryOp::Div,
            OperatorId::Percent => BinaryOp::Mod,
            OperatorId::Bang => return None,
        })
    }
}
