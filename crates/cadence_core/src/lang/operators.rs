//! Operator vocabulary.
//!
//! This module defines the canonical operator set along with the metadata the expression parser climbs on:
//! precedence (binding power), associativity and fixity.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**.
//! - `precedence` is a relative ordering where higher binds tighter. [`LOWEST_BINDING_POWER`] is strictly below
//!   every infix operator, so an expression parsed at that level consumes a full expression.
//! - `-` is registered as infix; the parser also accepts it in prefix position.
//!
//! ## Examples
//! ```rust
//! use cadence_core::lang::operators::{self, OperatorId};
//!
//! assert_eq!(operators::from_str("??"), Some(OperatorId::NilCoalescing));
//! assert!(operators::info_for(OperatorId::Star).precedence > operators::info_for(OperatorId::Plus).precedence);
//! ```

/// Binding power used to parse a complete expression (initializers, arguments, statements).
pub const LOWEST_BINDING_POWER: u8 = 0;

/// Define how operators associate when chained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Associativity {
    Left,
    Right,
}

/// Define whether an operator is infix (binary) or prefix (unary).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fixity {
    Infix,
    Prefix,
}

/// Stable identifier for every operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorId {
    // Optionals
    NilCoalescing,

    // Logical
    OrOr,
    AndAnd,
    Bang,

    // Comparison
    EqEq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,

    // Arithmetic
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
}

/// Metadata for an operator.
#[derive(Debug, Clone, Copy)]
pub struct OperatorInfo {
    pub id: OperatorId,
    pub canonical: &'static str,
    pub precedence: u8,
    pub associativity: Associativity,
    pub fixity: Fixity,
}

/// Registry of all operators.
pub const OPERATORS: &[OperatorInfo] = &[
    // Optionals
    op(OperatorId::NilCoalescing, "??", 10, Associativity::Right, Fixity::Infix),
    // Logical
    op(OperatorId::OrOr, "||", 20, Associativity::Left, Fixity::Infix),
    op(OperatorId::AndAnd, "&&", 30, Associativity::Left, Fixity::Infix),
    op(OperatorId::Bang, "!", 80, Associativity::Right, Fixity::Prefix),
    // Comparison
    op(OperatorId::EqEq, "==", 40, Associativity::Left, Fixity::Infix),
    op(OperatorId::NotEq, "!=", 40, Associativity::Left, Fixity::Infix),
    op(OperatorId::Lt, "<", 40, Associativity::Left, Fixity::Infix),
    op(OperatorId::LtEq, "<=", 40, Associativity::Left, Fixity::Infix),
    op(OperatorId::Gt, ">", 40, Associativity::Left, Fixity::Infix),
    op(OperatorId::GtEq, ">=", 40, Associativity::Left, Fixity::Infix),
    // Arithmetic
    op(OperatorId::Plus, "+", 60, Associativity::Left, Fixity::Infix),
    op(OperatorId::Minus, "-", 60, Associativity::Left, Fixity::Infix),
    op(OperatorId::Star, "*", 70, Associativity::Left, Fixity::Infix),
    op(OperatorId::Slash, "/", 70, Associativity::Left, Fixity::Infix),
    op(OperatorId::Percent, "%", 70, Associativity::Left, Fixity::Infix),
];

/// Canonical spelling.
pub fn as_str(id: OperatorId) -> &'static str {
    info_for(id).canonical
}

/// Full metadata.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: OperatorId) -> &'static OperatorInfo {
    OPERATORS.iter().find(|o| o.id == id).expect("operator info missing")
}

/// Lookup by spelling.
pub fn from_str(s: &str) -> Option<OperatorId> {
    OPERATORS.iter().find(|o| o.canonical == s).map(|o| o.id)
}

/// Return `true` if `id` can appear between two operands.
pub fn is_infix(id: OperatorId) -> bool {
    info_for(id).fixity == Fixity::Infix
}

const fn op(
    id: OperatorId,
    canonical: &'static str,
    precedence: u8,
    associativity: Associativity,
    fixity: Fixity,
) -> OperatorInfo {
    OperatorInfo {
        id,
        canonical,
        precedence,
        associativity,
        fixity,
    }
}
