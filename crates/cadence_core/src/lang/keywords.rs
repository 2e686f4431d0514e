//! Define the reserved keyword vocabulary for the Cadence language.
//!
//! This module is the single source of truth for reserved words: a stable identifier ([`KeywordId`]) plus a const
//! metadata table ([`KEYWORDS`]) that records canonical spellings, categories, stability and examples.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**.
//! - Keywords are matched against identifier tokens. The lexer does not reserve them, so a declaration parser
//!   that does not recognise a keyword can hand the identifier to the grammar layer above it untouched.
//!
//! ## Examples
//! ```rust
//! use cadence_core::lang::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::from_str("event"), Some(KeywordId::Event));
//! assert_eq!(keywords::as_str(KeywordId::SelfKw), "self");
//! assert_eq!(keywords::from_str("Event"), None);
//! ```

use super::registry::{Example, Stability};

/// Stable identifier for every reserved keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordId {
    // Declarations
    Let,
    Var,
    Fun,
    Event,
    Import,
    From,

    // Access modifiers
    Priv,
    Pub,
    Access,

    // Access scopes (only meaningful inside `access(...)` / `pub(...)`)
    All,
    Account,
    Contract,
    SelfKw,
    Set,

    // Statements / expressions
    Return,
    Create,

    // Literals
    True,
    False,
    Nil,
}

/// High-level grouping for documentation and tooling.
///
/// ## Notes
/// - Categories are metadata only; they do not enforce parsing context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordCategory {
    Declaration,
    Import,
    AccessModifier,
    AccessScope,
    Statement,
    Expression,
    Literal,
}

/// Metadata for a keyword.
#[derive(Debug, Clone, Copy)]
pub struct KeywordInfo {
    pub id: KeywordId,
    pub canonical: &'static str,
    pub category: KeywordCategory,
    pub stability: Stability,
    pub examples: &'static [Example],
}

/// Registry of all keywords.
///
/// ## Notes
/// - The ordering is not semantically meaningful, but is grouped for readability.
pub const KEYWORDS: &[KeywordInfo] = &[
    // Declarations
    info(KeywordId::Let, "let", KeywordCategory::Declaration).with_examples(&[Example {
        code: "let x: Int = 1",
        note: Some("Constant binding with an explicit type annotation."),
    }]),
    info(KeywordId::Var, "var", KeywordCategory::Declaration).with_examples(&[Example {
        code: "var y <- create R()",
        note: Some("Variable binding that moves a freshly created resource."),
    }]),
    info(KeywordId::Fun, "fun", KeywordCategory::Declaration).with_examples(&[Example {
        code: "fun add(a: Int, b: Int): Int { return a + b }",
        note: None,
    }]),
    info(KeywordId::Event, "event", KeywordCategory::Declaration).with_examples(&[Example {
        code: "event Transfer(to: Address)",
        note: Some("Desugars into an event composite with a single initializer."),
    }]),
    info(KeywordId::Import, "import", KeywordCategory::Declaration).with_examples(&[
        Example {
            code: "import a, b from \"x\"",
            note: None,
        },
        Example {
            code: "import 0x1",
            note: Some("Address location; odd digit counts are left-padded."),
        },
    ]),
    info(KeywordId::From, "from", KeywordCategory::Import),
    // Access modifiers
    info(KeywordId::Priv, "priv", KeywordCategory::AccessModifier)
        .legacy()
        .with_examples(&[Example {
            code: "priv let x = 1",
            note: None,
        }]),
    info(KeywordId::Pub, "pub", KeywordCategory::AccessModifier)
        .legacy()
        .with_examples(&[Example {
            code: "pub(set) var z = 1",
            note: Some("Publicly settable field."),
        }]),
    info(KeywordId::Access, "access", KeywordCategory::AccessModifier).with_examples(&[Example {
        code: "access(all) event Foo()",
        note: None,
    }]),
    // Access scopes
    info(KeywordId::All, "all", KeywordCategory::AccessScope),
    info(KeywordId::Account, "account", KeywordCategory::AccessScope),
    info(KeywordId::Contract, "contract", KeywordCategory::AccessScope),
    info(KeywordId::SelfKw, "self", KeywordCategory::AccessScope),
    info(KeywordId::Set, "set", KeywordCategory::AccessScope),
    // Statements / expressions
    info(KeywordId::Return, "return", KeywordCategory::Statement),
    info(KeywordId::Create, "create", KeywordCategory::Expression),
    // Literals
    info(KeywordId::True, "true", KeywordCategory::Literal),
    info(KeywordId::False, "false", KeywordCategory::Literal),
    info(KeywordId::Nil, "nil", KeywordCategory::Literal),
];

/// Canonical spelling.
///
/// ## Parameters
/// - `id`: Keyword identifier.
///
/// ## Returns
/// - The canonical spelling for `id`.
pub fn as_str(id: KeywordId) -> &'static str {
    info_for(id).canonical
}

/// Category.
pub fn category(id: KeywordId) -> KeywordCategory {
    info_for(id).category
}

/// Full metadata.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: KeywordId) -> &'static KeywordInfo {
    KEYWORDS.iter().find(|k| k.id == id).expect("keyword info missing")
}

/// Lookup by spelling.
///
/// ## Parameters
/// - `s`: Candidate keyword spelling.
///
/// ## Returns
/// - `Some(KeywordId)` if the spelling matches this registry.
/// - `None` otherwise.
pub fn from_str(s: &str) -> Option<KeywordId> {
    KEYWORDS.iter().find(|k| k.canonical == s).map(|k| k.id)
}

// --- helpers -----------------------------------------------------------------

const fn info(id: KeywordId, canonical: &'static str, category: KeywordCategory) -> KeywordInfo {
    KeywordInfo {
        id,
        canonical,
        category,
        stability: Stability::Stable,
        examples: &[],
    }
}

impl KeywordInfo {
    const fn with_examples(self, examples: &'static [Example]) -> Self {
        KeywordInfo { examples, ..self }
    }

    const fn legacy(self) -> Self {
        KeywordInfo {
            stability: Stability::Legacy,
            ..self
        }
    }
}
