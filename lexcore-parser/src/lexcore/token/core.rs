//! The token enum and its leaf payloads

use serde::Serialize;
use std::fmt;

use super::group::{Group, GroupKind};
use super::operator::Operator;
use crate::lexcore::patterns;
use crate::lexcore::span::Span;

/// A symbol matched by a language's symbol pattern, or a keyword promoted to
/// one by its classifier (`typeof`, `new`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Symbol {
    pub value: String,
    /// Produced by a classifier from a word (`in`, `typeof`)
    pub keyword: bool,
    /// Synthesized closer of an angled group split off a `>>` or `>>>`
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub dummy: bool,
    pub span: Span,
}

impl Symbol {
    pub fn new(value: impl Into<String>, span: Span) -> Self {
        Self {
            value: value.into(),
            keyword: false,
            dummy: false,
            span,
        }
    }

    pub fn keyword(value: impl Into<String>, span: Span) -> Self {
        Self {
            keyword: true,
            ..Self::new(value, span)
        }
    }

    pub fn dummy(value: impl Into<String>, span: Span) -> Self {
        Self {
            dummy: true,
            ..Self::new(value, span)
        }
    }

    /// Word-like symbols (`in`, `new`) count as operands.
    pub fn is_word(&self) -> bool {
        patterns::is_simple_word(&self.value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SpecialNumber {
    NaN,
    Infinity,
}

impl fmt::Display for SpecialNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpecialNumber::NaN => write!(f, "NaN"),
            SpecialNumber::Infinity => write!(f, "Infinity"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum Token {
    Word {
        value: String,
        span: Span,
    },
    Symbol(Symbol),
    LiteralBool {
        value: bool,
        span: Span,
    },
    LiteralInt {
        value: i64,
        span: Span,
    },
    LiteralFloat {
        value: f64,
        unit: String,
        span: Span,
    },
    LiteralString {
        value: String,
        span: Span,
    },
    LiteralColor {
        rgba: [u8; 4],
        span: Span,
    },
    LiteralNull {
        span: Span,
    },
    SpecialNumber {
        value: SpecialNumber,
        span: Span,
    },
    /// Leading whitespace of a line, in units (space 1, tab 2)
    Indent {
        units: usize,
        span: Span,
    },
    NewLine {
        span: Span,
    },
    Group(Group),
    Operator(Operator),
}

impl Token {
    pub fn word(value: impl Into<String>, span: Span) -> Token {
        Token::Word {
            value: value.into(),
            span,
        }
    }

    pub fn symbol(value: impl Into<String>, span: Span) -> Token {
        Token::Symbol(Symbol::new(value, span))
    }

    pub fn span(&self) -> &Span {
        match self {
            Token::Word { span, .. }
            | Token::LiteralBool { span, .. }
            | Token::LiteralInt { span, .. }
            | Token::LiteralFloat { span, .. }
            | Token::LiteralString { span, .. }
            | Token::LiteralColor { span, .. }
            | Token::LiteralNull { span }
            | Token::SpecialNumber { span, .. }
            | Token::Indent { span, .. }
            | Token::NewLine { span } => span,
            Token::Symbol(symbol) => &symbol.span,
            Token::Group(group) => group.span(),
            Token::Operator(op) => op.span(),
        }
    }

    pub fn as_symbol(&self) -> Option<&Symbol> {
        match self {
            Token::Symbol(symbol) => Some(symbol),
            _ => None,
        }
    }

    /// Whether this is the symbol `value`.
    pub fn is_symbol(&self, value: &str) -> bool {
        self.as_symbol().is_some_and(|s| s.value == value)
    }

    pub fn as_group(&self) -> Option<&Group> {
        match self {
            Token::Group(group) => Some(group),
            _ => None,
        }
    }

    pub fn is_group_of(&self, kind: GroupKind) -> bool {
        self.as_group().is_some_and(|g| g.kind() == kind)
    }

    pub fn as_operator(&self) -> Option<&Operator> {
        match self {
            Token::Operator(op) => Some(op),
            _ => None,
        }
    }

    pub fn is_word(&self) -> bool {
        matches!(self, Token::Word { .. })
    }

    pub fn is_whitespace(&self) -> bool {
        matches!(self, Token::Indent { .. } | Token::NewLine { .. })
    }

    /// Whether the token can be an operand: anything but a non-word symbol
    /// or an indentation token.
    pub fn is_operable(&self) -> bool {
        match self {
            Token::Symbol(symbol) => symbol.is_word(),
            Token::Indent { .. } | Token::NewLine { .. } => false,
            _ => true,
        }
    }
}
