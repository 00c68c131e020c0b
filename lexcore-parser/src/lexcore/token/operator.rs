//! Resolved operator nodes

use serde::Serialize;
use std::fmt;

use super::core::Token;
use crate::lexcore::span::Span;

/// How an operator sits between its operands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Fixity {
    /// No operands (e.g. a lone `:` in a template)
    Singular,
    Prefix,
    Postfix,
    Binary,
    Ternary,
}

impl Fixity {
    /// Short prefix used in operator names: `bin+`, `pre-`.
    pub fn prefix(&self) -> &'static str {
        match self {
            Fixity::Singular => "sing",
            Fixity::Prefix => "pre",
            Fixity::Postfix => "post",
            Fixity::Binary => "bin",
            Fixity::Ternary => "ter",
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            Fixity::Singular => "singular",
            Fixity::Prefix => "pre-unary",
            Fixity::Postfix => "post-unary",
            Fixity::Binary => "binary",
            Fixity::Ternary => "ternary",
        }
    }

    pub fn arity(&self) -> usize {
        match self {
            Fixity::Singular => 0,
            Fixity::Prefix | Fixity::Postfix => 1,
            Fixity::Binary => 2,
            Fixity::Ternary => 3,
        }
    }
}

impl fmt::Display for Fixity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.describe())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Operator {
    fixity: Fixity,
    /// Symbol text; ternaries name both parts, `? :`
    symbol: String,
    args: Vec<Token>,
    #[serde(skip)]
    symbol_span: Span,
    span: Span,
}

impl Operator {
    /// Wrap `args` under `symbol`. The node spans the symbol and all operands.
    pub fn new(fixity: Fixity, symbol: impl Into<String>, symbol_span: Span, args: Vec<Token>) -> Self {
        let span = args
            .iter()
            .fold(symbol_span.clone(), |acc, arg| acc.merge(arg.span()));

        Self {
            fixity,
            symbol: symbol.into(),
            args,
            symbol_span,
            span,
        }
    }

    /// `sing:`, `pre-`, `post++`, `bin+`, `ter? :`
    pub fn name(&self) -> String {
        format!("{}{}", self.fixity.prefix(), self.symbol)
    }

    pub fn fixity(&self) -> Fixity {
        self.fixity
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn args(&self) -> &[Token] {
        &self.args
    }

    pub fn into_args(self) -> Vec<Token> {
        self.args
    }

    pub fn symbol_span(&self) -> &Span {
        &self.symbol_span
    }

    pub fn span(&self) -> &Span {
        &self.span
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexcore::source::Source;

    #[test]
    fn test_name_and_span() {
        let source = Source::anonymous("a + b");
        let a = Token::word("a", Span::new(source.clone(), 0, 1));
        let b = Token::word("b", Span::new(source.clone(), 4, 5));
        let op = Operator::new(Fixity::Binary, "+", Span::new(source, 2, 3), vec![a, b]);

        assert_eq!(op.name(), "bin+");
        assert_eq!((op.span().start(), op.span().stop()), (0, 5));
        assert_eq!((op.symbol_span().start(), op.symbol_span().stop()), (2, 3));
        assert_eq!(op.args().len(), op.fixity().arity());
    }

    #[test]
    fn test_ternary_name() {
        let source = Source::anonymous("?");
        let op = Operator::new(Fixity::Ternary, "? :", Span::new(source, 0, 1), vec![]);
        assert_eq!(op.name(), "ter? :");
    }
}
