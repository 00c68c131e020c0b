//! Operator-precedence resolution
//!
//! Entry point is [`resolve_operators`], run on a nested token list:
//!
//!     1. recurse into every group's fields (languages with recursive
//!        resolution only)
//!     2. compact atom runs into temporary groups
//!     3. sweep each level of the operator table, tightest first, in the
//!        level's direction
//!
//! Temporary groups survive resolution as operands; callers that do not
//! consume them splice them back with [`expand_temporaries`].

pub mod compaction;
pub mod resolver;

use crate::lexcore::error::ParseError;
use crate::lexcore::settings::LanguageSettings;
use crate::lexcore::token::Token;

pub use compaction::{compact_temporaries, expand_temporaries};
pub use resolver::{resolve_left_to_right, resolve_right_to_left};

pub fn resolve_operators(tokens: Vec<Token>, settings: &LanguageSettings) -> Result<Vec<Token>, ParseError> {
    let tokens = if settings.recursive_operators() {
        tokens
            .into_iter()
            .map(|token| match token {
                Token::Group(group) => group
                    .try_map_fields(|field| resolve_operators(field, settings))
                    .map(Token::Group),
                other => Ok(other),
            })
            .collect::<Result<Vec<_>, _>>()?
    } else {
        tokens
    };

    let table = settings.operators();
    let mut tokens = compact_temporaries(tokens, settings.compaction())?;

    for (index, level) in table.levels().iter().enumerate() {
        tokens = if level.is_left_to_right() {
            resolve_left_to_right(tokens, table, index)?
        } else {
            resolve_right_to_left(tokens, table, index)?
        };
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexcore::languages;
    use crate::lexcore::lexing::parse_expression;
    use crate::lexcore::settings::OperatorKinds;
    use crate::lexcore::token::dump_tokens;
    use rstest::rstest;

    fn js(text: &str) -> String {
        dump_tokens(&parse_expression(text, &languages::JS).unwrap())
    }

    fn js_error(text: &str) -> ParseError {
        parse_expression(text, &languages::JS).unwrap_err()
    }

    /// Tiny language with two binary operators at chosen precedences.
    fn two_level(first: u32, second: u32) -> LanguageSettings {
        LanguageSettings::builder("two-level")
            .symbols(r"[+*]")
            .operator(first, "+", OperatorKinds::BIN | OperatorKinds::L2R)
            .operator(second, "*", OperatorKinds::BIN | OperatorKinds::L2R)
            .build()
            .unwrap()
    }

    #[test]
    fn test_unary_minus() {
        insta::assert_snapshot!(js("-1"), @r"
        Operator pre-
          LiteralInt(1)
        ");
    }

    #[test]
    fn test_binary_minus_after_unary_level() {
        insta::assert_snapshot!(js("2-1"), @r"
        Operator bin-
          LiteralInt(2)
          LiteralInt(1)
        ");
    }

    #[test]
    fn test_mixed_unary_and_binary() {
        insta::assert_snapshot!(js("a - -b * c"), @r"
        Operator bin-
          Word(a)
          Operator bin*
            Operator pre-
              Word(b)
            Word(c)
        ");
    }

    #[test]
    fn test_left_associative() {
        insta::assert_snapshot!(js("a - b - c"), @r"
        Operator bin-
          Operator bin-
            Word(a)
            Word(b)
          Word(c)
        ");
    }

    #[test]
    fn test_right_associative_assignment() {
        insta::assert_snapshot!(js("a = b = c"), @r"
        Operator bin=
          Word(a)
          Operator bin=
            Word(b)
            Word(c)
        ");
    }

    #[test]
    fn test_ternary() {
        insta::assert_snapshot!(js("x = c ? a : b"), @r"
        Operator bin=
          Word(x)
          Operator ter? :
            Word(c)
            Word(a)
            Word(b)
        ");
    }

    #[test]
    fn test_postfix_and_prefix_increment() {
        insta::assert_snapshot!(js("i++ + ++j"), @r"
        Operator bin+
          Operator post++
            Word(i)
          Operator pre++
            Word(j)
        ");
    }

    #[test]
    fn test_keyword_prefix() {
        insta::assert_snapshot!(js("typeof x === 'y'"), @r#"
        Operator bin===
          Operator pretypeof
            Word(x)
          LiteralString("y")
        "#);
    }

    #[test]
    fn test_temporaries_are_operands() {
        insta::assert_snapshot!(js("a.b(1) * 2"), @r"
        Operator bin*
          TmpGroup tmp
            Word(a)
            Symbol .
            Word(b)
            ParensGroup single
              LiteralInt(1)
          LiteralInt(2)
        ");
    }

    #[test]
    fn test_groups_are_not_entered_without_recursion() {
        insta::assert_snapshot!(js("(1+2)*3"), @r"
        Operator bin*
          ParensGroup single
            LiteralInt(1)
            Symbol +
            LiteralInt(2)
          LiteralInt(3)
        ");
    }

    #[test]
    fn test_recursive_resolution_enters_groups() {
        let tokens = parse_expression("(a + b) * c", &languages::MATH).unwrap();
        insta::assert_snapshot!(dump_tokens(&tokens), @r"
        Operator bin*
          ParensGroup single
            Operator bin+
              Word(a)
              Word(b)
          Word(c)
        ");
    }

    #[test]
    fn test_postfix_not_allowed() {
        let err = js_error("a !");
        assert_eq!(err.message(), "`!` is not a post-unary operator");
        let span = err.span().unwrap();
        assert_eq!((span.start(), span.stop()), (2, 3));
    }

    #[test]
    fn test_binary_not_allowed() {
        let err = js_error("a ~ b");
        assert_eq!(err.message(), "`~` is not a binary operator");
    }

    #[test]
    fn test_singular_not_allowed() {
        let err = js_error("*");
        assert_eq!(err.message(), "`*` is not a singular operator");
    }

    #[rstest(first, second, expected,
        case(20, 10, "Operator bin*\n  Operator bin+\n    Word(a)\n    Word(b)\n  Word(c)\n"),
        case(10, 20, "Operator bin+\n  Word(a)\n  Operator bin*\n    Word(b)\n    Word(c)\n")
    )]
    fn test_precedence_decides_shape(first: u32, second: u32, expected: &str) {
        let settings = two_level(first, second);
        let tokens = parse_expression("a + b * c", &settings).unwrap();
        assert_eq!(dump_tokens(&tokens), expected);
    }

    #[test]
    fn test_every_collapse_shrinks() {
        let settings = two_level(20, 10);
        let tokens = parse_expression("a + b * c + d", &settings).unwrap();
        assert_eq!(tokens.len(), 1);
    }

    #[test]
    fn test_expand_temporaries_after_resolution() {
        let tokens = parse_expression("a.b", &languages::JS).unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(expand_temporaries(tokens).len(), 3);
    }
}
