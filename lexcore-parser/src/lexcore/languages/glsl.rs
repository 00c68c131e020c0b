//! GLSL shader expressions

use once_cell::sync::Lazy;
use regex::Regex;

use crate::lexcore::error::ParseError;
use crate::lexcore::patterns;
use crate::lexcore::settings::quoting;
use crate::lexcore::settings::{Compaction, LanguageSettings, OperatorKinds};
use crate::lexcore::span::Span;
use crate::lexcore::token::Token;

const WORDS: &str = r"([A-Za-z_$]+[0-9A-Za-z_]*)|(0x[0-9a-fA-F]+)|([0-9]+(\.[0-9]+)?(e[\-+]?[0-9]+)?)";

const SYMBOLS: &str = r"([+][+])|([-][-])|([&][&])|([|][|])|([<>!=*+\-][=])|([#:!<>;{}()\[\]/\-.+*=,])";

static GLSL_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z_][0-9A-Za-z_]*$").unwrap());

fn classify(text: &str, span: Span) -> Result<Token, ParseError> {
    if patterns::is_hex(text) {
        patterns::parse_hex(text, span)
    } else if patterns::is_int(text) {
        patterns::parse_int(text, span)
    } else if patterns::is_float(text) {
        patterns::parse_float(text, span)
    } else if patterns::is_bool(text) {
        Ok(Token::LiteralBool {
            value: text == "true",
            span,
        })
    } else if GLSL_WORD.is_match(text) {
        Ok(Token::word(text, span))
    } else {
        Err(ParseError::Unparseable {
            text: text.to_string(),
            span,
        })
    }
}

/// Backticks are masked so they cannot leak into symbols, but shaders have
/// no interpolation.
fn reject_formula(_: &LanguageSettings, span: &Span) -> Result<Vec<Token>, ParseError> {
    Err(ParseError::Formula {
        message: "can't have backtick formula in glsl".to_string(),
        span: span.clone(),
    })
}

fn build() -> LanguageSettings {
    LanguageSettings::builder("glsl")
        .quote(quoting::single_quotes())
        .quote(quoting::double_quotes())
        .quote(quoting::backtick_formula())
        .quote(quoting::single_line_comment())
        .quote(quoting::js_multiline_comment())
        .words(WORDS, classify)
        .symbols(SYMBOLS)
        .operators(17, &["!", "-", "+"], OperatorKinds::PRE)
        .operators(15, &["/", "*", "%"], OperatorKinds::BIN | OperatorKinds::L2R)
        .operators(14, &["+", "-"], OperatorKinds::BIN | OperatorKinds::L2R)
        .operators(12, &["<", "<=", ">", ">="], OperatorKinds::BIN | OperatorKinds::L2R)
        .operators(11, &["==", "!="], OperatorKinds::BIN | OperatorKinds::L2R)
        .operator(6, "&&", OperatorKinds::BIN | OperatorKinds::L2R)
        .operator(5, "||", OperatorKinds::BIN | OperatorKinds::L2R)
        .compaction(Compaction {
            words: true,
            periods: true,
            ..Compaction::default()
        })
        .build()
        .unwrap_or_else(|err| panic!("invalid glsl table: {}", err))
        .bind_formulas(reject_formula)
}

pub static GLSL: Lazy<LanguageSettings> = Lazy::new(build);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexcore::lexing::{parse_expression, tokenize};
    use crate::lexcore::token::dump_tokens;

    #[test]
    fn test_swizzle_is_one_operand() {
        let tokens = parse_expression("color.rgb * 0.5 + offset", &GLSL).unwrap();
        insta::assert_snapshot!(dump_tokens(&tokens), @r"
        Operator bin+
          Operator bin*
            TmpGroup tmp
              Word(color)
              Symbol .
              Word(rgb)
            LiteralFloat(0.5)
          Word(offset)
        ");
    }

    #[test]
    fn test_preprocessor_hash_is_a_symbol() {
        let tokens = tokenize("#define N 4", &GLSL).unwrap();
        assert!(tokens[0].is_symbol("#"));
        assert_eq!(tokens.len(), 4);
    }

    #[test]
    fn test_backtick_rejected() {
        let err = tokenize("x = `y`", &GLSL).unwrap_err();
        assert_eq!(err.message(), "can't have backtick formula in glsl");
        assert_eq!(err.span().unwrap().content(), "y");
    }

    #[test]
    fn test_dollar_words_are_unparseable() {
        let err = tokenize("$x", &GLSL).unwrap_err();
        assert!(matches!(err, ParseError::Unparseable { .. }));
    }
}
