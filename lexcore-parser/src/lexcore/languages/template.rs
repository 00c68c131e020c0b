//! Indentation-sensitive markup template language
//!
//! Significant whitespace, colors, floats with CSS units, and operators
//! resolved inside every group. All three quote styles are plain strings.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::lexcore::error::ParseError;
use crate::lexcore::patterns;
use crate::lexcore::settings::quoting;
use crate::lexcore::settings::{Compaction, LanguageSettings, OperatorKinds};
use crate::lexcore::span::Span;
use crate::lexcore::token::Token;

const WORDS: &str = concat!(
    r"([#][0-9a-fA-F]{8})|([#][0-9a-fA-F]{6})|([#][0-9a-fA-F]{4})|([#][0-9a-fA-F]{3})|",
    r"([0-9A-Za-z_]+[0-9A-Za-z_\-%.]*)"
);

const SYMBOLS: &str = concat!(
    r"([=][=][=])|([|*~<>=!:^][=])|([&][&])|([|][|])|([!][!])|([?][?])|",
    r"([!<>=:,;{}()\[\]+*/\-?$@.#])"
);

static TEMPLATE_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-zA-Z_][0-9A-Za-z_\-.]*\b").unwrap());

fn classify(text: &str, span: Span) -> Result<Token, ParseError> {
    if patterns::is_color(text) {
        patterns::parse_color(text, span)
    } else if patterns::is_int(text) {
        patterns::parse_int(text, span)
    } else if patterns::is_float(text) {
        patterns::parse_float(text, span)
    } else if patterns::is_bool(text) {
        Ok(Token::LiteralBool {
            value: text == "true",
            span,
        })
    } else if text == "null" {
        Ok(Token::LiteralNull { span })
    } else if TEMPLATE_WORD.is_match(text) {
        Ok(Token::word(text, span))
    } else {
        Err(ParseError::Unparseable {
            text: text.to_string(),
            span,
        })
    }
}

fn build() -> LanguageSettings {
    LanguageSettings::builder("template")
        .quote(quoting::single_quotes())
        .quote(quoting::double_quotes())
        .quote(quoting::backtick_string())
        .quote(quoting::single_line_comment())
        .quote(quoting::js_multiline_comment())
        .words(WORDS, classify)
        .symbols(SYMBOLS)
        .operator(17, "$", OperatorKinds::PRE)
        .operators(16, &["-", "!"], OperatorKinds::PRE)
        .operators(14, &["/", "*"], OperatorKinds::BIN | OperatorKinds::L2R)
        .operators(13, &["-", "+"], OperatorKinds::BIN | OperatorKinds::L2R)
        .operators(11, &["<", "<=", ">", ">="], OperatorKinds::BIN | OperatorKinds::L2R)
        .operators(10, &["!=", "==", "==="], OperatorKinds::BIN | OperatorKinds::L2R)
        .operator(8, "&&", OperatorKinds::BIN | OperatorKinds::L2R)
        .operator(7, "||", OperatorKinds::BIN | OperatorKinds::L2R)
        .operator(6, "!!", OperatorKinds::BIN | OperatorKinds::L2R)
        .operator(5, "??", OperatorKinds::BIN | OperatorKinds::L2R)
        .operator(4, ":=", OperatorKinds::BIN)
        .operator(3, "?", OperatorKinds::BIN)
        .operator(
            2,
            ":",
            OperatorKinds::SING | OperatorKinds::PRE | OperatorKinds::POST | OperatorKinds::BIN,
        )
        .operator(1, "=", OperatorKinds::BIN)
        .compaction(Compaction {
            words: true,
            periods: true,
            ..Compaction::default()
        })
        .recursive_operators(true)
        .significant_whitespace(true)
        .build()
        .unwrap_or_else(|err| panic!("invalid template table: {}", err))
}

pub static TEMPLATE: Lazy<LanguageSettings> = Lazy::new(build);
