//! Math notation: sub/superscripts, relations and arrows

use once_cell::sync::Lazy;
use regex::Regex;

use crate::lexcore::error::ParseError;
use crate::lexcore::patterns;
use crate::lexcore::settings::quoting;
use crate::lexcore::settings::{Compaction, LanguageSettings, OperatorKinds};
use crate::lexcore::span::Span;
use crate::lexcore::token::Token;

const WORDS: &str = r"([A-Za-z]+[A-Za-z]*)|([0-9]+[0-9\-.]*[a-zA-Z]*)";

const SYMBOLS: &str = r"([>][>])|([<][<])|([/][/])|([-=][>])|([!<>=~]?[=])|([{}()\[\]+\-<>*/.^_=,])";

static MATH_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-zA-Z_][0-9A-Za-z_\-.:]*\b").unwrap());

fn classify(text: &str, span: Span) -> Result<Token, ParseError> {
    if patterns::is_int(text) {
        patterns::parse_int(text, span)
    } else if patterns::is_plain_float(text) {
        patterns::parse_float(text, span)
    } else if MATH_WORD.is_match(text) {
        Ok(Token::word(text, span))
    } else {
        Err(ParseError::Unparseable {
            text: text.to_string(),
            span,
        })
    }
}

fn build() -> LanguageSettings {
    LanguageSettings::builder("math")
        .quote(quoting::single_line_comment())
        .quote(quoting::js_multiline_comment())
        .quote(quoting::xml_comment())
        .words(WORDS, classify)
        .symbols(SYMBOLS)
        .operator(17, "-", OperatorKinds::PRE)
        .operators(16, &["^", "_"], OperatorKinds::BIN | OperatorKinds::L2R)
        .operators(14, &["/", "*", "."], OperatorKinds::BIN | OperatorKinds::L2R)
        .operators(13, &["-", "+"], OperatorKinds::BIN | OperatorKinds::L2R)
        .operators(
            11,
            &["<<", "<", "<=", ">>", ">", ">="],
            OperatorKinds::BIN | OperatorKinds::L2R,
        )
        .operators(10, &["!=", "==", "~="], OperatorKinds::BIN)
        .operator(5, "=", OperatorKinds::BIN)
        .operators(4, &["->", "=>"], OperatorKinds::BIN)
        .compaction(Compaction {
            words: true,
            ..Compaction::default()
        })
        .recursive_operators(true)
        .build()
        .unwrap_or_else(|err| panic!("invalid math table: {}", err))
}

pub static MATH: Lazy<LanguageSettings> = Lazy::new(build);
