//! JavaScript-flavoured script language
//!
//! Backtick strings are formulas: their `${...}` holes are tokenized by a
//! sub-parser over the same source, the literal parts become string segments
//! of a template group.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::lexcore::error::ParseError;
use crate::lexcore::lexing::Parser;
use crate::lexcore::patterns;
use crate::lexcore::settings::quoting;
use crate::lexcore::settings::{Compaction, LanguageSettings, OperatorKinds};
use crate::lexcore::span::Span;
use crate::lexcore::token::{Group, SpecialNumber, Symbol, Token};

const WORDS: &str = r"([A-Za-z_$]+[0-9A-Za-z_]*)|(0x[0-9a-fA-F]+)|([0-9]+(\.[0-9]+)?(e[\-+]?[0-9]+)?)";

const SYMBOLS: &str = concat!(
    r"([>][>][>][=])|([=!][=][=])|([*][*][=])|([<][<][=])|([>][>][=])|([>][>][>])|",
    r"([<>=!:+\-*/%&|^][=])|([*][*])|([&][&])|([<][<])|([>=][>])|([|][|])|([+][+])|",
    r"([:][:])|([\-][\-])|([!<>=:,;{}()\[\]+*/\-?%.&|^~])"
);

static JS_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([a-zA-Z_][0-9A-Za-z_]*|\$)$").unwrap());

/// Words the classifier turns into operator symbols.
const KEYWORD_OPERATORS: &[&str] = &["in", "instanceof", "typeof", "await", "new"];

fn classify(text: &str, span: Span) -> Result<Token, ParseError> {
    if patterns::is_hex(text) {
        patterns::parse_hex(text, span)
    } else if patterns::is_int(text) {
        patterns::parse_int(text, span)
    } else if patterns::is_float(text) {
        patterns::parse_float(text, span)
    } else if text == "NaN" {
        Ok(Token::SpecialNumber {
            value: SpecialNumber::NaN,
            span,
        })
    } else if text == "Infinity" {
        Ok(Token::SpecialNumber {
            value: SpecialNumber::Infinity,
            span,
        })
    } else if patterns::is_bool(text) {
        Ok(Token::LiteralBool {
            value: text == "true",
            span,
        })
    } else if text == "null" {
        Ok(Token::LiteralNull { span })
    } else if KEYWORD_OPERATORS.contains(&text) {
        Ok(Token::Symbol(Symbol::keyword(text, span)))
    } else if JS_WORD.is_match(text) {
        Ok(Token::word(text, span))
    } else {
        Err(ParseError::Unparseable {
            text: text.to_string(),
            span,
        })
    }
}

/// Index of the `}` closing a `${` hole whose body starts at `from`. Braces
/// inside quoted strings of the hole do not count.
fn find_hole_stop(chars: &[char], from: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (i, &c) in chars.iter().enumerate().skip(from) {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '\'' | '"' => quote = Some(c),
            '{' => depth += 1,
            '}' if depth == 0 => return Some(i),
            '}' => depth -= 1,
            _ => {}
        }
    }
    None
}

fn find_hole_start(chars: &[char], from: usize) -> Option<usize> {
    (from..chars.len().saturating_sub(1)).find(|&i| chars[i] == '$' && chars[i + 1] == '{')
}

/// Split a backtick interior into a template group.
///
/// The leading literal segment is always present (possibly empty), the
/// trailing one only when it has content.
pub fn tokenize_template(settings: &LanguageSettings, span: &Span) -> Result<Vec<Token>, ParseError> {
    let source = span.source();
    let base = span.start();
    let chars = &source.chars()[base..span.stop()];

    let segment = |start: usize, stop: usize| Token::LiteralString {
        value: chars[start..stop].iter().collect(),
        span: span.with_range(base + start, base + stop),
    };

    let mut fields: Vec<Vec<Token>> = Vec::new();
    let mut rest = 0;

    while let Some(open) = find_hole_start(chars, rest) {
        fields.push(vec![segment(rest, open)]);

        let Some(close) = find_hole_stop(chars, open + 2) else {
            return Err(ParseError::Formula {
                message: "string template not closed".to_string(),
                span: span.with_range(base + open, base + open + 2),
            });
        };

        let mut hole = Parser::window(source.clone(), base + open + 2, base + close, settings)?;
        fields.push(hole.tokenize()?);
        rest = close + 1;
    }

    if fields.is_empty() || rest < chars.len() {
        fields.push(vec![segment(rest, chars.len())]);
    }

    Ok(vec![Token::Group(Group::template(fields, span.clone()))])
}

fn build() -> LanguageSettings {
    LanguageSettings::builder("js")
        .quote(quoting::single_quotes())
        .quote(quoting::double_quotes())
        .quote(quoting::backtick_formula())
        .quote(quoting::single_line_comment())
        .quote(quoting::js_multiline_comment())
        .words(WORDS, classify)
        .symbols(SYMBOLS)
        .operator(19, "new", OperatorKinds::PRE)
        .operators(18, &["++", "--"], OperatorKinds::POST)
        .operators(
            17,
            &["!", "-", "~", "+", "++", "--", "typeof", "await"],
            OperatorKinds::PRE,
        )
        .operator(16, "**", OperatorKinds::BIN)
        .operators(15, &["/", "*", "%"], OperatorKinds::BIN | OperatorKinds::L2R)
        .operators(14, &["+", "-"], OperatorKinds::BIN | OperatorKinds::L2R)
        .operators(13, &["<<", ">>", ">>>"], OperatorKinds::BIN | OperatorKinds::L2R)
        .operators(
            12,
            &["<", "<=", ">", ">=", "in", "instanceof"],
            OperatorKinds::BIN | OperatorKinds::L2R,
        )
        .operators(11, &["==", "!=", "===", "!=="], OperatorKinds::BIN | OperatorKinds::L2R)
        .operator(10, "&", OperatorKinds::BIN | OperatorKinds::L2R)
        .operator(9, "^", OperatorKinds::BIN | OperatorKinds::L2R)
        .operator(8, "|", OperatorKinds::BIN | OperatorKinds::L2R)
        .operator(6, "&&", OperatorKinds::BIN | OperatorKinds::L2R)
        .operator(5, "||", OperatorKinds::BIN | OperatorKinds::L2R)
        .operator(4, "? :", OperatorKinds::TER | OperatorKinds::L2R)
        .operators(
            3,
            &[
                "=", "+=", "-=", "*=", "/=", "%=", "**=", "<<=", ">>=", ">>>=", "&=", "|=", "^=",
            ],
            OperatorKinds::BIN,
        )
        .compaction(Compaction {
            words: true,
            periods: true,
            arrows: true,
            double_colons: true,
        })
        .angled_groups(true)
        .build()
        .unwrap_or_else(|err| panic!("invalid js table: {}", err))
        .bind_formulas(tokenize_template)
}

pub static JS: Lazy<LanguageSettings> = Lazy::new(build);
