//! Literal shapes shared by the language classifiers
//!
//! The word-or-literal pattern of a language only finds candidate runs; the
//! classifier then decides what a run is. The checks and parsers below are
//! the building blocks those classifiers share:
//!
//!     - integers, hex integers, floats with an optional CSS-style unit
//!     - `#rgb`, `#rgba`, `#rrggbb` and `#rrggbbaa` colors
//!     - simple words (letters only), which is also what makes a keyword
//!       symbol count as an operand

use once_cell::sync::Lazy;
use regex::Regex;

use super::error::ParseError;
use super::span::Span;
use super::token::Token;

static INT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?[0-9]+$").unwrap());
static HEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^0x[0-9a-fA-F]+$").unwrap());
static FLOAT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?[0-9]+(\.[0-9]+)?(e[\-+]?[0-9]+)?([a-zA-Z%]*)?$").unwrap());
static PLAIN_FLOAT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?[0-9]+(\.[0-9]+)?(e[\-+]?[0-9]+)?$").unwrap());
static SIMPLE_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z]*$").unwrap());
static COLOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^#([0-9a-fA-F]{8}|[0-9a-fA-F]{6}|[0-9a-fA-F]{4}|[0-9a-fA-F]{3})$").unwrap()
});

/// Units a float may carry. When several match, the later (longer) wins.
pub const FLOAT_UNITS: &[&str] = &[
    "n", "s", "Q", "%", "cm", "mm", "in", "pc", "pt", "px", "em", "ch", "fr", "lh", "vw", "vh",
    "deg", "rem", "vmin", "vmax",
];

pub fn is_int(s: &str) -> bool {
    INT.is_match(s)
}

pub fn is_hex(s: &str) -> bool {
    HEX.is_match(s)
}

/// Float, optionally followed by a unit.
pub fn is_float(s: &str) -> bool {
    FLOAT.is_match(s)
}

pub fn is_plain_float(s: &str) -> bool {
    PLAIN_FLOAT.is_match(s)
}

pub fn is_simple_word(s: &str) -> bool {
    SIMPLE_WORD.is_match(s)
}

pub fn is_color(s: &str) -> bool {
    COLOR.is_match(s)
}

pub fn is_bool(s: &str) -> bool {
    s == "true" || s == "false"
}

pub fn parse_int(s: &str, span: Span) -> Result<Token, ParseError> {
    let value = s.parse::<i64>().map_err(|_| ParseError::InvalidLiteral {
        message: format!("integer `{}` out of range", s),
        span: span.clone(),
    })?;
    Ok(Token::LiteralInt { value, span })
}

pub fn parse_hex(s: &str, span: Span) -> Result<Token, ParseError> {
    let digits = s.trim_start_matches("0x");
    let value = i64::from_str_radix(digits, 16).map_err(|_| ParseError::InvalidLiteral {
        message: format!("hex integer `{}` out of range", s),
        span: span.clone(),
    })?;
    Ok(Token::LiteralInt { value, span })
}

/// Split a trailing unit off a float and parse the number.
pub fn parse_float(s: &str, span: Span) -> Result<Token, ParseError> {
    let mut unit = "";
    if !s.ends_with(|c: char| c.is_ascii_digit()) {
        for candidate in FLOAT_UNITS {
            if s.ends_with(candidate) {
                unit = candidate;
            }
        }
    }

    let number = &s[..s.len() - unit.len()];
    let value = number.parse::<f64>().map_err(|_| ParseError::InvalidLiteral {
        message: format!("invalid float `{}`", s),
        span: span.clone(),
    })?;

    Ok(Token::LiteralFloat {
        value,
        unit: unit.to_string(),
        span,
    })
}

/// `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`; alpha defaults to 255.
pub fn parse_color(s: &str, span: Span) -> Result<Token, ParseError> {
    let digits: Vec<u8> = s
        .trim_start_matches('#')
        .chars()
        .filter_map(|c| c.to_digit(16).map(|d| d as u8))
        .collect();

    let rgba = match digits.len() {
        3 => [digits[0] * 17, digits[1] * 17, digits[2] * 17, 255],
        4 => [digits[0] * 17, digits[1] * 17, digits[2] * 17, digits[3] * 17],
        6 => [
            digits[0] * 16 + digits[1],
            digits[2] * 16 + digits[3],
            digits[4] * 16 + digits[5],
            255,
        ],
        8 => [
            digits[0] * 16 + digits[1],
            digits[2] * 16 + digits[3],
            digits[4] * 16 + digits[5],
            digits[6] * 16 + digits[7],
        ],
        _ => {
            return Err(ParseError::InvalidLiteral {
                message: format!("invalid color `{}`", s),
                span,
            })
        }
    };

    Ok(Token::LiteralColor { rgba, span })
}
