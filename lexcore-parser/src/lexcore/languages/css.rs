//! CSS selectors
//!
//! Only tokenized and nested; the operator table is empty and no atoms are
//! compacted, so `>` and `+` stay combinator symbols.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::lexcore::error::ParseError;
use crate::lexcore::settings::quoting;
use crate::lexcore::settings::LanguageSettings;
use crate::lexcore::span::Span;
use crate::lexcore::token::Token;

const WORDS: &str = r"[a-zA-Z0-9\-#._]+\b";

const SYMBOLS: &str = r"([:][:])|([*|$~^][=])|([:+>~()\[\]*,=])";

static CSS_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(WORDS).unwrap());

fn classify(text: &str, span: Span) -> Result<Token, ParseError> {
    if CSS_WORD.is_match(text) {
        Ok(Token::word(text, span))
    } else {
        Err(ParseError::Unparseable {
            text: text.to_string(),
            span,
        })
    }
}

fn build() -> LanguageSettings {
    LanguageSettings::builder("css")
        .quote(quoting::single_quotes())
        .quote(quoting::double_quotes())
        .words(WORDS, classify)
        .symbols(SYMBOLS)
        .build()
        .unwrap_or_else(|err| panic!("invalid css table: {}", err))
}

pub static CSS: Lazy<LanguageSettings> = Lazy::new(build);
