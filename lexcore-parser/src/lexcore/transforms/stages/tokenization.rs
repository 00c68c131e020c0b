//! Masking and flat tokenization stages

use std::sync::Arc;

use crate::lexcore::error::ParseError;
use crate::lexcore::lexing::Parser;
use crate::lexcore::settings::LanguageSettings;
use crate::lexcore::source::Source;
use crate::lexcore::token::Token;
use crate::lexcore::transforms::Runnable;

/// Runs the quoted-region masker over a whole source.
///
/// The resulting [`Parser`] carries the mask; unmatched quotes and comments
/// fail here.
pub struct Masking {
    settings: &'static LanguageSettings,
}

impl Masking {
    pub fn new(settings: &'static LanguageSettings) -> Self {
        Masking { settings }
    }
}

impl Runnable<Arc<Source>, Parser<'static>> for Masking {
    fn run(&self, input: Arc<Source>) -> Result<Parser<'static>, ParseError> {
        Parser::new(input, self.settings)
    }
}

/// Runs the remaining passes of a masked parser.
#[derive(Default)]
pub struct FlatTokenization;

impl FlatTokenization {
    pub fn new() -> Self {
        FlatTokenization
    }
}

impl Runnable<Parser<'static>, Vec<Token>> for FlatTokenization {
    fn run(&self, mut input: Parser<'static>) -> Result<Vec<Token>, ParseError> {
        input.tokenize_flat()
    }
}
