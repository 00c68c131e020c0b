//! Stages that reshape a token list

use crate::lexcore::error::ParseError;
use crate::lexcore::nesting::nest_groups;
use crate::lexcore::operators::{expand_temporaries, resolve_operators};
use crate::lexcore::settings::LanguageSettings;
use crate::lexcore::token::Token;
use crate::lexcore::transforms::Runnable;

/// Pairs brackets into groups.
pub struct GroupNesting {
    angled: bool,
}

impl GroupNesting {
    pub fn new(angled: bool) -> Self {
        GroupNesting { angled }
    }

    pub fn for_language(settings: &LanguageSettings) -> Self {
        Self::new(settings.angled_groups())
    }
}

impl Runnable<Vec<Token>, Vec<Token>> for GroupNesting {
    fn run(&self, input: Vec<Token>) -> Result<Vec<Token>, ParseError> {
        nest_groups(input, self.angled)
    }
}

/// Compacts temporaries and resolves the operator table.
pub struct OperatorResolution {
    settings: &'static LanguageSettings,
}

impl OperatorResolution {
    pub fn new(settings: &'static LanguageSettings) -> Self {
        OperatorResolution { settings }
    }
}

impl Runnable<Vec<Token>, Vec<Token>> for OperatorResolution {
    fn run(&self, input: Vec<Token>) -> Result<Vec<Token>, ParseError> {
        resolve_operators(input, self.settings)
    }
}

/// Splices top-level temporary groups back into the list.
#[derive(Default)]
pub struct ExpandTemporaries;

impl ExpandTemporaries {
    pub fn new() -> Self {
        ExpandTemporaries
    }
}

impl Runnable<Vec<Token>, Vec<Token>> for ExpandTemporaries {
    fn run(&self, input: Vec<Token>) -> Result<Vec<Token>, ParseError> {
        Ok(expand_temporaries(input))
    }
}
