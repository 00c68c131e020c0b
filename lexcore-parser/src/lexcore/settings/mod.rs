//! Per-language configuration
//!
//! Everything that differs between the languages is data in a
//! [`LanguageSettings`]; the engine never branches on a language name.
//!
//! Construction is two-phase. [`LanguageSettingsBuilder::build`] compiles the
//! patterns and the operator table and reports table mistakes as
//! [`ConfigError`]s. A language with interpolated formulas then binds its
//! formula tokenizer with [`LanguageSettings::bind_formulas`]. The tokenizer
//! receives the settings it is bound to, so it can spawn sub-parsers over the
//! same tables without a reference cycle.

pub mod operators;
pub mod quoting;

use regex::Regex;
use std::fmt;

use crate::lexcore::error::{ConfigError, ParseError};
use crate::lexcore::span::Span;
use crate::lexcore::token::Token;

pub use operators::{OperatorKinds, OperatorLevel, OperatorTable};
pub use quoting::{QuotedGroup, QuotedGroups};

/// Decides what a word-or-literal match is.
pub type WordClassifier = fn(&str, Span) -> Result<Token, ParseError>;

/// Tokenizes the interior of a formula region.
pub type FormulaTokenizer = fn(&LanguageSettings, &Span) -> Result<Vec<Token>, ParseError>;

pub(crate) fn compile(pattern: &str) -> Result<Regex, ConfigError> {
    Regex::new(pattern).map_err(|err| ConfigError::InvalidPattern {
        pattern: pattern.to_string(),
        message: err.to_string(),
    })
}

/// Which atoms join temporary groups before operator resolution
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Compaction {
    /// Words never separate atoms (`a b` is one run)
    pub words: bool,
    /// `.` joins its neighbours (`a.b`)
    pub periods: bool,
    /// `=>` joins its neighbours
    pub arrows: bool,
    /// `::` joins its neighbours
    pub double_colons: bool,
}

fn plain_word(text: &str, span: Span) -> Result<Token, ParseError> {
    Ok(Token::word(text, span))
}

#[derive(Clone)]
pub struct LanguageSettings {
    name: String,
    quoting: QuotedGroups,
    word_pattern: Regex,
    classifier: WordClassifier,
    symbol_pattern: Option<Regex>,
    operators: OperatorTable,
    compaction: Compaction,
    angled_groups: bool,
    recursive_operators: bool,
    significant_whitespace: bool,
    formulas: Option<FormulaTokenizer>,
}

impl LanguageSettings {
    pub fn builder(name: impl Into<String>) -> LanguageSettingsBuilder {
        LanguageSettingsBuilder::new(name)
    }

    /// Second construction step: attach the formula tokenizer.
    pub fn bind_formulas(mut self, tokenizer: FormulaTokenizer) -> Self {
        self.formulas = Some(tokenizer);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn quoting(&self) -> &QuotedGroups {
        &self.quoting
    }

    pub fn word_pattern(&self) -> &Regex {
        &self.word_pattern
    }

    pub fn classify(&self, text: &str, span: Span) -> Result<Token, ParseError> {
        (self.classifier)(text, span)
    }

    pub fn symbol_pattern(&self) -> Option<&Regex> {
        self.symbol_pattern.as_ref()
    }

    pub fn operators(&self) -> &OperatorTable {
        &self.operators
    }

    pub fn compaction(&self) -> Compaction {
        self.compaction
    }

    pub fn angled_groups(&self) -> bool {
        self.angled_groups
    }

    pub fn recursive_operators(&self) -> bool {
        self.recursive_operators
    }

    pub fn significant_whitespace(&self) -> bool {
        self.significant_whitespace
    }

    pub fn formula_tokenizer(&self) -> Option<FormulaTokenizer> {
        self.formulas
    }
}

impl fmt::Debug for LanguageSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LanguageSettings")
            .field("name", &self.name)
            .field("quoting", &self.quoting)
            .field("word_pattern", &self.word_pattern.as_str())
            .field("symbol_pattern", &self.symbol_pattern.as_ref().map(Regex::as_str))
            .field("operators", &self.operators)
            .field("compaction", &self.compaction)
            .field("angled_groups", &self.angled_groups)
            .field("recursive_operators", &self.recursive_operators)
            .field("significant_whitespace", &self.significant_whitespace)
            .field("formulas", &self.formulas.is_some())
            .finish()
    }
}

pub struct LanguageSettingsBuilder {
    name: String,
    quotes: Vec<QuotedGroup>,
    word_pattern: String,
    classifier: WordClassifier,
    symbol_pattern: Option<String>,
    operators: Vec<(u32, String, OperatorKinds)>,
    compaction: Compaction,
    angled_groups: bool,
    recursive_operators: bool,
    significant_whitespace: bool,
}

impl LanguageSettingsBuilder {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quotes: Vec::new(),
            word_pattern: r"[A-Za-z_][0-9A-Za-z_]*".to_string(),
            classifier: plain_word,
            symbol_pattern: None,
            operators: Vec::new(),
            compaction: Compaction::default(),
            angled_groups: false,
            recursive_operators: false,
            significant_whitespace: false,
        }
    }

    pub fn quote(mut self, group: QuotedGroup) -> Self {
        self.quotes.push(group);
        self
    }

    pub fn words(mut self, pattern: &str, classifier: WordClassifier) -> Self {
        self.word_pattern = pattern.to_string();
        self.classifier = classifier;
        self
    }

    pub fn symbols(mut self, pattern: &str) -> Self {
        self.symbol_pattern = Some(pattern.to_string());
        self
    }

    pub fn operator(mut self, precedence: u32, symbol: &str, kinds: OperatorKinds) -> Self {
        self.operators.push((precedence, symbol.to_string(), kinds));
        self
    }

    /// Several symbols sharing one precedence and fixity.
    pub fn operators(mut self, precedence: u32, symbols: &[&str], kinds: OperatorKinds) -> Self {
        for symbol in symbols {
            self = self.operator(precedence, symbol, kinds);
        }
        self
    }

    pub fn compaction(mut self, compaction: Compaction) -> Self {
        self.compaction = compaction;
        self
    }

    pub fn angled_groups(mut self, enabled: bool) -> Self {
        self.angled_groups = enabled;
        self
    }

    pub fn recursive_operators(mut self, enabled: bool) -> Self {
        self.recursive_operators = enabled;
        self
    }

    pub fn significant_whitespace(mut self, enabled: bool) -> Self {
        self.significant_whitespace = enabled;
        self
    }

    pub fn build(self) -> Result<LanguageSettings, ConfigError> {
        let operators = OperatorTable::new(
            self.operators
                .iter()
                .map(|(precedence, symbol, kinds)| (*precedence, symbol.as_str(), *kinds)),
        )?;

        Ok(LanguageSettings {
            name: self.name,
            quoting: QuotedGroups::new(self.quotes)?,
            word_pattern: compile(&self.word_pattern)?,
            classifier: self.classifier,
            symbol_pattern: self.symbol_pattern.as_deref().map(compile).transpose()?,
            operators,
            compaction: self.compaction,
            angled_groups: self.angled_groups,
            recursive_operators: self.recursive_operators,
            significant_whitespace: self.significant_whitespace,
            formulas: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let settings = LanguageSettings::builder("bare").build().unwrap();
        assert_eq!(settings.name(), "bare");
        assert!(settings.operators().is_empty());
        assert!(settings.symbol_pattern().is_none());
        assert!(settings.formula_tokenizer().is_none());
        assert!(settings.word_pattern().is_match("abc"));
    }

    #[test]
    fn test_bad_symbol_pattern() {
        let err = LanguageSettings::builder("bad").symbols("[").build().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPattern { pattern, .. } if pattern == "["));
    }

    #[test]
    fn test_mixed_table_fails_at_build() {
        let err = LanguageSettings::builder("bad")
            .operator(5, "+", OperatorKinds::BIN | OperatorKinds::L2R)
            .operator(5, "=", OperatorKinds::BIN)
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::MixedAssociativity { precedence: 5, .. }));
    }

    #[test]
    fn test_bind_formulas() {
        fn nothing(_: &LanguageSettings, _: &Span) -> Result<Vec<Token>, ParseError> {
            Ok(vec![])
        }
        let settings = LanguageSettings::builder("f").build().unwrap().bind_formulas(nothing);
        assert!(settings.formula_tokenizer().is_some());
    }
}
