//! Flat tokenization over a window of a shared source
//!
//! A [`Parser`] owns the per-character tags of one window of a [`Source`].
//! Construction runs the quoted-region masker; [`Parser::tokenize_flat`] then
//! runs the remaining passes in a fixed order:
//!
//!     1. strings      one LiteralString per string region
//!     2. formulas     the language's formula tokenizer per formula region
//!     3. whitespace   Indent/NewLine, only for indentation-sensitive languages
//!     4. words        word-or-literal matches, classified by the language
//!     5. symbols      symbol matches
//!
//! The tokens are then sorted by span and every character that is still
//! unclaimed and not whitespace is reported as a stray character.
//!
//! Formula sub-parsers are just parsers over a narrower window of the same
//! buffer, so their spans stay absolute.

pub mod flat;
pub mod masking;
pub mod whitespace;

use std::sync::Arc;

use crate::lexcore::error::ParseError;
use crate::lexcore::nesting::nest_groups;
use crate::lexcore::operators::resolve_operators;
use crate::lexcore::settings::LanguageSettings;
use crate::lexcore::source::Source;
use crate::lexcore::span::Span;
use crate::lexcore::token::Token;

pub use masking::{MaskedView, QuotedRegion, RuneMask};

#[derive(Debug)]
pub struct Parser<'s> {
    settings: &'s LanguageSettings,
    source: Arc<Source>,
    offset: usize,
    mask: Vec<RuneMask>,
    quoted_mask: Vec<RuneMask>,
    regions: Vec<QuotedRegion>,
}

impl<'s> Parser<'s> {
    /// Parser over the whole buffer.
    pub fn new(source: Arc<Source>, settings: &'s LanguageSettings) -> Result<Self, ParseError> {
        let len = source.len();
        Self::window(source, 0, len, settings)
    }

    /// Parser over `[start, stop)` of the buffer.
    pub fn window(
        source: Arc<Source>,
        start: usize,
        stop: usize,
        settings: &'s LanguageSettings,
    ) -> Result<Self, ParseError> {
        if start > stop || stop > source.len() {
            return Err(ParseError::internal(
                format!("window {}..{} outside source of {} chars", start, stop, source.len()),
                None,
            ));
        }

        let mut parser = Parser {
            settings,
            source,
            offset: start,
            mask: vec![RuneMask::None; stop - start],
            quoted_mask: Vec::new(),
            regions: Vec::new(),
        };
        parser.mask_quoted()?;
        parser.quoted_mask = parser.mask.clone();

        Ok(parser)
    }

    pub fn settings(&self) -> &'s LanguageSettings {
        self.settings
    }

    pub fn source(&self) -> &Arc<Source> {
        &self.source
    }

    /// Tag of every character of the window.
    pub fn mask(&self) -> &[RuneMask] {
        &self.mask
    }

    pub fn regions(&self) -> &[QuotedRegion] {
        &self.regions
    }

    pub fn len(&self) -> usize {
        self.mask.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mask.is_empty()
    }

    fn chars(&self) -> &[char] {
        &self.source.chars()[self.offset..self.offset + self.mask.len()]
    }

    /// Absolute span of a window-relative range.
    fn span(&self, start: usize, stop: usize) -> Span {
        Span::new(self.source.clone(), self.offset + start, self.offset + stop)
    }

    /// Text of a window-relative range without comment characters.
    fn write(&self, start: usize, stop: usize) -> String {
        self.chars()[start..stop]
            .iter()
            .zip(&self.mask[start..stop])
            .filter(|(_, tag)| !tag.is_comment())
            .map(|(c, _)| *c)
            .collect()
    }

    fn paint(&mut self, start: usize, stop: usize, tag: RuneMask) {
        for slot in &mut self.mask[start..stop] {
            *slot = tag;
        }
    }

    /// Forget everything but the quoted regions.
    pub fn reset(&mut self) {
        self.mask.clone_from(&self.quoted_mask);
    }

    /// Flat, span-sorted token list of the window.
    pub fn tokenize_flat(&mut self) -> Result<Vec<Token>, ParseError> {
        self.reset();

        let mut tokens = Vec::new();
        self.tokenize_strings(&mut tokens);
        self.tokenize_formulas(&mut tokens)?;
        if self.settings.significant_whitespace() {
            self.tokenize_whitespace(&mut tokens);
        }
        self.tokenize_words(&mut tokens)?;
        self.tokenize_symbols(&mut tokens);

        tokens.sort_by(|a, b| a.span().cmp(b.span()));
        self.assert_no_stray()?;

        Ok(tokens)
    }

    /// Flat tokens with brackets nested into groups.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, ParseError> {
        let flat = self.tokenize_flat()?;
        nest_groups(flat, self.settings.angled_groups())
    }

    /// Resolve operators of an already nested token list.
    pub fn resolve(&self, tokens: Vec<Token>) -> Result<Vec<Token>, ParseError> {
        resolve_operators(tokens, self.settings)
    }
}

/// Tokenize and nest `text` with a language.
pub fn tokenize(text: &str, settings: &LanguageSettings) -> Result<Vec<Token>, ParseError> {
    Parser::new(Source::anonymous(text), settings)?.tokenize()
}

/// Tokenize, nest and resolve operators of `text`.
pub fn parse_expression(text: &str, settings: &LanguageSettings) -> Result<Vec<Token>, ParseError> {
    let mut parser = Parser::new(Source::anonymous(text), settings)?;
    let tokens = parser.tokenize()?;
    parser.resolve(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexcore::languages;
    use crate::lexcore::token::dump_tokens;

    #[test]
    fn test_window_bounds_checked() {
        let source = Source::anonymous("abc");
        let err = Parser::window(source, 2, 9, &languages::JS).unwrap_err();
        assert!(err.is_internal());
    }

    #[test]
    fn test_window_spans_are_absolute() {
        let source = Source::anonymous("xx foo yy");
        let mut parser = Parser::window(source, 3, 6, &languages::JS).unwrap();
        let tokens = parser.tokenize_flat().unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!((tokens[0].span().start(), tokens[0].span().stop()), (3, 6));
        assert_eq!(tokens[0].span().content(), "foo");
    }

    #[test]
    fn test_tokenizing_twice_is_stable() {
        let mut parser = Parser::new(Source::anonymous("a + 'b' * (c - 1)"), &languages::JS).unwrap();
        let first = parser.tokenize().unwrap();
        let second = parser.tokenize().unwrap();
        assert_eq!(dump_tokens(&first), dump_tokens(&second));
        assert_eq!(
            dump_tokens(&parser.resolve(first).unwrap()),
            dump_tokens(&parser.resolve(second).unwrap())
        );
    }

    #[test]
    fn test_parse_expression() {
        let tokens = parse_expression("1+2*3", &languages::JS).unwrap();
        insta::assert_snapshot!(dump_tokens(&tokens), @r"
        Operator bin+
          LiteralInt(1)
          Operator bin*
            LiteralInt(2)
            LiteralInt(3)
        ");
    }
}
