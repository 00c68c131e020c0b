//! The string, formula, word and symbol passes

use super::masking::{MaskedView, RuneMask};
use super::Parser;
use crate::lexcore::error::ParseError;
use crate::lexcore::token::Token;

impl Parser<'_> {
    pub(super) fn tokenize_strings(&self, tokens: &mut Vec<Token>) {
        for region in self.regions.iter().filter(|r| r.tag == RuneMask::String) {
            let (start, stop) = region.interior();
            tokens.push(Token::LiteralString {
                value: self.write(start, stop),
                span: self.span(region.start, region.stop),
            });
        }
    }

    pub(super) fn tokenize_formulas(&self, tokens: &mut Vec<Token>) -> Result<(), ParseError> {
        for region in self.regions.iter().filter(|r| r.tag == RuneMask::Formula) {
            let Some(tokenizer) = self.settings.formula_tokenizer() else {
                return Err(ParseError::internal(
                    format!("no formula tokenizer bound for {}", self.settings.name()),
                    Some(self.span(region.start, region.stop)),
                ));
            };

            let (start, stop) = region.interior();
            tokens.extend(tokenizer(self.settings, &self.span(start, stop))?);
        }

        Ok(())
    }

    pub(super) fn tokenize_words(&mut self, tokens: &mut Vec<Token>) -> Result<(), ParseError> {
        let settings = self.settings;
        let view = MaskedView::new(self.chars(), &self.mask);
        let mut pos = 0;

        while let Some((start, stop)) = view.find(settings.word_pattern(), pos) {
            if start == stop {
                pos = start + 1;
                continue;
            }
            let text = self.write(start, stop);
            tokens.push(settings.classify(&text, self.span(start, stop))?);
            self.paint(start, stop, RuneMask::WordOrLiteral);
            pos = stop;
        }

        Ok(())
    }

    pub(super) fn tokenize_symbols(&mut self, tokens: &mut Vec<Token>) {
        let Some(pattern) = self.settings.symbol_pattern() else {
            return;
        };
        let view = MaskedView::new(self.chars(), &self.mask);
        let mut pos = 0;

        while let Some((start, stop)) = view.find(pattern, pos) {
            if start == stop {
                pos = start + 1;
                continue;
            }
            tokens.push(Token::symbol(self.write(start, stop), self.span(start, stop)));
            self.paint(start, stop, RuneMask::Symbol);
            pos = stop;
        }
    }

    /// Every unclaimed non-whitespace character, grouped into runs.
    pub(super) fn assert_no_stray(&self) -> Result<(), ParseError> {
        let mut spans = Vec::new();
        let mut run: Option<usize> = None;

        for (i, (c, tag)) in self.chars().iter().zip(&self.mask).enumerate() {
            let stray = *tag == RuneMask::None && !matches!(c, ' ' | '\t' | '\n' | '\r');
            match (stray, run) {
                (true, None) => run = Some(i),
                (false, Some(start)) => {
                    spans.push(self.span(start, i));
                    run = None;
                }
                _ => {}
            }
        }
        if let Some(start) = run {
            spans.push(self.span(start, self.len()));
        }

        if spans.is_empty() {
            Ok(())
        } else {
            Err(ParseError::StrayCharacters { spans })
        }
    }
}
