//! Indentation tokens for whitespace-sensitive languages
//!
//! One forward pass with an "at line start" flag. While at line start the
//! leading whitespace is measured (space 1, tab 2). Comments at line start do
//! not end the measurement: a multi-line comment counts one unit per
//! character and restarts the count at each of its newlines, a single-line
//! comment restarts it. Blank lines emit nothing. The first other character
//! emits `Indent(units)` over the measured prefix.
//!
//! After line start, a newline that is not inside a multi-line comment,
//! string or formula emits `NewLine` and returns to line start.

use super::masking::RuneMask;
use super::Parser;
use crate::lexcore::token::Token;

impl Parser<'_> {
    pub(super) fn tokenize_whitespace(&mut self, tokens: &mut Vec<Token>) {
        let mut at_line_start = true;
        let mut units = 0usize;
        let mut line_start = 0usize;

        for i in 0..self.len() {
            let c = self.chars()[i];
            let tag = self.mask[i];

            if at_line_start {
                match (tag, c) {
                    (RuneMask::None, ' ') => units += 1,
                    (RuneMask::None, '\t') => units += 2,
                    (RuneMask::MultiLineComment, '\n') => {
                        units = 0;
                        line_start = i + 1;
                    }
                    (RuneMask::MultiLineComment, _) => units += 1,
                    (RuneMask::SingleLineComment, _) | (RuneMask::None, '\n') => {
                        units = 0;
                        line_start = i + 1;
                    }
                    _ => {
                        tokens.push(Token::Indent {
                            units,
                            span: self.span(line_start, i),
                        });
                        self.paint(line_start, i, RuneMask::TokenizedWhitespace);
                        at_line_start = false;
                    }
                }
            } else if c == '\n' && tag != RuneMask::MultiLineComment && !tag.is_string_or_formula() {
                tokens.push(Token::NewLine {
                    span: self.span(i, i + 1),
                });
                self.paint(i, i + 1, RuneMask::TokenizedWhitespace);
                at_line_start = true;
                units = 0;
                line_start = i + 1;
            }
        }
    }
}
