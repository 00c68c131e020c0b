//! Per-character tags and the quoted-region masker
//!
//! Every character of a parser's window carries exactly one [`RuneMask`].
//! The masker runs first and claims strings, formulas and comments; later
//! passes claim words, symbols and significant whitespace. Pattern matching
//! always runs on a [`MaskedView`], in which claimed characters read as
//! spaces, so no pass can match across text another pass already owns.

use regex::Regex;
use serde::Serialize;

use super::Parser;
use crate::lexcore::error::ParseError;
use crate::lexcore::settings::quoting::CompiledGroup;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum RuneMask {
    #[default]
    None,
    SingleLineComment,
    MultiLineComment,
    String,
    Formula,
    WordOrLiteral,
    Symbol,
    TokenizedWhitespace,
}

impl RuneMask {
    pub fn is_comment(&self) -> bool {
        matches!(self, RuneMask::SingleLineComment | RuneMask::MultiLineComment)
    }

    pub fn is_string_or_formula(&self) -> bool {
        matches!(self, RuneMask::String | RuneMask::Formula)
    }
}

/// A region claimed by the masker, window-relative
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotedRegion {
    pub start: usize,
    pub stop: usize,
    pub open_len: usize,
    pub close_len: usize,
    pub tag: RuneMask,
}

impl QuotedRegion {
    /// Range between the delimiters.
    pub fn interior(&self) -> (usize, usize) {
        let start = self.start + self.open_len;
        let stop = self.stop.saturating_sub(self.close_len).max(start);
        (start, stop)
    }
}

/// Window text with claimed characters blanked out
pub struct MaskedView {
    text: String,
    offsets: Vec<usize>,
}

impl MaskedView {
    pub fn new(chars: &[char], mask: &[RuneMask]) -> Self {
        let mut text = String::with_capacity(chars.len());
        let mut offsets = Vec::with_capacity(chars.len() + 1);

        for (c, tag) in chars.iter().zip(mask) {
            offsets.push(text.len());
            if *tag == RuneMask::None {
                text.push(*c);
            } else {
                text.push(' ');
            }
        }
        offsets.push(text.len());

        Self { text, offsets }
    }

    /// Next match at or after char index `from`, as char indices.
    pub fn find(&self, pattern: &Regex, from: usize) -> Option<(usize, usize)> {
        let byte_from = *self.offsets.get(from)?;
        let found = pattern.find_at(&self.text, byte_from)?;
        let start = self.offsets.binary_search(&found.start()).ok()?;
        let stop = self.offsets.binary_search(&found.end()).ok()?;
        Some((start, stop))
    }
}

impl Parser<'_> {
    /// Tag every quoted region of the window.
    pub(super) fn mask_quoted(&mut self) -> Result<(), ParseError> {
        let settings = self.settings;
        let quoting = settings.quoting();
        let Some(any) = quoting.any() else {
            return Ok(());
        };

        let view = MaskedView::new(self.chars(), &self.mask);
        let mut pos = 0;

        while let Some((start, stop)) = view.find(any, pos) {
            pos = stop.max(start + 1);
            let text = self.write(start, stop);

            if let Some(group) = quoting.group_for_start(&text) {
                let (end, close_len) = match self.find_group_stop(&view, group, stop) {
                    Some(found) => found,
                    None if group.closes_at_end() => (self.len(), 0),
                    None => {
                        return Err(ParseError::Unmatched {
                            what: group.info().to_string(),
                            span: self.span(start, stop),
                        })
                    }
                };

                self.paint(start, end, group.tag());
                self.regions.push(QuotedRegion {
                    start,
                    stop: end,
                    open_len: stop - start,
                    close_len,
                    tag: group.tag(),
                });
                pos = end.max(pos);
            } else if let Some(group) = quoting.asserted_group_for_stop(&text) {
                return Err(ParseError::UnmatchedStop {
                    what: group.info().to_string(),
                    span: self.span(start, stop),
                });
            } else {
                return Err(ParseError::internal(
                    format!("quoting pattern matched `{}` but no group claims it", text),
                    Some(self.span(start, stop)),
                ));
            }
        }

        Ok(())
    }

    /// Scan for the closer of `group`, counting nested openers when the group
    /// tracks them. Returns the end of the closer and its length.
    fn find_group_stop(&self, view: &MaskedView, group: &CompiledGroup, from: usize) -> Option<(usize, usize)> {
        let mut depth = 0usize;
        let mut pos = from;

        while let Some((start, stop)) = view.find(group.start_or_stop(), pos) {
            pos = stop.max(start + 1);

            if let Some(escape) = group.escape_char() {
                if self.is_escaped(start, escape) {
                    continue;
                }
            }

            let text = self.write(start, stop);
            if group.is_stop(&text) {
                if depth == 0 {
                    return Some((stop, stop - start));
                }
                depth -= 1;
            } else if group.tracks_starts() && group.is_start(&text) {
                depth += 1;
            }
        }

        None
    }

    /// Odd run of `escape` right before `pos`.
    fn is_escaped(&self, pos: usize, escape: char) -> bool {
        let run = self.chars()[..pos]
            .iter()
            .rev()
            .take_while(|c| **c == escape)
            .count();
        run % 2 == 1
    }
}
