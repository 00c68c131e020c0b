//! Shared source buffers and line/column lookup
//!
//! A [`Source`] owns the text of one input as a character vector, so that
//! every offset in the engine is a character index rather than a byte
//! offset. Sources are shared behind an `Arc`: the tokens of a parse and the
//! sub-parsers of formula regions all point into the same buffer.
//!
//! ## Normalization
//!
//!     Carriage returns are folded on construction. `\r\n` and `\n\r` become a
//!     single `\n` and a lone `\r` becomes `\n`. Columns and line numbers are
//!     therefore stable no matter which line endings the file used.
//!
//! ## Line lookup
//!
//!     Line starts are indexed once; converting an offset to a [`Position`] is
//!     an O(log n) binary search.

use std::fmt;
use std::sync::Arc;

/// A 0-based line and column in a [`Source`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    /// Displays 1-based, the way editors count.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.column + 1)
    }
}

/// Immutable text of one input
pub struct Source {
    path: String,
    chars: Vec<char>,
    line_starts: Vec<usize>,
}

impl Source {
    /// Build a shared source, normalizing line endings.
    pub fn new(path: impl Into<String>, text: &str) -> Arc<Source> {
        let chars = normalize_line_endings(text);

        let mut line_starts = vec![0];
        for (i, c) in chars.iter().enumerate() {
            if *c == '\n' {
                line_starts.push(i + 1);
            }
        }

        Arc::new(Source {
            path: path.into(),
            chars,
            line_starts,
        })
    }

    /// An anonymous source, handy for expressions typed inline.
    pub fn anonymous(text: &str) -> Arc<Source> {
        Source::new("<input>", text)
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Text of `[start, stop)`, clamped to the buffer.
    pub fn slice(&self, start: usize, stop: usize) -> String {
        let stop = stop.min(self.chars.len());
        let start = start.min(stop);
        self.chars[start..stop].iter().collect()
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Text of a 0-based line, without its newline.
    pub fn line(&self, line: usize) -> Option<String> {
        let start = *self.line_starts.get(line)?;
        let stop = match self.line_starts.get(line + 1) {
            Some(next) => next - 1,
            None => self.chars.len(),
        };
        Some(self.slice(start, stop))
    }

    /// Convert a character offset to a line/column position.
    pub fn position(&self, offset: usize) -> Position {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(line) => line - 1,
        };
        Position::new(line, offset - self.line_starts[line])
    }
}

impl fmt::Debug for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Source")
            .field("path", &self.path)
            .field("len", &self.chars.len())
            .finish()
    }
}

fn normalize_line_endings(text: &str) -> Vec<char> {
    let raw: Vec<char> = text.chars().collect();
    let mut chars = Vec::with_capacity(raw.len());

    for (i, c) in raw.iter().enumerate() {
        if *c != '\r' {
            chars.push(*c);
            continue;
        }
        let prev_is_newline = i > 0 && raw[i - 1] == '\n';
        let next_is_newline = raw.get(i + 1) == Some(&'\n');
        if !prev_is_newline && !next_is_newline {
            chars.push('\n');
        }
    }

    chars
}
