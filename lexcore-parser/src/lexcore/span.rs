//! Half-open character ranges over a shared [`Source`]
//!
//! Every token carries a [`Span`]. Spans are always absolute offsets into the
//! shared buffer, including spans produced by formula sub-parsers that only
//! look at a window of it.
//!
//!     - Merging yields the smallest span containing both inputs.
//!     - Ordering is by start, then stop; the flat tokenizer sorts with it.
//!     - Equality compares the range only, not the buffer identity.

use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use super::source::{Position, Source};

#[derive(Clone)]
pub struct Span {
    source: Arc<Source>,
    start: usize,
    stop: usize,
}

impl Span {
    pub fn new(source: Arc<Source>, start: usize, stop: usize) -> Self {
        let stop = stop.min(source.len());
        let start = start.min(stop);
        Self {
            source,
            start,
            stop,
        }
    }

    /// Span covering the whole buffer.
    pub fn whole(source: Arc<Source>) -> Self {
        let stop = source.len();
        Self::new(source, 0, stop)
    }

    pub fn source(&self) -> &Arc<Source> {
        &self.source
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn stop(&self) -> usize {
        self.stop
    }

    pub fn len(&self) -> usize {
        self.stop - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.stop
    }

    /// A span over the same buffer with other bounds.
    pub fn with_range(&self, start: usize, stop: usize) -> Span {
        Span::new(self.source.clone(), start, stop)
    }

    /// Smallest span containing both.
    pub fn merge(&self, other: &Span) -> Span {
        self.with_range(self.start.min(other.start), self.stop.max(other.stop))
    }

    /// Merge a sequence of spans, `None` when empty.
    pub fn merge_all<'a>(spans: impl IntoIterator<Item = &'a Span>) -> Option<Span> {
        spans.into_iter().fold(None, |acc: Option<Span>, span| match acc {
            Some(acc) => Some(acc.merge(span)),
            None => Some(span.clone()),
        })
    }

    pub fn content(&self) -> String {
        self.source.slice(self.start, self.stop)
    }

    pub fn start_position(&self) -> Position {
        self.source.position(self.start)
    }

    pub fn stop_position(&self) -> Position {
        self.source.position(self.stop)
    }

    /// `path:line:column` of the start, 1-based.
    pub fn location(&self) -> String {
        format!("{}:{}", self.source.path(), self.start_position())
    }
}

impl PartialEq for Span {
    fn eq(&self, other: &Self) -> bool {
        self.start == other.start && self.stop == other.stop
    }
}

impl Eq for Span {}

impl PartialOrd for Span {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Span {
    fn cmp(&self, other: &Self) -> Ordering {
        self.start
            .cmp(&other.start)
            .then(self.stop.cmp(&other.stop))
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.stop)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.location())
    }
}

impl Serialize for Span {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Span", 2)?;
        state.serialize_field("start", &self.start)?;
        state.serialize_field("stop", &self.stop)?;
        state.end()
    }
}
