//! Quote, comment and formula delimiters
//!
//! A quoting table is an ordered list of [`QuotedGroup`]s. The masker looks
//! for the earliest opener of any group, then scans for that group's closer
//! and tags everything in between. The table is compiled once into
//! [`QuotedGroups`], which holds the combined "any opener" pattern.
//!
//! Per-group knobs:
//!
//!     - `track_starts`: nested openers must be closed too (`/* /* */ */`)
//!     - `assert_stop`: a closer outside any region is an error (`*/`)
//!     - `escape`: a delimiter after an odd run of this char is skipped
//!     - `closes_at_end`: running into the end of input closes the region

use regex::Regex;

use super::compile;
use crate::lexcore::error::ConfigError;
use crate::lexcore::lexing::masking::RuneMask;

/// One kind of quoted region, e.g. double quoted strings
#[derive(Debug, Clone)]
pub struct QuotedGroup {
    info: String,
    tag: RuneMask,
    start: String,
    stop: String,
    track_starts: bool,
    assert_stop: bool,
    escape: Option<char>,
    closes_at_end: bool,
}

impl QuotedGroup {
    /// Group delimited by literal text.
    pub fn new(info: impl Into<String>, tag: RuneMask, start: &str, stop: &str) -> Self {
        Self::pattern(info, tag, &regex::escape(start), &regex::escape(stop))
    }

    /// Group delimited by regular expressions.
    pub fn pattern(info: impl Into<String>, tag: RuneMask, start: &str, stop: &str) -> Self {
        Self {
            info: info.into(),
            tag,
            start: start.to_string(),
            stop: stop.to_string(),
            track_starts: true,
            assert_stop: false,
            escape: None,
            closes_at_end: false,
        }
    }

    pub fn track_starts(mut self, track: bool) -> Self {
        self.track_starts = track;
        self
    }

    pub fn assert_stop(mut self) -> Self {
        self.assert_stop = true;
        self
    }

    pub fn escape(mut self, escape: char) -> Self {
        self.escape = Some(escape);
        self
    }

    pub fn closes_at_end(mut self) -> Self {
        self.closes_at_end = true;
        self
    }

    pub fn info(&self) -> &str {
        &self.info
    }

    pub fn tag(&self) -> RuneMask {
        self.tag
    }
}

/// A group with its patterns compiled
#[derive(Debug, Clone)]
pub struct CompiledGroup {
    pub group: QuotedGroup,
    start: Regex,
    stop: Regex,
    start_or_stop: Regex,
}

impl CompiledGroup {
    fn new(group: QuotedGroup) -> Result<Self, ConfigError> {
        Ok(Self {
            start: compile(&format!("^(?:{})$", group.start))?,
            stop: compile(&format!("^(?:{})$", group.stop))?,
            start_or_stop: compile(&format!("({})|({})", group.start, group.stop))?,
            group,
        })
    }

    pub fn info(&self) -> &str {
        &self.group.info
    }

    pub fn tag(&self) -> RuneMask {
        self.group.tag
    }

    pub fn tracks_starts(&self) -> bool {
        self.group.track_starts
    }

    pub fn escape_char(&self) -> Option<char> {
        self.group.escape
    }

    pub fn closes_at_end(&self) -> bool {
        self.group.closes_at_end
    }

    pub fn is_start(&self, text: &str) -> bool {
        self.start.is_match(text)
    }

    pub fn is_stop(&self, text: &str) -> bool {
        self.stop.is_match(text)
    }

    /// Pattern matching either delimiter, used by the closing scan.
    pub fn start_or_stop(&self) -> &Regex {
        &self.start_or_stop
    }
}

/// The compiled quoting table of a language
#[derive(Debug, Clone)]
pub struct QuotedGroups {
    groups: Vec<CompiledGroup>,
    any: Option<Regex>,
}

impl QuotedGroups {
    pub fn new(groups: Vec<QuotedGroup>) -> Result<Self, ConfigError> {
        let mut alternatives: Vec<String> = groups.iter().map(|g| format!("({})", g.start)).collect();
        alternatives.extend(
            groups
                .iter()
                .filter(|g| g.assert_stop)
                .map(|g| format!("({})", g.stop)),
        );

        let any = if alternatives.is_empty() {
            None
        } else {
            Some(compile(&alternatives.join("|"))?)
        };

        let groups = groups
            .into_iter()
            .map(CompiledGroup::new)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { groups, any })
    }

    pub fn empty() -> Self {
        Self {
            groups: Vec::new(),
            any: None,
        }
    }

    /// Pattern of every opener plus every asserted closer.
    pub fn any(&self) -> Option<&Regex> {
        self.any.as_ref()
    }

    pub fn groups(&self) -> &[CompiledGroup] {
        &self.groups
    }

    pub fn group_for_start(&self, text: &str) -> Option<&CompiledGroup> {
        self.groups.iter().find(|g| g.is_start(text))
    }

    /// Group whose closer must not appear on its own.
    pub fn asserted_group_for_stop(&self, text: &str) -> Option<&CompiledGroup> {
        self.groups
            .iter()
            .find(|g| g.group.assert_stop && g.is_stop(text))
    }
}

pub fn single_quotes() -> QuotedGroup {
    QuotedGroup::new("single quotes", RuneMask::String, "'", "'").escape('\\')
}

pub fn double_quotes() -> QuotedGroup {
    QuotedGroup::new("double quotes", RuneMask::String, "\"", "\"").escape('\\')
}

pub fn backtick_formula() -> QuotedGroup {
    QuotedGroup::new("backtick formula", RuneMask::Formula, "`", "`").escape('\\')
}

/// Backticks as a third string quote (the template language).
pub fn backtick_string() -> QuotedGroup {
    QuotedGroup::new("backtick string", RuneMask::String, "`", "`").escape('\\')
}

pub fn single_line_comment() -> QuotedGroup {
    QuotedGroup::new("single-line comment", RuneMask::SingleLineComment, "//", "\n")
        .track_starts(false)
        .closes_at_end()
}

pub fn js_multiline_comment() -> QuotedGroup {
    QuotedGroup::new("js-style multiline comment", RuneMask::MultiLineComment, "/*", "*/").assert_stop()
}

pub fn xml_comment() -> QuotedGroup {
    QuotedGroup::new("xml-style multiline comment", RuneMask::MultiLineComment, "<!--", "-->")
        .assert_stop()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_lookup_is_exact() {
        let table = QuotedGroups::new(vec![single_line_comment(), js_multiline_comment()]).unwrap();
        assert_eq!(table.group_for_start("//").map(|g| g.info()), Some("single-line comment"));
        assert_eq!(
            table.group_for_start("/*").map(|g| g.info()),
            Some("js-style multiline comment")
        );
        assert!(table.group_for_start("*/").is_none());
        assert_eq!(
            table.asserted_group_for_stop("*/").map(|g| g.info()),
            Some("js-style multiline comment")
        );
        assert!(table.asserted_group_for_stop("\n").is_none());
    }

    #[test]
    fn test_any_pattern_finds_asserted_stops() {
        let table = QuotedGroups::new(vec![double_quotes(), js_multiline_comment()]).unwrap();
        let any = table.any().unwrap();
        assert_eq!(any.find("x */ y").map(|m| m.as_str()), Some("*/"));
        assert_eq!(any.find("x \"y\"").map(|m| m.as_str()), Some("\""));
    }

    #[test]
    fn test_empty_table() {
        let table = QuotedGroups::new(vec![]).unwrap();
        assert!(table.any().is_none());
    }

    #[test]
    fn test_invalid_pattern_is_config_error() {
        let bad = QuotedGroup::pattern("bad", RuneMask::String, "(", ")");
        assert!(matches!(
            QuotedGroups::new(vec![bad]),
            Err(ConfigError::InvalidPattern { .. })
        ));
    }
}
