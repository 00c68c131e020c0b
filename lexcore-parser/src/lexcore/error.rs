//! Error types for tokenization, nesting and operator resolution
//!
//! Two families live here:
//!
//!     - [`ParseError`]: problems with the input. Every variant carries the
//!       span(s) it is about, so it can be rendered with source context.
//!     - [`ConfigError`]: problems with a language table, reported when the
//!       table is built rather than when it is first used.
//!
//! Rendering follows the usual compiler layout: a message line, a location
//! line, then numbered source lines with a `>>` marker on the offending line
//! and carets under the offending characters.

use std::fmt;

use super::span::Span;
use super::token::Fixity;

/// Errors that abort a parse
#[derive(Debug, Clone)]
pub enum ParseError {
    /// A quote, comment or formula opener without its closer
    Unmatched { what: String, span: Span },
    /// A closer that must never appear on its own (e.g. `*/`)
    UnmatchedStop { what: String, span: Span },
    /// An opening bracket without a matching closer
    UnmatchedGroupStart { span: Span },
    /// A closing bracket without an opener
    UnmatchedGroupStop { span: Span },
    /// Characters no pass claimed
    StrayCharacters { spans: Vec<Span> },
    /// A word pattern match the classifier rejected
    Unparseable { text: String, span: Span },
    /// A literal that matched its shape but not its value range
    InvalidLiteral { message: String, span: Span },
    /// No fixity of the operator table fits the operand layout
    OperatorFixity {
        symbol: String,
        fixity: Fixity,
        span: Span,
    },
    /// A formula region the language cannot tokenize
    Formula { message: String, span: Span },
    /// A broken engine invariant, reported instead of panicking
    Internal { message: String, span: Option<Span> },
}

impl ParseError {
    pub fn internal(message: impl Into<String>, span: Option<Span>) -> Self {
        ParseError::Internal {
            message: message.into(),
            span,
        }
    }

    /// One-line description without location.
    pub fn message(&self) -> String {
        match self {
            ParseError::Unmatched { what, .. } => format!("unmatched {}", what),
            ParseError::UnmatchedStop { what, .. } => format!("unmatched stop of {}", what),
            ParseError::UnmatchedGroupStart { .. } => "unmatched container start".to_string(),
            ParseError::UnmatchedGroupStop { .. } => "unmatched group".to_string(),
            ParseError::StrayCharacters { .. } => "stray characters".to_string(),
            ParseError::Unparseable { text, .. } => format!("unparseable `{}`", text),
            ParseError::InvalidLiteral { message, .. } => message.clone(),
            ParseError::OperatorFixity { symbol, fixity, .. } => {
                format!("`{}` is not a {} operator", symbol, fixity.describe())
            }
            ParseError::Formula { message, .. } => message.clone(),
            ParseError::Internal { message, .. } => message.clone(),
        }
    }

    /// All spans the error points at, in source order.
    pub fn spans(&self) -> Vec<Span> {
        match self {
            ParseError::Unmatched { span, .. }
            | ParseError::UnmatchedStop { span, .. }
            | ParseError::UnmatchedGroupStart { span }
            | ParseError::UnmatchedGroupStop { span }
            | ParseError::Unparseable { span, .. }
            | ParseError::InvalidLiteral { span, .. }
            | ParseError::OperatorFixity { span, .. }
            | ParseError::Formula { span, .. } => vec![span.clone()],
            ParseError::StrayCharacters { spans } => spans.clone(),
            ParseError::Internal { span, .. } => span.iter().cloned().collect(),
        }
    }

    /// First span, if any.
    pub fn span(&self) -> Option<Span> {
        self.spans().into_iter().next()
    }

    pub fn is_internal(&self) -> bool {
        matches!(self, ParseError::Internal { .. })
    }

    fn kind(&self) -> &'static str {
        if self.is_internal() {
            "internal error"
        } else {
            "syntax error"
        }
    }

    /// Multi-line rendering with numbered source context and carets.
    pub fn render(&self, options: &RenderOptions) -> String {
        let mut out = String::new();
        let headline = format!("{}: {}", self.kind(), self.message());
        out.push_str(&options.paint(&headline, BOLD_RED));
        out.push('\n');

        for span in self.spans() {
            out.push_str(&format!("  --> {}\n", span.location()));
            out.push_str(&format_source_context(&span, options));
        }

        out
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.span() {
            Some(span) => write!(f, "{}: {} ({})", self.kind(), self.message(), span.location()),
            None => write!(f, "{}: {}", self.kind(), self.message()),
        }
    }
}

impl std::error::Error for ParseError {}

/// Errors in a language table, found when the table is built
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Left-to-right and right-to-left entries share a precedence
    MixedAssociativity { precedence: u32, symbol: String },
    EmptySymbol { precedence: u32 },
    /// A ternary entry must name exactly two symbols, e.g. `? :`
    MalformedTernary { symbol: String },
    /// A quoting or token pattern failed to compile
    InvalidPattern { pattern: String, message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MixedAssociativity { precedence, symbol } => write!(
                f,
                "operator `{}` mixes associativity at precedence {}",
                symbol, precedence
            ),
            ConfigError::EmptySymbol { precedence } => {
                write!(f, "empty operator symbol at precedence {}", precedence)
            }
            ConfigError::MalformedTernary { symbol } => {
                write!(f, "ternary operator `{}` must have two symbols", symbol)
            }
            ConfigError::InvalidPattern { pattern, message } => {
                write!(f, "invalid pattern `{}`: {}", pattern, message)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

const BOLD_RED: &str = "\u{1b}[1;31m";
const RESET: &str = "\u{1b}[0m";

/// Knobs for [`ParseError::render`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Wrap the headline and carets in ANSI color
    pub color: bool,
    /// Lines shown before and after the offending line
    pub context_lines: usize,
}

impl RenderOptions {
    fn paint(&self, text: &str, color: &str) -> String {
        if self.color {
            format!("{}{}{}", color, text, RESET)
        } else {
            text.to_string()
        }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            color: false,
            context_lines: 2,
        }
    }
}

/// Numbered lines around a span, `>>` on its first line and carets below.
pub fn format_source_context(span: &Span, options: &RenderOptions) -> String {
    let source = span.source();
    let start = span.start_position();
    let stop = span.stop_position();
    let error_line = start.line;

    let first_line = error_line.saturating_sub(options.context_lines);
    let last_line = (error_line + options.context_lines + 1).min(source.line_count());

    let mut context = String::new();

    for line_num in first_line..last_line {
        let Some(text) = source.line(line_num) else {
            continue;
        };
        let marker = if line_num == error_line { ">>" } else { "  " };
        context.push_str(&format!("{} {:3} | {}\n", marker, line_num + 1, text));

        if line_num == error_line {
            let line_len = text.chars().count();
            let caret_stop = if stop.line == error_line {
                stop.column
            } else {
                line_len
            };
            let width = caret_stop.saturating_sub(start.column).max(1);
            let carets = options.paint(&"^".repeat(width), BOLD_RED);
            context.push_str(&format!(
                "       | {}{}\n",
                " ".repeat(start.column),
                carets
            ));
        }
    }

    context
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexcore::source::Source;

    #[test]
    fn test_format_source_context() {
        let source = Source::new("demo", "line 1\nline 2\nline 3\nerror here\nline 5\nline 6\nline 7");
        let start = "line 1\nline 2\nline 3\nerror ".chars().count();
        let span = Span::new(source, start, start + 4);

        let context = format_source_context(&span, &RenderOptions::default());

        assert!(context.contains("line 2"));
        assert!(context.contains(">>   4 | error here"));
        assert!(context.contains("       |       ^^^^\n"));
        assert!(context.contains("line 6"));
        assert!(!context.contains("line 1"));
        assert!(!context.contains("line 7"));
    }

    #[test]
    fn test_display_includes_location() {
        let source = Source::new("demo.js", "a)");
        let err = ParseError::UnmatchedGroupStop {
            span: Span::new(source, 1, 2),
        };
        assert_eq!(err.to_string(), "syntax error: unmatched group (demo.js:1:2)");
    }

    #[test]
    fn test_render_stray_characters_lists_every_span() {
        let source = Source::new("demo", "a @ b\nc @");
        let err = ParseError::StrayCharacters {
            spans: vec![
                Span::new(source.clone(), 2, 3),
                Span::new(source, 8, 9),
            ],
        };
        let rendered = err.render(&RenderOptions::default());
        assert!(rendered.starts_with("syntax error: stray characters\n"));
        assert!(rendered.contains("--> demo:1:3"));
        assert!(rendered.contains("--> demo:2:3"));
    }

    #[test]
    fn test_render_color() {
        let source = Source::new("demo", "x");
        let err = ParseError::UnmatchedGroupStart {
            span: Span::new(source, 0, 1),
        };
        let options = RenderOptions {
            color: true,
            context_lines: 0,
        };
        let rendered = err.render(&options);
        assert!(rendered.contains("\u{1b}[1;31msyntax error: unmatched container start\u{1b}[0m"));
    }

    #[test]
    fn test_internal_without_span() {
        let err = ParseError::internal("broken", None);
        assert_eq!(err.to_string(), "internal error: broken");
        assert!(err.spans().is_empty());
    }
}
