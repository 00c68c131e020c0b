//! Text renderings of token trees
//!
//! - [`ToDumpString`]: the indented debug dump, one token per line, children
//!   two spaces deeper. Snapshot tests and the CLI `dump` format use it.
//! - [`to_json`] / [`to_yaml`]: the serde form of the tree, spans reduced to
//!   `{start, stop}` character offsets.
//!
//! [`TokenFormat`] picks one of them by name.

use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

use super::core::Token;

const INDENT_STEP: &str = "  ";

/// Trait for rendering a token as an indented dump
pub trait ToDumpString {
    fn to_dump_string(&self, indent: &str) -> String;
}

impl ToDumpString for Token {
    fn to_dump_string(&self, indent: &str) -> String {
        let line = match self {
            Token::Word { value, .. } => format!("Word({})", value),
            Token::Symbol(symbol) => format!("Symbol {}", symbol.value),
            Token::LiteralBool { value, .. } => format!("LiteralBool({})", value),
            Token::LiteralInt { value, .. } => format!("LiteralInt({})", value),
            Token::LiteralFloat { value, unit, .. } => format!("LiteralFloat({}{})", value, unit),
            Token::LiteralString { value, .. } => format!("LiteralString({:?})", value),
            Token::LiteralColor { rgba, .. } => format!(
                "LiteralColor({}, {}, {}, {})",
                rgba[0], rgba[1], rgba[2], rgba[3]
            ),
            Token::LiteralNull { .. } => "LiteralNull".to_string(),
            Token::SpecialNumber { value, .. } => format!("SpecialNumber({})", value),
            Token::Indent { units, .. } => format!("Indent({})", units),
            Token::NewLine { .. } => "NewLine".to_string(),
            Token::Group(group) => {
                let mut out = format!("{}{}Group {}\n", indent, group.kind(), group.separator());
                let inner = format!("{}{}", indent, INDENT_STEP);
                for token in group.fields().iter().flatten() {
                    out.push_str(&token.to_dump_string(&inner));
                }
                return out;
            }
            Token::Operator(op) => {
                let mut out = format!("{}Operator {}\n", indent, op.name());
                let inner = format!("{}{}", indent, INDENT_STEP);
                for arg in op.args() {
                    out.push_str(&arg.to_dump_string(&inner));
                }
                return out;
            }
        };

        format!("{}{}\n", indent, line)
    }
}

/// Dump a token list, one root per line.
pub fn dump_tokens(tokens: &[Token]) -> String {
    tokens.iter().map(|t| t.to_dump_string("")).collect()
}

/// Pretty-printed JSON array of the tokens.
pub fn to_json(tokens: &[Token]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(tokens)
}

/// YAML sequence of the tokens.
pub fn to_yaml(tokens: &[Token]) -> Result<String, serde_yaml::Error> {
    serde_yaml::to_string(tokens)
}

/// Named token renderings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum TokenFormat {
    Dump,
    Json,
    Yaml,
}

impl TokenFormat {
    pub fn all() -> &'static [TokenFormat] {
        &[TokenFormat::Dump, TokenFormat::Json, TokenFormat::Yaml]
    }

    pub fn name(&self) -> &'static str {
        match self {
            TokenFormat::Dump => "dump",
            TokenFormat::Json => "json",
            TokenFormat::Yaml => "yaml",
        }
    }

    pub fn render(&self, tokens: &[Token]) -> Result<String, String> {
        match self {
            TokenFormat::Dump => Ok(dump_tokens(tokens)),
            TokenFormat::Json => to_json(tokens)
                .map(|mut out| {
                    out.push('\n');
                    out
                })
                .map_err(|e| format!("JSON serialization failed: {}", e)),
            TokenFormat::Yaml => to_yaml(tokens).map_err(|e| format!("YAML serialization failed: {}", e)),
        }
    }
}

impl fmt::Display for TokenFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for TokenFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TokenFormat::all()
            .iter()
            .copied()
            .find(|format| format.name() == s)
            .ok_or_else(|| format!("unknown format `{}` (expected dump, json or yaml)", s))
    }
}
