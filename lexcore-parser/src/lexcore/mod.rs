//! Main module for lexcore library functionality

pub mod error;
pub mod languages;
pub mod lexing;
pub mod loader;
pub mod nesting;
pub mod operators;
pub mod patterns;
pub mod settings;
pub mod source;
pub mod span;
pub mod testing;
pub mod token;
pub mod transforms;

pub use error::{ConfigError, ParseError, RenderOptions};
pub use languages::Language;
pub use lexing::{parse_expression, tokenize, Parser};
pub use settings::LanguageSettings;
pub use source::Source;
pub use span::Span;
pub use token::{Group, GroupKind, Operator, Separator, Token};
