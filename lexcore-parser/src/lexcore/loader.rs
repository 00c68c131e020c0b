//! Source loading
//!
//! [`SourceLoader`] reads a file (or takes a string) once and runs pipelines
//! on it. The loaded [`Source`] is shared, so every token produced from it
//! points back at the same buffer.
//!
//! ```rust,ignore
//! use lexcore_parser::lexcore::loader::SourceLoader;
//! use lexcore_parser::lexcore::Language;
//!
//! let loader = SourceLoader::from_path("fixtures/sample.js")?;
//! let trees = loader.parse(Language::Js)?;
//! ```

use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::lexcore::error::ParseError;
use crate::lexcore::languages::Language;
use crate::lexcore::source::Source;
use crate::lexcore::token::Token;
use crate::lexcore::transforms::standard::{pipeline, Stage, TokenTransform};

/// Error that can occur when loading and tokenizing a source
#[derive(Debug, Clone)]
pub enum LoaderError {
    /// The file could not be read
    Io { path: String, message: String },
    Parse(ParseError),
}

impl fmt::Display for LoaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoaderError::Io { path, message } => write!(f, "cannot read {}: {}", path, message),
            LoaderError::Parse(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for LoaderError {}

impl From<ParseError> for LoaderError {
    fn from(err: ParseError) -> Self {
        LoaderError::Parse(err)
    }
}

#[derive(Debug)]
pub struct SourceLoader {
    source: Arc<Source>,
}

impl SourceLoader {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, LoaderError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|err| LoaderError::Io {
            path: path.display().to_string(),
            message: err.to_string(),
        })?;
        Ok(SourceLoader {
            source: Source::new(path.display().to_string(), &text),
        })
    }

    pub fn from_string<S: AsRef<str>>(text: S) -> Self {
        SourceLoader {
            source: Source::anonymous(text.as_ref()),
        }
    }

    /// Run a custom pipeline on the source.
    pub fn with(&self, transform: &TokenTransform) -> Result<Vec<Token>, LoaderError> {
        Ok(transform.run(self.source.clone())?)
    }

    /// Run the standard pipeline of `language` up to `stage`.
    pub fn run(&self, language: Language, stage: Stage) -> Result<Vec<Token>, LoaderError> {
        self.with(&pipeline(language.settings(), stage))
    }

    /// Flat, span-sorted tokens.
    pub fn tokenize_flat(&self, language: Language) -> Result<Vec<Token>, LoaderError> {
        self.run(language, Stage::Flat)
    }

    /// Tokens with brackets nested into groups.
    pub fn tokenize(&self, language: Language) -> Result<Vec<Token>, LoaderError> {
        self.run(language, Stage::Nested)
    }

    /// Operator trees.
    pub fn parse(&self, language: Language) -> Result<Vec<Token>, LoaderError> {
        self.run(language, Stage::Resolved)
    }

    pub fn source(&self) -> &Arc<Source> {
        &self.source
    }

    /// Guess the language from the file extension of the source path.
    pub fn detect_language(&self) -> Option<Language> {
        Path::new(self.source.path())
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Language::from_extension)
    }
}
