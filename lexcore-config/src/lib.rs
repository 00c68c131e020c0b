//! Shared configuration loader for the lexcore tools.
//!
//! `defaults/lexcore.default.toml` is embedded into every binary so that the
//! documented defaults and the runtime behavior cannot drift apart. Tools
//! layer user files and command-line overrides on top via [`Loader`] before
//! deserializing into [`LexcoreConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use lexcore_parser::lexcore::token::TokenFormat;
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/lexcore.default.toml");

/// Top-level configuration consumed by lexcore tools.
#[derive(Debug, Clone, Deserialize)]
pub struct LexcoreConfig {
    pub diagnostics: DiagnosticsConfig,
    pub dump: DumpConfig,
    pub pipeline: PipelineConfig,
}

/// How parse errors are rendered.
#[derive(Debug, Clone, Deserialize)]
pub struct DiagnosticsConfig {
    pub color: bool,
    pub context_lines: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DumpConfig {
    pub format: TokenFormat,
}

/// Pipeline defaults. Language and stage are kept as names; the tools
/// validate them against the parser's tables.
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    pub language: String,
    pub stage: String,
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (command-line flags).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<LexcoreConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<LexcoreConfig, ConfigError> {
    Loader::new().build()
}
