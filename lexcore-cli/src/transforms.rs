//! Pipeline runs behind the CLI
//!
//! A run is a language, the stage its pipeline stops at and the rendering of
//! the resulting tokens.

use lexcore_parser::lexcore::loader::{LoaderError, SourceLoader};
use lexcore_parser::lexcore::token::{dump_tokens, TokenFormat};
use lexcore_parser::lexcore::transforms::standard::{pipeline, traced_pipeline, Stage, TokenTransform};
use lexcore_parser::lexcore::{Language, RenderOptions};

pub struct Run {
    pub language: Language,
    pub stage: Stage,
    pub format: TokenFormat,
    /// Dump every intermediate stage to stderr
    pub trace: bool,
}

impl Run {
    fn transform(&self) -> TokenTransform {
        let settings = self.language.settings();
        if self.trace {
            traced_pipeline(settings, self.stage, |stage, tokens| {
                eprintln!("== {} ({} tokens)", stage, tokens.len());
                eprint!("{}", dump_tokens(tokens));
            })
        } else {
            pipeline(settings, self.stage)
        }
    }

    /// Run on a loaded source. Parse errors come back rendered with context.
    pub fn execute(&self, loader: &SourceLoader, render: &RenderOptions) -> Result<String, String> {
        let tokens = loader.with(&self.transform()).map_err(|err| match err {
            LoaderError::Parse(err) => err.render(render),
            other => other.to_string(),
        })?;
        self.format.render(&tokens)
    }
}

/// Table of the built-in languages and their extensions.
pub fn list_languages() -> String {
    let mut out = String::from("Available languages:\n\n");
    for language in Language::all() {
        out.push_str(&format!(
            "  {:<10} .{}\n",
            language.name(),
            language.extensions().join(", .")
        ));
    }
    out
}

/// Language given on the command line, else guessed from the file, else the
/// configured default.
pub fn resolve_language(explicit: Option<&str>, loader: &SourceLoader, fallback: &str) -> Result<Language, String> {
    match explicit {
        Some(name) => name.parse(),
        None => match loader.detect_language() {
            Some(language) => Ok(language),
            None => fallback.parse(),
        },
    }
}
