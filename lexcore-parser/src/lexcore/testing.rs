//! Testing utilities
//!
//!     Helpers shared by the unit tests and the crate's integration tests.
//!
//!     Token trees are compared through their dump rendering (see
//!     [`dump_tokens`]); a dump names every token kind, group discipline and
//!     operator fixity, so an inline snapshot of it pins the whole tree:
//!
//!     ```rust,ignore
//!     use crate::lexcore::testing::dump;
//!     use crate::lexcore::Language;
//!
//!     insta::assert_snapshot!(dump(Language::Js, "a * (b + c)"), @r"
//!     Operator bin*
//!       Word(a)
//!       ParensGroup single
//!         Word(b)
//!         Symbol +
//!         Word(c)
//!     ");
//!     ```
//!
//!     Sample inputs that are longer than a line live in `fixtures/` at the
//!     workspace root; load them with [`fixture`].
//!
//!     These helpers panic on failure, they are meant for tests only.

use crate::lexcore::error::ParseError;
use crate::lexcore::languages::Language;
use crate::lexcore::source::Source;
use crate::lexcore::token::{dump_tokens, Token};
use crate::lexcore::transforms::standard::{pipeline, Stage};

/// Get a path relative to the workspace root.
pub fn workspace_path(relative_path: &str) -> std::path::PathBuf {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let workspace_root = std::path::Path::new(manifest_dir).parent().unwrap();
    workspace_root.join(relative_path)
}

/// Contents of `fixtures/<name>`.
pub fn fixture(name: &str) -> String {
    let path = workspace_path(&format!("fixtures/{}", name));
    std::fs::read_to_string(&path).unwrap_or_else(|err| panic!("fixture {}: {}", path.display(), err))
}

/// Run `text` through the pipeline of `language` up to `stage`.
pub fn run_stage(language: Language, stage: Stage, text: &str) -> Result<Vec<Token>, ParseError> {
    pipeline(language.settings(), stage).run(Source::anonymous(text))
}

/// Dump of the resolved operator trees of `text`.
pub fn dump(language: Language, text: &str) -> String {
    dump_stage(language, Stage::Resolved, text)
}

pub fn dump_stage(language: Language, stage: Stage, text: &str) -> String {
    match run_stage(language, stage, text) {
        Ok(tokens) => dump_tokens(&tokens),
        Err(err) => panic!("{} failed on {:?}: {}", language, text, err),
    }
}

/// The error `text` fails with, up to operator resolution.
pub fn parse_error(language: Language, text: &str) -> ParseError {
    match run_stage(language, Stage::Resolved, text) {
        Ok(tokens) => panic!("{} accepted {:?}:\n{}", language, text, dump_tokens(&tokens)),
        Err(err) => err,
    }
}

/// Source text of every flat token, in order.
pub fn flat_texts(language: Language, text: &str) -> Vec<String> {
    match run_stage(language, Stage::Flat, text) {
        Ok(tokens) => tokens.iter().map(|t| t.span().content()).collect(),
        Err(err) => panic!("{} failed on {:?}: {}", language, text, err),
    }
}
