//! Standard pipelines
//!
//! [`pipeline`] builds the chain for a language up to a chosen [`Stage`].

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::lexcore::settings::LanguageSettings;
use crate::lexcore::source::Source;
use crate::lexcore::token::Token;
use crate::lexcore::transforms::stages::{
    ExpandTemporaries, FlatTokenization, GroupNesting, Masking, OperatorResolution,
};
use crate::lexcore::transforms::Transform;

/// Source to token list
pub type TokenTransform = Transform<Arc<Source>, Vec<Token>>;

/// Where a pipeline stops
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Span-sorted leaves
    Flat,
    /// Brackets paired into groups
    Nested,
    /// Operator trees, temporaries kept
    Resolved,
    /// Operator trees with top-level temporaries spliced back
    Expanded,
}

impl Stage {
    pub fn all() -> &'static [Stage] {
        &[Stage::Flat, Stage::Nested, Stage::Resolved, Stage::Expanded]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Stage::Flat => "flat",
            Stage::Nested => "nested",
            Stage::Resolved => "resolved",
            Stage::Expanded => "expanded",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Stage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Stage::all()
            .iter()
            .copied()
            .find(|stage| stage.name() == s)
            .ok_or_else(|| format!("unknown stage `{}`", s))
    }
}

/// Pipeline for `settings` that stops after `stage`.
pub fn pipeline(settings: &'static LanguageSettings, stage: Stage) -> TokenTransform {
    traced_pipeline(settings, stage, |_, _| {})
}

/// Like [`pipeline`], calling `observer` with the stage and output of every
/// stage that runs.
pub fn traced_pipeline<F>(settings: &'static LanguageSettings, stage: Stage, observer: F) -> TokenTransform
where
    F: Fn(Stage, &[Token]) + Clone + Send + Sync + 'static,
{
    let tap = |at: Stage| {
        let observer = observer.clone();
        move |tokens: &Vec<Token>| observer(at, tokens)
    };

    let flat = Transform::from_fn(|source: Arc<Source>| Ok(source))
        .then(Masking::new(settings))
        .then(FlatTokenization::new())
        .tap(tap(Stage::Flat));
    if stage == Stage::Flat {
        return flat;
    }

    let nested = flat
        .then(GroupNesting::for_language(settings))
        .tap(tap(Stage::Nested));
    if stage == Stage::Nested {
        return nested;
    }

    let resolved = nested
        .then(OperatorResolution::new(settings))
        .tap(tap(Stage::Resolved));
    if stage == Stage::Resolved {
        return resolved;
    }

    resolved.then(ExpandTemporaries::new()).tap(tap(Stage::Expanded))
}
