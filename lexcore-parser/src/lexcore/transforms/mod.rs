//! Composable stage pipelines
//!
//! The engine's passes are exposed as stages implementing [`Runnable`], and
//! [`Transform`] chains them with type-checked `.then()` calls:
//!
//! ```rust,ignore
//! let pipeline = Transform::from_fn(Ok)
//!     .then(Masking::new(settings))          // Arc<Source> -> Parser
//!     .then(FlatTokenization::new())         // Parser -> Vec<Token>
//!     .then(GroupNesting::new(true))         // Vec<Token> -> Vec<Token>
//!     .then(OperatorResolution::new(settings));
//! ```
//!
//! The compiler enforces that each stage's input is the previous stage's
//! output. Every stage fails with the engine's [`ParseError`], so a pipeline
//! error renders with source context like any other.
//!
//! # Module Organization
//!
//! - [`stages`]: the individual stages
//! - [`standard`]: pre-built pipelines per language and [`standard::Stage`]

pub mod stages;
pub mod standard;

use crate::lexcore::error::ParseError;

/// Anything that turns an `I` into an `O`
pub trait Runnable<I, O> {
    fn run(&self, input: I) -> Result<O, ParseError>;
}

/// A composable transformation from `I` to `O`
pub struct Transform<I, O> {
    run_fn: Box<dyn Fn(I) -> Result<O, ParseError> + Send + Sync>,
}

impl<I, O> Transform<I, O> {
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(I) -> Result<O, ParseError> + Send + Sync + 'static,
    {
        Transform { run_fn: Box::new(f) }
    }

    /// Chain a stage after this transform.
    pub fn then<O2, S>(self, stage: S) -> Transform<I, O2>
    where
        S: Runnable<O, O2> + Send + Sync + 'static,
        I: 'static,
        O: 'static,
        O2: 'static,
    {
        let prev_run = self.run_fn;
        Transform {
            run_fn: Box::new(move |input| {
                let intermediate = prev_run(input)?;
                stage.run(intermediate)
            }),
        }
    }

    /// Observe the intermediate output without changing it.
    pub fn tap<F>(self, observer: F) -> Transform<I, O>
    where
        F: Fn(&O) + Send + Sync + 'static,
        I: 'static,
        O: 'static,
    {
        let prev_run = self.run_fn;
        Transform {
            run_fn: Box::new(move |input| {
                let output = prev_run(input)?;
                observer(&output);
                Ok(output)
            }),
        }
    }

    pub fn run(&self, input: I) -> Result<O, ParseError> {
        (self.run_fn)(input)
    }
}

impl<I, O> Runnable<I, O> for Transform<I, O>
where
    I: 'static,
    O: 'static,
{
    fn run(&self, input: I) -> Result<O, ParseError> {
        Transform::run(self, input)
    }
}
