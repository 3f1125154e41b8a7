//! Transform pipeline infrastructure
//!
//! Stages of a compilation are small values implementing [`Runnable`]. A [`Transform`] wraps
//! a chain of them; chaining only compiles when each stage's output type is the next stage's
//! input type.
//!
//! # The `Runnable` Trait
//!
//! ```rust,ignore
//! pub trait Runnable<I, O> {
//!     fn run(&self, input: I) -> Result<O, CompileError>;
//! }
//! ```
//!
//! # Composing
//!
//! ```rust,ignore
//! let pipeline = Transform::from_fn(Ok)
//!     .then(CheckStructure::new(true))
//!     .then(NumberSections::new())
//!     .then(AssignAnchors::new(AnchorOptions::default()));
//! // Result: Transform<Annotated, Annotated>
//! ```
//!
//! # Static Lazy Transforms
//!
//! Common pipelines are pre-built as statics using `once_cell::sync::Lazy`, see
//! [`standard`]:
//!
//! ```rust,ignore
//! use specmd_core::specmd::transforms::standard::ANNOTATE;
//!
//! let annotated = ANNOTATE.run(Annotated::new(document, Biblio::new()))?;
//! ```
//!
//! # Module Organization
//!
//! - [`stages`]: the individual annotation stages
//! - [`standard`]: pre-built pipelines

pub mod stages;
pub mod standard;

use crate::specmd::error::CompileError;

/// Anything that can transform an input into an output
pub trait Runnable<I, O> {
    fn run(&self, input: I) -> Result<O, CompileError>;
}

/// A composable transformation pipeline from `I` to `O`
pub struct Transform<I, O> {
    run_fn: Box<dyn Fn(I) -> Result<O, CompileError> + Send + Sync>,
}

impl<I, O> Transform<I, O> {
    /// Create a transform from a function
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(I) -> Result<O, CompileError> + Send + Sync + 'static,
    {
        Transform {
            run_fn: Box::new(f),
        }
    }

    /// Chain a stage after this transform
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

    /// Chain a pre-built static transform after this one
    pub fn then_transform<O2>(self, next: &'static Transform<O, O2>) -> Transform<I, O2>
    where
        I: 'static,
        O: 'static,
        O2: 'static,
    {
        let prev_run = self.run_fn;
        Transform {
            run_fn: Box::new(move |input| {
                let intermediate = prev_run(input)?;
                next.run(intermediate)
            }),
        }
    }

    pub fn run(&self, input: I) -> Result<O, CompileError> {
        (self.run_fn)(input)
    }
}

impl<I, O> Runnable<I, O> for Transform<I, O>
where
    I: 'static,
    O: 'static,
{
    fn run(&self, input: I) -> Result<O, CompileError> {
        Transform::run(self, input)
    }
}
