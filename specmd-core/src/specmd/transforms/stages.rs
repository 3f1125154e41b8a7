//! Individual transformation stages
//!
//! Each stage implements [`Runnable`](super::Runnable) over
//! [`Annotated`](crate::specmd::annotate::Annotated).

pub mod annotation;
pub mod validation;

pub use annotation::{AssignAnchors, NumberExamples, NumberSections};
pub use validation::CheckStructure;
