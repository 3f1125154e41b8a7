//! Numbering and identity annotation
//!
//!     Turns a resolved document into an annotated one: sections get hierarchical numbers,
//!     examples get sequence numbers, and every sectioning and referenceable node gets an
//!     anchor registered in the run's [Biblio].
//!
//!     The passes run in a fixed order, as stages of a [transform](crate::specmd::transforms)
//!     pipeline:
//!
//!         check_structure → number_sections → number_examples → assign_anchors
//!
//!     Numbering must precede anchoring. Example numbering is independent of both.
//!
//! ## Modules
//!
//! - `validate` - structural checks on the resolved document
//! - `numbering` - hierarchical section numbering and override validation
//! - `examples` - example sequence numbers
//! - `anchors` - anchor ids and Biblio registration
//! - `slug` - title to anchor slug
//! - `hash` - stable content hashes for example and note anchors

pub mod anchors;
pub mod examples;
pub mod hash;
pub mod numbering;
pub mod slug;
pub mod validate;

pub use anchors::{assign_anchors, AnchorOptions};
pub use examples::number_examples;
pub use numbering::number_sections;
pub use slug::anchorize;
pub use validate::check_structure;

use crate::specmd::ast::Document;
use crate::specmd::biblio::Biblio;
use crate::specmd::error::CompileResult;
use crate::specmd::transforms::standard::annotate_pipeline;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotateOptions {
    pub anchors: AnchorOptions,
    /// Reject documents without a title
    pub require_title: bool,
}

impl Default for AnnotateOptions {
    fn default() -> Self {
        Self {
            anchors: AnchorOptions::default(),
            require_title: true,
        }
    }
}

/// A document moving through the annotation stages, together with its Biblio
#[derive(Debug, Clone, PartialEq)]
pub struct Annotated {
    pub document: Document,
    pub biblio: Biblio,
}

impl Annotated {
    pub fn new(document: Document, biblio: Biblio) -> Self {
        Self { document, biblio }
    }
}

/// Run every annotation pass over a resolved document
pub fn annotate(
    document: Document,
    biblio: Biblio,
    options: &AnnotateOptions,
) -> CompileResult<Annotated> {
    annotate_pipeline(options.clone()).run(Annotated::new(document, biblio))
}
