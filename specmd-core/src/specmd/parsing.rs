//! Document parsing
//!
//!     The compiler talks to parsers through the [DocumentParser] trait. A parser turns the
//!     source of one file into a draft [Document]; imports stay in the tree as placeholders
//!     for the import resolver.
//!
//!     The start context tells the parser where the file sits: the top-level file must open
//!     with a `# Title` heading, while an imported file is a fragment of some other document
//!     and has no title of its own.
//!
//!     [OutlineParser] is the reader shipped with the crate. It understands the common,
//!     line-oriented subset of the dialect; see [outline] for the rules.

pub mod inline;
pub mod outline;

pub use inline::parse_inlines;
pub use outline::OutlineParser;

use crate::specmd::ast::Document;
use crate::specmd::error::ParseError;
use std::path::Path;

/// Where the file being parsed sits in the import tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartContext {
    /// The top-level file of a run
    Initial,
    /// A file reached through an import
    Imported,
}

pub trait DocumentParser: Send + Sync {
    fn parse(
        &self,
        source: &str,
        start: StartContext,
        file: Option<&Path>,
    ) -> Result<Document, ParseError>;
}
