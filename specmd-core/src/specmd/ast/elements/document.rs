//! Document and Import elements
//!
//!     A document is the root of one parsed file. A top-level document must have a title, an
//!     imported fragment does not need one.
//!
//!     An import is a placeholder the parser leaves wherever a heading links to another file:
//!
//!         # [Overview](Section 1 -- Overview.md)
//!
//!     The import resolver replaces each placeholder with the contents of the named document,
//!     so imports never survive into the annotated tree.

use super::super::range::Span;
use super::node::Node;
use super::section::Section;

/// Root node of a single parsed file
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    pub title: Option<String>,
    pub contents: Vec<Node>,
    pub span: Option<Span>,
}

impl Document {
    pub fn new(title: impl Into<String>, contents: Vec<Node>) -> Self {
        Self {
            title: Some(title.into()),
            contents,
            span: None,
        }
    }

    /// A document without a title, as produced for imported fragments
    pub fn untitled(contents: Vec<Node>) -> Self {
        Self {
            title: None,
            contents,
            span: None,
        }
    }

    pub fn at(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Iterate over the top-level sections
    pub fn iter_sections(&self) -> impl Iterator<Item = &Section> {
        self.contents.iter().filter_map(|node| match node {
            Node::Section(section) => Some(section),
            _ => None,
        })
    }
}

/// Placeholder for a document-relative import
#[derive(Debug, Clone, PartialEq)]
pub struct Import {
    /// Path as written in the source, possibly percent-encoded
    pub path: String,
    pub span: Option<Span>,
}

impl Import {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            span: None,
        }
    }

    pub fn at(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }
}
