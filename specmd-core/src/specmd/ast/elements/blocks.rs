//! Block-level elements
//!
//!     Paragraphs, notes, todos, lists and fenced code. Code blocks flagged as examples (or
//!     counter-examples) are numbered and given content-hash anchors by the annotator.

use super::super::range::Span;
use super::node::Node;

/// A paragraph of inline content
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Paragraph {
    pub contents: Vec<Node>,
    pub span: Option<Span>,
}

impl Paragraph {
    pub fn new(contents: Vec<Node>) -> Self {
        Self {
            contents,
            span: None,
        }
    }
}

/// A non-normative note, anchored by a hash of its text
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Note {
    pub contents: Vec<Node>,
    pub id: Option<String>,
    pub span: Option<Span>,
}

impl Note {
    pub fn new(contents: Vec<Node>) -> Self {
        Self {
            contents,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Todo {
    pub contents: Vec<Node>,
    pub span: Option<Span>,
}

impl Todo {
    pub fn new(contents: Vec<Node>) -> Self {
        Self {
            contents,
            span: None,
        }
    }
}

/// An ordered or unordered list; `items` holds [ListItem] nodes
#[derive(Debug, Clone, PartialEq, Default)]
pub struct List {
    pub ordered: bool,
    pub items: Vec<Node>,
    pub span: Option<Span>,
}

impl List {
    pub fn new(ordered: bool, items: Vec<Node>) -> Self {
        Self {
            ordered,
            items,
            span: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ListItem {
    pub contents: Vec<Node>,
    pub span: Option<Span>,
}

impl ListItem {
    pub fn new(contents: Vec<Node>) -> Self {
        Self {
            contents,
            span: None,
        }
    }
}

/// A fenced code block
///
/// `example` marks blocks that illustrate the document; `counter` additionally marks them as
/// counter-examples. Both kinds are numbered in one sequence.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Code {
    pub lang: Option<String>,
    pub code: String,
    pub example: bool,
    pub counter: bool,
    pub number: Option<u32>,
    pub id: Option<String>,
    pub span: Option<Span>,
}

impl Code {
    pub fn new(lang: Option<String>, code: impl Into<String>) -> Self {
        Self {
            lang,
            code: code.into(),
            ..Self::default()
        }
    }

    pub fn example(lang: Option<String>, code: impl Into<String>) -> Self {
        Self {
            example: true,
            ..Self::new(lang, code)
        }
    }

    pub fn counter_example(lang: Option<String>, code: impl Into<String>) -> Self {
        Self {
            example: true,
            counter: true,
            ..Self::new(lang, code)
        }
    }
}

/// A paragraph introducing one or more defined terms
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DefinitionParagraph {
    pub contents: Vec<Node>,
    pub span: Option<Span>,
}

impl DefinitionParagraph {
    pub fn new(contents: Vec<Node>) -> Self {
        Self {
            contents,
            span: None,
        }
    }

    pub fn at(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }
}
