//! Inline elements

use super::super::range::Span;
use super::node::Node;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Text {
    pub value: String,
    pub span: Option<Span>,
}

impl Text {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            span: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct InlineCode {
    pub value: String,
    pub span: Option<Span>,
}

impl InlineCode {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            span: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Bold {
    pub contents: Vec<Node>,
    pub span: Option<Span>,
}

impl Bold {
    pub fn new(contents: Vec<Node>) -> Self {
        Self {
            contents,
            span: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Italic {
    pub contents: Vec<Node>,
    pub span: Option<Span>,
}

impl Italic {
    pub fn new(contents: Vec<Node>) -> Self {
        Self {
            contents,
            span: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Link {
    pub url: String,
    pub contents: Vec<Node>,
    pub span: Option<Span>,
}

impl Link {
    pub fn new(url: impl Into<String>, contents: Vec<Node>) -> Self {
        Self {
            url: url.into(),
            contents,
            span: None,
        }
    }
}

/// The term introduced by a definition paragraph
///
/// `name` is the plain text of the term and drives the `def-` anchor.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DefinitionTerm {
    pub name: String,
    pub contents: Vec<Node>,
    pub id: Option<String>,
    pub span: Option<Span>,
}

impl DefinitionTerm {
    pub fn new(name: impl Into<String>, contents: Vec<Node>) -> Self {
        Self {
            name: name.into(),
            contents,
            ..Self::default()
        }
    }
}
