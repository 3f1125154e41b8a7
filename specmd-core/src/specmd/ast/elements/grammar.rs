//! Algorithm and grammar elements
//!
//!     Algorithms are introduced by a call signature followed by numbered steps:
//!
//!         ParseQuery(source) :
//!           1. Let tokens be the result of Lex(source).
//!
//!     Productions define grammar rules. `def_type` counts the colons in the definition
//!     (1 syntactic, 2 lexical, 3 regular expression). A one-of production lists its
//!     alternatives as rows of terminals:
//!
//!         Sign :: one of
//!           + -
//!
//!     Both are referenceable. Their anchors come from the call or token name, so two
//!     algorithms with the same name share one anchor.

use super::super::range::Span;
use super::node::Node;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Algorithm {
    /// The signature, always a [Call] when produced by the reader
    pub call: Option<Box<Node>>,
    pub steps: Vec<Node>,
    pub id: Option<String>,
    pub span: Option<Span>,
}

impl Algorithm {
    pub fn new(call: Call, steps: Vec<Node>) -> Self {
        Self {
            call: Some(Box::new(Node::Call(call))),
            steps,
            ..Self::default()
        }
    }

    /// Name of the algorithm, taken from its call signature
    pub fn name(&self) -> Option<&str> {
        match self.call.as_deref() {
            Some(Node::Call(call)) => Some(call.name.as_str()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Call {
    pub name: String,
    pub args: Vec<String>,
    pub span: Option<Span>,
}

impl Call {
    pub fn new(name: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            name: name.into(),
            args,
            span: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Production {
    pub def_type: u8,
    /// The defined non-terminal
    pub token: Option<Box<Node>>,
    /// Alternatives, each an [Rhs]
    pub rhs: Vec<Node>,
    pub id: Option<String>,
    pub span: Option<Span>,
}

impl Production {
    pub fn new(def_type: u8, token: NonTerminal, rhs: Vec<Node>) -> Self {
        Self {
            def_type,
            token: Some(Box::new(Node::NonTerminal(token))),
            rhs,
            ..Self::default()
        }
    }

    pub fn name(&self) -> Option<&str> {
        token_name(self.token.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct OneOfProduction {
    pub def_type: u8,
    pub token: Option<Box<Node>>,
    /// Rows of alternatives, each an [Rhs] of terminals
    pub rows: Vec<Node>,
    pub id: Option<String>,
    pub span: Option<Span>,
}

impl OneOfProduction {
    pub fn new(def_type: u8, token: NonTerminal, rows: Vec<Node>) -> Self {
        Self {
            def_type,
            token: Some(Box::new(Node::NonTerminal(token))),
            rows,
            ..Self::default()
        }
    }

    pub fn name(&self) -> Option<&str> {
        token_name(self.token.as_deref())
    }
}

fn token_name(token: Option<&Node>) -> Option<&str> {
    match token {
        Some(Node::NonTerminal(nt)) => Some(nt.name.as_str()),
        _ => None,
    }
}

/// One right-hand side of a production
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Rhs {
    pub tokens: Vec<Node>,
    pub span: Option<Span>,
}

impl Rhs {
    pub fn new(tokens: Vec<Node>) -> Self {
        Self { tokens, span: None }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct NonTerminal {
    pub name: String,
    pub span: Option<Span>,
}

impl NonTerminal {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            span: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Terminal {
    pub value: String,
    pub span: Option<Span>,
}

impl Terminal {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            span: None,
        }
    }
}
