//! The Node tagged union
//!
//!     [Node] wraps every element kind. Passes match on it directly; generic code goes
//!     through the slot table in [children](crate::specmd::ast::children) instead.
//!
//!     [Tree] is what the visitor engine consumes and produces: either a single node or a flat
//!     sequence of nodes. A sequence is what an import expands into.

use super::super::range::Span;
use super::blocks::{Code, DefinitionParagraph, List, ListItem, Note, Paragraph, Todo};
use super::document::{Document, Import};
use super::grammar::{Algorithm, Call, NonTerminal, OneOfProduction, Production, Rhs, Terminal};
use super::inlines::{Bold, DefinitionTerm, InlineCode, Italic, Link, Text};
use super::section::{Section, Subsection};

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Document(Document),
    Import(Import),
    Section(Section),
    Subsection(Subsection),
    Paragraph(Paragraph),
    DefinitionParagraph(DefinitionParagraph),
    DefinitionTerm(DefinitionTerm),
    Note(Note),
    Todo(Todo),
    List(List),
    ListItem(ListItem),
    Code(Code),
    Algorithm(Algorithm),
    Call(Call),
    Production(Production),
    OneOfProduction(OneOfProduction),
    Rhs(Rhs),
    NonTerminal(NonTerminal),
    Terminal(Terminal),
    Text(Text),
    InlineCode(InlineCode),
    Bold(Bold),
    Italic(Italic),
    Link(Link),
}

macro_rules! node_kinds {
    ($($variant:ident),* $(,)?) => {
        impl Node {
            /// Kind name, as used in snapshots and diagnostics
            pub fn kind(&self) -> &'static str {
                match self {
                    $(Node::$variant(_) => stringify!($variant),)*
                }
            }

            pub fn span(&self) -> Option<&Span> {
                match self {
                    $(Node::$variant(inner) => inner.span.as_ref(),)*
                }
            }
        }

        $(
            impl From<$variant> for Node {
                fn from(inner: $variant) -> Self {
                    Node::$variant(inner)
                }
            }
        )*
    };
}

node_kinds!(
    Document,
    Import,
    Section,
    Subsection,
    Paragraph,
    DefinitionParagraph,
    DefinitionTerm,
    Note,
    Todo,
    List,
    ListItem,
    Code,
    Algorithm,
    Call,
    Production,
    OneOfProduction,
    Rhs,
    NonTerminal,
    Terminal,
    Text,
    InlineCode,
    Bold,
    Italic,
    Link,
);

impl Node {
    /// Anchor id of a referenceable or sectioning node, once assigned
    pub fn id(&self) -> Option<&str> {
        match self {
            Node::Section(n) => n.id.as_deref(),
            Node::Subsection(n) => n.id.as_deref(),
            Node::DefinitionTerm(n) => n.id.as_deref(),
            Node::Note(n) => n.id.as_deref(),
            Node::Code(n) => n.id.as_deref(),
            Node::Algorithm(n) => n.id.as_deref(),
            Node::Production(n) => n.id.as_deref(),
            Node::OneOfProduction(n) => n.id.as_deref(),
            _ => None,
        }
    }

    /// Short human label: a title, a name or a leaf value
    pub fn label(&self) -> Option<String> {
        match self {
            Node::Document(n) => n.title.clone(),
            Node::Import(n) => Some(n.path.clone()),
            Node::Section(n) => Some(n.title.clone()),
            Node::Subsection(n) => Some(n.title.clone()),
            Node::DefinitionTerm(n) => Some(n.name.clone()),
            Node::Code(n) => n.lang.clone(),
            Node::Algorithm(n) => n.name().map(|name| format!("{}()", name)),
            Node::Call(n) => Some(n.name.clone()),
            Node::Production(n) => n.name().map(str::to_string),
            Node::OneOfProduction(n) => n.name().map(str::to_string),
            Node::NonTerminal(n) => Some(n.name.clone()),
            Node::Terminal(n) => Some(n.value.clone()),
            Node::Text(n) => Some(n.value.clone()),
            Node::InlineCode(n) => Some(n.value.clone()),
            Node::Link(n) => Some(n.url.clone()),
            _ => None,
        }
    }

    pub fn is_import(&self) -> bool {
        matches!(self, Node::Import(_))
    }
}

/// Input and output of a traversal: one node, or a flat run of nodes
#[derive(Debug, Clone, PartialEq)]
pub enum Tree {
    Node(Node),
    Seq(Vec<Node>),
}

impl Tree {
    pub fn into_nodes(self) -> Vec<Node> {
        match self {
            Tree::Node(node) => vec![node],
            Tree::Seq(nodes) => nodes,
        }
    }

    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Tree::Node(node) => Some(node),
            Tree::Seq(_) => None,
        }
    }
}

impl From<Node> for Tree {
    fn from(node: Node) -> Self {
        Tree::Node(node)
    }
}

impl From<Vec<Node>> for Tree {
    fn from(nodes: Vec<Node>) -> Self {
        Tree::Seq(nodes)
    }
}

impl From<Document> for Tree {
    fn from(document: Document) -> Self {
        Tree::Node(Node::Document(document))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names() {
        let node: Node = Text::new("hi").into();
        assert_eq!(node.kind(), "Text");
        let node: Node = Section::new("Intro", vec![]).into();
        assert_eq!(node.kind(), "Section");
        assert_eq!(node.label().as_deref(), Some("Intro"));
    }

    #[test]
    fn test_algorithm_label_uses_call_name() {
        let node: Node = Algorithm::new(Call::new("Parse", vec!["x".into()]), vec![]).into();
        assert_eq!(node.label().as_deref(), Some("Parse()"));
    }

    #[test]
    fn test_tree_into_nodes() {
        let single: Tree = Node::from(Text::new("a")).into();
        assert_eq!(single.into_nodes().len(), 1);
        let seq = Tree::Seq(vec![Text::new("a").into(), Text::new("b").into()]);
        assert!(seq.as_node().is_none());
        assert_eq!(seq.into_nodes().len(), 2);
    }
}
