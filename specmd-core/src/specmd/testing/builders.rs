//! Short constructors for test trees
//!
//!     Every builder returns a [Node] (or a [Document]) with no ids, numbers or spans, the
//!     shape the parser hands to the import resolver.

use crate::specmd::ast::{
    Algorithm, Call, Code, DefinitionParagraph, DefinitionTerm, Document, Import, Italic, List,
    ListItem, Node, NonTerminal, Note, Paragraph, Production, Rhs, Section, Subsection, Terminal,
    Text,
};

pub fn doc(title: &str, contents: Vec<Node>) -> Document {
    Document::new(title, contents)
}

/// An untitled fragment, as produced for imported files
pub fn fragment(contents: Vec<Node>) -> Document {
    Document::untitled(contents)
}

pub fn section(title: &str, contents: Vec<Node>) -> Node {
    Section::new(title, contents).into()
}

/// A section whose heading carries a numbering override such as "3.2" or "A"
pub fn section_as(token: &str, title: &str, contents: Vec<Node>) -> Node {
    Section::new(title, contents).with_override(token).into()
}

pub fn subsection(title: &str, contents: Vec<Node>) -> Node {
    Subsection::new(title, contents).into()
}

pub fn import(path: &str) -> Node {
    Import::new(path).into()
}

pub fn text(value: &str) -> Node {
    Text::new(value).into()
}

pub fn para(value: &str) -> Node {
    Paragraph::new(vec![text(value)]).into()
}

pub fn note(value: &str) -> Node {
    Note::new(vec![para(value)]).into()
}

pub fn list(items: &[&str]) -> Node {
    let items = items
        .iter()
        .map(|item| Node::from(ListItem::new(vec![text(item)])))
        .collect();
    List::new(false, items).into()
}

pub fn example(code: &str) -> Node {
    Code::example(None, code).into()
}

pub fn counter_example(code: &str) -> Node {
    Code::counter_example(None, code).into()
}

pub fn algorithm(name: &str, args: &[&str], steps: &[&str]) -> Node {
    let call = Call::new(name, args.iter().map(|arg| arg.to_string()).collect());
    let steps = steps
        .iter()
        .map(|step| Node::from(ListItem::new(vec![text(step)])))
        .collect();
    Algorithm::new(call, steps).into()
}

/// A production with one alternative per entry; uppercase-initial words are non-terminals
pub fn production(name: &str, alternatives: &[&str]) -> Node {
    let rhs = alternatives
        .iter()
        .map(|alt| {
            let tokens = alt
                .split_whitespace()
                .map(|token| {
                    if token.starts_with(|c: char| c.is_ascii_uppercase()) {
                        Node::from(NonTerminal::new(token))
                    } else {
                        Node::from(Terminal::new(token))
                    }
                })
                .collect();
            Node::from(Rhs::new(tokens))
        })
        .collect();
    Production::new(1, NonTerminal::new(name), rhs).into()
}

/// A definition paragraph defining `term`, followed by `rest`
pub fn definition(term: &str, rest: &str) -> Node {
    let italic = vec![text(term)];
    DefinitionParagraph::new(vec![
        DefinitionTerm::new(term, italic).into(),
        text(rest),
    ])
    .into()
}

/// Italic text, as it appears before the parser turns it into a definition term
pub fn italic(value: &str) -> Node {
    Italic::new(vec![text(value)]).into()
}
