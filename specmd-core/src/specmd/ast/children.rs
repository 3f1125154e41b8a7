//! Child slot table
//!
//!     Every composite kind declares its child slots here, in a fixed order. This is the only
//!     place that knows which fields hold children; the visitor engine, the snapshot builder
//!     and the read-only iterators all go through it.
//!
//!     A slot is either a sequence (`contents`, `items`, `steps`, `rhs`, `rows`, `tokens`) or a
//!     single optional child (`call`, `token`). Leaves have no slots.
//!
//!     The engine detaches all slots of a node when it descends into it
//!     ([Node::take_slots]) and puts the rebuilt slots back when it closes the node
//!     ([Node::restore_slots]). Between those two calls the node is a shell.

use super::elements::{Document, Node};
use std::fmt;

/// One step of a traversal path: a slot name or a position inside a sequence slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Field(&'static str),
    Index(usize),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Field(name) => f.write_str(name),
            Key::Index(index) => write!(f, "{}", index),
        }
    }
}

/// An owned, detached child slot
#[derive(Debug, Clone, PartialEq)]
pub enum Slot {
    Seq(Vec<Node>),
    One(Option<Box<Node>>),
}

/// A borrowed child slot
#[derive(Debug, Clone, Copy)]
pub enum SlotRef<'a> {
    Seq(&'a [Node]),
    One(Option<&'a Node>),
}

impl<'a> SlotRef<'a> {
    pub fn nodes(self) -> Vec<&'a Node> {
        match self {
            SlotRef::Seq(nodes) => nodes.iter().collect(),
            SlotRef::One(node) => node.into_iter().collect(),
        }
    }
}

enum SlotMut<'a> {
    Seq(&'a mut Vec<Node>),
    One(&'a mut Option<Box<Node>>),
}

impl Node {
    /// Child slots of this node, in declared order
    pub fn slots(&self) -> Vec<(&'static str, SlotRef<'_>)> {
        match self {
            Node::Document(n) => vec![("contents", SlotRef::Seq(&n.contents))],
            Node::Section(n) => vec![("contents", SlotRef::Seq(&n.contents))],
            Node::Subsection(n) => vec![("contents", SlotRef::Seq(&n.contents))],
            Node::Paragraph(n) => vec![("contents", SlotRef::Seq(&n.contents))],
            Node::DefinitionParagraph(n) => vec![("contents", SlotRef::Seq(&n.contents))],
            Node::DefinitionTerm(n) => vec![("contents", SlotRef::Seq(&n.contents))],
            Node::Note(n) => vec![("contents", SlotRef::Seq(&n.contents))],
            Node::Todo(n) => vec![("contents", SlotRef::Seq(&n.contents))],
            Node::List(n) => vec![("items", SlotRef::Seq(&n.items))],
            Node::ListItem(n) => vec![("contents", SlotRef::Seq(&n.contents))],
            Node::Algorithm(n) => vec![
                ("call", SlotRef::One(n.call.as_deref())),
                ("steps", SlotRef::Seq(&n.steps)),
            ],
            Node::Production(n) => vec![
                ("token", SlotRef::One(n.token.as_deref())),
                ("rhs", SlotRef::Seq(&n.rhs)),
            ],
            Node::OneOfProduction(n) => vec![
                ("token", SlotRef::One(n.token.as_deref())),
                ("rows", SlotRef::Seq(&n.rows)),
            ],
            Node::Rhs(n) => vec![("tokens", SlotRef::Seq(&n.tokens))],
            Node::Bold(n) => vec![("contents", SlotRef::Seq(&n.contents))],
            Node::Italic(n) => vec![("contents", SlotRef::Seq(&n.contents))],
            Node::Link(n) => vec![("contents", SlotRef::Seq(&n.contents))],
            Node::Import(_)
            | Node::Code(_)
            | Node::Call(_)
            | Node::NonTerminal(_)
            | Node::Terminal(_)
            | Node::Text(_)
            | Node::InlineCode(_) => Vec::new(),
        }
    }

    fn slots_mut(&mut self) -> Vec<(&'static str, SlotMut<'_>)> {
        match self {
            Node::Document(n) => vec![("contents", SlotMut::Seq(&mut n.contents))],
            Node::Section(n) => vec![("contents", SlotMut::Seq(&mut n.contents))],
            Node::Subsection(n) => vec![("contents", SlotMut::Seq(&mut n.contents))],
            Node::Paragraph(n) => vec![("contents", SlotMut::Seq(&mut n.contents))],
            Node::DefinitionParagraph(n) => vec![("contents", SlotMut::Seq(&mut n.contents))],
            Node::DefinitionTerm(n) => vec![("contents", SlotMut::Seq(&mut n.contents))],
            Node::Note(n) => vec![("contents", SlotMut::Seq(&mut n.contents))],
            Node::Todo(n) => vec![("contents", SlotMut::Seq(&mut n.contents))],
            Node::List(n) => vec![("items", SlotMut::Seq(&mut n.items))],
            Node::ListItem(n) => vec![("contents", SlotMut::Seq(&mut n.contents))],
            Node::Algorithm(n) => vec![
                ("call", SlotMut::One(&mut n.call)),
                ("steps", SlotMut::Seq(&mut n.steps)),
            ],
            Node::Production(n) => vec![
                ("token", SlotMut::One(&mut n.token)),
                ("rhs", SlotMut::Seq(&mut n.rhs)),
            ],
            Node::OneOfProduction(n) => vec![
                ("token", SlotMut::One(&mut n.token)),
                ("rows", SlotMut::Seq(&mut n.rows)),
            ],
            Node::Rhs(n) => vec![("tokens", SlotMut::Seq(&mut n.tokens))],
            Node::Bold(n) => vec![("contents", SlotMut::Seq(&mut n.contents))],
            Node::Italic(n) => vec![("contents", SlotMut::Seq(&mut n.contents))],
            Node::Link(n) => vec![("contents", SlotMut::Seq(&mut n.contents))],
            Node::Import(_)
            | Node::Code(_)
            | Node::Call(_)
            | Node::NonTerminal(_)
            | Node::Terminal(_)
            | Node::Text(_)
            | Node::InlineCode(_) => Vec::new(),
        }
    }

    /// Detach every child slot, leaving empty containers behind
    pub(crate) fn take_slots(&mut self) -> Vec<(&'static str, Slot)> {
        self.slots_mut()
            .into_iter()
            .map(|(name, slot)| {
                let owned = match slot {
                    SlotMut::Seq(nodes) => Slot::Seq(std::mem::take(nodes)),
                    SlotMut::One(node) => Slot::One(node.take()),
                };
                (name, owned)
            })
            .collect()
    }

    /// Reattach slots previously taken with [Node::take_slots], in the same order
    ///
    /// A slot whose shape does not match the declared one is ignored.
    pub(crate) fn restore_slots(&mut self, slots: Vec<Slot>) {
        for ((_, target), slot) in self.slots_mut().into_iter().zip(slots) {
            match (target, slot) {
                (SlotMut::Seq(nodes), Slot::Seq(restored)) => *nodes = restored,
                (SlotMut::One(node), Slot::One(restored)) => *node = restored,
                _ => {}
            }
        }
    }

    pub fn has_children(&self) -> bool {
        self.slots()
            .into_iter()
            .any(|(_, slot)| !slot.nodes().is_empty())
    }

    /// Immediate children across all slots, in declared order
    pub fn children(&self) -> Vec<&Node> {
        self.slots()
            .into_iter()
            .flat_map(|(_, slot)| slot.nodes())
            .collect()
    }

    /// Pre-order iterator over all nodes below this one
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants::over(self.children())
    }
}

impl Document {
    /// Pre-order iterator over every node in the document body
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants::over(self.contents.iter().collect())
    }
}

/// Pre-order, depth-first iterator built on the slot table
pub struct Descendants<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Descendants<'a> {
    fn over(mut roots: Vec<&'a Node>) -> Self {
        roots.reverse();
        Self { stack: roots }
    }
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        let mut children = node.children();
        children.reverse();
        self.stack.extend(children);
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::specmd::ast::{
        Algorithm, Call, NonTerminal, Paragraph, Production, Rhs, Section, Terminal, Text,
    };

    fn sample() -> Node {
        Section::new(
            "Intro",
            vec![
                Paragraph::new(vec![Text::new("a").into()]).into(),
                Algorithm::new(Call::new("Run", vec![]), vec![Text::new("step").into()]).into(),
            ],
        )
        .into()
    }

    #[test]
    fn test_slot_order_for_algorithm() {
        let node: Node = Algorithm::new(Call::new("Run", vec![]), vec![]).into();
        let names: Vec<_> = node.slots().into_iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["call", "steps"]);
    }

    #[test]
    fn test_leaf_has_no_slots() {
        let node: Node = Text::new("x").into();
        assert!(node.slots().is_empty());
        assert!(!node.has_children());
    }

    #[test]
    fn test_descendants_preorder() {
        let kinds: Vec<_> = sample().descendants().map(Node::kind).collect();
        assert_eq!(
            kinds,
            vec!["Paragraph", "Text", "Algorithm", "Call", "Text"]
        );
    }

    #[test]
    fn test_take_and_restore_round_trip() {
        let mut node: Node = Production::new(
            1,
            NonTerminal::new("Value"),
            vec![Rhs::new(vec![Terminal::new("true").into()]).into()],
        )
        .into();
        let original = node.clone();

        let taken = node.take_slots();
        assert_eq!(taken.len(), 2);
        assert!(!node.has_children());

        node.restore_slots(taken.into_iter().map(|(_, slot)| slot).collect());
        assert_eq!(node, original);
    }

    #[test]
    fn test_restore_ignores_mismatched_shape() {
        let mut node: Node = Algorithm::new(Call::new("Run", vec![]), vec![]).into();
        node.take_slots();
        node.restore_slots(vec![Slot::Seq(vec![]), Slot::Seq(vec![Text::new("s").into()])]);
        match &node {
            Node::Algorithm(alg) => {
                assert!(alg.call.is_none());
                assert_eq!(alg.steps.len(), 1);
            }
            other => panic!("unexpected {}", other.kind()),
        }
    }

    #[test]
    fn test_key_display() {
        assert_eq!(Key::Field("contents").to_string(), "contents");
        assert_eq!(Key::Index(3).to_string(), "3");
    }
}
