//! Traversal frames
//!
//!     A frame is one open composite node on the engine's stack. Its child slots are detached
//!     when the frame opens and kept here as cursors: the children not yet visited, and the
//!     outcome of every child already visited. Nothing is written back into the node until
//!     the frame closes, so edits to a sibling list become visible all at once.
//!
//!     The bottom frame has no node. It holds the tree passed to the engine, either a single
//!     root node or a root sequence.

use crate::specmd::ast::{Key, Node, Slot, Tree};
use std::vec;

/// What became of a visited child
#[derive(Debug)]
pub(crate) enum Outcome {
    Keep(Node),
    Delete,
    Replace(Tree),
}

#[derive(Debug)]
struct Cursor {
    /// Slot name, absent for the root
    field: Option<&'static str>,
    single: bool,
    pending: vec::IntoIter<Node>,
    next_index: usize,
    done: Vec<Outcome>,
}

impl Cursor {
    fn new(field: Option<&'static str>, single: bool, nodes: Vec<Node>) -> Self {
        Self {
            field,
            single,
            pending: nodes.into_iter(),
            next_index: 0,
            done: Vec::new(),
        }
    }

    /// Apply the recorded outcomes; children never reached are kept as they were
    fn finish(self) -> Vec<Node> {
        let mut nodes = Vec::with_capacity(self.done.len() + self.pending.len());
        for outcome in self.done {
            match outcome {
                Outcome::Keep(node) | Outcome::Replace(Tree::Node(node)) => nodes.push(node),
                Outcome::Replace(Tree::Seq(seq)) => nodes.extend(seq),
                Outcome::Delete => {}
            }
        }
        nodes.extend(self.pending);
        nodes
    }
}

#[derive(Debug)]
pub(crate) struct Frame {
    /// The open node with its slots detached; `None` for the root frame
    pub(crate) node: Option<Node>,
    cursors: Vec<Cursor>,
    current: usize,
    /// Path keys pushed when this frame's node was entered
    pub(crate) keys: usize,
}

impl Frame {
    pub(crate) fn root(tree: Tree) -> Self {
        let cursor = match tree {
            Tree::Node(node) => Cursor::new(None, true, vec![node]),
            Tree::Seq(nodes) => Cursor::new(None, false, nodes),
        };
        Self {
            node: None,
            cursors: vec![cursor],
            current: 0,
            keys: 0,
        }
    }

    pub(crate) fn open(mut node: Node, keys: usize) -> Self {
        let cursors = node
            .take_slots()
            .into_iter()
            .map(|(field, slot)| match slot {
                Slot::Seq(nodes) => Cursor::new(Some(field), false, nodes),
                Slot::One(node) => {
                    Cursor::new(Some(field), true, node.map(|boxed| *boxed).into_iter().collect())
                }
            })
            .collect();
        Self {
            node: Some(node),
            cursors,
            current: 0,
            keys,
        }
    }

    /// Take the next unvisited child, pushing its keys onto `path`
    ///
    /// Returns the child and the number of keys pushed.
    pub(crate) fn next_child(&mut self, path: &mut Vec<Key>) -> Option<(Node, usize)> {
        while let Some(cursor) = self.cursors.get_mut(self.current) {
            if let Some(child) = cursor.pending.next() {
                let index = cursor.next_index;
                cursor.next_index += 1;
                let mut pushed = 0;
                if let Some(field) = cursor.field {
                    path.push(Key::Field(field));
                    pushed += 1;
                }
                if !cursor.single {
                    path.push(Key::Index(index));
                    pushed += 1;
                }
                return Some((child, pushed));
            }
            self.current += 1;
        }
        None
    }

    /// Record the outcome of the child most recently returned by [Frame::next_child]
    pub(crate) fn record(&mut self, outcome: Outcome) {
        if let Some(cursor) = self.cursors.get_mut(self.current) {
            cursor.done.push(outcome);
        }
    }

    /// Rebuild the node from its cursors
    pub(crate) fn close(self) -> Option<Node> {
        let mut node = self.node?;
        let kind = node.kind();
        let slots = self
            .cursors
            .into_iter()
            .map(|cursor| {
                let single = cursor.single;
                let field = cursor.field.unwrap_or_default();
                let mut nodes = cursor.finish();
                if !single {
                    return Slot::Seq(nodes);
                }
                if nodes.len() > 1 {
                    tracing::warn!(
                        kind,
                        field,
                        count = nodes.len(),
                        "sequence replacement in a single-node slot, keeping the first node"
                    );
                }
                let first = if nodes.is_empty() {
                    None
                } else {
                    Some(Box::new(nodes.swap_remove(0)))
                };
                Slot::One(first)
            })
            .collect();
        node.restore_slots(slots);
        Some(node)
    }

    /// Close the root frame into the traversal result
    pub(crate) fn close_root(mut self) -> Tree {
        let single = self.cursors.first().map(|c| c.single).unwrap_or(false);
        let Some(cursor) = self.cursors.pop() else {
            return Tree::Seq(Vec::new());
        };
        if !single {
            return Tree::Seq(cursor.finish());
        }
        let mut outcomes = cursor.done.into_iter();
        match outcomes.next() {
            Some(Outcome::Keep(node)) => Tree::Node(node),
            Some(Outcome::Replace(tree)) => tree,
            Some(Outcome::Delete) => Tree::Seq(Vec::new()),
            None => {
                let mut rest: Vec<Node> = cursor.pending.collect();
                if rest.len() == 1 {
                    Tree::Node(rest.remove(0))
                } else {
                    Tree::Seq(rest)
                }
            }
        }
    }
}
