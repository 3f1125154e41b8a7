//! Visitor engine
//!
//!     Generic enter/leave traversal over the tree model. Every annotation pass and the import
//!     splicer are built on it.
//!
//! Order
//!
//!     `enter` is called pre-order, children are visited depth first in slot order, `leave` is
//!     called post-order. Leaves get both calls.
//!
//! Return protocol
//!
//!     Each callback returns a [VisitAction]:
//!
//!     - `Continue`: no structural effect. Callbacks may still update the node in place.
//!     - `Skip`: from `enter`, do not descend and do not call `leave` for this node.
//!     - `Delete`: remove the node from its parent (unset it, for a single-node slot).
//!     - `Replace(tree)`: schedule a replacement. From `enter`, a node replacement is descended
//!       into instead of the original; a sequence replacement is not descended. A sequence
//!       replacement in a sequence slot is spliced in place, one level deep.
//!     - `Break`: stop everywhere. The tree is returned with the edits made so far.
//!
//!     Edits are batched per parent: a node's slots are detached when it is entered and only
//!     rebuilt once all of its children have been visited, right before its own `leave`.
//!
//! Implementation
//!
//!     The engine keeps an explicit stack of frames rather than recursing, so
//!     deeply nested documents cannot exhaust the call stack and `Break` simply unwinds the
//!     stack.

mod context;
mod frame;

pub use context::VisitContext;

use crate::specmd::ast::{Document, Key, Node, Tree};
use frame::{Frame, Outcome};
use std::convert::Infallible;

/// What a callback asks the engine to do with the current node
#[derive(Debug, Clone, PartialEq, Default)]
pub enum VisitAction {
    #[default]
    Continue,
    Skip,
    Break,
    Delete,
    Replace(Tree),
}

impl VisitAction {
    pub fn replace(node: impl Into<Node>) -> Self {
        VisitAction::Replace(Tree::Node(node.into()))
    }

    pub fn splice(nodes: Vec<Node>) -> Self {
        VisitAction::Replace(Tree::Seq(nodes))
    }
}

/// Callbacks driven by the engine
///
/// Both methods default to `Continue`. Errors abort the traversal and are returned unchanged.
pub trait Visitor {
    type Error;

    fn enter(&mut self, _node: &mut Node, _ctx: &VisitContext<'_>) -> Result<VisitAction, Self::Error> {
        Ok(VisitAction::Continue)
    }

    fn leave(&mut self, _node: &mut Node, _ctx: &VisitContext<'_>) -> Result<VisitAction, Self::Error> {
        Ok(VisitAction::Continue)
    }
}

type Callback<'f> = Box<dyn FnMut(&mut Node, &VisitContext<'_>) -> VisitAction + 'f>;

/// A visitor assembled from closures
///
/// ```rust,ignore
/// let mut count = 0;
/// let tree = traverse(tree, &mut Callbacks::new().on_enter(|_, _| {
///     count += 1;
///     VisitAction::Continue
/// }));
/// ```
#[derive(Default)]
pub struct Callbacks<'f> {
    enter: Option<Callback<'f>>,
    leave: Option<Callback<'f>>,
}

impl<'f> Callbacks<'f> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_enter<F>(mut self, f: F) -> Self
    where
        F: FnMut(&mut Node, &VisitContext<'_>) -> VisitAction + 'f,
    {
        self.enter = Some(Box::new(f));
        self
    }

    pub fn on_leave<F>(mut self, f: F) -> Self
    where
        F: FnMut(&mut Node, &VisitContext<'_>) -> VisitAction + 'f,
    {
        self.leave = Some(Box::new(f));
        self
    }
}

impl Visitor for Callbacks<'_> {
    type Error = Infallible;

    fn enter(&mut self, node: &mut Node, ctx: &VisitContext<'_>) -> Result<VisitAction, Infallible> {
        Ok(self.enter.as_mut().map_or(VisitAction::Continue, |f| f(node, ctx)))
    }

    fn leave(&mut self, node: &mut Node, ctx: &VisitContext<'_>) -> Result<VisitAction, Infallible> {
        Ok(self.leave.as_mut().map_or(VisitAction::Continue, |f| f(node, ctx)))
    }
}

/// Traverse with a visitor that cannot fail
pub fn traverse<V>(tree: Tree, visitor: &mut V) -> Tree
where
    V: Visitor<Error = Infallible> + ?Sized,
{
    match try_traverse(tree, visitor) {
        Ok(tree) => tree,
        Err(never) => match never {},
    }
}

/// Traverse, propagating the first callback error
pub fn try_traverse<V>(tree: Tree, visitor: &mut V) -> Result<Tree, V::Error>
where
    V: Visitor + ?Sized,
{
    let mut stack = vec![Frame::root(tree)];
    let mut path: Vec<Key> = Vec::new();

    'walk: loop {
        let Some(top) = stack.last_mut() else {
            break;
        };
        match top.next_child(&mut path) {
            Some((mut child, keys)) => {
                let action = visitor.enter(&mut child, &VisitContext::new(&path, &stack))?;
                let descend_into = match action {
                    VisitAction::Continue => child,
                    VisitAction::Replace(Tree::Node(replacement)) => replacement,
                    VisitAction::Skip => {
                        settle(&mut stack, &mut path, keys, Outcome::Keep(child));
                        continue;
                    }
                    VisitAction::Delete => {
                        settle(&mut stack, &mut path, keys, Outcome::Delete);
                        continue;
                    }
                    VisitAction::Replace(seq @ Tree::Seq(_)) => {
                        settle(&mut stack, &mut path, keys, Outcome::Replace(seq));
                        continue;
                    }
                    VisitAction::Break => {
                        settle(&mut stack, &mut path, keys, Outcome::Keep(child));
                        break 'walk;
                    }
                };

                if descend_into.slots().is_empty() {
                    let mut leaf = descend_into;
                    let action = visitor.leave(&mut leaf, &VisitContext::new(&path, &stack))?;
                    let (outcome, stop) = after_leave(action, leaf);
                    settle(&mut stack, &mut path, keys, outcome);
                    if stop {
                        break 'walk;
                    }
                } else {
                    stack.push(Frame::open(descend_into, keys));
                }
            }
            None => {
                if stack.len() == 1 {
                    break;
                }
                let Some(frame) = stack.pop() else {
                    break;
                };
                let keys = frame.keys;
                let Some(mut node) = frame.close() else {
                    continue;
                };
                let action = visitor.leave(&mut node, &VisitContext::new(&path, &stack))?;
                let (outcome, stop) = after_leave(action, node);
                settle(&mut stack, &mut path, keys, outcome);
                if stop {
                    break 'walk;
                }
            }
        }
    }

    // After a break the open frames are closed without further callbacks
    while stack.len() > 1 {
        let Some(frame) = stack.pop() else {
            break;
        };
        let keys = frame.keys;
        if let Some(node) = frame.close() {
            settle(&mut stack, &mut path, keys, Outcome::Keep(node));
        }
    }

    Ok(stack
        .pop()
        .map(Frame::close_root)
        .unwrap_or(Tree::Seq(Vec::new())))
}

fn after_leave(action: VisitAction, node: Node) -> (Outcome, bool) {
    match action {
        VisitAction::Continue | VisitAction::Skip => (Outcome::Keep(node), false),
        VisitAction::Delete => (Outcome::Delete, false),
        VisitAction::Replace(tree) => (Outcome::Replace(tree), false),
        VisitAction::Break => (Outcome::Keep(node), true),
    }
}

fn settle(stack: &mut [Frame], path: &mut Vec<Key>, keys: usize, outcome: Outcome) {
    path.truncate(path.len().saturating_sub(keys));
    if let Some(parent) = stack.last_mut() {
        parent.record(outcome);
    }
}

/// Traverse a document, keeping the result a document
///
/// A traversal that replaces the root with anything other than a document yields an untitled
/// document holding the result.
pub fn try_traverse_document<V>(document: Document, visitor: &mut V) -> Result<Document, V::Error>
where
    V: Visitor + ?Sized,
{
    let tree = try_traverse(Tree::Node(Node::Document(document)), visitor)?;
    Ok(into_document(tree))
}

pub fn traverse_document<V>(document: Document, visitor: &mut V) -> Document
where
    V: Visitor<Error = Infallible> + ?Sized,
{
    into_document(traverse(Tree::Node(Node::Document(document)), visitor))
}

fn into_document(tree: Tree) -> Document {
    match tree {
        Tree::Node(Node::Document(document)) => document,
        other => Document::untitled(other.into_nodes()),
    }
}
