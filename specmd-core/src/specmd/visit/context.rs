//! Visit context
//!
//!     Passed to every callback alongside the current node. It exposes where the node sits:
//!     the key under which it was reached, the full path of keys from the root, its parent and
//!     its ancestors.
//!
//!     Ancestors are the open nodes on the engine's stack. Their child slots are detached while
//!     the traversal is inside them, so an ancestor's scalar fields (title, ids, numbering) are
//!     readable but its children are not.

use super::frame::Frame;
use crate::specmd::ast::{Key, Node};

pub struct VisitContext<'a> {
    path: &'a [Key],
    frames: &'a [Frame],
}

impl<'a> VisitContext<'a> {
    pub(crate) fn new(path: &'a [Key], frames: &'a [Frame]) -> Self {
        Self { path, frames }
    }

    /// Key of the current node in its parent, `None` for the root
    pub fn key(&self) -> Option<Key> {
        self.path.last().copied()
    }

    /// Keys from the root down to the current node
    pub fn path(&self) -> &'a [Key] {
        self.path
    }

    pub fn parent(&self) -> Option<&'a Node> {
        self.frames.iter().rev().find_map(|frame| frame.node.as_ref())
    }

    /// Open ancestors, root first, excluding the current node
    pub fn ancestors(&self) -> Vec<&'a Node> {
        self.frames
            .iter()
            .filter_map(|frame| frame.node.as_ref())
            .collect()
    }

    pub fn depth(&self) -> usize {
        self.frames.iter().filter(|frame| frame.node.is_some()).count()
    }
}
