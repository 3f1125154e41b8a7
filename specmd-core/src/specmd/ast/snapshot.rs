//! Document snapshots
//!
//!     A normalized, serializable view of a tree. Every node becomes a [DocSnapshot] with its
//!     kind, a label, the scalar fields that matter to readers of the annotated tree, and its
//!     children in slot order. The CLI prints snapshots as JSON; tests compare them.
//!
//!     [to_outline_str] renders the block structure as an indented outline, one node per line,
//!     with numbering and anchors:
//!
//!         Document "Spec"
//!           Section 1 "Overview" #sec-Overview
//!             Paragraph
//!             Code 1 "graphql" #example-8a1f2

use super::elements::section::dotted;
use super::elements::{Document, Node};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A snapshot of a node in a normalized, serializable form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocSnapshot {
    pub node_type: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<DocSnapshot>,
}

impl DocSnapshot {
    pub fn new(node_type: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            node_type: node_type.into(),
            label: label.into(),
            attributes: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, key: &str, value: impl Into<String>) -> Self {
        self.attributes.insert(key.to_string(), value.into());
        self
    }

    pub fn with_children(mut self, children: Vec<DocSnapshot>) -> Self {
        self.children.extend(children);
        self
    }
}

/// Snapshot a node and all its descendants
pub fn snapshot_node(node: &Node) -> DocSnapshot {
    let mut snapshot = DocSnapshot::new(node.kind(), node.label().unwrap_or_default());
    for (key, value) in attributes(node) {
        snapshot = snapshot.with_attribute(key, value);
    }
    let children = node.children().into_iter().map(snapshot_node).collect();
    snapshot.with_children(children)
}

/// Snapshot a whole document
pub fn snapshot_document(document: &Document) -> DocSnapshot {
    DocSnapshot::new("Document", document.title.clone().unwrap_or_default())
        .with_children(document.contents.iter().map(snapshot_node).collect())
}

fn attributes(node: &Node) -> Vec<(&'static str, String)> {
    let mut attrs = Vec::new();
    if let Some(id) = node.id() {
        attrs.push(("id", id.to_string()));
    }
    match node {
        Node::Section(n) => {
            if let Some(number) = &n.number {
                attrs.push(("number", number.clone()));
            }
            if let Some(token) = &n.override_token {
                attrs.push(("override", token.clone()));
            }
        }
        Node::Subsection(n) if !n.sec_id.is_empty() => {
            attrs.push(("sec_id", dotted(&n.sec_id)));
        }
        Node::Code(n) => {
            if n.example {
                attrs.push(("example", "true".to_string()));
            }
            if n.counter {
                attrs.push(("counter", "true".to_string()));
            }
            if let Some(number) = n.number {
                attrs.push(("number", number.to_string()));
            }
            attrs.push(("code", n.code.clone()));
        }
        Node::List(n) => attrs.push(("ordered", n.ordered.to_string())),
        Node::Production(n) => attrs.push(("def_type", n.def_type.to_string())),
        Node::OneOfProduction(n) => attrs.push(("def_type", n.def_type.to_string())),
        Node::Call(n) if !n.args.is_empty() => attrs.push(("args", n.args.join(", "))),
        _ => {}
    }
    attrs
}

/// Render the block structure of a document as an indented outline
pub fn to_outline_str(document: &Document) -> String {
    let mut out = String::from("Document");
    if let Some(title) = &document.title {
        out.push_str(&format!(" \"{}\"", title));
    }
    out.push('\n');
    for node in &document.contents {
        write_outline(node, 1, &mut out);
    }
    out
}

fn write_outline(node: &Node, depth: usize, out: &mut String) {
    if !shows_in_outline(node) {
        return;
    }
    out.push_str(&"  ".repeat(depth));
    out.push_str(node.kind());
    match node {
        Node::Section(n) => {
            if let Some(number) = &n.number {
                out.push_str(&format!(" {}", number));
            }
        }
        Node::Code(n) => {
            if let Some(number) = n.number {
                out.push_str(&format!(" {}", number));
            }
        }
        _ => {}
    }
    if let Some(label) = outline_label(node) {
        out.push_str(&format!(" \"{}\"", label));
    }
    if let Some(id) = node.id() {
        out.push_str(&format!(" #{}", id));
    }
    out.push('\n');
    for child in node.children() {
        write_outline(child, depth + 1, out);
    }
}

fn outline_label(node: &Node) -> Option<String> {
    match node {
        Node::Paragraph(_) | Node::Note(_) | Node::Todo(_) | Node::ListItem(_) => None,
        other => other.label(),
    }
}

fn shows_in_outline(node: &Node) -> bool {
    !matches!(
        node,
        Node::Text(_)
            | Node::InlineCode(_)
            | Node::Bold(_)
            | Node::Italic(_)
            | Node::Link(_)
            | Node::Call(_)
            | Node::Rhs(_)
            | Node::NonTerminal(_)
            | Node::Terminal(_)
    )
}
