//! AST definitions and utilities for spec documents
//!
//!     This module provides the tree model every pass works on: the [Node] tagged union, the
//!     [Tree] wrapper used by the visitor engine, the child slot table, and source spans.
//!
//! Documents and Sections
//!
//!     A [Document] is the root of one parsed file. It holds an optional title and an ordered
//!     list of content nodes. Sections nest arbitrarily deep inside that list, and so can
//!     imports: an [Import] may sit at the top of a document, inside a section, or anywhere
//!     else a block is allowed.
//!
//!     After the import resolver runs, a document no longer contains any [Import] node. After
//!     the annotator runs, every sectioning and referenceable node carries an `id`.
//!
//! Composite and Leaf Nodes
//!
//!     Composite nodes own child slots. A slot is either a sequence (`contents`, `items`,
//!     `steps`, `rhs`, `rows`, `tokens`) or a single optional node (`call`, `token`). Leaf
//!     nodes own only scalars.
//!
//!     The mapping from kind to slots is spelled out once, in [children], as an exhaustive
//!     match. The visitor engine never looks at kinds, it only asks that table for slots.
//!
//! ## Modules
//!
//! - `range` - Position and Span types for source locations
//! - `elements` - node type definitions organized by element family
//! - `children` - the kind to child slot table and read-only iteration
//! - `text_content` - plain text extraction used for hashing and labels
//! - `snapshot` - normalized, serializable view of a tree

pub mod children;
pub mod elements;
pub mod range;
pub mod snapshot;
pub mod text_content;

pub use children::{Descendants, Key, Slot, SlotRef};
pub use elements::{
    Algorithm, Bold, Call, Code, DefinitionParagraph, DefinitionTerm, Document, IdPart, Import,
    InlineCode, Italic, Link, List, ListItem, Node, NonTerminal, Note, OneOfProduction,
    Paragraph, Production, Rhs, Section, Subsection, Terminal, Text, Todo, Tree,
};
pub use range::{Position, Span};
pub use snapshot::{snapshot_document, snapshot_node, to_outline_str, DocSnapshot};
pub use text_content::plain_text;
