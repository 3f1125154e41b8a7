//! Element definitions
//!
//!     Each element family lives in its own module. The [Node] enum in [node] ties them
//!     together into the tagged union the rest of the crate works with.
//!
//!     - [document]: the per-file root and the import placeholder
//!     - [section]: sections, subsections and hierarchical id parts
//!     - [blocks]: paragraphs, notes, todos, lists and code blocks
//!     - [grammar]: algorithms and grammar productions
//!     - [inlines]: text runs, emphasis, links and definition terms

pub mod blocks;
pub mod document;
pub mod grammar;
pub mod inlines;
pub mod node;
pub mod section;

pub use blocks::{Code, DefinitionParagraph, List, ListItem, Note, Paragraph, Todo};
pub use document::{Document, Import};
pub use grammar::{Algorithm, Call, NonTerminal, OneOfProduction, Production, Rhs, Terminal};
pub use inlines::{Bold, DefinitionTerm, InlineCode, Italic, Link, Text};
pub use node::{Node, Tree};
pub use section::{IdPart, Section, Subsection};
