//! Section elements
//!
//!     Sections are the structural backbone of a spec document. They nest arbitrarily, and each
//!     one receives a hierarchical id such as `[2, 1]` (rendered "2.1") from its position among
//!     its siblings.
//!
//!         # Overview            → 1
//!         ## Goals              → 1.1
//!         # A. Appendix         → A
//!         ## Notation           → A.1
//!
//!     A heading may carry an explicit numbering override (`3.2`, `A.`). The numbering pass
//!     validates overrides against the previous sibling; see
//!     [numbering](crate::specmd::annotate::numbering).
//!
//!     Subsections are titled blocks inside a section. They are not numbered themselves but
//!     share the hierarchical id of their enclosing section and get their own anchor.
//!
//! Id parts
//!
//!     An [IdPart] is numeric (`1`, `2`, …) or alphabetic (`A`, `B`, …, `Z`, `AA`, …).
//!     Alphabetic parts count in bijective base-26, where there is no zero digit:
//!     A=1, Z=26, AA=27, AZ=52, BA=53, ZZ=702, AAA=703.

use super::super::range::Span;
use super::node::Node;
use std::cmp::Ordering;
use std::fmt;

/// One level of a hierarchical section id
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IdPart {
    Number(u32),
    Letters(String),
}

impl IdPart {
    /// Parse a single part: digits become a number, uppercase ASCII letters stay letters
    pub fn parse(token: &str) -> Option<IdPart> {
        if token.is_empty() {
            return None;
        }
        if token.bytes().all(|b| b.is_ascii_digit()) {
            return token.parse().ok().map(IdPart::Number);
        }
        if token.bytes().all(|b| b.is_ascii_uppercase()) {
            return Some(IdPart::Letters(token.to_string()));
        }
        None
    }

    pub fn is_letters(&self) -> bool {
        matches!(self, IdPart::Letters(_))
    }

    /// The part that follows this one when auto-numbering, `None` past `u32::MAX`
    pub fn next(&self) -> Option<IdPart> {
        match self {
            IdPart::Number(n) => n.checked_add(1).map(IdPart::Number),
            IdPart::Letters(letters) => Some(IdPart::Letters(increment_letters(letters))),
        }
    }

    /// Order two parts of the same kind; `None` when one is a number and the other letters
    ///
    /// Letters order by length first, then alphabetically, which is the bijective base-26
    /// order without converting to an integer.
    pub fn compare(&self, other: &IdPart) -> Option<Ordering> {
        match (self, other) {
            (IdPart::Number(a), IdPart::Number(b)) => Some(a.cmp(b)),
            (IdPart::Letters(a), IdPart::Letters(b)) => {
                Some(a.len().cmp(&b.len()).then_with(|| a.cmp(b)))
            }
            _ => None,
        }
    }
}

impl fmt::Display for IdPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdPart::Number(n) => write!(f, "{}", n),
            IdPart::Letters(letters) => f.write_str(letters),
        }
    }
}

fn increment_letters(letters: &str) -> String {
    let mut out = letters.as_bytes().to_vec();
    let mut index = out.len();
    while index > 0 {
        index -= 1;
        if out[index] == b'Z' {
            out[index] = b'A';
        } else {
            out[index] += 1;
            return String::from_utf8(out).unwrap_or_default();
        }
    }
    out.insert(0, b'A');
    String::from_utf8(out).unwrap_or_default()
}

/// Join id parts into the dotted form shown to readers ("2.1", "A.3")
pub fn dotted(parts: &[IdPart]) -> String {
    parts
        .iter()
        .map(IdPart::to_string)
        .collect::<Vec<_>>()
        .join(".")
}

/// A numbered section with a title and content
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Section {
    pub title: String,
    /// Explicit numbering override as written, e.g. "3.2" or "A"
    pub override_token: Option<String>,
    pub contents: Vec<Node>,
    /// Hierarchical id, filled in by the numbering pass
    pub sec_id: Vec<IdPart>,
    /// Dotted form of `sec_id`, filled in by the numbering pass
    pub number: Option<String>,
    /// Anchor, filled in by the anchor pass
    pub id: Option<String>,
    pub span: Option<Span>,
}

impl Section {
    pub fn new(title: impl Into<String>, contents: Vec<Node>) -> Self {
        Self {
            title: title.into(),
            contents,
            ..Self::default()
        }
    }

    pub fn with_override(mut self, token: impl Into<String>) -> Self {
        self.override_token = Some(token.into());
        self
    }

    pub fn at(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Nesting depth implied by the resolved id (1 for top-level sections)
    pub fn depth(&self) -> usize {
        self.sec_id.len()
    }

    /// Iterate over immediate child sections
    pub fn iter_sections(&self) -> impl Iterator<Item = &Section> {
        self.contents.iter().filter_map(|node| match node {
            Node::Section(section) => Some(section),
            _ => None,
        })
    }
}

/// A titled, unnumbered block inside a section
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Subsection {
    pub title: String,
    pub contents: Vec<Node>,
    pub sec_id: Vec<IdPart>,
    pub id: Option<String>,
    pub span: Option<Span>,
}

impl Subsection {
    pub fn new(title: impl Into<String>, contents: Vec<Node>) -> Self {
        Self {
            title: title.into(),
            contents,
            ..Self::default()
        }
    }

    pub fn at(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }
}
