//! Hierarchical section numbering
//!
//!     Keeps one counter per nesting depth. Entering a section advances the counter of its
//!     depth and opens a fresh one for its children; leaving it closes that counter again.
//!     The section's id is the list of counters from the top level down to its own.
//!
//! Overrides
//!
//!     A heading may fix its own part (`## 3.2 Title` fixes `2`, `# A. Title` fixes `A`). Only
//!     the last part of an override is used. Against the previous sibling's part:
//!
//!         previous    override    result
//!         (none)      any         accepted
//!         number n    number m    accepted when m > n
//!         number n    A           accepted, opens a lettered run
//!         number n    other       rejected
//!         letters L   number      rejected
//!         letters L   letters M   accepted when M comes after L
//!
//!     `*` is rejected everywhere. Sections after an override continue counting from it.
//!     Numbers stop at `u32::MAX`; a larger override, or a section auto-numbered after it,
//!     fails with [NumberingErrorKind::OutOfRange]. Letter runs have no upper bound.

use crate::specmd::ast::elements::section::dotted;
use crate::specmd::ast::{Document, IdPart, Node};
use crate::specmd::error::{NumberingError, NumberingErrorKind};
use crate::specmd::visit::{try_traverse_document, VisitAction, VisitContext, Visitor};
use std::cmp::Ordering;

/// Assign `sec_id` and `number` to every section, and `sec_id` to every subsection
pub fn number_sections(document: Document) -> Result<Document, NumberingError> {
    let mut numbering = SectionNumbering::default();
    let document = try_traverse_document(document, &mut numbering)?;
    tracing::debug!(sections = numbering.numbered, "numbered sections");
    Ok(document)
}

struct SectionNumbering {
    /// Parts of the open sections, outermost first
    open: Vec<IdPart>,
    /// Last part used at each open depth
    levels: Vec<Option<IdPart>>,
    numbered: usize,
}

impl Default for SectionNumbering {
    fn default() -> Self {
        Self {
            open: Vec::new(),
            levels: vec![None],
            numbered: 0,
        }
    }
}

impl Visitor for SectionNumbering {
    type Error = NumberingError;

    fn enter(&mut self, node: &mut Node, _ctx: &VisitContext<'_>) -> Result<VisitAction, NumberingError> {
        match node {
            Node::Section(section) => {
                let previous = self.levels.last().cloned().flatten();
                let part = resolve_part(previous.as_ref(), section.override_token.as_deref())
                    .map_err(|(kind, expected)| NumberingError {
                        kind,
                        found: section.override_token.clone().unwrap_or_default(),
                        previous: previous.as_ref().map(IdPart::to_string),
                        expected: expected.map(|p| p.to_string()),
                        title: section.title.clone(),
                        span: section.span.clone(),
                    })?;

                if let Some(level) = self.levels.last_mut() {
                    *level = Some(part.clone());
                }
                self.open.push(part);
                self.levels.push(None);

                section.sec_id = self.open.clone();
                section.number = Some(dotted(&section.sec_id));
                self.numbered += 1;
            }
            Node::Subsection(subsection) => {
                subsection.sec_id = self.open.clone();
            }
            _ => {}
        }
        Ok(VisitAction::Continue)
    }

    fn leave(&mut self, node: &mut Node, _ctx: &VisitContext<'_>) -> Result<VisitAction, NumberingError> {
        if let Node::Section(_) = node {
            self.open.pop();
            self.levels.pop();
        }
        Ok(VisitAction::Continue)
    }
}

/// Resolve the part of a section from its previous sibling and optional override
///
/// On rejection returns the error kind and the part auto-numbering would have chosen, when
/// there is one.
pub fn resolve_part(
    previous: Option<&IdPart>,
    override_token: Option<&str>,
) -> Result<IdPart, (NumberingErrorKind, Option<IdPart>)> {
    let auto = || match previous {
        Some(previous) => previous.next(),
        None => Some(IdPart::Number(1)),
    };
    let Some(token) = override_token else {
        return auto().ok_or((NumberingErrorKind::OutOfRange, None));
    };

    let last = token
        .split('.')
        .filter(|part| !part.is_empty())
        .last()
        .unwrap_or("");
    let part = match IdPart::parse(last) {
        Some(part) => part,
        None if !last.is_empty() && last.bytes().all(|b| b.is_ascii_digit()) => {
            return Err((NumberingErrorKind::OutOfRange, auto()))
        }
        None => return Err((NumberingErrorKind::Unsupported, auto())),
    };

    let Some(previous) = previous else {
        return Ok(part);
    };

    match (previous, &part) {
        (IdPart::Number(_), IdPart::Letters(letters)) if letters == "A" => Ok(part),
        (IdPart::Number(_), IdPart::Letters(_)) => {
            Err((NumberingErrorKind::NumberToLetter, auto()))
        }
        (IdPart::Letters(_), IdPart::Number(_)) => {
            Err((NumberingErrorKind::LetterToNumber, auto()))
        }
        _ if part.compare(previous) == Some(Ordering::Greater) => Ok(part),
        _ => Err((NumberingErrorKind::NotIncreasing, auto())),
    }
}
