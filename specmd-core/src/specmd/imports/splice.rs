//! Splicing resolved imports into their host document
//!
//!     Each [Import] is replaced, on leave, by the contents of its resolved sub-document. The
//!     replacement is a sequence, and the visitor engine flattens it one level into the
//!     container the import sat in: `[A, Import, B]` becomes `[A, X, Y, B]`. The splicer only
//!     hands out sub-documents in order; it keeps no container bookkeeping of its own.
//!
//! [Import]: crate::specmd::ast::Import

use crate::specmd::ast::{Document, Node};
use crate::specmd::visit::{traverse_document, VisitAction, VisitContext, Visitor};
use std::convert::Infallible;
use std::vec;

/// Replace the imports of `document`, in document order, with the contents of `resolved`
///
/// `resolved` must hold one document per import, in the order the imports appear. Imports
/// without a counterpart are left in place.
pub fn splice_imports(document: Document, resolved: Vec<Document>) -> Document {
    let mut splicer = Splicer {
        resolved: resolved.into_iter(),
        spliced: 0,
    };
    let document = traverse_document(document, &mut splicer);
    tracing::debug!(imports = splicer.spliced, "spliced imports");
    document
}

struct Splicer {
    resolved: vec::IntoIter<Document>,
    spliced: usize,
}

impl Visitor for Splicer {
    type Error = Infallible;

    fn leave(&mut self, node: &mut Node, ctx: &VisitContext<'_>) -> Result<VisitAction, Infallible> {
        let Node::Import(import) = node else {
            return Ok(VisitAction::Continue);
        };
        match self.resolved.next() {
            Some(sub) => {
                tracing::trace!(
                    path = %import.path,
                    depth = ctx.path().len(),
                    nodes = sub.contents.len(),
                    "splicing import"
                );
                self.spliced += 1;
                Ok(VisitAction::splice(sub.contents))
            }
            None => {
                tracing::warn!(path = %import.path, "no resolved document for import");
                Ok(VisitAction::Continue)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::specmd::ast::{Import, List, ListItem, Paragraph, Section, Text};

    fn para(value: &str) -> Node {
        Paragraph::new(vec![Text::new(value).into()]).into()
    }

    fn texts(nodes: &[Node]) -> Vec<String> {
        nodes
            .iter()
            .map(|n| crate::specmd::ast::plain_text(std::slice::from_ref(n)))
            .collect()
    }

    #[test]
    fn test_import_flattened_in_place() {
        let doc = Document::new("Spec", vec![para("A"), Import::new("x.md").into(), para("B")]);
        let sub = Document::untitled(vec![para("X"), para("Y")]);
        let doc = splice_imports(doc, vec![sub]);
        assert_eq!(texts(&doc.contents), vec!["A", "X", "Y", "B"]);
    }

    #[test]
    fn test_nested_imports_in_order() {
        let doc = Document::new(
            "Spec",
            vec![
                Import::new("one.md").into(),
                Section::new("S", vec![para("a"), Import::new("two.md").into()]).into(),
                Import::new("three.md").into(),
            ],
        );
        let subs = vec![
            Document::untitled(vec![para("1")]),
            Document::untitled(vec![para("2a"), para("2b")]),
            Document::untitled(vec![]),
        ];
        let doc = splice_imports(doc, subs);
        assert_eq!(doc.contents.len(), 2);
        match &doc.contents[1] {
            Node::Section(section) => assert_eq!(texts(&section.contents), vec!["a", "2a", "2b"]),
            other => panic!("unexpected {}", other.kind()),
        }
        assert!(doc.descendants().all(|n| !n.is_import()));
    }

    #[test]
    fn test_flattens_into_nearest_container() {
        let item = ListItem::new(vec![Import::new("one.md").into(), para("b")]);
        let doc = Document::new(
            "Spec",
            vec![Section::new(
                "S",
                vec![
                    para("a"),
                    List::new(false, vec![item.into()]).into(),
                    Import::new("two.md").into(),
                ],
            )
            .into()],
        );
        let subs = vec![
            Document::untitled(vec![para("1"), para("2")]),
            Document::untitled(vec![para("3")]),
        ];
        let doc = splice_imports(doc, subs);
        let Node::Section(section) = &doc.contents[0] else {
            panic!("expected Section, found {}", doc.contents[0].kind());
        };
        assert_eq!(section.contents.len(), 3);
        let Node::List(list) = &section.contents[1] else {
            panic!("expected List, found {}", section.contents[1].kind());
        };
        let Node::ListItem(item) = &list.items[0] else {
            panic!("expected ListItem, found {}", list.items[0].kind());
        };
        assert_eq!(texts(&item.contents), vec!["1", "2", "b"]);
        assert_eq!(texts(&section.contents[2..]), vec!["3"]);
    }

    #[test]
    fn test_missing_resolution_keeps_import() {
        let doc = Document::new("Spec", vec![Import::new("x.md").into()]);
        let doc = splice_imports(doc, vec![]);
        assert!(doc.contents[0].is_import());
    }
}
