//! Example numbering
//!
//!     Every example-flagged code block, counter-examples included, is numbered in document
//!     order starting at 1. Plain code blocks are left alone.

use crate::specmd::ast::{Document, Node};
use crate::specmd::visit::{traverse_document, Callbacks, VisitAction};

pub fn number_examples(document: Document) -> Document {
    let mut counter = 0u32;
    let document = traverse_document(
        document,
        &mut Callbacks::new().on_enter(|node, _| {
            if let Node::Code(code) = node {
                if code.example {
                    counter += 1;
                    code.number = Some(counter);
                }
            }
            VisitAction::Continue
        }),
    );
    tracing::debug!(examples = counter, "numbered examples");
    document
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::specmd::ast::{Code, Section};

    #[test]
    fn test_examples_numbered_in_document_order() {
        let doc = Document::new(
            "Spec",
            vec![
                Code::example(None, "a").into(),
                Section::new(
                    "S",
                    vec![
                        Code::new(None, "plain").into(),
                        Code::counter_example(None, "b").into(),
                    ],
                )
                .into(),
                Code::example(None, "c").into(),
            ],
        );
        let doc = number_examples(doc);
        let numbers: Vec<Option<u32>> = doc
            .descendants()
            .filter_map(|node| match node {
                Node::Code(code) => Some(code.number),
                _ => None,
            })
            .collect();
        assert_eq!(numbers, vec![Some(1), None, Some(2), Some(3)]);
    }
}
