//! Annotation stages
//!
//! Thin [`Runnable`] wrappers around the passes in [`annotate`](crate::specmd::annotate).

use crate::specmd::annotate::{
    assign_anchors, number_examples, number_sections, AnchorOptions, Annotated,
};
use crate::specmd::error::CompileError;
use crate::specmd::transforms::Runnable;

/// Hierarchical section numbering
#[derive(Default)]
pub struct NumberSections;

impl NumberSections {
    pub fn new() -> Self {
        Self
    }
}

impl Runnable<Annotated, Annotated> for NumberSections {
    fn run(&self, input: Annotated) -> Result<Annotated, CompileError> {
        let document = number_sections(input.document)?;
        Ok(Annotated::new(document, input.biblio))
    }
}

/// Example sequence numbers
#[derive(Default)]
pub struct NumberExamples;

impl NumberExamples {
    pub fn new() -> Self {
        Self
    }
}

impl Runnable<Annotated, Annotated> for NumberExamples {
    fn run(&self, input: Annotated) -> Result<Annotated, CompileError> {
        Ok(Annotated::new(number_examples(input.document), input.biblio))
    }
}

/// Anchor ids and Biblio registration
#[derive(Default)]
pub struct AssignAnchors {
    options: AnchorOptions,
}

impl AssignAnchors {
    pub fn new(options: AnchorOptions) -> Self {
        Self { options }
    }
}

impl Runnable<Annotated, Annotated> for AssignAnchors {
    fn run(&self, input: Annotated) -> Result<Annotated, CompileError> {
        let Annotated {
            document,
            mut biblio,
        } = input;
        let document = assign_anchors(document, &mut biblio, &self.options);
        Ok(Annotated::new(document, biblio))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::specmd::ast::{Document, Node, Section};
    use crate::specmd::biblio::Biblio;
    use crate::specmd::error::NumberingErrorKind;

    #[test]
    fn test_number_sections_stage_propagates_error() {
        let document = Document::new("Spec", vec![Section::new("x", vec![]).with_override("*").into()]);
        let result = NumberSections::new().run(Annotated::new(document, Biblio::new()));
        match result {
            Err(CompileError::Numbering(err)) => assert_eq!(err.kind, NumberingErrorKind::Unsupported),
            other => panic!("expected numbering error, got {:?}", other),
        }
    }

    #[test]
    fn test_assign_anchors_stage_fills_biblio() {
        let document = Document::new("Spec", vec![Section::new("Intro", vec![]).into()]);
        let result = AssignAnchors::default()
            .run(Annotated::new(document, Biblio::new()))
            .unwrap();
        assert_eq!(result.biblio.get("sec-Intro"), Some("#sec-Intro"));
        match &result.document.contents[0] {
            Node::Section(section) => assert_eq!(section.id.as_deref(), Some("sec-Intro")),
            other => panic!("unexpected {}", other.kind()),
        }
    }
}
