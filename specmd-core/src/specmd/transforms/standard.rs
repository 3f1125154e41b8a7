//! Standard transform definitions
//!
//! Pre-built annotation pipelines. [`ANNOTATE`] uses the default options; build a pipeline
//! for other options with [`annotate_pipeline`].

use crate::specmd::annotate::{AnnotateOptions, Annotated};
use crate::specmd::transforms::stages::{
    AssignAnchors, CheckStructure, NumberExamples, NumberSections,
};
use crate::specmd::transforms::Transform;
use once_cell::sync::Lazy;

/// Type alias for annotation transforms
pub type AnnotateTransform = Transform<Annotated, Annotated>;

/// Numbering only: structure check, section numbers, example numbers
pub static NUMBERING: Lazy<AnnotateTransform> = Lazy::new(|| {
    Transform::from_fn(Ok)
        .then(CheckStructure::default())
        .then(NumberSections::new())
        .then(NumberExamples::new())
});

/// Full annotation with default options
///
/// 1. Structure check (title required, no imports left)
/// 2. Section numbering
/// 3. Example numbering
/// 4. Anchor assignment
pub static ANNOTATE: Lazy<AnnotateTransform> = Lazy::new(|| {
    Transform::from_fn(Ok)
        .then_transform(&NUMBERING)
        .then(AssignAnchors::default())
});

/// Full annotation with the given options
pub fn annotate_pipeline(options: AnnotateOptions) -> AnnotateTransform {
    Transform::from_fn(Ok)
        .then(CheckStructure::new(options.require_title))
        .then(NumberSections::new())
        .then(NumberExamples::new())
        .then(AssignAnchors::new(options.anchors))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::specmd::annotate::AnchorOptions;
    use crate::specmd::ast::{Code, Document, Node, Section};
    use crate::specmd::biblio::Biblio;

    fn sample() -> Document {
        Document::new(
            "Spec",
            vec![
                Section::new("Intro", vec![Code::example(None, "x").into()]).into(),
                Section::new("Usage", vec![]).into(),
            ],
        )
    }

    #[test]
    fn test_numbering_leaves_anchors_unset() {
        let result = NUMBERING.run(Annotated::new(sample(), Biblio::new())).unwrap();
        assert!(result.biblio.is_empty());
        match &result.document.contents[1] {
            Node::Section(section) => {
                assert_eq!(section.number.as_deref(), Some("2"));
                assert!(section.id.is_none());
            }
            other => panic!("unexpected {}", other.kind()),
        }
    }

    #[test]
    fn test_annotate_assigns_everything() {
        let result = ANNOTATE.run(Annotated::new(sample(), Biblio::new())).unwrap();
        let ids: Vec<_> = result.document.descendants().filter_map(Node::id).collect();
        assert_eq!(ids.len(), 3);
        assert_eq!(result.biblio.len(), 3);
    }

    #[test]
    fn test_pipeline_with_options() {
        let options = AnnotateOptions {
            anchors: AnchorOptions {
                section_prefix: "s-".into(),
                min_hash_length: 5,
            },
            require_title: false,
        };
        let document = Document::untitled(vec![Section::new("Intro", vec![]).into()]);
        let result = annotate_pipeline(options)
            .run(Annotated::new(document, Biblio::new()))
            .unwrap();
        assert!(result.biblio.contains("s-Intro"));
    }

    #[test]
    fn test_transforms_are_reusable() {
        let first = ANNOTATE.run(Annotated::new(sample(), Biblio::new())).unwrap();
        let second = ANNOTATE.run(Annotated::new(sample(), Biblio::new())).unwrap();
        assert_eq!(first, second);
    }
}
