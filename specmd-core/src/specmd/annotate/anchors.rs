//! Anchor assignment
//!
//!     Gives every sectioning and referenceable node an `id` and registers it in the
//!     [Biblio]. Runs after numbering.
//!
//! Sections
//!
//!     Section anchors come from the title slug. When two sections anywhere in the document
//!     share a slug, each of them is qualified with its parent's name, so `# A` / `## A`
//!     yields `sec-A` and `sec-A.A`. Subsections are always qualified by their section.
//!     Top-level sections have no parent to qualify with, so two of them with the same title
//!     share one anchor, as do two same-titled subsections of one section. The later one
//!     aliases the first in the Biblio.
//!
//! Algorithms and productions
//!
//!     `Name()` for algorithms and `Name` for productions. A second definition with the same
//!     name reuses the first one's anchor.
//!
//! Definition terms
//!
//!     `def-` plus the term slug; later terms with a taken id get `-2`, `-3`, and so on.
//!
//! Examples and notes
//!
//!     `example-` / `note-` plus a prefix of the content hash, see [hash](super::hash). The
//!     prefix starts at the configured minimum and grows one character at a time while the id
//!     is taken. Identical content is told apart by hashing the previous digest together with
//!     the content until an unused digest comes up.

use super::hash::{
    normalize_code, normalize_content, rehash, stable_code_hash, stable_content_hash, DIGEST_HEX_LEN,
};
use super::slug::anchorize;
use crate::specmd::ast::{plain_text, Document, Node};
use crate::specmd::biblio::Biblio;
use crate::specmd::visit::{traverse_document, VisitAction, VisitContext, Visitor};
use std::collections::{HashMap, HashSet};
use std::convert::Infallible;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorOptions {
    /// Prefix of section and subsection anchors
    pub section_prefix: String,
    /// Shortest hash prefix used in example and note anchors
    pub min_hash_length: usize,
}

impl Default for AnchorOptions {
    fn default() -> Self {
        Self {
            section_prefix: "sec-".to_string(),
            min_hash_length: 5,
        }
    }
}

/// Assign ids to every sectioning and referenceable node, registering them in `biblio`
pub fn assign_anchors(document: Document, biblio: &mut Biblio, options: &AnchorOptions) -> Document {
    let conflicts = conflicting_slugs(&document);
    let before = biblio.len();
    let mut anchors = AnchorAssigner {
        biblio,
        options,
        conflicts,
        names: Vec::new(),
        hash_used: HashSet::new(),
    };
    let document = traverse_document(document, &mut anchors);
    tracing::debug!(
        registered = anchors.biblio.len() - before,
        "assigned anchors"
    );
    document
}

/// Section slugs used by more than one section
fn conflicting_slugs(document: &Document) -> HashSet<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    for node in document.descendants() {
        if let Node::Section(section) = node {
            *seen.entry(anchorize(&section.title)).or_default() += 1;
        }
    }
    seen.into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(slug, _)| slug)
        .collect()
}

struct AnchorAssigner<'a> {
    biblio: &'a mut Biblio,
    options: &'a AnchorOptions,
    conflicts: HashSet<String>,
    /// Qualified names of the open sections
    names: Vec<String>,
    /// Digests already given to an example or note
    hash_used: HashSet<String>,
}

impl AnchorAssigner<'_> {
    fn section_anchor(&mut self, name: &str) -> String {
        let id = format!("{}{}", self.options.section_prefix, name);
        if !self.biblio.insert_local(&id) {
            tracing::debug!(id = %id, "section anchor already registered, aliasing");
        }
        id
    }

    fn named_anchor(&mut self, id: String) -> String {
        if !self.biblio.insert_local(&id) {
            tracing::debug!(id = %id, "anchor already registered, aliasing");
        }
        id
    }

    fn definition_anchor(&mut self, term: &str) -> String {
        let base = format!("def-{}", anchorize(term));
        let mut id = base.clone();
        let mut suffix = 2;
        while self.biblio.contains(&id) {
            id = format!("{}-{}", base, suffix);
            suffix += 1;
        }
        self.biblio.insert_local(&id);
        id
    }

    /// Find an unused id for hashed content
    fn hashed_anchor(&mut self, prefix: &str, mut digest: String, normalized: &str) -> String {
        let min = self.options.min_hash_length.clamp(1, DIGEST_HEX_LEN);
        loop {
            while self.hash_used.contains(&digest) {
                digest = rehash(&digest, normalized);
            }
            self.hash_used.insert(digest.clone());

            for size in min..=digest.len() {
                let id = anchorize(&format!("{}{}", prefix, &digest[..size]));
                if self.biblio.insert_local(&id) {
                    return id;
                }
            }
            tracing::warn!(prefix, "hash anchor taken at full length, rehashing");
        }
    }
}

impl Visitor for AnchorAssigner<'_> {
    type Error = Infallible;

    fn enter(&mut self, node: &mut Node, _ctx: &VisitContext<'_>) -> Result<VisitAction, Infallible> {
        match node {
            Node::Section(section) => {
                let slug = anchorize(&section.title);
                let name = match self.names.last() {
                    Some(parent) if self.conflicts.contains(&slug) => format!("{}.{}", parent, slug),
                    _ => slug,
                };
                section.id = Some(self.section_anchor(&name));
                self.names.push(name);
            }
            Node::Subsection(subsection) => {
                let slug = anchorize(&subsection.title);
                let name = match self.names.last() {
                    Some(parent) => format!("{}.{}", parent, slug),
                    None => slug,
                };
                subsection.id = Some(self.section_anchor(&name));
            }
            Node::Algorithm(algorithm) => {
                if let Some(name) = algorithm.name() {
                    let id = format!("{}()", anchorize(name));
                    algorithm.id = Some(self.named_anchor(id));
                }
            }
            Node::Production(production) => {
                if let Some(name) = production.name() {
                    let id = anchorize(name);
                    production.id = Some(self.named_anchor(id));
                }
            }
            Node::OneOfProduction(production) => {
                if let Some(name) = production.name() {
                    let id = anchorize(name);
                    production.id = Some(self.named_anchor(id));
                }
            }
            Node::DefinitionTerm(term) => {
                let name = if term.name.is_empty() {
                    plain_text(&term.contents)
                } else {
                    term.name.clone()
                };
                term.id = Some(self.definition_anchor(&name));
            }
            Node::Code(code) if code.example => {
                let normalized = normalize_code(&code.code);
                let digest = stable_code_hash(&code.code);
                code.id = Some(self.hashed_anchor("example-", digest, &normalized));
            }
            Node::Note(note) => {
                let text = plain_text(&note.contents);
                let normalized = normalize_content(&text);
                let digest = stable_content_hash(&text);
                note.id = Some(self.hashed_anchor("note-", digest, &normalized));
            }
            _ => {}
        }
        Ok(VisitAction::Continue)
    }

    fn leave(&mut self, node: &mut Node, _ctx: &VisitContext<'_>) -> Result<VisitAction, Infallible> {
        if let Node::Section(_) = node {
            self.names.pop();
        }
        Ok(VisitAction::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::specmd::ast::{
        Algorithm, Call, Code, DefinitionParagraph, DefinitionTerm, NonTerminal, Note, Paragraph,
        Production, Section, Subsection, Text,
    };
    use crate::specmd::biblio::ExternalBiblio;
    use std::collections::BTreeMap;

    fn ids(document: &Document) -> Vec<String> {
        document
            .descendants()
            .filter_map(|node| node.id().map(str::to_string))
            .collect()
    }

    fn run(document: Document) -> (Document, Biblio) {
        let mut biblio = Biblio::new();
        let document = assign_anchors(document, &mut biblio, &AnchorOptions::default());
        (document, biblio)
    }

    #[test]
    fn test_nested_same_title() {
        let doc = Document::new(
            "Spec",
            vec![Section::new("A", vec![Section::new("A", vec![]).into()]).into()],
        );
        let (doc, biblio) = run(doc);
        assert_eq!(ids(&doc), vec!["sec-A", "sec-A.A"]);
        assert_eq!(biblio.get("sec-A.A"), Some("#sec-A.A"));
    }

    #[test]
    fn test_unique_titles_are_not_qualified() {
        let doc = Document::new(
            "Spec",
            vec![Section::new(
                "Type System",
                vec![
                    Section::new("Scalars", vec![]).into(),
                    Subsection::new("Result Coercion", vec![]).into(),
                ],
            )
            .into()],
        );
        let (doc, _) = run(doc);
        assert_eq!(
            ids(&doc),
            vec!["sec-Type-System", "sec-Scalars", "sec-Type-System.Result-Coercion"]
        );
    }

    #[test]
    fn test_conflicting_titles_qualified_by_parent() {
        let doc = Document::new(
            "Spec",
            vec![
                Section::new("Objects", vec![Section::new("Validation", vec![]).into()]).into(),
                Section::new("Enums", vec![Section::new("Validation", vec![]).into()]).into(),
            ],
        );
        let (doc, _) = run(doc);
        assert_eq!(
            ids(&doc),
            vec!["sec-Objects", "sec-Objects.Validation", "sec-Enums", "sec-Enums.Validation"]
        );
    }

    #[test]
    fn test_same_titled_siblings_share_an_anchor() {
        let doc = Document::new(
            "Spec",
            vec![
                Section::new("Notes", vec![]).into(),
                Section::new(
                    "Notes",
                    vec![
                        Subsection::new("Example", vec![]).into(),
                        Subsection::new("Example", vec![]).into(),
                    ],
                )
                .into(),
            ],
        );
        let (doc, biblio) = run(doc);
        assert_eq!(
            ids(&doc),
            vec!["sec-Notes", "sec-Notes", "sec-Notes.Example", "sec-Notes.Example"]
        );
        assert_eq!(biblio.len(), 2);
    }

    #[test]
    fn test_algorithm_and_production_aliases() {
        let doc = Document::new(
            "Spec",
            vec![
                Algorithm::new(Call::new("ExecuteQuery", vec![]), vec![]).into(),
                Algorithm::new(Call::new("ExecuteQuery", vec![]), vec![]).into(),
                Production::new(1, NonTerminal::new("Document"), vec![]).into(),
            ],
        );
        let (doc, biblio) = run(doc);
        assert_eq!(ids(&doc), vec!["ExecuteQuery()", "ExecuteQuery()", "Document"]);
        assert_eq!(biblio.len(), 2);
    }

    #[test]
    fn test_definition_terms_suffixed() {
        let term = |name: &str| -> Node {
            DefinitionParagraph::new(vec![DefinitionTerm::new(name, vec![Text::new(name).into()]).into()]).into()
        };
        let doc = Document::new("Spec", vec![term("root field"), term("root field"), term("root field")]);
        let (doc, _) = run(doc);
        assert_eq!(
            ids(&doc),
            vec!["def-root-field", "def-root-field-2", "def-root-field-3"]
        );
    }

    #[test]
    fn test_identical_examples_get_distinct_ids() {
        let doc = Document::new(
            "Spec",
            vec![
                Code::example(None, "{ a }").into(),
                Code::example(None, "{ a }").into(),
                Code::example(None, "  { a }  ").into(),
            ],
        );
        let (doc, biblio) = run(doc);
        let ids = ids(&doc);
        assert_eq!(ids.len(), 3);
        let unique: HashSet<_> = ids.iter().collect();
        assert_eq!(unique.len(), 3);
        let first_digest = stable_code_hash("{ a }");
        assert_eq!(ids[0], format!("example-{}", &first_digest[..5]));
        for id in &ids {
            assert!(id.starts_with("example-"));
            assert!(biblio.contains(id));
        }
    }

    #[test]
    fn test_note_anchor_from_text() {
        let doc = Document::new(
            "Spec",
            vec![Note::new(vec![Paragraph::new(vec![Text::new("Be careful.").into()]).into()]).into()],
        );
        let (doc, _) = run(doc);
        let digest = stable_content_hash("Be careful.");
        assert_eq!(ids(&doc), vec![format!("note-{}", &digest[..5])]);
    }

    #[test]
    fn test_example_prefix_grows_when_taken() {
        let digest = stable_code_hash("{ a }");
        let mut refs = BTreeMap::new();
        refs.insert(format!("example-{}", &digest[..5]), "#taken".to_string());
        let mut external: ExternalBiblio = BTreeMap::new();
        external.insert("https://other.example/".to_string(), refs);

        let mut biblio = Biblio::seeded(&external);
        let doc = Document::new("Spec", vec![Code::example(None, "{ a }").into()]);
        let doc = assign_anchors(doc, &mut biblio, &AnchorOptions::default());
        assert_eq!(ids(&doc), vec![format!("example-{}", &digest[..6])]);
    }

    #[test]
    fn test_anchors_are_stable_across_runs() {
        let build = || {
            Document::new(
                "Spec",
                vec![
                    Code::example(None, "x").into(),
                    Code::example(None, "x").into(),
                    Note::new(vec![Text::new("n").into()]).into(),
                ],
            )
        };
        let (first, _) = run(build());
        let (second, _) = run(build());
        assert_eq!(ids(&first), ids(&second));
    }

    #[test]
    fn test_custom_section_prefix() {
        let mut biblio = Biblio::new();
        let options = AnchorOptions {
            section_prefix: "section-".into(),
            min_hash_length: 8,
        };
        let doc = Document::new(
            "Spec",
            vec![
                Section::new("Intro", vec![]).into(),
                Code::example(None, "y").into(),
            ],
        );
        let doc = assign_anchors(doc, &mut biblio, &options);
        let ids = ids(&doc);
        assert_eq!(ids[0], "section-Intro");
        assert_eq!(ids[1].len(), "example-".len() + 8);
    }
}
