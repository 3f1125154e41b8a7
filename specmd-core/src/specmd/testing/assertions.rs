//! Fluent assertions over documents and nodes

use crate::specmd::ast::{plain_text, Document, IdPart, Node};

fn summarize(nodes: &[Node]) -> String {
    nodes
        .iter()
        .map(Node::kind)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Create an assertion builder for a document
pub fn assert_doc(doc: &Document) -> DocumentAssertion<'_> {
    DocumentAssertion { doc }
}

pub struct DocumentAssertion<'a> {
    doc: &'a Document,
}

impl<'a> DocumentAssertion<'a> {
    pub fn title(self, expected: &str) -> Self {
        assert_eq!(
            self.doc.title.as_deref(),
            Some(expected),
            "Expected document title '{}', found {:?}",
            expected,
            self.doc.title
        );
        self
    }

    /// Assert the number of top-level items
    pub fn item_count(self, expected: usize) -> Self {
        let actual = self.doc.contents.len();
        assert_eq!(
            actual,
            expected,
            "Expected {} items, found {} items: [{}]",
            expected,
            actual,
            summarize(&self.doc.contents)
        );
        self
    }

    /// Assert on a top-level item by index
    pub fn item<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(NodeAssertion<'a>),
    {
        assert!(
            index < self.doc.contents.len(),
            "Item index {} out of bounds (document has {} items)",
            index,
            self.doc.contents.len()
        );
        assertion(NodeAssertion {
            node: &self.doc.contents[index],
            context: format!("items[{}]", index),
        });
        self
    }

    /// Assert that no import placeholder is left anywhere in the tree
    pub fn no_imports(self) -> Self {
        if let Some(import) = self.doc.descendants().find(|n| n.is_import()) {
            panic!(
                "Expected no imports, found one for {:?}",
                import.label().unwrap_or_default()
            );
        }
        self
    }
}

pub struct NodeAssertion<'a> {
    pub(crate) node: &'a Node,
    pub(crate) context: String,
}

impl<'a> NodeAssertion<'a> {
    pub fn kind(self, expected: &str) -> Self {
        assert_eq!(
            self.node.kind(),
            expected,
            "{}: Expected {}, found {}",
            self.context,
            expected,
            self.node.kind()
        );
        self
    }

    pub fn id(self, expected: &str) -> Self {
        assert_eq!(
            self.node.id(),
            Some(expected),
            "{}: Expected id '{}' on {}, found {:?}",
            self.context,
            expected,
            self.node.kind(),
            self.node.id()
        );
        self
    }

    pub fn label(self, expected: &str) -> Self {
        let actual = self.node.label();
        assert_eq!(
            actual.as_deref(),
            Some(expected),
            "{}: Expected label '{}', found {:?}",
            self.context,
            expected,
            actual
        );
        self
    }

    /// Assert the plain text of the node, without markup
    pub fn text(self, expected: &str) -> Self {
        let actual = plain_text(std::slice::from_ref(self.node));
        assert_eq!(
            actual, expected,
            "{}: Expected text '{}', found '{}'",
            self.context, expected, actual
        );
        self
    }

    pub fn assert_paragraph(self) -> Self {
        self.kind("Paragraph")
    }

    pub fn assert_section(self) -> SectionAssertion<'a> {
        match self.node {
            Node::Section(s) => SectionAssertion {
                title: &s.title,
                number: s.number.as_deref(),
                sec_id: &s.sec_id,
                id: s.id.as_deref(),
                contents: &s.contents,
                context: self.context,
            },
            other => panic!("{}: Expected Section, found {}", self.context, other.kind()),
        }
    }

    pub fn assert_subsection(self) -> SectionAssertion<'a> {
        match self.node {
            Node::Subsection(s) => SectionAssertion {
                title: &s.title,
                number: None,
                sec_id: &s.sec_id,
                id: s.id.as_deref(),
                contents: &s.contents,
                context: self.context,
            },
            other => panic!("{}: Expected Subsection, found {}", self.context, other.kind()),
        }
    }

    pub fn assert_code(self) -> CodeAssertion<'a> {
        match self.node {
            Node::Code(code) => CodeAssertion {
                code,
                context: self.context,
            },
            other => panic!("{}: Expected Code, found {}", self.context, other.kind()),
        }
    }

    pub fn assert_production(self) -> ProductionAssertion<'a> {
        match self.node {
            Node::Production(p) => ProductionAssertion {
                name: p.name(),
                def_type: p.def_type,
                alternatives: &p.rhs,
                id: p.id.as_deref(),
                context: self.context,
            },
            Node::OneOfProduction(p) => ProductionAssertion {
                name: p.name(),
                def_type: p.def_type,
                alternatives: &p.rows,
                id: p.id.as_deref(),
                context: self.context,
            },
            other => panic!("{}: Expected Production, found {}", self.context, other.kind()),
        }
    }
}

/// Assertions shared by sections and subsections
pub struct SectionAssertion<'a> {
    title: &'a str,
    number: Option<&'a str>,
    sec_id: &'a [IdPart],
    id: Option<&'a str>,
    contents: &'a [Node],
    context: String,
}

impl<'a> SectionAssertion<'a> {
    pub fn title(self, expected: &str) -> Self {
        assert_eq!(
            self.title, expected,
            "{}: Expected section title '{}', found '{}'",
            self.context, expected, self.title
        );
        self
    }

    /// Assert the dotted number, e.g. "2.1" or "A.3"
    pub fn number(self, expected: &str) -> Self {
        assert_eq!(
            self.number,
            Some(expected),
            "{}: Expected section '{}' to be numbered {}, found {:?}",
            self.context,
            self.title,
            expected,
            self.number
        );
        self
    }

    pub fn sec_id(self, expected: &[IdPart]) -> Self {
        assert_eq!(
            self.sec_id, expected,
            "{}: Unexpected hierarchical id for section '{}'",
            self.context, self.title
        );
        self
    }

    pub fn id(self, expected: &str) -> Self {
        assert_eq!(
            self.id,
            Some(expected),
            "{}: Expected section '{}' to have id '{}', found {:?}",
            self.context,
            self.title,
            expected,
            self.id
        );
        self
    }

    pub fn child_count(self, expected: usize) -> Self {
        assert_eq!(
            self.contents.len(),
            expected,
            "{}: Expected {} children, found {} children: [{}]",
            self.context,
            expected,
            self.contents.len(),
            summarize(self.contents)
        );
        self
    }

    pub fn child<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(NodeAssertion<'a>),
    {
        assert!(
            index < self.contents.len(),
            "{}: Child index {} out of bounds (section has {} children)",
            self.context,
            index,
            self.contents.len()
        );
        assertion(NodeAssertion {
            node: &self.contents[index],
            context: format!("{}:children[{}]", self.context, index),
        });
        self
    }
}

pub struct CodeAssertion<'a> {
    code: &'a crate::specmd::ast::Code,
    context: String,
}

impl CodeAssertion<'_> {
    pub fn lang(self, expected: &str) -> Self {
        assert_eq!(
            self.code.lang.as_deref(),
            Some(expected),
            "{}: Expected code language '{}', found {:?}",
            self.context,
            expected,
            self.code.lang
        );
        self
    }

    /// Assert the example number; counter-examples share the sequence
    pub fn example_number(self, expected: u32) -> Self {
        assert!(self.code.example, "{}: Expected an example block", self.context);
        assert_eq!(
            self.code.number,
            Some(expected),
            "{}: Expected example number {}, found {:?}",
            self.context,
            expected,
            self.code.number
        );
        self
    }

    pub fn counter(self, expected: bool) -> Self {
        assert_eq!(
            self.code.counter, expected,
            "{}: Expected counter flag {}",
            self.context, expected
        );
        self
    }

    pub fn id_starts_with(self, prefix: &str) -> Self {
        let id = self.code.id.as_deref().unwrap_or_default();
        assert!(
            id.starts_with(prefix),
            "{}: Expected code id to start with '{}', found {:?}",
            self.context,
            prefix,
            self.code.id
        );
        self
    }
}

pub struct ProductionAssertion<'a> {
    name: Option<&'a str>,
    def_type: u8,
    alternatives: &'a [Node],
    id: Option<&'a str>,
    context: String,
}

impl ProductionAssertion<'_> {
    pub fn name(self, expected: &str) -> Self {
        assert_eq!(
            self.name,
            Some(expected),
            "{}: Expected production '{}', found {:?}",
            self.context,
            expected,
            self.name
        );
        self
    }

    /// Assert the number of colons in the definition
    pub fn def_type(self, expected: u8) -> Self {
        assert_eq!(
            self.def_type, expected,
            "{}: Expected definition type {}, found {}",
            self.context, expected, self.def_type
        );
        self
    }

    /// Assert the number of alternatives (or rows of a one-of production)
    pub fn alternative_count(self, expected: usize) -> Self {
        assert_eq!(
            self.alternatives.len(),
            expected,
            "{}: Expected {} alternatives, found {}",
            self.context,
            expected,
            self.alternatives.len()
        );
        self
    }

    pub fn id(self, expected: &str) -> Self {
        assert_eq!(
            self.id,
            Some(expected),
            "{}: Expected production id '{}', found {:?}",
            self.context,
            expected,
            self.id
        );
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::specmd::testing::builders::{doc, para, section};

    fn numbered(title: &str, number: &str, contents: Vec<Node>) -> Node {
        match section(title, contents) {
            Node::Section(mut s) => {
                s.number = Some(number.to_string());
                s.id = Some(format!("sec-{}", title));
                s.into()
            }
            other => other,
        }
    }

    #[test]
    fn test_passing_chain() {
        let document = doc("Spec", vec![numbered("Intro", "1", vec![para("Hello.")])]);
        assert_doc(&document)
            .title("Spec")
            .item_count(1)
            .no_imports()
            .item(0, |item| {
                item.assert_section()
                    .title("Intro")
                    .number("1")
                    .id("sec-Intro")
                    .child_count(1)
                    .child(0, |child| {
                        child.assert_paragraph().text("Hello.");
                    });
            });
    }

    #[test]
    #[should_panic(expected = "items[0]:children[0]: Expected Section, found Paragraph")]
    fn test_failure_carries_context() {
        let document = doc("Spec", vec![section("Intro", vec![para("Hello.")])]);
        assert_doc(&document).item(0, |item| {
            item.assert_section().child(0, |child| {
                child.assert_section();
            });
        });
    }

    #[test]
    #[should_panic(expected = "Expected 2 items, found 1 items: [Section]")]
    fn test_item_count_summary() {
        let document = doc("Spec", vec![section("Intro", vec![])]);
        assert_doc(&document).item_count(2);
    }
}
