//! Plain text extraction
//!
//!     Flattens a run of nodes to the text a reader would see, without markup. Inline nodes are
//!     concatenated; each block starts a new line. Used for note hashing, definition term names
//!     and labels.

use super::elements::Node;

/// Plain text of a sequence of nodes
pub fn plain_text(nodes: &[Node]) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut inline_run: Option<String> = None;

    for node in nodes {
        if is_inline(node) {
            inline_run
                .get_or_insert_with(String::new)
                .push_str(&node_text(node));
        } else {
            if let Some(run) = inline_run.take() {
                lines.push(run);
            }
            lines.push(node_text(node));
        }
    }
    if let Some(run) = inline_run {
        lines.push(run);
    }
    lines.join("\n")
}

fn is_inline(node: &Node) -> bool {
    matches!(
        node,
        Node::Text(_)
            | Node::InlineCode(_)
            | Node::Bold(_)
            | Node::Italic(_)
            | Node::Link(_)
            | Node::DefinitionTerm(_)
            | Node::NonTerminal(_)
            | Node::Terminal(_)
            | Node::Call(_)
    )
}

fn node_text(node: &Node) -> String {
    match node {
        Node::Text(n) => n.value.clone(),
        Node::InlineCode(n) => n.value.clone(),
        Node::Terminal(n) => n.value.clone(),
        Node::NonTerminal(n) => n.name.clone(),
        Node::Call(n) => format!("{}({})", n.name, n.args.join(", ")),
        Node::Code(n) => n.code.clone(),
        Node::Import(n) => n.path.clone(),
        Node::Rhs(n) => n
            .tokens
            .iter()
            .map(node_text)
            .collect::<Vec<_>>()
            .join(" "),
        Node::Section(n) => with_title(&n.title, &n.contents),
        Node::Subsection(n) => with_title(&n.title, &n.contents),
        Node::Document(n) => match &n.title {
            Some(title) => with_title(title, &n.contents),
            None => plain_text(&n.contents),
        },
        other => {
            let children: Vec<Node> = other.children().into_iter().cloned().collect();
            plain_text(&children)
        }
    }
}

fn with_title(title: &str, contents: &[Node]) -> String {
    let body = plain_text(contents);
    if body.is_empty() {
        title.to_string()
    } else {
        format!("{}\n{}", title, body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::specmd::ast::{Bold, InlineCode, Link, Paragraph, Text};

    #[test]
    fn test_inlines_concatenate() {
        let nodes: Vec<Node> = vec![
            Text::new("Use ").into(),
            InlineCode::new("query").into(),
            Text::new(" with ").into(),
            Bold::new(vec![Text::new("care").into()]).into(),
        ];
        assert_eq!(plain_text(&nodes), "Use query with care");
    }

    #[test]
    fn test_blocks_start_new_lines() {
        let nodes: Vec<Node> = vec![
            Paragraph::new(vec![Text::new("one").into()]).into(),
            Paragraph::new(vec![
                Link::new("http://x", vec![Text::new("two").into()]).into(),
            ])
            .into(),
        ];
        assert_eq!(plain_text(&nodes), "one\ntwo");
    }

    #[test]
    fn test_empty() {
        assert_eq!(plain_text(&[]), "");
    }
}
