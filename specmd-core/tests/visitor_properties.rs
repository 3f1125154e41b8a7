//! Property-based tests for the visitor engine
//!
//! Trees are generated from a small grammar of sections, notes, paragraphs, lists and
//! examples, nested a few levels deep. The properties hold for any tree:
//! - an enter-only visitor sees every node exactly once, in pre-order
//! - replacing every node with a structural copy changes nothing
//! - deleting a kind removes exactly that kind and keeps everything else in order

use proptest::prelude::*;
use specmd_core::specmd::ast::{Node, Note, Tree};
use specmd_core::specmd::testing::builders::{example, list, para, section, text};
use specmd_core::specmd::visit::{traverse, Callbacks, VisitAction};

fn leaf_strategy() -> impl Strategy<Value = Node> {
    prop_oneof![
        "[a-z]{1,8}".prop_map(|value| text(&value)),
        "[a-z][a-z ]{0,12}".prop_map(|value| para(&value)),
        "[a-z{}()]{1,10}".prop_map(|code| example(&code)),
        prop::collection::vec("[a-z]{1,5}", 1..4).prop_map(|items| {
            let items: Vec<&str> = items.iter().map(String::as_str).collect();
            list(&items)
        }),
    ]
}

fn tree_strategy() -> impl Strategy<Value = Node> {
    leaf_strategy().prop_recursive(4, 64, 6, |inner| {
        prop_oneof![
            ("[A-Z][a-z]{0,6}", prop::collection::vec(inner.clone(), 0..6))
                .prop_map(|(title, contents)| section(&title, contents)),
            prop::collection::vec(inner, 0..4).prop_map(|contents| Node::from(Note::new(contents))),
        ]
    })
}

/// Kind and label of a node, enough to tell visits apart
fn describe(node: &Node) -> String {
    format!("{}:{}", node.kind(), node.label().unwrap_or_default())
}

fn count_kind(node: &Node, kind: &str) -> usize {
    std::iter::once(node)
        .chain(node.descendants())
        .filter(|n| n.kind() == kind)
        .count()
}

proptest! {
    #[test]
    fn test_enter_visits_every_node_in_preorder(root in tree_strategy()) {
        let expected: Vec<String> = std::iter::once(&root)
            .chain(root.descendants())
            .map(describe)
            .collect();

        let mut visited = Vec::new();
        traverse(
            Tree::Node(root),
            &mut Callbacks::new().on_enter(|node, _| {
                visited.push(describe(node));
                VisitAction::Continue
            }),
        );

        prop_assert_eq!(visited, expected);
    }

    #[test]
    fn test_identity_replacement_is_a_no_op(root in tree_strategy()) {
        let result = traverse(
            Tree::Node(root.clone()),
            &mut Callbacks::new().on_enter(|node, _| VisitAction::replace(node.clone())),
        );
        prop_assert_eq!(result, Tree::Node(root));
    }

    #[test]
    fn test_leave_replacement_is_a_no_op(root in tree_strategy()) {
        let result = traverse(
            Tree::Node(root.clone()),
            &mut Callbacks::new().on_leave(|node, _| VisitAction::replace(node.clone())),
        );
        prop_assert_eq!(result, Tree::Node(root));
    }

    #[test]
    fn test_delete_removes_only_that_kind(root in tree_strategy()) {
        prop_assume!(!matches!(root, Node::Code(_)));
        let paragraphs = count_kind(&root, "Paragraph");
        let sections = count_kind(&root, "Section");

        let result = traverse(
            Tree::Node(root),
            &mut Callbacks::new().on_enter(|node, _| match node {
                Node::Code(_) => VisitAction::Delete,
                _ => VisitAction::Continue,
            }),
        );

        let root = match result {
            Tree::Node(node) => node,
            Tree::Seq(nodes) => panic!("root was not a code block, got {} nodes", nodes.len()),
        };
        prop_assert_eq!(count_kind(&root, "Code"), 0);
        prop_assert_eq!(count_kind(&root, "Paragraph"), paragraphs);
        prop_assert_eq!(count_kind(&root, "Section"), sections);
    }

    #[test]
    fn test_parents_are_root_or_composite(root in tree_strategy()) {
        let mut roots = 0;
        let mut leaf_parents = 0;
        traverse(
            Tree::Node(root),
            &mut Callbacks::new().on_enter(|_, ctx| {
                match ctx.parent() {
                    None => roots += 1,
                    Some(Node::Text(_) | Node::Code(_)) => leaf_parents += 1,
                    Some(_) => {}
                }
                VisitAction::Continue
            }),
        );
        prop_assert_eq!(roots, 1);
        prop_assert_eq!(leaf_parents, 0);
    }
}
