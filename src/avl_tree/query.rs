use crate::avl_tree::node::Node;
use crate::avl_tree::tree::Tree;
use crate::key::Key;
use crate::member::Member;
use std::cmp;

/// Finds the lowest common ancestor of two keys.
///
/// A node matching either key terminates the search on its side, so when one
/// target is an ancestor of the other, the shallower target is the answer.
/// Both keys are expected to be present; with a single absent key the result
/// is unspecified, and callers that cannot guarantee presence must validate
/// first.
pub fn lowest_common_ancestor(tree: &Tree, key1: Key, key2: Key) -> Option<&Member> {
    ancestor_search(tree, key1, key2).map(|node| &node.member)
}

fn ancestor_search(tree: &Tree, key1: Key, key2: Key) -> Option<&Node> {
    let node = tree.as_deref()?;
    if node.member.key == key1 || node.member.key == key2 {
        return Some(node);
    }

    let left = ancestor_search(&node.left, key1, key2);
    let right = ancestor_search(&node.right, key1, key2);

    match (left, right) {
        (Some(_), Some(_)) => Some(node),
        (left, right) => left.or(right),
    }
}

/// Collects the members on the breadth-first level containing `key`, in
/// left-to-right order. An absent key yields an empty sequence.
pub fn members_at_same_rank(tree: &Tree, key: Key) -> Vec<&Member> {
    let mut level: Vec<&Node> = tree.as_deref().into_iter().collect();

    while !level.is_empty() {
        if level.iter().any(|node| node.member.key == key) {
            return level.into_iter().map(|node| &node.member).collect();
        }
        level = level
            .into_iter()
            .flat_map(|node| node.left.as_deref().into_iter().chain(node.right.as_deref()))
            .collect();
    }

    Vec::new()
}

/// Computes the size of the largest independent selection of members, where
/// picking a member rules out the members directly linked to it. Each
/// subtree resolves to the best value with and without its root; a picked
/// root adds one to its children's without-values, an unpicked root frees
/// both children to take their better case.
pub fn max_independent_members(tree: &Tree) -> usize {
    let (with_root, without_root) = independent(tree);
    cmp::max(with_root, without_root)
}

// (best including the subtree root, best excluding it)
fn independent(tree: &Tree) -> (usize, usize) {
    match tree {
        None => (0, 0),
        Some(node) => {
            let left = independent(&node.left);
            let right = independent(&node.right);
            let with_root = 1 + left.1 + right.1;
            let without_root = cmp::max(left.0, left.1) + cmp::max(right.0, right.1);
            (with_root, without_root)
        }
    }
}
