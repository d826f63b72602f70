use crate::avl_tree::node::Node;
use crate::error::Error;
use crate::event::EventSink;
use crate::key::Key;
use crate::member::Member;
use std::cmp::Ordering;
use std::mem;
use tracing::trace;

pub type Tree = Option<Box<Node>>;

/// Returns the cached height of a subtree, where an absent subtree counts
/// as −1 and a leaf as 0.
pub fn height(tree: &Tree) -> i32 {
    match tree {
        None => -1,
        Some(ref node) => node.height,
    }
}

fn rotate_left(mut node: Box<Node>) -> Box<Node> {
    let mut child = match node.right.take() {
        Some(child) => child,
        None => unreachable!(),
    };
    node.right = child.left.take();
    node.update();
    child.left = Some(node);
    child.update();
    child
}

fn rotate_right(mut node: Box<Node>) -> Box<Node> {
    let mut child = match node.left.take() {
        Some(child) => child,
        None => unreachable!(),
    };
    node.left = child.right.take();
    node.update();
    child.right = Some(node);
    child.update();
    child
}

/// Restores the AVL invariant at the root of `tree` after a mutation one
/// level below. A taller inner grandchild forces the double rotation; on
/// equal grandchild heights the single rotation wins.
fn balance(tree: &mut Tree) {
    let mut node = match tree.take() {
        Some(node) => node,
        None => return,
    };

    node.update();

    if node.balance_factor() > 1 {
        if let Some(child) = node.left.take() {
            if child.balance_factor() < 0 {
                node.left = Some(rotate_left(child));
            } else {
                node.left = Some(child);
            }
        }
        trace!(label = %node.member.label, "rotating right");
        node = rotate_right(node);
    } else if node.balance_factor() < -1 {
        if let Some(child) = node.right.take() {
            if child.balance_factor() > 0 {
                node.right = Some(rotate_right(child));
            } else {
                node.right = Some(child);
            }
        }
        trace!(label = %node.member.label, "rotating left");
        node = rotate_left(node);
    }

    *tree = Some(node);
}

/// Inserts a member at the slot its key selects, narrating one welcome per
/// level descended. Returns whether a node was created; a duplicate key is
/// a structural no-op that stops the descent without narrating at the
/// matching node.
pub fn insert(tree: &mut Tree, member: Member, sink: &mut dyn EventSink) -> Result<bool, Error> {
    let inserted = match tree {
        Some(ref mut node) => match member.key.cmp(&node.member.key) {
            Ordering::Equal => return Ok(false),
            ordering => {
                sink.emit(&format!(
                    "{} welcomed {}",
                    node.member.label, member.label
                ))?;
                match ordering {
                    Ordering::Less => insert(&mut node.left, member, sink)?,
                    _ => insert(&mut node.right, member, sink)?,
                }
            }
        },
        None => {
            *tree = Some(Box::new(Node::new(member)));
            return Ok(true);
        }
    };

    balance(tree);
    Ok(inserted)
}

/// Removes the member with the given key, if present.
///
/// A node with two children is not unlinked: its member is overwritten with
/// its in-order successor's and the successor's node is removed from the
/// right subtree instead. That internal removal runs with `notify` unset so
/// the departure is narrated exactly once. A sink failure aborts before the
/// structural change at the failing level, leaving the subtree intact.
pub fn remove(
    tree: &mut Tree,
    key: Key,
    notify: bool,
    sink: &mut dyn EventSink,
) -> Result<Option<Member>, Error> {
    let removed = match tree.take() {
        Some(mut node) => match key.cmp(&node.member.key) {
            Ordering::Less => {
                let removed = remove(&mut node.left, key, notify, sink);
                *tree = Some(node);
                removed?
            }
            Ordering::Greater => {
                let removed = remove(&mut node.right, key, notify, sink);
                *tree = Some(node);
                removed?
            }
            Ordering::Equal => {
                let replacement = match (&node.left, &node.right) {
                    (None, None) => None,
                    (Some(child), None) | (None, Some(child)) => Some(child.member.clone()),
                    (Some(_), Some(_)) => min(&node.right).cloned(),
                };

                if notify {
                    let line = match replacement {
                        Some(ref successor) => format!(
                            "{} left the family, replaced by {}",
                            node.member.label, successor.label
                        ),
                        None => format!(
                            "{} left the family, replaced by nobody",
                            node.member.label
                        ),
                    };
                    if let Err(err) = sink.emit(&line) {
                        *tree = Some(node);
                        return Err(err.into());
                    }
                }

                match (node.left.take(), node.right.take()) {
                    (None, None) => Some(node.member),
                    (Some(child), None) | (None, Some(child)) => {
                        *tree = Some(child);
                        Some(node.member)
                    }
                    (left, right) => {
                        node.left = left;
                        node.right = right;
                        let successor = match replacement {
                            Some(successor) => successor,
                            None => unreachable!(),
                        };
                        let departed = mem::replace(&mut node.member, successor);
                        let successor_key = node.member.key;
                        let removed = remove(&mut node.right, successor_key, false, sink);
                        *tree = Some(node);
                        removed?;
                        Some(departed)
                    }
                }
            }
        },
        None => return Ok(None),
    };

    balance(tree);
    Ok(removed)
}

pub fn get<'a>(tree: &'a Tree, key: Key) -> Option<&'a Member> {
    tree.as_ref().and_then(|node| match key.cmp(&node.member.key) {
        Ordering::Less => get(&node.left, key),
        Ordering::Greater => get(&node.right, key),
        Ordering::Equal => Some(&node.member),
    })
}

pub fn min(tree: &Tree) -> Option<&Member> {
    tree.as_ref().map(|node| {
        let mut curr = node;
        while let Some(ref left_node) = curr.left {
            curr = left_node;
        }
        &curr.member
    })
}
