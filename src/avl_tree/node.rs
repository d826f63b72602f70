use crate::avl_tree::tree;
use crate::member::Member;
use std::cmp;

/// A struct representing an internal node of the family tree.
///
/// Heights follow the leaf-is-zero convention: a leaf caches height 0 and an
/// absent subtree counts as −1.
pub struct Node {
    pub member: Member,
    pub height: i32,
    pub left: tree::Tree,
    pub right: tree::Tree,
}

impl Node {
    pub fn new(member: Member) -> Self {
        Node {
            member,
            height: 0,
            left: None,
            right: None,
        }
    }

    pub fn update(&mut self) {
        let Node {
            ref mut height,
            ref left,
            ref right,
            ..
        } = self;
        *height = cmp::max(tree::height(left), tree::height(right)) + 1;
    }

    pub fn balance_factor(&self) -> i32 {
        tree::height(&self.left) - tree::height(&self.right)
    }
}
