use crate::avl_tree::node::Node;
use crate::avl_tree::query;
use crate::avl_tree::tree;
use crate::error::Error;
use crate::event::EventSink;
use crate::key::Key;
use crate::member::Member;
use std::cell::Cell;
use tracing::debug;

/// A height-balanced family tree ordered by member value.
///
/// The tree is an AVL tree: after every insertion and removal the heights of
/// the two child subtrees of any node differ by at most one. Mutations
/// narrate themselves to an [`EventSink`]; structural queries walk the
/// already balanced tree.
///
/// Member references returned by queries are not stable across removals: a
/// removal may overwrite a surviving node's member with its in-order
/// successor's label and key.
///
/// # Examples
/// ```
/// use family_tree::{FamilyTree, VecSink};
///
/// let mut sink = VecSink::new();
/// let mut tree = FamilyTree::new("Don", 50.0);
/// tree.insert("Son", 30.0, &mut sink).unwrap();
/// tree.insert("Nephew", 70.0, &mut sink).unwrap();
///
/// assert_eq!(tree.len(), 3);
/// assert_eq!(sink.lines, vec!["Don welcomed Son", "Don welcomed Nephew"]);
///
/// let ancestor = tree.lowest_common_ancestor(30.0, 70.0).unwrap();
/// assert_eq!(ancestor.label, "Don");
/// ```
pub struct FamilyTree {
    root: tree::Tree,
    len: usize,
    version: u64,
    division_cache: Cell<Option<(u64, usize)>>,
}

impl FamilyTree {
    /// Constructs a `FamilyTree` rooted at its founding member. No event is
    /// narrated for the root.
    ///
    /// # Examples
    /// ```
    /// use family_tree::FamilyTree;
    ///
    /// let tree = FamilyTree::new("Don", 50.0);
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn new<S>(label: S, key: f64) -> Self
    where
        S: Into<String>,
    {
        FamilyTree {
            root: Some(Box::new(Node::new(Member::new(label, key)))),
            len: 1,
            version: 0,
            division_cache: Cell::new(None),
        }
    }

    /// Inserts a member, narrating one welcome per level descended, ordered
    /// from the root to the new leaf's parent. Inserting an existing key is
    /// a structural no-op that returns `false`; narration stops at the
    /// level above the matching node.
    ///
    /// # Examples
    /// ```
    /// use family_tree::{FamilyTree, VecSink};
    ///
    /// let mut sink = VecSink::new();
    /// let mut tree = FamilyTree::new("Don", 50.0);
    /// assert!(tree.insert("Son", 30.0, &mut sink).unwrap());
    /// assert!(!tree.insert("Impostor", 30.0, &mut sink).unwrap());
    /// assert_eq!(tree.len(), 2);
    /// ```
    pub fn insert(
        &mut self,
        label: &str,
        key: f64,
        sink: &mut dyn EventSink,
    ) -> Result<bool, Error> {
        let inserted = tree::insert(&mut self.root, Member::new(label, key), sink)?;
        if inserted {
            self.len += 1;
            self.version += 1;
        }
        debug!(label, key, inserted, "insert");
        Ok(inserted)
    }

    /// Removes the member with the given key and returns it, narrating the
    /// departure and its replacement exactly once. Removing an absent key
    /// is a no-op returning `None`.
    ///
    /// # Examples
    /// ```
    /// use family_tree::{FamilyTree, VecSink};
    ///
    /// let mut sink = VecSink::new();
    /// let mut tree = FamilyTree::new("Don", 50.0);
    /// tree.insert("Son", 30.0, &mut sink).unwrap();
    ///
    /// let departed = tree.remove(30.0, &mut sink).unwrap();
    /// assert_eq!(departed.unwrap().label, "Son");
    /// assert_eq!(sink.lines.last().unwrap(), "Son left the family, replaced by nobody");
    /// assert_eq!(tree.remove(30.0, &mut sink).unwrap(), None);
    /// ```
    pub fn remove(&mut self, key: f64, sink: &mut dyn EventSink) -> Result<Option<Member>, Error> {
        let removed = tree::remove(&mut self.root, Key::new(key), true, sink)?;
        if removed.is_some() {
            self.len -= 1;
            self.version += 1;
        }
        debug!(key, removed = removed.is_some(), "remove");
        Ok(removed)
    }

    /// Returns the member with the given key, if present.
    pub fn get(&self, key: f64) -> Option<&Member> {
        tree::get(&self.root, Key::new(key))
    }

    /// Checks whether a key exists in the tree.
    ///
    /// # Examples
    /// ```
    /// use family_tree::FamilyTree;
    ///
    /// let tree = FamilyTree::new("Don", 50.0);
    /// assert!(tree.contains(50.0));
    /// assert!(!tree.contains(30.0));
    /// ```
    pub fn contains(&self, key: f64) -> bool {
        self.get(key).is_some()
    }

    /// Returns the number of members in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the tree has no members.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the height of the tree, where a lone root has height 0 and
    /// an empty tree −1.
    pub fn height(&self) -> i32 {
        tree::height(&self.root)
    }

    /// Finds the lowest common ancestor of two present keys. When one
    /// target is an ancestor of the other, the shallower target is
    /// returned. The result is unspecified if exactly one key is absent;
    /// callers that cannot guarantee presence should [`contains`] first.
    ///
    /// [`contains`]: FamilyTree::contains
    ///
    /// # Examples
    /// ```
    /// use family_tree::{FamilyTree, VecSink};
    ///
    /// let mut sink = VecSink::new();
    /// let mut tree = FamilyTree::new("Don", 50.0);
    /// tree.insert("Son", 30.0, &mut sink).unwrap();
    /// tree.insert("Nephew", 70.0, &mut sink).unwrap();
    ///
    /// assert_eq!(tree.lowest_common_ancestor(30.0, 70.0).unwrap().label, "Don");
    /// assert_eq!(tree.lowest_common_ancestor(50.0, 70.0).unwrap().label, "Don");
    /// ```
    pub fn lowest_common_ancestor(&self, key1: f64, key2: f64) -> Option<&Member> {
        query::lowest_common_ancestor(&self.root, Key::new(key1), Key::new(key2))
    }

    /// Collects the members sharing the breadth-first level of the given
    /// key, in left-to-right order. An absent key yields an empty sequence.
    ///
    /// # Examples
    /// ```
    /// use family_tree::{FamilyTree, VecSink};
    ///
    /// let mut sink = VecSink::new();
    /// let mut tree = FamilyTree::new("Don", 50.0);
    /// tree.insert("Son", 30.0, &mut sink).unwrap();
    /// tree.insert("Nephew", 70.0, &mut sink).unwrap();
    ///
    /// let level = tree.members_at_same_rank(70.0);
    /// let labels = level.iter().map(|m| m.label.as_str()).collect::<Vec<_>>();
    /// assert_eq!(labels, vec!["Son", "Nephew"]);
    /// assert!(tree.members_at_same_rank(99.0).is_empty());
    /// ```
    pub fn members_at_same_rank(&self, key: f64) -> Vec<&Member> {
        query::members_at_same_rank(&self.root, Key::new(key))
    }

    /// Returns the size of the largest independent selection of members,
    /// where picking a member rules out the members directly linked to it.
    /// The result is memoized until the next structural mutation.
    ///
    /// # Examples
    /// ```
    /// use family_tree::{FamilyTree, VecSink};
    ///
    /// let mut sink = VecSink::new();
    /// let mut tree = FamilyTree::new("Don", 50.0);
    /// tree.insert("Son", 30.0, &mut sink).unwrap();
    /// tree.insert("Nephew", 70.0, &mut sink).unwrap();
    ///
    /// assert_eq!(tree.max_independent_members(), 2);
    /// ```
    pub fn max_independent_members(&self) -> usize {
        if let Some((version, count)) = self.division_cache.get() {
            if version == self.version {
                return count;
            }
        }

        let count = query::max_independent_members(&self.root);
        self.division_cache.set(Some((self.version, count)));
        count
    }

    /// Returns an iterator over the members of the tree in ascending key
    /// order.
    ///
    /// # Examples
    /// ```
    /// use family_tree::{FamilyTree, VecSink};
    ///
    /// let mut sink = VecSink::new();
    /// let mut tree = FamilyTree::new("Don", 50.0);
    /// tree.insert("Son", 30.0, &mut sink).unwrap();
    ///
    /// let labels = tree.iter().map(|m| m.label.as_str()).collect::<Vec<_>>();
    /// assert_eq!(labels, vec!["Son", "Don"]);
    /// ```
    pub fn iter(&self) -> FamilyTreeIter<'_> {
        FamilyTreeIter {
            current: &self.root,
            stack: Vec::new(),
        }
    }
}

impl<'a> IntoIterator for &'a FamilyTree {
    type IntoIter = FamilyTreeIter<'a>;
    type Item = &'a Member;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator for `FamilyTree`.
///
/// This iterator traverses the members of the tree in-order and yields
/// immutable references.
pub struct FamilyTreeIter<'a> {
    current: &'a tree::Tree,
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for FamilyTreeIter<'a> {
    type Item = &'a Member;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(ref node) = self.current {
            self.current = &node.left;
            self.stack.push(node);
        }
        self.stack.pop().map(|node| {
            self.current = &node.right;
            &node.member
        })
    }
}
