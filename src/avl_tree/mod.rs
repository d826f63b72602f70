//! Self-balancing binary search tree where the heights of the two child
//! subtrees of any node differ by at most one, holding labelled family
//! members and answering structural queries over them.

mod family;
mod node;
mod query;
mod tree;

pub use self::family::{FamilyTree, FamilyTreeIter};
