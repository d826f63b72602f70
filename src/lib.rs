//! A height-balanced family tree keyed by member value.
//!
//! The core is an AVL tree whose nodes carry a string label alongside the
//! ordering key. Insertions and removals narrate themselves to an
//! [`EventSink`] ("`X` welcomed `Y`", "`X` left the family, replaced by
//! `Y`"), and three structural queries walk the balanced tree: lowest
//! common ancestor, breadth-first rank grouping, and the maximum
//! independent selection of members.
//!
//! The [`command`] module adds a line-oriented session format on top
//! (`MEMBER_IN`, `MEMBER_OUT`, `INTEL_*`); the tree itself only ever sees
//! parsed arguments.

pub mod avl_tree;
pub mod command;
mod error;
mod event;
mod key;
mod member;

pub use crate::avl_tree::{FamilyTree, FamilyTreeIter};
pub use crate::error::Error;
pub use crate::event::{EventSink, VecSink, WriterSink};
pub use crate::key::Key;
pub use crate::member::Member;
