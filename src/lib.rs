//! Ordered key sets backed by binary search trees.
//!
//! [`AvlTree`] is the primary type: a self-balancing (AVL) tree whose height
//! stays logarithmic in the number of keys. [`BinaryTree`] is the plain,
//! non-balancing tree with the same operation surface. Both support ordered
//! insertion and removal, lookups, the aggregate queries `min`/`max`/`sum`,
//! and in-order iteration. [`AvlTree`] additionally exposes a read-only
//! [`NodeRef`] view of its structure for external consumers such as
//! renderers.

pub mod bst;
pub mod tree;

mod error;

pub use bst::BinaryTree;
pub use error::Error;
pub use tree::{AvlTree, Iter, NodeRef};
