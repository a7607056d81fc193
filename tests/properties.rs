//! Property-based tests driving random operation sequences against a model
//! set. Tree structure is verified exclusively through the public `NodeRef`
//! view, recomputing heights, balance factors and key bounds from scratch.

use std::collections::BTreeSet;

use ordered_tree::{AvlTree, BinaryTree, NodeRef};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Insert(i32),
    Remove(i32),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0i32..64).prop_map(Op::Insert),
        (0i32..64).prop_map(Op::Remove),
    ]
}

// Walks a subtree, checking BST bounds, cached heights and the AVL
// condition. Returns the recomputed height.
fn verify_subtree<K: Ord>(node: NodeRef<'_, K>, lower: Option<&K>, upper: Option<&K>) -> usize {
    if let Some(lower) = lower {
        assert!(node.key() > lower);
    }
    if let Some(upper) = upper {
        assert!(node.key() < upper);
    }

    let left_height = node
        .left()
        .map_or(0, |left| verify_subtree(left, lower, Some(node.key())));
    let right_height = node
        .right()
        .map_or(0, |right| verify_subtree(right, Some(node.key()), upper));

    let height = 1 + left_height.max(right_height);
    assert_eq!(node.height(), height);
    assert!(left_height.abs_diff(right_height) <= 1);
    height
}

proptest! {
    #[test]
    fn avl_matches_model_and_stays_balanced(
        ops in proptest::collection::vec(op_strategy(), 1..200)
    ) {
        let mut tree = AvlTree::new();
        let mut model = BTreeSet::new();

        for op in ops {
            match op {
                Op::Insert(key) => prop_assert_eq!(tree.insert(key), model.insert(key)),
                Op::Remove(key) => prop_assert_eq!(tree.remove(&key), model.remove(&key)),
            }
            prop_assert_eq!(tree.len(), model.len());
            prop_assert!(tree.iter().eq(model.iter()));
            if let Some(root) = tree.root() {
                verify_subtree(root, None, None);
            }
        }
    }

    #[test]
    fn height_stays_logarithmic(
        keys in proptest::collection::btree_set(any::<i32>(), 0..300)
    ) {
        let mut tree = AvlTree::new();
        for key in &keys {
            tree.insert(*key);
        }
        let n = tree.len() as f64;
        prop_assert!((tree.height() as f64) <= 1.44 * (n + 2.0).log2());
    }

    #[test]
    fn plain_tree_iterates_in_order(
        keys in proptest::collection::vec(any::<i32>(), 0..100)
    ) {
        let mut tree = BinaryTree::new();
        let mut model = BTreeSet::new();
        for key in &keys {
            prop_assert_eq!(tree.insert(*key), model.insert(*key));
        }
        prop_assert!(tree.iter().eq(model.iter()));
    }
}
