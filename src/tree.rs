//! An ordered set of keys implemented with an AVL tree.

use std::cmp::{self, Ordering};
use std::iter::Sum;

use crate::error::Error;

/// An ordered set of keys implemented with an AVL tree.
///
/// Every node caches the height of its subtree; insertion and removal keep
/// the height difference between any node's subtrees within one level, so
/// lookups, updates and the ordered queries all run in logarithmic time.
///
/// ```
/// use ordered_tree::AvlTree;
///
/// let mut tree = AvlTree::new();
/// tree.insert(2);
/// tree.insert(1);
/// tree.insert(3);
/// assert_eq!(tree.min(), Ok(&1));
/// assert_eq!(tree.max(), Ok(&3));
/// assert_eq!(tree.sum(), 6);
/// tree.remove(&1);
/// assert!(!tree.contains(&1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvlTree<K: Ord> {
    root: Link<K>,
    num_nodes: usize,
}

type Link<K> = Option<Box<Node<K>>>;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Node<K> {
    key: K,
    height: usize,
    left: Link<K>,
    right: Link<K>,
}

/// An in-order iterator over the keys of a tree.
pub struct Iter<'a, K> {
    stack: Vec<&'a Node<K>>,
}

/// A read-only view of a tree node.
///
/// Exposes the key, the cached subtree height and handles to both children,
/// which is sufficient for external consumers (renderers, structure checks)
/// to reconstruct the full tree shape.
pub struct NodeRef<'a, K> {
    node: &'a Node<K>,
}

impl<K: Ord> AvlTree<K> {
    /// Creates an empty tree.
    /// No memory is allocated until the first key is inserted.
    pub fn new() -> Self {
        Self {
            root: None,
            num_nodes: 0,
        }
    }

    /// Returns true if the tree contains no keys.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the number of keys in the tree.
    pub fn len(&self) -> usize {
        self.num_nodes
    }

    /// Returns the height of the tree: zero when empty, one for a single key.
    pub fn height(&self) -> usize {
        Node::height_of(&self.root)
    }

    /// Clears the tree, deallocating all nodes.
    pub fn clear(&mut self) {
        self.root = None;
        self.num_nodes = 0;
    }

    /// Returns a reference to the key in the tree equal to the given key.
    pub fn get(&self, key: &K) -> Option<&K> {
        self.find(key).map(|node| node.key())
    }

    /// Returns true if the tree contains the given key.
    pub fn contains(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// Searches for a key and returns a view of the node holding it.
    pub fn find(&self, key: &K) -> Option<NodeRef<'_, K>> {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            match key.cmp(&node.key) {
                Ordering::Equal => return Some(NodeRef { node }),
                Ordering::Less => current = node.left.as_deref(),
                Ordering::Greater => current = node.right.as_deref(),
            }
        }
        None
    }

    /// Returns the smallest key in the tree.
    ///
    /// Fails with [`Error::EmptyTree`] when the tree holds no keys.
    pub fn min(&self) -> Result<&K, Error> {
        let mut node = self.root.as_deref().ok_or(Error::EmptyTree)?;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        Ok(&node.key)
    }

    /// Returns the largest key in the tree.
    ///
    /// Fails with [`Error::EmptyTree`] when the tree holds no keys.
    pub fn max(&self) -> Result<&K, Error> {
        let mut node = self.root.as_deref().ok_or(Error::EmptyTree)?;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        Ok(&node.key)
    }

    /// Returns the sum of all keys, the additive identity for an empty tree.
    pub fn sum(&self) -> K
    where
        K: Copy + Sum<K>,
    {
        self.iter().copied().sum()
    }

    /// Inserts a key into the tree.
    /// Returns whether the key was newly inserted; inserting a key that is
    /// already present leaves the tree untouched.
    pub fn insert(&mut self, key: K) -> bool {
        let (root, inserted) = Self::insert_at(self.root.take(), key);
        self.root = Some(root);
        if inserted {
            self.num_nodes += 1;
        }
        inserted
    }

    /// Removes a key from the tree.
    /// Returns whether the key was previously present; removing an absent
    /// key leaves the tree untouched.
    pub fn remove(&mut self, key: &K) -> bool {
        let (root, removed) = Self::remove_at(self.root.take(), key);
        self.root = root;
        if removed {
            self.num_nodes -= 1;
        }
        removed
    }

    /// Gets an iterator over the keys of the tree in sorted order.
    pub fn iter(&self) -> Iter<'_, K> {
        Iter::new(&self.root)
    }

    /// Returns a view of the root node, or none when the tree is empty.
    pub fn root(&self) -> Option<NodeRef<'_, K>> {
        self.root.as_deref().map(|node| NodeRef { node })
    }

    fn insert_at(link: Link<K>, key: K) -> (Box<Node<K>>, bool) {
        let mut node = match link {
            None => return (Box::new(Node::new(key)), true),
            Some(node) => node,
        };
        match key.cmp(&node.key) {
            Ordering::Equal => (node, false),
            Ordering::Less => {
                // Which side of the child the key lands on decides between a
                // single and a double rotation. Captured before the key moves
                // into the recursion; only consulted when this node goes out
                // of balance, in which case no rotation has happened below
                // and the child is still the one compared against here.
                let outer = node.left.as_deref().map_or(false, |left| key < left.key);
                let (left, inserted) = Self::insert_at(node.left.take(), key);
                node.left = Some(left);
                if !inserted {
                    return (node, false);
                }
                node.update_height();
                if node.balance_factor() > 1 {
                    if !outer {
                        node.left = Some(Self::rotate_left(node.left.take().unwrap()));
                    }
                    node = Self::rotate_right(node);
                }
                (node, true)
            }
            Ordering::Greater => {
                let outer = node.right.as_deref().map_or(false, |right| key > right.key);
                let (right, inserted) = Self::insert_at(node.right.take(), key);
                node.right = Some(right);
                if !inserted {
                    return (node, false);
                }
                node.update_height();
                if node.balance_factor() < -1 {
                    if !outer {
                        node.right = Some(Self::rotate_right(node.right.take().unwrap()));
                    }
                    node = Self::rotate_left(node);
                }
                (node, true)
            }
        }
    }

    fn remove_at(link: Link<K>, key: &K) -> (Link<K>, bool) {
        let mut node = match link {
            None => return (None, false),
            Some(node) => node,
        };
        match key.cmp(&node.key) {
            Ordering::Less => {
                let (left, removed) = Self::remove_at(node.left.take(), key);
                node.left = left;
                if !removed {
                    return (Some(node), false);
                }
            }
            Ordering::Greater => {
                let (right, removed) = Self::remove_at(node.right.take(), key);
                node.right = right;
                if !removed {
                    return (Some(node), false);
                }
            }
            Ordering::Equal => match (node.left.take(), node.right.take()) {
                // With at most one child the node is replaced by that child.
                (None, right) => return (right, true),
                (left, None) => return (left, true),
                (left, Some(right)) => {
                    // Two children: the in-order successor's key moves up and
                    // its node is unlinked from the right subtree.
                    let (right, successor) = Self::remove_min(right);
                    node.key = successor;
                    node.left = left;
                    node.right = right;
                }
            },
        }
        // Removal can shrink a subtree, so every ancestor on the way back up
        // gets its height and balance restored.
        node.update_height();
        (Some(Self::rebalance(node)), true)
    }

    // Unlinks the minimum node of the subtree and hands its key back.
    fn remove_min(mut node: Box<Node<K>>) -> (Link<K>, K) {
        match node.left.take() {
            None => {
                let Node { key, right, .. } = *node;
                (right, key)
            }
            Some(left) => {
                let (left, min) = Self::remove_min(left);
                node.left = left;
                node.update_height();
                (Some(Self::rebalance(node)), min)
            }
        }
    }

    /// Restores the AVL condition at a node whose subtrees are already
    /// balanced. The rotation is chosen by the heavy child's own balance
    /// sign; a child balance of zero takes the single rotation.
    fn rebalance(mut node: Box<Node<K>>) -> Box<Node<K>> {
        let balance = node.balance_factor();
        if balance > 1 {
            if node.left.as_deref().unwrap().balance_factor() < 0 {
                node.left = Some(Self::rotate_left(node.left.take().unwrap()));
            }
            Self::rotate_right(node)
        } else if balance < -1 {
            if node.right.as_deref().unwrap().balance_factor() > 0 {
                node.right = Some(Self::rotate_right(node.right.take().unwrap()));
            }
            Self::rotate_left(node)
        } else {
            node
        }
    }

    // Rotations relink only, never touch keys. The demoted node's height is
    // recomputed before the promoted node's, which depends on it.
    fn rotate_left(mut node: Box<Node<K>>) -> Box<Node<K>> {
        let mut pivot = node.right.take().unwrap();
        node.right = pivot.left.take();
        node.update_height();
        pivot.left = Some(node);
        pivot.update_height();
        pivot
    }

    fn rotate_right(mut node: Box<Node<K>>) -> Box<Node<K>> {
        let mut pivot = node.left.take().unwrap();
        node.left = pivot.right.take();
        node.update_height();
        pivot.right = Some(node);
        pivot.update_height();
        pivot
    }
}

#[cfg(any(test, feature = "consistency_check"))]
impl<K: Ord> AvlTree<K> {
    /// Verifies child ordering, cached heights, the AVL condition and the
    /// node count. Panics when an invariant is broken.
    pub fn check_consistency(&self) {
        let num_nodes = match self.root.as_deref() {
            None => 0,
            Some(root) => Self::check_node(root),
        };
        assert_eq!(num_nodes, self.num_nodes);
    }

    fn check_node(node: &Node<K>) -> usize {
        let mut num_nodes = 1;
        let mut left_height = 0;
        let mut right_height = 0;

        if let Some(left) = node.left.as_deref() {
            assert!(left.key < node.key);
            left_height = left.height;
            num_nodes += Self::check_node(left);
        }
        if let Some(right) = node.right.as_deref() {
            assert!(right.key > node.key);
            right_height = right.height;
            num_nodes += Self::check_node(right);
        }

        assert_eq!(node.height, 1 + cmp::max(left_height, right_height));

        // AVL condition (near balance)
        assert!(left_height <= right_height + 1);
        assert!(right_height <= left_height + 1);

        num_nodes
    }
}

impl<K: Ord> Default for AvlTree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Node<K> {
    fn new(key: K) -> Self {
        Self {
            key,
            height: 1,
            left: None,
            right: None,
        }
    }

    fn height_of(link: &Link<K>) -> usize {
        link.as_deref().map_or(0, |node| node.height)
    }

    fn update_height(&mut self) {
        self.height = 1 + cmp::max(Self::height_of(&self.left), Self::height_of(&self.right));
    }

    fn balance_factor(&self) -> isize {
        Self::height_of(&self.left) as isize - Self::height_of(&self.right) as isize
    }
}

impl<'a, K> Iter<'a, K> {
    fn new(root: &'a Link<K>) -> Self {
        let mut iter = Self { stack: Vec::new() };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut link: &'a Link<K>) {
        while let Some(node) = link.as_deref() {
            self.stack.push(node);
            link = &node.left;
        }
    }
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(&node.right);
        Some(&node.key)
    }
}

impl<'a, K: Ord> IntoIterator for &'a AvlTree<K> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K> NodeRef<'a, K> {
    /// Returns the key held by this node.
    pub fn key(&self) -> &'a K {
        &self.node.key
    }

    /// Returns the cached height of the subtree rooted here.
    pub fn height(&self) -> usize {
        self.node.height
    }

    /// Returns a view of the left child, if present.
    pub fn left(&self) -> Option<NodeRef<'a, K>> {
        self.node.left.as_deref().map(|node| NodeRef { node })
    }

    /// Returns a view of the right child, if present.
    pub fn right(&self) -> Option<NodeRef<'a, K>> {
        self.node.right.as_deref().map(|node| NodeRef { node })
    }
}

impl<K> Clone for NodeRef<'_, K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for NodeRef<'_, K> {}
