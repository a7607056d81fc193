use thiserror::Error;

/// Errors returned by tree queries.
///
/// Only the ordered queries [`min`](crate::AvlTree::min) and
/// [`max`](crate::AvlTree::max) can fail; all mutating operations are total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// The tree holds no keys.
    #[error("tree is empty")]
    EmptyTree,
}
