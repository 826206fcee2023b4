//! Invariant violations reported by [`RBTree::check_invariants`](crate::RBTree::check_invariants).

use thiserror::Error;

/// The first broken invariant found while verifying a tree.
///
/// A correctly functioning tree never produces one of these; they exist so
/// that tests and debugging tools can verify the structure from outside.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum InvariantViolation {
    /// The root node is red.
    #[error("root node is red")]
    RedRoot,

    /// The root node has a parent back-reference.
    #[error("root node has a parent")]
    RootHasParent,

    /// A child's parent back-reference does not name the node owning it.
    #[error("child at depth {depth} does not point back to its parent")]
    BrokenParentLink { depth: usize },

    /// A red node has a red child.
    #[error("red node at depth {depth} has a red child")]
    RedChildOfRed { depth: usize },

    /// Two paths from the root to an absent child cross different numbers of black nodes.
    #[error("black height mismatch: expected {expected}, found {found}")]
    BlackHeightMismatch { expected: usize, found: usize },

    /// In-order traversal is not strictly increasing.
    #[error("keys are not in strictly increasing order at position {position}")]
    KeysOutOfOrder { position: usize },

    /// The cached element count disagrees with the number of reachable nodes.
    #[error("cached length {cached} does not match {reachable} reachable nodes")]
    LengthMismatch { cached: usize, reachable: usize },

    /// The cached minimum is not the leftmost node.
    #[error("cached minimum is not the leftmost node")]
    StaleMinimum,

    /// The cached maximum is not the rightmost node.
    #[error("cached maximum is not the rightmost node")]
    StaleMaximum,

    /// A node's plugin state disagrees with its children's.
    #[error("plugin state at depth {depth} is inconsistent with its children")]
    PluginState { depth: usize },
}

/// Result of verifying a tree.
pub type Result<T> = core::result::Result<T, InvariantViolation>;
