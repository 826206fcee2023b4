//! Subtree-size augmentation for O(log n) rank queries.

use crate::plugin::Plugin;

/// A zero-based rank into the sorted order of a tree.
///
/// # Examples
///
/// ```
/// use osrb_tree::{IndexedRBTree, Rank};
///
/// let tree = IndexedRBTree::from([20, 10]);
/// assert_eq!(tree[Rank(0)], 10);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Rank(pub usize);

/// Plugin state holding the number of nodes in the subtree rooted at a node.
///
/// A fresh node counts itself. Attaching a subtree adds its size to every
/// ancestor; detaching subtracts it.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct OrderStatistic {
    pub(crate) size: usize,
}

impl Default for OrderStatistic {
    fn default() -> Self {
        OrderStatistic { size: 1 }
    }
}

impl Plugin for OrderStatistic {
    #[inline]
    fn on_attach(ancestor: &mut Self, subtree: &Self) {
        ancestor.size += subtree.size;
    }

    #[inline]
    fn before_detach(ancestor: &mut Self, subtree: &Self) {
        ancestor.size -= subtree.size;
    }

    fn is_consistent(&self, left: Option<&Self>, right: Option<&Self>) -> bool {
        self.size == 1 + left.map_or(0, |l| l.size) + right.map_or(0, |r| r.size)
    }
}

/// Plugin states that know the size of their subtree.
///
/// Trees whose plugin implements this get [`rank_of`](crate::RBTree::rank_of),
/// [`get_by_rank`](crate::RBTree::get_by_rank) and indexing by [`Rank`].
pub trait SubtreeSize {
    /// Number of nodes in the subtree, including the node itself.
    fn subtree_size(&self) -> usize;
}

impl SubtreeSize for OrderStatistic {
    #[inline]
    fn subtree_size(&self) -> usize {
        self.size
    }
}

/// Order statistics composed with another plugin.
impl<B: Plugin> SubtreeSize for (OrderStatistic, B) {
    #[inline]
    fn subtree_size(&self) -> usize {
        self.0.size
    }
}
