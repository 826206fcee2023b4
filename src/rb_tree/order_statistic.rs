use core::borrow::Borrow;
use core::ops::Index;

use super::RBTree;
use crate::order_statistic::SubtreeSize;
use crate::plugin::Plugin;
use crate::Rank;

impl<K: Ord, P: Plugin + SubtreeSize> RBTree<K, P> {
    /// Returns the zero-based rank of `key` in sorted order, or `None` if the
    /// key is not present.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::IndexedRBTree;
    ///
    /// let mut tree = IndexedRBTree::from([3, 7]);
    /// assert_eq!(tree.rank_of(&7), Some(1));
    /// tree.insert(5);
    /// assert_eq!(tree.rank_of(&7), Some(2));
    /// assert_eq!(tree.rank_of(&4), None);
    /// ```
    #[must_use]
    pub fn rank_of<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.rank_of(key)
    }

    /// Returns the key at zero-based position `rank` in sorted order, or
    /// `None` if `rank` is out of bounds.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::IndexedRBTree;
    ///
    /// let tree = IndexedRBTree::from([30, 10, 20]);
    /// assert_eq!(tree.get_by_rank(1), Some(&20));
    /// assert!(tree.get_by_rank(3).is_none());
    /// ```
    #[must_use]
    pub fn get_by_rank(&self, rank: usize) -> Option<&K> {
        self.raw.get_by_rank(rank).map(|h| self.raw.key(h))
    }
}

/// Indexes into the tree by rank.
///
/// # Panics
///
/// Panics if `rank` is out of bounds.
impl<K: Ord, P: Plugin + SubtreeSize> Index<Rank> for RBTree<K, P> {
    type Output = K;

    fn index(&self, rank: Rank) -> &K {
        self.get_by_rank(rank.0).expect("index out of bounds")
    }
}
