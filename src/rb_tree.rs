//! An ordered set backed by a red-black tree.

use core::borrow::Borrow;
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter::FusedIterator;

use alloc::vec;

use crate::error::Result;
use crate::order_statistic::OrderStatistic;
use crate::plugin::Plugin;
use crate::raw::{Direction, Handle, RawTree};

mod cursor;
mod node_ref;
mod order_statistic;

pub use cursor::Cursor;
pub use node_ref::NodeRef;

/// An ordered set of unique keys based on a red-black tree.
///
/// Every node carries plugin state `P` which the tree keeps up to date across
/// insertions, removals and rotations; see [`Plugin`]. The default `()`
/// carries nothing. With [`OrderStatistic`] the tree answers rank queries in
/// O(log n); [`IndexedRBTree`] names that combination.
///
/// It is a logic error for a key to be modified in such a way that its
/// ordering relative to any other key, as determined by the [`Ord`] trait,
/// changes while it is in the tree. The tree never hands out mutable access
/// to its keys.
///
/// Type parameter defaults do not take part in inference, so name the tree
/// type (`RBTree<_>` for the default plugin) when nothing else fixes `P`.
///
/// # Examples
///
/// ```
/// use osrb_tree::RBTree;
///
/// let mut tree: RBTree<_> = RBTree::new();
/// tree.insert(5);
/// tree.insert(11);
/// tree.insert(3);
///
/// assert!(tree.contains(&11));
/// assert_eq!(tree.erase(&11), 1);
/// assert_eq!(tree.erase(&11), 0);
///
/// let keys: Vec<_> = tree.iter().copied().collect();
/// assert_eq!(keys, [3, 5]);
/// ```
#[derive(Clone)]
pub struct RBTree<K, P = ()> {
    raw: RawTree<K, P>,
}

/// A red-black tree that tracks subtree sizes, answering rank queries in O(log n).
///
/// # Examples
///
/// ```
/// use osrb_tree::IndexedRBTree;
///
/// let mut tree = IndexedRBTree::new();
/// for key in [3, 7, 5, 6] {
///     tree.insert(key);
/// }
/// assert_eq!(tree.rank_of(&6), Some(2));
/// assert_eq!(tree.get_by_rank(3), Some(&7));
/// ```
pub type IndexedRBTree<K> = RBTree<K, OrderStatistic>;

/// An iterator over the keys of an `RBTree`, in ascending order.
///
/// This `struct` is created by the [`iter`] method on [`RBTree`].
///
/// # Examples
///
/// ```
/// use osrb_tree::RBTree;
///
/// let tree: RBTree<_> = RBTree::from([3, 1, 2]);
/// let mut iter = tree.iter();
/// assert_eq!(iter.next(), Some(&1));
/// assert_eq!(iter.next_back(), Some(&3));
/// assert_eq!(iter.next(), Some(&2));
/// assert_eq!(iter.next(), None);
/// ```
///
/// [`iter`]: RBTree::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, K, P = ()> {
    tree: &'a RawTree<K, P>,
    front: Option<Handle>,
    back: Option<Handle>,
    remaining: usize,
}

/// An owning iterator over the keys of an `RBTree`, in ascending order.
///
/// This `struct` is created by the [`into_iter`] method on [`RBTree`]
/// (provided by the [`IntoIterator`] trait).
///
/// [`into_iter`]: RBTree#method.into_iter
pub struct IntoIter<K> {
    inner: vec::IntoIter<K>,
}

impl<K, P: Plugin> RBTree<K, P> {
    /// Makes a new, empty `RBTree`.
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::RBTree;
    ///
    /// let mut tree: RBTree<i32> = RBTree::new();
    /// assert!(tree.is_empty());
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        RBTree { raw: RawTree::new() }
    }

    /// Makes an empty tree with room for at least `capacity` keys before
    /// reallocating its node storage.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::RBTree;
    ///
    /// let tree: RBTree<i32> = RBTree::with_capacity(16);
    /// assert!(tree.capacity() >= 16);
    /// ```
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        RBTree {
            raw: RawTree::with_capacity(capacity),
        }
    }

    /// Returns the number of keys the node storage can hold without reallocating.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }

    /// Returns the number of keys in the tree.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the tree contains no keys.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Removes every key.
    ///
    /// Nodes live in a single arena, so this is one sweep with no recursion
    /// however the tree is shaped.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::RBTree;
    ///
    /// let mut tree: RBTree<_> = RBTree::from([1, 2, 3]);
    /// tree.clear();
    /// assert!(tree.is_empty());
    /// assert!(tree.root().is_none());
    /// ```
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Returns the smallest key, if any.
    ///
    /// # Complexity
    ///
    /// O(1): the minimum is cached.
    #[must_use]
    pub fn first(&self) -> Option<&K> {
        self.raw.first().map(|h| self.raw.key(h))
    }

    /// Returns the largest key, if any.
    ///
    /// # Complexity
    ///
    /// O(1): the maximum is cached.
    #[must_use]
    pub fn last(&self) -> Option<&K> {
        self.raw.last().map(|h| self.raw.key(h))
    }

    /// Gets an iterator over the keys in ascending order.
    ///
    /// # Complexity
    ///
    /// O(1) to create; amortized O(1) per step.
    pub fn iter(&self) -> Iter<'_, K, P> {
        Iter {
            tree: &self.raw,
            front: self.raw.first(),
            back: self.raw.last(),
            remaining: self.raw.len(),
        }
    }

    /// Returns a cursor at the smallest key, or at [`end`](Self::end) when
    /// the tree is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::RBTree;
    ///
    /// let tree: RBTree<_> = RBTree::from([2, 1]);
    /// let mut cursor = tree.begin();
    /// assert_eq!(cursor.key(), &1);
    /// cursor.move_next();
    /// cursor.move_next();
    /// assert_eq!(cursor, tree.end());
    ///
    /// let empty: RBTree<i32> = RBTree::new();
    /// assert_eq!(empty.begin(), empty.end());
    /// ```
    pub fn begin(&self) -> Cursor<'_, K, P> {
        Cursor::at(&self.raw, self.raw.first())
    }

    /// Returns the past-the-end cursor. Moving it back reaches the largest key.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::RBTree;
    ///
    /// let tree: RBTree<_> = RBTree::from([2, 1]);
    /// let mut cursor = tree.end();
    /// assert!(cursor.is_end());
    /// cursor.move_prev();
    /// assert_eq!(cursor.key(), &2);
    /// ```
    pub fn end(&self) -> Cursor<'_, K, P> {
        Cursor::at(&self.raw, None)
    }

    /// Returns the root node for structural inspection.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::{Color, Direction, RBTree};
    ///
    /// let tree: RBTree<_> = RBTree::from([1, 2, 3]);
    /// let root = tree.root().unwrap();
    /// assert_eq!(root.key(), &2);
    /// assert_eq!(root.color(), Color::Black);
    /// assert_eq!(root.child(Direction::Left).unwrap().key(), &1);
    /// ```
    #[must_use]
    pub fn root(&self) -> Option<NodeRef<'_, K, P>> {
        self.raw.root().map(|h| NodeRef::new(&self.raw, h))
    }
}

impl<K: Ord, P: Plugin> RBTree<K, P> {
    /// Adds a key to the tree.
    ///
    /// Returns whether the key was newly inserted. If an equal key is already
    /// present the tree is left untouched and `key` is dropped.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::RBTree;
    ///
    /// let mut tree: RBTree<_> = RBTree::new();
    /// assert!(tree.insert(2));
    /// assert!(!tree.insert(2));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn insert(&mut self, key: K) -> bool {
        self.raw.insert(key)
    }

    /// Removes a key from the tree, returning the number of keys removed
    /// (0 or 1).
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::RBTree;
    ///
    /// let mut tree: RBTree<_> = RBTree::from([1, 2]);
    /// assert_eq!(tree.erase(&1), 1);
    /// assert_eq!(tree.erase(&1), 0);
    /// ```
    pub fn erase<Q>(&mut self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        usize::from(self.raw.remove(key).is_some())
    }

    /// Removes and returns the key equal to `key`, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::RBTree;
    ///
    /// let mut tree: RBTree<_> = RBTree::from([String::from("a")]);
    /// assert_eq!(tree.take("a"), Some(String::from("a")));
    /// assert_eq!(tree.take("a"), None);
    /// ```
    pub fn take<Q>(&mut self, key: &Q) -> Option<K>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.remove(key)
    }

    /// Returns `true` if the tree contains a key equal to `key`.
    #[must_use]
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.locate(key).is_some()
    }

    /// Returns a reference to the stored key equal to `key`, if any.
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<&K>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.locate(key).map(|h| self.raw.key(h))
    }

    /// Returns a cursor at the key equal to `key`, or at [`end`](Self::end)
    /// if there is none.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::RBTree;
    ///
    /// let tree: RBTree<_> = RBTree::from([10, 20, 30]);
    /// let mut cursor = tree.find(&20);
    /// cursor.move_next();
    /// assert_eq!(cursor.key(), &30);
    /// assert!(tree.find(&25).is_end());
    /// ```
    pub fn find<Q>(&self, key: &Q) -> Cursor<'_, K, P>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        Cursor::at(&self.raw, self.raw.locate(key))
    }

    /// Removes and returns the smallest key, if any.
    pub fn pop_first(&mut self) -> Option<K> {
        self.raw.pop(Direction::Left)
    }

    /// Removes and returns the largest key, if any.
    pub fn pop_last(&mut self) -> Option<K> {
        self.raw.pop(Direction::Right)
    }

    /// Verifies the red-black, ordering, bookkeeping and plugin invariants.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvariantViolation`](crate::InvariantViolation)
    /// found. A tree that is only mutated through this API never fails.
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn check_invariants(&self) -> Result<()> {
        self.raw.check_invariants()
    }
}

impl<K, P: Plugin> Default for RBTree<K, P> {
    fn default() -> Self {
        RBTree::new()
    }
}

impl<K: fmt::Debug, P: Plugin> fmt::Debug for RBTree<K, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<K: PartialEq, P: Plugin> PartialEq for RBTree<K, P> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Eq, P: Plugin> Eq for RBTree<K, P> {}

impl<K: PartialOrd, P: Plugin> PartialOrd for RBTree<K, P> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<K: Ord, P: Plugin> Ord for RBTree<K, P> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<K: Hash, P: Plugin> Hash for RBTree<K, P> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.len());
        for key in self {
            key.hash(state);
        }
    }
}

impl<K: Ord, P: Plugin> FromIterator<K> for RBTree<K, P> {
    fn from_iter<T: IntoIterator<Item = K>>(iter: T) -> Self {
        let mut tree = RBTree::new();
        tree.extend(iter);
        tree
    }
}

impl<K: Ord, P: Plugin> Extend<K> for RBTree<K, P> {
    fn extend<T: IntoIterator<Item = K>>(&mut self, iter: T) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<'a, K: Ord + Copy + 'a, P: Plugin> Extend<&'a K> for RBTree<K, P> {
    fn extend<T: IntoIterator<Item = &'a K>>(&mut self, iter: T) {
        self.extend(iter.into_iter().copied());
    }
}

impl<K: Ord, P: Plugin, const N: usize> From<[K; N]> for RBTree<K, P> {
    fn from(arr: [K; N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<'a, K, P: Plugin> IntoIterator for &'a RBTree<K, P> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K, P>;

    fn into_iter(self) -> Iter<'a, K, P> {
        self.iter()
    }
}

impl<K, P> IntoIterator for RBTree<K, P> {
    type Item = K;
    type IntoIter = IntoIter<K>;

    /// Gets an owning iterator over the keys in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::RBTree;
    ///
    /// let tree: RBTree<_> = RBTree::from([2, 3, 1]);
    /// let keys: Vec<_> = tree.into_iter().collect();
    /// assert_eq!(keys, [1, 2, 3]);
    /// ```
    fn into_iter(mut self) -> IntoIter<K> {
        IntoIter {
            inner: self.raw.drain_to_vec().into_iter(),
        }
    }
}

impl<'a, K: 'a, P> Iterator for Iter<'a, K, P> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        if self.remaining == 0 {
            return None;
        }

        let handle = self.front?;
        self.remaining -= 1;
        self.front = self.tree.step(handle, Direction::Right);
        Some(self.tree.key(handle))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }

    fn last(mut self) -> Option<&'a K> {
        self.next_back()
    }
}

impl<'a, K: 'a, P> DoubleEndedIterator for Iter<'a, K, P> {
    fn next_back(&mut self) -> Option<&'a K> {
        if self.remaining == 0 {
            return None;
        }

        let handle = self.back?;
        self.remaining -= 1;
        self.back = self.tree.step(handle, Direction::Left);
        Some(self.tree.key(handle))
    }
}

impl<K, P> ExactSizeIterator for Iter<'_, K, P> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K, P> FusedIterator for Iter<'_, K, P> {}

impl<K, P> Clone for Iter<'_, K, P> {
    fn clone(&self) -> Self {
        Iter {
            tree: self.tree,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<K: fmt::Debug, P> fmt::Debug for Iter<'_, K, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<K> Iterator for IntoIter<K> {
    type Item = K;

    fn next(&mut self) -> Option<K> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K> DoubleEndedIterator for IntoIter<K> {
    fn next_back(&mut self) -> Option<K> {
        self.inner.next_back()
    }
}

impl<K> ExactSizeIterator for IntoIter<K> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K> FusedIterator for IntoIter<K> {}

impl<K: fmt::Debug> fmt::Debug for IntoIter<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.inner.as_slice()).finish()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn iter_stops_when_both_ends_meet() {
        let tree: RBTree<_> = (0..6).collect();
        let mut iter = tree.iter();
        assert_eq!(iter.next(), Some(&0));
        assert_eq!(iter.next_back(), Some(&5));
        assert_eq!(iter.len(), 4);

        let rest: Vec<_> = iter.by_ref().rev().copied().collect();
        assert_eq!(rest, [4, 3, 2, 1]);
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
    }

    #[test]
    fn from_iterator_keeps_the_requested_plugin() {
        let tree: IndexedRBTree<_> = [9, 4, 7].into_iter().collect();
        assert_eq!(tree.root().map(|root| root.plugin().size), Some(3));
        assert_eq!(tree.get_by_rank(0), Some(&4));
    }

    #[test]
    fn into_iter_hands_back_owned_keys() {
        let tree: RBTree<_> = ["b", "c", "a"].map(alloc::string::String::from).into_iter().collect();
        let mut iter = tree.into_iter();
        assert_eq!(iter.len(), 3);
        assert_eq!(iter.next_back().as_deref(), Some("c"));
        assert_eq!(iter.next().as_deref(), Some("a"));
    }
}
