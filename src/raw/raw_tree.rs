use core::borrow::Borrow;
use core::cmp::Ordering;

use alloc::vec::Vec;
use smallvec::{SmallVec, smallvec};

use super::arena::Arena;
use super::handle::Handle;
use super::node::{Color, Direction, Node};
use crate::error::{InvariantViolation, Result};
use crate::order_statistic::SubtreeSize;
use crate::plugin::Plugin;

/// A subtree root unlinked from the tree.
///
/// It must be handed back to [`RawTree::append_child`], [`RawTree::reattach`]
/// or [`RawTree::release`].
#[must_use = "a detached subtree must be re-attached or released"]
#[derive(Debug)]
pub(crate) struct Detached(Handle);

/// Where a node hangs: under a parent on some side, or in the root slot.
pub(crate) type Slot = Option<(Handle, Direction)>;

/// The binary-search-tree engine behind `RBTree`.
///
/// Shape changes go through [`take_out`](Self::take_out) and
/// [`append_child`](Self::append_child) only, which is where plugin hooks
/// run. Balancing lives in `rebalance.rs`.
#[derive(Clone)]
pub(crate) struct RawTree<K, P> {
    /// Arena storing all tree nodes.
    nodes: Arena<Node<K, P>>,
    /// The root slot.
    root: Option<Handle>,
    /// Number of key-bearing nodes linked into the tree.
    len: usize,
    /// Leftmost node, for O(1) `begin()`.
    first: Option<Handle>,
    /// Rightmost node, for O(1) decrement of `end()`.
    last: Option<Handle>,
}

impl<K, P> RawTree<K, P> {
    pub(crate) const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
            len: 0,
            first: None,
            last: None,
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
            len: 0,
            first: None,
            last: None,
        }
    }

    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Releases every node in one arena sweep.
    pub(crate) fn clear(&mut self) {
        log::debug!("releasing {} nodes", self.len);
        self.nodes.clear();
        self.root = None;
        self.len = 0;
        self.first = None;
        self.last = None;
    }

    /// Moves every key out in ascending order, leaving the tree empty.
    pub(crate) fn drain_to_vec(&mut self) -> Vec<K> {
        let mut order = Vec::with_capacity(self.len);
        let mut current = self.first;
        while let Some(handle) = current {
            order.push(handle);
            current = self.step(handle, Direction::Right);
        }

        let keys = order.into_iter().map(|h| self.nodes.take(h).into_key()).collect();
        self.clear();
        keys
    }

    pub(crate) fn root(&self) -> Option<Handle> {
        self.root
    }

    pub(crate) fn first(&self) -> Option<Handle> {
        self.first
    }

    pub(crate) fn last(&self) -> Option<Handle> {
        self.last
    }

    /// Returns the cached extremal node in `direction`.
    pub(crate) fn extremal(&self, direction: Direction) -> Option<Handle> {
        match direction {
            Direction::Left => self.first,
            Direction::Right => self.last,
        }
    }

    #[inline]
    pub(crate) fn node(&self, handle: Handle) -> &Node<K, P> {
        self.nodes.get(handle)
    }

    #[inline]
    pub(crate) fn key(&self, handle: Handle) -> &K {
        self.nodes.get(handle).key()
    }

    #[inline]
    pub(crate) fn parent(&self, handle: Handle) -> Option<Handle> {
        self.nodes.get(handle).parent()
    }

    #[inline]
    pub(crate) fn child(&self, handle: Handle, direction: Direction) -> Option<Handle> {
        self.nodes.get(handle).child(direction)
    }

    #[inline]
    pub(crate) fn color(&self, handle: Handle) -> Color {
        self.nodes.get(handle).color()
    }

    /// Color of a possibly absent node; absent children count as black.
    #[inline]
    pub(crate) fn color_of(&self, handle: Option<Handle>) -> Color {
        handle.map_or(Color::Black, |h| self.color(h))
    }

    pub(crate) fn paint(&mut self, handle: Handle, color: Color) {
        self.nodes.get_mut(handle).paint(color);
    }

    pub(crate) fn swap_colors(&mut self, a: Handle, b: Handle) {
        let (a, b) = self.nodes.get_pair_mut(a, b);
        let color = a.color();
        a.paint(b.color());
        b.paint(color);
    }

    /// Returns the side of its parent `handle` hangs on.
    ///
    /// Always derived from the live links, never cached.
    pub(crate) fn direction_from_parent(&self, handle: Handle) -> Direction {
        let parent = self.parent(handle).expect("`RawTree::direction_from_parent()` - `handle` has no parent!");
        self.node(parent).direction_of(handle)
    }

    pub(crate) fn slot_of(&self, handle: Handle) -> Slot {
        self.parent(handle).map(|parent| (parent, self.node(parent).direction_of(handle)))
    }

    /// Returns the other child of `handle`'s parent.
    pub(crate) fn sibling(&self, handle: Handle) -> Option<Handle> {
        let parent = self.parent(handle).expect("`RawTree::sibling()` - `handle` is the root!");
        self.child(parent, self.node(parent).direction_of(handle).other())
    }

    /// Follows `direction` links from `handle` as far as they go.
    pub(crate) fn extreme(&self, mut handle: Handle, direction: Direction) -> Handle {
        while let Some(child) = self.child(handle, direction) {
            handle = child;
        }
        handle
    }

    /// Returns the in-order neighbour of `handle` in `direction`
    /// (successor for `Right`, predecessor for `Left`).
    pub(crate) fn step(&self, handle: Handle, direction: Direction) -> Option<Handle> {
        if let Some(child) = self.child(handle, direction) {
            return Some(self.extreme(child, direction.other()));
        }

        let mut current = handle;
        while let Some(parent) = self.parent(current) {
            if self.child(parent, direction) != Some(current) {
                return Some(parent);
            }
            current = parent;
        }
        None
    }
}

impl<K, P: Plugin> RawTree<K, P> {
    /// Unlinks `node` from its parent's child slot (or the root slot).
    ///
    /// Plugins see the detachment while the subtree is still linked.
    pub(crate) fn take_out(&mut self, node: Handle) -> Detached {
        if let Some(parent) = self.parent(node) {
            let direction = self.node(parent).direction_of(node);
            self.notify_detach(node);
            self.nodes.get_mut(parent).set_child(direction, None);
            self.nodes.get_mut(node).set_parent(None);
        } else {
            assert_eq!(self.root, Some(node), "`RawTree::take_out()` - `node` is already detached!");
            self.root = None;
        }
        Detached(node)
    }

    /// Links a detached subtree into the empty `direction` slot of `parent`.
    pub(crate) fn append_child(&mut self, parent: Handle, direction: Direction, subtree: Detached) {
        let Detached(child) = subtree;
        assert!(self.child(parent, direction).is_none(), "`RawTree::append_child()` - slot is occupied!");
        self.nodes.get_mut(parent).set_child(direction, Some(child));
        self.nodes.get_mut(child).set_parent(Some(parent));
        self.notify_attach(child);
    }

    /// Links a detached subtree into `slot`.
    pub(crate) fn reattach(&mut self, slot: Slot, subtree: Detached) {
        match slot {
            Some((parent, direction)) => self.append_child(parent, direction, subtree),
            None => {
                assert!(self.root.is_none(), "`RawTree::reattach()` - root slot is occupied!");
                self.root = Some(subtree.0);
            }
        }
    }

    /// Frees a detached leaf and hands its key back.
    pub(crate) fn release(&mut self, subtree: Detached) -> K {
        let node = self.nodes.take(subtree.0);
        debug_assert!(
            node.parent().is_none() && node.child_count() == 0,
            "`RawTree::release()` - node is still linked!"
        );
        self.len -= 1;
        node.into_key()
    }

    /// Single rotation of `node` towards `direction`.
    ///
    /// The child on the other side (the heritor) takes `node`'s place and
    /// `node` becomes the heritor's `direction` child; the heritor's inner
    /// subtree moves across to `node`.
    pub(crate) fn rotate(&mut self, node: Handle, direction: Direction) {
        log::trace!("rotate {node:?} {direction:?}");
        let slot = self.slot_of(node);
        let hanging = self.take_out(node);
        let heritor = self.child(node, direction.other()).expect("`RawTree::rotate()` - `node` has no heritor!");
        let detached_heritor = self.take_out(heritor);
        if let Some(inner) = self.child(heritor, direction) {
            let inner = self.take_out(inner);
            self.append_child(node, direction.other(), inner);
        }

        self.append_child(heritor, direction, hanging);
        self.reattach(slot, detached_heritor);
    }

    /// Unlinks a node with at most one child, moving that child up into the
    /// vacated slot. Keeps the cached extremal nodes current.
    pub(crate) fn replace_with_child(&mut self, node: Handle) -> Detached {
        assert!(self.node(node).child_count() <= 1, "`RawTree::replace_with_child()` - `node` has two children!");
        let child = self.node(node).single_child();
        let parent = self.parent(node);
        let slot = self.slot_of(node);

        let detached = self.take_out(node);
        if let Some(child) = child {
            let orphan = self.take_out(child);
            self.reattach(slot, orphan);
        }

        if self.first == Some(node) {
            self.first = child.map(|c| self.extreme(c, Direction::Left)).or(parent);
        }
        if self.last == Some(node) {
            self.last = child.map(|c| self.extreme(c, Direction::Right)).or(parent);
        }
        detached
    }

    fn notify_attach(&mut self, subtree: Handle) {
        if !P::ENABLED {
            return;
        }

        let state = self.node(subtree).plugin().clone();
        let mut current = self.parent(subtree);
        while let Some(ancestor) = current {
            let node = self.nodes.get_mut(ancestor);
            P::on_attach(node.plugin_mut(), &state);
            current = node.parent();
        }
    }

    fn notify_detach(&mut self, subtree: Handle) {
        if !P::ENABLED {
            return;
        }

        let state = self.node(subtree).plugin().clone();
        let mut current = self.parent(subtree);
        while let Some(ancestor) = current {
            let node = self.nodes.get_mut(ancestor);
            P::before_detach(node.plugin_mut(), &state);
            current = node.parent();
        }
    }
}

impl<K: Ord, P: Plugin> RawTree<K, P> {
    /// Standard descent to the node holding `key`.
    pub(crate) fn locate<Q>(&self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.root;
        while let Some(handle) = current {
            current = match key.cmp(self.key(handle).borrow()) {
                Ordering::Less => self.child(handle, Direction::Left),
                Ordering::Greater => self.child(handle, Direction::Right),
                Ordering::Equal => return Some(handle),
            };
        }
        None
    }

    /// Links a new red leaf holding `key` at its sorted position.
    ///
    /// Returns `None`, dropping `key`, if an equal key is already present.
    pub(crate) fn preinsert(&mut self, key: K) -> Option<Handle> {
        let Some(mut current) = self.root else {
            let handle = self.nodes.alloc(Node::new(key));
            self.reattach(None, Detached(handle));
            self.first = Some(handle);
            self.last = Some(handle);
            self.len += 1;
            return Some(handle);
        };

        let direction = loop {
            let direction = match key.cmp(self.key(current)) {
                Ordering::Less => Direction::Left,
                Ordering::Greater => Direction::Right,
                Ordering::Equal => return None,
            };
            match self.child(current, direction) {
                Some(child) => current = child,
                None => break direction,
            }
        };

        let handle = self.nodes.alloc(Node::new(key));
        self.append_child(current, direction, Detached(handle));
        if self.extremal(direction) == Some(current) {
            match direction {
                Direction::Left => self.first = Some(handle),
                Direction::Right => self.last = Some(handle),
            }
        }
        self.len += 1;
        Some(handle)
    }

    /// Finds the node that has to be unlinked to erase `key`.
    ///
    /// The returned node always has at most one child. When the key sits
    /// in a node with two children, it trades keys with its in-order
    /// predecessor and the predecessor is returned instead; the erased key
    /// then lives in the returned node.
    pub(crate) fn preerase<Q>(&mut self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let found = self.locate(key)?;
        let (Some(left), Some(_)) = (self.child(found, Direction::Left), self.child(found, Direction::Right)) else {
            return Some(found);
        };

        let predecessor = self.extreme(left, Direction::Right);
        let (a, b) = self.nodes.get_pair_mut(found, predecessor);
        core::mem::swap(a.key_mut(), b.key_mut());
        Some(predecessor)
    }

    /// Verifies every structural, coloring, ordering and plugin invariant.
    pub(crate) fn check_invariants(&self) -> Result<()> {
        let Some(root) = self.root else {
            if self.len != 0 {
                return Err(InvariantViolation::LengthMismatch {
                    cached: self.len,
                    reachable: 0,
                });
            }
            if self.first.is_some() {
                return Err(InvariantViolation::StaleMinimum);
            }
            if self.last.is_some() {
                return Err(InvariantViolation::StaleMaximum);
            }
            return Ok(());
        };

        if self.parent(root).is_some() {
            return Err(InvariantViolation::RootHasParent);
        }
        if self.color(root).is_red() {
            return Err(InvariantViolation::RedRoot);
        }

        // (node, depth, black nodes strictly above it)
        let mut stack: SmallVec<[(Handle, usize, usize); 64]> = smallvec![(root, 0, 0)];
        let mut reachable = 0;
        let mut black_height = None;
        while let Some((handle, depth, blacks_above)) = stack.pop() {
            reachable += 1;
            let node = self.node(handle);
            let blacks = blacks_above + usize::from(node.color().is_black());

            let left = node.child(Direction::Left).map(|c| self.node(c).plugin());
            let right = node.child(Direction::Right).map(|c| self.node(c).plugin());
            if !node.plugin().is_consistent(left, right) {
                return Err(InvariantViolation::PluginState { depth });
            }

            for direction in Direction::BOTH {
                let Some(child) = node.child(direction) else {
                    match black_height {
                        None => black_height = Some(blacks),
                        Some(expected) if expected != blacks => {
                            return Err(InvariantViolation::BlackHeightMismatch {
                                expected,
                                found: blacks,
                            });
                        }
                        Some(_) => {}
                    }
                    continue;
                };

                if self.parent(child) != Some(handle) {
                    return Err(InvariantViolation::BrokenParentLink { depth: depth + 1 });
                }
                if node.color().is_red() && self.color(child).is_red() {
                    return Err(InvariantViolation::RedChildOfRed { depth });
                }
                stack.push((child, depth + 1, blacks));
            }
        }

        if reachable != self.len {
            return Err(InvariantViolation::LengthMismatch {
                cached: self.len,
                reachable,
            });
        }
        debug_assert_eq!(self.nodes.len(), self.len, "`RawTree::check_invariants()` - leaked arena slots!");

        if self.first != Some(self.extreme(root, Direction::Left)) {
            return Err(InvariantViolation::StaleMinimum);
        }
        if self.last != Some(self.extreme(root, Direction::Right)) {
            return Err(InvariantViolation::StaleMaximum);
        }

        let mut previous = self.first;
        let mut position = 1;
        while let Some(prev) = previous {
            let Some(next) = self.step(prev, Direction::Right) else {
                break;
            };
            if self.key(prev) >= self.key(next) {
                return Err(InvariantViolation::KeysOutOfOrder { position });
            }
            previous = Some(next);
            position += 1;
        }
        Ok(())
    }
}

impl<K: Ord, P: Plugin + SubtreeSize> RawTree<K, P> {
    fn subtree_size(&self, handle: Option<Handle>) -> usize {
        handle.map_or(0, |h| self.node(h).plugin().subtree_size())
    }

    /// Zero-based position of `key` in sorted order.
    ///
    /// Every right turn skips the left subtree and the node itself; a match
    /// skips only the left subtree.
    pub(crate) fn rank_of<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.root;
        let mut rank = 0;
        while let Some(handle) = current {
            let left = self.subtree_size(self.child(handle, Direction::Left));
            match key.cmp(self.key(handle).borrow()) {
                Ordering::Less => current = self.child(handle, Direction::Left),
                Ordering::Greater => {
                    rank += left + 1;
                    current = self.child(handle, Direction::Right);
                }
                Ordering::Equal => return Some(rank + left),
            }
        }
        None
    }

    /// Returns the node at zero-based position `rank` in sorted order.
    pub(crate) fn get_by_rank(&self, mut rank: usize) -> Option<Handle> {
        if rank >= self.len {
            return None;
        }

        let mut current = self.root;
        while let Some(handle) = current {
            let left = self.subtree_size(self.child(handle, Direction::Left));
            match rank.cmp(&left) {
                Ordering::Less => current = self.child(handle, Direction::Left),
                Ordering::Equal => return Some(handle),
                Ordering::Greater => {
                    rank -= left + 1;
                    current = self.child(handle, Direction::Right);
                }
            }
        }
        None
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::OrderStatistic;
    use alloc::vec;
    use pretty_assertions::assert_eq;

    type SizedTree = RawTree<i32, OrderStatistic>;

    // Builds an unbalanced tree by plain BST insertion.
    fn unbalanced(keys: &[i32]) -> SizedTree {
        let mut tree = SizedTree::new();
        for &key in keys {
            tree.preinsert(key);
        }
        tree
    }

    fn size_at(tree: &SizedTree, handle: Handle) -> usize {
        tree.node(handle).plugin().subtree_size()
    }

    fn in_order(tree: &SizedTree) -> Vec<i32> {
        let mut keys = Vec::new();
        let mut current = tree.first();
        while let Some(h) = current {
            keys.push(*tree.key(h));
            current = tree.step(h, Direction::Right);
        }
        keys
    }

    fn in_reverse(tree: &SizedTree) -> Vec<i32> {
        let mut keys = Vec::new();
        let mut current = tree.last();
        while let Some(h) = current {
            keys.push(*tree.key(h));
            current = tree.step(h, Direction::Left);
        }
        keys
    }

    #[test]
    fn preinsert_links_leaves_and_tracks_extremes() {
        let tree = unbalanced(&[50, 30, 70, 20, 40, 80]);
        assert_eq!(tree.len(), 6);
        assert_eq!(*tree.key(tree.first().unwrap()), 20);
        assert_eq!(*tree.key(tree.last().unwrap()), 80);
        assert_eq!(size_at(&tree, tree.root().unwrap()), 6);
        assert_eq!(in_order(&tree), vec![20, 30, 40, 50, 70, 80]);
        assert_eq!(in_reverse(&tree), vec![80, 70, 50, 40, 30, 20]);
    }

    #[test]
    fn preinsert_rejects_duplicates() {
        let mut tree = unbalanced(&[2, 1, 3]);
        assert!(tree.preinsert(2).is_none());
        assert!(tree.preinsert(3).is_none());
        assert_eq!(tree.len(), 3);
        assert_eq!(size_at(&tree, tree.root().unwrap()), 3);
    }

    #[test]
    fn locate_finds_present_keys_only() {
        let tree = unbalanced(&[8, 4, 12, 2, 6]);
        for key in [8, 4, 12, 2, 6] {
            assert_eq!(tree.locate(&key).map(|h| *tree.key(h)), Some(key));
        }
        assert!(tree.locate(&5).is_none());
        assert!(SizedTree::new().locate(&5).is_none());
    }

    #[test]
    fn rotation_moves_heritor_up_and_keeps_sizes() {
        //     4              6
        //    / \            / \
        //   2   6    =>    4   7
        //      / \        / \
        //     5   7      2   5
        let mut tree = unbalanced(&[4, 2, 6, 5, 7]);
        let four = tree.locate(&4).unwrap();
        let six = tree.locate(&6).unwrap();
        let five = tree.locate(&5).unwrap();

        tree.rotate(four, Direction::Left);

        assert_eq!(tree.root(), Some(six));
        assert!(tree.parent(six).is_none());
        assert_eq!(tree.child(six, Direction::Left), Some(four));
        assert_eq!(tree.child(four, Direction::Right), Some(five));
        assert_eq!(tree.parent(five), Some(four));
        assert_eq!(tree.direction_from_parent(five), Direction::Right);
        assert_eq!(size_at(&tree, six), 5);
        assert_eq!(size_at(&tree, four), 3);
        assert_eq!(in_order(&tree), vec![2, 4, 5, 6, 7]);

        tree.rotate(six, Direction::Right);
        assert_eq!(tree.root(), Some(four));
        assert_eq!(size_at(&tree, four), 5);
        assert_eq!(size_at(&tree, six), 3);
        assert_eq!(in_order(&tree), vec![2, 4, 5, 6, 7]);
    }

    #[test]
    fn rotation_below_the_root_reattaches_in_place() {
        let mut tree = unbalanced(&[10, 5, 2, 7]);
        let ten = tree.locate(&10).unwrap();
        let five = tree.locate(&5).unwrap();
        let two = tree.locate(&2).unwrap();

        tree.rotate(five, Direction::Right);

        assert_eq!(tree.child(ten, Direction::Left), Some(two));
        assert_eq!(tree.parent(two), Some(ten));
        assert_eq!(tree.child(two, Direction::Right), Some(five));
        assert_eq!(size_at(&tree, ten), 4);
        assert_eq!(size_at(&tree, two), 3);
        assert_eq!(size_at(&tree, five), 2);
        assert_eq!(in_order(&tree), vec![2, 5, 7, 10]);
    }

    #[test]
    #[should_panic(expected = "`RawTree::rotate()` - `node` has no heritor!")]
    fn rotation_without_heritor_panics() {
        let mut tree = unbalanced(&[1, 2]);
        let one = tree.locate(&1).unwrap();
        tree.rotate(one, Direction::Right);
    }

    #[test]
    fn replace_with_child_promotes_the_only_child() {
        let mut tree = unbalanced(&[10, 5, 15, 12]);
        let fifteen = tree.locate(&15).unwrap();
        let twelve = tree.locate(&12).unwrap();
        let ten = tree.locate(&10).unwrap();

        let detached = tree.replace_with_child(fifteen);
        assert_eq!(tree.release(detached), 15);

        assert_eq!(tree.child(ten, Direction::Right), Some(twelve));
        assert_eq!(tree.parent(twelve), Some(ten));
        assert_eq!(tree.last(), Some(twelve));
        assert_eq!(tree.len(), 3);
        assert_eq!(size_at(&tree, ten), 3);
        assert_eq!(in_order(&tree), vec![5, 10, 12]);
    }

    #[test]
    fn replace_with_child_updates_extremes_from_parent() {
        let mut tree = unbalanced(&[10, 5, 15]);
        let five = tree.locate(&5).unwrap();
        let ten = tree.locate(&10).unwrap();

        let detached = tree.replace_with_child(five);
        assert_eq!(tree.release(detached), 5);
        assert_eq!(tree.first(), Some(ten));

        let root = tree.root().unwrap();
        let detached = tree.replace_with_child(tree.locate(&15).unwrap());
        assert_eq!(tree.release(detached), 15);
        assert_eq!(tree.last(), Some(root));

        let detached = tree.replace_with_child(root);
        assert_eq!(tree.release(detached), 10);
        assert!(tree.root().is_none());
        assert!(tree.first().is_none());
        assert!(tree.last().is_none());
        assert!(tree.is_empty());
    }

    #[test]
    fn replace_with_child_at_root() {
        let mut tree = unbalanced(&[1, 2, 3]);
        let one = tree.locate(&1).unwrap();
        let two = tree.locate(&2).unwrap();

        let detached = tree.replace_with_child(one);
        assert_eq!(tree.release(detached), 1);
        assert_eq!(tree.root(), Some(two));
        assert!(tree.parent(two).is_none());
        assert_eq!(tree.first(), Some(two));
        assert_eq!(size_at(&tree, two), 2);
    }

    #[test]
    fn preerase_swaps_with_predecessor() {
        let mut tree = unbalanced(&[10, 5, 15, 7]);
        let ten = tree.locate(&10).unwrap();
        let seven = tree.locate(&7).unwrap();

        let doomed = tree.preerase(&10).unwrap();
        assert_eq!(doomed, seven);
        assert_eq!(*tree.key(doomed), 10);
        assert_eq!(*tree.key(ten), 7);

        let detached = tree.replace_with_child(doomed);
        assert_eq!(tree.release(detached), 10);
        assert_eq!(in_order(&tree), vec![5, 7, 15]);
    }

    #[test]
    fn preerase_returns_nodes_with_one_child_directly() {
        let mut tree = unbalanced(&[10, 5, 3]);
        let five = tree.locate(&5).unwrap();
        assert_eq!(tree.preerase(&5), Some(five));
        assert!(tree.preerase(&4).is_none());
    }

    #[test]
    fn drain_yields_sorted_keys() {
        let mut tree = unbalanced(&[3, 1, 4, 5, 9, 2, 6]);
        assert_eq!(tree.drain_to_vec(), vec![1, 2, 3, 4, 5, 6, 9]);
        assert!(tree.is_empty());
        assert!(tree.root().is_none());
    }

    #[test]
    fn rank_queries_on_unbalanced_shape() {
        let tree = unbalanced(&[1, 2, 3, 4, 5]);
        for (rank, key) in (1..=5).enumerate() {
            assert_eq!(tree.rank_of(&key), Some(rank));
            assert_eq!(tree.get_by_rank(rank).map(|h| *tree.key(h)), Some(key));
        }
        assert_eq!(tree.rank_of(&0), None);
        assert!(tree.get_by_rank(5).is_none());
    }

    #[test]
    fn verification_catches_tampering() {
        let mut tree = unbalanced(&[2, 1, 3]);
        // Plain BST insertion leaves everything red.
        assert_eq!(tree.check_invariants(), Err(InvariantViolation::RedRoot));

        let root = tree.root().unwrap();
        tree.paint(root, Color::Black);
        assert_eq!(tree.check_invariants(), Ok(()));

        let one = tree.locate(&1).unwrap();
        tree.paint(one, Color::Black);
        assert!(matches!(tree.check_invariants(), Err(InvariantViolation::BlackHeightMismatch { .. })));

        tree.paint(root, Color::Red);
        tree.paint(one, Color::Red);
        assert_eq!(tree.check_invariants(), Err(InvariantViolation::RedRoot));
    }

    #[test]
    fn verification_catches_stale_sizes_and_extremes() {
        let mut tree = unbalanced(&[2, 1]);
        let two = tree.locate(&2).unwrap();
        tree.paint(two, Color::Black);
        assert_eq!(tree.check_invariants(), Ok(()));

        tree.nodes.get_mut(two).plugin_mut().size = 7;
        assert_eq!(tree.check_invariants(), Err(InvariantViolation::PluginState { depth: 0 }));
        tree.nodes.get_mut(two).plugin_mut().size = 2;

        tree.first = Some(two);
        assert_eq!(tree.check_invariants(), Err(InvariantViolation::StaleMinimum));
    }
}
