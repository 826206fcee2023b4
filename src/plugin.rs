//! Auxiliary per-node state maintained across structural changes.
//!
//! A [`Plugin`] is the per-node state a tree carries next to each key. The
//! tree changes shape through exactly two operations, attaching a detached
//! subtree under a node and detaching a subtree from its parent. Rotations,
//! insertions and removals are all built from these two, so a plugin that
//! keeps its state consistent across attach and detach stays consistent
//! across every mutation without any rotation-specific code.

/// Per-node auxiliary state with hooks for structural events.
///
/// Both hooks are invoked once for every *strict ancestor* of the subtree
/// being moved, walking from the subtree's new (or old) parent up to the
/// root. `subtree` is the plugin state of the subtree's root.
///
/// # Examples
///
/// Any aggregate that can be added to and subtracted from an ancestor fits.
/// A per-node weight summed over each subtree:
///
/// ```
/// use osrb_tree::{Plugin, RBTree};
///
/// #[derive(Clone, Debug)]
/// struct Weight(u64);
///
/// impl Default for Weight {
///     fn default() -> Self {
///         Weight(1)
///     }
/// }
///
/// impl Plugin for Weight {
///     fn on_attach(ancestor: &mut Self, subtree: &Self) {
///         ancestor.0 += subtree.0;
///     }
///
///     fn before_detach(ancestor: &mut Self, subtree: &Self) {
///         ancestor.0 -= subtree.0;
///     }
/// }
///
/// let tree: RBTree<i32, Weight> = (0..10).collect();
/// assert_eq!(tree.root().unwrap().plugin().0, 10);
/// ```
pub trait Plugin: Clone + Default {
    /// Whether the hooks do anything. When `false` the tree skips the
    /// ancestor walks altogether.
    const ENABLED: bool = true;

    /// Called on `ancestor` after a subtree rooted at a node with state
    /// `subtree` has been linked somewhere below it.
    fn on_attach(ancestor: &mut Self, subtree: &Self);

    /// Called on `ancestor` before a subtree rooted at a node with state
    /// `subtree` is unlinked from below it.
    fn before_detach(ancestor: &mut Self, subtree: &Self);

    /// Checks this node's state against its children's states.
    ///
    /// Used by [`RBTree::check_invariants`](crate::RBTree::check_invariants).
    fn is_consistent(&self, left: Option<&Self>, right: Option<&Self>) -> bool {
        let _ = (left, right);
        true
    }
}

/// The empty plugin.
impl Plugin for () {
    const ENABLED: bool = false;

    #[inline]
    fn on_attach(_: &mut Self, _: &Self) {}

    #[inline]
    fn before_detach(_: &mut Self, _: &Self) {}
}

/// Runs two plugins side by side. Nest pairs to compose more.
impl<A: Plugin, B: Plugin> Plugin for (A, B) {
    const ENABLED: bool = A::ENABLED || B::ENABLED;

    fn on_attach(ancestor: &mut Self, subtree: &Self) {
        A::on_attach(&mut ancestor.0, &subtree.0);
        B::on_attach(&mut ancestor.1, &subtree.1);
    }

    fn before_detach(ancestor: &mut Self, subtree: &Self) {
        A::before_detach(&mut ancestor.0, &subtree.0);
        B::before_detach(&mut ancestor.1, &subtree.1);
    }

    fn is_consistent(&self, left: Option<&Self>, right: Option<&Self>) -> bool {
        self.0.is_consistent(left.map(|l| &l.0), right.map(|r| &r.0))
            && self.1.is_consistent(left.map(|l| &l.1), right.map(|r| &r.1))
    }
}
