use core::fmt;

use super::Cursor;
use crate::raw::{Color, Direction, Handle, RawTree};

/// A read-only view of one node of an `RBTree`.
///
/// Obtained from [`RBTree::root`](crate::RBTree::root) or
/// [`Cursor::node`]; mostly useful for inspecting and verifying the shape of
/// a tree.
///
/// # Examples
///
/// ```
/// use osrb_tree::{Color, Direction, RBTree};
///
/// let tree: RBTree<_> = RBTree::from([5, 11, 3, 16, 12]);
/// let root = tree.root().unwrap();
/// let twelve = root.child(Direction::Right).unwrap();
///
/// assert_eq!(twelve.key(), &12);
/// assert_eq!(twelve.color(), Color::Black);
/// assert_eq!(twelve.direction(), Some(Direction::Right));
/// assert_eq!(twelve.child(Direction::Left).unwrap().color(), Color::Red);
/// assert_eq!(twelve.parent(), Some(root));
/// ```
pub struct NodeRef<'a, K, P = ()> {
    tree: &'a RawTree<K, P>,
    handle: Handle,
}

impl<'a, K, P> NodeRef<'a, K, P> {
    pub(crate) fn new(tree: &'a RawTree<K, P>, handle: Handle) -> Self {
        NodeRef { tree, handle }
    }

    /// Returns the node's key.
    #[must_use]
    pub fn key(&self) -> &'a K {
        let tree = self.tree;
        tree.key(self.handle)
    }

    /// Returns the node's color.
    #[must_use]
    pub fn color(&self) -> Color {
        self.tree.color(self.handle)
    }

    /// Returns the node's plugin state.
    #[must_use]
    pub fn plugin(&self) -> &'a P {
        let tree = self.tree;
        tree.node(self.handle).plugin()
    }

    /// Returns the child on the given side, if any.
    #[must_use]
    pub fn child(&self, direction: Direction) -> Option<Self> {
        self.tree.child(self.handle, direction).map(|h| NodeRef::new(self.tree, h))
    }

    /// Returns the parent, or `None` for the root.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        self.tree.parent(self.handle).map(|h| NodeRef::new(self.tree, h))
    }

    /// Returns `true` if this is the root node.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.tree.parent(self.handle).is_none()
    }

    /// Returns the side of its parent this node hangs on, or `None` for the root.
    #[must_use]
    pub fn direction(&self) -> Option<Direction> {
        self.tree.slot_of(self.handle).map(|(_, direction)| direction)
    }

    /// Returns a cursor positioned at this node.
    #[must_use]
    pub fn cursor(&self) -> Cursor<'a, K, P> {
        Cursor::at(self.tree, Some(self.handle))
    }
}

impl<K, P> Clone for NodeRef<'_, K, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, P> Copy for NodeRef<'_, K, P> {}

impl<K, P> PartialEq for NodeRef<'_, K, P> {
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self.tree, other.tree) && self.handle == other.handle
    }
}

impl<K, P> Eq for NodeRef<'_, K, P> {}

impl<K: fmt::Debug, P: fmt::Debug> fmt::Debug for NodeRef<'_, K, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("key", self.key())
            .field("color", &self.color())
            .field("plugin", self.plugin())
            .finish()
    }
}
