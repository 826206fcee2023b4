use core::fmt;

use super::NodeRef;
use crate::raw::{Direction, Handle, RawTree};

// Where a cursor stands: on a key-bearing node, or one past the last one.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Position {
    Node(Handle),
    End,
}

/// A bidirectional position in an `RBTree`.
///
/// A cursor stands either on a key or at the past-the-end position returned
/// by [`RBTree::end`](crate::RBTree::end). Moving back from the end reaches
/// the largest key, so `end()` works as the anchor of a reverse walk.
///
/// The cursor borrows the tree, so the tree cannot change while it exists.
///
/// # Examples
///
/// ```
/// use osrb_tree::RBTree;
///
/// let tree: RBTree<_> = RBTree::from([1, 2, 3]);
///
/// let mut reversed = Vec::new();
/// let mut cursor = tree.end();
/// while cursor != tree.begin() {
///     cursor.move_prev();
///     reversed.push(*cursor.key());
/// }
/// assert_eq!(reversed, [3, 2, 1]);
/// ```
pub struct Cursor<'a, K, P = ()> {
    tree: &'a RawTree<K, P>,
    position: Position,
}

impl<'a, K, P> Cursor<'a, K, P> {
    pub(crate) fn at(tree: &'a RawTree<K, P>, handle: Option<Handle>) -> Self {
        Cursor {
            tree,
            position: handle.map_or(Position::End, Position::Node),
        }
    }

    /// Returns `true` if the cursor is at the past-the-end position.
    #[must_use]
    pub fn is_end(&self) -> bool {
        self.position == Position::End
    }

    /// Returns the key under the cursor.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is at the past-the-end position.
    #[must_use]
    pub fn key(&self) -> &'a K {
        self.peek().expect("`Cursor::key()` - cursor is past the end!")
    }

    /// Returns the key under the cursor, or `None` at the past-the-end position.
    #[must_use]
    pub fn peek(&self) -> Option<&'a K> {
        let tree = self.tree;
        match self.position {
            Position::Node(handle) => Some(tree.key(handle)),
            Position::End => None,
        }
    }

    /// Returns the node under the cursor for structural inspection.
    #[must_use]
    pub fn node(&self) -> Option<NodeRef<'a, K, P>> {
        match self.position {
            Position::Node(handle) => Some(NodeRef::new(self.tree, handle)),
            Position::End => None,
        }
    }

    /// Moves to the next larger key, or to the past-the-end position after
    /// the largest one.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is already past the end.
    pub fn move_next(&mut self) {
        let Position::Node(handle) = self.position else {
            panic!("`Cursor::move_next()` - cursor is past the end!");
        };
        self.position = self.tree.step(handle, Direction::Right).map_or(Position::End, Position::Node);
    }

    /// Moves to the next smaller key. From the past-the-end position this
    /// reaches the largest key.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is at the smallest key, or if the tree is empty.
    pub fn move_prev(&mut self) {
        let previous = match self.position {
            Position::Node(handle) => self.tree.step(handle, Direction::Left),
            Position::End => self.tree.last(),
        };
        let handle = previous.expect("`Cursor::move_prev()` - cursor is at the beginning!");
        self.position = Position::Node(handle);
    }
}

impl<K, P> Clone for Cursor<'_, K, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, P> Copy for Cursor<'_, K, P> {}

impl<K, P> PartialEq for Cursor<'_, K, P> {
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self.tree, other.tree) && self.position == other.position
    }
}

impl<K, P> Eq for Cursor<'_, K, P> {}

impl<K: fmt::Debug, P> fmt::Debug for Cursor<'_, K, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.peek() {
            Some(key) => f.debug_tuple("Cursor").field(key).finish(),
            None => f.write_str("Cursor(End)"),
        }
    }
}
