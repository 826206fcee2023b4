use super::handle::Handle;

/// The color of a red-black tree node.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Color {
    Red,
    Black,
}

impl Color {
    /// Returns `true` if the color is [`Red`](Color::Red).
    #[must_use]
    pub const fn is_red(self) -> bool {
        matches!(self, Color::Red)
    }

    /// Returns `true` if the color is [`Black`](Color::Black).
    #[must_use]
    pub const fn is_black(self) -> bool {
        matches!(self, Color::Black)
    }
}

/// The side of its parent a child occupies.
///
/// # Examples
///
/// ```
/// use osrb_tree::Direction;
///
/// assert_eq!(Direction::Left.other(), Direction::Right);
/// assert_eq!(Direction::Right.other(), Direction::Left);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// Both directions, left first.
    pub const BOTH: [Direction; 2] = [Direction::Left, Direction::Right];

    /// Returns the opposite direction.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    #[inline]
    const fn index(self) -> usize {
        match self {
            Direction::Left => 0,
            Direction::Right => 1,
        }
    }
}

// A key-bearing node. The parent link is a back-reference only: a node is
// owned by the child slot (or root slot) that names it.
#[derive(Clone)]
pub(crate) struct Node<K, P> {
    key: K,
    children: [Option<Handle>; 2],
    parent: Option<Handle>,
    color: Color,
    plugin: P,
}

impl<K, P: Default> Node<K, P> {
    /// Creates a detached red node.
    pub(crate) fn new(key: K) -> Self {
        Self {
            key,
            children: [None, None],
            parent: None,
            color: Color::Red,
            plugin: P::default(),
        }
    }
}

impl<K, P> Node<K, P> {
    #[inline]
    pub(crate) fn key(&self) -> &K {
        &self.key
    }

    #[inline]
    pub(crate) fn key_mut(&mut self) -> &mut K {
        &mut self.key
    }

    pub(crate) fn into_key(self) -> K {
        self.key
    }

    #[inline]
    pub(crate) fn child(&self, direction: Direction) -> Option<Handle> {
        self.children[direction.index()]
    }

    #[inline]
    pub(crate) fn set_child(&mut self, direction: Direction, child: Option<Handle>) {
        self.children[direction.index()] = child;
    }

    #[inline]
    pub(crate) fn parent(&self) -> Option<Handle> {
        self.parent
    }

    #[inline]
    pub(crate) fn set_parent(&mut self, parent: Option<Handle>) {
        self.parent = parent;
    }

    #[inline]
    pub(crate) fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub(crate) fn paint(&mut self, color: Color) {
        self.color = color;
    }

    #[inline]
    pub(crate) fn plugin(&self) -> &P {
        &self.plugin
    }

    #[inline]
    pub(crate) fn plugin_mut(&mut self) -> &mut P {
        &mut self.plugin
    }

    /// Returns the number of present children (0, 1 or 2).
    pub(crate) fn child_count(&self) -> usize {
        self.children.iter().filter(|c| c.is_some()).count()
    }

    /// Returns the only child of a node with at most one child.
    pub(crate) fn single_child(&self) -> Option<Handle> {
        debug_assert!(self.child_count() <= 1, "`Node::single_child()` - node has two children!");
        self.child(Direction::Left).or(self.child(Direction::Right))
    }

    /// Returns the direction in which `child` hangs off this node.
    pub(crate) fn direction_of(&self, child: Handle) -> Direction {
        if self.child(Direction::Left) == Some(child) {
            Direction::Left
        } else {
            assert_eq!(
                self.child(Direction::Right),
                Some(child),
                "`Node::direction_of()` - `child` is not a child of this node!"
            );
            Direction::Right
        }
    }
}
