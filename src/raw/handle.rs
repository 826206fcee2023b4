use core::num::NonZero;

// Narrow under test so the node limit is reachable.
#[cfg(test)]
type Repr = u16;
#[cfg(not(test))]
type Repr = u32;

/// Names one node of a tree's arena.
///
/// Child and parent links are stored as `Option<Handle>`; the zero niche
/// makes an absent link free.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub(crate) struct Handle(NonZero<Repr>);

impl Handle {
    /// Highest arena index a handle can name.
    pub(crate) const MAX: usize = Repr::MAX as usize - 1;

    /// Stores `index + 1`, keeping zero free for `None`.
    #[inline]
    pub(crate) const fn from_index(index: usize) -> Self {
        assert!(index <= Self::MAX, "`Handle::from_index()` - `index` is beyond `Handle::MAX`!");
        #[allow(clippy::cast_possible_truncation)]
        let shifted = index as Repr + 1;
        match NonZero::new(shifted) {
            Some(raw) => Handle(raw),
            None => unreachable!(),
        }
    }

    #[inline]
    pub(crate) const fn to_index(self) -> usize {
        self.0.get() as usize - 1
    }
}
