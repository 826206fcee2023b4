use alloc::vec::Vec;
use core::mem;

use super::handle::Handle;

#[derive(Clone)]
enum Entry<T> {
    Occupied(T),
    // Vacant entries form a singly linked free list through `next`.
    Vacant { next: Option<Handle> },
}

impl<T> Entry<T> {
    fn occupied(&self) -> Option<&T> {
        match self {
            Entry::Occupied(element) => Some(element),
            Entry::Vacant { .. } => None,
        }
    }

    fn occupied_mut(&mut self) -> Option<&mut T> {
        match self {
            Entry::Occupied(element) => Some(element),
            Entry::Vacant { .. } => None,
        }
    }
}

/// Node storage for a tree.
///
/// Handles stay valid until their element is taken out. Taken entries are
/// threaded onto a free list and reused last-in, first-out.
#[derive(Clone)]
pub(crate) struct Arena<T> {
    entries: Vec<Entry<T>>,
    next_vacant: Option<Handle>,
    occupied: usize,
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Arena {
            entries: Vec::new(),
            next_vacant: None,
            occupied: 0,
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Arena {
            entries: Vec::with_capacity(capacity),
            next_vacant: None,
            occupied: 0,
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.entries.capacity()
    }

    /// Number of occupied entries.
    pub(crate) fn len(&self) -> usize {
        self.occupied
    }

    pub(crate) fn alloc(&mut self, element: T) -> Handle {
        let Some(handle) = self.next_vacant else {
            assert!(
                self.entries.len() <= Handle::MAX,
                "`Arena::alloc()` - no handle left for another node (limit {})",
                Handle::MAX
            );
            let handle = Handle::from_index(self.entries.len());
            self.entries.push(Entry::Occupied(element));
            self.occupied += 1;
            return handle;
        };

        match mem::replace(&mut self.entries[handle.to_index()], Entry::Occupied(element)) {
            Entry::Vacant { next } => self.next_vacant = next,
            Entry::Occupied(_) => unreachable!("`Arena::alloc()` - free list names an occupied entry!"),
        }
        self.occupied += 1;
        handle
    }

    #[inline]
    pub(crate) fn get(&self, handle: Handle) -> &T {
        self.entries[handle.to_index()].occupied().expect("`Arena::get()` - `handle` names a vacant entry!")
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, handle: Handle) -> &mut T {
        self.entries[handle.to_index()]
            .occupied_mut()
            .expect("`Arena::get_mut()` - `handle` names a vacant entry!")
    }

    /// Mutable access to two different elements at once, in argument order.
    pub(crate) fn get_pair_mut(&mut self, a: Handle, b: Handle) -> (&mut T, &mut T) {
        let (i, j) = (a.to_index(), b.to_index());
        assert_ne!(i, j, "`Arena::get_pair_mut()` - `a` and `b` are the same handle!");

        let (low, high) = self.entries.split_at_mut(i.max(j));
        let near = low[i.min(j)].occupied_mut();
        let far = high[0].occupied_mut();
        let (Some(near), Some(far)) = (near, far) else {
            panic!("`Arena::get_pair_mut()` - a handle names a vacant entry!");
        };
        if i < j { (near, far) } else { (far, near) }
    }

    pub(crate) fn take(&mut self, handle: Handle) -> T {
        let vacant = Entry::Vacant { next: self.next_vacant };
        match mem::replace(&mut self.entries[handle.to_index()], vacant) {
            Entry::Occupied(element) => {
                self.next_vacant = Some(handle);
                self.occupied -= 1;
                element
            }
            Entry::Vacant { next } => {
                self.entries[handle.to_index()] = Entry::Vacant { next };
                panic!("`Arena::take()` - `handle` names a vacant entry!");
            }
        }
    }

    /// Drops every element in a single pass, keeping the allocation.
    pub(crate) fn clear(&mut self) {
        self.entries.clear();
        self.next_vacant = None;
        self.occupied = 0;
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    extern crate std;

    use super::*;
    use alloc::vec;
    use proptest::prelude::*;
    use std::panic::{AssertUnwindSafe, catch_unwind};

    #[test]
    fn vacated_entries_are_reused_last_in_first_out() {
        let mut arena = Arena::new();
        let handles: Vec<_> = "abcd".chars().map(|c| arena.alloc(c)).collect();
        assert_eq!(arena.take(handles[1]), 'b');
        assert_eq!(arena.take(handles[3]), 'd');

        assert_eq!(arena.alloc('x'), handles[3]);
        assert_eq!(arena.alloc('y'), handles[1]);
        assert_eq!(arena.len(), 4);
        assert_eq!(*arena.get(handles[0]), 'a');
        assert_eq!(*arena.get(handles[1]), 'y');
    }

    #[test]
    fn clear_forgets_the_free_list() {
        let mut arena = Arena::with_capacity(4);
        let first = arena.alloc(10);
        let second = arena.alloc(20);
        arena.take(second);
        arena.clear();

        assert_eq!(arena.len(), 0);
        assert!(arena.capacity() >= 4);
        assert_eq!(arena.alloc(30), first);
        assert_eq!(arena.alloc(40), second);
    }

    #[test]
    fn pair_is_returned_in_argument_order() {
        let mut arena = Arena::new();
        let low = arena.alloc(vec![1]);
        let high = arena.alloc(vec![2]);

        let (x, y) = arena.get_pair_mut(high, low);
        x.push(3);
        core::mem::swap(x, y);
        assert_eq!(arena.get(low), &[2, 3]);
        assert_eq!(arena.get(high), &[1]);
    }

    #[test]
    #[should_panic(expected = "are the same handle")]
    fn pair_of_one_handle_panics() {
        let mut arena = Arena::new();
        let only = arena.alloc(());
        let _ = arena.get_pair_mut(only, only);
    }

    #[test]
    #[should_panic(expected = "`Arena::get()` - `handle` names a vacant entry!")]
    fn vacant_entry_cannot_be_read() {
        let mut arena = Arena::new();
        let gone = arena.alloc("gone");
        arena.take(gone);
        let _ = arena.get(gone);
    }

    #[test]
    #[should_panic(expected = "`Arena::take()` - `handle` names a vacant entry!")]
    fn double_take_panics() {
        let mut arena = Arena::new();
        let gone = arena.alloc(1u8);
        arena.take(gone);
        arena.take(gone);
    }

    #[test]
    fn full_arena_refuses_without_counting() {
        let mut arena = Arena::new();
        for _ in 0..=Handle::MAX {
            arena.alloc(0u8);
        }
        let refused = catch_unwind(AssertUnwindSafe(|| arena.alloc(1)));
        assert!(refused.is_err());
        assert_eq!(arena.len(), Handle::MAX + 1);

        let last = Handle::from_index(Handle::MAX);
        arena.take(last);
        assert_eq!(arena.alloc(2), last);
        assert_eq!(arena.len(), Handle::MAX + 1);
    }

    #[derive(Clone, Debug)]
    enum Step {
        Push(i16),
        Overwrite(prop::sample::Index, i16),
        Remove(prop::sample::Index),
        Wipe,
    }

    fn steps() -> impl Strategy<Value = Vec<Step>> {
        let step = prop_oneof![
            12 => any::<i16>().prop_map(Step::Push),
            4 => (any::<prop::sample::Index>(), any::<i16>()).prop_map(|(at, value)| Step::Overwrite(at, value)),
            6 => any::<prop::sample::Index>().prop_map(Step::Remove),
            1 => Just(Step::Wipe),
        ];
        prop::collection::vec(step, 0..200)
    }

    proptest! {
        #[test]
        fn live_handles_keep_their_values(steps in steps()) {
            let mut arena = Arena::new();
            let mut live: Vec<(Handle, i16)> = Vec::new();

            for step in steps {
                match step {
                    Step::Push(value) => live.push((arena.alloc(value), value)),
                    Step::Overwrite(at, value) if !live.is_empty() => {
                        let at = at.index(live.len());
                        let slot = &mut live[at];
                        *arena.get_mut(slot.0) = value;
                        slot.1 = value;
                    }
                    Step::Remove(at) if !live.is_empty() => {
                        let (handle, value) = live.swap_remove(at.index(live.len()));
                        prop_assert_eq!(arena.take(handle), value);
                    }
                    Step::Wipe => {
                        arena.clear();
                        live.clear();
                    }
                    Step::Overwrite(..) | Step::Remove(_) => {}
                }

                prop_assert_eq!(arena.len(), live.len());
                prop_assert!(live.iter().all(|&(handle, value)| *arena.get(handle) == value));
            }
        }
    }
}
