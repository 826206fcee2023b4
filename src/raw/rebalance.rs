use core::borrow::Borrow;

use super::handle::Handle;
use super::node::{Color, Direction};
use super::raw_tree::{RawTree, Slot};
use crate::plugin::Plugin;

impl<K: Ord, P: Plugin> RawTree<K, P> {
    /// Inserts `key` and restores the red-black invariants.
    ///
    /// Returns `false` without touching the tree if `key` is already present.
    pub(crate) fn insert(&mut self, key: K) -> bool {
        let Some(mut current) = self.preinsert(key) else {
            return false;
        };

        loop {
            let Some(mut parent) = self.parent(current) else {
                self.paint(current, Color::Black);
                log::trace!("insert fixup blackened root {current:?}");
                return true;
            };
            if self.color(parent).is_black() {
                log::trace!("insert fixup stopped under black {parent:?}");
                return true;
            }

            // A red parent is never the root, so the grandparent exists.
            let grandparent = self.parent(parent).expect("`RawTree::insert()` - red node without a parent!");
            if let Some(uncle) = self.sibling(parent).filter(|&u| self.color(u).is_red()) {
                self.paint(parent, Color::Black);
                self.paint(uncle, Color::Black);
                self.paint(grandparent, Color::Red);
                current = grandparent;
                continue;
            }

            let direction = self.direction_from_parent(current);
            if direction != self.direction_from_parent(parent) {
                self.rotate(parent, direction.other());
                core::mem::swap(&mut current, &mut parent);
            }

            let direction = self.direction_from_parent(current);
            self.rotate(grandparent, direction.other());
            self.swap_colors(grandparent, parent);
            log::trace!("insert fixup settled at {parent:?}");
            return true;
        }
    }

    /// Removes `key` and restores the red-black invariants.
    pub(crate) fn remove<Q>(&mut self, key: &Q) -> Option<K>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let doomed = self.preerase(key)?;
        Some(self.unlink(doomed))
    }

    /// Removes the extremal key in `direction` (minimum for `Left`).
    pub(crate) fn pop(&mut self, direction: Direction) -> Option<K> {
        // The extremal node has no child towards `direction`.
        let doomed = self.extremal(direction)?;
        Some(self.unlink(doomed))
    }

    fn unlink(&mut self, doomed: Handle) -> K {
        let color = self.color(doomed);
        let child = self.node(doomed).single_child();
        let slot = self.slot_of(doomed);

        let detached = self.replace_with_child(doomed);
        let key = self.release(detached);
        if color.is_red() {
            return key;
        }

        match child {
            Some(child) if self.color(child).is_red() => self.paint(child, Color::Black),
            _ => self.fix_double_black(slot),
        }
        key
    }

    // `slot` is the (possibly empty) position one black node short.
    fn fix_double_black(&mut self, mut slot: Slot) {
        while let Some((parent, direction)) = slot {
            let mut sibling = self.expect_sibling(parent, direction);
            if self.color(sibling).is_red() {
                self.swap_colors(parent, sibling);
                self.rotate(parent, direction);
                sibling = self.expect_sibling(parent, direction);
            }

            let near = self.child(sibling, direction);
            let far = self.child(sibling, direction.other());
            if self.color_of(near).is_black() && self.color_of(far).is_black() {
                if self.color(parent).is_black() {
                    self.paint(sibling, Color::Red);
                    slot = self.slot_of(parent);
                    continue;
                }

                self.swap_colors(sibling, parent);
                log::trace!("erase fixup absorbed at {parent:?}");
                return;
            }

            if self.color_of(near).is_red() {
                self.rotate(sibling, direction.other());
                let nephew = self.parent(sibling).expect("`RawTree::fix_double_black()` - rotation lost the nephew!");
                self.swap_colors(sibling, nephew);
                sibling = nephew;
            }

            self.rotate(parent, direction);
            self.swap_colors(parent, sibling);
            let far = self.child(sibling, direction.other()).expect("`RawTree::fix_double_black()` - far nephew is missing!");
            self.paint(far, Color::Black);
            log::trace!("erase fixup settled at {sibling:?}");
            return;
        }
        log::trace!("erase fixup reached the root");
    }

    // The child of `parent` opposite `direction`. Black height guarantees one
    // exists whenever the `direction` side is short a black node.
    fn expect_sibling(&self, parent: Handle, direction: Direction) -> Handle {
        self.child(parent, direction.other()).expect("`RawTree::fix_double_black()` - sibling subtree is empty!")
    }
}
