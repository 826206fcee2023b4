//! Intrusive red-black tree with pluggable per-node augmentation.
//!
//! This crate provides [`RBTree`], an ordered set of unique keys kept balanced
//! by the classic red-black rules, and [`IndexedRBTree`], the same tree
//! augmented with subtree sizes for O(log n) order-statistic queries:
//!
//! - [`rank_of`](RBTree::rank_of) - Get the sorted position of a key
//! - [`get_by_rank`](RBTree::get_by_rank) - Get the key at a given sorted position
//! - Indexing by [`Rank`] - e.g., `tree[Rank(0)]` for the smallest key
//!
//! # Example
//!
//! ```
//! use osrb_tree::{IndexedRBTree, Rank};
//!
//! let mut tree = IndexedRBTree::new();
//! tree.insert(3);
//! tree.insert(7);
//! tree.insert(5);
//!
//! assert_eq!(tree.rank_of(&7), Some(2));
//! assert_eq!(tree[Rank(0)], 3);
//!
//! tree.erase(&5);
//! assert_eq!(tree.rank_of(&7), Some(1));
//! assert!(tree.check_invariants().is_ok());
//! ```
//!
//! # Plugins
//!
//! Every node carries a [`Plugin`] state which the tree updates whenever a
//! subtree is attached below or detached from a node. [`OrderStatistic`] is
//! one such plugin; pairs `(A, B)` compose two of them.
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **Bidirectional cursors** - [`Cursor`](rb_tree::Cursor) with a past-the-end position
//! - **Structural inspection** - [`RBTree::root`] exposes colors, links and plugin states
//! - **Self-verification** - [`RBTree::check_invariants`] reports the first broken rule
//!
//! # Implementation
//!
//! Nodes live in an index arena and link to each other by handle. All
//! structural changes go through two primitives, detaching a subtree and
//! attaching a subtree, which is where plugin states are kept current.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod error;
mod order_statistic;
mod plugin;
mod raw;

pub mod rb_tree;

pub use error::{InvariantViolation, Result};
pub use order_statistic::{OrderStatistic, Rank, SubtreeSize};
pub use plugin::Plugin;
pub use raw::{Color, Direction};
pub use rb_tree::{IndexedRBTree, RBTree};
