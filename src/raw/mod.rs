mod arena;
mod handle;
mod node;
mod raw_tree;
mod rebalance;

pub(crate) use handle::Handle;
pub use node::{Color, Direction};
pub(crate) use raw_tree::RawTree;
