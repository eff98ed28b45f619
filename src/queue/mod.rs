//! Intrusive circular string queue and the algorithms that reshape it in place.

pub mod chain;
pub mod element;
pub mod error;
mod filter;
pub(crate) mod link;
#[allow(clippy::module_inception)]
pub mod queue;
pub mod reorder;
mod sort;

#[cfg(test)]
mod chain_test;

// Re-export main types
pub use chain::{merge, QueueChain, QueueContext, QueueMut};
pub use element::Element;
pub use error::QueueError;
pub use queue::{Iter, Queue, Settings};
pub use reorder::PartialBlock;
