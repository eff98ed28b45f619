#[path = "shared/rand/mod.rs"]
pub mod random;
#[cfg(test)]
mod tests;

#[cfg(test)]
pub use tests::support;

pub mod api;
pub mod config;
pub mod queue;
pub mod telemetry;

pub use queue::{Element, PartialBlock, Queue, QueueChain, QueueContext, QueueError, Settings};
pub use random::{RandomSource, SplitMix64};
