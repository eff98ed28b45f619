//! Queue error definitions.

/// Errors reported by queue operations. Empty queues are not an error; every
/// operation has a defined result for them.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueueError {
    /// The allocator refused a request. The queue is left unchanged.
    #[error("failed to allocate {what} ({size} bytes)")]
    Allocation { what: &'static str, size: usize },

    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
}
