//! Null-tolerant queue surface.
//!
//! Mirrors the classic queue ADT where any handle may be absent: every
//! function accepts `Option` arguments and maps a missing queue, string or
//! buffer to the documented no-op result (`false`, `0` or `None`) instead of
//! failing. Allocation failure is reported as `false`/`None`.

use crate::queue::{Element, Queue, QueueChain};
use crate::random::RandomSource;

/// Creates an empty queue; `None` if the sentinel cannot be allocated.
pub fn new_queue() -> Option<Queue> {
    Queue::new().ok()
}

/// Releases the queue and every element in it.
pub fn free_queue(queue: Option<Queue>) {
    drop(queue);
}

pub fn insert_head(queue: Option<&mut Queue>, s: Option<&str>) -> bool {
    match (queue, s) {
        (Some(q), Some(s)) => q.insert_head(s).is_ok(),
        _ => false,
    }
}

pub fn insert_tail(queue: Option<&mut Queue>, s: Option<&str>) -> bool {
    match (queue, s) {
        (Some(q), Some(s)) => q.insert_tail(s).is_ok(),
        _ => false,
    }
}

/// Removes the first element, copying its payload into `buf` when given
/// (truncated to `buf.len() - 1` bytes plus a NUL terminator).
pub fn remove_head(queue: Option<&mut Queue>, buf: Option<&mut [u8]>) -> Option<Element> {
    let element = queue?.remove_head()?;
    if let Some(buf) = buf {
        element.copy_to(buf);
    }
    Some(element)
}

/// Removes the last element; see [`remove_head`] for the buffer contract.
pub fn remove_tail(queue: Option<&mut Queue>, buf: Option<&mut [u8]>) -> Option<Element> {
    let element = queue?.remove_tail()?;
    if let Some(buf) = buf {
        element.copy_to(buf);
    }
    Some(element)
}

pub fn release_element(element: Option<Element>) {
    drop(element);
}

pub fn size(queue: Option<&Queue>) -> usize {
    queue.map_or(0, Queue::size)
}

pub fn delete_mid(queue: Option<&mut Queue>) -> bool {
    queue.is_some_and(|q| q.delete_mid())
}

pub fn delete_dup(queue: Option<&mut Queue>) -> bool {
    queue.is_some_and(|q| q.delete_dup())
}

pub fn swap(queue: Option<&mut Queue>) {
    if let Some(q) = queue {
        q.swap();
    }
}

pub fn reverse(queue: Option<&mut Queue>) {
    if let Some(q) = queue {
        q.reverse();
    }
}

/// Block reversal with the queue's own partial-block policy. Non-positive `k`
/// is a no-op.
pub fn reverse_k(queue: Option<&mut Queue>, k: i32) {
    if let (Some(q), Ok(k)) = (queue, usize::try_from(k)) {
        q.reverse_k(k);
    }
}

pub fn sort(queue: Option<&mut Queue>, descending: bool) {
    if let Some(q) = queue {
        q.sort(descending);
    }
}

pub fn ascend(queue: Option<&mut Queue>) -> usize {
    queue.map_or(0, Queue::keep_ascending)
}

pub fn descend(queue: Option<&mut Queue>) -> usize {
    queue.map_or(0, Queue::keep_descending)
}

/// Merges every queue in the chain into the first one.
pub fn merge(chain: Option<&mut QueueChain>, descending: bool) -> usize {
    chain.map_or(0, |c| c.merge(descending))
}

pub fn shuffle<R: RandomSource + ?Sized>(queue: Option<&mut Queue>, rng: &mut R) {
    if let Some(q) = queue {
        q.shuffle(rng);
    }
}
