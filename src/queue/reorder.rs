//! Reordering: full reversal, block reversal and shuffling.

use std::ptr;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::element::node_of;
use super::error::QueueError;
use super::link::{self, Link};
use super::queue::Queue;
use crate::random::RandomSource;

/// Policy for the trailing block of `reverse_k` when fewer than `k`
/// elements remain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PartialBlock {
    /// Leave the short block in its original order.
    Keep,
    /// Reverse the short block like a full one.
    #[default]
    Reverse,
}

impl FromStr for PartialBlock {
    type Err = QueueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "keep" => Ok(PartialBlock::Keep),
            "reverse" => Ok(PartialBlock::Reverse),
            _ => Err(QueueError::InvalidArgument("partial block policy must be keep or reverse")),
        }
    }
}

impl Queue {
    /// Reverses the queue by swapping `next` and `prev` on every link,
    /// sentinel included.
    pub fn reverse(&mut self) {
        let head = self.head_ptr();
        unsafe {
            if link::is_empty(head) {
                return;
            }
            let mut cur = head;
            loop {
                let next = (*cur).next;
                (*cur).next = (*cur).prev;
                (*cur).prev = next;
                cur = next;
                if cur == head {
                    break;
                }
            }
        }
    }

    /// Reverses every run of `k` consecutive elements, using the queue's
    /// configured [`PartialBlock`] policy for a short trailing run.
    pub fn reverse_k(&mut self, k: usize) {
        let policy = self.settings().partial_block;
        self.reverse_k_with(k, policy);
    }

    /// Reverses every run of `k` consecutive elements. Runs keep their
    /// relative order. `k <= 1` is a no-op.
    pub fn reverse_k_with(&mut self, k: usize, partial: PartialBlock) {
        if k <= 1 {
            return;
        }
        let head = self.head_ptr();
        unsafe {
            if link::is_empty(head) || link::is_singular(head) {
                return;
            }

            let mut remaining = self.size();
            let mut blocks = 0usize;

            let mut result = Link::detached();
            let result_ptr = ptr::addr_of_mut!(result);
            link::init(result_ptr);

            while remaining > 0 {
                let take = remaining.min(k);
                let flip = take == k || partial == PartialBlock::Reverse;

                let mut block = Link::detached();
                let block_ptr = ptr::addr_of_mut!(block);
                link::init(block_ptr);

                for _ in 0..take {
                    let node = (*head).next;
                    if flip {
                        link::move_after(node, block_ptr);
                    } else {
                        link::move_tail(node, block_ptr);
                    }
                }
                link::splice_tail(block_ptr, result_ptr);

                remaining -= take;
                blocks += 1;
            }

            // head is empty here; the scratch list goes out of scope stale.
            link::splice(result_ptr, head);

            debug!(
                component = "queue",
                event = "reverse_k",
                k,
                blocks,
                partial = ?partial,
                "queue reversed in blocks"
            );
        }
    }

    /// Fisher–Yates shuffle. Walks positions from the tail towards the head,
    /// drawing one index per position from the shrinking unshuffled prefix,
    /// and swaps payloads rather than links. O(n²) because locating the drawn
    /// index is a walk from the head.
    pub fn shuffle<R: RandomSource + ?Sized>(&mut self, rng: &mut R) {
        let n = self.size();
        if n < 2 {
            return;
        }
        let head = self.head_ptr();
        let mut swaps = 0usize;
        unsafe {
            let mut back = (*head).prev;
            for i in (1..n).rev() {
                let drawn = rng.below(i + 1);
                debug_assert!(drawn <= i, "random source returned {drawn} for bound {}", i + 1);
                let j = drawn.min(i);
                if j != i {
                    let mut front = (*head).next;
                    for _ in 0..j {
                        front = (*front).next;
                    }
                    ptr::swap(
                        ptr::addr_of_mut!((*node_of(front)).value),
                        ptr::addr_of_mut!((*node_of(back)).value),
                    );
                    swaps += 1;
                }
                back = (*back).prev;
            }
        }
        debug!(
            component = "queue",
            event = "shuffle",
            size = n,
            swaps,
            "queue shuffled"
        );
    }
}
