//! Monotonic filters: keep only the suffix extrema of a queue.

use std::cmp::Ordering;

use tracing::debug;

use super::element::{node_of, value_of, Node};
use super::link;
use super::queue::Queue;

impl Queue {
    /// Removes every element that has a strictly smaller value somewhere
    /// after it. What remains is non-decreasing. Returns the new size.
    pub fn keep_ascending(&mut self) -> usize {
        self.keep_suffix_extrema(Ordering::Greater, "keep_ascending")
    }

    /// Removes every element that has a strictly greater value somewhere
    /// after it. What remains is non-increasing. Returns the new size.
    pub fn keep_descending(&mut self) -> usize {
        self.keep_suffix_extrema(Ordering::Less, "keep_descending")
    }

    /// Single pass from the tail. `best` is the running extremum; an element
    /// ordering `dominated` against it is deleted, anything else becomes the
    /// new extremum.
    fn keep_suffix_extrema(&mut self, dominated: Ordering, event: &'static str) -> usize {
        let head = self.head_ptr();
        unsafe {
            if link::is_empty(head) {
                return 0;
            }
            if link::is_singular(head) {
                return 1;
            }

            let mut kept = 0usize;
            let mut removed = 0usize;
            let mut cur = (*head).prev;
            let mut best = cur;
            while cur != head {
                let prev = (*cur).prev;
                if value_of(cur).cmp(value_of(best)) == dominated {
                    link::del(cur);
                    Node::release(node_of(cur));
                    removed += 1;
                } else {
                    best = cur;
                    kept += 1;
                }
                cur = prev;
            }

            debug!(component = "queue", event, kept, removed, "monotonic filter applied");
            kept
        }
    }
}
