//! Stable bottom-up merge sort over the intrusive list.
//
// The list is opened into a NULL-terminated chain through `next`. Elements are
// pushed one at a time onto a stack of pending sorted runs, chained through
// `prev`. Run sizes are powers of two, and the bits of the element count decide
// when the two newest equal-sized runs merge, like carries in a binary counter.
// At most O(log n) runs are pending; the only extra state is a few pointers.
// A final pass collapses the stack and restores the `prev` links.

use std::cmp::Ordering;
use std::mem;
use std::ptr;

use tracing::debug;

use super::element::value_of;
use super::link::{self, Link};
use super::queue::Queue;

impl Queue {
    /// Sorts by payload in lexicographic byte order. Equal payloads keep their
    /// relative order when ascending; descending is the ascending result
    /// reversed.
    pub fn sort(&mut self, descending: bool) {
        let size = self.merge_sort(&mut |a: &str, b: &str| a.cmp(b));
        if descending {
            self.reverse();
        }
        debug!(
            component = "queue",
            event = "sort",
            size,
            descending,
            "queue sorted"
        );
    }

    /// Stable sort with a caller-supplied payload comparator.
    ///
    /// If `compare` panics the queue is left empty and its elements are leaked.
    pub fn sort_by<F>(&mut self, mut compare: F)
    where
        F: FnMut(&str, &str) -> Ordering,
    {
        self.merge_sort(&mut compare);
    }

    fn merge_sort<F>(&mut self, compare: &mut F) -> usize
    where
        F: FnMut(&str, &str) -> Ordering,
    {
        let head = self.head_ptr();
        unsafe {
            if link::is_empty(head) {
                return 0;
            }
            if link::is_singular(head) {
                return 1;
            }

            let guard = Detached { head };

            (*(*head).prev).next = ptr::null_mut();
            let mut list = (*head).next;
            let mut pending: *mut Link = ptr::null_mut();
            let mut count = 0usize;

            loop {
                let mut tail: *mut *mut Link = ptr::addr_of_mut!(pending);
                let mut bits = count;
                while bits & 1 == 1 {
                    tail = ptr::addr_of_mut!((**tail).prev);
                    bits >>= 1;
                }
                // Merge the two newest runs of equal size; the older one goes
                // first so ties keep their original order.
                if bits != 0 {
                    let newer = *tail;
                    let older = (*newer).prev;
                    let merged = merge(compare, older, newer);
                    (*merged).prev = (*older).prev;
                    *tail = merged;
                }

                (*list).prev = pending;
                pending = list;
                list = (*list).next;
                (*pending).next = ptr::null_mut();
                count += 1;

                if list.is_null() {
                    break;
                }
            }

            let mut list = pending;
            pending = (*pending).prev;
            while !pending.is_null() {
                let older = (*pending).prev;
                list = merge(compare, pending, list);
                pending = older;
            }

            mem::forget(guard);
            relink(head, list);
            count
        }
    }
}

/// Resets the sentinel to empty if a comparator unwinds mid-sort, so the
/// queue never points into a half-merged chain. The elements are leaked.
struct Detached {
    head: *mut Link,
}

impl Drop for Detached {
    fn drop(&mut self) {
        unsafe { link::init(self.head) };
    }
}

/// Merges two NULL-terminated sorted chains, touching only `next`.
/// `a` holds the earlier elements and wins ties.
unsafe fn merge<F>(compare: &mut F, mut a: *mut Link, mut b: *mut Link) -> *mut Link
where
    F: FnMut(&str, &str) -> Ordering,
{
    let mut head: *mut Link = ptr::null_mut();
    let mut tail: *mut *mut Link = ptr::addr_of_mut!(head);
    loop {
        if compare(value_of(a), value_of(b)) != Ordering::Greater {
            *tail = a;
            tail = ptr::addr_of_mut!((*a).next);
            a = (*a).next;
            if a.is_null() {
                *tail = b;
                break;
            }
        } else {
            *tail = b;
            tail = ptr::addr_of_mut!((*b).next);
            b = (*b).next;
            if b.is_null() {
                *tail = a;
                break;
            }
        }
    }
    head
}

/// Rebuilds `prev` along a NULL-terminated chain and closes it around `head`.
unsafe fn relink(head: *mut Link, list: *mut Link) {
    let mut prev = head;
    let mut node = list;
    (*head).next = list;
    while !node.is_null() {
        (*node).prev = prev;
        prev = node;
        node = (*node).next;
    }
    (*prev).next = head;
    (*head).prev = prev;
}
