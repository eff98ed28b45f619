//! String queue over the intrusive circular list.

use std::fmt;
use std::marker::PhantomData;
use std::ptr::NonNull;

use super::element::{node_of, try_box, value_of, Element, Node};
use super::error::QueueError;
use super::link::{self, Link};
use super::reorder::PartialBlock;

/// Per-queue behaviour knobs. Built from [`crate::config::Config::settings`]
/// or left at their defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Settings {
    /// What `reverse_k` does with a trailing block shorter than `k`.
    pub partial_block: PartialBlock,
}

/// Queue of owned strings kept in a sentinel-anchored circular doubly-linked
/// list. The sentinel is heap-allocated so its address is stable while the
/// `Queue` value itself moves around.
pub struct Queue {
    head: NonNull<Link>,
    settings: Settings,
    _owns: PhantomData<Box<Node>>,
}

// Safety: Queue exclusively owns the sentinel and every node reachable from
// it; no pointer into the list escapes except through `&self`/`&mut self`.
unsafe impl Send for Queue {}
unsafe impl Sync for Queue {}

impl Queue {
    /// Creates an empty queue. Fails only if the sentinel cannot be allocated.
    pub fn new() -> Result<Self, QueueError> {
        Self::with_settings(Settings::default())
    }

    pub fn with_settings(settings: Settings) -> Result<Self, QueueError> {
        let head = try_box("sentinel", Link::detached())?;
        // SAFETY: freshly allocated, not shared.
        unsafe { link::init(head.as_ptr()) };
        Ok(Queue {
            head,
            settings,
            _owns: PhantomData,
        })
    }

    /// Builds a queue by inserting every value at the tail, in order.
    pub fn try_from_iter<I, S>(values: I) -> Result<Self, QueueError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut q = Self::new()?;
        for v in values {
            q.insert_tail(v.as_ref())?;
        }
        Ok(q)
    }

    pub fn settings(&self) -> Settings {
        self.settings
    }

    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    #[inline]
    pub(crate) fn head_ptr(&self) -> *mut Link {
        self.head.as_ptr()
    }

    /// Inserts a copy of `s` at the head.
    pub fn insert_head(&mut self, s: &str) -> Result<(), QueueError> {
        let node = Node::alloc(s)?;
        // SAFETY: node is detached; head is a consistent list.
        unsafe { link::add(node.as_ptr().cast(), self.head_ptr()) };
        Ok(())
    }

    /// Inserts a copy of `s` at the tail.
    pub fn insert_tail(&mut self, s: &str) -> Result<(), QueueError> {
        let node = Node::alloc(s)?;
        // SAFETY: node is detached; head is a consistent list.
        unsafe { link::add_tail(node.as_ptr().cast(), self.head_ptr()) };
        Ok(())
    }

    /// Unlinks the first element and hands it to the caller.
    pub fn remove_head(&mut self) -> Option<Element> {
        let head = self.head_ptr();
        unsafe {
            if link::is_empty(head) {
                return None;
            }
            let first = (*head).next;
            link::del(first);
            Some(Element::from_unlinked(first))
        }
    }

    /// Unlinks the last element and hands it to the caller.
    pub fn remove_tail(&mut self) -> Option<Element> {
        let head = self.head_ptr();
        unsafe {
            if link::is_empty(head) {
                return None;
            }
            let last = (*head).prev;
            link::del(last);
            Some(Element::from_unlinked(last))
        }
    }

    /// Number of elements. O(n).
    pub fn size(&self) -> usize {
        let head = self.head_ptr();
        let mut n = 0;
        unsafe {
            let mut cur = (*head).next;
            while cur != head {
                n += 1;
                cur = (*cur).next;
            }
        }
        n
    }

    pub fn is_empty(&self) -> bool {
        unsafe { link::is_empty(self.head_ptr()) }
    }

    /// Exactly one element.
    pub fn is_singular(&self) -> bool {
        unsafe { link::is_singular(self.head_ptr()) }
    }

    pub fn first(&self) -> Option<&str> {
        let head = self.head_ptr();
        unsafe {
            if link::is_empty(head) {
                None
            } else {
                Some(value_of((*head).next))
            }
        }
    }

    pub fn last(&self) -> Option<&str> {
        let head = self.head_ptr();
        unsafe {
            if link::is_empty(head) {
                None
            } else {
                Some(value_of((*head).prev))
            }
        }
    }

    /// Payloads from head to tail.
    pub fn iter(&self) -> Iter<'_> {
        let head = self.head_ptr();
        Iter {
            head,
            // SAFETY: head is a consistent list.
            cur: unsafe { (*head).next },
            _queue: PhantomData,
        }
    }

    /// Deletes the middle element: index `(n - 1) / 2`, which is the lower of
    /// the two central elements when `n` is even.
    /// Returns false on an empty queue.
    pub fn delete_mid(&mut self) -> bool {
        let head = self.head_ptr();
        unsafe {
            if link::is_empty(head) {
                return false;
            }
            let mut slow = (*head).next;
            let mut fast = (*slow).next;
            while fast != head && (*fast).next != head {
                slow = (*slow).next;
                fast = (*(*fast).next).next;
            }
            link::del(slow);
            Node::release(node_of(slow));
        }
        true
    }

    /// Deletes every element whose value appears more than once in a row,
    /// including the first occurrence. Expects sorted input so equal values
    /// are adjacent. Returns false on an empty queue.
    pub fn delete_dup(&mut self) -> bool {
        let head = self.head_ptr();
        unsafe {
            if link::is_empty(head) {
                return false;
            }
            let mut in_run = false;
            let mut entry = (*head).next;
            while entry != head {
                let next = (*entry).next;
                let same = next != head && value_of(next) == value_of(entry);
                if same || in_run {
                    in_run = same;
                    link::del(entry);
                    Node::release(node_of(entry));
                }
                entry = next;
            }
        }
        true
    }

    /// Swaps every two adjacent elements. An odd trailing element stays put.
    pub fn swap(&mut self) {
        let head = self.head_ptr();
        unsafe {
            let mut first = (*head).next;
            while first != head && (*first).next != head {
                link::move_after(first, (*first).next);
                first = (*first).next;
            }
        }
    }

    /// Checks the circular-list invariants: every `next` has a matching
    /// `prev`, and walking `next` from the sentinel returns to it.
    pub fn is_consistent(&self) -> bool {
        let head = self.head_ptr();
        unsafe {
            let mut cur = head;
            loop {
                let next = (*cur).next;
                if next.is_null() || (*next).prev != cur {
                    return false;
                }
                if next == head {
                    return true;
                }
                cur = next;
            }
        }
    }

    /// Releases every element, leaving the queue empty.
    pub fn clear(&mut self) {
        let head = self.head_ptr();
        unsafe {
            let mut cur = (*head).next;
            while cur != head {
                let next = (*cur).next;
                Node::release(node_of(cur));
                cur = next;
            }
            link::init(head);
        }
    }
}

impl Drop for Queue {
    fn drop(&mut self) {
        self.clear();
        // SAFETY: sentinel came from try_box and nothing links to it anymore.
        unsafe { drop(Box::from_raw(self.head.as_ptr())) };
    }
}

impl fmt::Debug for Queue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Borrowing traversal over payloads, head to tail.
pub struct Iter<'a> {
    head: *mut Link,
    cur: *mut Link,
    _queue: PhantomData<&'a Queue>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.cur == self.head {
            return None;
        }
        // SAFETY: the queue is borrowed for 'a, so cur is a live node.
        unsafe {
            let v = value_of(self.cur);
            self.cur = (*self.cur).next;
            Some(v)
        }
    }
}

impl<'a> IntoIterator for &'a Queue {
    type Item = &'a str;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}
