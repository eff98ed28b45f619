//! Circular doubly-linked list primitive with a sentinel head.
//
// Every list is anchored by a sentinel `Link` that never carries a payload:
// - empty:    head.next == head.prev == head
// - singular: head.next == head.prev != head
//
// All functions operate on raw pointers and are O(1). Callers guarantee that
// every link passed in belongs to a consistent circular list (or is detached,
// for the link being inserted). Every function leaves the lists it touches
// consistent again.

use std::ptr;

/// Intrusive list link. Embedded as the first field of a node, or allocated
/// alone as a list sentinel.
#[repr(C)]
#[derive(Debug)]
pub(crate) struct Link {
    pub(crate) next: *mut Link,
    pub(crate) prev: *mut Link,
}

impl Link {
    /// A detached link. Must go through [`init`] or an insert before use.
    pub(crate) const fn detached() -> Self {
        Link {
            next: ptr::null_mut(),
            prev: ptr::null_mut(),
        }
    }
}

/// Turns `head` into an empty list.
pub(crate) unsafe fn init(head: *mut Link) {
    (*head).next = head;
    (*head).prev = head;
}

unsafe fn insert_between(new: *mut Link, prev: *mut Link, next: *mut Link) {
    (*next).prev = new;
    (*new).next = next;
    (*new).prev = prev;
    (*prev).next = new;
}

/// Inserts `new` right after `head`.
pub(crate) unsafe fn add(new: *mut Link, head: *mut Link) {
    insert_between(new, head, (*head).next);
}

/// Inserts `new` right before `head`, i.e. at the tail of the list `head` anchors.
pub(crate) unsafe fn add_tail(new: *mut Link, head: *mut Link) {
    insert_between(new, (*head).prev, head);
}

unsafe fn unlink(entry: *mut Link) {
    let prev = (*entry).prev;
    let next = (*entry).next;
    (*next).prev = prev;
    (*prev).next = next;
}

/// Connects the neighbours of `entry` and detaches it.
pub(crate) unsafe fn del(entry: *mut Link) {
    unlink(entry);
    (*entry).next = ptr::null_mut();
    (*entry).prev = ptr::null_mut();
}

/// Unlinks `entry` and reinserts it right after `head`.
pub(crate) unsafe fn move_after(entry: *mut Link, head: *mut Link) {
    unlink(entry);
    add(entry, head);
}

/// Unlinks `entry` and reinserts it right before `head`.
pub(crate) unsafe fn move_tail(entry: *mut Link, head: *mut Link) {
    unlink(entry);
    add_tail(entry, head);
}

/// No elements: `head` links to itself.
pub(crate) unsafe fn is_empty(head: *const Link) -> bool {
    (*head).next as *const Link == head
}

/// Exactly one element.
pub(crate) unsafe fn is_singular(head: *const Link) -> bool {
    !is_empty(head) && (*head).next == (*head).prev
}

unsafe fn splice_between(list: *mut Link, prev: *mut Link, next: *mut Link) {
    let first = (*list).next;
    let last = (*list).prev;

    (*first).prev = prev;
    (*prev).next = first;

    (*last).next = next;
    (*next).prev = last;
}

/// Moves every element of `list` to the front of `head`.
/// `list` itself is left stale; reinitialize it before reuse.
pub(crate) unsafe fn splice(list: *mut Link, head: *mut Link) {
    if !is_empty(list) {
        splice_between(list, head, (*head).next);
    }
}

/// Moves every element of `list` to the back of `head`.
/// `list` itself is left stale; reinitialize it before reuse.
pub(crate) unsafe fn splice_tail(list: *mut Link, head: *mut Link) {
    if !is_empty(list) {
        splice_between(list, (*head).prev, head);
    }
}

/// Like [`splice`], then empties `list`.
pub(crate) unsafe fn splice_init(list: *mut Link, head: *mut Link) {
    if !is_empty(list) {
        splice_between(list, head, (*head).next);
        init(list);
    }
}

/// Like [`splice_tail`], then empties `list`.
pub(crate) unsafe fn splice_tail_init(list: *mut Link, head: *mut Link) {
    if !is_empty(list) {
        splice_between(list, (*head).prev, head);
        init(list);
    }
}
