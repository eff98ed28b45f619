//! Element storage: a string payload with an embedded list link.

use std::alloc::{self, Layout};
use std::fmt;
use std::ptr::NonNull;

use tracing::warn;

use super::error::QueueError;
use super::link::Link;

/// List node. `link` must stay the first field so a `*mut Link` taken from a
/// list can be cast back to the node that embeds it.
#[repr(C)]
pub(crate) struct Node {
    pub(crate) link: Link,
    pub(crate) value: String,
}

impl Node {
    /// Allocates a node holding a full copy of `s`.
    /// On failure nothing is leaked: the payload is released before returning.
    pub(crate) fn alloc(s: &str) -> Result<NonNull<Node>, QueueError> {
        let mut value = String::new();
        if value.try_reserve_exact(s.len()).is_err() {
            warn!(
                component = "queue",
                event = "alloc_failed",
                what = "payload",
                size = s.len(),
                "element payload allocation failed"
            );
            return Err(QueueError::Allocation {
                what: "payload",
                size: s.len(),
            });
        }
        value.push_str(s);

        let node = try_box(
            "element",
            Node {
                link: Link::detached(),
                value,
            },
        )?;
        Ok(node)
    }

    /// Releases a node that is no longer linked anywhere.
    pub(crate) unsafe fn release(node: *mut Node) {
        drop(Box::from_raw(node));
    }
}

/// Heap-allocates `value`, reporting allocation failure instead of aborting.
/// The returned pointer is compatible with `Box::from_raw`.
pub(crate) fn try_box<T>(what: &'static str, value: T) -> Result<NonNull<T>, QueueError> {
    let layout = Layout::new::<T>();
    debug_assert!(layout.size() > 0);

    // SAFETY: layout has non-zero size (both Link and Node do).
    let raw = unsafe { alloc::alloc(layout) } as *mut T;
    match NonNull::new(raw) {
        Some(ptr) => {
            // SAFETY: freshly allocated with the layout of T.
            unsafe { ptr.as_ptr().write(value) };
            Ok(ptr)
        }
        None => {
            warn!(
                component = "queue",
                event = "alloc_failed",
                what,
                size = layout.size(),
                "node allocation failed"
            );
            Err(QueueError::Allocation {
                what,
                size: layout.size(),
            })
        }
    }
}

/// Recovers the node a list link is embedded in.
#[inline]
pub(crate) fn node_of(link: *mut Link) -> *mut Node {
    link.cast::<Node>()
}

/// Borrows the payload of the node embedding `link`.
///
/// # Safety
/// `link` must belong to a live node (never a sentinel), and the returned
/// borrow must not outlive that node.
#[inline]
pub(crate) unsafe fn value_of<'a>(link: *mut Link) -> &'a str {
    (*node_of(link)).value.as_str()
}

/// An element removed from a queue. Owns its payload and node; dropping it
/// releases both.
pub struct Element {
    node: NonNull<Node>,
}

// Safety: an Element exclusively owns its node, which is no longer reachable
// from any list.
unsafe impl Send for Element {}
unsafe impl Sync for Element {}

impl Element {
    /// Takes ownership of a node that was just unlinked.
    pub(crate) unsafe fn from_unlinked(link: *mut Link) -> Self {
        Element {
            node: NonNull::new_unchecked(node_of(link)),
        }
    }

    pub fn value(&self) -> &str {
        // SAFETY: the node is owned by self and alive until drop.
        unsafe { self.node.as_ref().value.as_str() }
    }

    /// Consumes the element, returning its payload without copying it.
    pub fn into_value(self) -> String {
        let node = self.node;
        std::mem::forget(self);
        // SAFETY: ownership moved out of the forgotten handle.
        let node = unsafe { Box::from_raw(node.as_ptr()) };
        node.value
    }

    /// Copies the payload into `buf` C-style: at most `buf.len() - 1` bytes,
    /// then a NUL terminator. Returns the number of payload bytes copied.
    /// An empty buffer is left untouched.
    pub fn copy_to(&self, buf: &mut [u8]) -> usize {
        if buf.is_empty() {
            return 0;
        }
        let src = self.value().as_bytes();
        let n = src.len().min(buf.len() - 1);
        buf[..n].copy_from_slice(&src[..n]);
        buf[n] = 0;
        n
    }

    /// Explicit release; equivalent to dropping the element.
    pub fn release(self) {
        drop(self);
    }
}

impl Drop for Element {
    fn drop(&mut self) {
        // SAFETY: the node came from Node::alloc and is owned by self.
        unsafe { Node::release(self.node.as_ptr()) };
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element").field("value", &self.value()).finish()
    }
}

impl PartialEq<str> for Element {
    fn eq(&self, other: &str) -> bool {
        self.value() == other
    }
}

impl PartialEq<&str> for Element {
    fn eq(&self, other: &&str) -> bool {
        self.value() == *other
    }
}
