//! Chain of queue contexts and k-way merge across them.

use std::cmp::Ordering;
use std::ops::{Deref, DerefMut};
use std::ptr;

use tracing::debug;

use super::element::value_of;
use super::error::QueueError;
use super::link::{self, Link};
use super::queue::{Queue, Settings};

/// A queue together with its identifier and cached size, as held in a
/// [`QueueChain`].
#[derive(Debug)]
pub struct QueueContext {
    id: usize,
    queue: Queue,
    size: usize,
}

impl QueueContext {
    pub fn new(id: usize, queue: Queue) -> Self {
        let size = queue.size();
        QueueContext { id, queue, size }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn queue(&self) -> &Queue {
        &self.queue
    }

    /// Mutable access to the queue. The cached size is recounted when the
    /// returned guard is dropped.
    pub fn queue_mut(&mut self) -> QueueMut<'_> {
        QueueMut { ctx: self }
    }

    /// Cached element count.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Recounts the queue and refreshes the cached size.
    pub fn sync_size(&mut self) -> usize {
        self.size = self.queue.size();
        self.size
    }
}

/// Borrow of a context's queue that refreshes the cached size on drop.
#[derive(Debug)]
pub struct QueueMut<'a> {
    ctx: &'a mut QueueContext,
}

impl Deref for QueueMut<'_> {
    type Target = Queue;

    fn deref(&self) -> &Queue {
        &self.ctx.queue
    }
}

impl DerefMut for QueueMut<'_> {
    fn deref_mut(&mut self) -> &mut Queue {
        &mut self.ctx.queue
    }
}

impl Drop for QueueMut<'_> {
    fn drop(&mut self) {
        self.ctx.sync_size();
    }
}

/// Ordered chain of queue contexts. New contexts get increasing ids.
#[derive(Debug, Default)]
pub struct QueueChain {
    contexts: Vec<QueueContext>,
    next_id: usize,
    settings: Settings,
}

impl QueueChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues created by [`QueueChain::push_new`] get these settings.
    pub fn with_settings(settings: Settings) -> Self {
        QueueChain {
            settings,
            ..Self::default()
        }
    }

    /// Appends a context holding a fresh empty queue.
    pub fn push_new(&mut self) -> Result<&mut QueueContext, QueueError> {
        let queue = Queue::with_settings(self.settings)?;
        Ok(self.push(queue))
    }

    /// Appends a context around an existing queue.
    pub fn push(&mut self, queue: Queue) -> &mut QueueContext {
        let id = self.next_id;
        self.next_id += 1;
        self.contexts.push(QueueContext::new(id, queue));
        let last = self.contexts.len() - 1;
        &mut self.contexts[last]
    }

    pub fn len(&self) -> usize {
        self.contexts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }

    pub fn get(&self, id: usize) -> Option<&QueueContext> {
        self.contexts.iter().find(|c| c.id == id)
    }

    pub fn get_mut(&mut self, id: usize) -> Option<&mut QueueContext> {
        self.contexts.iter_mut().find(|c| c.id == id)
    }

    pub fn first(&self) -> Option<&QueueContext> {
        self.contexts.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, QueueContext> {
        self.contexts.iter()
    }

    /// Sum of the cached sizes.
    pub fn total_size(&self) -> usize {
        self.contexts.iter().map(|c| c.size).sum()
    }

    /// Merges every queue into the first one. See [`merge`].
    pub fn merge(&mut self, descending: bool) -> usize {
        merge(&mut self.contexts, descending)
    }
}

/// Merges the already-sorted queues of `contexts` into the first context's
/// queue, pairwise and in chain order. Later queues end up empty with a cached
/// size of 0. Returns the number of elements in the merged queue.
///
/// With `descending`, every input must be sorted descending. On equal values
/// the element from the earlier queue comes first.
pub fn merge(contexts: &mut [QueueContext], descending: bool) -> usize {
    let Some((first, rest)) = contexts.split_first_mut() else {
        return 0;
    };

    let mut merged = 0usize;
    for ctx in rest.iter_mut() {
        // SAFETY: distinct queues, each exclusively borrowed.
        unsafe { merge2(first.queue.head_ptr(), ctx.queue.head_ptr(), descending) };
        ctx.size = 0;
        merged += 1;
    }

    first.size = first.queue.size();
    debug!(
        component = "queue",
        event = "merge",
        queues = merged + 1,
        size = first.size,
        descending,
        "queues merged"
    );
    first.size
}

/// Two-way merge of sorted lists `dst` and `src` into `dst`; `src` is left
/// empty. Only links move.
unsafe fn merge2(dst: *mut Link, src: *mut Link, descending: bool) {
    let mut out = Link::detached();
    let out_ptr = ptr::addr_of_mut!(out);
    link::init(out_ptr);

    while !link::is_empty(dst) && !link::is_empty(src) {
        let left = (*dst).next;
        let right = (*src).next;
        let take_left = match value_of(left).cmp(value_of(right)) {
            Ordering::Equal => true,
            Ordering::Less => !descending,
            Ordering::Greater => descending,
        };
        link::move_tail(if take_left { left } else { right }, out_ptr);
    }

    link::splice_tail_init(dst, out_ptr);
    link::splice_tail_init(src, out_ptr);
    // dst is empty at this point.
    link::splice_init(out_ptr, dst);
}
