// Test allocator that can be told to fail.
//
// Wraps the system allocator for the whole test binary. Failure injection and
// allocation counting are per thread, so parallel tests do not see each other.

use std::alloc::{GlobalAlloc, Layout, System};
use std::cell::Cell;
use std::ptr;

pub struct FailingAlloc;

#[global_allocator]
static GLOBAL: FailingAlloc = FailingAlloc;

thread_local! {
    // 0 = disarmed, n = the n-th allocation from now fails.
    static FAIL_IN: Cell<usize> = const { Cell::new(0) };
    static LIVE: Cell<isize> = const { Cell::new(0) };
}

/// Makes the `n`-th allocation on this thread (1-based) return null. Only one
/// allocation fails; later ones go through.
pub fn fail_nth_allocation(n: usize) {
    FAIL_IN.with(|c| c.set(n));
}

/// Cancels a pending failure that has not fired yet.
pub fn disarm() {
    FAIL_IN.with(|c| c.set(0));
}

/// Allocations minus deallocations made on this thread so far.
pub fn live_allocations() -> isize {
    LIVE.with(Cell::get)
}

fn should_fail() -> bool {
    FAIL_IN
        .try_with(|c| match c.get() {
            0 => false,
            1 => {
                c.set(0);
                true
            }
            n => {
                c.set(n - 1);
                false
            }
        })
        .unwrap_or(false)
}

fn track(delta: isize) {
    let _ = LIVE.try_with(|c| c.set(c.get() + delta));
}

unsafe impl GlobalAlloc for FailingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if should_fail() {
            return ptr::null_mut();
        }
        let p = System.alloc(layout);
        if !p.is_null() {
            track(1);
        }
        p
    }

    unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
        if should_fail() {
            return ptr::null_mut();
        }
        let p = System.alloc_zeroed(layout);
        if !p.is_null() {
            track(1);
        }
        p
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        track(-1);
        System.dealloc(ptr, layout)
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        System.realloc(ptr, layout, new_size)
    }
}
