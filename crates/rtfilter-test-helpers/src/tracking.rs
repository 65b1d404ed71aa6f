//! Allocation tracking for sample-path tests.
//!
//! `update` must never touch the heap. Register [`TrackingAllocator`] as the
//! global allocator of a test binary, open a guard around the calls under
//! test, then check it with [`assert_no_alloc!`](crate::assert_no_alloc).
//!
//! Counters are thread-local, so parallel tests in the same binary do not
//! see each other's allocations.

use std::alloc::{GlobalAlloc, Layout, System};
use std::cell::Cell;

thread_local! {
    static ALLOCATION_COUNT: Cell<usize> = const { Cell::new(0) };
    static ALLOCATION_BYTES: Cell<usize> = const { Cell::new(0) };
    static TRACKING_DEPTH: Cell<usize> = const { Cell::new(0) };
}

/// System allocator wrapper that counts allocations while a guard is open.
pub struct TrackingAllocator;

fn tracking_enabled() -> bool {
    TRACKING_DEPTH.with(|d| d.get() > 0)
}

fn record(bytes: usize) {
    ALLOCATION_COUNT.with(|count| count.set(count.get().saturating_add(1)));
    ALLOCATION_BYTES.with(|total| total.set(total.get().saturating_add(bytes)));
}

// SAFETY: every method forwards to `System` with the caller's arguments and
// only adds thread-local bookkeeping that never allocates.
unsafe impl GlobalAlloc for TrackingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        // SAFETY: forwarded verbatim; caller upholds `GlobalAlloc::alloc` contract.
        let ptr = unsafe { System.alloc(layout) };
        if !ptr.is_null() && tracking_enabled() {
            record(layout.size());
        }
        ptr
    }

    unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
        // SAFETY: forwarded verbatim; caller upholds `GlobalAlloc::alloc_zeroed` contract.
        let ptr = unsafe { System.alloc_zeroed(layout) };
        if !ptr.is_null() && tracking_enabled() {
            record(layout.size());
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        // SAFETY: `ptr` was produced by this allocator with `layout`.
        unsafe { System.dealloc(ptr, layout) };
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        // SAFETY: `ptr` was produced by this allocator with `layout`.
        let new_ptr = unsafe { System.realloc(ptr, layout, new_size) };
        if !new_ptr.is_null() && tracking_enabled() {
            record(new_size.saturating_sub(layout.size()));
        }
        new_ptr
    }
}

/// Scope during which allocations on the current thread are counted.
pub struct AllocationGuard {
    start_count: usize,
    start_bytes: usize,
}

impl AllocationGuard {
    /// Open a guard; counting stops when the last open guard drops.
    pub fn new() -> Self {
        TRACKING_DEPTH.with(|d| d.set(d.get().saturating_add(1)));
        Self {
            start_count: ALLOCATION_COUNT.with(Cell::get),
            start_bytes: ALLOCATION_BYTES.with(Cell::get),
        }
    }

    /// Allocations observed since the guard opened.
    pub fn allocations(&self) -> usize {
        ALLOCATION_COUNT
            .with(Cell::get)
            .saturating_sub(self.start_count)
    }

    /// Bytes requested since the guard opened.
    pub fn bytes(&self) -> usize {
        ALLOCATION_BYTES
            .with(Cell::get)
            .saturating_sub(self.start_bytes)
    }

    /// True if anything was allocated inside the guard.
    pub fn has_allocations(&self) -> bool {
        self.allocations() > 0
    }
}

impl Default for AllocationGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for AllocationGuard {
    fn drop(&mut self) {
        TRACKING_DEPTH.with(|d| d.set(d.get().saturating_sub(1)));
    }
}

/// Start counting allocations on the current thread.
pub fn track() -> AllocationGuard {
    AllocationGuard::new()
}

/// Fail the test if the guard observed any allocation.
#[macro_export]
macro_rules! assert_no_alloc {
    ($guard:expr) => {
        $crate::assert_no_alloc!($guard, "sample path")
    };
    ($guard:expr, $context:expr) => {
        let guard = &$guard;
        let allocs = guard.allocations();
        if allocs > 0 {
            panic!(
                "allocation in '{}': {} allocations ({} bytes) at {}:{}",
                $context,
                allocs,
                guard.bytes(),
                file!(),
                line!()
            );
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_no_allocations() {
        let guard = track();
        let x = 42;
        let _y = x + 1;
        assert_no_alloc!(guard);
    }

    #[test]
    #[should_panic(expected = "allocation in 'vec'")]
    fn test_guard_with_allocations() {
        let guard = track();
        let v: Vec<i32> = vec![1, 2, 3];
        std::hint::black_box(&v);
        assert_no_alloc!(guard, "vec");
    }

    #[test]
    fn test_guard_counts_bytes() {
        let guard = track();
        let v: Vec<u64> = vec![0; 16];
        std::hint::black_box(&v);
        assert!(guard.allocations() > 0);
        assert!(guard.bytes() >= 128);
    }

    #[test]
    fn test_nested_guards_keep_tracking() {
        let outer = track();
        {
            let inner = track();
            assert_no_alloc!(inner);
        }
        let v: Vec<i32> = vec![1];
        std::hint::black_box(&v);
        assert!(outer.has_allocations());
    }
}
