// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Two-tier pooling of per-query search state.
//!
//! The outer [`ScratchRegistry`] is a synchronized free list handing one
//! [`QueryScratch`] to each in-flight query; the scratch itself is then used
//! without synchronization for the duration of that query. Checkout returns
//! an RAII guard so the scratch is cleared and returned on every exit path,
//! including early termination. Queue items are plain `Copy` values living
//! inline in the scratch's heap buffer, so recycling the container recycles
//! the items: repeated queries allocate nothing once the buffers have grown
//! to their working size.

use core::cmp::Ordering;
use core::ops::{Deref, DerefMut};
use std::collections::BinaryHeap;

use parking_lot::Mutex;

/// Frontier entry of the branch-and-bound search: an arena node index plus
/// its lower-bound squared distance to the query point.
#[derive(Copy, Clone, Debug)]
pub(crate) struct SearchItem {
    pub(crate) dist_sq: f64,
    pub(crate) node: usize,
}

// Ordered by descending bound so `BinaryHeap` pops the smallest bound first.
// `total_cmp` keeps the order total; NaN bounds cannot be produced by the
// distance math on finite inputs.
impl PartialEq for SearchItem {
    fn eq(&self, other: &Self) -> bool {
        self.dist_sq.total_cmp(&other.dist_sq) == Ordering::Equal
    }
}

impl Eq for SearchItem {}

impl PartialOrd for SearchItem {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SearchItem {
    fn cmp(&self, other: &Self) -> Ordering {
        other.dist_sq.total_cmp(&self.dist_sq)
    }
}

/// Reusable per-query search state: the priority queue of frontier items.
#[derive(Debug, Default)]
pub(crate) struct QueryScratch {
    pub(crate) queue: BinaryHeap<SearchItem>,
}

impl QueryScratch {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            queue: BinaryHeap::with_capacity(capacity),
        }
    }
}

/// Synchronized registry of idle [`QueryScratch`] values.
pub(crate) struct ScratchRegistry {
    idle: Mutex<Vec<QueryScratch>>,
    /// Heap capacity for newly created scratches; an upper bound on the live
    /// frontier of a balanced traversal (tree height x fan-out).
    initial_capacity: usize,
}

impl ScratchRegistry {
    pub(crate) fn new() -> Self {
        Self {
            idle: Mutex::new(Vec::new()),
            initial_capacity: 0,
        }
    }

    /// Set the capacity heuristic once the tree shape is known. Existing idle
    /// scratches are re-seeded so pre-load checkouts don't linger undersized.
    pub(crate) fn set_capacity(&mut self, capacity: usize) {
        self.initial_capacity = capacity;
        self.idle.get_mut().clear();
    }

    /// Check out a scratch, creating one if the free list is empty.
    pub(crate) fn acquire(&self) -> ScratchGuard<'_> {
        let scratch = self
            .idle
            .lock()
            .pop()
            .unwrap_or_else(|| QueryScratch::with_capacity(self.initial_capacity));
        ScratchGuard {
            registry: self,
            scratch: Some(scratch),
        }
    }

    fn release(&self, mut scratch: QueryScratch) {
        // Drains any leftover frontier items; the buffer keeps its capacity.
        scratch.queue.clear();
        self.idle.lock().push(scratch);
    }

    pub(crate) fn stats(&self) -> PoolStats {
        let idle = self.idle.lock();
        PoolStats {
            idle: idle.len(),
            queue_capacity: idle.iter().map(|s| s.queue.capacity()).sum(),
        }
    }
}

impl core::fmt::Debug for ScratchRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ScratchRegistry")
            .field("initial_capacity", &self.initial_capacity)
            .finish_non_exhaustive()
    }
}

/// RAII checkout of one [`QueryScratch`]; returns it to the registry on drop.
pub(crate) struct ScratchGuard<'a> {
    registry: &'a ScratchRegistry,
    scratch: Option<QueryScratch>,
}

impl Deref for ScratchGuard<'_> {
    type Target = QueryScratch;

    fn deref(&self) -> &QueryScratch {
        // Only `drop` takes the scratch out.
        self.scratch.as_ref().expect("scratch taken before drop")
    }
}

impl DerefMut for ScratchGuard<'_> {
    fn deref_mut(&mut self) -> &mut QueryScratch {
        self.scratch.as_mut().expect("scratch taken before drop")
    }
}

impl Drop for ScratchGuard<'_> {
    fn drop(&mut self) {
        if let Some(scratch) = self.scratch.take() {
            self.registry.release(scratch);
        }
    }
}

impl core::fmt::Debug for ScratchGuard<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ScratchGuard").finish_non_exhaustive()
    }
}

/// Snapshot of pool occupancy, for sizing checks.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PoolStats {
    /// Number of idle scratches in the registry.
    pub idle: usize,
    /// Total frontier-queue capacity held by idle scratches, in items.
    pub queue_capacity: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn min_heap_order_on_bounds() {
        let mut heap = BinaryHeap::new();
        heap.push(SearchItem { dist_sq: 4.0, node: 1 });
        heap.push(SearchItem { dist_sq: 1.0, node: 2 });
        heap.push(SearchItem { dist_sq: 2.5, node: 3 });
        let order: Vec<usize> = core::iter::from_fn(|| heap.pop().map(|i| i.node)).collect();
        assert_eq!(order, vec![2, 3, 1]);
    }

    #[test]
    fn guard_returns_scratch_on_drop() {
        let mut registry = ScratchRegistry::new();
        registry.set_capacity(16);
        assert_eq!(registry.stats().idle, 0);
        {
            let mut guard = registry.acquire();
            guard.queue.push(SearchItem { dist_sq: 0.0, node: 0 });
            assert_eq!(registry.stats().idle, 0);
        }
        let stats = registry.stats();
        assert_eq!(stats.idle, 1);
        assert!(stats.queue_capacity >= 16);
        // The returned scratch comes back empty.
        let guard = registry.acquire();
        assert!(guard.queue.is_empty());
    }

    #[test]
    fn concurrent_checkouts_get_distinct_scratches() {
        let mut registry = ScratchRegistry::new();
        registry.set_capacity(4);
        let a = registry.acquire();
        let b = registry.acquire();
        drop(a);
        drop(b);
        assert_eq!(registry.stats().idle, 2);
        // Sequential reuse drains the free list back to one.
        drop(registry.acquire());
        assert_eq!(registry.stats().idle, 2);
    }
}
