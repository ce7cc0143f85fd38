// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-place bucket partial sort over one coordinate axis.
//!
//! The bulk loader never needs a total order, only contiguous buckets where
//! every point in bucket `i` is `<=` (on the chosen axis) every point in
//! bucket `i + 1`. We resolve exactly the bucket boundaries with repeated
//! order-statistic selection, which is O(n) expected per build level instead
//! of a full O(n log n) sort.

use crate::points::PointSource;

/// Coordinate axis selector for the partial sorter.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Axis {
    X,
    Y,
}

#[inline]
fn key<P: PointSource>(points: &P, i: usize, axis: Axis) -> f64 {
    let (x, y) = points.point_at(i);
    match axis {
        Axis::X => x,
        Axis::Y => y,
    }
}

/// Partition `[left, right)` of `points` into contiguous buckets of
/// `bucket` elements, ordered between buckets by `axis`. Order within a
/// bucket is unspecified.
pub(crate) fn bucket_partition<P: PointSource>(
    points: &mut P,
    left: usize,
    right: usize,
    bucket: usize,
    axis: Axis,
) {
    debug_assert!(bucket > 0, "bucket size must be positive");
    debug_assert!(left <= right);
    // Worklist of ranges still spanning more than one bucket. Each step
    // resolves the bucket-aligned midpoint boundary and re-queues both halves.
    let mut pending = vec![(left, right)];
    while let Some((lo, hi)) = pending.pop() {
        if hi - lo <= bucket {
            continue;
        }
        let half = ((hi - lo).div_ceil(bucket) / 2).max(1);
        let mid = lo + half * bucket;
        select_nth(points, mid, lo, hi, axis);
        pending.push((lo, mid));
        pending.push((mid, hi));
    }
}

/// Quickselect: after return, the point at `k` is in its sorted position
/// within `[lo, hi)` on `axis`, everything left of it is `<=`, everything
/// right of it is `>=`. Median-of-three pivoting, Lomuto partition.
fn select_nth<P: PointSource>(points: &mut P, k: usize, mut lo: usize, mut hi: usize, axis: Axis) {
    debug_assert!(lo <= k && k < hi);
    while hi - lo > 1 {
        if hi - lo == 2 {
            if key(points, lo, axis) > key(points, lo + 1, axis) {
                points.swap(lo, lo + 1);
            }
            return;
        }

        // Median of first, middle, last as the pivot; park it at hi - 1.
        let mid = lo + (hi - lo) / 2;
        let m = median_index(points, lo, mid, hi - 1, axis);
        if m != hi - 1 {
            points.swap(m, hi - 1);
        }

        let pivot = key(points, hi - 1, axis);
        let mut store = lo;
        for i in lo..hi - 1 {
            if key(points, i, axis) < pivot {
                points.swap(store, i);
                store += 1;
            }
        }
        points.swap(store, hi - 1);

        match k.cmp(&store) {
            core::cmp::Ordering::Equal => return,
            core::cmp::Ordering::Less => hi = store,
            core::cmp::Ordering::Greater => lo = store + 1,
        }
    }
}

fn median_index<P: PointSource>(points: &P, a: usize, b: usize, c: usize, axis: Axis) -> usize {
    let va = key(points, a, axis);
    let vb = key(points, b, axis);
    let vc = key(points, c, axis);
    if va < vb {
        if vb < vc {
            b
        } else if va < vc {
            c
        } else {
            a
        }
    } else if va < vc {
        a
    } else if vb < vc {
        c
    } else {
        b
    }
}
