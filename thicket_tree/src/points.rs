// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Point storage contract and provided implementations.
//!
//! The tree does not prescribe a point container. Anything that can report
//! its length, read a point by position, and swap two positions can back the
//! index; bulk loading permutes the storage in place through [`PointSource::swap`],
//! so positions change but the multiset of coordinate pairs is preserved.

/// Ordered, index-addressable, in-place-swappable sequence of 2D points.
pub trait PointSource {
    /// Number of points.
    fn len(&self) -> usize;

    /// True if the sequence holds no points.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The point at position `i`.
    fn point_at(&self, i: usize) -> (f64, f64);

    /// Swap the points at positions `i` and `j`.
    fn swap(&mut self, i: usize, j: usize);
}

/// Interleaved flat coordinate buffer: `[x0, y0, x1, y1, ...]`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FlatPoints(Vec<f64>);

impl FlatPoints {
    /// Wrap an interleaved coordinate buffer.
    ///
    /// # Panics
    ///
    /// Panics if `coords.len()` is odd.
    pub fn new(coords: Vec<f64>) -> Self {
        assert!(
            coords.len() % 2 == 0,
            "interleaved coordinate buffer must have even length"
        );
        Self(coords)
    }

    /// Consume the wrapper and return the (possibly permuted) buffer.
    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }
}

impl PointSource for FlatPoints {
    fn len(&self) -> usize {
        self.0.len() / 2
    }

    fn point_at(&self, i: usize) -> (f64, f64) {
        (self.0[2 * i], self.0[2 * i + 1])
    }

    fn swap(&mut self, i: usize, j: usize) {
        self.0.swap(2 * i, 2 * j);
        self.0.swap(2 * i + 1, 2 * j + 1);
    }
}

impl PointSource for Vec<(f64, f64)> {
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn point_at(&self, i: usize) -> (f64, f64) {
        self[i]
    }

    fn swap(&mut self, i: usize, j: usize) {
        self.as_mut_slice().swap(i, j);
    }
}

#[cfg(feature = "kurbo")]
impl PointSource for Vec<kurbo::Point> {
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn point_at(&self, i: usize) -> (f64, f64) {
        let p = self[i];
        (p.x, p.y)
    }

    fn swap(&mut self, i: usize, j: usize) {
        self.as_mut_slice().swap(i, j);
    }
}
