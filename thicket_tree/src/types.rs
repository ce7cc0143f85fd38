// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Primitive geometry types and helpers.

/// Axis-aligned bounding box in 2D, `f64` coordinates.
///
/// Invariant: `min_x <= max_x` and `min_y <= max_y`. Leaf boxes are
/// degenerate (`min == max == the wrapped point`).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bbox {
    /// Minimum x (left)
    pub min_x: f64,
    /// Minimum y (top)
    pub min_y: f64,
    /// Maximum x (right)
    pub max_x: f64,
    /// Maximum y (bottom)
    pub max_y: f64,
}

impl Bbox {
    /// Create a new box from min/max corners.
    pub const fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Degenerate box wrapping a single point.
    pub const fn from_point(x: f64, y: f64) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x,
            max_y: y,
        }
    }

    /// Componentwise min/max merge of two boxes.
    ///
    /// Contract: commutative, associative, idempotent. This is the only
    /// property the tree relies on, so a vectorized drop-in is free to
    /// replace the body as long as it computes exactly this.
    #[inline]
    pub fn merge(a: Self, b: Self) -> Self {
        Self {
            min_x: a.min_x.min(b.min_x),
            min_y: a.min_y.min(b.min_y),
            max_x: a.max_x.max(b.max_x),
            max_y: a.max_y.max(b.max_y),
        }
    }

    /// Admissible squared-distance bounds from `(x, y)` to this box.
    ///
    /// Returns `(min_sq, max_sq)` where `min_sq` never overestimates the
    /// distance to the closest enclosed point and `max_sq` (distance to the
    /// farthest corner) bounds the distance to every enclosed point, so at
    /// least one point lies within `max_sq`.
    pub fn distance_bounds(&self, x: f64, y: f64) -> (f64, f64) {
        let (near_x, far_x) = sort2(
            (x - self.min_x) * (x - self.min_x),
            (x - self.max_x) * (x - self.max_x),
        );
        let (near_y, far_y) = sort2(
            (y - self.min_y) * (y - self.min_y),
            (y - self.max_y) * (y - self.max_y),
        );

        let side_x = (self.max_x - self.min_x) * (self.max_x - self.min_x);
        let side_y = (self.max_y - self.min_y) * (self.max_y - self.min_y);

        // The query point projects inside the box's span on an axis exactly
        // when the far edge distance on that axis is below the squared side.
        let min_sq = if far_x < side_x && far_y < side_y {
            // Inside the box.
            0.0
        } else if far_x < side_x {
            // In the vertical stripe: closest approach is straight up/down.
            near_y
        } else if far_y < side_y {
            // In the horizontal stripe.
            near_x
        } else {
            // Outside both spans: closest point is the nearest corner.
            near_x + near_y
        };
        (min_sq, far_x + far_y)
    }
}

#[inline]
fn sort2(a: f64, b: f64) -> (f64, f64) {
    if a > b { (b, a) } else { (a, b) }
}
