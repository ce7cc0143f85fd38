// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Index `kurbo::Point` storage directly.
//!
//! The `kurbo` feature lets a `Vec<kurbo::Point>` back the tree without a
//! copy; the vector is permuted in place during the load.
//!
//! Run:
//! - `cargo run -p thicket_demos --example kurbo_points`

use kurbo::Point;
use thicket_tree::RTree;

fn main() {
    let points: Vec<Point> = (0..100)
        .map(|i| Point::new(f64::from(i % 10) * 3.0, f64::from(i / 10) * 3.0))
        .collect();

    let mut tree = RTree::new();
    tree.load(points).expect("fresh tree");

    let cursor = Point::new(13.2, 16.8);
    let hit = tree.nearest(cursor.x, cursor.y).expect("non-empty tree");
    println!(
        "nearest grid point to {cursor:?}: ({}, {}) at distance {:.3}",
        hit.x, hit.y, hit.distance
    );
}
