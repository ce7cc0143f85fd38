// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Nearest-point basics.
//!
//! Bulk load a small point set, then run unbounded and radius-bounded
//! nearest queries.
//!
//! Run:
//! - `cargo run -p thicket_demos --example nearest_basics`

use thicket_tree::RTree;

fn main() {
    let mut tree = RTree::new();
    tree.load(vec![
        (0.0, 0.0),
        (10.0, 10.0),
        (5.0, 5.0),
        (-3.0, 7.0),
        (12.0, -4.0),
    ])
    .expect("fresh tree");

    println!("indexed {} points, height {}", tree.len(), tree.height());

    let hit = tree.nearest(4.0, 4.0).expect("non-empty tree");
    println!(
        "nearest to (4, 4): ({}, {}) at distance {:.4}",
        hit.x, hit.y, hit.distance
    );

    // A radius bound prunes the search and may come back empty.
    match tree.nearest_within(100.0, 100.0, 1.0) {
        Some(hit) => println!("within radius: ({}, {})", hit.x, hit.y),
        None => println!("nothing within radius 1 of (100, 100)"),
    }
}
