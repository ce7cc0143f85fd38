// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dump a built tree as GeoJSON.
//!
//! Prints a FeatureCollection of every node box, root first. Paste the
//! output into a GeoJSON viewer to see the packing.
//!
//! Run:
//! - `cargo run -p thicket_demos --example geojson_dump`

use thicket_tree::{Options, RTree};

fn main() {
    let points: Vec<(f64, f64)> = (0..40)
        .map(|i| {
            let t = f64::from(i) * 0.37;
            (t.cos() * (10.0 + f64::from(i)), t.sin() * (10.0 + f64::from(i)))
        })
        .collect();

    let mut tree = RTree::with_options(Options { max_entries: 4 }).expect("valid fan-out");
    tree.load(points).expect("fresh tree");

    let json = thicket_geojson::to_geojson_string(&tree).expect("finite coordinates");
    println!("{json}");
}
