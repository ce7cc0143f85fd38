// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! GeoJSON export of Thicket R-tree node boxes.
//!
//! Serializes a built tree as a `FeatureCollection` with one polygon feature
//! per node, root first in preorder. Leaf boxes are degenerate (all four
//! corners coincide on the point). Drop the output into any GeoJSON viewer to
//! eyeball the packing.

use serde::Serialize;

use thicket_tree::{NodeView, PointSource, RTree};

/// A GeoJSON `FeatureCollection` of tree node boxes.
#[derive(Clone, Debug, Serialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    kind: &'static str,
    features: Vec<Feature>,
}

impl FeatureCollection {
    /// Number of node features in the collection.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// True if the tree had no nodes.
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

#[derive(Clone, Debug, Serialize)]
struct Feature {
    #[serde(rename = "type")]
    kind: &'static str,
    properties: Properties,
    geometry: Geometry,
}

#[derive(Clone, Debug, Serialize)]
struct Properties {
    /// Node height within the tree; leaves are 0.
    height: usize,
    leaf: bool,
}

#[derive(Clone, Debug, Serialize)]
struct Geometry {
    #[serde(rename = "type")]
    kind: &'static str,
    coordinates: Vec<Vec<[f64; 2]>>,
}

fn feature(view: &NodeView) -> Feature {
    let b = view.bbox;
    // Closed counter-clockwise ring over the box corners.
    let ring = vec![
        [b.min_x, b.min_y],
        [b.max_x, b.min_y],
        [b.max_x, b.max_y],
        [b.min_x, b.max_y],
        [b.min_x, b.min_y],
    ];
    Feature {
        kind: "Feature",
        properties: Properties {
            height: view.height,
            leaf: view.is_leaf,
        },
        geometry: Geometry {
            kind: "Polygon",
            coordinates: vec![ring],
        },
    }
}

/// Collect every node box of `tree` into a serializable feature collection,
/// root first.
pub fn to_feature_collection<P: PointSource>(tree: &RTree<P>) -> FeatureCollection {
    FeatureCollection {
        kind: "FeatureCollection",
        features: tree.preorder().map(|view| feature(&view)).collect(),
    }
}

/// Serialize `tree` straight to a GeoJSON string.
///
/// # Errors
///
/// Propagates [`serde_json::Error`]; with finite coordinates serialization
/// does not fail, but non-finite values are not representable in JSON.
pub fn to_geojson_string<P: PointSource>(tree: &RTree<P>) -> serde_json::Result<String> {
    serde_json::to_string(&to_feature_collection(tree))
}
