// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arena node representation and the public read-only node view.

use crate::types::Bbox;

/// Hard cap on children per internal node.
pub const MAX_POSSIBLE_ENTRIES: usize = 9;

/// A node in the flat arena. Children are arena indices; there are no back
/// pointers, so traversal is top-down only. `start..end` records the range of
/// the point sequence the node was built from (provenance, used during build
/// only).
#[derive(Copy, Clone, Debug)]
pub(crate) struct Node {
    pub(crate) children: [usize; MAX_POSSIBLE_ENTRIES],
    pub(crate) children_len: usize,
    /// Distance to the leaf level; leaf parents have height 1, leaves 0.
    pub(crate) height: usize,
    pub(crate) leaf: bool,
    pub(crate) start: usize,
    pub(crate) end: usize,
    pub(crate) bbox: Bbox,
}

impl Node {
    /// Unresolved internal node covering `start..end` at `height`. The bbox
    /// is a placeholder until the post-order propagation pass.
    pub(crate) fn branch(start: usize, end: usize, height: usize) -> Self {
        Self {
            children: [0; MAX_POSSIBLE_ENTRIES],
            children_len: 0,
            height,
            leaf: false,
            start,
            end,
            bbox: Bbox::from_point(0.0, 0.0),
        }
    }

    /// Leaf wrapping the point at sequence position `i`.
    pub(crate) fn leaf_at(i: usize, x: f64, y: f64) -> Self {
        Self {
            children: [0; MAX_POSSIBLE_ENTRIES],
            children_len: 0,
            height: 0,
            leaf: true,
            start: i,
            end: i + 1,
            bbox: Bbox::from_point(x, y),
        }
    }

    pub(crate) fn push_child(&mut self, arena_index: usize) {
        debug_assert!(self.children_len < MAX_POSSIBLE_ENTRIES);
        self.children[self.children_len] = arena_index;
        self.children_len += 1;
    }

    pub(crate) fn child_indices(&self) -> &[usize] {
        &self.children[..self.children_len]
    }

    /// Admissible `(min_sq, max_sq)` squared-distance bounds from `(x, y)`.
    ///
    /// Leaves take the exact-distance fast path; both bounds coincide there.
    #[inline]
    pub(crate) fn distance_bounds(&self, x: f64, y: f64) -> (f64, f64) {
        if self.leaf {
            let dx = x - self.bbox.min_x;
            let dy = y - self.bbox.min_y;
            let d = dx * dx + dy * dy;
            return (d, d);
        }
        self.bbox.distance_bounds(x, y)
    }
}

/// Read-only view of one arena node, yielded by preorder traversal.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct NodeView {
    /// The node's bounding box; degenerate for leaves.
    pub bbox: Bbox,
    /// Distance to the leaf level (leaves are 0, leaf parents 1).
    pub height: usize,
    /// True for leaves wrapping exactly one point.
    pub is_leaf: bool,
    /// Number of children (0 for leaves).
    pub child_count: usize,
}

impl NodeView {
    /// The wrapped point, for leaves.
    ///
    /// Leaves report their point through the degenerate bbox's max corner
    /// (max == min == the point).
    pub fn point(&self) -> Option<(f64, f64)> {
        self.is_leaf.then_some((self.bbox.max_x, self.bbox.max_y))
    }
}
