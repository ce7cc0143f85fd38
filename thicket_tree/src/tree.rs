// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The static point R-tree: configuration, bulk loading, and traversal.
//!
//! Construction is Sort-Tile-Recursive (the OMT variant): the arena is seeded
//! with a root covering the whole point range, then resolved breadth-first;
//! each unresolved node partial-sorts its range by x into vertical slices and
//! each slice by y into child ranges. A final post-order pass computes every
//! bounding box as the merge of its children's boxes. The result is a packed,
//! balanced tree with near-minimal box overlap for the chosen fan-out.

use crate::error::{Result, TreeError};
use crate::node::{MAX_POSSIBLE_ENTRIES, Node, NodeView};
use crate::points::PointSource;
use crate::pool::{PoolStats, ScratchRegistry};
use crate::sort::{self, Axis};
use crate::types::Bbox;

/// Bulk-load configuration.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Options {
    /// Maximum children per internal node, at most [`MAX_POSSIBLE_ENTRIES`].
    pub max_entries: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            max_entries: MAX_POSSIBLE_ENTRIES,
        }
    }
}

/// Static, bulk-loaded 2D point R-tree.
///
/// Write-once: a tree is configured, loaded with its full point set exactly
/// once, and answers nearest-point queries from then on. After loading, the
/// arena and the point storage are never mutated again, so a shared `&RTree`
/// serves unlimited concurrent queries; the only shared mutable state is the
/// synchronized scratch-pool registry.
pub struct RTree<P: PointSource> {
    options: Options,
    nodes: Vec<Node>,
    points: Option<P>,
    built: bool,
    pub(crate) scratch: ScratchRegistry,
}

impl<P: PointSource> RTree<P> {
    /// Create an unloaded tree with default options (fan-out 9).
    pub fn new() -> Self {
        Self::with_options(Options::default()).expect("default options are valid")
    }

    /// Create an unloaded tree with the given options.
    ///
    /// # Errors
    ///
    /// Rejects fan-outs above the hard cap of [`MAX_POSSIBLE_ENTRIES`] or
    /// below 2, before any work is done.
    pub fn with_options(options: Options) -> Result<Self> {
        if options.max_entries > MAX_POSSIBLE_ENTRIES {
            return Err(TreeError::FanoutTooLarge {
                got: options.max_entries,
                max: MAX_POSSIBLE_ENTRIES,
            });
        }
        if options.max_entries < 2 {
            return Err(TreeError::FanoutTooSmall {
                got: options.max_entries,
            });
        }
        Ok(Self {
            options,
            nodes: Vec::new(),
            points: None,
            built: false,
            scratch: ScratchRegistry::new(),
        })
    }

    /// Bulk load the tree from `points`, taking ownership of the storage.
    ///
    /// The storage is permuted in place during construction; the multiset of
    /// points is preserved. An empty input yields an empty tree (queries
    /// report not-found), not an error.
    ///
    /// # Errors
    ///
    /// [`TreeError::AlreadyBuilt`] if the tree was loaded before; the tree is
    /// static.
    pub fn load(&mut self, points: P) -> Result<()> {
        self.load_inner(points, false)
    }

    /// Like [`RTree::load`], for input already sorted by ascending x.
    ///
    /// Skips the root level's x partitioning. Callers are trusted on the
    /// ordering claim; an unsorted input degrades box quality (slower
    /// queries), never correctness of results.
    ///
    /// # Errors
    ///
    /// Same conditions as [`RTree::load`].
    pub fn load_sorted(&mut self, points: P) -> Result<()> {
        self.load_inner(points, true)
    }

    fn load_inner(&mut self, mut points: P, presorted: bool) -> Result<()> {
        if self.built {
            return Err(TreeError::AlreadyBuilt);
        }
        self.built = true;
        if !points.is_empty() {
            self.build(&mut points, presorted);
            self.scratch
                .set_capacity(self.nodes[0].height * self.options.max_entries);
        }
        self.points = Some(points);
        Ok(())
    }

    /// Number of indexed points.
    pub fn len(&self) -> usize {
        self.points.as_ref().map_or(0, |p| p.len())
    }

    /// True if the tree indexes no points.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True once the tree has been loaded (including with an empty input).
    pub fn is_built(&self) -> bool {
        self.built
    }

    /// Tree height: distance from the root to the leaf level. Leaves sit at
    /// height 0, so a non-empty tree has height at least 1. Empty trees
    /// report 0.
    pub fn height(&self) -> usize {
        self.nodes.first().map_or(0, |root| root.height)
    }

    /// The configured fan-out cap.
    pub fn max_entries(&self) -> usize {
        self.options.max_entries
    }

    /// Tight bounding box of all indexed points, or `None` when empty.
    pub fn bounds(&self) -> Option<Bbox> {
        self.nodes.first().map(|root| root.bbox)
    }

    /// The (permuted) point storage, once loaded.
    pub fn points(&self) -> Option<&P> {
        self.points.as_ref()
    }

    /// Read-only preorder traversal of the node arena: root first, children
    /// in child-list order. This is the full surface export consumers need.
    pub fn preorder(&self) -> Preorder<'_> {
        Preorder {
            nodes: &self.nodes,
            stack: if self.nodes.is_empty() {
                Vec::new()
            } else {
                vec![0]
            },
        }
    }

    /// Snapshot of the query scratch pool, for allocation-behavior checks.
    pub fn pool_stats(&self) -> PoolStats {
        self.scratch.stats()
    }

    pub(crate) fn arena(&self) -> &[Node] {
        &self.nodes
    }

    fn build(&mut self, points: &mut P, presorted: bool) {
        let n = points.len();
        self.nodes = Vec::with_capacity(2 * n);
        self.nodes.push(Node::branch(0, n, height_for(n, self.options.max_entries)));

        // Breadth-first worklist over the arena itself: resolving node `i`
        // appends its children past the end, so advancing `i` until the
        // unresolved count hits zero visits every node exactly once.
        let mut presorted = presorted;
        let mut i = 0;
        let mut unresolved = 1_isize;
        while unresolved > 0 {
            unresolved += self.build_node(i, points, presorted);
            presorted = false; // only the root level inherits caller order
            i += 1;
        }
        let _ = self.propagate_bbox(0);
    }

    /// Resolve one node: materialize leaves for small ranges, otherwise slice
    /// the range per OMT and queue the children. Returns the change in the
    /// number of unresolved nodes.
    fn build_node(&mut self, node_index: usize, points: &mut P, presorted: bool) -> isize {
        let mut node = self.nodes[node_index];
        if node.leaf {
            return 0;
        }
        let n = node.end - node.start;
        if n <= self.options.max_entries {
            self.materialize_leaf_parent(node_index, points);
            return -1;
        }

        // Target number of slices so each child ends up with close to
        // M^(h-1) points: m = ceil(n / M^(h-1)), child size n2 = ceil(n / m),
        // vertical slice width n1 = n2 * ceil(sqrt(m)).
        let max_entries = self.options.max_entries as f64;
        #[allow(
            clippy::cast_possible_truncation,
            reason = "slice counts are small positive integers by construction"
        )]
        let (n1, n2) = {
            let m = (n as f64 / max_entries.powi(node.height as i32 - 1)).ceil();
            let n2 = (n as f64 / m).ceil() as usize;
            (n2 * (m.sqrt().ceil() as usize), n2)
        };

        if !presorted {
            sort::bucket_partition(points, node.start, node.end, n1, Axis::X);
        }

        let mut i = 0;
        while i < n {
            let slice_end = (i + n1).min(n);
            sort::bucket_partition(points, node.start + i, node.start + slice_end, n2, Axis::Y);
            let mut j = i;
            while j < slice_end {
                let child_end = (j + n2).min(slice_end);
                let child_index = self.nodes.len();
                self.nodes.push(Node::branch(
                    node.start + j,
                    node.start + child_end,
                    node.height - 1,
                ));
                node.push_child(child_index);
                j = child_end;
            }
            i = slice_end;
        }
        self.nodes[node_index] = node;
        node.children_len as isize - 1
    }

    /// Turn a node covering at most `max_entries` points into a leaf parent
    /// with one degenerate-bbox leaf per point.
    fn materialize_leaf_parent(&mut self, node_index: usize, points: &P) {
        let mut node = self.nodes[node_index];
        node.height = 1;
        for i in node.start..node.end {
            let (x, y) = points.point_at(i);
            let child_index = self.nodes.len();
            self.nodes.push(Node::leaf_at(i, x, y));
            node.push_child(child_index);
        }
        self.nodes[node_index] = node;
    }

    /// Post-order bbox propagation: every internal box becomes the merge of
    /// its children's boxes, root last. Plain recursion is safe here, depth
    /// is logarithmic in the point count.
    fn propagate_bbox(&mut self, node_index: usize) -> Bbox {
        let node = self.nodes[node_index];
        if node.leaf {
            return node.bbox;
        }
        debug_assert!(node.children_len > 0, "internal node without children");
        let mut bbox = self.propagate_bbox(node.children[0]);
        for k in 1..node.children_len {
            bbox = Bbox::merge(bbox, self.propagate_bbox(node.children[k]));
        }
        self.nodes[node_index].bbox = bbox;
        bbox
    }
}

impl<P: PointSource> Default for RTree<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: PointSource> core::fmt::Debug for RTree<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RTree")
            .field("max_entries", &self.options.max_entries)
            .field("points", &self.len())
            .field("arena_nodes", &self.nodes.len())
            .field("height", &self.height())
            .field("built", &self.built)
            .finish_non_exhaustive()
    }
}

/// Smallest height `h >= 1` with `max_entries^h >= n`.
fn height_for(n: usize, max_entries: usize) -> usize {
    let mut height = 1;
    let mut capacity = max_entries;
    while capacity < n {
        capacity = capacity.saturating_mul(max_entries);
        height += 1;
    }
    height
}

/// Preorder iterator over the node arena; see [`RTree::preorder`].
#[derive(Debug)]
pub struct Preorder<'a> {
    nodes: &'a [Node],
    stack: Vec<usize>,
}

impl Iterator for Preorder<'_> {
    type Item = NodeView;

    fn next(&mut self) -> Option<NodeView> {
        let index = self.stack.pop()?;
        let node = &self.nodes[index];
        for &child in node.child_indices().iter().rev() {
            self.stack.push(child);
        }
        Some(NodeView {
            bbox: node.bbox,
            height: node.height,
            is_leaf: node.leaf,
            child_count: node.children_len,
        })
    }
}
