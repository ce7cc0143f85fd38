// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=thicket_tree --heading-base-level=0

//! Thicket: a static, bulk-loaded 2D point R-tree for nearest-neighbor search.
//!
//! Thicket trades mutability for speed: the whole point set is loaded once
//! with a Sort-Tile-Recursive packing pass, after which the tree is immutable
//! and answers nearest-point queries with a branch-and-bound best-first
//! search.
//!
//! - Bulk load once from any [`PointSource`] (pair vectors, interleaved flat
//!   buffers, or `kurbo::Point` vectors behind the `kurbo` feature).
//! - Query the nearest point, optionally bounded by an inclusive search
//!   radius via [`RTree::nearest_within`].
//! - Share one `&RTree` across threads; per-query scratch comes from an
//!   internal pool, so steady-state queries allocate nothing.
//! - Walk the packed tree with [`RTree::preorder`] for export or debugging.
//!
//! # Example
//!
//! ```rust
//! use thicket_tree::RTree;
//!
//! let mut tree = RTree::new();
//! tree.load(vec![(0.0, 0.0), (10.0, 10.0), (5.0, 5.0)])?;
//!
//! let hit = tree.nearest(4.0, 4.0).unwrap();
//! assert_eq!((hit.x, hit.y), (5.0, 5.0));
//!
//! // A radius-bounded query prunes from the start and may find nothing.
//! assert!(tree.nearest_within(40.0, 40.0, 1.0).is_none());
//! # Ok::<(), thicket_tree::TreeError>(())
//! ```
//!
//! # Trade-offs
//!
//! - No inserts, updates, or deletes after loading; rebuild instead. The
//!   static shape is what buys the packed arena and the tight boxes.
//! - Points only. Boxes and other extended geometry need a different index.
//! - Coordinates are assumed finite. NaNs are not rejected, but distance
//!   ordering with NaN inputs is unspecified.

pub mod types;

mod error;
mod node;
mod points;
mod pool;
mod search;
mod sort;
mod tree;

pub use error::{Result, TreeError};
pub use node::{MAX_POSSIBLE_ENTRIES, NodeView};
pub use points::{FlatPoints, PointSource};
pub use pool::PoolStats;
pub use search::Neighbor;
pub use tree::{Options, Preorder, RTree};
pub use types::Bbox;
