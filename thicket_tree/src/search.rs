// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Branch-and-bound nearest-point search.
//!
//! The search runs best-first over a min-heap of arena nodes keyed by their
//! lower-bound squared distance to the query point. An upper bound, seeded by
//! the optional search radius, is tightened whenever a node's far-edge bound
//! improves on it; children whose lower bound exceeds the upper bound are
//! never enqueued. Leaf bounds are exact, so the first leaf popped from the
//! heap is the nearest point. All arithmetic stays in squared distances until
//! the single square root on the result.

use crate::points::PointSource;
use crate::pool::SearchItem;
use crate::tree::RTree;

/// A nearest-point query result.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Neighbor {
    /// X coordinate of the found point.
    pub x: f64,
    /// Y coordinate of the found point.
    pub y: f64,
    /// Euclidean distance from the query point.
    pub distance: f64,
}

impl<P: PointSource> RTree<P> {
    /// Find the indexed point nearest to `(x, y)`.
    ///
    /// Returns `None` only for an empty tree. Ties between equidistant points
    /// resolve to an unspecified one of them.
    pub fn nearest(&self, x: f64, y: f64) -> Option<Neighbor> {
        self.nearest_impl(x, y, f64::INFINITY)
    }

    /// Find the nearest indexed point within `radius` of `(x, y)`.
    ///
    /// The radius is inclusive: a point exactly `radius` away is found, and a
    /// zero radius finds a coincident point. Returns `None` when no indexed
    /// point lies within the radius. The radius prunes the traversal from the
    /// start, so a tight radius is cheaper than [`RTree::nearest`].
    pub fn nearest_within(&self, x: f64, y: f64, radius: f64) -> Option<Neighbor> {
        self.nearest_impl(x, y, radius * radius)
    }

    fn nearest_impl(&self, x: f64, y: f64, mut upper_sq: f64) -> Option<Neighbor> {
        let nodes = self.arena();
        let root = nodes.first()?;
        let mut scratch = self.scratch.acquire();

        let (min_sq, max_sq) = root.distance_bounds(x, y);
        if min_sq <= upper_sq {
            upper_sq = upper_sq.min(max_sq);
            scratch.queue.push(SearchItem {
                dist_sq: min_sq,
                node: 0,
            });
        }

        while let Some(item) = scratch.queue.pop() {
            let node = &nodes[item.node];
            if node.leaf {
                // Exact bound on a min-heap: nothing left can beat it.
                return Some(Neighbor {
                    x: node.bbox.max_x,
                    y: node.bbox.max_y,
                    distance: item.dist_sq.sqrt(),
                });
            }
            for &child in node.child_indices() {
                let (min_sq, max_sq) = nodes[child].distance_bounds(x, y);
                if min_sq <= upper_sq {
                    upper_sq = upper_sq.min(max_sq);
                    scratch.queue.push(SearchItem {
                        dist_sq: min_sq,
                        node: child,
                    });
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::Options;
    use rand::Rng;

    fn random_points(n: usize) -> Vec<(f64, f64)> {
        let mut rng = rand::rng();
        (0..n)
            .map(|_| (rng.random_range(-500.0..500.0), rng.random_range(-500.0..500.0)))
            .collect()
    }

    fn build(points: Vec<(f64, f64)>, max_entries: usize) -> RTree<Vec<(f64, f64)>> {
        let mut tree = RTree::with_options(Options { max_entries }).unwrap();
        tree.load(points).unwrap();
        tree
    }

    fn brute_nearest(points: &[(f64, f64)], x: f64, y: f64) -> f64 {
        points
            .iter()
            .map(|&(px, py)| {
                let (dx, dy) = (px - x, py - y);
                (dx * dx + dy * dy).sqrt()
            })
            .fold(f64::INFINITY, f64::min)
    }

    #[test]
    fn matches_worked_example() {
        let tree = build(vec![(0.0, 0.0), (10.0, 10.0), (5.0, 5.0)], 9);
        let hit = tree.nearest(4.0, 4.0).unwrap();
        assert_eq!((hit.x, hit.y), (5.0, 5.0));
        assert!((hit.distance - 2.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn out_of_radius_is_none() {
        let tree = build(vec![(0.0, 0.0)], 9);
        assert_eq!(tree.nearest_within(100.0, 100.0, 1.0), None);
        // The unbounded query still finds it.
        assert!(tree.nearest(100.0, 100.0).is_some());
    }

    #[test]
    fn radius_is_inclusive() {
        let tree = build(vec![(3.0, 4.0)], 9);
        // Distance from the origin is exactly 5.
        let hit = tree.nearest_within(0.0, 0.0, 5.0).unwrap();
        assert_eq!((hit.x, hit.y), (3.0, 4.0));
        assert_eq!(hit.distance, 5.0);
        assert_eq!(tree.nearest_within(0.0, 0.0, 4.999), None);
    }

    #[test]
    fn zero_radius_finds_coincident_point() {
        let tree = build(vec![(1.0, 2.0), (3.0, 4.0)], 9);
        let hit = tree.nearest_within(1.0, 2.0, 0.0).unwrap();
        assert_eq!((hit.x, hit.y), (1.0, 2.0));
        assert_eq!(hit.distance, 0.0);
    }

    #[test]
    fn empty_tree_finds_nothing() {
        let mut tree: RTree<Vec<(f64, f64)>> = RTree::new();
        tree.load(Vec::new()).unwrap();
        assert_eq!(tree.nearest(0.0, 0.0), None);
        assert_eq!(tree.nearest_within(0.0, 0.0, f64::INFINITY), None);
    }

    #[test]
    fn query_point_inside_the_set_is_its_own_neighbor() {
        let points = random_points(300);
        let (qx, qy) = points[137];
        let hit = build(points, 9).nearest(qx, qy).unwrap();
        assert_eq!(hit.distance, 0.0);
        assert_eq!((hit.x, hit.y), (qx, qy));
    }

    #[test]
    fn agrees_with_brute_force() {
        let mut rng = rand::rng();
        for &(n, max_entries) in &[(1_usize, 9_usize), (9, 9), (10, 9), (100, 4), (1000, 9), (500, 2)] {
            let points = random_points(n);
            let tree = build(points.clone(), max_entries);
            for _ in 0..200 {
                let qx = rng.random_range(-600.0..600.0);
                let qy = rng.random_range(-600.0..600.0);
                let hit = tree.nearest(qx, qy).unwrap();
                let expected = brute_nearest(&points, qx, qy);
                assert!(
                    (hit.distance - expected).abs() < 1e-9,
                    "n={n} m={max_entries} query=({qx},{qy}): got {} want {expected}",
                    hit.distance
                );
            }
        }
    }

    #[test]
    fn bounded_search_agrees_with_brute_force() {
        let mut rng = rand::rng();
        let points = random_points(800);
        let tree = build(points.clone(), 9);
        for _ in 0..300 {
            let qx = rng.random_range(-600.0..600.0);
            let qy = rng.random_range(-600.0..600.0);
            let radius = rng.random_range(0.0..200.0);
            let expected = brute_nearest(&points, qx, qy);
            match tree.nearest_within(qx, qy, radius) {
                Some(hit) => {
                    assert!(hit.distance <= radius);
                    assert!((hit.distance - expected).abs() < 1e-9);
                }
                None => assert!(expected > radius),
            }
        }
    }

    #[test]
    fn repeated_queries_do_not_grow_the_pool() {
        let tree = build(random_points(2000), 9);
        let queries = random_points(1000);
        // First pass grows the scratch buffer to its working size.
        for &(x, y) in &queries {
            let _ = tree.nearest(x, y);
        }
        let warmed = tree.pool_stats();
        assert_eq!(warmed.idle, 1);
        // Replaying the same queries must not allocate anything further.
        for &(x, y) in &queries {
            let _ = tree.nearest(x, y);
        }
        assert_eq!(tree.pool_stats(), warmed);
    }

    #[test]
    fn concurrent_queries_share_one_tree() {
        let points = random_points(500);
        let tree = build(points.clone(), 9);
        std::thread::scope(|scope| {
            for t in 0..4 {
                let tree = &tree;
                let points = &points;
                scope.spawn(move || {
                    let mut rng = rand::rng();
                    for _ in 0..100 {
                        let qx = rng.random_range(-600.0..600.0);
                        let qy = rng.random_range(-600.0..600.0);
                        let hit = tree.nearest(qx, qy).unwrap();
                        let expected = brute_nearest(points, qx, qy);
                        assert!(
                            (hit.distance - expected).abs() < 1e-9,
                            "thread {t} disagrees with brute force"
                        );
                    }
                });
            }
        });
        // Every checked-out scratch found its way back.
        assert!(tree.pool_stats().idle >= 1);
        assert!(tree.pool_stats().idle <= 4);
    }
}
