// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use thicket_tree::{Options, RTree};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

fn gen_uniform_points(count: usize, extent: f64) -> Vec<(f64, f64)> {
    let mut out = Vec::with_capacity(count);
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    for _ in 0..count {
        out.push((rng.next_f64() * extent, rng.next_f64() * extent));
    }
    out
}

fn gen_clustered_points(n_clusters: usize, per_cluster: usize, spread: f64) -> Vec<(f64, f64)> {
    let mut out = Vec::with_capacity(n_clusters * per_cluster);
    let mut rng = Rng::new(0xC1A5_7E55_9999_ABCD);
    let mut centers = Vec::with_capacity(n_clusters);
    for _ in 0..n_clusters {
        centers.push((rng.next_f64() * 2000.0, rng.next_f64() * 2000.0));
    }
    for (cx, cy) in centers {
        for _ in 0..per_cluster {
            let dx = (rng.next_f64() - 0.5) * spread;
            let dy = (rng.next_f64() - 0.5) * spread;
            out.push((cx + dx, cy + dy));
        }
    }
    out
}

fn build_tree(points: Vec<(f64, f64)>, max_entries: usize) -> RTree<Vec<(f64, f64)>> {
    let mut tree = RTree::with_options(Options { max_entries }).expect("valid fan-out");
    tree.load(points).expect("fresh tree");
    tree
}

fn bench_bulk_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("bulk_load");
    for &n in &[1_000usize, 10_000, 100_000] {
        let points = gen_uniform_points(n, 2000.0);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("uniform_n{}", n), |b| {
            b.iter_batched(
                || points.clone(),
                |pts| black_box(build_tree(pts, 9)),
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_bulk_load_sorted(c: &mut Criterion) {
    let mut group = c.benchmark_group("bulk_load_sorted");
    let mut points = gen_uniform_points(100_000, 2000.0);
    points.sort_by(|a, b| a.0.total_cmp(&b.0));
    group.throughput(Throughput::Elements(points.len() as u64));
    group.bench_function("presorted_n100000", |b| {
        b.iter_batched(
            || points.clone(),
            |pts| {
                let mut tree = RTree::new();
                tree.load_sorted(pts).expect("fresh tree");
                black_box(tree)
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn bench_nearest(c: &mut Criterion) {
    let mut group = c.benchmark_group("nearest");
    for &n in &[10_000usize, 100_000] {
        for &m in &[4usize, 9] {
            let tree = build_tree(gen_uniform_points(n, 2000.0), m);
            let mut rng = Rng::new(0xBADC_F00D_1234_5678);
            let queries: Vec<(f64, f64)> = (0..256)
                .map(|_| (rng.next_f64() * 2000.0, rng.next_f64() * 2000.0))
                .collect();
            group.throughput(Throughput::Elements(queries.len() as u64));
            group.bench_function(format!("uniform_n{}_m{}", n, m), |b| {
                b.iter(|| {
                    let mut total = 0.0;
                    for &(x, y) in &queries {
                        total += tree.nearest(x, y).map_or(0.0, |hit| hit.distance);
                    }
                    black_box(total);
                })
            });
        }
    }
    group.finish();
}

fn bench_nearest_within(c: &mut Criterion) {
    let mut group = c.benchmark_group("nearest_within");
    let tree = build_tree(gen_uniform_points(100_000, 2000.0), 9);
    let mut rng = Rng::new(0xFACE_FEED_CAFE_BABE);
    let queries: Vec<(f64, f64)> = (0..256)
        .map(|_| (rng.next_f64() * 2000.0, rng.next_f64() * 2000.0))
        .collect();
    group.throughput(Throughput::Elements(queries.len() as u64));
    for &radius in &[5.0f64, 50.0, 500.0] {
        group.bench_function(format!("uniform_n100000_r{}", radius), |b| {
            b.iter(|| {
                let mut hits = 0usize;
                for &(x, y) in &queries {
                    hits += usize::from(tree.nearest_within(x, y, radius).is_some());
                }
                black_box(hits);
            })
        });
    }
    group.finish();
}

fn bench_nearest_clustered(c: &mut Criterion) {
    let mut group = c.benchmark_group("nearest_clustered");
    let tree = build_tree(gen_clustered_points(16, 4096, 128.0), 9);
    let mut rng = Rng::new(0xBEEF_BEEF_BEEF_BEEF);
    let queries: Vec<(f64, f64)> = (0..256)
        .map(|_| (rng.next_f64() * 2000.0, rng.next_f64() * 2000.0))
        .collect();
    group.throughput(Throughput::Elements(queries.len() as u64));
    group.bench_function("clustered_n65536", |b| {
        b.iter(|| {
            let mut total = 0.0;
            for &(x, y) in &queries {
                total += tree.nearest(x, y).map_or(0.0, |hit| hit.distance);
            }
            black_box(total);
        })
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_bulk_load,
    bench_bulk_load_sorted,
    bench_nearest,
    bench_nearest_within,
    bench_nearest_clustered,
);
criterion_main!(benches);
