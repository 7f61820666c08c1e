//! Benchmarks for boundary rasterization.
//!
//! Run with: cargo bench --package boundary-mask --bench rasterize_benchmarks

use boundary_mask::{rasterize, BoundaryPolygon, CellRule, RasterizeOptions};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use gw_common::Crs;

/// A star-shaped ring with `points` spikes, spanning [0, 100]².
fn star_ring(points: usize) -> Vec<(f64, f64)> {
    let n = points * 2;
    let mut ring: Vec<(f64, f64)> = (0..n)
        .map(|i| {
            let angle = i as f64 / n as f64 * std::f64::consts::TAU;
            let radius = if i % 2 == 0 { 50.0 } else { 20.0 };
            (50.0 + radius * angle.cos(), 50.0 + radius * angle.sin())
        })
        .collect();
    ring.push(ring[0]);
    ring
}

fn dims(size: usize, rule: CellRule) -> RasterizeOptions {
    RasterizeOptions {
        rows: Some(size),
        cols: Some(size),
        cell_rule: rule,
        ..Default::default()
    }
}

// =============================================================================
// GRID SIZE
// =============================================================================

fn bench_grid_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("rasterize_grid_size");
    let boundary = BoundaryPolygon::from_rings(&[star_ring(12)], Crs::from_epsg(5070)).unwrap();

    for size in [64usize, 128, 256, 512] {
        group.throughput(Throughput::Elements((size * size) as u64));
        group.bench_with_input(BenchmarkId::new("intersects", size), &size, |b, &size| {
            let opts = dims(size, CellRule::Intersects);
            b.iter(|| black_box(rasterize(black_box(&boundary), &opts).unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("centroid", size), &size, |b, &size| {
            let opts = dims(size, CellRule::Centroid);
            b.iter(|| black_box(rasterize(black_box(&boundary), &opts).unwrap()));
        });
    }

    group.finish();
}

// =============================================================================
// BOUNDARY COMPLEXITY
// =============================================================================

fn bench_vertex_counts(c: &mut Criterion) {
    let mut group = c.benchmark_group("rasterize_vertices");
    let opts = dims(256, CellRule::Intersects);

    for points in [4usize, 32, 256] {
        let boundary =
            BoundaryPolygon::from_rings(&[star_ring(points)], Crs::from_epsg(5070)).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(points * 2), &boundary, |b, boundary| {
            b.iter(|| black_box(rasterize(boundary, &opts).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_grid_sizes, bench_vertex_counts);
criterion_main!(benches);
