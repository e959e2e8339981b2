//! Benchmarks for metadata walks and subdivision over growing polylines.

use std::{f64::consts::TAU, hint::black_box};

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use linegraph::{Lines, metric_from_name, registry::METRIC_NAMES};

/// Closed polygon with `sides` vertices on the unit circle, traced as one line.
fn polygon(sides: usize) -> Lines {
    let mut lines = Lines::new(sides, sides).expect("valid capacity");
    for i in 0..sides {
        let angle = TAU * i as f64 / sides as f64;
        lines
            .set_point(i, (angle.cos(), angle.sin()))
            .expect("point in range");
        lines
            .set_connection(i, i, (i + 1) % sides)
            .expect("connection in range");
    }
    lines.add_line(0..sides);
    lines
}

/// Benchmark `gen_metadata` for every built-in metric.
fn bench_gen_metadata(c: &mut Criterion) {
    let mut group = c.benchmark_group("gen_metadata");

    for name in METRIC_NAMES {
        let metric = metric_from_name(name).expect("known metric");
        for sides in [16, 256, 4096] {
            let mut lines = polygon(sides);
            group.bench_function(BenchmarkId::new(*name, sides), |b| {
                b.iter(|| lines.gen_metadata(black_box(metric.as_ref()), 1e9, 0.0))
            });
        }
    }

    group.finish();
}

/// Benchmark repeated subdivision of a square.
fn bench_subdivide(c: &mut Criterion) {
    let mut group = c.benchmark_group("subdivide");

    let square = polygon(4);
    for times in [1u32, 4, 8] {
        group.bench_function(BenchmarkId::new("square", times), |b| {
            b.iter(|| square.subdivide_n(black_box(times)))
        });
    }

    group.finish();
}

#[allow(missing_docs, clippy::missing_docs_in_private_items)]
mod bench_defs {
    use super::*;
    criterion_group!(benches, bench_gen_metadata, bench_subdivide);
}

pub use bench_defs::benches;
criterion_main!(benches);
