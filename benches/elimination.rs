//! # Elimination Benchmarks
//!
//! Measures boundary construction, kernel/image decomposition and the full
//! barcode pipeline on random Rips complexes in the unit square.
//!
//! Run: `cargo bench --bench elimination`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ndarray::Array2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Uniform};
use tda_barcodes::{
    boundary, compute_barcode, Binary, ContinuousTime, FilteredComplex, PersistenceConfig, RipsConfig, Ternary,
    VietorisRips,
};

fn random_complex(n_points: usize) -> FilteredComplex<ContinuousTime> {
    let mut rng = StdRng::seed_from_u64(42);
    let uniform = Uniform::new(0.0, 1.0);
    let points = Array2::from_shape_fn((n_points, 2), |_| uniform.sample(&mut rng));

    VietorisRips::from_points(&points).complex(&RipsConfig {
        max_epsilon: 0.3,
        max_dim: 2,
    })
}

/// Benchmark kernel/image decomposition of boundary matrices
fn bench_decompose(c: &mut Criterion) {
    let mut group = c.benchmark_group("decompose");

    for n_points in [20, 40, 80] {
        let complex = random_complex(n_points);
        let Ok(map) = boundary::<Ternary, _>(&complex) else {
            continue;
        };
        group.throughput(Throughput::Elements(complex.len() as u64));

        group.bench_with_input(BenchmarkId::new("ternary", n_points), &map, |b, map| {
            b.iter(|| black_box(map.decompose()))
        });
    }

    group.finish();
}

/// Benchmark the full complex → barcode pipeline over both fields
fn bench_barcode(c: &mut Criterion) {
    let mut group = c.benchmark_group("barcode");
    let config = PersistenceConfig::default();

    for n_points in [20, 40] {
        let complex = random_complex(n_points);

        group.bench_with_input(BenchmarkId::new("binary", n_points), &complex, |b, complex| {
            b.iter(|| black_box(compute_barcode::<Binary, _>(complex, &config)))
        });
        group.bench_with_input(BenchmarkId::new("ternary", n_points), &complex, |b, complex| {
            b.iter(|| black_box(compute_barcode::<Ternary, _>(complex, &config)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_decompose, bench_barcode);
criterion_main!(benches);
