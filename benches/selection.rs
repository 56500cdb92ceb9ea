use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use infill::prelude::*;

/// Build a synthetic pool of `n` local optima over `dims` dimensions,
/// clumped into a handful of basins the way restart optimization would.
fn build_pool(n: usize, dims: usize) -> (Bounds, Vec<LocalOptimum>) {
    let bounds = Bounds::new(
        (0..dims)
            .map(|i| Bound::float(format!("x{i}"), 0.0, 1.0))
            .collect(),
    )
    .unwrap();

    let mut rng = fastrand::Rng::with_seed(42);
    let basins: Vec<Vec<f64>> = (0..8)
        .map(|_| (0..dims).map(|_| rng.f64()).collect())
        .collect();

    let pool = (0..n)
        .map(|i| {
            let basin = &basins[i % basins.len()];
            // Tiny jitter: restarts converge to the basin up to tolerance.
            let coords = basin.iter().map(|&c| c + rng.f64() * 1e-5).collect();
            LocalOptimum::new(coords, rng.f64() * 10.0)
        })
        .collect();

    (bounds, pool)
}

fn bench_select(c: &mut Criterion) {
    let mut group = c.benchmark_group("select");
    let acquisition = |points: &[Vec<f64>]| vec![1.0; points.len()];

    for dims in [2, 5, 10] {
        let (bounds, pool) = build_pool(100, dims);
        let history: Vec<Vec<f64>> = pool.iter().take(20).map(|o| o.coords.clone()).collect();
        let selector = Selector::builder()
            .batch_size(5)
            .min_cluster_utility(0.3)
            .seed(7)
            .build()
            .unwrap();

        group.bench_with_input(BenchmarkId::new("dims", dims), &dims, |b, _| {
            b.iter(|| {
                selector
                    .select(&pool, &history, &bounds, &acquisition)
                    .unwrap()
            });
        });
    }
    group.finish();
}

fn bench_cluster(c: &mut Criterion) {
    let mut group = c.benchmark_group("cluster");

    for n in [50, 200, 800] {
        let points: Vec<Vec<f64>> = {
            let mut rng = fastrand::Rng::with_seed(3);
            (0..n).map(|_| vec![rng.f64(), rng.f64()]).collect()
        };
        let radius = infill::cluster::neighborhood_radius(2);

        group.bench_with_input(BenchmarkId::new("points", n), &n, |b, _| {
            b.iter(|| infill::cluster::cluster_labels(&points, radius));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_select, bench_cluster);
criterion_main!(benches);
