use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use fanout::{sweep_max_parallelism, PlacementModel, SweepConfig, WeightTable};
use std::hint::black_box;

fn bench_model(c: &mut Criterion) {
    let mut group = c.benchmark_group("model");

    // Table construction dominates setup; O(M^3) in the tabulated range.
    for m in [16usize, 64, 200] {
        group.bench_with_input(BenchmarkId::new("table_build", m), &m, |b, &m| {
            b.iter(|| black_box(WeightTable::build(m).unwrap()))
        });
    }

    // A single epsilon query at the reference operating point.
    let model = PlacementModel::new(200).unwrap();
    group.bench_function("epsilon/n1000_k200_s40_d25", |b| {
        b.iter(|| black_box(model.epsilon(1000, 200, 40, 25).unwrap()))
    });

    // The full reference sweep (table reused across iterations, as in a
    // batch driver).
    let cfg = SweepConfig::new(1000, 200, 1000, 0.1, 200);
    group.bench_function("sweep/reference_cluster", |b| {
        b.iter(|| black_box(sweep_max_parallelism(&model, &cfg).unwrap()))
    });

    group.finish();
}

criterion_group!(benches, bench_model);
criterion_main!(benches);
