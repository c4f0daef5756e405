use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use selfmap_core::{
    DisplayConfig, LayoutTables, R_MAX, RadiusMode, SectorTable, build_scene, compute_positions,
    compute_weighted_degrees, synthetic_dataset,
};

fn bench_scene(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_scene");
    let config = DisplayConfig::default();
    let tables = LayoutTables::default();

    for n in [100, 1_000, 10_000] {
        let dataset = synthetic_dataset(n, &mut SmallRng::seed_from_u64(42));
        group.bench_with_input(BenchmarkId::from_parameter(n), &dataset, |b, ds| {
            b.iter(|| build_scene(black_box(ds), &config, &tables, None));
        });
    }
    group.finish();
}

fn bench_stages(c: &mut Criterion) {
    let dataset = synthetic_dataset(5_000, &mut SmallRng::seed_from_u64(7));
    let table = SectorTable::default();

    c.bench_function("compute_positions_5k", |b| {
        b.iter(|| compute_positions(black_box(&dataset.entries), RadiusMode::Valence, &table, R_MAX));
    });
    c.bench_function("compute_weighted_degrees_5k", |b| {
        b.iter(|| {
            compute_weighted_degrees(black_box(&dataset.entries), black_box(&dataset.associations))
        });
    });
}

criterion_group!(benches, bench_scene, bench_stages);
criterion_main!(benches);
