use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use grouprs::{AggKind, AggregationCatalog, DataFrame, GroupIndex, Series, TransformOptions};

fn build_frame(rows: usize, groups: usize) -> DataFrame {
    let keys: Vec<String> = (0..rows).map(|i| format!("group_{}", i % groups)).collect();
    let features: Vec<f64> = (0..rows).map(|i| (i % 100) as f64 * 0.5).collect();

    let mut df = DataFrame::new();
    df.add_column(
        "group".to_string(),
        Series::new(
            keys.into_iter().map(Into::into).collect(),
            Some("group".to_string()),
        )
        .unwrap(),
    )
    .unwrap();
    df.add_column(
        "feature".to_string(),
        Series::from_f64(features, Some("feature".to_string())).unwrap(),
    )
    .unwrap();
    df
}

fn bench_group_index_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("group_index_build");
    for rows in [1_000usize, 10_000, 100_000] {
        let df = build_frame(rows, 50);
        group.bench_with_input(BenchmarkId::from_parameter(rows), &df, |b, df| {
            b.iter(|| GroupIndex::build(black_box(df.column("group").unwrap().values())).unwrap());
        });
    }
    group.finish();
}

fn bench_fit_catalog(c: &mut Criterion) {
    let df = build_frame(10_000, 50);
    let index = GroupIndex::build(df.column("group").unwrap().values()).unwrap();

    let mut group = c.benchmark_group("fit");
    for kind in AggKind::ALL {
        group.bench_function(kind.kind_id(), |b| {
            b.iter(|| {
                let mut agg = AggregationCatalog::get_kind(kind);
                agg.fit(black_box(&df), black_box(&index), "feature").unwrap();
            });
        });
    }
    group.finish();
}

fn bench_transform(c: &mut Criterion) {
    let df = build_frame(100_000, 50);
    let index = GroupIndex::build(df.column("group").unwrap().values()).unwrap();
    let mut agg = AggregationCatalog::get("delta_mean").unwrap();
    agg.fit(&df, &index, "feature").unwrap();
    let options = TransformOptions::new("group", "feature");

    c.bench_function("transform_100k", |b| {
        b.iter(|| agg.transform(black_box(&df), black_box(&options)).unwrap());
    });
}

criterion_group!(
    benches,
    bench_group_index_build,
    bench_fit_catalog,
    bench_transform
);
criterion_main!(benches);
