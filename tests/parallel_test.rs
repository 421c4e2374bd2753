use grouprs::{
    par_fit_all, par_transform, AggKind, AggregationCatalog, DataFrame, Error, FitSpec,
    GroupIndex, Series, TransformOptions,
};

fn build_frame(rows: usize) -> DataFrame {
    let groups: Vec<&str> = (0..rows)
        .map(|i| match i % 3 {
            0 => "red",
            1 => "green",
            _ => "blue",
        })
        .collect();
    let features: Vec<f64> = (0..rows).map(|i| (i % 17) as f64).collect();

    let mut df = DataFrame::new();
    df.add_column(
        "group".to_string(),
        Series::from_str_values(groups, Some("group".to_string())).unwrap(),
    )
    .unwrap();
    df.add_column(
        "feature".to_string(),
        Series::from_f64(features, Some("feature".to_string())).unwrap(),
    )
    .unwrap();
    df
}

#[test]
fn test_par_fit_all_matches_serial() {
    let df = build_frame(100);
    let index = GroupIndex::build(df.column("group").unwrap().values()).unwrap();

    let specs: Vec<FitSpec> = AggKind::ALL
        .iter()
        .map(|&kind| FitSpec::new(kind, "feature"))
        .collect();

    let fitted = par_fit_all(&df, &index, &specs).unwrap();
    assert_eq!(fitted.len(), specs.len());

    // 結果はspecsと同じ順序で返り、直列fitと一致する
    for (aggregator, spec) in fitted.iter().zip(specs.iter()) {
        assert_eq!(aggregator.kind(), spec.kind);

        let mut serial = AggregationCatalog::get_kind(spec.kind);
        serial.fit(&df, &index, &spec.feature_column).unwrap();
        assert_eq!(aggregator.fitted_mapping(), serial.fitted_mapping());
    }
}

#[test]
fn test_par_fit_all_propagates_errors() {
    let df = build_frame(10);
    let index = GroupIndex::build(df.column("group").unwrap().values()).unwrap();

    let specs = vec![
        FitSpec::new(AggKind::Min, "feature"),
        FitSpec::new(AggKind::Max, "no_such_column"),
    ];

    let result = par_fit_all(&df, &index, &specs);
    assert!(matches!(result, Err(Error::ColumnNotFound(_))));
}

#[test]
fn test_par_transform_matches_serial() {
    let df = build_frame(1000);
    let index = GroupIndex::build(df.column("group").unwrap().values()).unwrap();

    let mut agg = AggregationCatalog::get("delta_mean").unwrap();
    agg.fit(&df, &index, "feature").unwrap();

    let options = TransformOptions::new("group", "feature");
    let serial = agg.transform(&df, &options).unwrap();

    // チャンクサイズが行数を割り切らない場合も結果は一致する
    for chunk_size in [1, 7, 128, 1000, 5000] {
        let parallel = par_transform(&agg, &df, &options, chunk_size).unwrap();
        assert_eq!(parallel, serial, "chunk_size={}", chunk_size);
    }
}

#[test]
fn test_par_transform_unseen_keys() {
    let df = build_frame(30);
    let index = GroupIndex::build(df.column("group").unwrap().values()).unwrap();

    let mut agg = AggregationCatalog::get("min").unwrap();
    agg.fit(&df, &index, "feature").unwrap();

    let mut target = DataFrame::new();
    target
        .add_column(
            "group".to_string(),
            Series::from_str_values(vec!["red", "yellow"], Some("group".to_string())).unwrap(),
        )
        .unwrap();
    target
        .add_column(
            "feature".to_string(),
            Series::from_f64(vec![1.0, 2.0], Some("feature".to_string())).unwrap(),
        )
        .unwrap();

    let result = par_transform(
        &agg,
        &target,
        &TransformOptions::new("group", "feature"),
        1,
    )
    .unwrap();

    assert!(!result.get(0).unwrap().is_na());
    assert!(result.get(1).unwrap().is_na());
}

#[test]
fn test_par_transform_requires_fit() {
    let df = build_frame(10);
    let agg = AggregationCatalog::get("min").unwrap();

    let result = par_transform(&agg, &df, &TransformOptions::new("group", "feature"), 16);
    assert!(matches!(result, Err(Error::MustFitBeforeTransform)));
}

#[test]
fn test_par_transform_zero_chunk_rejected() {
    let df = build_frame(10);
    let index = GroupIndex::build(df.column("group").unwrap().values()).unwrap();

    let mut agg = AggregationCatalog::get("min").unwrap();
    agg.fit(&df, &index, "feature").unwrap();

    let result = par_transform(&agg, &df, &TransformOptions::new("group", "feature"), 0);
    assert!(matches!(result, Err(Error::InvalidInput(_))));
}
