//! 並列処理機能を提供するモジュール
//!
//! 構築済みのGroupIndexは読み取り専用で共有できるため、複数の集計器の
//! fitは(種別, 特徴量列)ごとに独立して並列実行できます。transformは
//! 不変な入力に対する純粋な要素ごとの関数なので、行範囲でチャンク化
//! して並列実行しても結果は直列実行と一致します。

use rayon::prelude::*;

use crate::agg::{AggKind, AggregationCatalog, Aggregator, TransformOptions};
use crate::dataframe::DataFrame;
use crate::error::{Error, Result};
use crate::groupby::GroupIndex;
use crate::scalar::Scalar;
use crate::series::Series;

/// 並列fitの1件分の指定: 集計種別と特徴量列の組
#[derive(Debug, Clone)]
pub struct FitSpec {
    /// 集計種別
    pub kind: AggKind,
    /// 特徴量の列名
    pub feature_column: String,
}

impl FitSpec {
    /// 新しいFitSpecを作成
    pub fn new(kind: AggKind, feature_column: impl Into<String>) -> Self {
        FitSpec {
            kind,
            feature_column: feature_column.into(),
        }
    }
}

/// 複数の集計器を1つのGroupIndexに対して並列にfit
///
/// 各fitはGroupIndexを読み取るだけで自身のマッピングにのみ書き込むため、
/// ロックなしで安全に並列実行できます。結果は`specs`と同じ順序で返します。
pub fn par_fit_all(
    df: &DataFrame,
    group_index: &GroupIndex,
    specs: &[FitSpec],
) -> Result<Vec<Aggregator>> {
    specs
        .par_iter()
        .map(|spec| {
            let mut aggregator = AggregationCatalog::get_kind(spec.kind);
            aggregator.fit(df, group_index, &spec.feature_column)?;
            Ok(aggregator)
        })
        .collect()
}

/// 1つの集計器のtransformを行範囲のチャンクに分けて並列実行
///
/// 出力は直列のtransformと同一で、行順も保たれます。
pub fn par_transform(
    aggregator: &Aggregator,
    df: &DataFrame,
    options: &TransformOptions,
    chunk_size: usize,
) -> Result<Series> {
    if chunk_size == 0 {
        return Err(Error::InvalidInput(
            "チャンクサイズは1以上でなければなりません".to_string(),
        ));
    }

    let mapping = aggregator
        .fitted_mapping()
        .ok_or(Error::MustFitBeforeTransform)?;

    let group_values = df.column_or_err(&options.group_column)?.values();
    let feature_values = df.column_or_err(&options.feature_column)?.values();

    let outputs: Vec<Scalar> = group_values
        .par_chunks(chunk_size)
        .zip(feature_values.par_chunks(chunk_size))
        .flat_map_iter(|(key_chunk, feature_chunk)| {
            aggregator.transform_chunk(mapping, key_chunk, feature_chunk)
        })
        .collect();

    Series::new(
        outputs,
        Some(format!("{}__{}", options.feature_column, aggregator.kind())),
    )
}
