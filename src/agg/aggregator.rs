use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::agg::catalog::{AggKind, FitFunc, TransformFunc};
use crate::dataframe::DataFrame;
use crate::error::{Error, Result};
use crate::groupby::GroupIndex;
use crate::scalar::Scalar;
use crate::series::Series;

/// transformの対象列を指定するオプション
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransformOptions {
    /// グループキーの列名
    pub group_column: String,
    /// 特徴量の列名
    pub feature_column: String,
}

impl TransformOptions {
    /// 新しいTransformOptionsを作成
    pub fn new(group_column: impl Into<String>, feature_column: impl Into<String>) -> Self {
        TransformOptions {
            group_column: group_column.into(),
            feature_column: feature_column.into(),
        }
    }
}

/// 1つの集計種別と学習済みマッピングを束ねる集計器
///
/// fitでグループごとの集計結果を学習し、transformでその結果を
/// 各行へブロードキャストします。transformはfit時のGroupIndexに
/// 依存しないため、fitとは別のテーブルに適用できます。
pub struct Aggregator {
    /// 束ねられた集計種別
    kind: AggKind,

    fit_func: FitFunc,
    transform_func: TransformFunc,

    /// 学習済みマッピング（グループキー値 → 集計結果）。fit前はNone。
    mapping: Option<HashMap<Scalar, Scalar>>,
}

// 学習済み状態の永続化表現。マッピングはキーの昇順のペア列として
// 保存するため、出力は決定的になる。
#[derive(Serialize, Deserialize)]
struct FittedState {
    kind: AggKind,
    mapping: Option<Vec<(Scalar, Scalar)>>,
}

impl Aggregator {
    pub(crate) fn new(kind: AggKind, fit_func: FitFunc, transform_func: TransformFunc) -> Self {
        Aggregator {
            kind,
            fit_func,
            transform_func,
            mapping: None,
        }
    }

    /// 束ねられた集計種別を取得
    pub fn kind(&self) -> AggKind {
        self.kind
    }

    /// 学習済みかどうかをチェック
    pub fn is_fitted(&self) -> bool {
        self.mapping.is_some()
    }

    /// 学習済みマッピングを取得（fit前はNone）
    pub fn fitted_mapping(&self) -> Option<&HashMap<Scalar, Scalar>> {
        self.mapping.as_ref()
    }

    /// グループごとの集計結果を学習
    ///
    /// `group_index`の各グループについて、`feature_column`の値へfit関数を
    /// 適用し、グループキー値から集計結果へのマッピングを構築します。
    /// 既に学習済みの場合はマッピング全体を置き換えます。
    pub fn fit(
        &mut self,
        df: &DataFrame,
        group_index: &GroupIndex,
        feature_column: &str,
    ) -> Result<&mut Self> {
        let column = df.column_or_err(feature_column)?;
        if column.len() != group_index.row_count() {
            return Err(Error::LengthMismatch {
                expected: group_index.row_count(),
                actual: column.len(),
            });
        }

        let fit_results = group_index.apply(self.fit_func, column.values())?;

        // マッピングを完成させてから置き換える
        let mapping: HashMap<Scalar, Scalar> = group_index
            .index()
            .iter()
            .cloned()
            .zip(fit_results)
            .collect();

        log::debug!(
            "fit完了: 種別={}, 特徴量列={}, グループ数={}",
            self.kind,
            feature_column,
            mapping.len()
        );

        self.mapping = Some(mapping);
        Ok(self)
    }

    /// 学習済みマッピングを各行へブロードキャスト
    ///
    /// 各行について、グループキー列の値でマッピングを引き、その結果と
    /// 特徴量値へtransform関数を適用します。fit時に存在しなかったキーは
    /// エラーにならず、欠損（Na）として扱われます。
    pub fn transform(&self, df: &DataFrame, options: &TransformOptions) -> Result<Series> {
        let mapping = self
            .mapping
            .as_ref()
            .ok_or(Error::MustFitBeforeTransform)?;

        let group_values = df.column_or_err(&options.group_column)?.values();
        let feature_values = df.column_or_err(&options.feature_column)?.values();

        let outputs = self.transform_chunk(mapping, group_values, feature_values);

        log::debug!(
            "transform完了: 種別={}, 行数={}",
            self.kind,
            outputs.len()
        );

        Series::new(
            outputs,
            Some(format!("{}__{}", options.feature_column, self.kind)),
        )
    }

    // 行範囲を限定したtransformの本体。mappingのルックアップと
    // transform関数の適用を行う。並列transformのチャンク処理からも使う。
    pub(crate) fn transform_chunk(
        &self,
        mapping: &HashMap<Scalar, Scalar>,
        keys: &[Scalar],
        features: &[Scalar],
    ) -> Vec<Scalar> {
        keys.iter()
            .zip(features.iter())
            .map(|(key, feature)| {
                let fitted = mapping.get(key).unwrap_or(&Scalar::Na);
                (self.transform_func)(fitted, feature)
            })
            .collect()
    }

    /// 学習済み状態をJSON文字列へ書き出す
    pub fn to_json(&self) -> Result<String> {
        let mapping = self.mapping.as_ref().map(|mapping| {
            let mut pairs: Vec<(Scalar, Scalar)> = mapping
                .iter()
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect();
            pairs.sort_by(|a, b| a.0.cmp(&b.0));
            pairs
        });

        let state = FittedState {
            kind: self.kind,
            mapping,
        };
        Ok(serde_json::to_string(&state)?)
    }

    /// JSON文字列から集計器を復元
    pub fn from_json(json: &str) -> Result<Aggregator> {
        let state: FittedState = serde_json::from_str(json)?;
        let mut aggregator = crate::agg::catalog::AggregationCatalog::get_kind(state.kind);
        aggregator.mapping = state
            .mapping
            .map(|pairs| pairs.into_iter().collect::<HashMap<Scalar, Scalar>>());
        Ok(aggregator)
    }
}

impl std::fmt::Debug for Aggregator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Aggregator")
            .field("kind", &self.kind)
            .field("fitted", &self.is_fitted())
            .finish()
    }
}
