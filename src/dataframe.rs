use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::series::Series;

/// DataFrame構造体: 名前付きの等長列の集合
///
/// 集計エンジンへの入力となる最小限のテーブル表現です。
/// 列は追加された順序を保持します。
#[derive(Debug, Clone, Default)]
pub struct DataFrame {
    /// 列データ
    columns: HashMap<String, Series>,

    /// 列の追加順序
    column_order: Vec<String>,

    /// 行数
    row_count: usize,
}

impl DataFrame {
    /// 新しい空のDataFrameを作成
    pub fn new() -> Self {
        DataFrame {
            columns: HashMap::new(),
            column_order: Vec::new(),
            row_count: 0,
        }
    }

    /// 列を追加
    ///
    /// 最初の列が行数を決定し、以降の列は同じ長さでなければなりません。
    pub fn add_column(&mut self, name: String, series: Series) -> Result<&mut Self> {
        if self.columns.contains_key(&name) {
            return Err(Error::DuplicateColumnName(name));
        }

        if !self.columns.is_empty() && series.len() != self.row_count {
            return Err(Error::LengthMismatch {
                expected: self.row_count,
                actual: series.len(),
            });
        }

        self.row_count = series.len();
        self.column_order.push(name.clone());
        self.columns.insert(name, series);

        log::debug!(
            "列を追加しました: 列数={}, 行数={}",
            self.column_order.len(),
            self.row_count
        );

        Ok(self)
    }

    /// 列を名前で取得
    pub fn column(&self, name: &str) -> Option<&Series> {
        self.columns.get(name)
    }

    /// 列が存在するかどうかをチェック
    pub fn contains_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// 列名の一覧を追加順で取得
    pub fn column_names(&self) -> &[String] {
        &self.column_order
    }

    /// 行数を取得
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// 列数を取得
    pub fn column_count(&self) -> usize {
        self.column_order.len()
    }

    /// 列を取得し、存在しない場合はエラーを返す
    pub(crate) fn column_or_err(&self, name: &str) -> Result<&Series> {
        self.columns
            .get(name)
            .ok_or_else(|| Error::ColumnNotFound(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataframe_creation() {
        let mut df = DataFrame::new();
        df.add_column(
            "a".to_string(),
            Series::from_i64(vec![1, 2, 3], Some("a".to_string())).unwrap(),
        )
        .unwrap();
        df.add_column(
            "b".to_string(),
            Series::from_str_values(vec!["x", "y", "z"], Some("b".to_string())).unwrap(),
        )
        .unwrap();

        assert_eq!(df.row_count(), 3);
        assert_eq!(df.column_count(), 2);
        assert_eq!(df.column_names(), &["a".to_string(), "b".to_string()]);
        assert!(df.contains_column("a"));
        assert!(!df.contains_column("c"));
    }

    #[test]
    fn test_duplicate_column_rejected() {
        let mut df = DataFrame::new();
        df.add_column(
            "a".to_string(),
            Series::from_i64(vec![1, 2], None).unwrap(),
        )
        .unwrap();
        let result = df.add_column(
            "a".to_string(),
            Series::from_i64(vec![3, 4], None).unwrap(),
        );
        assert!(matches!(result, Err(Error::DuplicateColumnName(_))));
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let mut df = DataFrame::new();
        df.add_column(
            "a".to_string(),
            Series::from_i64(vec![1, 2, 3], None).unwrap(),
        )
        .unwrap();
        let result = df.add_column(
            "b".to_string(),
            Series::from_i64(vec![1, 2], None).unwrap(),
        );
        assert!(matches!(
            result,
            Err(Error::LengthMismatch {
                expected: 3,
                actual: 2
            })
        ));
    }
}
