use num_traits::NumCast;

use crate::error::{Error, Result};
use crate::scalar::Scalar;

/// Series構造体: 一次元のScalar値の配列
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    /// Seriesのデータ値
    values: Vec<Scalar>,

    /// 名前（オプション）
    name: Option<String>,
}

impl Series {
    /// 新しいSeriesをベクトルから作成
    pub fn new(values: Vec<Scalar>, name: Option<String>) -> Result<Self> {
        if values.is_empty() {
            return Err(Error::InvalidInput(
                "Seriesには少なくとも1つの値が必要です".to_string(),
            ));
        }

        Ok(Series { values, name })
    }

    /// 整数ベクトルからSeriesを作成
    pub fn from_i64(values: Vec<i64>, name: Option<String>) -> Result<Self> {
        Self::new(values.into_iter().map(Scalar::Int64).collect(), name)
    }

    /// 浮動小数点ベクトルからSeriesを作成（NaNはNaに正規化される）
    pub fn from_f64(values: Vec<f64>, name: Option<String>) -> Result<Self> {
        Self::new(values.into_iter().map(Scalar::float).collect(), name)
    }

    /// 文字列ベクトルからSeriesを作成
    pub fn from_str_values(values: Vec<&str>, name: Option<String>) -> Result<Self> {
        Self::new(values.into_iter().map(Scalar::from).collect(), name)
    }

    /// 真偽値ベクトルからSeriesを作成
    pub fn from_bool(values: Vec<bool>, name: Option<String>) -> Result<Self> {
        Self::new(values.into_iter().map(Scalar::Bool).collect(), name)
    }

    /// 欠損値を含むベクトルからSeriesを作成（NoneはNa）
    pub fn from_options<T: Into<Scalar>>(
        values: Vec<Option<T>>,
        name: Option<String>,
    ) -> Result<Self> {
        Self::new(values.into_iter().map(Scalar::from).collect(), name)
    }

    /// 任意の数値型のベクトルからFloat64のSeriesを作成
    pub fn from_numeric<T: NumCast>(values: Vec<T>, name: Option<String>) -> Result<Self> {
        Self::new(
            values.into_iter().map(Scalar::from_numeric).collect(),
            name,
        )
    }

    /// Seriesの長さを取得
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Seriesが空かどうか
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// 位置から値を取得
    pub fn get(&self, pos: usize) -> Option<&Scalar> {
        self.values.get(pos)
    }

    /// 値の配列を取得
    pub fn values(&self) -> &[Scalar] {
        &self.values
    }

    /// 名前を取得
    pub fn name(&self) -> Option<&String> {
        self.name.as_ref()
    }

    /// 名前を設定
    pub fn with_name(mut self, name: String) -> Self {
        self.name = Some(name);
        self
    }

    /// 欠損値の個数を取得
    pub fn na_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_na()).count()
    }
}
