//! # GroupRS
//!
//! グループ別の統計量を学習し、各行へ派生特徴量としてブロードキャストする
//! 集計エンジンです。キー列で行を分割するGroupIndex、7種類の集計種別を
//! 登録するAggregationCatalog、fit/transformプロトコルを実装するAggregator
//! から構成されます。
//!
//! ```rust
//! use grouprs::{AggregationCatalog, DataFrame, GroupIndex, Series, TransformOptions};
//!
//! let mut df = DataFrame::new();
//! df.add_column(
//!     "city".to_string(),
//!     Series::from_str_values(vec!["tokyo", "tokyo", "osaka"], Some("city".to_string())).unwrap(),
//! ).unwrap();
//! df.add_column(
//!     "price".to_string(),
//!     Series::from_f64(vec![100.0, 200.0, 50.0], Some("price".to_string())).unwrap(),
//! ).unwrap();
//!
//! let index = GroupIndex::build(df.column("city").unwrap().values()).unwrap();
//! let mut agg = AggregationCatalog::get("delta_mean").unwrap();
//! agg.fit(&df, &index, "price").unwrap();
//!
//! let derived = agg
//!     .transform(&df, &TransformOptions::new("city", "price"))
//!     .unwrap();
//! assert_eq!(derived.len(), df.row_count());
//! ```

pub mod agg;
pub mod dataframe;
pub mod error;
pub mod groupby;
pub mod parallel;
pub mod scalar;
pub mod series;
pub mod stats;

// Re-export commonly used types
pub use agg::{AggKind, AggregationCatalog, Aggregator, TransformOptions};
pub use dataframe::DataFrame;
pub use error::{Error, Result};
pub use groupby::GroupIndex;
pub use parallel::{par_fit_all, par_transform, FitSpec};
pub use scalar::Scalar;
pub use series::Series;

// Export version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
