use std::fmt;

use lazy_static::lazy_static;
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

use crate::agg::aggregator::Aggregator;
use crate::error::{Error, Result};
use crate::scalar::Scalar;
use crate::stats;

/// fit関数: 1グループ分の特徴量値から集計結果を計算する
pub type FitFunc = fn(&[Scalar]) -> Scalar;

/// transform関数: (そのグループの集計結果m, 行自身の特徴量値f) から出力値を計算する
pub type TransformFunc = fn(&Scalar, &Scalar) -> Scalar;

/// 集計種別を表す列挙型
///
/// 7種類の固定された識別子からなる語彙で、文字列IDはバージョン間で
/// 安定しています。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AggKind {
    /// 特徴量とグループ平均の差
    DeltaMean,
    /// 特徴量とグループ中央値の差
    DeltaMedian,
    /// グループ最小値
    Min,
    /// グループ最大値
    Max,
    /// グループ標準偏差
    Std,
    /// グループ最頻値
    Mode,
    /// 特徴量がグループ最頻値と一致するか
    IsMode,
}

impl AggKind {
    /// 登録順のすべての集計種別
    pub const ALL: [AggKind; 7] = [
        AggKind::DeltaMean,
        AggKind::DeltaMedian,
        AggKind::Min,
        AggKind::Max,
        AggKind::Std,
        AggKind::Mode,
        AggKind::IsMode,
    ];

    /// 種別の文字列識別子を取得
    pub fn kind_id(&self) -> &'static str {
        match self {
            AggKind::DeltaMean => "delta_mean",
            AggKind::DeltaMedian => "delta_median",
            AggKind::Min => "min",
            AggKind::Max => "max",
            AggKind::Std => "std",
            AggKind::Mode => "mode",
            AggKind::IsMode => "is_mode",
        }
    }

    /// 文字列識別子から種別を取得
    pub fn parse(kind_id: &str) -> Option<AggKind> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.kind_id() == kind_id)
    }

    /// 登録順の全識別子を取得
    pub fn available_ids() -> Vec<&'static str> {
        Self::ALL.iter().map(|kind| kind.kind_id()).collect()
    }
}

impl fmt::Display for AggKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind_id())
    }
}

// 文字列識別子としてシリアライズする（永続化されたパイプラインとの互換性維持）
impl Serialize for AggKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.kind_id())
    }
}

impl<'de> Deserialize<'de> for AggKind {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        struct KindVisitor;

        impl Visitor<'_> for KindVisitor {
            type Value = AggKind;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                write!(formatter, "集計種別の識別子")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> std::result::Result<AggKind, E> {
                AggKind::parse(value).ok_or_else(|| {
                    E::custom(format!(
                        "未対応の集計種別です: {}, 対応種別={:?}",
                        value,
                        AggKind::available_ids()
                    ))
                })
            }
        }

        deserializer.deserialize_str(KindVisitor)
    }
}

/// カタログの1エントリ: 種別とそのfit/transform関数の不変なペア
pub struct KindEntry {
    pub kind: AggKind,
    pub fit_func: FitFunc,
    pub transform_func: TransformFunc,
}

// delta系: f - m
fn transform_delta(fitted: &Scalar, feature: &Scalar) -> Scalar {
    feature.clone() - fitted.clone()
}

// broadcast系: グループの集計値をそのまま出力する
fn transform_broadcast(fitted: &Scalar, _feature: &Scalar) -> Scalar {
    fitted.clone()
}

// is_mode: 特徴量が最頻値と一致すれば1、そうでなければ0。欠損は伝播する。
fn transform_is_mode(fitted: &Scalar, feature: &Scalar) -> Scalar {
    if fitted.is_na() || feature.is_na() {
        return Scalar::Na;
    }
    Scalar::Int64(if fitted == feature { 1 } else { 0 })
}

lazy_static! {
    // プロセス開始時に一度だけ登録される不変なカタログ
    static ref CATALOG: Vec<KindEntry> = vec![
        KindEntry {
            kind: AggKind::DeltaMean,
            fit_func: stats::nan_mean,
            transform_func: transform_delta,
        },
        KindEntry {
            kind: AggKind::DeltaMedian,
            fit_func: stats::nan_median,
            transform_func: transform_delta,
        },
        KindEntry {
            kind: AggKind::Min,
            fit_func: stats::nan_min,
            transform_func: transform_broadcast,
        },
        KindEntry {
            kind: AggKind::Max,
            fit_func: stats::nan_max,
            transform_func: transform_broadcast,
        },
        KindEntry {
            kind: AggKind::Std,
            fit_func: stats::nan_std,
            transform_func: transform_broadcast,
        },
        KindEntry {
            kind: AggKind::Mode,
            fit_func: stats::mode,
            transform_func: transform_broadcast,
        },
        KindEntry {
            kind: AggKind::IsMode,
            fit_func: stats::mode,
            transform_func: transform_is_mode,
        },
    ];
}

/// 集計種別のカタログ
///
/// 種別識別子から対応するfit/transform関数ペアを引き、
/// 未学習のAggregatorを構築します。
pub struct AggregationCatalog;

impl AggregationCatalog {
    /// 識別子に対応する新しいAggregatorを取得
    pub fn get(kind_id: &str) -> Result<Aggregator> {
        match CATALOG.iter().find(|entry| entry.kind.kind_id() == kind_id) {
            Some(entry) => Ok(Aggregator::new(
                entry.kind,
                entry.fit_func,
                entry.transform_func,
            )),
            None => Err(Error::UnsupportedKind {
                kind: kind_id.to_string(),
                available: AggKind::available_ids(),
            }),
        }
    }

    /// 種別に対応する新しいAggregatorを取得
    pub fn get_kind(kind: AggKind) -> Aggregator {
        // カタログはALLのすべての種別を登録しているため必ず見つかる
        let entry = CATALOG
            .iter()
            .find(|entry| entry.kind == kind)
            .unwrap_or_else(|| unreachable!("カタログに未登録の種別: {}", kind));
        Aggregator::new(entry.kind, entry.fit_func, entry.transform_func)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_id_round_trip() {
        for kind in AggKind::ALL {
            assert_eq!(AggKind::parse(kind.kind_id()), Some(kind));
        }
        assert_eq!(AggKind::parse("bogus"), None);
    }

    #[test]
    fn test_registration_order() {
        assert_eq!(
            AggKind::available_ids(),
            vec![
                "delta_mean",
                "delta_median",
                "min",
                "max",
                "std",
                "mode",
                "is_mode"
            ]
        );
    }

    #[test]
    fn test_serde_uses_id_string() {
        let json = serde_json::to_string(&AggKind::DeltaMean).unwrap();
        assert_eq!(json, "\"delta_mean\"");
        let kind: AggKind = serde_json::from_str("\"is_mode\"").unwrap();
        assert_eq!(kind, AggKind::IsMode);
    }
}
