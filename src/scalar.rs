use std::cmp::Ordering;
use std::fmt::{self, Display};
use std::hash::{Hash, Hasher};
use std::ops::Sub;

use num_traits::NumCast;
use serde::{Deserialize, Serialize};

/// セル値を表現する型
///
/// グループキー・特徴量・集計結果のすべてをこの型で統一的に扱います。
/// 欠損値は`Na`バリアントで表現するため、OptionではなくScalar自体が
/// 欠損を持ちます。浮動小数点のNaNは構築時に`Na`へ正規化されます。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Scalar {
    /// 欠損値（NA, Not Available）
    Na,
    /// 64ビット整数値
    Int64(i64),
    /// 64ビット浮動小数点値
    Float64(f64),
    /// 文字列値
    Str(String),
    /// 真偽値
    Bool(bool),
}

impl Scalar {
    /// NaNをNaに正規化して浮動小数点値を作成
    pub fn float(value: f64) -> Self {
        if value.is_nan() {
            Scalar::Na
        } else {
            Scalar::Float64(value)
        }
    }

    /// 任意の数値型からFloat64のScalarを作成
    pub fn from_numeric<T: NumCast>(value: T) -> Self {
        match num_traits::cast::<T, f64>(value) {
            Some(v) => Scalar::float(v),
            None => Scalar::Na,
        }
    }

    /// 欠損値かどうかをチェック
    pub fn is_na(&self) -> bool {
        matches!(self, Scalar::Na)
    }

    /// 数値として取得（数値でない場合はNone）
    pub fn to_f64(&self) -> Option<f64> {
        match self {
            Scalar::Int64(v) => Some(*v as f64),
            Scalar::Float64(v) => Some(*v),
            Scalar::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            _ => None,
        }
    }

    // 異なる数値バリアント間の順序付けに使う数値キー
    fn numeric_key(&self) -> Option<f64> {
        match self {
            Scalar::Int64(v) => Some(*v as f64),
            Scalar::Float64(v) => Some(*v),
            _ => None,
        }
    }

    // バリアントの並び順: Na < Bool < Int64 < Float64 < Str
    fn type_rank(&self) -> u8 {
        match self {
            Scalar::Na => 0,
            Scalar::Bool(_) => 1,
            Scalar::Int64(_) => 2,
            Scalar::Float64(_) => 3,
            Scalar::Str(_) => 4,
        }
    }
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Scalar::Na, Scalar::Na) => true,
            (Scalar::Int64(a), Scalar::Int64(b)) => a == b,
            // 直接構築されたNaN同士は等しいものとして扱う
            (Scalar::Float64(a), Scalar::Float64(b)) => {
                a == b || (a.is_nan() && b.is_nan())
            }
            (Scalar::Str(a), Scalar::Str(b)) => a == b,
            (Scalar::Bool(a), Scalar::Bool(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Scalar {}

impl PartialOrd for Scalar {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Scalar {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Scalar::Na, Scalar::Na) => Ordering::Equal,
            (Scalar::Bool(a), Scalar::Bool(b)) => a.cmp(b),
            (Scalar::Int64(a), Scalar::Int64(b)) => a.cmp(b),
            (Scalar::Float64(a), Scalar::Float64(b)) => cmp_f64(*a, *b),
            (Scalar::Str(a), Scalar::Str(b)) => a.cmp(b),
            _ => {
                // 数値バリアント同士は値で比較し、同値ならバリアント順で決める
                if let (Some(a), Some(b)) = (self.numeric_key(), other.numeric_key()) {
                    match cmp_f64(a, b) {
                        Ordering::Equal => self.type_rank().cmp(&other.type_rank()),
                        ord => ord,
                    }
                } else {
                    self.type_rank().cmp(&other.type_rank())
                }
            }
        }
    }
}

// NaNは最大として扱う全順序比較（Eqと整合する）
fn cmp_f64(a: f64, b: f64) -> Ordering {
    match a.partial_cmp(&b) {
        Some(ord) => ord,
        None => a.is_nan().cmp(&b.is_nan()),
    }
}

impl Hash for Scalar {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Scalar::Na => {
                0u8.hash(state);
            }
            Scalar::Int64(v) => {
                1u8.hash(state);
                v.hash(state);
            }
            Scalar::Float64(v) => {
                2u8.hash(state);
                if v.is_nan() {
                    u64::MAX.hash(state);
                } else {
                    // -0.0と0.0を同一視するため正規化してからビット表現を使う
                    let normalized = if *v == 0.0 { 0.0f64 } else { *v };
                    normalized.to_bits().hash(state);
                }
            }
            Scalar::Str(v) => {
                3u8.hash(state);
                v.hash(state);
            }
            Scalar::Bool(v) => {
                4u8.hash(state);
                v.hash(state);
            }
        }
    }
}

impl Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Na => write!(f, "NA"),
            Scalar::Int64(v) => write!(f, "{}", v),
            Scalar::Float64(v) => write!(f, "{}", v),
            Scalar::Str(v) => write!(f, "{}", v),
            Scalar::Bool(v) => write!(f, "{}", v),
        }
    }
}

// 数値演算の実装（Sub）: どちらかがNaまたは非数値ならNaを返す
impl Sub for Scalar {
    type Output = Scalar;

    fn sub(self, other: Self) -> Self::Output {
        match (&self, &other) {
            (Scalar::Int64(a), Scalar::Int64(b)) => Scalar::Int64(a - b),
            _ => match (self.to_f64(), other.to_f64()) {
                (Some(a), Some(b)) => Scalar::float(a - b),
                _ => Scalar::Na,
            },
        }
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Int64(value)
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Scalar::Int64(value as i64)
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::float(value)
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Str(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Str(value)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

// From実装：Option<T>からScalarへの自動変換（NoneはNa）
impl<T: Into<Scalar>> From<Option<T>> for Scalar {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => Scalar::Na,
        }
    }
}
