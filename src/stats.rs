//! 欠損値を除外して計算する統計関数モジュール
//!
//! 集計カタログのfit関数として使われます。欠損値（Na）や数値でない値は
//! 統計量の計算から除外されますが、行自体はグループに残ります。
//! 有効な値が1つも残らない場合はNaを返します。

use std::collections::HashMap;

use crate::scalar::Scalar;

// 数値として扱える値のみを抽出
fn numeric_values(values: &[Scalar]) -> Vec<f64> {
    values.iter().filter_map(|v| v.to_f64()).collect()
}

/// 欠損値を除外した平均
pub fn nan_mean(values: &[Scalar]) -> Scalar {
    let nums = numeric_values(values);
    if nums.is_empty() {
        return Scalar::Na;
    }
    Scalar::float(nums.iter().sum::<f64>() / nums.len() as f64)
}

/// 欠損値を除外した中央値
///
/// 件数が偶数の場合は中央2値の平均を取ります。
pub fn nan_median(values: &[Scalar]) -> Scalar {
    let mut nums = numeric_values(values);
    if nums.is_empty() {
        return Scalar::Na;
    }

    nums.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let count = nums.len();
    let median = if count % 2 == 0 {
        (nums[count / 2 - 1] + nums[count / 2]) / 2.0
    } else {
        nums[count / 2]
    };
    Scalar::float(median)
}

/// 欠損値を除外した最小値
///
/// 元の値の型を保ったまま返します（Int64の列ならInt64のまま）。
pub fn nan_min(values: &[Scalar]) -> Scalar {
    extremum(values, |candidate, best| candidate < best)
}

/// 欠損値を除外した最大値
pub fn nan_max(values: &[Scalar]) -> Scalar {
    extremum(values, |candidate, best| candidate > best)
}

fn extremum<F>(values: &[Scalar], better: F) -> Scalar
where
    F: Fn(f64, f64) -> bool,
{
    let mut best: Option<(f64, &Scalar)> = None;
    for value in values {
        if let Some(num) = value.to_f64() {
            match best {
                Some((best_num, _)) if !better(num, best_num) => {}
                _ => best = Some((num, value)),
            }
        }
    }
    match best {
        Some((_, value)) => value.clone(),
        None => Scalar::Na,
    }
}

/// 欠損値を除外した標準偏差（母集団標準偏差、ddof=0）
pub fn nan_std(values: &[Scalar]) -> Scalar {
    let nums = numeric_values(values);
    if nums.is_empty() {
        return Scalar::Na;
    }

    let count = nums.len() as f64;
    let mean = nums.iter().sum::<f64>() / count;
    let variance = nums.iter().map(|&x| (x - mean).powi(2)).sum::<f64>() / count;
    Scalar::float(variance.sqrt())
}

/// 最頻値
///
/// 欠損値は候補から除外します。最大頻度が複数の値で並んだ場合は、
/// Scalarの自然順序で最小の値を返します。
pub fn mode(values: &[Scalar]) -> Scalar {
    let mut counts: HashMap<&Scalar, usize> = HashMap::new();
    for value in values {
        if !value.is_na() {
            *counts.entry(value).or_insert(0) += 1;
        }
    }

    let mut best: Option<(&Scalar, usize)> = None;
    for (value, count) in counts {
        best = match best {
            None => Some((value, count)),
            Some((best_value, best_count)) => {
                if count > best_count || (count == best_count && value < best_value) {
                    Some((value, count))
                } else {
                    Some((best_value, best_count))
                }
            }
        };
    }

    match best {
        Some((value, _)) => value.clone(),
        None => Scalar::Na,
    }
}
