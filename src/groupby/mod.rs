use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::scalar::Scalar;

/// キー列によって行位置を分割するグループインデックス
///
/// 一度構築したら不変で、複数のAggregatorから読み取り専用で共有できます。
/// キーの一意な値は昇順に並び、各行にはその値の位置がコードとして
/// 割り当てられます。欠損キー（Na）も1つの正当なキー値として独自の
/// グループを形成し、昇順の先頭に並びます。
#[derive(Debug, Clone)]
pub struct GroupIndex {
    /// 一意なキー値（昇順・重複なし）
    index: Vec<Scalar>,

    /// 各行のコード（indexにおけるキー値の位置）
    codes: Vec<usize>,

    /// 一意なキーの個数
    n_keys: usize,

    /// コードごとの行位置（元の行順を保持）
    members: Vec<Vec<usize>>,
}

impl GroupIndex {
    /// キー列からグループインデックスを構築
    pub fn build(keys: &[Scalar]) -> Result<Self> {
        if keys.is_empty() {
            return Err(Error::InvalidInput(
                "キー列には少なくとも1つの値が必要です".to_string(),
            ));
        }

        // 一意なキー値を昇順で取得
        let mut index: Vec<Scalar> = keys.to_vec();
        index.sort();
        index.dedup();

        let positions: HashMap<&Scalar, usize> = index
            .iter()
            .enumerate()
            .map(|(pos, key)| (key, pos))
            .collect();

        let codes: Vec<usize> = keys.iter().map(|key| positions[key]).collect();
        let n_keys = index.len();

        // 1回の線形走査でコードごとの行位置を収集（元の行順を保持）
        let mut members: Vec<Vec<usize>> = vec![Vec::new(); n_keys];
        for (row, &code) in codes.iter().enumerate() {
            members[code].push(row);
        }

        log::debug!(
            "グループインデックスを構築しました: 行数={}, グループ数={}",
            keys.len(),
            n_keys
        );

        Ok(GroupIndex {
            index,
            codes,
            n_keys,
            members,
        })
    }

    /// 一意なキー値を取得（昇順）
    pub fn index(&self) -> &[Scalar] {
        &self.index
    }

    /// 各行のコードを取得
    pub fn codes(&self) -> &[usize] {
        &self.codes
    }

    /// 一意なキーの個数を取得
    pub fn n_keys(&self) -> usize {
        self.n_keys
    }

    /// コードごとの行位置を取得
    pub fn members(&self) -> &[Vec<usize>] {
        &self.members
    }

    /// インデックス構築時の行数を取得
    pub fn row_count(&self) -> usize {
        self.codes.len()
    }

    /// 各グループの値に対して関数を適用
    ///
    /// グループkごとに、`values`をmembers\[k\]の位置に制限したリストへ
    /// `func`を評価し、グループ数と同じ長さの結果を返します。
    pub fn apply<F>(&self, func: F, values: &[Scalar]) -> Result<Vec<Scalar>>
    where
        F: Fn(&[Scalar]) -> Scalar,
    {
        if values.len() != self.codes.len() {
            return Err(Error::LengthMismatch {
                expected: self.codes.len(),
                actual: values.len(),
            });
        }

        let mut results = Vec::with_capacity(self.n_keys);
        let mut group_values: Vec<Scalar> = Vec::new();

        for rows in &self.members {
            group_values.clear();
            group_values.extend(rows.iter().map(|&row| values[row].clone()));
            results.push(func(&group_values));
        }

        Ok(results)
    }

    /// 複数の関数をそれぞれ対応するベクトルへ並列に適用
    ///
    /// グループごとに、関数リストと同じ長さの結果リストを返します。
    pub fn apply_multi(
        &self,
        funcs: &[&dyn Fn(&[Scalar]) -> Scalar],
        vectors: &[&[Scalar]],
    ) -> Result<Vec<Vec<Scalar>>> {
        if funcs.len() != vectors.len() {
            return Err(Error::LengthMismatch {
                expected: funcs.len(),
                actual: vectors.len(),
            });
        }

        for vector in vectors {
            if vector.len() != self.codes.len() {
                return Err(Error::LengthMismatch {
                    expected: self.codes.len(),
                    actual: vector.len(),
                });
            }
        }

        let mut results = Vec::with_capacity(self.n_keys);
        let mut group_values: Vec<Scalar> = Vec::new();

        for rows in &self.members {
            let mut per_group = Vec::with_capacity(funcs.len());
            for (func, vector) in funcs.iter().zip(vectors.iter()) {
                group_values.clear();
                group_values.extend(rows.iter().map(|&row| vector[row].clone()));
                per_group.push(func(&group_values));
            }
            results.push(per_group);
        }

        Ok(results)
    }
}
