use thiserror::Error;

/// エラー型の定義
#[derive(Error, Debug)]
pub enum Error {
    #[error("無効な入力です: {0}")]
    InvalidInput(String),

    #[error("列が見つかりません: {0}")]
    ColumnNotFound(String),

    #[error("列名が重複しています: {0}")]
    DuplicateColumnName(String),

    #[error("長さが一致しません: 期待値 {expected}, 実際 {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("未対応の集計種別です: {kind}, 対応種別={available:?}")]
    UnsupportedKind {
        kind: String,
        available: Vec<&'static str>,
    },

    #[error("transformの前にfitを呼び出す必要があります")]
    MustFitBeforeTransform,

    #[error("JSONエラー: {0}")]
    JsonError(String),
}

/// Resultの型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::JsonError(err.to_string())
    }
}
