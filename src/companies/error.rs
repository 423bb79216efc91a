//! 合併管線錯誤定義

use thiserror::Error;

/// 合併管線錯誤類型
///
/// 錯誤訊息會直接以 flash 訊息顯示給使用者，因此使用英文描述。
#[derive(Error, Debug)]
pub enum TransformError {
    #[error("Missing file(s): must be named 'companies.csv' and 'daily.csv'")]
    UploadMissing,

    #[error("File type mismatch: check that file types are text/csv ('{field}' was sent as '{content_type}')")]
    UploadTypeMismatch { field: String, content_type: String },

    #[error("{0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("'{column}' column is missing from {table}")]
    MissingColumn { table: String, column: String },

    #[error("'{column}' contains an empty cell")]
    EmptyCell { column: String },

    #[error("unknown date format: '{value}'")]
    InvalidDate { value: String },

    #[error("invalid literal for integer value: '{value}'")]
    InvalidValue { value: String },

    #[error("cannot convert non-finite values (NA or inf) to integer")]
    NonFiniteValue,

    #[error("integer overflow while summing values for id {id} on {date}")]
    ValueOverflow { id: String, date: String },

    #[error("time data '{value}' for {field} does not match format '%Y-%m-%d'")]
    InvalidFormDate { field: String, value: String },

    #[error("periods must be an integer, got '{value}'")]
    InvalidPeriods { value: String },

    #[error("cannot derive a date range: no rows left after joining daily and companies on 'id'")]
    EmptyMerge,

    #[error("failed to write export: {0}")]
    Export(#[from] csv::Error),
}

/// 錯誤分類，對應上傳缺漏、型別不符與轉換失敗三種情況
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    UploadMissing,
    UploadTypeMismatch,
    TransformFailure,
}

impl TransformError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TransformError::UploadMissing => ErrorKind::UploadMissing,
            TransformError::UploadTypeMismatch { .. } => ErrorKind::UploadTypeMismatch,
            _ => ErrorKind::TransformFailure,
        }
    }
}

/// 合併管線結果類型
pub type TransformResult<T> = Result<T, TransformError>;
