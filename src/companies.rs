//! 公司資料合併管線
//!
//! 將上傳的 `companies.csv`（參考表）與 `daily.csv`（日序列）合併為一份
//! 清理過的匯出檔。流程分為四個階段：
//! - 上傳驗證：確認兩個檔案存在且為 `text/csv`，並解析為 DataFrame
//! - 合併：依 `id` 做內連接，`date` 轉為日期、`value` 轉為整數
//! - 區間補齊：決定日期區間後，將 (date, id) 重新索引到完整的日曆網格
//! - 差分：每個 `id` 內去除零值與缺值後計算 n 期差分
//!
//! 任何階段失敗都會轉換為 [`TransformOutcome`]，不會部分成功。

pub mod difference;
pub mod error;
pub mod export;
pub mod merge;
pub mod model;
pub mod pipeline;
pub mod reader;
pub mod reindex;
pub mod upload;
pub mod window;

pub use difference::{apply_differences, n_period_difference, parse_periods, DEFAULT_PERIODS};
pub use error::{ErrorKind, TransformError, TransformResult};
pub use export::{write_export_csv, EXPORT_CONTENT_TYPE, EXPORT_FILE_NAME, EXPORT_HEADER};
pub use merge::merge_tables;
pub use model::{CompanyId, DailyObservation, DenseRow, MergedRow};
pub use pipeline::{process_uploads, run_transform, transform_companies_data, TransformOptions, TransformOutcome};
pub use reader::{CsvReader, CsvReaderConfig};
pub use reindex::{dense_reindex, group_daily_totals, DailyTotals};
pub use upload::{validate_uploads, CompanyUploads, UploadedFile, UploadedTables};
pub use window::{parse_form_date, DateWindow};
