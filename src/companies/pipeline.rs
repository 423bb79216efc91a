//! 管線組裝：驗證、合併、補齊與差分

use serde::Serialize;
use tracing::{debug, info, warn};

use super::difference::{apply_differences, parse_periods};
use super::error::{TransformError, TransformResult};
use super::merge::merge_tables;
use super::model::MergedRow;
use super::reader::CsvReader;
use super::reindex::{dense_reindex, group_daily_totals};
use super::upload::{validate_uploads, CompanyUploads, UploadedTables};
use super::window::{parse_form_date, DateWindow};

/// 成功時的訊息
pub const SUCCESS_MESSAGE: &str = "Successfully merged files";

/// 請求參數，保留原始字串，於管線內解析
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformOptions {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub n: Option<String>,
}

/// 管線結果
///
/// 失敗時 `table` 為 None，`message` 為錯誤描述；不存在部分成功。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransformOutcome {
    pub error: bool,
    pub message: String,
    #[serde(skip)]
    pub table: Option<Vec<MergedRow>>,
}

impl TransformOutcome {
    pub fn success(table: Vec<MergedRow>) -> Self {
        Self {
            error: false,
            message: SUCCESS_MESSAGE.to_string(),
            table: Some(table),
        }
    }

    pub fn failure(err: &TransformError) -> Self {
        Self {
            error: true,
            message: err.to_string(),
            table: None,
        }
    }

    /// 轉回 Result，方便以 `?` 串接
    pub fn into_result(self) -> Result<Vec<MergedRow>, String> {
        match self.table {
            Some(table) if !self.error => Ok(table),
            _ => Err(self.message),
        }
    }
}

/// 執行合併、補齊與差分，任一步驟失敗即返回錯誤
pub fn run_transform(tables: &UploadedTables, options: &TransformOptions) -> TransformResult<Vec<MergedRow>> {
    let observations = merge_tables(tables)?;

    let start = parse_form_date("start_date", options.start_date.as_deref())?;
    let end = parse_form_date("end_date", options.end_date.as_deref())?;
    let window = DateWindow::resolve(start, end, &observations)?;
    debug!("日期區間: {} ~ {} ({} 天)", window.start, window.end, window.len());

    let totals = group_daily_totals(&observations)?;
    let dense = dense_reindex(&totals, &window);
    debug!("重新索引完成: {} 個 (date, id) 組合, 共 {} 列", totals.len(), dense.len());

    let periods = parse_periods(options.n.as_deref())?;
    Ok(apply_differences(dense, periods))
}

/// 對已解析的兩張表執行管線，錯誤轉為失敗結果
pub fn transform_companies_data(tables: &UploadedTables, options: &TransformOptions) -> TransformOutcome {
    match run_transform(tables, options) {
        Ok(table) => {
            info!("合併完成，輸出 {} 列", table.len());
            TransformOutcome::success(table)
        }
        Err(err) => {
            warn!("合併失敗: {}", err);
            TransformOutcome::failure(&err)
        }
    }
}

/// 從上傳檔案開始執行完整流程
pub fn process_uploads(uploads: &CompanyUploads, options: &TransformOptions, reader: &CsvReader) -> TransformOutcome {
    match validate_uploads(uploads, reader) {
        Ok(tables) => transform_companies_data(&tables, options),
        Err(err) => {
            warn!("上傳驗證失敗: {}", err);
            TransformOutcome::failure(&err)
        }
    }
}
