//! 上傳檔案驗證

use polars::prelude::DataFrame;
use tracing::debug;

use super::error::{TransformError, TransformResult};
use super::reader::CsvReader;

/// 公司參考表的表單欄位名稱
pub const COMPANIES_FIELD: &str = "companies";
/// 日序列表的表單欄位名稱
pub const DAILY_FIELD: &str = "daily";
/// 接受的上傳內容類型
pub const CSV_CONTENT_TYPE: &str = "text/csv";

/// 單一上傳檔案
#[derive(Debug, Clone, Default)]
pub struct UploadedFile {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

impl UploadedFile {
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: Some(file_name.into()),
            content_type: Some(content_type.into()),
            data: data.into(),
        }
    }

    /// 表單送出但未選擇檔案時檔名為空，視同缺檔
    pub fn is_present(&self) -> bool {
        self.file_name.as_deref().is_some_and(|name| !name.is_empty())
    }

    /// 比對內容類型本體，忽略參數（例如 `charset`）與大小寫
    pub fn is_csv(&self) -> bool {
        self.content_type
            .as_deref()
            .and_then(|ct| ct.split(';').next())
            .is_some_and(|essence| essence.trim().eq_ignore_ascii_case(CSV_CONTENT_TYPE))
    }
}

/// 一次上傳請求中的兩個檔案欄位
#[derive(Debug, Clone, Default)]
pub struct CompanyUploads {
    pub companies: Option<UploadedFile>,
    pub daily: Option<UploadedFile>,
}

/// 通過驗證並解析完成的兩張表
#[derive(Debug, Clone)]
pub struct UploadedTables {
    pub companies: DataFrame,
    pub daily: DataFrame,
}

/// 驗證上傳並解析兩個檔案
///
/// 缺檔優先於型別檢查；CSV 解析錯誤以一般轉換錯誤傳回。
pub fn validate_uploads(uploads: &CompanyUploads, reader: &CsvReader) -> TransformResult<UploadedTables> {
    let (companies, daily) = match (&uploads.companies, &uploads.daily) {
        (Some(companies), Some(daily)) if companies.is_present() && daily.is_present() => (companies, daily),
        _ => return Err(TransformError::UploadMissing),
    };

    for (field, file) in [(COMPANIES_FIELD, companies), (DAILY_FIELD, daily)] {
        if !file.is_csv() {
            return Err(TransformError::UploadTypeMismatch {
                field: field.to_string(),
                content_type: file.content_type.clone().unwrap_or_default(),
            });
        }
    }

    let daily = reader.read_bytes(&daily.data)?;
    let companies = reader.read_bytes(&companies.data)?;
    debug!("上傳檔案解析完成: companies {} 列, daily {} 列", companies.height(), daily.height());

    Ok(UploadedTables { companies, daily })
}
