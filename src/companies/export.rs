//! 匯出 CSV

use csv::WriterBuilder;

use super::error::TransformResult;
use super::model::MergedRow;

/// 下載檔名
pub const EXPORT_FILE_NAME: &str = "export.csv";
/// 下載內容類型
pub const EXPORT_CONTENT_TYPE: &str = "text/csv";
/// 匯出欄位
pub const EXPORT_HEADER: [&str; 4] = ["date", "id", "value", "difference"];

/// 序列化匯出列；即使沒有任何列也會寫出標題
///
/// 未定義的 `value`/`difference` 寫為空欄位。
pub fn write_export_csv(rows: &[MergedRow]) -> TransformResult<Vec<u8>> {
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(Vec::new());

    writer.write_record(EXPORT_HEADER)?;
    for row in rows {
        writer.serialize(row)?;
    }

    writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()).into())
}
