// time_utils.rs
//
// 日期解析工具：
// 1. 表單參數使用嚴格的 ISO 日期格式
// 2. 上傳檔案中的日期欄位允許常見的日期或日期時間寫法，取其日期部分

use chrono::{NaiveDate, NaiveDateTime};

/// 表單日期參數格式
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// 以 `%Y-%m-%d` 解析日期，月與日可不補零（例如 `2017-1-3`）
pub fn parse_iso_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, ISO_DATE_FORMAT).ok()
}

/// 依序嘗試日期與日期時間格式
pub fn parse_flexible_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                .map(|dt| dt.date())
        })
}
