// utils.rs - 公共工具模組
//
// 提供日期解析與序列化輔助函數，供合併管線與 API 層共用。

pub mod serde_helpers;
pub mod time_utils;

pub use serde_helpers::empty_string_as_none;
pub use time_utils::{parse_flexible_date, parse_iso_date, ISO_DATE_FORMAT};
