use chrono::NaiveDate;
use serde::{Serialize, Serializer};
use std::fmt;

/// 公司識別碼
///
/// 整數欄位依數值排序，其他型別的欄位以字串保存並依字典序排序。
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CompanyId {
    Int(i64),
    Text(String),
}

impl fmt::Display for CompanyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompanyId::Int(id) => write!(f, "{}", id),
            CompanyId::Text(id) => f.write_str(id),
        }
    }
}

impl Serialize for CompanyId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CompanyId::Int(id) => serializer.serialize_i64(*id),
            CompanyId::Text(id) => serializer.serialize_str(id),
        }
    }
}

impl From<i64> for CompanyId {
    fn from(id: i64) -> Self {
        CompanyId::Int(id)
    }
}

impl From<&str> for CompanyId {
    fn from(id: &str) -> Self {
        CompanyId::Text(id.to_string())
    }
}

/// 合併後的單筆日觀測值
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyObservation {
    pub id: CompanyId,
    pub date: NaiveDate,
    pub value: i64,
}

/// 重新索引後的網格列，`value` 為 None 表示當日沒有觀測
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DenseRow {
    pub date: NaiveDate,
    pub id: CompanyId,
    pub value: Option<i64>,
}

/// 匯出列，欄位順序即 CSV 欄位順序
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergedRow {
    pub date: NaiveDate,
    pub id: CompanyId,
    pub value: Option<i64>,
    pub difference: Option<i64>,
}
