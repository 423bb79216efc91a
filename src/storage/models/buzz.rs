use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// URL 欄位長度上限，對應資料表 `VARCHAR(256)`
pub const MAX_URL_LENGTH: usize = 256;

/// Buzz 項目模型
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Buzz {
    pub id: i32,
    pub url: String,
    pub pub_date: DateTime<Utc>,
}

/// Buzz 插入模型，未指定 `pub_date` 時使用當前時間
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuzzInsert {
    pub url: String,
    #[serde(default)]
    pub pub_date: Option<DateTime<Utc>>,
}

impl BuzzInsert {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            pub_date: None,
        }
    }

    pub fn resolved_pub_date(&self) -> DateTime<Utc> {
        self.pub_date.unwrap_or_else(Utc::now)
    }
}

/// Buzz 更新模型，None 欄位保持不變
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuzzUpdate {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub pub_date: Option<DateTime<Utc>>,
}

/// 列表查詢條件
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuzzFilter {
    /// URL 需包含的文字
    pub urltext: Option<String>,
    /// 最多返回的筆數
    pub limit: Option<i64>,
}

/// 檢查 URL 非空且不超過欄位長度
pub fn validate_url(url: &str) -> Result<(), String> {
    if url.trim().is_empty() {
        return Err("url must not be empty".to_string());
    }
    if url.chars().count() > MAX_URL_LENGTH {
        return Err(format!("url must be at most {} characters", MAX_URL_LENGTH));
    }
    Ok(())
}
