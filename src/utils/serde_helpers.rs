// utils/serde_helpers.rs - 序列化與反序列化輔助函數
use serde::{Deserialize, Deserializer};

/// 將空字符串反序列化為None
///
/// 查詢參數 `?urltext=` 與未提供該參數視為相同。
///
/// ```
/// use serde::Deserialize;
/// use buzz_server::utils::serde_helpers::empty_string_as_none;
///
/// #[derive(Deserialize)]
/// struct Query {
///     #[serde(default, deserialize_with = "empty_string_as_none")]
///     urltext: Option<String>,
/// }
/// ```
pub fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = Option::<String>::deserialize(deserializer)?;
    Ok(s.filter(|s| !s.is_empty()))
}
