use thiserror::Error;

/// 配置驗證錯誤
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("缺少必要配置項: {0}")]
    MissingField(String),

    #[error("無效的配置值: {0}")]
    InvalidValue(String),

    #[error("配置範圍錯誤: {field} 的值 {value} 不在範圍 {min}..{max} 內")]
    RangeError {
        field: String,
        value: String,
        min: String,
        max: String,
    },

    #[error("配置長度不足: {field} 至少需要 {min} 個字元")]
    TooShort { field: String, min: usize },

    #[error("依賴錯誤: {dependent} 依賴於 {dependency} 的配置")]
    DependencyError {
        dependent: String,
        dependency: String,
    },
}

/// 配置驗證器trait
pub trait Validator {
    /// 驗證配置
    fn validate(&self) -> Result<(), ValidationError>;
}

/// 驗證工具函數
pub struct ValidationUtils;

impl ValidationUtils {
    /// 驗證配置值是否在指定範圍內（含端點）
    pub fn in_range<T>(value: T, min: T, max: T, field_name: &str) -> Result<(), ValidationError>
    where
        T: PartialOrd + ToString,
    {
        if value < min || value > max {
            return Err(ValidationError::RangeError {
                field: field_name.to_string(),
                value: value.to_string(),
                min: min.to_string(),
                max: max.to_string(),
            });
        }
        Ok(())
    }

    /// 驗證字串是否為選項之一，不分大小寫
    pub fn one_of(value: &str, options: &[&str], field_name: &str) -> Result<(), ValidationError> {
        if !options.iter().any(|option| option.eq_ignore_ascii_case(value)) {
            return Err(ValidationError::InvalidValue(format!(
                "{} 的值 {} 不是有效選項: {:?}",
                field_name, value, options
            )));
        }
        Ok(())
    }

    /// 檢查必要的字串欄位是否有值
    pub fn not_empty(value: &str, field_name: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::MissingField(field_name.to_string()));
        }
        Ok(())
    }

    /// 檢查字串長度下限，用於簽名金鑰
    pub fn min_length(value: &str, min: usize, field_name: &str) -> Result<(), ValidationError> {
        Self::not_empty(value, field_name)?;
        if value.chars().count() < min {
            return Err(ValidationError::TooShort {
                field: field_name.to_string(),
                min,
            });
        }
        Ok(())
    }

    /// 檢查連線字串是否使用允許的協定
    pub fn url_scheme(value: &str, schemes: &[&str], field_name: &str) -> Result<(), ValidationError> {
        Self::not_empty(value, field_name)?;
        let scheme = value.split_once("://").map(|(scheme, _)| scheme);
        match scheme {
            Some(scheme) if schemes.contains(&scheme) => Ok(()),
            _ => Err(ValidationError::InvalidValue(format!(
                "{} 必須以 {:?} 其中之一開頭: {}",
                field_name, schemes, value
            ))),
        }
    }

    /// 檢查兩個欄位的依賴關係
    pub fn check_dependency(
        has_dependent: bool,
        has_dependency: bool,
        dependent_name: &str,
        dependency_name: &str,
    ) -> Result<(), ValidationError> {
        if has_dependent && !has_dependency {
            return Err(ValidationError::DependencyError {
                dependent: dependent_name.to_string(),
                dependency: dependency_name.to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use rstest::rstest;

    #[rstest]
    #[case(5000, true)]
    #[case(1, true)]
    #[case(65535, true)]
    #[case(0, false)]
    fn test_in_range(#[case] port: u32, #[case] ok: bool) {
        assert_eq!(ValidationUtils::in_range(port, 1, 65535, "server.port").is_ok(), ok);
    }

    #[test]
    fn test_in_range_error_fields() {
        let err = ValidationUtils::in_range(15, 1, 10, "redis.pool_size").unwrap_err();
        assert_eq!(
            err,
            ValidationError::RangeError {
                field: "redis.pool_size".to_string(),
                value: "15".to_string(),
                min: "1".to_string(),
                max: "10".to_string(),
            }
        );
    }

    #[rstest]
    #[case("json", true)]
    #[case("JSON", true)]
    #[case("xml", false)]
    fn test_one_of(#[case] value: &str, #[case] ok: bool) {
        let result = ValidationUtils::one_of(value, &["pretty", "json"], "log.format");
        assert_eq!(result.is_ok(), ok);
        if let Err(err) = result {
            assert!(err.to_string().contains("log.format"));
        }
    }

    #[test]
    fn test_not_empty() {
        assert!(ValidationUtils::not_empty("buzz", "database.database").is_ok());
        assert_matches!(
            ValidationUtils::not_empty("   ", "database.host"),
            Err(ValidationError::MissingField(field)) if field == "database.host"
        );
    }

    #[test]
    fn test_min_length() {
        assert!(ValidationUtils::min_length("0123456789abcdef", 16, "session.secret_key").is_ok());
        assert_matches!(
            ValidationUtils::min_length("short", 16, "session.secret_key"),
            Err(ValidationError::TooShort { min: 16, .. })
        );
        assert_matches!(
            ValidationUtils::min_length("", 16, "session.secret_key"),
            Err(ValidationError::MissingField(_))
        );
    }

    #[rstest]
    #[case("redis://localhost:6379", true)]
    #[case("rediss://cache.internal:6380", true)]
    #[case("http://localhost:6379", false)]
    #[case("localhost:6379", false)]
    fn test_url_scheme(#[case] url: &str, #[case] ok: bool) {
        let result = ValidationUtils::url_scheme(url, &["redis", "rediss"], "redis.url");
        assert_eq!(result.is_ok(), ok);
    }

    #[test]
    fn test_check_dependency() {
        assert!(ValidationUtils::check_dependency(true, true, "server.enable_cors", "server.cors_allowed_origins").is_ok());
        assert!(ValidationUtils::check_dependency(false, false, "server.enable_cors", "server.cors_allowed_origins").is_ok());

        assert_matches!(
            ValidationUtils::check_dependency(true, false, "server.enable_cors", "server.cors_allowed_origins"),
            Err(ValidationError::DependencyError { dependent, .. }) if dependent == "server.enable_cors"
        );
    }
}
