//! 集中化的 Redis 測試配置

use crate::config::types::RedisConfig;
use crate::redis::pool::{ConnectionPool, RedisPool, RedisPoolError};
use std::sync::Arc;

/// 測試使用的計數器鍵，避免覆蓋正式資料
pub const TEST_COUNTER_KEY: &str = "buzz_test_counter";

/// Redis 測試配置建構器
pub struct RedisTestConfig;

impl RedisTestConfig {
    /// 獲取測試用 Redis URL
    ///
    /// 優先使用 REDIS_TEST_URL 環境變數，否則為 localhost:6379
    pub fn get_test_url() -> String {
        std::env::var("REDIS_TEST_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string())
    }

    /// 建立標準測試 Redis 配置
    pub fn create_test_config() -> RedisConfig {
        RedisConfig {
            url: Self::get_test_url(),
            pool_size: 3,
            connection_timeout_secs: 5,
            counter_key: TEST_COUNTER_KEY.to_string(),
        }
    }

    /// 建立測試用 Redis 連接池
    pub fn create_test_pool() -> Result<Arc<ConnectionPool>, RedisPoolError> {
        let pool = ConnectionPool::from_config(&Self::create_test_config())?;
        Ok(Arc::new(pool))
    }

    /// 檢查 Redis 是否可用於測試
    pub async fn is_redis_available() -> bool {
        match Self::create_test_pool() {
            Ok(pool) => pool.ping().await.is_ok(),
            Err(_) => false,
        }
    }

    /// 確保 Redis 可用於測試，不可用則 panic
    pub async fn ensure_redis_available(test_name: &str) {
        if !Self::is_redis_available().await {
            panic!("Redis 測試 '{}' 失敗 - Redis 環境不可用", test_name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_get_test_url_with_env_var() {
        std::env::set_var("REDIS_TEST_URL", "redis://custom:1234");

        let url = RedisTestConfig::get_test_url();
        assert_eq!(url, "redis://custom:1234");

        std::env::remove_var("REDIS_TEST_URL");
    }

    #[test]
    #[serial]
    fn test_create_test_config() {
        let config = RedisTestConfig::create_test_config();
        assert!(config.url.starts_with("redis://"));
        assert_eq!(config.pool_size, 3);
        assert_eq!(config.counter_key, TEST_COUNTER_KEY);
    }
}
