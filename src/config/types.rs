use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::validation::{ValidationError, ValidationUtils, Validator};

/// 應用程序配置結構
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub log: LogConfig,
    pub server: ServerConfig,
    pub session: SessionConfig,
}

impl Validator for ApplicationConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        // 驗證各個部分的配置
        self.database.validate()?;
        self.redis.validate()?;
        self.log.validate()?;
        self.server.validate()?;
        self.session.validate()?;

        Ok(())
    }
}

/// 數據庫配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub max_lifetime_secs: u64,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
}

impl Validator for DatabaseConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        ValidationUtils::not_empty(&self.host, "database.host")?;
        ValidationUtils::not_empty(&self.username, "database.username")?;
        ValidationUtils::not_empty(&self.database, "database.database")?;
        ValidationUtils::in_range(self.port, 1, 65535, "database.port")?;
        ValidationUtils::in_range(self.max_connections, self.min_connections.max(1), 1000, "database.max_connections")?;

        Ok(())
    }
}

impl DatabaseConfig {
    /// 組合 PostgreSQL 連線字串
    pub fn url(&self) -> String {
        format!(
            "postgresql://{}:{}@{}:{}/{}",
            self.username, self.password, self.host, self.port, self.database
        )
    }

    /// 獲取最大生命週期持續時間
    pub fn max_lifetime(&self) -> Duration {
        Duration::from_secs(self.max_lifetime_secs)
    }

    /// 獲取獲取連接超時持續時間
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }

    /// 獲取閒置超時持續時間
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }
}

/// Redis配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedisConfig {
    pub url: String,
    pub pool_size: u32,
    pub connection_timeout_secs: u64,
    /// 計數器使用的鍵
    #[serde(default = "default_counter_key")]
    pub counter_key: String,
}

fn default_counter_key() -> String {
    "counter".to_string()
}

impl Validator for RedisConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        ValidationUtils::url_scheme(&self.url, &["redis", "rediss"], "redis.url")?;
        ValidationUtils::in_range(self.pool_size, 1, 100, "redis.pool_size")?;
        ValidationUtils::in_range(self.connection_timeout_secs, 1, 60, "redis.connection_timeout_secs")?;
        ValidationUtils::not_empty(&self.counter_key, "redis.counter_key")?;

        Ok(())
    }
}

/// 日誌配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    pub level: String,
    pub format: String,
}

impl Validator for LogConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        // 驗證日誌級別
        ValidationUtils::one_of(
            &self.level,
            &["trace", "debug", "info", "warn", "error"],
            "log.level",
        )?;

        // 驗證日誌格式
        ValidationUtils::one_of(&self.format, &["pretty", "json"], "log.format")?;

        Ok(())
    }
}

/// 伺服器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// 單一請求逾時（秒）
    pub request_timeout: u64,
    /// 請求主體上限（位元組），上傳檔案受此限制
    pub max_body_size: usize,
    pub enable_compression: bool,
    pub enable_cors: bool,
    pub cors_allowed_origins: Vec<String>,
}

impl Validator for ServerConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        ValidationUtils::not_empty(&self.host, "server.host")?;
        ValidationUtils::in_range(self.port, 1, 65535, "server.port")?;
        ValidationUtils::in_range(self.request_timeout, 1, 3600, "server.request_timeout")?;
        ValidationUtils::in_range(self.max_body_size, 1024, 1 << 30, "server.max_body_size")?;

        // CORS設定驗證
        ValidationUtils::check_dependency(
            self.enable_cors,
            !self.cors_allowed_origins.is_empty(),
            "server.enable_cors",
            "server.cors_allowed_origins",
        )?;

        Ok(())
    }
}

impl ServerConfig {
    /// 獲取請求逾時持續時間
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }
}

/// 簽名金鑰最短長度
pub const MIN_SECRET_KEY_LENGTH: usize = 16;

/// 會話配置，用於簽署 flash 訊息
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub secret_key: String,
    #[serde(default = "default_flash_cookie")]
    pub flash_cookie: String,
}

fn default_flash_cookie() -> String {
    "buzz_flash".to_string()
}

impl Validator for SessionConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        ValidationUtils::min_length(&self.secret_key, MIN_SECRET_KEY_LENGTH, "session.secret_key")?;
        ValidationUtils::not_empty(&self.flash_cookie, "session.flash_cookie")?;

        Ok(())
    }
}
