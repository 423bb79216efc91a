//! 請求計數器使用的 Redis 連接池

use crate::config::types::RedisConfig;
use async_trait::async_trait;
use deadpool::managed::QueueMode;
use deadpool_redis::{
    redis::{cmd, RedisError},
    Config, Connection, CreatePoolError, Pool, PoolConfig, PoolError, Runtime, Timeouts,
};
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

/// 閒置連接回收前的檢查逾時
const RECYCLE_TIMEOUT: Duration = Duration::from_secs(60);

/// Redis連接池錯誤
#[derive(Error, Debug)]
pub enum RedisPoolError {
    #[error("Redis連接池初始化錯誤: {0}")]
    Init(#[from] CreatePoolError),

    #[error("無法從連接池獲取連接: {0}")]
    Checkout(#[from] PoolError),

    #[error("Redis命令失敗: {0}")]
    Command(#[from] RedisError),

    #[error("PING 回應異常: {0}")]
    UnexpectedReply(String),
}

/// 計數器取得連接的來源
#[async_trait]
pub trait RedisPool: Send + Sync + 'static {
    async fn get_conn(&self) -> Result<Connection, RedisPoolError>;

    /// 以 PING 確認 Redis 可用
    async fn ping(&self) -> Result<(), RedisPoolError>;
}

/// deadpool-redis 連接池，連同計數器使用的鍵
pub struct ConnectionPool {
    pool: Pool,
    counter_key: String,
}

impl ConnectionPool {
    /// 依配置建立連接池，第一次取得連接前不會連線
    pub fn from_config(config: &RedisConfig) -> Result<Self, RedisPoolError> {
        let connect_timeout = Duration::from_secs(config.connection_timeout_secs);

        let mut cfg = Config::from_url(&config.url);
        cfg.pool = Some(PoolConfig {
            max_size: config.pool_size as usize,
            timeouts: Timeouts {
                wait: Some(connect_timeout),
                create: Some(connect_timeout),
                recycle: Some(RECYCLE_TIMEOUT),
            },
            queue_mode: QueueMode::Fifo,
        });

        let pool = cfg.create_pool(Some(Runtime::Tokio1))?;
        info!(
            "Redis連接池已建立，大小: {}，計數器鍵: {}",
            config.pool_size, config.counter_key
        );

        Ok(Self {
            pool,
            counter_key: config.counter_key.clone(),
        })
    }

    pub fn counter_key(&self) -> &str {
        &self.counter_key
    }

    pub fn max_size(&self) -> usize {
        self.pool.status().max_size
    }
}

#[async_trait]
impl RedisPool for ConnectionPool {
    async fn get_conn(&self) -> Result<Connection, RedisPoolError> {
        self.pool.get().await.map_err(|e| {
            warn!("無法從Redis連接池獲取連接: {}", e);
            RedisPoolError::from(e)
        })
    }

    async fn ping(&self) -> Result<(), RedisPoolError> {
        let mut conn = self.get_conn().await?;
        let reply: String = cmd("PING").query_async(&mut conn).await?;

        if reply == "PONG" {
            Ok(())
        } else {
            Err(RedisPoolError::UnexpectedReply(reply))
        }
    }
}
