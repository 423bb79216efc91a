use crate::redis::pool::{RedisPool, RedisPoolError};
use async_trait::async_trait;
use deadpool_redis::redis::AsyncCommands;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error};

/// 計數器錯誤
#[derive(Error, Debug)]
pub enum CounterError {
    /// 連接池錯誤
    #[error("計數器無法取得連接: {0}")]
    Pool(#[from] RedisPoolError),

    /// 命令執行錯誤
    #[error("計數器命令執行失敗: {0}")]
    Command(#[from] deadpool_redis::redis::RedisError),
}

/// 原子遞增計數器接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CounterStore: Send + Sync {
    /// 將 `key` 加一並返回新值，鍵不存在時從 0 開始
    async fn increment(&self, key: &str) -> Result<i64, CounterError>;

    /// 確認後端可用
    async fn ping(&self) -> Result<(), CounterError>;
}

/// 以 Redis INCR 實現的計數器
pub struct RedisCounter<P: RedisPool> {
    pool: Arc<P>,
}

impl<P: RedisPool> RedisCounter<P> {
    pub fn new(pool: Arc<P>) -> Self {
        Self { pool }
    }
}

impl<P: RedisPool> Clone for RedisCounter<P> {
    fn clone(&self) -> Self {
        Self {
            pool: Arc::clone(&self.pool),
        }
    }
}

#[async_trait]
impl<P: RedisPool> CounterStore for RedisCounter<P> {
    async fn increment(&self, key: &str) -> Result<i64, CounterError> {
        let mut conn = self.pool.get_conn().await?;

        match conn.incr::<_, _, i64>(key, 1).await {
            Ok(value) => {
                debug!("計數器 {} 遞增為 {}", key, value);
                Ok(value)
            }
            Err(e) => {
                error!("計數器 {} 遞增失敗: {}", key, e);
                Err(CounterError::Command(e))
            }
        }
    }

    async fn ping(&self) -> Result<(), CounterError> {
        Ok(self.pool.ping().await?)
    }
}
