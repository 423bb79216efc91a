use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, info};

use crate::storage::database;
use crate::storage::models::{Buzz, BuzzFilter, BuzzInsert, BuzzUpdate};

/// 初始資料
pub const SEED_URLS: [&str; 3] = [
    "http://www.google.com",
    "http://www.jobwaffle.com",
    "http://commandpages.com",
];

/// Buzz 數據庫操作接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BuzzRepository: Send + Sync {
    /// 根據ID獲取項目
    async fn get_by_id(&self, id: i32) -> Result<Option<Buzz>>;

    /// 依條件列出項目，依 id 排序
    async fn list(&self, filter: BuzzFilter) -> Result<Vec<Buzz>>;

    /// 創建項目
    async fn create(&self, buzz: BuzzInsert) -> Result<Buzz>;

    /// 更新項目，不存在時返回 None
    async fn update(&self, id: i32, changes: BuzzUpdate) -> Result<Option<Buzz>>;

    /// 刪除項目，返回是否有刪除
    async fn delete(&self, id: i32) -> Result<bool>;

    /// 確認資料庫可用
    async fn ping(&self) -> Result<()>;
}

/// PostgreSQL 實現
#[derive(Debug, Clone)]
pub struct PgBuzzRepository {
    pool: PgPool,
}

impl PgBuzzRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl BuzzRepository for PgBuzzRepository {
    async fn get_by_id(&self, id: i32) -> Result<Option<Buzz>> {
        let record = sqlx::query_as::<_, Buzz>(
            r#"
            SELECT id, url, pub_date
            FROM buzz
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    async fn list(&self, filter: BuzzFilter) -> Result<Vec<Buzz>> {
        debug!("查詢 buzz 列表: {:?}", filter);

        // LIMIT NULL 等同不限制
        let records = sqlx::query_as::<_, Buzz>(
            r#"
            SELECT id, url, pub_date
            FROM buzz
            WHERE $1::TEXT IS NULL OR strpos(url, $1) > 0
            ORDER BY id
            LIMIT $2
            "#,
        )
        .bind(filter.urltext)
        .bind(filter.limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    async fn create(&self, buzz: BuzzInsert) -> Result<Buzz> {
        let pub_date = buzz.resolved_pub_date();

        let record = sqlx::query_as::<_, Buzz>(
            r#"
            INSERT INTO buzz (url, pub_date)
            VALUES ($1, $2)
            RETURNING id, url, pub_date
            "#,
        )
        .bind(&buzz.url)
        .bind(pub_date)
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    async fn update(&self, id: i32, changes: BuzzUpdate) -> Result<Option<Buzz>> {
        let record = sqlx::query_as::<_, Buzz>(
            r#"
            UPDATE buzz
            SET
                url = COALESCE($1, url),
                pub_date = COALESCE($2, pub_date)
            WHERE id = $3
            RETURNING id, url, pub_date
            "#,
        )
        .bind(changes.url)
        .bind(changes.pub_date)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    async fn delete(&self, id: i32) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM buzz
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<()> {
        database::health_check(&self.pool).await
    }
}

/// 寫入初始資料；`reset` 為 true 時先清空資料表並重設序號
pub async fn seed_buzz(pool: &PgPool, reset: bool) -> Result<Vec<Buzz>> {
    let mut tx = pool.begin().await?;

    if reset {
        sqlx::query("TRUNCATE TABLE buzz RESTART IDENTITY")
            .execute(&mut *tx)
            .await?;
    }

    let mut created = Vec::with_capacity(SEED_URLS.len());
    for url in SEED_URLS {
        let buzz = sqlx::query_as::<_, Buzz>(
            r#"
            INSERT INTO buzz (url, pub_date)
            VALUES ($1, now())
            RETURNING id, url, pub_date
            "#,
        )
        .bind(url)
        .fetch_one(&mut *tx)
        .await?;
        created.push(buzz);
    }

    tx.commit().await?;
    info!("寫入 {} 筆初始 buzz 資料", created.len());

    Ok(created)
}
