use anyhow::{anyhow, Context, Result};
use buzz_server::api::{AppState, FlashSigner, RestApi};
use buzz_server::config::{self, LogConfig};
use buzz_server::redis::{ConnectionPool, RedisCounter, RedisPool};
use buzz_server::storage::{database, run_migrations, PgBuzzRepository};
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化配置
    let app_config = config::load_config().context("無法載入配置")?;

    // 初始化日誌系統
    init_logging(&app_config.log)?;

    // 資料庫連線池與遷移
    let db_pool = database::init_pool(&app_config.database)
        .await
        .context("無法初始化資料庫連接池")?;
    run_migrations(&db_pool).await?;

    // Redis 計數器，暫時無法連線時仍啟動，計數請求回傳 503
    let redis_pool = ConnectionPool::from_config(&app_config.redis).context("無法初始化Redis連接池")?;
    if let Err(e) = redis_pool.ping().await {
        warn!("Redis 目前無法連線: {}", e);
    }
    let counter_key = redis_pool.counter_key().to_string();

    let state = AppState::new(
        Arc::new(PgBuzzRepository::new(db_pool.clone())),
        Arc::new(RedisCounter::new(Arc::new(redis_pool))),
        counter_key,
        FlashSigner::from_config(&app_config.session),
    );

    info!("伺服器初始化完成，監聽端口: {}", app_config.server.port);

    let rest_api = RestApi::new(app_config.server.clone(), state);
    rest_api.serve(shutdown_signal()).await?;

    db_pool.close().await;
    info!("伺服器已關閉");
    Ok(())
}

/// 等待 Ctrl-C 或 SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("接收到 Ctrl-C，正在退出..."),
            Err(err) => {
                error!("無法監聽關閉信號: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("接收到 SIGTERM，正在退出...");
            }
            Err(err) => {
                error!("無法監聽 SIGTERM: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

// 初始化日誌系統
fn init_logging(log_config: &LogConfig) -> Result<()> {
    // RUST_LOG 優先於配置檔
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_config.level.to_lowercase()))
        .map_err(|e| anyhow!("無效的日誌級別: {}", e))?;

    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let result = if log_config.format.eq_ignore_ascii_case("json") {
        builder.json().try_init()
    } else {
        builder.pretty().try_init()
    };
    result.map_err(|e| anyhow!("設置日誌系統失敗: {}", e))?;

    info!("日誌系統初始化完成");
    Ok(())
}
