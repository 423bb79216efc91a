use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use tracing::warn;

use crate::api::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    database: &'static str,
    redis: &'static str,
}

fn component(ok: bool) -> &'static str {
    if ok {
        "up"
    } else {
        "down"
    }
}

/// 同時檢查資料庫與 Redis，任一不可用時回傳 503
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let (database, redis) = tokio::join!(state.buzz.ping(), state.counter.ping());

    if let Err(e) = &database {
        warn!("資料庫健康檢查失敗: {}", e);
    }
    if let Err(e) = &redis {
        warn!("Redis健康檢查失敗: {}", e);
    }

    let healthy = database.is_ok() && redis.is_ok();
    let (code, status) = if healthy {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    let health_response = HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        database: component(database.is_ok()),
        redis: component(redis.is_ok()),
    };

    (code, Json(health_response))
}
