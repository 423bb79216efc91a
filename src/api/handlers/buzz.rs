use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::api::templates::render_buzz_simple;
use crate::storage::{validate_url, Buzz, BuzzFilter, BuzzInsert, BuzzUpdate};
use crate::utils::empty_string_as_none;

/// 簡易頁面顯示的筆數
pub const SIMPLE_PAGE_LIMIT: i64 = 3;

#[derive(Debug, Default, Deserialize)]
pub struct BuzzListQuery {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub urltext: Option<String>,
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CounterResponse {
    pub counter: i64,
}

fn not_found(id: i32) -> ApiError {
    ApiError::NotFound(format!("buzz {}", id))
}

pub async fn list_buzz(
    State(state): State<AppState>,
    Query(query): Query<BuzzListQuery>,
) -> ApiResult<Json<Vec<Buzz>>> {
    if query.limit.is_some_and(|limit| limit < 0) {
        return Err(ApiError::BadRequest("limit must not be negative".to_string()));
    }

    let filter = BuzzFilter {
        urltext: query.urltext,
        limit: query.limit,
    };

    Ok(Json(state.buzz.list(filter).await?))
}

pub async fn create_buzz(
    State(state): State<AppState>,
    Json(payload): Json<BuzzInsert>,
) -> ApiResult<impl IntoResponse> {
    validate_url(&payload.url).map_err(ApiError::BadRequest)?;

    let buzz = state.buzz.create(payload).await?;
    info!("新增 buzz {}: {}", buzz.id, buzz.url);

    Ok((StatusCode::CREATED, Json(buzz)))
}

pub async fn get_buzz(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<Buzz>> {
    state
        .buzz
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| not_found(id))
}

pub async fn update_buzz(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(changes): Json<BuzzUpdate>,
) -> ApiResult<Json<Buzz>> {
    if let Some(url) = &changes.url {
        validate_url(url).map_err(ApiError::BadRequest)?;
    }

    state
        .buzz
        .update(id, changes)
        .await?
        .map(Json)
        .ok_or_else(|| not_found(id))
}

pub async fn delete_buzz(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<StatusCode> {
    if state.buzz.delete(id).await? {
        info!("刪除 buzz {}", id);
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

pub async fn simple_page(State(state): State<AppState>) -> ApiResult<Html<String>> {
    let items = state
        .buzz
        .list(BuzzFilter {
            urltext: None,
            limit: Some(SIMPLE_PAGE_LIMIT),
        })
        .await?;

    Ok(Html(render_buzz_simple(&items)))
}

pub async fn increment_counter(State(state): State<AppState>) -> ApiResult<Json<CounterResponse>> {
    let counter = state.counter.increment(&state.counter_key).await?;
    Ok(Json(CounterResponse { counter }))
}
