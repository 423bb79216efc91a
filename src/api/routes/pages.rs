// src/api/routes/pages.rs
use axum::{routing::get, Router};

use crate::api::handlers::pages;
use crate::api::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(pages::index))
}
