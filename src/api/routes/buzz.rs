// src/api/routes/buzz.rs
use axum::{routing::get, Router};

use crate::api::handlers::buzz;
use crate::api::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/buzz/", get(buzz::list_buzz).post(buzz::create_buzz))
        .route("/buzz/simple/", get(buzz::simple_page).post(buzz::increment_counter))
        .route(
            "/buzz/{id}/",
            get(buzz::get_buzz).put(buzz::update_buzz).delete(buzz::delete_buzz),
        )
}
