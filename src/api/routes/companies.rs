// src/api/routes/companies.rs
use axum::{routing::get, Router};

use crate::api::handlers::companies;
use crate::api::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route(
        companies::FORM_PATH,
        get(companies::form).post(companies::merge_upload),
    )
}
