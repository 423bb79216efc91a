use axum::Router;

use crate::api::state::AppState;

pub mod buzz;
pub mod companies;
pub mod pages;
pub mod system;

pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(pages::routes())
        .merge(buzz::routes())
        .merge(companies::routes())
        .merge(system::routes())
}
