use axum::response::Html;

use crate::api::templates::INDEX_HTML;

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}
