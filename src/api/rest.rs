// src/api/rest.rs
use anyhow::{Context, Result};
use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    Router,
};
use std::future::Future;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    limit::RequestBodyLimitLayer,
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::{info, warn};

use super::{routes::api_routes, state::AppState};
use crate::config::ServerConfig;

pub struct RestApi {
    server_config: ServerConfig,
    state: AppState,
}

impl RestApi {
    pub fn new(server_config: ServerConfig, state: AppState) -> Self {
        Self {
            server_config,
            state,
        }
    }

    /// 啟動服務器，直到 `shutdown` 完成後優雅關閉
    pub async fn serve<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app = self.build_app();

        // 解析地址
        let addr = SocketAddr::from((
            self.server_config
                .host
                .parse::<std::net::IpAddr>()
                .with_context(|| format!("無效的監聽地址: {}", self.server_config.host))?,
            self.server_config.port,
        ));

        info!("Starting REST API server on {}", addr);

        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("無法綁定 {}", addr))?;
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("REST API server stopped");
        Ok(())
    }

    pub fn build_app(&self) -> Router {
        let limit = self.server_config.max_body_size;

        // 建立應用並逐層添加中間件
        let mut app = api_routes()
            .with_state(self.state.clone())
            // 上傳檔案受請求主體上限限制
            .layer(DefaultBodyLimit::disable())
            .layer(RequestBodyLimitLayer::new(limit))
            // 超時設置
            .layer(TimeoutLayer::new(self.server_config.request_timeout()));

        if self.server_config.enable_compression {
            app = app.layer(CompressionLayer::new());
        }

        if self.server_config.enable_cors {
            app = app.layer(self.build_cors_layer());
        }

        app.layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().include_headers(true))
                .on_response(DefaultOnResponse::new().include_headers(true)),
        )
    }

    fn build_cors_layer(&self) -> CorsLayer {
        let origins = self
            .server_config
            .cors_allowed_origins
            .iter()
            .filter_map(|origin| match origin.parse::<HeaderValue>() {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!("忽略無效的 CORS 來源: {}", origin);
                    None
                }
            })
            .collect::<Vec<_>>();

        CorsLayer::new()
            .allow_methods(vec![Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers(vec![header::CONTENT_TYPE])
            .allow_origin(origins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::flash::FlashSigner;
    use crate::redis::MockCounterStore;
    use crate::storage::repository::MockBuzzRepository;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn server_config(max_body_size: usize) -> ServerConfig {
        ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            request_timeout: 30,
            max_body_size,
            enable_compression: true,
            enable_cors: true,
            cors_allowed_origins: vec!["http://localhost:3000".to_string()],
        }
    }

    fn rest_api(max_body_size: usize) -> RestApi {
        let mut repo = MockBuzzRepository::new();
        repo.expect_ping().returning(|| Ok(()));
        let mut counter = MockCounterStore::new();
        counter.expect_ping().returning(|| Ok(()));

        let state = AppState::new(
            Arc::new(repo),
            Arc::new(counter),
            "counter",
            FlashSigner::new("secret", "buzz_flash"),
        );
        RestApi::new(server_config(max_body_size), state)
    }

    #[tokio::test]
    async fn test_app_serves_health() {
        let app = rest_api(1024 * 1024).build_app();
        let request = Request::builder().uri("/system/health").body(Body::empty()).unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_body_limit_rejects_large_upload() {
        let app = rest_api(1024).build_app();
        let request = Request::builder()
            .method("POST")
            .uri("/companies/")
            .header(header::CONTENT_TYPE, "multipart/form-data; boundary=x")
            .header(header::CONTENT_LENGTH, "4096")
            .body(Body::from(vec![b'a'; 4096]))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
