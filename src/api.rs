// api.rs - API服務模組，宣告子模組
//
// 提供 HTTP 介面：
// - Buzz 項目的 REST 接口與計數器
// - companies/daily CSV 合併上傳
// - 簡易 HTML 頁面

/// REST API實現
pub mod rest;
/// 路由共享狀態
pub mod state;
/// API錯誤回應
pub mod error;
/// 簽名 cookie 的提示訊息
pub mod flash;
/// 內嵌 HTML 頁面
pub mod templates;
/// API路由定義
pub mod routes;
/// API處理器模組
pub mod handlers;

pub use error::{ApiError, ApiResult};
pub use flash::FlashSigner;
pub use rest::RestApi;
pub use routes::api_routes;
pub use state::AppState;
