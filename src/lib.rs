// 模組定義
pub mod api;
pub mod companies;
pub mod config;
pub mod redis;
pub mod storage;
pub mod utils;
