pub mod database;
pub mod migrations;
pub mod models;
pub mod repository;

// 只匯出必要的數據庫功能
pub use database::*;

// 匯出主要的模型
pub use models::{validate_url, Buzz, BuzzFilter, BuzzInsert, BuzzUpdate, MAX_URL_LENGTH};

// 匯出倉儲接口和實現
pub use repository::{seed_buzz, BuzzRepository, PgBuzzRepository, SEED_URLS};

// 匯出遷移功能
pub use migrations::*;
