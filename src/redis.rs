//! Redis存儲模組
//!
//! 提供 Redis 連接池管理，以及以 INCR 實現的請求計數器。

pub mod operations;
pub mod pool;

#[cfg(test)]
pub mod test_config;

pub use operations::counter::*;
pub use pool::*;
