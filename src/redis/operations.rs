//! Redis操作模組
//!
//! 封裝業務上使用的 Redis 操作。

pub mod counter;

pub use counter::*;
