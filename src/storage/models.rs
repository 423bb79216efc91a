pub mod buzz;

pub use buzz::*;
