pub mod buzz;
pub mod companies;
pub mod pages;
pub mod system;
