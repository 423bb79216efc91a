pub mod buzz;

pub use buzz::{seed_buzz, BuzzRepository, PgBuzzRepository, SEED_URLS};

#[cfg(test)]
pub use buzz::MockBuzzRepository;
