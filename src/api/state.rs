// src/api/state.rs
use std::sync::Arc;

use crate::api::flash::FlashSigner;
use crate::companies::CsvReader;
use crate::redis::CounterStore;
use crate::storage::BuzzRepository;

/// 路由共享狀態，取代全域的資料庫與快取連線
#[derive(Clone)]
pub struct AppState {
    pub buzz: Arc<dyn BuzzRepository>,
    pub counter: Arc<dyn CounterStore>,
    pub counter_key: String,
    pub flash: FlashSigner,
    pub csv_reader: CsvReader,
}

impl AppState {
    pub fn new(
        buzz: Arc<dyn BuzzRepository>,
        counter: Arc<dyn CounterStore>,
        counter_key: impl Into<String>,
        flash: FlashSigner,
    ) -> Self {
        Self {
            buzz,
            counter,
            counter_key: counter_key.into(),
            flash,
            csv_reader: CsvReader::default(),
        }
    }

    pub fn with_csv_reader(mut self, reader: CsvReader) -> Self {
        self.csv_reader = reader;
        self
    }
}
