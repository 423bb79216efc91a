//! 上傳 CSV 讀取器

use super::error::TransformResult;
use polars::prelude::*;
use std::io::Cursor;

/// CSV 讀取器配置
#[derive(Debug, Clone)]
pub struct CsvReaderConfig {
    /// 是否有標題行
    pub has_header: bool,
    /// 分隔符
    pub separator: u8,
    /// 推斷欄位型別時掃描的行數，None 表示掃描全部
    ///
    /// 上傳檔案中的浮點數可能出現在任意一行，只看前幾行會把整欄推斷為整數
    pub infer_schema_length: Option<usize>,
}

impl Default for CsvReaderConfig {
    fn default() -> Self {
        Self {
            has_header: true,
            separator: b',',
            infer_schema_length: None,
        }
    }
}

/// 將上傳內容解析為 DataFrame
#[derive(Debug, Clone, Default)]
pub struct CsvReader {
    config: CsvReaderConfig,
}

impl CsvReader {
    pub fn new(config: CsvReaderConfig) -> Self {
        Self { config }
    }

    /// 設定分隔符
    pub fn with_separator(mut self, separator: u8) -> Self {
        self.config.separator = separator;
        self
    }

    /// 設定型別推斷掃描行數
    pub fn with_infer_schema_length(mut self, rows: Option<usize>) -> Self {
        self.config.infer_schema_length = rows;
        self
    }

    /// 從字節數組讀取 CSV
    pub fn read_bytes(&self, data: &[u8]) -> TransformResult<DataFrame> {
        let df = CsvReadOptions::default()
            .with_has_header(self.config.has_header)
            .with_parse_options(CsvParseOptions::default().with_separator(self.config.separator))
            .with_infer_schema_length(self.config.infer_schema_length)
            .into_reader_with_file_handle(Cursor::new(data))
            .finish()?;

        Ok(df)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reader_builder() {
        let reader = CsvReader::default()
            .with_separator(b';')
            .with_infer_schema_length(None);

        assert_eq!(reader.config.separator, b';');
        assert!(reader.config.has_header);
        assert_eq!(reader.config.infer_schema_length, None);
    }

    #[test]
    fn test_read_daily_bytes() {
        let csv_data = b"id,date,value\n1,2017-01-01,10\n1,2017-01-02,12\n2,2017-01-01,7\n";

        let df = CsvReader::default().read_bytes(csv_data).unwrap();

        assert_eq!(df.height(), 3);
        assert_eq!(df.width(), 3);
        assert!(df.column("id").is_ok());
        assert!(df.column("date").is_ok());
        assert!(df.column("value").is_ok());
    }

    #[test]
    fn test_read_header_only() {
        let df = CsvReader::default().read_bytes(b"id,name\n").unwrap();

        assert_eq!(df.height(), 0);
        assert_eq!(df.width(), 2);
    }

    #[test]
    fn test_late_float_widens_value_column() {
        let mut csv_data = String::from("id,date,value\n");
        for row in 0..1100 {
            let value = if row == 1050 { "7.5" } else { "3" };
            csv_data.push_str(&format!("1,2017-01-01,{}\n", value));
        }

        let df = CsvReader::default().read_bytes(csv_data.as_bytes()).unwrap();

        assert_eq!(df.height(), 1100);
        assert!(df.column("value").unwrap().dtype().is_float());
        assert!(df.column("id").unwrap().dtype().is_integer());
    }
}
