//! Two-column CSV entries.
//!
//! Each row is `key,value`; there is no header row. Values are always strings.

use serde::Deserialize;
use serde_json::Value;

use crate::{error::Error, traits::DocumentParser, types::LocalizedData};

#[derive(Debug, Default, Clone, Copy)]
pub struct CsvParser;

#[derive(Debug, Deserialize)]
struct CsvRecord {
    key: String,
    value: String,
}

impl DocumentParser for CsvParser {
    fn parse(&self, bytes: &[u8]) -> Result<LocalizedData, Error> {
        let mut rdr = ::csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader(bytes);
        let mut data = LocalizedData::new();
        for result in rdr.deserialize() {
            let record: CsvRecord = result?;
            data.insert(record.key, Value::String(record.value));
        }
        Ok(data)
    }
}
