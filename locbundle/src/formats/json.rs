//! JSON objects as localization entries.

use serde_json::Value;

use crate::{error::Error, traits::DocumentParser, types::LocalizedData};

/// Parses a top-level JSON object; member values are kept as they are.
///
/// ```rust
/// use locbundle::{DocumentParser, formats::JsonParser};
///
/// let data = JsonParser.parse(br#"{"title": "Hello", "retries": 3}"#)?;
/// assert_eq!(data["title"], "Hello");
/// assert_eq!(data["retries"], 3);
/// # Ok::<(), locbundle::Error>(())
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonParser;

impl DocumentParser for JsonParser {
    fn parse(&self, bytes: &[u8]) -> Result<LocalizedData, Error> {
        // Tolerate a UTF-8 BOM, common in files saved by Windows editors.
        let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
        match serde_json::from_slice::<Value>(bytes)? {
            Value::Object(map) => Ok(map.into_iter().collect()),
            other => Err(Error::InvalidResource(format!(
                "expected a JSON object, found {}",
                json_kind(&other)
            ))),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
