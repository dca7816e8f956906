//! Document parsers for bundle entries.
//!
//! Each format is a [`DocumentParser`]; [`FormatType`] names them for generic
//! handling and parses with the format it names.

pub mod csv;
pub mod json;
pub mod strings;
pub mod xml;

use std::{
    fmt::{Display, Formatter},
    path::Path,
    str::FromStr,
};

pub use self::csv::CsvParser;
pub use self::json::JsonParser;
pub use self::strings::StringsParser;
pub use self::xml::XmlParser;

use crate::{error::Error, traits::DocumentParser, types::LocalizedData};

/// All supported entry formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FormatType {
    /// A JSON object of keys to values.
    #[default]
    Json,
    /// `<resources>` with typed, named elements.
    Xml,
    /// Apple `.strings`.
    Strings,
    /// Headerless `key,value` CSV.
    Csv,
}

/// Implements [`std::fmt::Display`] for [`FormatType`].
///
/// # Example
/// ```rust
/// use locbundle::FormatType;
/// assert_eq!(FormatType::Json.to_string(), "json");
/// assert_eq!(FormatType::Strings.to_string(), "strings");
/// ```
impl Display for FormatType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Accepts `json`, `xml`, `strings` and `csv`, case-insensitive.
///
/// # Example
/// ```rust
/// use locbundle::FormatType;
/// use std::str::FromStr;
/// assert_eq!(FormatType::from_str("XML").unwrap(), FormatType::Xml);
/// assert!(FormatType::from_str("yaml").is_err());
/// ```
impl FromStr for FormatType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        match s.as_str() {
            "json" => Ok(FormatType::Json),
            "xml" => Ok(FormatType::Xml),
            "strings" => Ok(FormatType::Strings),
            "csv" => Ok(FormatType::Csv),
            other => Err(Error::UnknownFormat(other.to_string())),
        }
    }
}

impl FormatType {
    pub const ALL: [FormatType; 4] = [
        FormatType::Json,
        FormatType::Xml,
        FormatType::Strings,
        FormatType::Csv,
    ];

    /// Returns the typical file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            FormatType::Json => "json",
            FormatType::Xml => "xml",
            FormatType::Strings => "strings",
            FormatType::Csv => "csv",
        }
    }

    /// Infers the format of an entry from its extension.
    pub fn from_entry_name(name: &str) -> Option<FormatType> {
        let extension = Path::new(name).extension()?.to_str()?;
        FormatType::ALL
            .into_iter()
            .find(|format| format.extension().eq_ignore_ascii_case(extension))
    }
}

impl DocumentParser for FormatType {
    fn parse(&self, bytes: &[u8]) -> Result<LocalizedData, Error> {
        match self {
            FormatType::Json => JsonParser.parse(bytes),
            FormatType::Xml => XmlParser.parse(bytes),
            FormatType::Strings => StringsParser.parse(bytes),
            FormatType::Csv => CsvParser.parse(bytes),
        }
    }
}
