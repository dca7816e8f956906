//! All error types for the locbundle crate.
//!
//! Only [`Error::Configuration`] ever reaches a caller of
//! [`crate::LocalizedDataLoader`]; everything else is contained by the loader
//! and reported through [`crate::Diagnostics`].

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("invalid culture `{0}`")]
    InvalidCulture(String),

    #[error("unknown format `{0}`")]
    UnknownFormat(String),

    #[error("failed to acquire package `{locator}`: {message}")]
    Acquisition {
        locator: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("entry not found: {0}")]
    EntryNotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("XML parse error: {0}")]
    XmlParse(#[from] quick_xml::Error),

    #[error("CSV parse error: {0}")]
    CsvParse(#[from] csv::Error),

    #[error("invalid resource: {0}")]
    InvalidResource(String),

    #[error("parser panicked: {0}")]
    ParserPanic(String),

    /// Returned by [`crate::Package::release`] implementations that fail to
    /// free their resources. The loader also reports a panicking release
    /// with this variant.
    #[error("failed to release package: {0}")]
    Release(String),
}

impl Error {
    /// Creates a new acquisition error with optional source error
    pub fn acquisition_error(
        locator: impl Into<String>,
        message: impl Into<String>,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Error::Acquisition {
            locator: locator.into(),
            message: message.into(),
            source,
        }
    }

    /// Creates a new configuration error
    pub fn configuration_error(message: impl Into<String>) -> Self {
        Error::Configuration(message.into())
    }
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(value: quick_xml::events::attributes::AttrError) -> Self {
        Error::XmlParse(quick_xml::Error::InvalidAttr(value))
    }
}
