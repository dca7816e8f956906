#![forbid(unsafe_code)]
//! Layered localization data loading for Rust.
//!
//! A localization bundle (a zip archive, a directory, or anything else a
//! [`PackageSource`] can open) holds one directory per locale layer. Loading a
//! culture merges three layers into one flat key/value map, later layers
//! overwriting earlier ones:
//!
//! 1. `…/default/…` entries, shared by every culture
//! 2. `…/{language}/…` entries, e.g. `zh`
//! 3. `…/{full culture}/…` entries, e.g. `zh-CN`
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use locbundle::{FileSource, FormatType, LocalizedDataLoader};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), locbundle::Error> {
//! let loader = LocalizedDataLoader::new("assets/localization.zip", FileSource::new(), FormatType::Json)?;
//!
//! // Fire and forget; the callback runs once the bundle has been released.
//! loader.load("zh-CN".parse()?, |data| {
//!     println!("loaded {} keys", data.len());
//! });
//!
//! // Or await the result directly.
//! let data = loader.load_async(&"en-US".parse()?).await;
//! # Ok(())
//! # }
//! ```
//!
//! # Failure handling
//!
//! Only building a loader can fail. A bundle that cannot be acquired yields an
//! empty map, and an entry that cannot be read or parsed is skipped. Both are
//! reported through [`Diagnostics`], which defaults to `tracing` warnings.
//!
//! # Supported Entry Formats
//!
//! - **JSON**: a top-level object; values keep their JSON type
//! - **XML**: typed `<string>`, `<bool>`, `<int>`, `<float>` and `<string-array>` elements
//! - **Apple `.strings`**: `"key" = "value";` pairs
//! - **CSV**: headerless `key,value` rows

pub mod builder;
pub mod culture;
pub mod error;
pub mod formats;
pub mod loader;
pub mod options;
pub mod package;
pub mod selector;
pub mod source;
pub mod traits;
pub mod types;

// Re-export most used types for easy consumption
pub use crate::{
    builder::LoaderBuilder,
    culture::Culture,
    error::Error,
    formats::{CsvParser, FormatType, JsonParser, StringsParser, XmlParser},
    loader::{LoadPhase, LoadReport, LocalizedDataLoader, SkippedEntry},
    options::LoadOptions,
    package::{DirectoryPackage, MemoryPackage, ZipPackage},
    selector::{DEFAULT_SEGMENT, EntryGroups, Layer, select, select_with_segment},
    source::FileSource,
    traits::{Diagnostics, DocumentParser, Package, PackageSource, TracingDiagnostics},
    types::{LocalizedData, Value, merge_into},
};
