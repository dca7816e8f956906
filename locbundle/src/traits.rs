//! Capability traits the loader is built on.
//!
//! A bundle is reached through a [`PackageSource`], opened as a [`Package`],
//! decoded entry by entry with a [`DocumentParser`], and failures along the way
//! are reported to a [`Diagnostics`] sink.

use async_trait::async_trait;

use crate::{error::Error, types::LocalizedData};

/// An opened bundle of named binary entries.
///
/// A package belongs to exactly one load operation. [`Package::release`]
/// consumes it, so nothing can touch it once released.
pub trait Package: Send {
    /// Names of all entries in the package.
    fn list_entry_names(&self) -> Vec<String>;

    /// Reads the raw bytes of one entry.
    fn read_entry(&mut self, name: &str) -> Result<Vec<u8>, Error>;

    /// Frees whatever the package holds.
    fn release(self: Box<Self>) -> Result<(), Error> {
        Ok(())
    }
}

/// Produces packages from a locator (a path, URL, or any other key).
///
/// # Example
///
/// ```rust
/// use async_trait::async_trait;
/// use locbundle::{Error, MemoryPackage, Package, PackageSource};
///
/// struct Embedded;
///
/// #[async_trait]
/// impl PackageSource for Embedded {
///     async fn fetch(&self, _locator: &str) -> Result<Box<dyn Package>, Error> {
///         let package = MemoryPackage::new()
///             .with_entry("l10n/default/app.json", br#"{"title":"App"}"#.to_vec());
///         Ok(Box::new(package))
///     }
/// }
/// ```
#[async_trait]
pub trait PackageSource: Send + Sync {
    async fn fetch(&self, locator: &str) -> Result<Box<dyn Package>, Error>;
}

/// Decodes the bytes of one entry into key/value pairs.
///
/// Any `Fn(&[u8]) -> Result<LocalizedData, Error>` closure is a parser.
pub trait DocumentParser: Send + Sync {
    fn parse(&self, bytes: &[u8]) -> Result<LocalizedData, Error>;
}

impl<F> DocumentParser for F
where
    F: Fn(&[u8]) -> Result<LocalizedData, Error> + Send + Sync,
{
    fn parse(&self, bytes: &[u8]) -> Result<LocalizedData, Error> {
        self(bytes)
    }
}

/// Sink for failures that are contained rather than returned.
///
/// Implementations must not panic or block.
pub trait Diagnostics: Send + Sync {
    fn warn(&self, message: &str);
}

/// Forwards diagnostics to `tracing` at the `WARN` level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn warn(&self, message: &str) {
        tracing::warn!(target: "locbundle", "{}", message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_closure_is_a_parser() {
        let parser = |bytes: &[u8]| -> Result<LocalizedData, Error> {
            Ok(LocalizedData::from([(
                "len".to_string(),
                json!(bytes.len()),
            )]))
        };
        let data = DocumentParser::parse(&parser, b"abc").unwrap();
        assert_eq!(data["len"], json!(3));
    }

    #[test]
    fn test_default_release_is_ok() {
        struct Empty;
        impl Package for Empty {
            fn list_entry_names(&self) -> Vec<String> {
                Vec::new()
            }
            fn read_entry(&mut self, name: &str) -> Result<Vec<u8>, Error> {
                Err(Error::EntryNotFound(name.to_string()))
            }
        }

        let package: Box<dyn Package> = Box::new(Empty);
        assert!(package.list_entry_names().is_empty());
        assert!(package.release().is_ok());
    }
}
