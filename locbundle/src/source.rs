//! Package sources backed by the local file system.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::{
    error::Error,
    package::{DirectoryPackage, ZipPackage},
    traits::{Package, PackageSource},
};

/// Opens the locator as a path: a directory becomes a [`DirectoryPackage`],
/// anything else is read as a zip archive.
///
/// Relative locators are resolved against `base_dir` when one is set.
#[derive(Debug, Clone, Default)]
pub struct FileSource {
    base_dir: Option<PathBuf>,
}

impl FileSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(base_dir.into());
        self
    }

    fn resolve(&self, locator: &str) -> PathBuf {
        match &self.base_dir {
            Some(base) => base.join(locator),
            None => PathBuf::from(locator),
        }
    }
}

#[async_trait]
impl PackageSource for FileSource {
    async fn fetch(&self, locator: &str) -> Result<Box<dyn Package>, Error> {
        let path = self.resolve(locator);
        let acquisition = |message: &str, e: Box<dyn std::error::Error + Send + Sync>| {
            Error::acquisition_error(locator, message, Some(e))
        };

        let metadata = tokio::fs::metadata(&path)
            .await
            .map_err(|e| acquisition("cannot stat path", Box::new(e)))?;

        if metadata.is_dir() {
            tracing::debug!(path = %path.display(), "opening directory package");
            let package = tokio::task::spawn_blocking(move || DirectoryPackage::open(path))
                .await
                .map_err(|e| acquisition("directory walk aborted", Box::new(e)))?
                .map_err(|e| acquisition("cannot open directory", Box::new(e)))?;
            return Ok(Box::new(package));
        }

        tracing::debug!(path = %path.display(), "reading zip package");
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|e| acquisition("cannot read archive", Box::new(e)))?;
        let package =
            ZipPackage::from_bytes(bytes).map_err(|e| acquisition("invalid archive", Box::new(e)))?;
        Ok(Box::new(package))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::{Cursor, Write};
    use tempfile::TempDir;
    use zip::{ZipWriter, write::SimpleFileOptions};

    #[tokio::test]
    async fn test_fetch_zip_archive() {
        let temp_dir = TempDir::new().unwrap();
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("l10n/default/app.json", SimpleFileOptions::default())
            .unwrap();
        writer.write_all(b"{}").unwrap();
        let bytes = writer.finish().unwrap().into_inner();
        fs::write(temp_dir.path().join("l10n.zip"), bytes).unwrap();

        let source = FileSource::new().with_base_dir(temp_dir.path());
        let package = source.fetch("l10n.zip").await.unwrap();
        assert_eq!(package.list_entry_names(), ["l10n/default/app.json"]);
    }

    #[tokio::test]
    async fn test_fetch_directory() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("l10n").join("en");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("app.json"), "{}").unwrap();

        let source = FileSource::new();
        let locator = temp_dir.path().join("l10n");
        let package = source.fetch(locator.to_str().unwrap()).await.unwrap();
        assert_eq!(package.list_entry_names(), ["l10n/en/app.json"]);
    }

    #[tokio::test]
    async fn test_fetch_missing_path() {
        let temp_dir = TempDir::new().unwrap();
        let source = FileSource::new().with_base_dir(temp_dir.path());
        let result = source.fetch("missing.zip").await;
        assert!(matches!(result, Err(Error::Acquisition { .. })));
    }

    #[tokio::test]
    async fn test_fetch_invalid_archive() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("broken.zip"), "not a zip").unwrap();
        let source = FileSource::new().with_base_dir(temp_dir.path());
        let result = source.fetch("broken.zip").await;
        assert!(matches!(result, Err(Error::Acquisition { .. })));
    }
}
