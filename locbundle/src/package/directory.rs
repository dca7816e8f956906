//! Directory trees as packages.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use ignore::{DirEntry, WalkBuilder};

use crate::{error::Error, traits::Package};

/// All files below a root directory.
///
/// Entry names are the root's own name followed by the `/`-separated relative
/// path, so `/srv/l10n/default/app.json` under root `/srv/l10n` is listed as
/// `l10n/default/app.json`. The file list is taken once, when the package is
/// opened.
#[derive(Debug, Clone)]
pub struct DirectoryPackage {
    root: PathBuf,
    entries: BTreeMap<String, PathBuf>,
}

impl DirectoryPackage {
    /// Walks `root` and records every regular file below it.
    pub fn open<P: AsRef<Path>>(root: P) -> Result<Self, Error> {
        let root = std::fs::canonicalize(root.as_ref())?;
        if !root.is_dir() {
            return Err(Error::InvalidResource(format!(
                "{} is not a directory",
                root.display()
            )));
        }

        let prefix = root
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        let walker = WalkBuilder::new(&root)
            .standard_filters(false)
            .follow_links(false)
            .build();

        let mut entries = BTreeMap::new();
        for result in walker {
            record_walk_result(&mut entries, &root, &prefix, result);
        }

        Ok(Self { root, entries })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Adds one walked file to `entries`. Paths the walk could not read are
/// skipped with a warning.
fn record_walk_result(
    entries: &mut BTreeMap<String, PathBuf>,
    root: &Path,
    prefix: &str,
    result: Result<DirEntry, ignore::Error>,
) {
    let dent = match result {
        Ok(dent) => dent,
        Err(e) => {
            tracing::warn!(root = %root.display(), "skipping unreadable path: {}", e);
            return;
        }
    };
    if !dent.file_type().is_some_and(|t| t.is_file()) {
        return;
    }
    let Ok(relative) = dent.path().strip_prefix(root) else {
        return;
    };
    let relative = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");
    entries.insert(format!("{}/{}", prefix, relative), dent.into_path());
}

impl Package for DirectoryPackage {
    fn list_entry_names(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    fn read_entry(&mut self, name: &str) -> Result<Vec<u8>, Error> {
        let path = self
            .entries
            .get(name)
            .ok_or_else(|| Error::EntryNotFound(name.to_string()))?;
        Ok(std::fs::read(path)?)
    }
}
