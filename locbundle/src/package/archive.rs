//! Zip archives as packages.

use std::io::{Cursor, Read};

use zip::{ZipArchive, result::ZipError};

use crate::{error::Error, traits::Package};

/// Upper bound on the buffer reserved from an entry's declared size.
const MAX_PREALLOCATION: u64 = 1 << 20;

/// A zip archive read fully into memory.
///
/// Directory records are not listed as entries.
pub struct ZipPackage {
    archive: ZipArchive<Cursor<Vec<u8>>>,
}

impl ZipPackage {
    /// Opens an archive from its raw bytes.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Error> {
        let archive = ZipArchive::new(Cursor::new(bytes))?;
        Ok(Self { archive })
    }

    /// Returns the number of records in the archive, directories included.
    pub fn len(&self) -> usize {
        self.archive.len()
    }

    pub fn is_empty(&self) -> bool {
        self.archive.is_empty()
    }
}

impl Package for ZipPackage {
    fn list_entry_names(&self) -> Vec<String> {
        self.archive
            .file_names()
            .filter(|name| !name.ends_with('/'))
            .map(str::to_string)
            .collect()
    }

    fn read_entry(&mut self, name: &str) -> Result<Vec<u8>, Error> {
        let mut file = match self.archive.by_name(name) {
            Ok(file) => file,
            Err(ZipError::FileNotFound) => return Err(Error::EntryNotFound(name.to_string())),
            Err(e) => return Err(Error::Zip(e)),
        };
        let mut bytes = Vec::with_capacity(file.size().min(MAX_PREALLOCATION) as usize);
        file.read_to_end(&mut bytes)?;
        Ok(bytes)
    }
}
