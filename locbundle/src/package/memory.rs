use std::collections::BTreeMap;

use crate::{error::Error, traits::Package};

/// Entries held directly in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryPackage {
    entries: BTreeMap<String, Vec<u8>>,
}

impl MemoryPackage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.insert(name, bytes);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.entries.insert(name.into(), bytes.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<N, B> FromIterator<(N, B)> for MemoryPackage
where
    N: Into<String>,
    B: Into<Vec<u8>>,
{
    fn from_iter<T: IntoIterator<Item = (N, B)>>(iter: T) -> Self {
        let mut package = Self::new();
        for (name, bytes) in iter {
            package.insert(name, bytes);
        }
        package
    }
}

impl Package for MemoryPackage {
    fn list_entry_names(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    fn read_entry(&mut self, name: &str) -> Result<Vec<u8>, Error> {
        self.entries
            .get(name)
            .cloned()
            .ok_or_else(|| Error::EntryNotFound(name.to_string()))
    }
}
