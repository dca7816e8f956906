//! Built-in [`Package`](crate::traits::Package) implementations.
//!
//! - [`ZipPackage`]: a zip archive held in memory.
//! - [`DirectoryPackage`]: files under a directory, named `<root>/<relative path>`.
//! - [`MemoryPackage`]: entries supplied directly, e.g. embedded with `include_bytes!`.

pub mod archive;
pub mod directory;
pub mod memory;

pub use archive::ZipPackage;
pub use directory::DirectoryPackage;
pub use memory::MemoryPackage;
