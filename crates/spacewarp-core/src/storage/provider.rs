use std::fmt::Debug;
use std::path::Path;

use crate::storage::error::StorageSystemError;

pub type StorageResult<T> = std::result::Result<T, StorageSystemError>;

/// Trait for storage providers that can read and write configuration files.
///
/// Paths are relative to whatever root the provider was created with.
pub trait StorageProvider: Debug {
    /// Get the name of this provider
    fn name(&self) -> &str;

    /// Check if a path is a file
    fn is_file(&self, path: &Path) -> bool;

    /// Read a file to a string
    fn read_to_string(&self, path: &Path) -> StorageResult<String>;

    /// Write a string to a file, replacing it atomically
    fn write_string(&self, path: &Path, contents: &str) -> StorageResult<()>;

    /// Remove a file
    fn remove_file(&self, path: &Path) -> StorageResult<()>;

    /// Absolute location of `path`, for logs and registry entries
    fn resolve(&self, path: &Path) -> std::path::PathBuf;
}
