//! # SpaceWarp Storage Errors
//!
//! [`StorageSystemError`] covers file access through a
//! [`StorageProvider`](crate::storage::StorageProvider) and the JSON
//! (de)serialization of configuration values.
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageSystemError {
    #[error("I/O error during operation '{operation}' on path '{path}': {source}")]
    Io {
        path: PathBuf,
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization of '{type_name}' failed: {source}")]
    Serialization {
        type_name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Deserialization of '{type_name}' failed: {source}")]
    Deserialization {
        type_name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid path provided: '{path}': {reason}")]
    InvalidPath { path: PathBuf, reason: String },
}

// Helper for creating Io errors, ensuring path is always included.
impl StorageSystemError {
    pub fn io(source: std::io::Error, operation: impl Into<String>, path: PathBuf) -> Self {
        StorageSystemError::Io {
            source,
            operation: operation.into(),
            path,
        }
    }

    /// True for an I/O error whose cause is a missing file.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageSystemError::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}
