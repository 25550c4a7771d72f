//! # SpaceWarp Kernel Errors
//!
//! [`Error`] is the crate-wide error enum. Each subsystem keeps its own typed
//! error ([`ModSystemError`], [`StorageSystemError`]) and converts into this
//! one with `?`.
use std::result::Result as StdResult;

use crate::mod_system::error::{LifecycleError, ModSystemError};
use crate::storage::error::StorageSystemError;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum Error {
    /// Specific, typed mod system error
    #[error("Mod system error: {0}")]
    ModSystem(#[from] ModSystemError),

    /// Specific, typed storage system error
    #[error("Storage system error: {0}")]
    StorageSystem(#[from] StorageSystemError),
}

/// Shorthand for Result with our Error type
pub type Result<T> = StdResult<T, Error>;

impl From<LifecycleError> for Error {
    fn from(err: LifecycleError) -> Self {
        Error::ModSystem(ModSystemError::Lifecycle(err))
    }
}

impl Error {
    /// True when this is the fatal mods-root scan failure.
    pub fn is_scan_fatal(&self) -> bool {
        matches!(self, Error::ModSystem(ModSystemError::ScanFatal { .. }))
    }
}
