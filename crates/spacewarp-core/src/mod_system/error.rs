//! # SpaceWarp Mod System Errors
//!
//! Defines error types specific to the mod system.
//!
//! [`ModSystemError`] covers the scan, manifest and lifecycle failures that
//! reach the caller. [`LoadError`] describes why one mod's code could not be
//! loaded; it never aborts the pass, it only decides that mod's fate.
//! [`LifecycleError`] reports a failed lifecycle hook.
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ModSystemError {
    /// The mods root itself could not be enumerated. The only fatal condition.
    #[error("Unable to open mod path '{path}': {source}")]
    ScanFatal {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Mod manifest error for '{path}': {message}")]
    ManifestError {
        path: PathBuf,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Directory not found: {0}")]
    CodeDirectoryMissing(PathBuf),

    #[error("unable to read code directory '{path}': {source}")]
    CodeDirectoryUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to load code unit '{}': {source}", file.display())]
    UnitLoadFailed {
        file: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("no code unit exports an entry point")]
    NoEntryPoint,

    #[error("more than one entry point exported: {}", .0.join(", "))]
    AmbiguousEntryPoint(Vec<String>),

    #[error("the entry point ({type_name}) targets mod ABI {found}, expected {expected}")]
    IncompatibleEntryPoint {
        type_name: String,
        found: u32,
        expected: u32,
    },
}

/// Lifecycle hook a failure happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LifecyclePhase {
    #[error("Setup")]
    Setup,
    #[error("Initialize")]
    Initialize,
    #[error("OnInitialized")]
    OnInitialized,
}

#[derive(Debug, thiserror::Error)]
#[error("Exception in {mod_name} {phase}(): {message}")]
pub struct LifecycleError {
    pub mod_name: String,
    pub phase: LifecyclePhase,
    pub message: String,
}

impl LifecycleError {
    pub fn new(mod_name: impl Into<String>, phase: LifecyclePhase, message: impl Into<String>) -> Self {
        Self {
            mod_name: mod_name.into(),
            phase,
            message: message.into(),
        }
    }
}
