//! # SpaceWarp Storage
//!
//! Configuration persistence. Every file goes through a [`StorageProvider`];
//! [`ConfigStore`] keeps per-mod configs keyed by mod directory and
//! [`load_global_config`] handles the single process-wide one.
pub mod config;
pub mod error;
pub mod global;
pub mod local;
pub mod provider;

pub use config::{load_or_default, ConfigDefaults, ConfigEntry, ConfigSchema, ConfigStore, TypedConfigSchema};
pub use error::StorageSystemError;
pub use global::{load_global_config, GlobalConfig, LogLevel};
pub use local::LocalStorageProvider;
pub use provider::{StorageProvider, StorageResult};

#[cfg(test)]
mod tests;
