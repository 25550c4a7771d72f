//! # SpaceWarp Core
//!
//! Mod discovery, dependency ordering, code loading and lifecycle
//! orchestration for the SpaceWarp mod loader.
//!
//! The usual entry point is [`Application`], which runs the whole pipeline:
//! global config, manifest scan, load-order resolution, per-mod loading and
//! the staged lifecycle.
pub mod kernel;
pub mod mod_system;
pub mod storage;
pub mod ui_bridge;
pub mod utils;

// Re-export key public types/traits for easier use by the binary and mods
pub use kernel::{AppOptions, Application};
pub use kernel::error::Error as KernelError;
pub use mod_system::{EntryPoint, HostContext, Mod, ModError, ModManifest, ModRegistrar};
pub use storage::{ConfigDefaults, GlobalConfig, LogLevel, TypedConfigSchema};
pub use ui_bridge::ModListUi;
