//! # SpaceWarp Mod System
//!
//! Everything between a folder of mods on disk and a set of running mod
//! instances.
//!
//! ## Key Submodules and Responsibilities:
//!
//! - **[`scanner`]**: Walks `Mods/`, honours `.ignore` markers and parses each
//!   mod's [`ModManifest`] from `modinfo.json`.
//! - **[`dependency`]**: The fixed-point [`DependencyResolver`] that turns the
//!   scanned candidates into a load order.
//! - **[`version`]**: Lenient dotted version comparison used by dependency and
//!   host version checks.
//! - **[`loader`]**: [`ModuleLoader`] and the [`ModuleBackend`] capability that
//!   turns code files into [`CodeUnit`]s. [`native`] loads dynamic libraries,
//!   [`static_backend`] serves mods linked into the host.
//! - **[`traits`]**: The [`Mod`] lifecycle trait, [`EntryPoint`], and the
//!   registrar mods export themselves through.
//! - **[`lifecycle`]**: [`LifecycleOrchestrator`], which drives setup,
//!   initialize and on-initialized across mods with per-mod fault isolation.
//! - **[`registry`]**: Instantiated and fully loaded mods plus every mod's
//!   terminal [`ModState`].
//! - **[`error`]**: [`ModSystemError`], [`LoadError`] and [`LifecycleError`].
pub mod dependency;
pub mod error;
pub mod lifecycle;
pub mod loader;
pub mod manifest;
pub mod native;
pub mod registry;
pub mod scanner;
pub mod static_backend;
pub mod traits;
pub mod version;

pub use dependency::{resolve_load_order, DependencyConstraint, DependencyResolver, Resolution};
pub use error::{LifecycleError, LifecyclePhase, LoadError, ModSystemError};
pub use lifecycle::{LifecycleOrchestrator, SetupPolicy};
pub use loader::{LoadedModuleSet, ModuleBackend, ModuleLoader};
pub use manifest::{Candidate, ManifestBuilder, ModManifest};
pub use native::{ModDeclaration, NativeModuleBackend};
pub use registry::{LoadSummary, LoadedMod, ModInstance, ModRegistry, ModState, ModStatus};
pub use scanner::{ManifestScanner, RejectedMod, ScanOutcome};
pub use static_backend::StaticModuleBackend;
pub use traits::{CodeUnit, EntryPoint, HostContext, Mod, ModError, ModExports, ModRegistrar, MOD_ABI_VERSION};
pub use version::{compare_versions, is_version_at_or_above, is_version_at_or_below, VersionRange};

#[cfg(test)]
mod tests;
