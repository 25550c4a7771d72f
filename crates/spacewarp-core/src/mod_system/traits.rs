use std::fmt;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::mod_system::manifest::ModManifest;
use crate::storage::config::ConfigSchema;

/// ABI revision of the [`Mod`] contract. An entry point built against a
/// different revision is rejected by the loader.
pub const MOD_ABI_VERSION: u32 = 1;

/// Error type for mod hooks
#[derive(Debug, thiserror::Error)]
pub enum ModError {
    #[error("Mod setup error: {0}")]
    SetupError(String),
    #[error("Mod initialization error: {0}")]
    InitError(String),
    #[error("Mod execution error: {0}")]
    ExecutionError(String),
    #[error("Mod config error: {0}")]
    ConfigError(String),
}

/// What the host hands a mod during `setup`.
#[derive(Debug, Clone)]
pub struct HostContext {
    /// `<root>/Mods`
    pub mods_root: PathBuf,
    /// `<root>/Mods/<modDir>`
    pub mod_dir: PathBuf,
    /// Version of the running host, when known
    pub host_version: Option<String>,
    /// The mod's configuration as loaded by the config store
    pub config: Option<Value>,
}

impl HostContext {
    pub fn new<P: AsRef<Path>>(mods_root: P, dir_name: &str) -> Self {
        let mods_root = mods_root.as_ref().to_path_buf();
        Self {
            mod_dir: mods_root.join(dir_name),
            mods_root,
            host_version: None,
            config: None,
        }
    }

    /// Deserialize the mod's configuration into its own type.
    ///
    /// Returns `Ok(None)` when the mod exported no config schema.
    pub fn config<T: DeserializeOwned>(&self) -> Result<Option<T>, ModError> {
        match &self.config {
            Some(value) => serde_json::from_value(value.clone())
                .map(Some)
                .map_err(|e| ModError::ConfigError(e.to_string())),
            None => Ok(None),
        }
    }
}

/// Lifecycle hooks every mod implements.
///
/// Hooks run on the loader's thread, one mod at a time. Returning `Err` or
/// panicking is contained by the orchestrator.
pub trait Mod {
    /// Called right after construction with the host context and the mod's
    /// own manifest.
    fn setup(&mut self, host: &HostContext, manifest: &ModManifest) -> Result<(), ModError>;

    /// Called once every mod before it in load order has been set up.
    fn initialize(&mut self) -> Result<(), ModError>;

    /// Called after every loaded mod went through `initialize`.
    fn on_initialized(&mut self) -> Result<(), ModError> {
        Ok(())
    }
}

type ModConstructor = Box<dyn Fn() -> Box<dyn Mod>>;

/// A constructible mod type exported by a code unit.
pub struct EntryPoint {
    type_name: String,
    abi_version: u32,
    constructor: ModConstructor,
}

impl EntryPoint {
    /// Entry point for a `Default`-constructible mod built against this core.
    pub fn new<M: Mod + Default + 'static>() -> Self {
        Self::from_fn(std::any::type_name::<M>(), MOD_ABI_VERSION, || {
            Box::new(M::default()) as Box<dyn Mod>
        })
    }

    pub fn from_fn<F>(type_name: &str, abi_version: u32, constructor: F) -> Self
    where
        F: Fn() -> Box<dyn Mod> + 'static,
    {
        Self {
            type_name: type_name.to_string(),
            abi_version,
            constructor: Box::new(constructor),
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn abi_version(&self) -> u32 {
        self.abi_version
    }

    /// Whether this entry point satisfies the mod capability contract.
    pub fn is_compatible(&self) -> bool {
        self.abi_version == MOD_ABI_VERSION
    }

    pub fn instantiate(&self) -> Box<dyn Mod> {
        (self.constructor)()
    }
}

impl fmt::Debug for EntryPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntryPoint")
            .field("type_name", &self.type_name)
            .field("abi_version", &self.abi_version)
            .finish()
    }
}

/// Sink a code unit registers its exports into.
pub trait ModRegistrar {
    fn register_entry_point(&mut self, entry_point: EntryPoint);
    fn register_config_schema(&mut self, schema: Box<dyn ConfigSchema>);
}

/// Everything one code unit exported.
#[derive(Default)]
pub struct ModExports {
    pub entry_points: Vec<EntryPoint>,
    pub config_schemas: Vec<Box<dyn ConfigSchema>>,
}

impl ModExports {
    pub fn is_empty(&self) -> bool {
        self.entry_points.is_empty() && self.config_schemas.is_empty()
    }
}

impl ModRegistrar for ModExports {
    fn register_entry_point(&mut self, entry_point: EntryPoint) {
        self.entry_points.push(entry_point);
    }

    fn register_config_schema(&mut self, schema: Box<dyn ConfigSchema>) {
        self.config_schemas.push(schema);
    }
}

impl fmt::Debug for ModExports {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let schemas: Vec<&str> = self.config_schemas.iter().map(|s| s.type_name()).collect();
        f.debug_struct("ModExports")
            .field("entry_points", &self.entry_points)
            .field("config_schemas", &schemas)
            .finish()
    }
}

/// One loaded unit of mod code.
///
/// Entry point and config schema discovery are queries on the unit; the
/// loader never inspects the code itself.
pub trait CodeUnit {
    /// File name the unit was loaded from
    fn name(&self) -> &str;

    fn exports(&self) -> &ModExports;

    fn entry_points(&self) -> &[EntryPoint] {
        &self.exports().entry_points
    }

    fn config_schemas(&self) -> &[Box<dyn ConfigSchema>] {
        &self.exports().config_schemas
    }
}
