use std::error::Error as StdError;
use std::path::{Path, PathBuf};

use log::{debug, error, info, warn};
use serde_json::Value;

use crate::kernel::constants::CODE_FOLDER_NAME;
use crate::mod_system::error::LoadError;
use crate::mod_system::manifest::Candidate;
use crate::mod_system::traits::{CodeUnit, EntryPoint, MOD_ABI_VERSION};
use crate::storage::config::ConfigStore;
use crate::utils::fs::{file_name_string, sorted_entries};

/// The host's ability to turn a file into a loaded [`CodeUnit`].
pub trait ModuleBackend {
    /// Short name for logs
    fn name(&self) -> &str;

    /// Whether `path` is something this backend can load. Other files in a
    /// mod's code folder are skipped.
    fn is_code_file(&self, path: &Path) -> bool;

    fn load_unit(&self, path: &Path) -> Result<Box<dyn CodeUnit>, Box<dyn StdError + Send + Sync>>;
}

/// The code loaded for one mod, with its verified entry point located.
pub struct LoadedModuleSet {
    units: Vec<Box<dyn CodeUnit>>,
    entry: (usize, usize),
    config: Option<Value>,
}

impl LoadedModuleSet {
    pub fn entry_point(&self) -> &EntryPoint {
        &self.units[self.entry.0].entry_points()[self.entry.1]
    }

    pub fn units(&self) -> &[Box<dyn CodeUnit>] {
        &self.units
    }

    /// The mod's configuration, if it exported a schema.
    pub fn config(&self) -> Option<&Value> {
        self.config.as_ref()
    }

    pub fn into_units(self) -> Vec<Box<dyn CodeUnit>> {
        self.units
    }
}

impl std::fmt::Debug for LoadedModuleSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.units.iter().map(|u| u.name()).collect();
        f.debug_struct("LoadedModuleSet")
            .field("units", &names)
            .field("entry_point", self.entry_point())
            .field("config", &self.config)
            .finish()
    }
}

/// Loads each ordered mod's code folder through a [`ModuleBackend`].
pub struct ModuleLoader {
    backend: Box<dyn ModuleBackend>,
    mods_root: PathBuf,
}

impl ModuleLoader {
    pub fn new<P: AsRef<Path>>(backend: Box<dyn ModuleBackend>, mods_root: P) -> Self {
        Self {
            backend,
            mods_root: mods_root.as_ref().to_path_buf(),
        }
    }

    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// `<mods root>/<modDir>/bin`
    pub fn code_dir(&self, dir_name: &str) -> PathBuf {
        self.mods_root.join(dir_name).join(CODE_FOLDER_NAME)
    }

    /// Load every code unit of `candidate`, register its config schema with
    /// `configs`, and locate its entry point.
    ///
    /// The first unit that fails to load aborts the mod; later files are not
    /// attempted.
    pub fn load(&self, candidate: &Candidate, configs: &mut ConfigStore) -> Result<LoadedModuleSet, LoadError> {
        info!("Loading mod: {}", candidate.dir_name);

        let code_dir = self.code_dir(&candidate.dir_name);
        if !code_dir.is_dir() {
            return Err(LoadError::CodeDirectoryMissing(code_dir));
        }

        let files = sorted_entries(&code_dir).map_err(|source| LoadError::CodeDirectoryUnreadable {
            path: code_dir.clone(),
            source,
        })?;

        let mut units: Vec<Box<dyn CodeUnit>> = Vec::new();
        for file in files.into_iter().filter(|p| p.is_file()) {
            if !self.backend.is_code_file(&file) {
                warn!(
                    "Skipping {} in {}: not a {} code unit",
                    file_name_string(&file),
                    candidate.dir_name,
                    self.backend.name()
                );
                continue;
            }
            let unit = self
                .backend
                .load_unit(&file)
                .map_err(|source| LoadError::UnitLoadFailed { file: file.clone(), source })?;
            debug!("Loaded code unit {} for {}", unit.name(), candidate.dir_name);
            units.push(unit);
        }

        let config = self.register_config(candidate, &units, configs);
        let entry = find_entry_point(&units)?;

        Ok(LoadedModuleSet { units, entry, config })
    }

    fn register_config(
        &self,
        candidate: &Candidate,
        units: &[Box<dyn CodeUnit>],
        configs: &mut ConfigStore,
    ) -> Option<Value> {
        let mut schemas = units.iter().flat_map(|unit| unit.config_schemas().iter());
        let schema = schemas.next()?;
        let ignored: Vec<&str> = schemas.map(|s| s.type_name()).collect();
        if !ignored.is_empty() {
            warn!(
                "{} exports more than one config schema; using {} and ignoring {}",
                candidate.dir_name,
                schema.type_name(),
                ignored.join(", ")
            );
        }

        match configs.register_mod_config(&candidate.dir_name, schema.as_ref()) {
            Ok(entry) => Some(entry.value.clone()),
            Err(e) => {
                error!("Unable to load config for {}: {}", candidate.dir_name, e);
                None
            }
        }
    }
}

fn find_entry_point(units: &[Box<dyn CodeUnit>]) -> Result<(usize, usize), LoadError> {
    let found: Vec<(usize, usize)> = units
        .iter()
        .enumerate()
        .flat_map(|(u, unit)| (0..unit.entry_points().len()).map(move |e| (u, e)))
        .collect();

    let entry = match found.as_slice() {
        [] => return Err(LoadError::NoEntryPoint),
        [single] => *single,
        _ => {
            let names = found
                .iter()
                .map(|&(u, e)| units[u].entry_points()[e].type_name().to_string())
                .collect();
            return Err(LoadError::AmbiguousEntryPoint(names));
        }
    };

    let entry_point = &units[entry.0].entry_points()[entry.1];
    if !entry_point.is_compatible() {
        return Err(LoadError::IncompatibleEntryPoint {
            type_name: entry_point.type_name().to_string(),
            found: entry_point.abi_version(),
            expected: MOD_ABI_VERSION,
        });
    }
    Ok(entry)
}
