use std::collections::HashMap;
use std::error::Error as StdError;
use std::fmt;
use std::path::Path;

use crate::mod_system::loader::ModuleBackend;
use crate::mod_system::traits::{CodeUnit, ModExports, ModRegistrar};
use crate::utils::fs::{file_name_string, has_extension};

type Registration = Box<dyn Fn(&mut dyn ModRegistrar) -> Result<(), String>>;

/// Backend for mods linked into the host binary.
///
/// Each code file name under a mod's `bin/` folder maps to a registration
/// function; the file only has to exist. A registration that returns `Err`
/// makes the unit fail to load.
pub struct StaticModuleBackend {
    extension: String,
    units: HashMap<String, Registration>,
}

impl StaticModuleBackend {
    /// Backend recognising files with `extension` as code.
    pub fn new(extension: &str) -> Self {
        Self {
            extension: extension.trim_start_matches('.').to_string(),
            units: HashMap::new(),
        }
    }

    pub fn register_unit<F>(&mut self, file_name: &str, registration: F)
    where
        F: Fn(&mut dyn ModRegistrar) -> Result<(), String> + 'static,
    {
        self.units.insert(file_name.to_string(), Box::new(registration));
    }

    /// Builder form of [`register_unit`](Self::register_unit).
    pub fn with_unit<F>(mut self, file_name: &str, registration: F) -> Self
    where
        F: Fn(&mut dyn ModRegistrar) -> Result<(), String> + 'static,
    {
        self.register_unit(file_name, registration);
        self
    }
}

impl Default for StaticModuleBackend {
    fn default() -> Self {
        Self::new("dll")
    }
}

impl fmt::Debug for StaticModuleBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&String> = self.units.keys().collect();
        names.sort();
        f.debug_struct("StaticModuleBackend")
            .field("extension", &self.extension)
            .field("units", &names)
            .finish()
    }
}

impl ModuleBackend for StaticModuleBackend {
    fn name(&self) -> &str {
        "static"
    }

    fn is_code_file(&self, path: &Path) -> bool {
        has_extension(path, &self.extension)
    }

    fn load_unit(&self, path: &Path) -> Result<Box<dyn CodeUnit>, Box<dyn StdError + Send + Sync>> {
        let name = file_name_string(path);
        let registration = self
            .units
            .get(&name)
            .ok_or_else(|| format!("no statically linked unit named '{}'", name))?;

        let mut exports = ModExports::default();
        registration(&mut exports)?;
        Ok(Box::new(StaticCodeUnit { name, exports }))
    }
}

struct StaticCodeUnit {
    name: String,
    exports: ModExports,
}

impl CodeUnit for StaticCodeUnit {
    fn name(&self) -> &str {
        &self.name
    }

    fn exports(&self) -> &ModExports {
        &self.exports
    }
}
