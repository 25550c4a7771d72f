use std::collections::BTreeMap;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use log::{debug, error, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::kernel::constants::{CONFIG_FILE_NAME, CONFIG_FOLDER_NAME};
use crate::storage::error::StorageSystemError;
use crate::storage::provider::{StorageProvider, StorageResult};

/// Per-field defaults layered over `Default::default()` when a config file is
/// created from scratch.
///
/// Each pair names a top-level field and the value it starts with. Fields
/// that are not listed keep whatever `Default` produced.
pub trait ConfigDefaults {
    fn field_defaults() -> Vec<(&'static str, Value)> {
        Vec::new()
    }
}

/// Type-erased description of a config type, exported by mod code.
pub trait ConfigSchema {
    /// Name of the concrete config type
    fn type_name(&self) -> &str;

    /// Fresh value: `Default`, then the declared field defaults.
    fn default_value(&self) -> StorageResult<Value>;

    /// Deserialize stored text and normalize it through the concrete type.
    fn parse(&self, text: &str) -> StorageResult<Value>;
}

/// [`ConfigSchema`] for any serde type with defaults.
pub struct TypedConfigSchema<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> TypedConfigSchema<T>
where
    T: Serialize + DeserializeOwned + Default + ConfigDefaults + 'static,
{
    pub fn new() -> Self {
        Self { _marker: PhantomData }
    }

    pub fn boxed() -> Box<dyn ConfigSchema> {
        Box::new(Self::new())
    }
}

impl<T> Default for TypedConfigSchema<T>
where
    T: Serialize + DeserializeOwned + Default + ConfigDefaults + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ConfigSchema for TypedConfigSchema<T>
where
    T: Serialize + DeserializeOwned + Default + ConfigDefaults + 'static,
{
    fn type_name(&self) -> &str {
        std::any::type_name::<T>()
    }

    fn default_value(&self) -> StorageResult<Value> {
        let mut value = to_value(&T::default(), self.type_name())?;
        if let Value::Object(fields) = &mut value {
            for (field, default) in T::field_defaults() {
                fields.insert(field.to_string(), default);
            }
        }
        // Round-trip so a bad field default is caught here, not by the mod
        let typed: T = from_value(value, self.type_name())?;
        to_value(&typed, self.type_name())
    }

    fn parse(&self, text: &str) -> StorageResult<Value> {
        let typed: T = serde_json::from_str(text).map_err(|source| StorageSystemError::Deserialization {
            type_name: self.type_name().to_string(),
            source,
        })?;
        to_value(&typed, self.type_name())
    }
}

fn to_value<T: Serialize>(value: &T, type_name: &str) -> StorageResult<Value> {
    serde_json::to_value(value).map_err(|source| StorageSystemError::Serialization {
        type_name: type_name.to_string(),
        source,
    })
}

fn from_value<T: DeserializeOwned>(value: Value, type_name: &str) -> StorageResult<T> {
    serde_json::from_value(value).map_err(|source| StorageSystemError::Deserialization {
        type_name: type_name.to_string(),
        source,
    })
}

/// Load the config at `path`, healing it if needed, and write it back.
///
/// A missing file yields the schema's default value. A file that cannot be
/// read or parsed is deleted and the default taken instead. Whatever was
/// loaded is then persisted; a failed write is logged and the in-memory value
/// is still returned. Only a schema whose own defaults do not serialize is an
/// error.
pub fn load_or_default(
    provider: &dyn StorageProvider,
    path: &Path,
    schema: &dyn ConfigSchema,
) -> StorageResult<Value> {
    let value = match provider.read_to_string(path) {
        Ok(text) => match schema.parse(&text) {
            Ok(value) => value,
            Err(e) => {
                warn!(
                    "Config {} is invalid ({}), resetting it to defaults",
                    provider.resolve(path).display(),
                    e
                );
                discard(provider, path);
                schema.default_value()?
            }
        },
        Err(e) if e.is_not_found() => {
            debug!("No config at {}, using defaults", provider.resolve(path).display());
            schema.default_value()?
        }
        Err(e) => {
            warn!("Could not read config: {}, resetting it to defaults", e);
            discard(provider, path);
            schema.default_value()?
        }
    };

    persist(provider, path, &value, schema.type_name());
    Ok(value)
}

fn discard(provider: &dyn StorageProvider, path: &Path) {
    if provider.is_file(path) {
        if let Err(e) = provider.remove_file(path) {
            error!("Failed to delete invalid config: {}", e);
        }
    }
}

fn persist(provider: &dyn StorageProvider, path: &Path, value: &Value, type_name: &str) {
    let text = match serde_json::to_string_pretty(value) {
        Ok(text) => text,
        Err(e) => {
            error!("Failed to serialize config {}: {}", type_name, e);
            return;
        }
    };
    if let Err(e) = provider.write_string(path, &text) {
        error!("Failed to save config {}: {}", type_name, e);
    }
}

/// A registered per-mod configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigEntry {
    pub type_name: String,
    pub value: Value,
    /// Absolute location of the config file
    pub path: PathBuf,
}

impl ConfigEntry {
    /// Deserialize the stored value into its concrete type.
    pub fn typed<T: DeserializeOwned>(&self) -> StorageResult<T> {
        from_value(self.value.clone(), &self.type_name)
    }
}

/// Per-mod configuration registry backed by a storage provider rooted at the
/// mods folder.
#[derive(Debug)]
pub struct ConfigStore {
    provider: Box<dyn StorageProvider>,
    entries: BTreeMap<String, ConfigEntry>,
}

impl ConfigStore {
    pub fn new(provider: Box<dyn StorageProvider>) -> Self {
        Self {
            provider,
            entries: BTreeMap::new(),
        }
    }

    /// Path of a mod's config relative to the mods root.
    pub fn mod_config_path(dir_name: &str) -> PathBuf {
        Path::new(dir_name).join(CONFIG_FOLDER_NAME).join(CONFIG_FILE_NAME)
    }

    /// Load (or create) the config for the mod in `dir_name` and register it.
    pub fn register_mod_config(
        &mut self,
        dir_name: &str,
        schema: &dyn ConfigSchema,
    ) -> StorageResult<&ConfigEntry> {
        let relative = Self::mod_config_path(dir_name);
        let value = load_or_default(self.provider.as_ref(), &relative, schema)?;
        let entry = ConfigEntry {
            type_name: schema.type_name().to_string(),
            value,
            path: self.provider.resolve(&relative),
        };
        debug!("Registered config {} for {}", entry.type_name, dir_name);
        self.entries.insert(dir_name.to_string(), entry);
        Ok(&self.entries[dir_name])
    }

    pub fn get(&self, dir_name: &str) -> Option<&ConfigEntry> {
        self.entries.get(dir_name)
    }

    /// Typed view of a mod's config. `None` when the mod registered none or
    /// the stored value does not fit `T`.
    pub fn get_typed<T: DeserializeOwned>(&self, dir_name: &str) -> Option<T> {
        self.entries.get(dir_name).and_then(|entry| entry.typed().ok())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConfigEntry)> {
        self.entries.iter().map(|(dir, entry)| (dir.as_str(), entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
