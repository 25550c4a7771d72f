//! Process-wide loader configuration, `Mods/space_warp_config.json`.
use std::path::Path;

use log::{error, LevelFilter};
use serde::{Deserialize, Serialize};

use crate::kernel::constants::GLOBAL_CONFIG_FILE_NAME;
use crate::storage::config::{load_or_default, ConfigDefaults, TypedConfigSchema};
use crate::storage::provider::StorageProvider;

/// Logging threshold as stored in the global config (an integer on disk).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum LogLevel {
    None = 0,
    Critical = 1,
    Error = 2,
    Warning = 3,
    #[default]
    Info = 4,
    Debug = 5,
    All = 6,
}

impl From<i64> for LogLevel {
    /// Out-of-range values clamp to the nearest level.
    fn from(value: i64) -> Self {
        match value {
            i64::MIN..=0 => LogLevel::None,
            1 => LogLevel::Critical,
            2 => LogLevel::Error,
            3 => LogLevel::Warning,
            4 => LogLevel::Info,
            5 => LogLevel::Debug,
            _ => LogLevel::All,
        }
    }
}

impl From<LogLevel> for i64 {
    fn from(level: LogLevel) -> Self {
        level as i64
    }
}

impl LogLevel {
    /// Closest `log` filter. `Critical` records are emitted at error level,
    /// so it shares `Error`'s filter.
    pub fn to_level_filter(self) -> LevelFilter {
        match self {
            LogLevel::None => LevelFilter::Off,
            LogLevel::Critical | LogLevel::Error => LevelFilter::Error,
            LogLevel::Warning => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::All => LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalConfig {
    #[serde(rename = "LogLevel")]
    pub log_level: LogLevel,
}

impl ConfigDefaults for GlobalConfig {}

/// Load the global config through `provider` (rooted at the mods folder),
/// creating or repairing the file as needed. Never fails; if even the
/// defaults cannot be produced the in-memory default is used.
pub fn load_global_config(provider: &dyn StorageProvider) -> GlobalConfig {
    let schema = TypedConfigSchema::<GlobalConfig>::new();
    let loaded = load_or_default(provider, Path::new(GLOBAL_CONFIG_FILE_NAME), &schema)
        .and_then(|value| {
            serde_json::from_value(value).map_err(|source| {
                crate::storage::error::StorageSystemError::Deserialization {
                    type_name: "GlobalConfig".to_string(),
                    source,
                }
            })
        });

    match loaded {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load the global config: {}", e);
            GlobalConfig::default()
        }
    }
}
