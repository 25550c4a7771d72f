/// Application name
pub const APP_NAME: &str = "SpaceWarp";

/// Version of this crate, recorded in every exported mod declaration
pub const CORE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Folder under the host data root that holds one directory per mod
pub const MODS_FOLDER_NAME: &str = "Mods";

/// Required manifest inside each mod directory
pub const MANIFEST_FILE_NAME: &str = "modinfo.json";

/// Marker file; a mod directory containing it is never loaded
pub const IGNORE_FILE_NAME: &str = ".ignore";

/// Folder inside a mod directory holding its code units
pub const CODE_FOLDER_NAME: &str = "bin";

/// Folder inside a mod directory holding its configuration
pub const CONFIG_FOLDER_NAME: &str = "config";

/// Per-mod configuration file name
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Process-wide configuration, stored directly in the mods folder
pub const GLOBAL_CONFIG_FILE_NAME: &str = "space_warp_config.json";
