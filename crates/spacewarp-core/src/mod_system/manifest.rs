use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::mod_system::dependency::DependencyConstraint;
use crate::mod_system::error::ModSystemError;
use crate::mod_system::version::VersionRange;

/// Parsed `modinfo.json`. Immutable once produced by the scanner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModManifest {
    /// Unique identifier, the key dependencies refer to
    pub mod_id: String,

    /// Human-readable name
    pub name: String,

    pub author: String,

    pub description: String,

    /// Where the mod comes from (informational)
    pub source: String,

    /// Dotted numeric version
    pub version: String,

    /// Ordered dependency constraints
    #[serde(default)]
    pub dependencies: Vec<DependencyConstraint>,

    /// Supported host versions; advisory only
    #[serde(rename = "ksp2_version")]
    pub supported_host_versions: VersionRange,
}

impl ModManifest {
    /// Create a manifest with empty informational fields and no dependencies.
    pub fn new(mod_id: &str, name: &str, version: &str) -> Self {
        Self {
            mod_id: mod_id.to_string(),
            name: name.to_string(),
            author: String::new(),
            description: String::new(),
            source: String::new(),
            version: version.to_string(),
            dependencies: Vec::new(),
            supported_host_versions: VersionRange::any(),
        }
    }

    /// Parse a manifest from its JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Read and parse a manifest file.
    pub fn from_file(path: &Path) -> Result<Self, ModSystemError> {
        let content = std::fs::read_to_string(path).map_err(|e| ModSystemError::ManifestError {
            path: path.to_path_buf(),
            message: format!("Failed to read manifest: {}", e),
            source: Some(Box::new(e)),
        })?;

        Self::from_json_str(&content).map_err(|e| ModSystemError::ManifestError {
            path: path.to_path_buf(),
            message: format!("Failed to parse manifest JSON: {}", e),
            source: Some(Box::new(e)),
        })
    }

    /// Add a dependency
    pub fn add_dependency(&mut self, id: &str, version: VersionRange) -> &mut Self {
        self.dependencies.push(DependencyConstraint::new(id, version));
        self
    }

    /// Whether the given host version is inside `ksp2_version`.
    pub fn supports_host_version(&self, host_version: &str) -> bool {
        self.supported_host_versions.includes(host_version)
    }
}

/// A discovered mod whose dependencies have not been checked yet.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// Name of the mod's directory under `Mods/`
    pub dir_name: String,
    pub manifest: ModManifest,
}

impl Candidate {
    pub fn new(dir_name: &str, manifest: ModManifest) -> Self {
        Self {
            dir_name: dir_name.to_string(),
            manifest,
        }
    }
}

/// Builder for creating a mod manifest
pub struct ManifestBuilder {
    manifest: ModManifest,
}

impl ManifestBuilder {
    /// Create a new manifest builder
    pub fn new(mod_id: &str, name: &str, version: &str) -> Self {
        Self {
            manifest: ModManifest::new(mod_id, name, version),
        }
    }

    /// Set the mod author
    pub fn author(mut self, author: &str) -> Self {
        self.manifest.author = author.to_string();
        self
    }

    /// Set the mod description
    pub fn description(mut self, description: &str) -> Self {
        self.manifest.description = description.to_string();
        self
    }

    /// Set the mod source URL
    pub fn source(mut self, source: &str) -> Self {
        self.manifest.source = source.to_string();
        self
    }

    /// Add a dependency on `id` within `[min, max]`
    pub fn dependency(mut self, id: &str, min: &str, max: &str) -> Self {
        self.manifest.add_dependency(id, VersionRange::new(min, max));
        self
    }

    /// Set the supported host version range
    pub fn host_versions(mut self, min: &str, max: &str) -> Self {
        self.manifest.supported_host_versions = VersionRange::new(min, max);
        self
    }

    /// Build the manifest
    pub fn build(self) -> ModManifest {
        self.manifest
    }
}
