use std::collections::HashSet;
use std::path::{Path, PathBuf};

use log::{debug, error, info, warn};
use serde::Serialize;

use crate::critical;
use crate::kernel::constants::{IGNORE_FILE_NAME, MANIFEST_FILE_NAME};
use crate::mod_system::error::ModSystemError;
use crate::mod_system::manifest::{Candidate, ModManifest};
use crate::utils::fs::{file_name_string, sorted_entries};

/// A mod directory that had a manifest but did not become a candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedMod {
    pub dir_name: String,
    pub reason: String,
}

/// Result of scanning the mods root.
#[derive(Debug, Clone, Default)]
pub struct ScanOutcome {
    /// Candidates in directory name order
    pub candidates: Vec<Candidate>,
    /// Mods whose manifest could not be used
    pub rejected: Vec<RejectedMod>,
}

/// Discovers mod directories under the mods root and parses their manifests.
#[derive(Debug, Clone)]
pub struct ManifestScanner {
    mods_root: PathBuf,
}

impl ManifestScanner {
    pub fn new<P: AsRef<Path>>(mods_root: P) -> Self {
        Self {
            mods_root: mods_root.as_ref().to_path_buf(),
        }
    }

    pub fn mods_root(&self) -> &Path {
        &self.mods_root
    }

    /// Scan every directory directly under the mods root.
    ///
    /// Fails only when the root itself cannot be listed. Everything that goes
    /// wrong for a single mod is logged and that mod is left out.
    pub fn scan(&self) -> Result<ScanOutcome, ModSystemError> {
        info!("Reading mods");

        let entries = sorted_entries(&self.mods_root).map_err(|e| {
            critical!(
                "Unable to open mod path: {}\nException:{}",
                self.mods_root.display(),
                e
            );
            ModSystemError::ScanFatal {
                path: self.mods_root.clone(),
                source: e,
            }
        })?;

        let mod_dirs: Vec<PathBuf> = entries.into_iter().filter(|p| p.is_dir()).collect();
        if mod_dirs.is_empty() {
            warn!("No mods were found! No panic though.");
        }

        let mut outcome = ScanOutcome::default();
        let mut seen_ids = HashSet::new();

        for mod_dir in mod_dirs {
            let dir_name = file_name_string(&mod_dir);
            let manifest_path = mod_dir.join(MANIFEST_FILE_NAME);

            if !manifest_path.is_file() {
                warn!("Found mod {} without {}", dir_name, MANIFEST_FILE_NAME);
                continue;
            }

            if mod_dir.join(IGNORE_FILE_NAME).exists() {
                debug!("Skipping mod {} due to {} file", dir_name, IGNORE_FILE_NAME);
                continue;
            }

            let manifest = match ModManifest::from_file(&manifest_path) {
                Ok(manifest) => manifest,
                Err(e) => {
                    error!("Error loading manifest for mod {}: {}", dir_name, e);
                    outcome.rejected.push(RejectedMod {
                        dir_name,
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            if !seen_ids.insert(manifest.mod_id.clone()) {
                error!(
                    "Skipping mod {}: mod_id '{}' is already used by another mod",
                    dir_name, manifest.mod_id
                );
                outcome.rejected.push(RejectedMod {
                    dir_name,
                    reason: format!("duplicate mod_id '{}'", manifest.mod_id),
                });
                continue;
            }

            info!("Found mod: {}, adding to enabled mods", dir_name);
            outcome.candidates.push(Candidate::new(&dir_name, manifest));
        }

        Ok(outcome)
    }
}
