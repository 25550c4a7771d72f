//! # SpaceWarp UI Bridge
//!
//! The loader does not own a UI. It hands the final list of fully loaded
//! mods to whatever [`ModListUi`] the host provides, exactly once per run.
use log::info;

use crate::mod_system::registry::LoadedMod;

/// Presents the loaded mod list.
pub trait ModListUi {
    fn build(&mut self, loaded: &[LoadedMod]);
}

/// Writes the mod list to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogModListUi;

impl ModListUi for LogModListUi {
    fn build(&mut self, loaded: &[LoadedMod]) {
        info!("Loaded {} mods", loaded.len());
        for entry in loaded {
            info!(
                "  {} {} by {} ({})",
                entry.manifest.name,
                entry.manifest.version,
                if entry.manifest.author.is_empty() { "unknown" } else { entry.manifest.author.as_str() },
                entry.dir_name
            );
        }
    }
}

/// Keeps a copy of the list it was given; handy for hosts that render later.
#[derive(Debug, Default, Clone)]
pub struct CollectingModListUi {
    pub builds: Vec<Vec<LoadedMod>>,
}

impl ModListUi for CollectingModListUi {
    fn build(&mut self, loaded: &[LoadedMod]) {
        self.builds.push(loaded.to_vec());
    }
}

#[cfg(test)]
mod tests;
