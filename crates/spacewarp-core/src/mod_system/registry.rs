use std::collections::HashMap;
use std::fmt;

use log::debug;
use serde::Serialize;

use crate::mod_system::manifest::ModManifest;
use crate::mod_system::scanner::RejectedMod;
use crate::mod_system::traits::{CodeUnit, Mod};

/// A live mod and the code it came from.
pub struct ModInstance {
    pub dir_name: String,
    pub manifest: ModManifest,
    // Field order matters: the instance drops before the units holding its code
    instance: Box<dyn Mod>,
    units: Vec<Box<dyn CodeUnit>>,
}

impl ModInstance {
    pub fn new(dir_name: &str, manifest: ModManifest, instance: Box<dyn Mod>, units: Vec<Box<dyn CodeUnit>>) -> Self {
        Self {
            dir_name: dir_name.to_string(),
            manifest,
            instance,
            units,
        }
    }

    pub fn instance_mut(&mut self) -> &mut dyn Mod {
        self.instance.as_mut()
    }

    /// Instance and manifest together, for hooks that need both.
    pub fn parts_mut(&mut self) -> (&mut dyn Mod, &ModManifest) {
        (self.instance.as_mut(), &self.manifest)
    }

    pub fn unit_names(&self) -> Vec<&str> {
        self.units.iter().map(|u| u.name()).collect()
    }
}

impl fmt::Debug for ModInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModInstance")
            .field("dir_name", &self.dir_name)
            .field("mod_id", &self.manifest.mod_id)
            .field("units", &self.unit_names())
            .finish()
    }
}

/// A mod that went through every stage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadedMod {
    pub dir_name: String,
    pub manifest: ModManifest,
}

/// Where a scanned mod ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ModState {
    FullyLoaded,
    ExcludedByDependency,
    ExcludedByLoadFailure,
    ExcludedBySetupFailure,
    ExcludedByInitFailure,
}

impl fmt::Display for ModState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ModState::FullyLoaded => "fully loaded",
            ModState::ExcludedByDependency => "excluded: unmet dependencies",
            ModState::ExcludedByLoadFailure => "excluded: load failure",
            ModState::ExcludedBySetupFailure => "excluded: setup failure",
            ModState::ExcludedByInitFailure => "excluded: initialization failure",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModStatus {
    pub dir_name: String,
    pub mod_id: String,
    pub state: ModState,
    /// Failure text, when excluded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Outcome of a whole loading run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LoadSummary {
    /// Fully loaded mods in load order
    pub loaded: Vec<LoadedMod>,
    /// Terminal state of every candidate, by directory name
    pub states: Vec<ModStatus>,
    /// Mods dropped by the scanner
    pub rejected: Vec<RejectedMod>,
}

impl LoadSummary {
    pub fn state_of(&self, dir_name: &str) -> Option<ModState> {
        self.states.iter().find(|s| s.dir_name == dir_name).map(|s| s.state)
    }
}

/// "All instantiated" and "fully loaded", plus each mod's terminal state.
#[derive(Debug, Default)]
pub struct ModRegistry {
    instances: Vec<ModInstance>,
    fully_loaded: Vec<LoadedMod>,
    states: HashMap<String, ModStatus>,
}

impl ModRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an instance. Returns `None` if one for that directory already exists.
    pub fn add_instance(&mut self, instance: ModInstance) -> Option<&mut ModInstance> {
        if self.instance(&instance.dir_name).is_some() {
            return None;
        }
        self.instances.push(instance);
        self.instances.last_mut()
    }

    pub fn remove_instance(&mut self, dir_name: &str) -> Option<ModInstance> {
        let index = self.instances.iter().position(|i| i.dir_name == dir_name)?;
        Some(self.instances.remove(index))
    }

    pub fn instance(&self, dir_name: &str) -> Option<&ModInstance> {
        self.instances.iter().find(|i| i.dir_name == dir_name)
    }

    pub fn instance_mut(&mut self, dir_name: &str) -> Option<&mut ModInstance> {
        self.instances.iter_mut().find(|i| i.dir_name == dir_name)
    }

    /// Every instantiated mod, in instantiation order.
    pub fn instances(&self) -> &[ModInstance] {
        &self.instances
    }

    pub fn instances_mut(&mut self) -> impl Iterator<Item = &mut ModInstance> {
        self.instances.iter_mut()
    }

    /// Appends an instantiated mod to "fully loaded".
    pub fn mark_fully_loaded(&mut self, dir_name: &str) -> bool {
        let Some(instance) = self.instance(dir_name) else {
            return false;
        };
        let loaded = LoadedMod {
            dir_name: instance.dir_name.clone(),
            manifest: instance.manifest.clone(),
        };
        let mod_id = loaded.manifest.mod_id.clone();
        self.fully_loaded.push(loaded);
        self.record_state(dir_name, &mod_id, ModState::FullyLoaded, None);
        true
    }

    pub fn fully_loaded(&self) -> &[LoadedMod] {
        &self.fully_loaded
    }

    /// Records a mod's terminal state. The first state recorded for a
    /// directory is final.
    pub fn record_state(&mut self, dir_name: &str, mod_id: &str, state: ModState, detail: Option<String>) {
        if let Some(existing) = self.states.get(dir_name) {
            debug!(
                "Ignoring state {:?} for {}: already {:?}",
                state, dir_name, existing.state
            );
            return;
        }
        self.states.insert(
            dir_name.to_string(),
            ModStatus {
                dir_name: dir_name.to_string(),
                mod_id: mod_id.to_string(),
                state,
                detail,
            },
        );
    }

    pub fn state_of(&self, dir_name: &str) -> Option<ModState> {
        self.states.get(dir_name).map(|s| s.state)
    }

    /// Snapshot of the registry; states sorted by directory name.
    pub fn summary(&self, rejected: &[RejectedMod]) -> LoadSummary {
        let mut states: Vec<ModStatus> = self.states.values().cloned().collect();
        states.sort_by(|a, b| a.dir_name.cmp(&b.dir_name));
        LoadSummary {
            loaded: self.fully_loaded.clone(),
            states,
            rejected: rejected.to_vec(),
        }
    }
}
