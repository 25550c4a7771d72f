//! Fixtures shared by the mod system tests.
use std::cell::RefCell;
use std::fs;
use std::path::Path;
use std::rc::Rc;

use serde_json::json;

use crate::mod_system::manifest::ModManifest;
use crate::mod_system::traits::{EntryPoint, HostContext, Mod, ModError, ModRegistrar, MOD_ABI_VERSION};

/// Ordered record of hook calls, shared between a test and its mods.
pub type Journal = Rc<RefCell<Vec<String>>>;

pub fn journal() -> Journal {
    Rc::new(RefCell::new(Vec::new()))
}

pub fn entries(journal: &Journal) -> Vec<String> {
    journal.borrow().clone()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Fault {
    #[default]
    None,
    Err,
    Panic,
}

impl Fault {
    fn apply(self, what: &str) -> Result<(), ModError> {
        match self {
            Fault::None => Ok(()),
            Fault::Err => Err(ModError::ExecutionError(format!("{} refused", what))),
            Fault::Panic => panic!("{} exploded", what),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Behavior {
    pub setup: Fault,
    pub init: Fault,
    pub post: Fault,
}

/// Mod that writes `<name>:<hook>` to its journal for every hook call.
pub struct RecordingMod {
    name: String,
    journal: Journal,
    behavior: Behavior,
}

impl Mod for RecordingMod {
    fn setup(&mut self, host: &HostContext, _manifest: &ModManifest) -> Result<(), ModError> {
        self.journal.borrow_mut().push(format!("{}:setup", self.name));
        if let Some(config) = &host.config {
            self.journal.borrow_mut().push(format!("{}:config={}", self.name, config));
        }
        self.behavior.setup.apply("setup")
    }

    fn initialize(&mut self) -> Result<(), ModError> {
        self.journal.borrow_mut().push(format!("{}:init", self.name));
        self.behavior.init.apply("initialize")
    }

    fn on_initialized(&mut self) -> Result<(), ModError> {
        self.journal.borrow_mut().push(format!("{}:post", self.name));
        self.behavior.post.apply("on_initialized")
    }
}

/// Registration function exporting one [`RecordingMod`] entry point.
pub fn recording_unit(
    name: &str,
    journal: &Journal,
    behavior: Behavior,
) -> impl Fn(&mut dyn ModRegistrar) -> Result<(), String> + 'static {
    let name = name.to_string();
    let journal = journal.clone();
    move |registrar: &mut dyn ModRegistrar| {
        let type_name = name.clone();
        let name = name.clone();
        let journal = journal.clone();
        registrar.register_entry_point(EntryPoint::from_fn(&type_name, MOD_ABI_VERSION, move || {
            Box::new(RecordingMod {
                name: name.clone(),
                journal: journal.clone(),
                behavior,
            }) as Box<dyn Mod>
        }));
        Ok(())
    }
}

/// `modinfo.json` text. `deps` are `(id, min, max)`.
pub fn manifest_json(mod_id: &str, version: &str, deps: &[(&str, &str, &str)]) -> String {
    let dependencies: Vec<_> = deps
        .iter()
        .map(|(id, min, max)| json!({"id": id, "version": {"min": min, "max": max}}))
        .collect();
    json!({
        "mod_id": mod_id,
        "name": mod_id,
        "author": "tester",
        "description": "test mod",
        "source": "",
        "version": version,
        "dependencies": dependencies,
        "ksp2_version": {"min": "0.1.0", "max": "*"}
    })
    .to_string()
}

/// Creates `<mods_root>/<dir>/modinfo.json` and an empty `bin/<unit>` per unit.
pub fn install_mod(mods_root: &Path, dir: &str, manifest: &str, units: &[&str]) {
    let mod_dir = mods_root.join(dir);
    fs::create_dir_all(mod_dir.join("bin")).expect("create mod dir");
    fs::write(mod_dir.join("modinfo.json"), manifest).expect("write manifest");
    for unit in units {
        fs::write(mod_dir.join("bin").join(unit), b"").expect("write unit");
    }
}
