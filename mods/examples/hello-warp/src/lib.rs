//! Example SpaceWarp mod.
//!
//! Built as a `cdylib`, the library goes in `Mods/HelloWarp/bin/` next to the
//! `modinfo.json` shipped with this crate. It greets the log a configurable
//! number of times during `initialize`.
use log::info;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use spacewarp_core::{
    ConfigDefaults, EntryPoint, HostContext, Mod, ModError, ModManifest, ModRegistrar, TypedConfigSchema,
};

/// Upper bound for `repeat`
pub const MAX_REPEAT: u32 = 10;

/// Contents of `Mods/HelloWarp/config/config.json`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HelloConfig {
    pub greeting: String,
    pub repeat: u32,
}

impl ConfigDefaults for HelloConfig {
    fn field_defaults() -> Vec<(&'static str, Value)> {
        vec![
            ("greeting", json!("Hello from the warp drive")),
            ("repeat", json!(1)),
        ]
    }
}

#[derive(Debug, Default)]
pub struct HelloWarp {
    name: String,
    config: HelloConfig,
    greeted: u32,
}

impl HelloWarp {
    pub fn greeted(&self) -> u32 {
        self.greeted
    }
}

impl Mod for HelloWarp {
    fn setup(&mut self, host: &HostContext, manifest: &ModManifest) -> Result<(), ModError> {
        self.name = manifest.name.clone();
        self.config = host.config::<HelloConfig>()?.unwrap_or_default();
        if self.config.repeat > MAX_REPEAT {
            return Err(ModError::SetupError(format!(
                "repeat is {}, at most {} is allowed",
                self.config.repeat, MAX_REPEAT
            )));
        }
        Ok(())
    }

    fn initialize(&mut self) -> Result<(), ModError> {
        if self.config.greeting.trim().is_empty() {
            return Err(ModError::InitError("greeting is empty".to_string()));
        }
        for _ in 0..self.config.repeat {
            info!("{}", self.config.greeting);
            self.greeted += 1;
        }
        Ok(())
    }

    fn on_initialized(&mut self) -> Result<(), ModError> {
        info!("{} is ready after {} greetings", self.name, self.greeted);
        Ok(())
    }
}

/// Registers the mod's entry point and config schema.
pub fn register(registrar: &mut dyn ModRegistrar) {
    registrar.register_entry_point(EntryPoint::new::<HelloWarp>());
    registrar.register_config_schema(TypedConfigSchema::<HelloConfig>::boxed());
}

spacewarp_core::export_mod!(register);

#[cfg(test)]
mod tests;
