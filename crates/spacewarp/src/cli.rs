use std::path::PathBuf;

use clap::Parser;
use spacewarp_core::mod_system::SetupPolicy;
use spacewarp_core::AppOptions;

/// SpaceWarp: discovers, orders and loads mods from `<root>/Mods`
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Host data root containing the `Mods` folder
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Running host version, checked against each mod's `ksp2_version`
    #[arg(long)]
    pub host_version: Option<String>,

    /// Drop mods whose setup fails instead of aborting
    #[arg(long)]
    pub lenient_setup: bool,

    /// Print the load summary as JSON
    #[arg(long)]
    pub json: bool,
}

impl CliArgs {
    pub fn app_options(&self) -> AppOptions {
        let mut options = AppOptions::new(&self.root);
        if let Some(version) = &self.host_version {
            options = options.with_host_version(version);
        }
        if self.lenient_setup {
            options = options.with_setup_policy(SetupPolicy::Lenient);
        }
        options
    }
}
