use std::path::{Path, PathBuf};

use log::{error, info};

use crate::kernel::constants::{self, MODS_FOLDER_NAME};
use crate::kernel::error::Result;
use crate::mod_system::dependency::DependencyResolver;
use crate::mod_system::lifecycle::{LifecycleOrchestrator, SetupPolicy};
use crate::mod_system::loader::{ModuleBackend, ModuleLoader};
use crate::mod_system::manifest::Candidate;
use crate::mod_system::registry::{LoadSummary, LoadedMod, ModState};
use crate::mod_system::scanner::{ManifestScanner, RejectedMod};
use crate::mod_system::traits::HostContext;
use crate::storage::config::ConfigStore;
use crate::storage::global::{load_global_config, GlobalConfig};
use crate::storage::local::LocalStorageProvider;
use crate::ui_bridge::ModListUi;

/// Where and how the loader runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppOptions {
    /// Host data root; mods live in `<root>/Mods`
    pub root: PathBuf,
    /// Running host version, checked against each mod's `ksp2_version`
    pub host_version: Option<String>,
    pub setup_policy: SetupPolicy,
}

impl AppOptions {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            host_version: None,
            setup_policy: SetupPolicy::default(),
        }
    }

    pub fn with_host_version(mut self, version: &str) -> Self {
        self.host_version = Some(version.to_string());
        self
    }

    pub fn with_setup_policy(mut self, policy: SetupPolicy) -> Self {
        self.setup_policy = policy;
        self
    }

    pub fn mods_root(&self) -> PathBuf {
        self.root.join(MODS_FOLDER_NAME)
    }
}

/// Main application struct: one loading run over `<root>/Mods`.
///
/// [`run`](Self::run) performs every stage; the individual stages are public
/// for hosts that interleave their own work between them.
pub struct Application {
    options: AppOptions,
    global_config: GlobalConfig,
    config_store: ConfigStore,
    loader: ModuleLoader,
    orchestrator: LifecycleOrchestrator,
    load_order: Vec<Candidate>,
    rejected: Vec<RejectedMod>,
}

impl Application {
    /// Loads the global config (creating it if needed) and applies its log
    /// level. No mods are touched yet.
    pub fn new(options: AppOptions, backend: Box<dyn ModuleBackend>) -> Self {
        info!("Initializing {} v{}", constants::APP_NAME, constants::CORE_VERSION);

        let mods_root = options.mods_root();
        let global_config = load_global_config(&LocalStorageProvider::new(mods_root.clone()));
        log::set_max_level(global_config.log_level.to_level_filter());

        let config_store = ConfigStore::new(Box::new(LocalStorageProvider::new(mods_root.clone())));
        let loader = ModuleLoader::new(backend, &mods_root);
        info!("Using {} module backend", loader.backend_name());

        Self {
            orchestrator: LifecycleOrchestrator::new(options.setup_policy),
            options,
            global_config,
            config_store,
            loader,
            load_order: Vec::new(),
            rejected: Vec::new(),
        }
    }

    pub fn options(&self) -> &AppOptions {
        &self.options
    }

    pub fn global_config(&self) -> &GlobalConfig {
        &self.global_config
    }

    pub fn config_store(&self) -> &ConfigStore {
        &self.config_store
    }

    /// Scan the mods folder and compute the load order.
    ///
    /// Fails only when the mods folder cannot be read.
    pub fn read_mods(&mut self) -> Result<&[Candidate]> {
        let outcome = ManifestScanner::new(self.options.mods_root()).scan()?;
        self.rejected = outcome.rejected;

        let resolution = DependencyResolver::new(outcome.candidates).resolve();
        for candidate in &resolution.excluded {
            self.orchestrator.record_exclusion(
                candidate,
                ModState::ExcludedByDependency,
                Some("not all dependencies could be met".to_string()),
            );
        }
        self.load_order = resolution.load_order;
        Ok(&self.load_order)
    }

    /// Load and initialize every mod in load order.
    ///
    /// Returns an error only for a setup failure under the strict policy.
    pub fn initialize_mods(&mut self) -> Result<()> {
        let mods_root = self.options.mods_root();

        for candidate in &self.load_order {
            let modules = match self.loader.load(candidate, &mut self.config_store) {
                Ok(modules) => modules,
                Err(e) => {
                    error!("Could not load mod {}: {}", candidate.dir_name, e);
                    self.orchestrator
                        .record_exclusion(candidate, ModState::ExcludedByLoadFailure, Some(e.to_string()));
                    continue;
                }
            };

            let mut host = HostContext::new(&mods_root, &candidate.dir_name);
            host.host_version = self.options.host_version.clone();
            host.config = modules.config().cloned();

            self.orchestrator.instantiate_and_initialize(candidate, modules, &host)?;
        }
        Ok(())
    }

    /// Run `on_initialized` everywhere, then build the mod list UI.
    pub fn post_initialize(&mut self, ui: &mut dyn ModListUi) {
        self.orchestrator.post_initialize();
        self.orchestrator.build_ui(ui);
    }

    /// The whole pipeline.
    pub fn run(&mut self, ui: &mut dyn ModListUi) -> Result<LoadSummary> {
        self.read_mods()?;
        self.initialize_mods()?;
        self.post_initialize(ui);
        Ok(self.summary())
    }

    pub fn loaded_mods(&self) -> &[LoadedMod] {
        self.orchestrator.registry().fully_loaded()
    }

    pub fn orchestrator(&self) -> &LifecycleOrchestrator {
        &self.orchestrator
    }

    pub fn summary(&self) -> LoadSummary {
        self.orchestrator.registry().summary(&self.rejected)
    }
}
