//! Staged lifecycle across the loaded mods.
//!
//! Each mod in load order is constructed, set up and initialized before the
//! next one is touched. Once every mod went through that, `on_initialized`
//! runs on every instance, and finally the mod list UI is built once.
//!
//! Hook failures, whether an `Err` or a panic, are contained per mod. The one
//! exception is `setup` under [`SetupPolicy::Strict`], which stops the run.
use std::panic::{self, AssertUnwindSafe};

use log::{error, info, warn};

use crate::critical;
use crate::mod_system::error::{LifecycleError, LifecyclePhase};
use crate::mod_system::loader::LoadedModuleSet;
use crate::mod_system::manifest::Candidate;
use crate::mod_system::registry::{ModInstance, ModRegistry, ModState};
use crate::mod_system::traits::{HostContext, ModError};
use crate::ui_bridge::ModListUi;
use crate::utils::panic_message;

/// What a failing `setup` does to the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SetupPolicy {
    /// The failure is returned and loading stops.
    #[default]
    Strict,
    /// The mod is dropped and loading continues.
    Lenient,
}

/// Runs a hook, turning both `Err` and panics into a [`LifecycleError`].
pub fn run_hook<F>(mod_name: &str, phase: LifecyclePhase, hook: F) -> Result<(), LifecycleError>
where
    F: FnOnce() -> Result<(), ModError>,
{
    match panic::catch_unwind(AssertUnwindSafe(hook)) {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(LifecycleError::new(mod_name, phase, e.to_string())),
        Err(payload) => Err(LifecycleError::new(
            mod_name,
            phase,
            format!("panicked: {}", panic_message(&*payload)),
        )),
    }
}

#[derive(Debug, Default)]
pub struct LifecycleOrchestrator {
    policy: SetupPolicy,
    registry: ModRegistry,
    faults: Vec<LifecycleError>,
    ui_built: bool,
}

impl LifecycleOrchestrator {
    pub fn new(policy: SetupPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// Construct the mod from its entry point, then run `setup` and
    /// `initialize`.
    ///
    /// Only a strict-policy setup failure is returned; every other failure is
    /// logged and recorded in the mod's state.
    pub fn instantiate_and_initialize(
        &mut self,
        candidate: &Candidate,
        modules: LoadedModuleSet,
        host: &HostContext,
    ) -> Result<(), LifecycleError> {
        let dir_name = candidate.dir_name.as_str();
        let mod_name = candidate.manifest.name.clone();
        let mod_id = candidate.manifest.mod_id.clone();

        if let Some(host_version) = &host.host_version {
            if !candidate.manifest.supports_host_version(host_version) {
                warn!(
                    "{} supports host versions {}, running {}",
                    mod_name, candidate.manifest.supported_host_versions, host_version
                );
            }
        }

        let entry_point = modules.entry_point();
        let instance = match panic::catch_unwind(AssertUnwindSafe(|| entry_point.instantiate())) {
            Ok(instance) => instance,
            Err(payload) => {
                let err = LifecycleError::new(
                    &mod_name,
                    LifecyclePhase::Setup,
                    format!("constructor panicked: {}", panic_message(&*payload)),
                );
                return self.setup_failed(dir_name, &mod_id, err);
            }
        };
        let instance = ModInstance::new(dir_name, candidate.manifest.clone(), instance, modules.into_units());

        if self.registry.instance(dir_name).is_some() {
            error!("{} is already instantiated, skipping", dir_name);
            self.registry.record_state(
                dir_name,
                &mod_id,
                ModState::ExcludedByLoadFailure,
                Some("duplicate instance".to_string()),
            );
            return Ok(());
        }

        info!("Setting up {}", mod_name);
        let setup = match self.registry.add_instance(instance) {
            Some(added) => {
                let (instance, manifest) = added.parts_mut();
                run_hook(&mod_name, LifecyclePhase::Setup, || instance.setup(host, manifest))
            }
            None => return Ok(()),
        };
        if let Err(err) = setup {
            self.registry.remove_instance(dir_name);
            return self.setup_failed(dir_name, &mod_id, err);
        }

        let initialized = match self.registry.instance_mut(dir_name) {
            Some(added) => {
                let instance = added.instance_mut();
                run_hook(&mod_name, LifecyclePhase::Initialize, || instance.initialize())
            }
            None => return Ok(()),
        };

        match initialized {
            Ok(()) => {
                info!("Loaded: {}", mod_name);
                self.registry.mark_fully_loaded(dir_name);
            }
            Err(err) => {
                critical!("{}", err);
                self.registry
                    .record_state(dir_name, &mod_id, ModState::ExcludedByInitFailure, Some(err.to_string()));
                self.faults.push(err);
            }
        }
        Ok(())
    }

    fn setup_failed(&mut self, dir_name: &str, mod_id: &str, err: LifecycleError) -> Result<(), LifecycleError> {
        match self.policy {
            SetupPolicy::Strict => {
                critical!("{}", err);
                Err(err)
            }
            SetupPolicy::Lenient => {
                error!("{}", err);
                self.registry
                    .record_state(dir_name, mod_id, ModState::ExcludedBySetupFailure, Some(err.to_string()));
                self.faults.push(err);
                Ok(())
            }
        }
    }

    /// Call `on_initialized` on every instantiated mod, including those whose
    /// `initialize` failed.
    pub fn post_initialize(&mut self) {
        for instance in self.registry.instances_mut() {
            let mod_name = instance.manifest.name.clone();
            let hook = instance.instance_mut();
            if let Err(err) = run_hook(&mod_name, LifecyclePhase::OnInitialized, || hook.on_initialized()) {
                critical!("{}", err);
                self.faults.push(err);
            }
        }
    }

    /// Hand the fully loaded list to the UI. Only the first call builds it.
    pub fn build_ui(&mut self, ui: &mut dyn ModListUi) -> bool {
        if self.ui_built {
            warn!("Mod list UI was already built");
            return false;
        }
        ui.build(self.registry.fully_loaded());
        self.ui_built = true;
        true
    }

    /// Records a mod that never reached the lifecycle.
    pub fn record_exclusion(&mut self, candidate: &Candidate, state: ModState, detail: Option<String>) {
        self.registry
            .record_state(&candidate.dir_name, &candidate.manifest.mod_id, state, detail);
    }

    pub fn registry(&self) -> &ModRegistry {
        &self.registry
    }

    /// Contained hook failures, in the order they happened.
    pub fn faults(&self) -> &[LifecycleError] {
        &self.faults
    }
}
