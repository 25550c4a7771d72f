//! Loading mods compiled as platform dynamic libraries.
//!
//! A mod crate built as a `cdylib` exports its registration function with
//! [`export_mod!`](crate::export_mod):
//!
//! ```ignore
//! fn register(registrar: &mut dyn ModRegistrar) {
//!     registrar.register_entry_point(EntryPoint::new::<MyMod>());
//! }
//!
//! spacewarp_core::export_mod!(register);
//! ```
//!
//! Mods and host must be built with the same compiler and the same
//! `spacewarp-core`; the declaration records the core version so a mismatch
//! is at least reported.
use std::error::Error as StdError;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use libloading::{Library, Symbol};
use log::{debug, warn};

use crate::kernel::constants::CORE_VERSION;
use crate::mod_system::loader::ModuleBackend;
use crate::mod_system::traits::{CodeUnit, ModExports, ModRegistrar};
use crate::utils::fs::{file_name_string, has_extension};
use crate::utils::panic_message;

/// Name of the static written by [`export_mod!`](crate::export_mod).
pub const DECLARATION_SYMBOL: &[u8] = b"SPACEWARP_MOD_DECLARATION\0";

/// What a native mod library exports.
pub struct ModDeclaration {
    /// `spacewarp-core` version the library was built against
    pub core_version: &'static str,
    pub register: fn(&mut dyn ModRegistrar),
}

/// Exports a mod library's registration function.
#[macro_export]
macro_rules! export_mod {
    ($register:path) => {
        #[doc(hidden)]
        #[unsafe(no_mangle)]
        pub static SPACEWARP_MOD_DECLARATION: $crate::mod_system::native::ModDeclaration =
            $crate::mod_system::native::ModDeclaration {
                core_version: $crate::kernel::constants::CORE_VERSION,
                register: $register,
            };
    };
}

/// Backend for `*.so` / `*.dylib` / `*.dll` code units.
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeModuleBackend;

impl NativeModuleBackend {
    pub fn new() -> Self {
        Self
    }
}

impl ModuleBackend for NativeModuleBackend {
    fn name(&self) -> &str {
        "native"
    }

    fn is_code_file(&self, path: &Path) -> bool {
        has_extension(path, std::env::consts::DLL_EXTENSION)
    }

    fn load_unit(&self, path: &Path) -> Result<Box<dyn CodeUnit>, Box<dyn StdError + Send + Sync>> {
        let name = file_name_string(path);
        let library = unsafe { Library::new(path) }?;

        let declared = {
            let symbol: Result<Symbol<*const ModDeclaration>, _> = unsafe { library.get(DECLARATION_SYMBOL) };
            match symbol {
                // SAFETY: the symbol is the static written by `export_mod!`
                Ok(symbol) => unsafe {
                    let declaration = &**symbol;
                    Some((declaration.core_version.to_string(), declaration.register))
                },
                Err(e) => {
                    debug!("{} has no mod declaration ({}), loading it without exports", name, e);
                    None
                }
            }
        };

        let mut exports = ModExports::default();
        if let Some((core_version, register)) = declared {
            if core_version != CORE_VERSION {
                warn!(
                    "{} was built against spacewarp-core {}, host is {}",
                    name, core_version, CORE_VERSION
                );
            }
            panic::catch_unwind(AssertUnwindSafe(|| register(&mut exports)))
                .map_err(|payload| format!("registration panicked: {}", panic_message(&*payload)))?;
        }

        Ok(Box::new(NativeCodeUnit { name, exports, library }))
    }
}

/// A loaded dynamic library and what it registered.
pub struct NativeCodeUnit {
    name: String,
    // Declared before `library`: exports hold code from it and must drop first
    exports: ModExports,
    #[allow(dead_code)]
    library: Library,
}

impl CodeUnit for NativeCodeUnit {
    fn name(&self) -> &str {
        &self.name
    }

    fn exports(&self) -> &ModExports {
        &self.exports
    }
}
