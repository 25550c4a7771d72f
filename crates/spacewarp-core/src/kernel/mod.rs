//! # SpaceWarp Kernel
//!
//! Ties the subsystems together.
//!
//! - **Application bootstrapping**: [`Application`](bootstrap::Application)
//!   drives scanning, resolution, loading and the lifecycle in order.
//! - **Core constants**: on-disk layout names in the `constants` submodule.
//! - **Error handling**: the crate-wide [`Error`](error::Error) and `Result`
//!   alias in the `error` submodule.
//! - **Logging helpers**: the `critical!` macro in the `logging` submodule.
pub mod bootstrap;
pub mod constants;
pub mod error;
pub mod logging;

pub use bootstrap::{AppOptions, Application};
pub use error::{Error, Result};
