use serde::Deserialize;
use serde_json::json;

use crate::mod_system::traits::{HostContext, ModError};

#[test]
fn test_mod_error_messages() {
    assert_eq!(ModError::SetupError("a".into()).to_string(), "Mod setup error: a");
    assert_eq!(ModError::InitError("b".into()).to_string(), "Mod initialization error: b");
    assert_eq!(ModError::ExecutionError("c".into()).to_string(), "Mod execution error: c");
    assert_eq!(ModError::ConfigError("d".into()).to_string(), "Mod config error: d");
}

#[test]
fn test_mod_error_is_std_error() {
    let err: Box<dyn std::error::Error + Send + Sync> = Box::new(ModError::InitError("boxed".into()));
    assert_eq!(err.to_string(), "Mod initialization error: boxed");
}

#[derive(Debug, Deserialize, PartialEq)]
struct Thrust {
    power: u32,
}

#[test]
fn test_host_context_config_view() {
    let mut host = HostContext::new("/data/Mods", "Booster");
    assert_eq!(host.mod_dir, std::path::PathBuf::from("/data/Mods/Booster"));
    assert_eq!(host.config::<Thrust>().expect("no config"), None);

    host.config = Some(json!({"power": 3}));
    assert_eq!(host.config::<Thrust>().expect("typed"), Some(Thrust { power: 3 }));

    host.config = Some(json!({"power": "lots"}));
    assert!(matches!(host.config::<Thrust>(), Err(ModError::ConfigError(_))));
}
