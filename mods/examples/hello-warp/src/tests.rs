use super::*;
use spacewarp_core::mod_system::ModExports;
use spacewarp_core::storage::ConfigSchema;

fn host_with(config: Option<Value>) -> HostContext {
    let mut host = HostContext::new("/tmp/Mods", "HelloWarp");
    host.config = config;
    host
}

fn manifest() -> ModManifest {
    ModManifest::new("hello_warp", "Hello Warp", "0.1.0")
}

#[test]
fn register_exports_entry_point_and_schema() {
    let mut exports = ModExports::default();
    register(&mut exports);

    assert_eq!(exports.entry_points.len(), 1);
    assert!(exports.entry_points[0].is_compatible());
    assert!(exports.entry_points[0].type_name().ends_with("HelloWarp"));
    assert_eq!(exports.config_schemas.len(), 1);
}

#[test]
fn default_config_uses_field_defaults() {
    let schema = TypedConfigSchema::<HelloConfig>::new();
    let value = schema.default_value().expect("defaults serialize");
    let config: HelloConfig = serde_json::from_value(value).expect("valid config");

    assert_eq!(config.greeting, "Hello from the warp drive");
    assert_eq!(config.repeat, 1);
}

#[test]
fn greets_configured_number_of_times() {
    let mut hello = HelloWarp::default();
    let config = json!({"greeting": "o7", "repeat": 3});

    hello.setup(&host_with(Some(config)), &manifest()).expect("setup");
    hello.initialize().expect("initialize");
    hello.on_initialized().expect("on_initialized");

    assert_eq!(hello.greeted(), 3);
}

#[test]
fn setup_rejects_excessive_repeat() {
    let mut hello = HelloWarp::default();
    let config = json!({"greeting": "o7", "repeat": MAX_REPEAT + 1});

    let result = hello.setup(&host_with(Some(config)), &manifest());

    assert!(matches!(result, Err(ModError::SetupError(_))));
}

#[test]
fn initialize_fails_without_greeting() {
    // No config at all leaves the greeting empty
    let mut hello = HelloWarp::default();
    hello.setup(&host_with(None), &manifest()).expect("setup");

    assert!(matches!(hello.initialize(), Err(ModError::InitError(_))));
}
