use std::fs;

use log::LevelFilter;
use tempfile::tempdir;

use crate::storage::global::{load_global_config, GlobalConfig, LogLevel};
use crate::storage::local::LocalStorageProvider;

#[test]
fn test_log_level_is_an_integer_on_disk() {
    let json = serde_json::to_string(&GlobalConfig { log_level: LogLevel::Debug }).expect("serialize");
    assert_eq!(json, r#"{"LogLevel":5}"#);
}

#[test]
fn test_log_level_out_of_range_is_clamped() {
    let low: GlobalConfig = serde_json::from_str(r#"{"LogLevel": -3}"#).expect("parse");
    let high: GlobalConfig = serde_json::from_str(r#"{"LogLevel": 42}"#).expect("parse");
    assert_eq!(low.log_level, LogLevel::None);
    assert_eq!(high.log_level, LogLevel::All);
}

#[test]
fn test_log_level_filters() {
    assert_eq!(LogLevel::None.to_level_filter(), LevelFilter::Off);
    assert_eq!(LogLevel::Critical.to_level_filter(), LevelFilter::Error);
    assert_eq!(LogLevel::Warning.to_level_filter(), LevelFilter::Warn);
    assert_eq!(LogLevel::Info.to_level_filter(), LevelFilter::Info);
    assert_eq!(LogLevel::All.to_level_filter(), LevelFilter::Trace);
}

#[test]
fn test_missing_global_config_is_created() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let provider = LocalStorageProvider::new(temp_dir.path().join("Mods"));

    let config = load_global_config(&provider);

    assert_eq!(config.log_level, LogLevel::Info);
    let written = fs::read_to_string(temp_dir.path().join("Mods").join("space_warp_config.json"))
        .expect("global config persisted");
    let reread: GlobalConfig = serde_json::from_str(&written).expect("valid json");
    assert_eq!(reread, config);
}

#[test]
fn test_missing_field_is_populated() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let path = temp_dir.path().join("space_warp_config.json");
    fs::write(&path, "{}").expect("write");

    let config = load_global_config(&LocalStorageProvider::new(temp_dir.path().to_path_buf()));

    assert_eq!(config.log_level, LogLevel::Info);
    let written = fs::read_to_string(&path).expect("read");
    assert!(written.contains("\"LogLevel\": 4"), "got {}", written);
}

#[test]
fn test_existing_level_is_kept_and_corrupt_file_reset() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let path = temp_dir.path().join("space_warp_config.json");
    let provider = LocalStorageProvider::new(temp_dir.path().to_path_buf());

    fs::write(&path, r#"{"LogLevel": 2}"#).expect("write");
    assert_eq!(load_global_config(&provider).log_level, LogLevel::Error);

    fs::write(&path, "not json at all").expect("write");
    assert_eq!(load_global_config(&provider).log_level, LogLevel::Info);
}
