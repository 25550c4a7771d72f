use std::fs;

use tempfile::tempdir;

use super::support::{install_mod, manifest_json};
use crate::mod_system::error::ModSystemError;
use crate::mod_system::scanner::ManifestScanner;

fn dir_names(outcome: &crate::mod_system::scanner::ScanOutcome) -> Vec<&str> {
    outcome.candidates.iter().map(|c| c.dir_name.as_str()).collect()
}

#[test]
fn test_scan_finds_mods_in_name_order() {
    let root = tempdir().expect("Failed to create temp directory");
    install_mod(root.path(), "Zeta", &manifest_json("zeta", "1.0", &[]), &[]);
    install_mod(root.path(), "Alpha", &manifest_json("alpha", "1.0", &[]), &[]);
    install_mod(root.path(), "Mid", &manifest_json("mid", "1.0", &[]), &[]);

    let outcome = ManifestScanner::new(root.path()).scan().expect("scan");

    assert_eq!(dir_names(&outcome), vec!["Alpha", "Mid", "Zeta"]);
    assert_eq!(outcome.candidates[0].manifest.mod_id, "alpha");
    assert!(outcome.rejected.is_empty());
}

#[test]
fn test_ignore_marker_skips_mod() {
    let root = tempdir().expect("Failed to create temp directory");
    install_mod(root.path(), "Kept", &manifest_json("kept", "1.0", &[]), &[]);
    install_mod(root.path(), "Ignored", &manifest_json("ignored", "1.0", &[]), &[]);
    fs::write(root.path().join("Ignored").join(".ignore"), "any content").expect("write marker");

    let outcome = ManifestScanner::new(root.path()).scan().expect("scan");

    assert_eq!(dir_names(&outcome), vec!["Kept"]);
    assert!(outcome.rejected.is_empty(), "ignored mods are not rejections");
}

#[test]
fn test_directory_without_manifest_is_skipped() {
    let root = tempdir().expect("Failed to create temp directory");
    fs::create_dir_all(root.path().join("NoManifest").join("bin")).expect("mkdir");
    install_mod(root.path(), "Good", &manifest_json("good", "1.0", &[]), &[]);

    let outcome = ManifestScanner::new(root.path()).scan().expect("scan");

    assert_eq!(dir_names(&outcome), vec!["Good"]);
    assert!(outcome.rejected.is_empty());
}

#[test]
fn test_malformed_manifest_excludes_only_that_mod() {
    let root = tempdir().expect("Failed to create temp directory");
    install_mod(root.path(), "Broken", "{ \"mod_id\": ", &[]);
    install_mod(root.path(), "Good", &manifest_json("good", "1.0", &[]), &[]);

    let outcome = ManifestScanner::new(root.path()).scan().expect("scan");

    assert_eq!(dir_names(&outcome), vec!["Good"]);
    assert_eq!(outcome.rejected.len(), 1);
    assert_eq!(outcome.rejected[0].dir_name, "Broken");
}

#[test]
fn test_duplicate_mod_id_keeps_first() {
    let root = tempdir().expect("Failed to create temp directory");
    install_mod(root.path(), "A_Original", &manifest_json("shared", "1.0", &[]), &[]);
    install_mod(root.path(), "B_Copy", &manifest_json("shared", "2.0", &[]), &[]);

    let outcome = ManifestScanner::new(root.path()).scan().expect("scan");

    assert_eq!(dir_names(&outcome), vec!["A_Original"]);
    assert_eq!(outcome.rejected.len(), 1);
    assert!(outcome.rejected[0].reason.contains("shared"));
}

#[test]
fn test_files_at_root_are_ignored() {
    let root = tempdir().expect("Failed to create temp directory");
    fs::write(root.path().join("space_warp_config.json"), "{}").expect("write");

    let outcome = ManifestScanner::new(root.path()).scan().expect("empty scan is fine");

    assert!(outcome.candidates.is_empty());
}

#[test]
fn test_unreadable_root_is_fatal() {
    let root = tempdir().expect("Failed to create temp directory");
    let missing = root.path().join("Mods");

    match ManifestScanner::new(&missing).scan() {
        Err(ModSystemError::ScanFatal { path, .. }) => assert_eq!(path, missing),
        other => panic!("expected ScanFatal, got {:?}", other),
    }

    let not_a_dir = root.path().join("file");
    fs::write(&not_a_dir, "x").expect("write");
    assert!(matches!(
        ManifestScanner::new(&not_a_dir).scan(),
        Err(ModSystemError::ScanFatal { .. })
    ));
}
