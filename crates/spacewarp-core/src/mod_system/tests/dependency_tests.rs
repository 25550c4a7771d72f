use crate::mod_system::dependency::{resolve_load_order, DependencyConstraint, DependencyResolver};
use crate::mod_system::manifest::{Candidate, ManifestBuilder, ModManifest};
use crate::mod_system::version::VersionRange;

fn candidate(id: &str, version: &str, deps: &[(&str, &str, &str)]) -> Candidate {
    let mut builder = ManifestBuilder::new(id, id, version);
    for (dep, min, max) in deps {
        builder = builder.dependency(dep, min, max);
    }
    Candidate::new(id, builder.build())
}

fn ids(candidates: &[Candidate]) -> Vec<&str> {
    candidates.iter().map(|c| c.manifest.mod_id.as_str()).collect()
}

/// Every candidate's constraints are met by candidates strictly before it.
fn assert_order_valid(order: &[Candidate]) {
    for (i, c) in order.iter().enumerate() {
        for dep in &c.manifest.dependencies {
            assert!(
                order[..i].iter().any(|earlier| dep.is_satisfied_by(&earlier.manifest)),
                "{} loaded before its dependency {}",
                c.manifest.mod_id,
                dep
            );
        }
    }
}

#[test]
fn test_constraint_satisfaction() {
    let dep = DependencyConstraint::new("b", VersionRange::new("1.0.0", "2.0.0"));
    assert!(dep.is_satisfied_by(&ModManifest::new("b", "B", "1.2.0")));
    assert!(dep.is_satisfied_by(&ModManifest::new("b", "B", "1.0.0")));
    assert!(!dep.is_satisfied_by(&ModManifest::new("b", "B", "2.0.1")));
    assert!(!dep.is_satisfied_by(&ModManifest::new("c", "C", "1.2.0")), "id must match");
}

#[test]
fn test_independent_mods_keep_scan_order() {
    let resolution = resolve_load_order(vec![
        candidate("a", "1.0", &[]),
        candidate("b", "1.0", &[]),
        candidate("c", "1.0", &[]),
    ]);
    assert_eq!(ids(&resolution.load_order), vec!["a", "b", "c"]);
    assert!(resolution.excluded.is_empty());
    assert_eq!(resolution.passes, 1);
}

#[test]
fn test_dependency_loads_before_dependent() {
    let resolution = resolve_load_order(vec![
        candidate("a", "1.0.0", &[("b", "1.0.0", "2.0.0")]),
        candidate("b", "1.2.0", &[]),
    ]);
    assert_eq!(ids(&resolution.load_order), vec!["b", "a"]);
    assert_order_valid(&resolution.load_order);
}

#[test]
fn test_promotions_apply_after_each_pass() {
    // b is found in pass 1, a can only see it from pass 2 on
    let resolution = resolve_load_order(vec![
        candidate("a", "1.0", &[("b", "0", "*")]),
        candidate("b", "1.0", &[]),
        candidate("c", "1.0", &[]),
    ]);
    assert_eq!(ids(&resolution.load_order), vec!["b", "c", "a"]);
    assert_eq!(resolution.passes, 2);
}

#[test]
fn test_chain_terminates_within_candidate_count() {
    let candidates = vec![
        candidate("d", "1.0", &[("c", "1.0", "1.0")]),
        candidate("c", "1.0", &[("b", "1.0", "1.0")]),
        candidate("b", "1.0", &[("a", "1.0", "1.0")]),
        candidate("a", "1.0", &[]),
    ];
    let count = candidates.len();
    let resolution = DependencyResolver::new(candidates).resolve();

    assert_eq!(ids(&resolution.load_order), vec!["a", "b", "c", "d"]);
    assert!(resolution.passes <= count + 1);
    assert_order_valid(&resolution.load_order);
}

#[test]
fn test_cycle_is_excluded_and_unrelated_mods_load() {
    let resolution = resolve_load_order(vec![
        candidate("a", "1.0", &[("b", "0", "*")]),
        candidate("b", "1.0", &[("a", "0", "*")]),
        candidate("c", "1.0", &[]),
    ]);
    assert_eq!(ids(&resolution.load_order), vec!["c"]);
    assert_eq!(ids(&resolution.excluded), vec!["a", "b"]);
    assert_eq!(resolution.passes, 2);
}

#[test]
fn test_too_old_dependency_excludes_dependent_only() {
    let resolution = resolve_load_order(vec![
        candidate("a", "1.0.0", &[("b", "2.0.0", "*")]),
        candidate("b", "1.0.0", &[]),
    ]);
    assert_eq!(ids(&resolution.load_order), vec!["b"]);
    assert_eq!(ids(&resolution.excluded), vec!["a"]);
}

#[test]
fn test_missing_dependency_excludes_transitively() {
    let resolution = resolve_load_order(vec![
        candidate("a", "1.0", &[("ghost", "0", "*")]),
        candidate("b", "1.0", &[("a", "0", "*")]),
        candidate("c", "1.0", &[]),
    ]);
    assert_eq!(ids(&resolution.load_order), vec!["c"]);
    assert_eq!(ids(&resolution.excluded), vec!["a", "b"]);
}

#[test]
fn test_empty_input() {
    let resolution = resolve_load_order(Vec::new());
    assert!(resolution.load_order.is_empty());
    assert!(resolution.excluded.is_empty());
    assert_eq!(resolution.passes, 0);
}

#[test]
fn test_all_constraints_must_hold() {
    let resolution = resolve_load_order(vec![
        candidate("x", "1.0", &[]),
        candidate("y", "3.0", &[]),
        candidate("z", "1.0", &[("x", "1.0", "1.0"), ("y", "1.0", "2.0")]),
    ]);
    assert_eq!(ids(&resolution.load_order), vec!["x", "y"]);
    assert_eq!(ids(&resolution.excluded), vec!["z"]);
}
