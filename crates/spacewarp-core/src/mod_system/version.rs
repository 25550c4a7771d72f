//! Dotted version comparison.
//!
//! A version is split on `.` into components compared left to right, with
//! missing trailing components counting as `0`. Parsing is lenient and the
//! same rule applies to both bound checks:
//!
//! - a component that is exactly `*` is a wildcard: comparison stops there and
//!   the versions compare equal, so `*` accepts anything and `1.*` accepts any
//!   `1.x`;
//! - any other component that is not a non-negative integer counts as `0`.
//!
//! Nothing here fails; malformed input only changes the numbers compared.
use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Component {
    Number(u64),
    Wildcard,
}

fn parse_component(raw: &str) -> Component {
    let raw = raw.trim();
    if raw == "*" {
        Component::Wildcard
    } else {
        Component::Number(raw.parse::<u64>().unwrap_or(0))
    }
}

fn components(version: &str) -> Vec<Component> {
    version.trim().split('.').map(parse_component).collect()
}

/// Compares two version identifiers component by component.
pub fn compare_versions(left: &str, right: &str) -> Ordering {
    let left = components(left);
    let right = components(right);
    let len = left.len().max(right.len());

    for i in 0..len {
        let l = left.get(i).copied().unwrap_or(Component::Number(0));
        let r = right.get(i).copied().unwrap_or(Component::Number(0));
        match (l, r) {
            (Component::Wildcard, _) | (_, Component::Wildcard) => return Ordering::Equal,
            (Component::Number(a), Component::Number(b)) => match a.cmp(&b) {
                Ordering::Equal => continue,
                other => return other,
            },
        }
    }
    Ordering::Equal
}

/// True when `version` is at or above `min` (inclusive).
pub fn is_version_at_or_above(version: &str, min: &str) -> bool {
    compare_versions(version, min) != Ordering::Less
}

/// True when `version` is at or below `max` (inclusive).
pub fn is_version_at_or_below(version: &str, max: &str) -> bool {
    compare_versions(version, max) != Ordering::Greater
}

/// Inclusive `{min, max}` version bounds as written in manifests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionRange {
    pub min: String,
    pub max: String,
}

impl VersionRange {
    pub fn new(min: &str, max: &str) -> Self {
        Self {
            min: min.to_string(),
            max: max.to_string(),
        }
    }

    /// A range accepting every version.
    pub fn any() -> Self {
        Self::new("*", "*")
    }

    /// Checks `version` against both bounds.
    pub fn includes(&self, version: &str) -> bool {
        is_version_at_or_above(version, &self.min) && is_version_at_or_below(version, &self.max)
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}
