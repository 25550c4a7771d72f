use std::fmt;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::mod_system::manifest::{Candidate, ModManifest};
use crate::mod_system::version::VersionRange;

/// Represents a dependency on another mod
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyConstraint {
    /// The `mod_id` of the required mod
    pub id: String,

    /// Inclusive bounds the required mod's version must fall in
    pub version: VersionRange,
}

impl DependencyConstraint {
    pub fn new(id: &str, version: VersionRange) -> Self {
        Self {
            id: id.to_string(),
            version,
        }
    }

    /// Check whether `manifest` is a mod that satisfies this constraint
    pub fn is_satisfied_by(&self, manifest: &ModManifest) -> bool {
        manifest.mod_id == self.id && self.version.includes(&manifest.version)
    }
}

impl fmt::Display for DependencyConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.id, self.version)
    }
}

/// Outcome of one resolver run.
#[derive(Debug, Clone)]
pub struct Resolution {
    /// Candidates in load order; each one's constraints are met by earlier entries
    pub load_order: Vec<Candidate>,
    /// Candidates whose constraints were never met, in scan order
    pub excluded: Vec<Candidate>,
    /// Number of passes made before the fixed point
    pub passes: usize,
}

/// Computes a load order by promoting candidates whose dependencies are
/// already resolved, one full pass at a time, until a pass promotes nothing.
///
/// Within a pass every candidate is checked against `resolved` as it stood
/// when the pass began; promotions are applied afterwards in the order they
/// were found. Independent candidates therefore keep their scan order, and
/// dependency cycles simply never resolve.
#[derive(Debug)]
pub struct DependencyResolver {
    pending: Vec<Candidate>,
    resolved: Vec<Candidate>,
    passes: usize,
}

impl DependencyResolver {
    pub fn new(candidates: Vec<Candidate>) -> Self {
        Self {
            pending: candidates,
            resolved: Vec::new(),
            passes: 0,
        }
    }

    /// Runs to the fixed point and returns the load order and exclusions.
    pub fn resolve(mut self) -> Resolution {
        info!("Resolving Load Order");

        while !self.pending.is_empty() {
            if self.run_pass() == 0 {
                break;
            }
        }

        for candidate in &self.pending {
            warn!(
                "Skipping loading of {} as not all dependencies could be met",
                candidate.dir_name
            );
        }

        Resolution {
            load_order: self.resolved,
            excluded: self.pending,
            passes: self.passes,
        }
    }

    /// One pass over `pending`. Returns how many candidates were promoted.
    fn run_pass(&mut self) -> usize {
        self.passes += 1;

        let marks: Vec<bool> = self
            .pending
            .iter()
            .map(|candidate| {
                debug!("Attempting to resolve dependencies for {}", candidate.dir_name);
                self.are_dependencies_resolved(&candidate.manifest)
            })
            .collect();

        let mut promoted = 0;
        let pending = std::mem::take(&mut self.pending);
        for (candidate, satisfied) in pending.into_iter().zip(marks) {
            if satisfied {
                self.resolved.push(candidate);
                promoted += 1;
            } else {
                self.pending.push(candidate);
            }
        }
        promoted
    }

    fn are_dependencies_resolved(&self, manifest: &ModManifest) -> bool {
        manifest.dependencies.iter().all(|dependency| {
            debug!("{} dependency - {}", manifest.name, dependency);
            self.resolved
                .iter()
                .any(|loaded| dependency.is_satisfied_by(&loaded.manifest))
        })
    }
}

/// Convenience wrapper: one resolver per call.
pub fn resolve_load_order(candidates: Vec<Candidate>) -> Resolution {
    DependencyResolver::new(candidates).resolve()
}
