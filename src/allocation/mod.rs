//! Greedy allocation, replay and post-run adjustment.
//!
//! # Algorithm
//!
//! [`AllocationEngine`] processes students once, in GPA-descending order,
//! giving each the first preferred specialisation with room. It is a
//! heuristic: there is no backtracking and no stability guarantee.
//!
//! # Replay
//!
//! A run yields one [`Snapshot`] per student. [`AllocationRun`] owns them
//! and [`Replay`] navigates them by index.
//!
//! # Adjustment and statistics
//!
//! [`reassign_unassigned`] and [`assign_manually`] build a new
//! [`FinalView`] without touching the recorded run. [`AllocationKpi`]
//! summarises any result set (ranks achieved, per-specialisation cutoffs).

mod engine;
mod kpi;
mod repair;
mod replay;

pub use engine::{AllocationConfig, AllocationEngine};
pub use kpi::{AllocationKpi, SpecCutoff};
pub use repair::{assign_manually, reassign_unassigned, FinalView};
pub use replay::Replay;

use serde::{Deserialize, Serialize};

use crate::models::{Snapshot, SpecialisationCapacities};

/// The complete, immutable output of one allocation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationRun {
    initial: SpecialisationCapacities,
    snapshots: Vec<Snapshot>,
}

impl AllocationRun {
    pub(crate) fn new(initial: SpecialisationCapacities, snapshots: Vec<Snapshot>) -> Self {
        Self { initial, snapshots }
    }

    /// Capacities as configured before the first student.
    pub fn initial_capacities(&self) -> &SpecialisationCapacities {
        &self.initial
    }

    /// All snapshots in processing order.
    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    /// Snapshot at a 0-based index.
    pub fn snapshot(&self, index: usize) -> Option<&Snapshot> {
        self.snapshots.get(index)
    }

    /// State after the last student.
    pub fn final_snapshot(&self) -> Option<&Snapshot> {
        self.snapshots.last()
    }

    /// Number of steps (= students processed).
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Whether the run processed no students.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Iterates snapshots in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Snapshot> {
        self.snapshots.iter()
    }

    /// A cursor positioned at the first step.
    pub fn replay(&self) -> Replay<'_> {
        Replay::new(&self.snapshots)
    }
}

impl<'a> IntoIterator for &'a AllocationRun {
    type Item = &'a Snapshot;
    type IntoIter = std::slice::Iter<'a, Snapshot>;

    fn into_iter(self) -> Self::IntoIter {
        self.snapshots.iter()
    }
}
