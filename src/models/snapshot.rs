//! Allocation outcome and snapshot models.
//!
//! A [`Snapshot`] is the complete state after processing a prefix of the
//! priority-ordered students: every result recorded so far plus the
//! remaining capacities. Snapshots are full copies, not diffs, so a viewer
//! can jump to any step without recomputation.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::SpecialisationCapacities;

/// Which preference an assignment satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankAchieved {
    /// 1-based position in the student's own preference list.
    Preference(usize),
    /// Placed by random fallback outside the considered preferences.
    Random,
    /// Placed by hand after the run, outside the student's preferences.
    Manual,
    /// Not placed.
    None,
}

impl fmt::Display for RankAchieved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RankAchieved::Preference(rank) => write!(f, "{rank}"),
            RankAchieved::Random => f.write_str("random"),
            RankAchieved::Manual => f.write_str("manual"),
            RankAchieved::None => f.write_str("none"),
        }
    }
}

/// Outcome for one student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationResult {
    /// Student this outcome belongs to.
    pub student_id: u64,
    /// Assigned specialisation; `None` = unassigned.
    pub assigned_spec: Option<String>,
    /// Preference rank the assignment corresponds to.
    pub rank_achieved: RankAchieved,
}

impl AllocationResult {
    /// Sentinel label used when exporting unassigned students.
    pub const UNASSIGNED: &'static str = "unassigned";

    /// Assignment to a listed preference.
    pub fn preferred(student_id: u64, spec: impl Into<String>, rank: usize) -> Self {
        Self {
            student_id,
            assigned_spec: Some(spec.into()),
            rank_achieved: RankAchieved::Preference(rank),
        }
    }

    /// Assignment by random fallback.
    pub fn random(student_id: u64, spec: impl Into<String>) -> Self {
        Self {
            student_id,
            assigned_spec: Some(spec.into()),
            rank_achieved: RankAchieved::Random,
        }
    }

    /// No seat available.
    pub fn unassigned(student_id: u64) -> Self {
        Self {
            student_id,
            assigned_spec: None,
            rank_achieved: RankAchieved::None,
        }
    }

    /// Whether the student holds no seat.
    #[inline]
    pub fn is_unassigned(&self) -> bool {
        self.assigned_spec.is_none()
    }

    /// Assigned specialisation, or the `"unassigned"` sentinel.
    pub fn spec_label(&self) -> &str {
        self.assigned_spec.as_deref().unwrap_or(Self::UNASSIGNED)
    }
}

/// The student handled at a particular step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
    /// Student ID.
    pub student_id: u64,
    /// Student GPA.
    pub gpa: f64,
    /// Preferences that were scanned, in rank order.
    pub preferences: Vec<String>,
    /// What happened to the student.
    pub outcome: AllocationResult,
}

/// Point-in-time state after processing students `1..=step`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Number of students processed (1-based step index).
    pub step: usize,
    /// The student processed at this step.
    pub current: StepRecord,
    /// All results so far, in processing order.
    pub results: Vec<AllocationResult>,
    /// Remaining seats after this step.
    pub remaining: SpecialisationCapacities,
}

impl Snapshot {
    /// Finds the result recorded for a student.
    pub fn result_for(&self, student_id: u64) -> Option<&AllocationResult> {
        self.results.iter().find(|r| r.student_id == student_id)
    }

    /// Results of students without a seat, in processing order.
    pub fn unassigned(&self) -> impl Iterator<Item = &AllocationResult> {
        self.results.iter().filter(|r| r.is_unassigned())
    }

    /// Number of students without a seat.
    pub fn unassigned_count(&self) -> usize {
        self.unassigned().count()
    }

    /// Number of students holding a seat.
    pub fn assigned_count(&self) -> usize {
        self.results.len() - self.unassigned_count()
    }

    /// Results for students placed in `spec`.
    pub fn members_of<'a>(&'a self, spec: &'a str) -> impl Iterator<Item = &'a AllocationResult> {
        self.results
            .iter()
            .filter(move |r| r.assigned_spec.as_deref() == Some(spec))
    }
}
