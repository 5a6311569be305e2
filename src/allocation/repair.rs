//! Post-run adjustment of a final allocation.
//!
//! These functions never modify a recorded [`AllocationRun`]; they take its
//! final state and return a new [`FinalView`].
//!
//! [`AllocationRun`]: super::AllocationRun

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

use crate::error::ConfigurationError;
use crate::models::{AllocationResult, RankAchieved, Snapshot, SpecialisationCapacities, Student};

/// A final allocation derived from a run's last snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalView {
    /// Results in the run's processing order.
    pub results: Vec<AllocationResult>,
    /// Seats left after the adjustments.
    pub remaining: SpecialisationCapacities,
    /// Students whose result changed, each listed once, in the order they
    /// were first changed.
    pub reassigned: Vec<u64>,
}

impl FinalView {
    /// A view identical to `snapshot`.
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        Self {
            results: snapshot.results.clone(),
            remaining: snapshot.remaining.clone(),
            reassigned: Vec::new(),
        }
    }

    /// Finds the result for a student.
    pub fn result_for(&self, student_id: u64) -> Option<&AllocationResult> {
        self.results.iter().find(|r| r.student_id == student_id)
    }

    /// Students still without a seat.
    pub fn unassigned(&self) -> impl Iterator<Item = &AllocationResult> {
        self.results.iter().filter(|r| r.is_unassigned())
    }
}

/// Places unassigned students using an updated capacity map.
///
/// Walks the unassigned students of `final_snapshot` in their recorded
/// priority order and gives each the best-ranked preference that has a free
/// seat in `capacities`. Students with no such preference stay unassigned.
/// Students who already hold a seat are left alone and do not consume from
/// `capacities`, which should therefore describe the seats available for the
/// repair (typically the final remaining seats plus any newly opened ones).
///
/// # Errors
/// [`ConfigurationError::UnknownStudent`] when an unassigned result has no
/// matching row in `students`.
pub fn reassign_unassigned(
    final_snapshot: &Snapshot,
    students: &[Student],
    capacities: &SpecialisationCapacities,
) -> Result<FinalView, ConfigurationError> {
    let by_id: HashMap<u64, &Student> = students.iter().map(|s| (s.id, s)).collect();
    let mut remaining = capacities.clone();
    let mut reassigned = Vec::new();
    let mut results = final_snapshot.results.clone();

    for result in results.iter_mut().filter(|r| r.is_unassigned()) {
        let student = by_id
            .get(&result.student_id)
            .ok_or(ConfigurationError::UnknownStudent {
                student_id: result.student_id,
            })?;

        let placed = student
            .preferences
            .iter()
            .enumerate()
            .find(|(_, spec)| remaining.take_seat(spec));

        if let Some((i, spec)) = placed {
            *result = AllocationResult::preferred(student.id, spec.as_str(), i + 1);
            reassigned.push(student.id);
        }
    }

    debug!(
        reassigned = reassigned.len(),
        still_unassigned = results.iter().filter(|r| r.is_unassigned()).count(),
        "unassigned students repaired"
    );

    Ok(FinalView {
        results,
        remaining,
        reassigned,
    })
}

/// Moves one student into `spec` by hand.
///
/// The student's previous seat (if any) is released. The recorded rank is
/// the student's own rank for `spec` when listed, [`RankAchieved::Manual`]
/// otherwise.
///
/// # Errors
/// - [`ConfigurationError::UnknownStudent`] if the student is not in `view`
///   or `students`.
/// - [`ConfigurationError::UnknownSpecialisation`] if `spec` is not configured.
/// - [`ConfigurationError::NoSeatAvailable`] if `spec` is full.
pub fn assign_manually(
    view: &FinalView,
    students: &[Student],
    student_id: u64,
    spec: &str,
) -> Result<FinalView, ConfigurationError> {
    let unknown = ConfigurationError::UnknownStudent { student_id };
    let student = students
        .iter()
        .find(|s| s.id == student_id)
        .ok_or_else(|| unknown.clone())?;
    let slot = view
        .results
        .iter()
        .position(|r| r.student_id == student_id)
        .ok_or(unknown)?;

    if !view.remaining.contains(spec) {
        return Err(ConfigurationError::UnknownSpecialisation {
            student_id,
            spec: spec.to_string(),
        });
    }

    let mut next = view.clone();
    if let Some(previous) = next.results[slot].assigned_spec.take() {
        next.remaining.release_seat(&previous);
    }
    if !next.remaining.take_seat(spec) {
        return Err(ConfigurationError::NoSeatAvailable {
            spec: spec.to_string(),
        });
    }

    let rank = student
        .rank_of(spec)
        .map_or(RankAchieved::Manual, RankAchieved::Preference);
    next.results[slot] = AllocationResult {
        student_id,
        assigned_spec: Some(spec.to_string()),
        rank_achieved: rank,
    };
    if !next.reassigned.contains(&student_id) {
        next.reassigned.push(student_id);
    }
    Ok(next)
}
