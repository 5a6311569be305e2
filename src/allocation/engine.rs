//! GPA-ranked greedy allocation engine.
//!
//! # Algorithm
//!
//! 1. Validate the student table against the capacity map.
//! 2. Order students by the priority order (GPA descending, stable).
//! 3. For each student, take a seat in the first listed preference with
//!    room; otherwise optionally draw uniformly among specialisations
//!    that still have room; otherwise leave the student unassigned.
//! 4. After each student, record a full [`Snapshot`].
//!
//! # Complexity
//! O(n log n + n * p) decisions for n students and p preferences, plus
//! O(n^2) snapshot storage since every step holds a full copy.

use rand::rngs::SmallRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace, warn};

use super::AllocationRun;
use crate::error::ConfigurationError;
use crate::models::{AllocationResult, Snapshot, SpecialisationCapacities, StepRecord, Student};
use crate::priority::PriorityOrder;
use crate::validation::validate_input;

/// Run-level settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationConfig {
    /// Place students whose preferences are all full into a random
    /// specialisation that still has room.
    pub allow_random_fallback: bool,
    /// Seed for the fallback draw. `None` = OS entropy.
    pub rng_seed: Option<u64>,
    /// Only the first `max_prefs` preferences are considered. `None` = all.
    pub max_prefs: Option<usize>,
}

impl AllocationConfig {
    /// Creates a config with fallback disabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables random fallback.
    pub fn with_random_fallback(mut self, allow: bool) -> Self {
        self.allow_random_fallback = allow;
        self
    }

    /// Seeds the fallback draw.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    /// Limits how many preferences are considered per student.
    pub fn with_max_prefs(mut self, max_prefs: usize) -> Self {
        self.max_prefs = Some(max_prefs);
        self
    }
}

/// Single-pass greedy allocator.
///
/// Each call to [`run`](Self::run) clones the capacity map it is given and
/// owns that copy until it returns; nothing is shared between calls.
///
/// # Example
///
/// ```
/// use u_allocation::allocation::{AllocationConfig, AllocationEngine};
/// use u_allocation::models::{RankAchieved, SpecialisationCapacities, Student};
///
/// let capacities = SpecialisationCapacities::new()
///     .with_seats("A", 1)
///     .with_seats("B", 1);
/// let students = vec![
///     Student::new(1, 9.0).with_preferences(["A", "B"]),
///     Student::new(2, 8.0).with_preferences(["A", "B"]),
/// ];
///
/// let run = AllocationEngine::new(AllocationConfig::new())
///     .run(&students, &capacities)
///     .unwrap();
/// let last = run.final_snapshot().unwrap();
/// assert_eq!(last.result_for(2).unwrap().rank_achieved, RankAchieved::Preference(2));
/// assert_eq!(last.remaining.total(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct AllocationEngine {
    config: AllocationConfig,
    order: PriorityOrder,
}

impl AllocationEngine {
    /// Creates an engine using GPA-descending order.
    pub fn new(config: AllocationConfig) -> Self {
        Self {
            config,
            order: PriorityOrder::gpa_descending(),
        }
    }

    /// Replaces the processing order.
    pub fn with_priority_order(mut self, order: PriorityOrder) -> Self {
        self.order = order;
        self
    }

    /// Run settings.
    pub fn config(&self) -> &AllocationConfig {
        &self.config
    }

    /// Allocates `students` against `capacities`.
    ///
    /// # Errors
    /// The first [`ConfigurationError`] found by
    /// [`validate_input`](crate::validation::validate_input); all issues are
    /// logged. No snapshots are produced for invalid input.
    #[instrument(
        skip_all,
        fields(
            students = students.len(),
            specs = capacities.len(),
            fallback = self.config.allow_random_fallback
        )
    )]
    pub fn run(
        &self,
        students: &[Student],
        capacities: &SpecialisationCapacities,
    ) -> Result<AllocationRun, ConfigurationError> {
        if let Err(errors) = validate_input(students, capacities) {
            for e in &errors {
                warn!(field = e.field(), "rejected allocation input: {e}");
            }
            if let Some(first) = errors.into_iter().next() {
                return Err(first);
            }
        }

        let mut rng = self
            .config
            .allow_random_fallback
            .then(|| match self.config.rng_seed {
                Some(seed) => SmallRng::seed_from_u64(seed),
                None => SmallRng::from_os_rng(),
            });

        let mut remaining = capacities.clone();
        let mut results: Vec<AllocationResult> = Vec::with_capacity(students.len());
        let mut snapshots = Vec::with_capacity(students.len());

        for (i, &idx) in self.order.sort_indices(students).iter().enumerate() {
            let student = &students[idx];
            let considered = self.considered_preferences(student);
            let outcome = place(student.id, considered, &mut remaining, rng.as_mut());

            trace!(
                step = i + 1,
                student = student.id,
                spec = outcome.spec_label(),
                rank = %outcome.rank_achieved,
                "student processed"
            );

            results.push(outcome.clone());
            snapshots.push(Snapshot {
                step: i + 1,
                current: StepRecord {
                    student_id: student.id,
                    gpa: student.gpa,
                    preferences: considered.to_vec(),
                    outcome,
                },
                results: results.clone(),
                remaining: remaining.clone(),
            });
        }

        let unassigned = results.iter().filter(|r| r.is_unassigned()).count();
        debug!(
            assigned = results.len() - unassigned,
            unassigned,
            seats_left = remaining.total(),
            "allocation run complete"
        );

        Ok(AllocationRun::new(capacities.clone(), snapshots))
    }

    fn considered_preferences<'a>(&self, student: &'a Student) -> &'a [String] {
        match self.config.max_prefs {
            Some(max) => &student.preferences[..max.min(student.preferences.len())],
            None => &student.preferences,
        }
    }
}

impl Default for AllocationEngine {
    fn default() -> Self {
        Self::new(AllocationConfig::default())
    }
}

/// Places one student, consuming at most one seat.
fn place(
    student_id: u64,
    preferences: &[String],
    remaining: &mut SpecialisationCapacities,
    fallback: Option<&mut SmallRng>,
) -> AllocationResult {
    for (i, spec) in preferences.iter().enumerate() {
        if remaining.take_seat(spec) {
            return AllocationResult::preferred(student_id, spec.as_str(), i + 1);
        }
    }

    if let Some(rng) = fallback {
        let open: Vec<&str> = remaining.available().collect();
        if let Some(spec) = open.choose(rng).map(|s| s.to_string()) {
            remaining.take_seat(&spec);
            return AllocationResult::random(student_id, spec);
        }
    }

    AllocationResult::unassigned(student_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RankAchieved;
    use crate::priority::TieBreaker;

    fn caps(entries: &[(&str, u32)]) -> SpecialisationCapacities {
        entries
            .iter()
            .fold(SpecialisationCapacities::new(), |c, &(s, n)| c.with_seats(s, n))
    }

    fn with_fallback(seed: u64) -> AllocationEngine {
        AllocationEngine::new(
            AllocationConfig::new()
                .with_random_fallback(true)
                .with_seed(seed),
        )
    }

    fn student(id: u64, gpa: f64, prefs: &[&str]) -> Student {
        Student::new(id, gpa).with_preferences(prefs.iter().copied())
    }

    fn mixed_population() -> Vec<Student> {
        vec![
            student(1, 6.2, &["A", "B", "C"]),
            student(2, 8.9, &["A", "C", "B"]),
            student(3, 7.4, &["B", "A", "C"]),
            student(4, 7.4, &["A", "B", "C"]),
            student(5, 5.0, &["C", "A", "B"]),
            student(6, 9.1, &["C", "B", "A"]),
            student(7, 4.3, &["A", "B", "C"]),
            student(8, 6.8, &["B", "C", "A"]),
        ]
    }

    #[test]
    fn test_two_students_two_specs() {
        let students = vec![student(1, 9.0, &["A", "B"]), student(2, 8.0, &["A", "B"])];
        let run = AllocationEngine::new(AllocationConfig::new())
            .run(&students, &caps(&[("A", 1), ("B", 1)]))
            .unwrap();

        let last = run.final_snapshot().unwrap();
        assert_eq!(
            last.result_for(1),
            Some(&AllocationResult::preferred(1, "A", 1))
        );
        assert_eq!(
            last.result_for(2),
            Some(&AllocationResult::preferred(2, "B", 2))
        );
        assert_eq!(last.remaining.remaining("A"), Some(0));
        assert_eq!(last.remaining.remaining("B"), Some(0));
    }

    #[test]
    fn test_single_seat_no_fallback() {
        let students = vec![student(2, 80.0, &["A"]), student(1, 90.0, &["A"])];
        let run = AllocationEngine::new(AllocationConfig::new())
            .run(&students, &caps(&[("A", 1)]))
            .unwrap();

        let last = run.final_snapshot().unwrap();
        assert_eq!(last.results[0], AllocationResult::preferred(1, "A", 1));
        assert_eq!(last.results[1], AllocationResult::unassigned(2));
        assert_eq!(last.results[1].rank_achieved, RankAchieved::None);
    }

    #[test]
    fn test_fallback_cannot_invent_capacity() {
        let students = vec![student(1, 90.0, &["A"]), student(2, 80.0, &["A"])];
        let run = with_fallback(7)
            .run(&students, &caps(&[("A", 1)]))
            .unwrap();

        let last = run.final_snapshot().unwrap();
        assert!(last.result_for(2).unwrap().is_unassigned());
    }

    #[test]
    fn test_fallback_assigns_outside_preferences() {
        let students = vec![
            student(1, 9.0, &["Software", "Mechanical"]),
            student(2, 8.5, &["Software", "Mechanical"]),
            student(3, 7.0, &["Software", "Mechanical"]),
        ];
        let capacities = caps(&[
            ("Software", 1),
            ("Mechanical", 1),
            ("Engineering Science", 1),
        ]);
        let run = with_fallback(42).run(&students, &capacities).unwrap();

        let last = run.final_snapshot().unwrap();
        assert_eq!(last.result_for(1).unwrap().spec_label(), "Software");
        assert_eq!(last.result_for(2).unwrap().spec_label(), "Mechanical");
        assert_eq!(
            last.result_for(3),
            Some(&AllocationResult::random(3, "Engineering Science"))
        );
    }

    #[test]
    fn test_fallback_disabled_leaves_unassigned() {
        let students = vec![student(1, 9.0, &["A"]), student(2, 8.0, &["A"])];
        let run = AllocationEngine::new(AllocationConfig::new())
            .run(&students, &caps(&[("A", 1), ("B", 5)]))
            .unwrap();
        let last = run.final_snapshot().unwrap();
        assert!(last.result_for(2).unwrap().is_unassigned());
        assert_eq!(last.remaining.remaining("B"), Some(5));
    }

    #[test]
    fn test_one_snapshot_per_student() {
        let students = mixed_population();
        let run = AllocationEngine::new(AllocationConfig::new())
            .run(&students, &caps(&[("A", 2), ("B", 2), ("C", 2)]))
            .unwrap();

        assert_eq!(run.len(), students.len());
        for (i, snap) in run.iter().enumerate() {
            assert_eq!(snap.step, i + 1);
            assert_eq!(snap.results.len(), i + 1);
            assert_eq!(snap.results.last(), Some(&snap.current.outcome));
        }
    }

    #[test]
    fn test_processing_order_is_gpa_descending_stable() {
        let students = mixed_population();
        let run = AllocationEngine::new(AllocationConfig::new())
            .run(&students, &caps(&[("A", 8)]))
            .unwrap();
        let order: Vec<u64> = run.iter().map(|s| s.current.student_id).collect();
        // 3 and 4 tie at 7.4 and keep input order.
        assert_eq!(order, vec![6, 2, 3, 4, 8, 1, 5, 7]);
    }

    #[test]
    fn test_seat_accounting_invariant() {
        let students = mixed_population();
        let initial = caps(&[("A", 2), ("B", 1), ("C", 2)]);
        let run = with_fallback(3).run(&students, &initial).unwrap();

        for snap in run.iter() {
            let consumed = snap.remaining.consumed_since(&initial);
            assert_eq!(consumed as usize, snap.assigned_count());
        }
    }

    #[test]
    fn test_rank_matches_preference_list() {
        let students = mixed_population();
        let run = AllocationEngine::new(AllocationConfig::new())
            .run(&students, &caps(&[("A", 2), ("B", 2), ("C", 2)]))
            .unwrap();

        let last = run.final_snapshot().unwrap();
        for r in &last.results {
            if let RankAchieved::Preference(rank) = r.rank_achieved {
                let s = students.iter().find(|s| s.id == r.student_id).unwrap();
                assert_eq!(s.preference_at(rank), r.assigned_spec.as_deref());
            }
        }
    }

    #[test]
    fn test_remaining_capacity_monotone() {
        let students = mixed_population();
        let run = with_fallback(11)
            .run(&students, &caps(&[("A", 3), ("B", 1), ("C", 2)]))
            .unwrap();

        for pair in run.snapshots().windows(2) {
            for (spec, before) in pair[0].remaining.iter() {
                assert!(pair[1].remaining.remaining(spec).unwrap() <= before);
            }
        }
    }

    #[test]
    fn test_deterministic_without_fallback() {
        let students = mixed_population();
        let capacities = caps(&[("A", 2), ("B", 2), ("C", 1)]);
        let engine = AllocationEngine::new(AllocationConfig::new());
        assert_eq!(
            engine.run(&students, &capacities).unwrap(),
            engine.run(&students, &capacities).unwrap()
        );
    }

    #[test]
    fn test_deterministic_with_seed() {
        let students = mixed_population();
        let capacities = caps(&[("A", 1), ("B", 1), ("C", 1), ("D", 5)]);
        let engine = with_fallback(99);
        assert_eq!(
            engine.run(&students, &capacities).unwrap(),
            engine.run(&students, &capacities).unwrap()
        );
    }

    #[test]
    fn test_unknown_specialisation_fails() {
        let students = vec![student(1, 9.0, &["A", "Z"])];
        let err = AllocationEngine::new(AllocationConfig::new())
            .run(&students, &caps(&[("A", 1)]))
            .unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::UnknownSpecialisation {
                student_id: 1,
                spec: "Z".into()
            }
        );
    }

    #[test]
    fn test_duplicate_ids_fail() {
        let students = vec![student(1, 9.0, &["A"]), student(1, 8.0, &["A"])];
        let err = AllocationEngine::new(AllocationConfig::new())
            .run(&students, &caps(&[("A", 1)]))
            .unwrap_err();
        assert_eq!(err.field(), "id");
    }

    #[test]
    fn test_max_prefs_limits_scan() {
        let students = vec![student(1, 9.0, &["A", "B"])];
        let run = AllocationEngine::new(AllocationConfig::new().with_max_prefs(1))
            .run(&students, &caps(&[("A", 0), ("B", 1)]))
            .unwrap();
        let last = run.final_snapshot().unwrap();
        assert!(last.results[0].is_unassigned());
        assert_eq!(last.current.preferences, vec!["A"]);
    }

    #[test]
    fn test_custom_priority_order() {
        let students = vec![student(9, 8.0, &["A"]), student(4, 8.0, &["A"])];
        let order = PriorityOrder::gpa_descending().with_final_tie_breaker(TieBreaker::ById);
        let engine = AllocationEngine::new(AllocationConfig::new()).with_priority_order(order);
        let run = engine.run(&students, &caps(&[("A", 1)])).unwrap();
        assert_eq!(run.final_snapshot().unwrap().results[0].student_id, 4);
    }

    #[test]
    fn test_empty_population() {
        let run = AllocationEngine::new(AllocationConfig::new())
            .run(&[], &caps(&[("A", 1)]))
            .unwrap();
        assert!(run.is_empty());
        assert!(run.final_snapshot().is_none());
    }

    #[test]
    fn test_input_capacities_untouched() {
        let students = vec![student(1, 9.0, &["A"])];
        let capacities = caps(&[("A", 1)]);
        let run = AllocationEngine::new(AllocationConfig::new())
            .run(&students, &capacities)
            .unwrap();
        assert_eq!(capacities.remaining("A"), Some(1));
        assert_eq!(run.initial_capacities(), &capacities);
    }
}
