//! Allocation quality metrics.
//!
//! Summarises a set of allocation results against the student table.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Assigned / Unassigned | Students with / without a seat |
//! | Random | Seats given by random fallback |
//! | Rank counts | Students per achieved preference rank |
//! | First-choice rate | Fraction of all students placed in their first choice |
//! | Mean rank | Average achieved rank over preference placements |
//! | Cutoffs | Lowest / highest GPA admitted per specialisation |

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::models::{AllocationResult, RankAchieved, Student};

/// GPA band admitted to one specialisation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecCutoff {
    /// Specialisation name.
    pub spec: String,
    /// Lowest GPA among admitted students (the effective cutoff).
    pub lowest_gpa: f64,
    /// Highest GPA among admitted students.
    pub highest_gpa: f64,
    /// Number of admitted students.
    pub count: usize,
}

/// Allocation performance indicators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationKpi {
    /// Number of results summarised.
    pub student_count: usize,
    /// Students holding a seat.
    pub assigned_count: usize,
    /// Students without a seat.
    pub unassigned_count: usize,
    /// Seats given by random fallback.
    pub random_count: usize,
    /// Seats given by manual adjustment outside preferences.
    pub manual_count: usize,
    /// Achieved preference rank → number of students.
    pub rank_counts: BTreeMap<usize, usize>,
    /// Fraction of all students placed in their first choice (0.0..1.0).
    pub first_choice_rate: f64,
    /// Mean achieved rank over preference placements (0.0 when none).
    pub mean_rank: f64,
    /// Per-specialisation cutoffs, in name order.
    pub cutoffs: Vec<SpecCutoff>,
}

impl AllocationKpi {
    /// Computes KPIs from results and the student table.
    ///
    /// # Arguments
    /// * `results` - Results from a snapshot or a [`FinalView`](super::FinalView).
    /// * `students` - The student table (for GPAs). Results without a
    ///   matching student are counted but excluded from cutoffs.
    pub fn calculate(results: &[AllocationResult], students: &[Student]) -> Self {
        let gpa_by_id: HashMap<u64, f64> = students.iter().map(|s| (s.id, s.gpa)).collect();

        let mut unassigned_count = 0;
        let mut random_count = 0;
        let mut manual_count = 0;
        let mut rank_counts: BTreeMap<usize, usize> = BTreeMap::new();
        let mut bands: BTreeMap<&str, (f64, f64, usize)> = BTreeMap::new();

        for result in results {
            match result.rank_achieved {
                RankAchieved::Preference(rank) => *rank_counts.entry(rank).or_insert(0) += 1,
                RankAchieved::Random => random_count += 1,
                RankAchieved::Manual => manual_count += 1,
                RankAchieved::None => {}
            }

            let Some(spec) = result.assigned_spec.as_deref() else {
                unassigned_count += 1;
                continue;
            };
            if let Some(&gpa) = gpa_by_id.get(&result.student_id) {
                let band = bands.entry(spec).or_insert((gpa, gpa, 0));
                band.0 = band.0.min(gpa);
                band.1 = band.1.max(gpa);
                band.2 += 1;
            }
        }

        let preference_placements: usize = rank_counts.values().sum();
        let rank_total: usize = rank_counts.iter().map(|(rank, n)| rank * n).sum();
        let first_choices = rank_counts.get(&1).copied().unwrap_or(0);

        let first_choice_rate = if results.is_empty() {
            0.0
        } else {
            first_choices as f64 / results.len() as f64
        };
        let mean_rank = if preference_placements == 0 {
            0.0
        } else {
            rank_total as f64 / preference_placements as f64
        };

        let cutoffs = bands
            .into_iter()
            .map(|(spec, (lowest_gpa, highest_gpa, count))| SpecCutoff {
                spec: spec.to_string(),
                lowest_gpa,
                highest_gpa,
                count,
            })
            .collect();

        Self {
            student_count: results.len(),
            assigned_count: results.len() - unassigned_count,
            unassigned_count,
            random_count,
            manual_count,
            rank_counts,
            first_choice_rate,
            mean_rank,
            cutoffs,
        }
    }

    /// Cutoff for one specialisation.
    pub fn cutoff(&self, spec: &str) -> Option<&SpecCutoff> {
        self.cutoffs.iter().find(|c| c.spec == spec)
    }

    /// Whether the allocation meets the given quality thresholds.
    pub fn meets_thresholds(&self, max_unassigned: usize, min_first_choice_rate: f64) -> bool {
        self.unassigned_count <= max_unassigned && self.first_choice_rate >= min_first_choice_rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn students() -> Vec<Student> {
        vec![
            Student::new(1, 9.0).with_preferences(["A", "B"]),
            Student::new(2, 8.0).with_preferences(["A", "B"]),
            Student::new(3, 7.5).with_preferences(["A", "B"]),
            Student::new(4, 6.0).with_preferences(["B", "A"]),
            Student::new(5, 5.0).with_preferences(["A", "B"]),
        ]
    }

    fn results() -> Vec<AllocationResult> {
        vec![
            AllocationResult::preferred(1, "A", 1),
            AllocationResult::preferred(2, "A", 1),
            AllocationResult::preferred(3, "B", 2),
            AllocationResult::random(4, "C"),
            AllocationResult::unassigned(5),
        ]
    }

    #[test]
    fn test_kpi_counts() {
        let kpi = AllocationKpi::calculate(&results(), &students());
        assert_eq!(kpi.student_count, 5);
        assert_eq!(kpi.assigned_count, 4);
        assert_eq!(kpi.unassigned_count, 1);
        assert_eq!(kpi.random_count, 1);
        assert_eq!(kpi.manual_count, 0);
        assert_eq!(kpi.rank_counts.get(&1), Some(&2));
        assert_eq!(kpi.rank_counts.get(&2), Some(&1));
        assert!((kpi.first_choice_rate - 0.4).abs() < 1e-10);
        // (1 + 1 + 2) / 3
        assert!((kpi.mean_rank - 4.0 / 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_kpi_cutoffs() {
        let kpi = AllocationKpi::calculate(&results(), &students());
        let specs: Vec<&str> = kpi.cutoffs.iter().map(|c| c.spec.as_str()).collect();
        assert_eq!(specs, vec!["A", "B", "C"]);

        let a = kpi.cutoff("A").unwrap();
        assert!((a.lowest_gpa - 8.0).abs() < 1e-10);
        assert!((a.highest_gpa - 9.0).abs() < 1e-10);
        assert_eq!(a.count, 2);
        assert!(kpi.cutoff("D").is_none());
    }

    #[test]
    fn test_kpi_empty() {
        let kpi = AllocationKpi::calculate(&[], &[]);
        assert_eq!(kpi.student_count, 0);
        assert!((kpi.first_choice_rate - 0.0).abs() < 1e-10);
        assert!((kpi.mean_rank - 0.0).abs() < 1e-10);
        assert!(kpi.cutoffs.is_empty());
    }

    #[test]
    fn test_meets_thresholds() {
        let kpi = AllocationKpi::calculate(&results(), &students());
        assert!(kpi.meets_thresholds(1, 0.4));
        assert!(!kpi.meets_thresholds(0, 0.0));
        assert!(!kpi.meets_thresholds(5, 0.5));
    }
}
