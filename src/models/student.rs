//! Student model.
//!
//! A student is the unit being allocated: an ID, a GPA that determines
//! processing priority, and a ranked list of preferred specialisations.

use serde::{Deserialize, Serialize};

/// A student to be allocated.
///
/// The engine only ever borrows students; allocation outcomes are recorded
/// alongside them in [`AllocationResult`](super::AllocationResult), never
/// written back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    /// Unique student identifier.
    pub id: u64,
    /// Grade point average (higher = processed earlier).
    pub gpa: f64,
    /// Specialisations in preference order (index 0 = first choice).
    pub preferences: Vec<String>,
}

impl Student {
    /// Creates a student with no preferences.
    pub fn new(id: u64, gpa: f64) -> Self {
        Self {
            id,
            gpa,
            preferences: Vec::new(),
        }
    }

    /// Appends a preference at the next rank.
    pub fn with_preference(mut self, spec: impl Into<String>) -> Self {
        self.preferences.push(spec.into());
        self
    }

    /// Replaces the whole preference list.
    pub fn with_preferences<I, S>(mut self, specs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.preferences = specs.into_iter().map(Into::into).collect();
        self
    }

    /// 1-based rank of `spec` in this student's list, if listed.
    pub fn rank_of(&self, spec: &str) -> Option<usize> {
        self.preferences
            .iter()
            .position(|p| p == spec)
            .map(|i| i + 1)
    }

    /// Specialisation at a 1-based rank.
    pub fn preference_at(&self, rank: usize) -> Option<&str> {
        rank.checked_sub(1)
            .and_then(|i| self.preferences.get(i))
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_student_builder() {
        let s = Student::new(1, 8.5)
            .with_preference("Software")
            .with_preference("Mechanical");

        assert_eq!(s.id, 1);
        assert!((s.gpa - 8.5).abs() < 1e-10);
        assert_eq!(s.preferences, vec!["Software", "Mechanical"]);
    }

    #[test]
    fn test_rank_lookup() {
        let s = Student::new(2, 7.0).with_preferences(["A", "B", "C"]);
        assert_eq!(s.rank_of("A"), Some(1));
        assert_eq!(s.rank_of("C"), Some(3));
        assert_eq!(s.rank_of("Z"), None);
        assert_eq!(s.preference_at(2), Some("B"));
        assert_eq!(s.preference_at(0), None);
        assert_eq!(s.preference_at(4), None);
    }
}
