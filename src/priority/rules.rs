//! Built-in priority rules.
//!
//! # Score Convention
//! All rules return lower scores for students processed earlier.

use super::{PriorityRule, RuleScore};
use crate::models::Student;

/// Highest GPA first.
#[derive(Debug, Clone, Copy)]
pub struct HighestGpa;

impl PriorityRule for HighestGpa {
    fn name(&self) -> &'static str {
        "GPA"
    }

    fn evaluate(&self, student: &Student) -> RuleScore {
        -student.gpa
    }

    fn description(&self) -> &'static str {
        "Highest GPA First"
    }
}

/// Lowest student ID first.
///
/// Useful as a secondary rule when IDs encode enrolment order.
#[derive(Debug, Clone, Copy)]
pub struct LowestId;

impl PriorityRule for LowestId {
    fn name(&self) -> &'static str {
        "ID"
    }

    fn evaluate(&self, student: &Student) -> RuleScore {
        student.id as f64
    }

    fn description(&self) -> &'static str {
        "Lowest ID First"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highest_gpa_scores() {
        let strong = Student::new(1, 9.0);
        let weak = Student::new(2, 4.5);
        assert!(HighestGpa.evaluate(&strong) < HighestGpa.evaluate(&weak));
    }

    #[test]
    fn test_lowest_id_scores() {
        let low = LowestId.evaluate(&Student::new(3, 0.0));
        let high = LowestId.evaluate(&Student::new(10, 0.0));
        assert!(low < high);
        assert_eq!(LowestId.description(), "Lowest ID First");
    }
}
