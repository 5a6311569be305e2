//! Input validation for allocation runs.
//!
//! Checks structural integrity of a student table against a capacity map
//! before allocating. Detects:
//! - Duplicate student IDs
//! - Non-finite GPAs
//! - Repeated specialisations within one preference list
//! - Preferences naming specialisations absent from the capacity map

use std::collections::HashSet;

use crate::error::ConfigurationError;
use crate::models::{SpecialisationCapacities, Student};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ConfigurationError>>;

/// Validates a student table against a capacity map.
///
/// Checks:
/// 1. No duplicate student IDs
/// 2. Every GPA is a finite number
/// 3. No preference list repeats a specialisation
/// 4. Every preference names a configured specialisation
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues in
/// input order.
pub fn validate_input(
    students: &[Student],
    capacities: &SpecialisationCapacities,
) -> ValidationResult {
    let mut errors = Vec::new();
    let mut ids = HashSet::new();

    for student in students {
        if !ids.insert(student.id) {
            errors.push(ConfigurationError::DuplicateStudentId {
                student_id: student.id,
            });
        }

        if !student.gpa.is_finite() {
            errors.push(ConfigurationError::NonFiniteGpa {
                student_id: student.id,
                gpa: student.gpa,
            });
        }

        let mut seen = HashSet::new();
        for spec in &student.preferences {
            if !seen.insert(spec.as_str()) {
                errors.push(ConfigurationError::DuplicatePreference {
                    student_id: student.id,
                    spec: spec.clone(),
                });
            }
            if !capacities.contains(spec) {
                errors.push(ConfigurationError::UnknownSpecialisation {
                    student_id: student.id,
                    spec: spec.clone(),
                });
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
