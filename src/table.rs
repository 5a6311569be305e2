//! Student table ingestion and result export.
//!
//! Hosts read a student table (`id, gpa, pref1..prefN`) with whatever
//! reader they like and hand the raw cells over as [`StudentRecord`]s.
//! Results go back out as flat [`ExportRow`]s.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::error::ConfigurationError;
use crate::models::{AllocationResult, Student};

/// One unparsed row of a student table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRecord {
    /// Raw `id` cell.
    pub id: String,
    /// Raw `gpa` cell.
    pub gpa: String,
    /// Raw `pref1..prefN` cells, blanks included.
    pub preferences: Vec<String>,
}

impl StudentRecord {
    /// Creates a record from raw cells.
    pub fn new<I, S>(id: impl Into<String>, gpa: impl Into<String>, preferences: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            gpa: gpa.into(),
            preferences: preferences.into_iter().map(Into::into).collect(),
        }
    }
}

/// A parsed, internally consistent student table.
///
/// Rows keep their input order; the allocation engine applies its own
/// ordering.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudentTable {
    students: Vec<Student>,
}

impl StudentTable {
    /// Parses raw records.
    ///
    /// Cells are trimmed. Blank preference cells are skipped, so ragged rows
    /// with fewer preferences are accepted.
    ///
    /// # Errors
    /// - [`ConfigurationError::MalformedCell`] for an id that is not a
    ///   non-negative integer or a GPA that is not a number. `row` is the
    ///   0-based record index.
    /// - [`ConfigurationError::NonFiniteGpa`] for `inf`/`NaN` GPAs.
    /// - [`ConfigurationError::DuplicateStudentId`] and
    ///   [`ConfigurationError::DuplicatePreference`].
    pub fn from_records(records: &[StudentRecord]) -> Result<Self, ConfigurationError> {
        let mut seen_ids = HashSet::with_capacity(records.len());
        let mut students = Vec::with_capacity(records.len());

        for (row, record) in records.iter().enumerate() {
            let id_cell = record.id.trim();
            let id: u64 = id_cell.parse().map_err(|_| ConfigurationError::MalformedCell {
                row,
                column: "id",
                value: id_cell.to_string(),
            })?;

            let gpa_cell = record.gpa.trim();
            let gpa: f64 = gpa_cell.parse().map_err(|_| ConfigurationError::MalformedCell {
                row,
                column: "gpa",
                value: gpa_cell.to_string(),
            })?;
            if !gpa.is_finite() {
                return Err(ConfigurationError::NonFiniteGpa { student_id: id, gpa });
            }

            if !seen_ids.insert(id) {
                return Err(ConfigurationError::DuplicateStudentId { student_id: id });
            }

            let mut listed = HashSet::new();
            let mut preferences = Vec::new();
            for cell in record.preferences.iter().map(|c| c.trim()).filter(|c| !c.is_empty()) {
                if !listed.insert(cell) {
                    return Err(ConfigurationError::DuplicatePreference {
                        student_id: id,
                        spec: cell.to_string(),
                    });
                }
                preferences.push(cell.to_string());
            }

            students.push(Student {
                id,
                gpa,
                preferences,
            });
        }

        Ok(Self { students })
    }

    /// Parsed students in input order.
    pub fn students(&self) -> &[Student] {
        &self.students
    }

    /// Consumes the table.
    pub fn into_students(self) -> Vec<Student> {
        self.students
    }

    /// Number of students.
    pub fn len(&self) -> usize {
        self.students.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }
}

/// One row of the exported allocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportRow {
    pub id: u64,
    /// `None` when the student is missing from the table passed to
    /// [`export_rows`].
    pub gpa: Option<f64>,
    /// Specialisation name or `"unassigned"`.
    pub assigned_spec: String,
    /// `"1"`..`"N"`, `"random"`, `"manual"` or `"none"`.
    pub rank_achieved: String,
}

/// Flattens results (from a snapshot or a final view) for export, in
/// result order.
pub fn export_rows(results: &[AllocationResult], students: &[Student]) -> Vec<ExportRow> {
    let gpa_by_id: HashMap<u64, f64> = students.iter().map(|s| (s.id, s.gpa)).collect();
    results
        .iter()
        .map(|r| ExportRow {
            id: r.student_id,
            gpa: gpa_by_id.get(&r.student_id).copied(),
            assigned_spec: r.spec_label().to_string(),
            rank_achieved: r.rank_achieved.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocation::{AllocationConfig, AllocationEngine};
    use crate::models::SpecialisationCapacities;

    fn records() -> Vec<StudentRecord> {
        vec![
            StudentRecord::new("1", "7.5", ["Software", "Mechanical", ""]),
            StudentRecord::new(" 2 ", "8.25 ", ["Mechanical", "", "Software"]),
            StudentRecord::new("3", "6", Vec::<String>::new()),
        ]
    }

    #[test]
    fn test_from_records() {
        let table = StudentTable::from_records(&records()).unwrap();
        assert_eq!(table.len(), 3);
        let s = &table.students()[1];
        assert_eq!(s.id, 2);
        assert!((s.gpa - 8.25).abs() < 1e-10);
        assert_eq!(s.preferences, vec!["Mechanical", "Software"]);
        assert!(table.students()[2].preferences.is_empty());
    }

    #[test]
    fn test_malformed_cells() {
        let bad_gpa = vec![StudentRecord::new("1", "abc", ["A"])];
        assert_eq!(
            StudentTable::from_records(&bad_gpa).unwrap_err(),
            ConfigurationError::MalformedCell {
                row: 0,
                column: "gpa",
                value: "abc".into()
            }
        );

        let bad_id = vec![
            StudentRecord::new("1", "5.0", ["A"]),
            StudentRecord::new("x7", "5.0", ["A"]),
        ];
        let err = StudentTable::from_records(&bad_id).unwrap_err();
        assert_eq!(err.field(), "id");
        assert!(matches!(err, ConfigurationError::MalformedCell { row: 1, .. }));
    }

    #[test]
    fn test_non_finite_gpa() {
        let rows = vec![StudentRecord::new("4", "inf", ["A"])];
        assert!(matches!(
            StudentTable::from_records(&rows),
            Err(ConfigurationError::NonFiniteGpa { student_id: 4, .. })
        ));
    }

    #[test]
    fn test_duplicates_rejected() {
        let dup_id = vec![
            StudentRecord::new("1", "5.0", ["A"]),
            StudentRecord::new("1", "6.0", ["B"]),
        ];
        assert_eq!(
            StudentTable::from_records(&dup_id).unwrap_err(),
            ConfigurationError::DuplicateStudentId { student_id: 1 }
        );

        let dup_pref = vec![StudentRecord::new("1", "5.0", ["A", " A"])];
        assert_eq!(
            StudentTable::from_records(&dup_pref).unwrap_err(),
            ConfigurationError::DuplicatePreference {
                student_id: 1,
                spec: "A".into()
            }
        );
    }

    #[test]
    fn test_export_rows() {
        let students = StudentTable::from_records(&records()).unwrap().into_students();
        let caps = SpecialisationCapacities::new()
            .with_seats("Mechanical", 1)
            .with_seats("Software", 1);
        let run = AllocationEngine::new(AllocationConfig::new())
            .run(&students, &caps)
            .unwrap();
        let rows = export_rows(&run.final_snapshot().unwrap().results, &students);

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].id, 2);
        assert_eq!(rows[0].assigned_spec, "Mechanical");
        assert_eq!(rows[0].rank_achieved, "1");
        assert_eq!(rows[1].assigned_spec, "Software");
        assert_eq!(rows[2].assigned_spec, "unassigned");
        assert_eq!(rows[2].rank_achieved, "none");
        assert_eq!(rows[2].gpa, Some(6.0));
    }

    #[test]
    fn test_export_serializes() {
        let rows = export_rows(&[AllocationResult::random(9, "C")], &[]);
        let json = serde_json::to_string(&rows[0]).unwrap();
        assert_eq!(
            json,
            r#"{"id":9,"gpa":null,"assigned_spec":"C","rank_achieved":"random"}"#
        );
    }
}
