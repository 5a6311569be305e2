//! Configuration errors.
//!
//! Every failure this crate reports is a setup problem detected before any
//! allocation or sampling takes place. Running out of seats is *not* an
//! error; it is recorded as an unassigned [`AllocationResult`].
//!
//! [`AllocationResult`]: crate::models::AllocationResult

use thiserror::Error;

/// Invalid or inconsistent setup for an allocation run or a generator call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    /// A preference references a specialisation that has no capacity entry.
    #[error("student {student_id} prefers unknown specialisation '{spec}'")]
    UnknownSpecialisation { student_id: u64, spec: String },

    /// A capacity was configured below zero.
    #[error("specialisation '{spec}' has negative capacity {seats}")]
    NegativeCapacity { spec: String, seats: i64 },

    /// A capacity exceeds the largest representable seat count.
    #[error("specialisation '{spec}' capacity {seats} exceeds the maximum of {max}")]
    CapacityOverflow { spec: String, seats: i64, max: u32 },

    /// The same specialisation name was configured twice.
    #[error("specialisation '{spec}' is listed more than once")]
    DuplicateSpecialisation { spec: String },

    /// Two students share an ID.
    #[error("duplicate student ID {student_id}")]
    DuplicateStudentId { student_id: u64 },

    /// A preference list names the same specialisation twice.
    #[error("student {student_id} lists '{spec}' more than once")]
    DuplicatePreference { student_id: u64, spec: String },

    /// A GPA is NaN or infinite.
    #[error("student {student_id} has non-finite GPA {gpa}")]
    NonFiniteGpa { student_id: u64, gpa: f64 },

    /// A post-run adjustment names a student the table does not contain.
    #[error("student {student_id} is not part of this allocation")]
    UnknownStudent { student_id: u64 },

    /// A manual move targets a specialisation with no free seat.
    #[error("specialisation '{spec}' has no free seat")]
    NoSeatAvailable { spec: String },

    /// A raw table cell could not be parsed.
    #[error("row {row}: column '{column}' has unparseable value '{value}'")]
    MalformedCell {
        row: usize,
        column: &'static str,
        value: String,
    },

    /// More preferences requested than specialisations exist.
    #[error("n_prefs = {requested} exceeds the {available} available specialisations")]
    TooManyPreferences { requested: usize, available: usize },

    /// Zero preferences requested.
    #[error("n_prefs must be at least 1")]
    NoPreferences,

    /// No specialisations were supplied to the generator.
    #[error("specialisation list is empty")]
    NoSpecialisations,

    /// Sampling without replacement asked for more values than grid points.
    #[error("cannot draw {requested} distinct GPAs from a grid of {grid_size} points")]
    GridExhausted { requested: usize, grid_size: usize },

    /// The GPA grid has no points.
    #[error("grid_size must be at least 1")]
    EmptyGrid,

    /// `gpa_min`/`gpa_max` are non-finite or reversed.
    #[error("invalid GPA range [{min}, {max}]")]
    InvalidGpaRange { min: f64, max: f64 },

    /// The Gaussian mean is non-finite.
    #[error("GPA mean {0} is not finite")]
    InvalidMean(f64),

    /// The Gaussian spread is not a positive finite number.
    #[error("GPA standard deviation {0} must be positive and finite")]
    InvalidStdDev(f64),
}

impl ConfigurationError {
    /// Name of the configuration field or input column at fault.
    pub fn field(&self) -> &'static str {
        use ConfigurationError::*;
        match self {
            UnknownSpecialisation { .. } | DuplicatePreference { .. } => "preferences",
            NegativeCapacity { .. } | CapacityOverflow { .. } => "capacities",
            DuplicateSpecialisation { .. } | NoSpecialisations => "specs",
            DuplicateStudentId { .. } | UnknownStudent { .. } => "id",
            NoSeatAvailable { .. } => "capacities",
            NonFiniteGpa { .. } => "gpa",
            MalformedCell { column, .. } => *column,
            TooManyPreferences { .. } | NoPreferences => "n_prefs",
            GridExhausted { .. } => "n_students",
            EmptyGrid => "grid_size",
            InvalidGpaRange { .. } => "gpa_min/gpa_max",
            InvalidMean(_) => "gpa_mean",
            InvalidStdDev(_) => "gpa_std_dev",
        }
    }
}
