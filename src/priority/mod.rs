//! Priority rules and ordering for allocation.
//!
//! Determines the order in which students are offered seats. The default
//! order is GPA descending with ties kept in input order.
//!
//! # Usage
//!
//! ```
//! use u_allocation::priority::{PriorityOrder, TieBreaker};
//! use u_allocation::priority::rules;
//!
//! let order = PriorityOrder::new()
//!     .with_rule(rules::HighestGpa)
//!     .with_final_tie_breaker(TieBreaker::InputOrder);
//! ```

mod order;
pub mod rules;

pub use order::{PriorityOrder, TieBreaker};

use crate::models::Student;
use std::fmt::Debug;

/// Score returned by a priority rule.
///
/// Lower scores = higher priority (processed first).
pub type RuleScore = f64;

/// A rule that ranks students for processing.
///
/// # Score Convention
/// **Lower score = higher priority.** Rules return smaller values for
/// students that should be offered seats first.
pub trait PriorityRule: Send + Sync + Debug {
    /// Rule name (e.g., "GPA").
    fn name(&self) -> &'static str;

    /// Evaluates a student's priority. Lower = earlier.
    fn evaluate(&self, student: &Student) -> RuleScore;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}
