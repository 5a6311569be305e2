//! Sequential rule composition with an explicit final tie-break.

use std::cmp::Ordering;
use std::sync::Arc;

use super::PriorityRule;
use crate::models::Student;

/// How ties are broken after all rules are exhausted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TieBreaker {
    /// Keep the relative input order (stable sort).
    #[default]
    InputOrder,
    /// Lower student ID first.
    ById,
}

/// An ordered chain of priority rules.
///
/// Rules are applied in sequence: the next rule is consulted only when the
/// previous one scores two students equally. Remaining ties go to the
/// configured [`TieBreaker`].
///
/// # Example
/// ```
/// use u_allocation::models::Student;
/// use u_allocation::priority::PriorityOrder;
///
/// let students = vec![
///     Student::new(1, 7.0),
///     Student::new(2, 9.0),
///     Student::new(3, 7.0),
/// ];
/// let order = PriorityOrder::gpa_descending().sort_indices(&students);
/// assert_eq!(order, vec![1, 0, 2]);
/// ```
#[derive(Clone, Default)]
pub struct PriorityOrder {
    rules: Vec<Arc<dyn PriorityRule>>,
    tie_breaker: TieBreaker,
}

impl PriorityOrder {
    /// Creates an order with no rules (input order).
    pub fn new() -> Self {
        Self::default()
    }

    /// GPA descending, ties in input order.
    pub fn gpa_descending() -> Self {
        Self::new().with_rule(super::rules::HighestGpa)
    }

    /// Appends a rule to the chain.
    pub fn with_rule<R: PriorityRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Sets the final tie-breaking strategy.
    pub fn with_final_tie_breaker(mut self, tie_breaker: TieBreaker) -> Self {
        self.tie_breaker = tie_breaker;
        self
    }

    /// The final tie-breaking strategy.
    pub fn tie_breaker(&self) -> TieBreaker {
        self.tie_breaker
    }

    /// Sorts students by priority (highest priority first).
    ///
    /// Returns indices into the original slice. The sort is stable, so
    /// [`TieBreaker::InputOrder`] keeps equal students where they were.
    pub fn sort_indices(&self, students: &[Student]) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..students.len()).collect();
        indices.sort_by(|&a, &b| self.compare(&students[a], &students[b]));
        indices
    }

    fn compare(&self, a: &Student, b: &Student) -> Ordering {
        for rule in &self.rules {
            let score_a = rule.evaluate(a);
            let score_b = rule.evaluate(b);
            match score_a.partial_cmp(&score_b) {
                Some(Ordering::Equal) | None => continue,
                Some(ord) => return ord,
            }
        }

        match self.tie_breaker {
            TieBreaker::InputOrder => Ordering::Equal,
            TieBreaker::ById => a.id.cmp(&b.id),
        }
    }
}

impl std::fmt::Debug for PriorityOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PriorityOrder")
            .field(
                "rules",
                &self.rules.iter().map(|r| r.name()).collect::<Vec<_>>(),
            )
            .field("tie_breaker", &self.tie_breaker)
            .finish()
    }
}
