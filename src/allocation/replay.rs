//! Step navigation over recorded snapshots.

use crate::models::Snapshot;

/// A cursor over a run's snapshots.
///
/// Navigation is plain indexing into the recorded sequence; nothing is
/// recomputed. Moves past either end clamp to the bound.
///
/// # Example
///
/// ```
/// use u_allocation::allocation::{AllocationConfig, AllocationEngine};
/// use u_allocation::models::{SpecialisationCapacities, Student};
///
/// let students: Vec<Student> = (1..=3)
///     .map(|id| Student::new(id, id as f64).with_preference("A"))
///     .collect();
/// let capacities = SpecialisationCapacities::new().with_seats("A", 2);
/// let run = AllocationEngine::default().run(&students, &capacities).unwrap();
///
/// let mut replay = run.replay();
/// assert_eq!(replay.current().unwrap().step, 1);
/// replay.to_end();
/// assert_eq!(replay.current().unwrap().step, 3);
/// replay.step_back();
/// assert_eq!(replay.position(), 1);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Replay<'a> {
    snapshots: &'a [Snapshot],
    position: usize,
}

impl<'a> Replay<'a> {
    /// Creates a cursor at the first snapshot.
    pub fn new(snapshots: &'a [Snapshot]) -> Self {
        Self {
            snapshots,
            position: 0,
        }
    }

    /// Snapshot under the cursor (`None` for an empty run).
    pub fn current(&self) -> Option<&'a Snapshot> {
        self.snapshots.get(self.position)
    }

    /// 0-based cursor index.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Whether there is nothing to replay.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Advances one step.
    pub fn step_forward(&mut self) -> Option<&'a Snapshot> {
        if !self.is_at_end() {
            self.position += 1;
        }
        self.current()
    }

    /// Goes back one step.
    pub fn step_back(&mut self) -> Option<&'a Snapshot> {
        self.position = self.position.saturating_sub(1);
        self.current()
    }

    /// Jumps to a 0-based index, clamped to the last step.
    pub fn jump_to(&mut self, index: usize) -> Option<&'a Snapshot> {
        self.position = index.min(self.last_index());
        self.current()
    }

    /// Returns to the first step.
    pub fn to_start(&mut self) -> Option<&'a Snapshot> {
        self.position = 0;
        self.current()
    }

    /// Skips to the final step.
    pub fn to_end(&mut self) -> Option<&'a Snapshot> {
        self.position = self.last_index();
        self.current()
    }

    /// Whether the cursor is on the first step.
    pub fn is_at_start(&self) -> bool {
        self.position == 0
    }

    /// Whether the cursor is on the final step.
    pub fn is_at_end(&self) -> bool {
        self.position >= self.last_index()
    }

    fn last_index(&self) -> usize {
        self.snapshots.len().saturating_sub(1)
    }
}
