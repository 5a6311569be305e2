//! Allocation domain models.
//!
//! Provides the data types shared by the allocation engine and the
//! population generator.
//!
//! # Domain Mappings
//!
//! | u-allocation | Engineering school | Hospital residency | Housing ballot |
//! |--------------|--------------------|--------------------|----------------|
//! | Student | Part II student | Applicant | Tenant |
//! | Specialisation | Programme | Rotation | Building |
//! | Capacity | Seats | Positions | Units |
//! | Snapshot | Allocation round state | Match state | Ballot state |

mod capacity;
mod snapshot;
mod student;

pub use capacity::SpecialisationCapacities;
pub use snapshot::{AllocationResult, RankAchieved, Snapshot, StepRecord};
pub use student::Student;
