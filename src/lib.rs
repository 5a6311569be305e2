//! Capacity-constrained student allocation.
//!
//! Assigns students to specialisations with limited seats, processing them
//! in GPA order and recording a snapshot after every decision so the run can
//! be replayed step by step.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Student`, `SpecialisationCapacities`,
//!   `AllocationResult`, `Snapshot`
//! - **`priority`**: Processing order rules (`HighestGpa`, `LowestId`)
//! - **`allocation`**: Greedy engine, replay cursor, post-run repair, KPIs
//! - **`generator`**: Synthetic populations (discretised Gaussian GPAs,
//!   weighted preference lists)
//! - **`table`**: Raw student table ingestion and result export
//! - **`validation`**: Input integrity checks (duplicate IDs, unknown
//!   specialisations, non-finite GPAs)
//! - **`error`**: `ConfigurationError`
//!
//! # Quick start
//!
//! ```
//! use u_allocation::allocation::{AllocationConfig, AllocationEngine};
//! use u_allocation::generator::{GeneratorConfig, PopulationGenerator};
//! use u_allocation::models::SpecialisationCapacities;
//!
//! let students = PopulationGenerator::new(GeneratorConfig::new().with_seed(1))
//!     .generate()
//!     .unwrap();
//! let capacities = SpecialisationCapacities::engineering_defaults();
//!
//! let run = AllocationEngine::new(AllocationConfig::new())
//!     .run(&students, &capacities)
//!     .unwrap();
//! assert_eq!(run.len(), 1000);
//! ```
//!
//! # Logging
//!
//! The crate emits `tracing` events and spans but never installs a
//! subscriber.
//!
//! # References
//!
//! - Roth & Sotomayor (1990), "Two-Sided Matching"
//! - Abdulkadiroğlu & Sönmez (2003), "School Choice: A Mechanism Design Approach"

pub mod allocation;
pub mod error;
pub mod generator;
pub mod models;
pub mod priority;
pub mod table;
pub mod validation;

pub use error::ConfigurationError;
