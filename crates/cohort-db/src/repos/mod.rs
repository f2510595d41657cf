//! Repository modules implementing storage operations for cohort entities.
//!
//! Each module adds methods to `CohortService` via `impl CohortService` blocks.

pub mod attendance;
pub mod promotion;
pub mod student;
