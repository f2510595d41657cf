//! # cohort-core
//!
//! Core types for training-program ("promotion") management.
//!
//! This crate holds everything that does not need storage:
//! - Entity structs (promotions, modules, attendance records, student documents)
//! - Closed enums (attendance status, administrative situation)
//! - Strict calendar-day parsing for attendance identities
//! - The week-by-week timeline scheduler
//! - Guaranteed-field defaults used by the student document backfill
//! - Response types shared with the CLI

pub mod dates;
pub mod documents;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;
pub mod responses;
pub mod timeline;
