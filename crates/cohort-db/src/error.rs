//! Database error types for cohort-db.

use chrono::NaiveDate;
use cohort_core::errors::CoreError;
use thiserror::Error;

/// Errors from storage and engine operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A SQL query failed.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// Invalid state encountered (e.g., bad data in DB).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Caller input was rejected before touching storage.
    #[error("Validation error: {0}")]
    Validation(String),

    /// An explicitly requested entity does not exist.
    #[error("Not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// An attendance write collided with a concurrent writer and the
    /// surviving row could not be identified within the retry budget.
    #[error("Attendance conflict for {promotion_id}/{student_id} on {date}; retry the write")]
    Conflict {
        promotion_id: String,
        student_id: String,
        date: NaiveDate,
    },

    /// A student document kept changing under a read-modify-write cycle.
    #[error("Student document {id} was modified concurrently; retry the write")]
    StaleRevision { id: String },

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DatabaseError {
    pub fn not_found(entity_type: &str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: entity_type.to_string(),
            id: id.into(),
        }
    }

    /// Whether the caller may retry the same request unchanged.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Conflict { .. } | Self::StaleRevision { .. })
    }

    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<CoreError> for DatabaseError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::Validation(message) => Self::Validation(message),
            CoreError::NotFound { entity_type, id } => Self::NotFound { entity_type, id },
            CoreError::Other(other) => Self::Other(other),
        }
    }
}

impl From<serde_json::Error> for DatabaseError {
    fn from(error: serde_json::Error) -> Self {
        Self::Other(error.into())
    }
}
