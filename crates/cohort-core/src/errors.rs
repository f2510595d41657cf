//! Cross-cutting error types for the cohort crates.
//!
//! Storage errors (`DatabaseError`) live in `cohort-db`; configuration errors
//! in `cohort-config`. Everything here can be raised without touching storage.

use thiserror::Error;

/// Errors that can be raised by any cohort crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// Caller input failed validation (date format, status domain, ranges).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CoreError {
    /// Shorthand for building a [`CoreError::Validation`].
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}
