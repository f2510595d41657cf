//! Conflict retry policy for the attendance write path.
//!
//! The storage layer is the only arbiter of the (promotion, student, day)
//! uniqueness constraint. When a plain insert loses a race against another
//! writer, the engine retries the write as an update, backing off between
//! attempts so the competing transaction can settle.

use std::time::Duration;

use cohort_config::AttendanceConfig;

/// Configuration for retry behavior on uniqueness collisions.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of attempts (including the initial one).
    pub max_attempts: u32,
    /// Initial delay before the first retry.
    pub base_delay: Duration,
    /// Maximum delay between retries (backoff is capped here).
    pub max_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self::from(&AttendanceConfig::default())
    }
}

impl From<&AttendanceConfig> for RetryConfig {
    fn from(config: &AttendanceConfig) -> Self {
        Self {
            max_attempts: config.conflict_retry_attempts.max(1),
            base_delay: Duration::from_millis(config.retry_base_delay_ms),
            max_delay: Duration::from_millis(config.retry_max_delay_ms),
        }
    }
}

impl RetryConfig {
    /// Delay to wait after failed attempt number `attempt` (1-based).
    #[must_use]
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }
}

/// Detect a UNIQUE constraint violation reported by SQLite.
///
/// The predicate is intentionally narrow: CHECK and NOT NULL failures are
/// caller bugs and must not be retried.
pub fn is_unique_violation(e: &libsql::Error) -> bool {
    e.to_string().contains("UNIQUE constraint failed")
}
