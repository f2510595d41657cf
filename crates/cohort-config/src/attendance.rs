//! Attendance write-path tuning.

use serde::{Deserialize, Serialize};

const fn default_conflict_retry_attempts() -> u32 {
    4
}

const fn default_retry_base_delay_ms() -> u64 {
    20
}

const fn default_retry_max_delay_ms() -> u64 {
    500
}

/// Retry policy applied when a roll-call insert collides with a concurrent
/// writer on the same (promotion, student, day).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AttendanceConfig {
    /// Maximum attempts per entry, including the first one.
    #[serde(default = "default_conflict_retry_attempts")]
    pub conflict_retry_attempts: u32,

    /// Delay before the first retry, in milliseconds. Doubles on each retry.
    #[serde(default = "default_retry_base_delay_ms")]
    pub retry_base_delay_ms: u64,

    /// Upper bound for the backoff delay, in milliseconds.
    #[serde(default = "default_retry_max_delay_ms")]
    pub retry_max_delay_ms: u64,
}

impl Default for AttendanceConfig {
    fn default() -> Self {
        Self {
            conflict_retry_attempts: default_conflict_retry_attempts(),
            retry_base_delay_ms: default_retry_base_delay_ms(),
            retry_max_delay_ms: default_retry_max_delay_ms(),
        }
    }
}
