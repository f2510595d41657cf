//! Response types returned by library operations and printed by `cohortctl`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{AttendanceRecord, Promotion};
use crate::timeline::Timeline;

/// A student document the backfill could not repair.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BackfillFailure {
    pub student_id: String,
    pub reason: String,
}

/// Summary of one tracking backfill pass.
///
/// `scanned == already_complete + migrated + failed` unless the pass was
/// cancelled part-way, in which case the counts cover the documents visited.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BackfillReport {
    pub scanned: u32,
    pub already_complete: u32,
    pub migrated: u32,
    pub failed: u32,
    pub failures: Vec<BackfillFailure>,
    pub dry_run: bool,
    pub cancelled: bool,
}

impl BackfillReport {
    /// Whether any document failed (the pass's partial-failure outcome).
    #[must_use]
    pub const fn has_failures(&self) -> bool {
        self.failed > 0
    }

    pub fn record_failure(&mut self, student_id: impl Into<String>, reason: impl Into<String>) {
        self.failed += 1;
        self.failures.push(BackfillFailure {
            student_id: student_id.into(),
            reason: reason.into(),
        });
    }
}

/// Response from `cohortctl promotion timeline`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PromotionTimelineResponse {
    pub promotion: Promotion,
    pub timeline: Timeline,
}

/// Response from `cohortctl attendance roll-call`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RollCallResponse {
    pub recorded: u32,
    pub records: Vec<AttendanceRecord>,
}

/// Response from `cohortctl attendance delete`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResponse {
    pub deleted: bool,
}
