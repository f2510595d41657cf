use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::dates::parse_iso_day;
use crate::enums::AttendanceStatus;
use crate::errors::CoreError;

/// Composite identity of an attendance record.
///
/// At most one record may exist per key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceKey {
    pub promotion_id: String,
    pub student_id: String,
    pub date: NaiveDate,
}

impl AttendanceKey {
    /// Validate raw caller input into a key.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for blank ids or a malformed day.
    pub fn parse(promotion_id: &str, student_id: &str, date: &str) -> Result<Self, CoreError> {
        if promotion_id.trim().is_empty() {
            return Err(CoreError::validation("promotion id must not be empty"));
        }
        if student_id.trim().is_empty() {
            return Err(CoreError::validation("student id must not be empty"));
        }
        Ok(Self {
            promotion_id: promotion_id.to_string(),
            student_id: student_id.to_string(),
            date: parse_iso_day(date)?,
        })
    }
}

/// One student's attendance on one day.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub id: String,
    pub promotion_id: String,
    pub student_id: String,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AttendanceRecord {
    #[must_use]
    pub fn key(&self) -> AttendanceKey {
        AttendanceKey {
            promotion_id: self.promotion_id.clone(),
            student_id: self.student_id.clone(),
            date: self.date,
        }
    }
}

/// One line of a day's roll call.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RollCallEntry {
    pub student_id: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub note: Option<String>,
}

impl RollCallEntry {
    #[must_use]
    pub fn new(student_id: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            student_id: student_id.into(),
            status: status.into(),
            note: None,
        }
    }

    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}
