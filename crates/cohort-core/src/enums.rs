//! Closed enumerations used by cohort documents and attendance records.
//!
//! All enums use `snake_case` serialization. `AttendanceStatus` additionally
//! accepts the capitalized spellings the dashboard sends (`"Present"`), and
//! maps the empty string to [`AttendanceStatus::Unset`].

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// AttendanceStatus
// ---------------------------------------------------------------------------

/// Status of one student on one day.
///
/// `Unset` (stored as `""`) is a real state: the day has been opened for the
/// student but nobody has marked it yet. It is not the same as `Absent`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    #[serde(alias = "Present")]
    Present,
    #[serde(alias = "Absent")]
    Absent,
    #[serde(alias = "Late")]
    Late,
    #[serde(alias = "Excused")]
    Excused,
    #[default]
    #[serde(rename = "")]
    Unset,
}

impl AttendanceStatus {
    pub const ALL: [Self; 5] = [
        Self::Present,
        Self::Absent,
        Self::Late,
        Self::Excused,
        Self::Unset,
    ];

    /// Return the string representation used in SQL storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Present => "present",
            Self::Absent => "absent",
            Self::Late => "late",
            Self::Excused => "excused",
            Self::Unset => "",
        }
    }
}

impl FromStr for AttendanceStatus {
    type Err = CoreError;

    /// Case-insensitive parse. Surrounding whitespace is not trimmed: `" "` is
    /// out of domain, `""` is `Unset`.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(raw))
            .ok_or_else(|| {
                CoreError::validation(format!(
                    "invalid attendance status '{raw}' (expected one of present, absent, late, excused or empty)"
                ))
            })
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// AdministrativeSituation
// ---------------------------------------------------------------------------

/// Administrative standing of a student within the program.
///
/// `Pending` is the value written by the backfill for documents that predate
/// the field.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum AdministrativeSituation {
    #[default]
    Pending,
    Regular,
    InProcess,
    Irregular,
}

impl AdministrativeSituation {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Regular => "regular",
            Self::InProcess => "in_process",
            Self::Irregular => "irregular",
        }
    }
}

impl fmt::Display for AdministrativeSituation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// RowKind
// ---------------------------------------------------------------------------

/// Kind of a row in the rendered timeline grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RowKind {
    Module,
    Courses,
    Projects,
}

impl RowKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Module => "module",
            Self::Courses => "courses",
            Self::Projects => "projects",
        }
    }
}

impl fmt::Display for RowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
