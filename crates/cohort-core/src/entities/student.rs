use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::AdministrativeSituation;

/// A dated note left by a teacher on a student's technical progress.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TeacherNote {
    pub note: String,
    #[serde(default)]
    pub author: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Membership of a student in a project team.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TeamAssignment {
    pub team_name: String,
    #[serde(default)]
    pub project_name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

/// Technical progress: notes, teams and the sets of completed units.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TechnicalTracking {
    #[serde(default)]
    pub teacher_notes: Vec<TeacherNote>,
    #[serde(default)]
    pub teams: Vec<TeamAssignment>,
    /// Completed micro-lessons ("pildoras").
    #[serde(default)]
    pub completed_pildoras: BTreeSet<String>,
    #[serde(default)]
    pub competences: BTreeSet<String>,
    #[serde(default)]
    pub completed_modules: BTreeSet<String>,
}

/// A one-off session (employability workshop or individual tutoring).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub date: NaiveDate,
    pub topic: String,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Something that went wrong and was written down.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Incident {
    pub date: NaiveDate,
    pub description: String,
    #[serde(default)]
    pub resolved: bool,
}

/// Soft-skills and administrative follow-up.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TransversalTracking {
    #[serde(default)]
    pub employability_sessions: Vec<SessionRecord>,
    #[serde(default)]
    pub individual_sessions: Vec<SessionRecord>,
    #[serde(default)]
    pub incidents: Vec<Incident>,
}

/// Unknown or malformed situations read as the default rather than failing
/// the whole document.
fn lenient_situation<'de, D>(deserializer: D) -> Result<AdministrativeSituation, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(raw).unwrap_or_default())
}

/// The stored body of a student document.
///
/// Every field has a serde default so that documents written under older
/// shapes still load. The backfill pass makes those defaults explicit in
/// storage.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StudentDocument {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default, deserialize_with = "lenient_situation")]
    pub administrative_situation: AdministrativeSituation,
    #[serde(default)]
    pub technical_tracking: TechnicalTracking,
    #[serde(default)]
    pub transversal_tracking: TransversalTracking,
}

/// A student enrolled in a promotion.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: String,
    pub promotion_id: String,
    pub revision: i64,
    #[serde(flatten)]
    pub document: StudentDocument,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for enrolling a student.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewStudent {
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub administrative_situation: Option<AdministrativeSituation>,
}

impl NewStudent {
    /// Expand into a complete document with every tracking field present.
    #[must_use]
    pub fn into_document(self) -> StudentDocument {
        StudentDocument {
            name: self.name,
            email: self.email,
            phone: self.phone.unwrap_or_default(),
            administrative_situation: self.administrative_situation.unwrap_or_default(),
            technical_tracking: TechnicalTracking::default(),
            transversal_tracking: TransversalTracking::default(),
        }
    }
}
