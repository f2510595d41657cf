use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A curriculum unit with a fixed duration, containing courses and projects.
///
/// `duration` is signed and defaults to zero so that malformed stored shapes
/// still deserialize; the scheduler treats anything non-positive as an empty
/// range.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub duration: i64,
    #[serde(default)]
    pub courses: Vec<String>,
    #[serde(default)]
    pub projects: Vec<String>,
}

impl Module {
    #[must_use]
    pub fn new(name: impl Into<String>, duration: i64) -> Self {
        Self {
            name: name.into(),
            duration,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_courses<I, S>(mut self, courses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.courses = courses.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_projects<I, S>(mut self, projects: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.projects = projects.into_iter().map(Into::into).collect();
        self
    }
}

/// The projection of a promotion consumed by the timeline scheduler.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PromotionPlan {
    #[serde(default)]
    pub weeks: i64,
    #[serde(default)]
    pub modules: Vec<Module>,
}

/// A cohort running a fixed curriculum over a bounded number of weeks.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Promotion {
    pub id: String,
    pub name: String,
    pub weeks: i64,
    pub modules: Vec<Module>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Promotion {
    #[must_use]
    pub fn plan(&self) -> PromotionPlan {
        PromotionPlan {
            weeks: self.weeks,
            modules: self.modules.clone(),
        }
    }
}
