//! Promotion repository.
//!
//! The curriculum is stored as a JSON array of modules on the promotion row.
//! Plans are checked with [`validate_plan`] before they are written; a
//! curriculum that runs past the promotion's last week is accepted.

use chrono::Utc;

use cohort_core::entities::{Module, Promotion, PromotionPlan};
use cohort_core::ids::PREFIX_PROMOTION;
use cohort_core::responses::PromotionTimelineResponse;
use cohort_core::timeline::{schedule, validate_plan};

use crate::error::DatabaseError;
use crate::helpers::{parse_datetime, parse_json};
use crate::service::CohortService;

const SELECT_COLS: &str = "id, name, weeks, modules, created_at, updated_at";

fn row_to_promotion(row: &libsql::Row) -> Result<Promotion, DatabaseError> {
    let modules: Vec<Module> = serde_json::from_value(parse_json(&row.get::<String>(3)?)?)
        .map_err(|e| DatabaseError::InvalidState(format!("Invalid modules column: {e}")))?;
    Ok(Promotion {
        id: row.get(0)?,
        name: row.get(1)?,
        weeks: row.get(2)?,
        modules,
        created_at: parse_datetime(&row.get::<String>(4)?)?,
        updated_at: parse_datetime(&row.get::<String>(5)?)?,
    })
}

impl CohortService {
    /// Create a promotion with its curriculum.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` for a blank name or an invalid plan.
    pub async fn create_promotion(
        &self,
        name: &str,
        weeks: i64,
        modules: Vec<Module>,
    ) -> Result<Promotion, DatabaseError> {
        if name.trim().is_empty() {
            return Err(DatabaseError::Validation(
                "promotion name must not be empty".into(),
            ));
        }
        let plan = PromotionPlan { weeks, modules };
        validate_plan(&plan)?;

        let id = self.db().generate_id(PREFIX_PROMOTION).await?;
        let now = Utc::now();
        let modules_json = serde_json::to_string(&plan.modules)?;

        self.db()
            .conn()
            .execute(
                "INSERT INTO promotions (id, name, weeks, modules, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
                libsql::params![
                    id.as_str(),
                    name,
                    weeks,
                    modules_json,
                    now.to_rfc3339()
                ],
            )
            .await?;

        tracing::info!(promotion_id = %id, name, weeks, modules = plan.modules.len(), "promotion: created");

        Ok(Promotion {
            id,
            name: name.to_string(),
            weeks,
            modules: plan.modules,
            created_at: now,
            updated_at: now,
        })
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if no promotion has this id.
    pub async fn get_promotion(&self, id: &str) -> Result<Promotion, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM promotions WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found("promotion", id))?;
        row_to_promotion(&row)
    }

    /// List promotions, newest first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_promotions(&self, limit: u32) -> Result<Vec<Promotion>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM promotions ORDER BY created_at DESC, id ASC LIMIT ?1"
                ),
                [i64::from(limit)],
            )
            .await?;
        let mut promotions = Vec::new();
        while let Some(row) = rows.next().await? {
            promotions.push(row_to_promotion(&row)?);
        }
        Ok(promotions)
    }

    /// Replace the curriculum of a promotion.
    ///
    /// Every module after a changed one shifts; the timeline is recomputed
    /// from the stored plan on the next read.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` for an invalid plan and
    /// `DatabaseError::NotFound` if the promotion does not exist.
    pub async fn update_promotion_modules(
        &self,
        id: &str,
        modules: Vec<Module>,
    ) -> Result<Promotion, DatabaseError> {
        let current = self.get_promotion(id).await?;
        let plan = PromotionPlan {
            weeks: current.weeks,
            modules,
        };
        validate_plan(&plan)?;

        let now = Utc::now();
        self.db()
            .conn()
            .execute(
                "UPDATE promotions SET modules = ?1, updated_at = ?2 WHERE id = ?3",
                libsql::params![serde_json::to_string(&plan.modules)?, now.to_rfc3339(), id],
            )
            .await?;

        tracing::debug!(promotion_id = id, modules = plan.modules.len(), "promotion: modules replaced");

        Ok(Promotion {
            modules: plan.modules,
            updated_at: now,
            ..current
        })
    }

    /// Load a promotion and lay out its timeline.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if the promotion does not exist.
    pub async fn promotion_timeline(
        &self,
        id: &str,
    ) -> Result<PromotionTimelineResponse, DatabaseError> {
        let promotion = self.get_promotion(id).await?;
        let timeline = schedule(&promotion.plan());
        if timeline.overflow_weeks() > 0 {
            tracing::debug!(
                promotion_id = id,
                overflow = timeline.overflow_weeks(),
                "promotion: curriculum runs past the last week"
            );
        }
        Ok(PromotionTimelineResponse {
            promotion,
            timeline,
        })
    }
}
