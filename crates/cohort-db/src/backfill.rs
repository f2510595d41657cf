//! Student tracking backfill.
//!
//! Walks every student document one page of ids at a time and adds the
//! guaranteed top-level fields that older documents lack. Existing values are
//! never replaced, so a second pass over unchanged data writes nothing.
//!
//! Each document is repaired through the revision compare-and-swap in
//! [`CohortService::mutate_document`]; a failure on one document is recorded
//! in the report and the scan moves on. Only a failure to enumerate the
//! documents aborts the pass.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use cohort_core::documents::{GuaranteedField, fill_missing_fields, missing_fields};
use cohort_core::responses::BackfillReport;

use crate::error::DatabaseError;
use crate::helpers::into_object;
use crate::service::CohortService;

/// Knobs for a backfill pass.
#[derive(Debug, Clone, Default)]
pub struct BackfillOptions {
    /// Report what would change without writing anything.
    pub dry_run: bool,
    /// Ids fetched per page; falls back to the service setting.
    pub page_size: Option<u32>,
    /// Checked between documents. Setting it stops the pass early.
    pub cancel: Option<Arc<AtomicBool>>,
}

impl BackfillOptions {
    #[must_use]
    pub fn dry_run() -> Self {
        Self {
            dry_run: true,
            ..Self::default()
        }
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }
}

/// Outcome for a single document.
enum DocumentOutcome {
    Complete,
    Migrated(Vec<GuaranteedField>),
}

impl CohortService {
    /// Backfill missing tracking structures on every student document.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` only when the documents cannot be enumerated.
    /// Per-document failures are listed in the report.
    pub async fn backfill_tracking_structures(&self) -> Result<BackfillReport, DatabaseError> {
        self.backfill_tracking_structures_with(&BackfillOptions::default())
            .await
    }

    /// Backfill with explicit options (dry run, page size, cancellation).
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` only when the documents cannot be enumerated.
    pub async fn backfill_tracking_structures_with(
        &self,
        options: &BackfillOptions,
    ) -> Result<BackfillReport, DatabaseError> {
        let page_size = options
            .page_size
            .unwrap_or_else(|| self.backfill_page_size())
            .max(1);
        let mut report = BackfillReport {
            dry_run: options.dry_run,
            ..BackfillReport::default()
        };
        let mut cursor: Option<String> = None;

        tracing::info!(page_size, dry_run = options.dry_run, "backfill: starting");

        'pages: loop {
            let ids = self.student_ids_after(cursor.as_deref(), page_size).await?;
            let Some(last) = ids.last().cloned() else {
                break;
            };

            for id in &ids {
                if options.is_cancelled() {
                    report.cancelled = true;
                    tracing::warn!(student_id = %id, "backfill: cancelled");
                    break 'pages;
                }

                report.scanned += 1;
                match self.backfill_document(id, options.dry_run).await {
                    Ok(DocumentOutcome::Complete) => report.already_complete += 1,
                    Ok(DocumentOutcome::Migrated(added)) => {
                        report.migrated += 1;
                        tracing::debug!(
                            student_id = %id,
                            added = ?added,
                            dry_run = options.dry_run,
                            "backfill: document repaired"
                        );
                    }
                    Err(error) => {
                        tracing::warn!(student_id = %id, %error, "backfill: document failed");
                        report.record_failure(id.as_str(), error.to_string());
                    }
                }
            }

            if ids.len() < page_size as usize {
                break;
            }
            cursor = Some(last);
        }

        tracing::info!(
            scanned = report.scanned,
            already_complete = report.already_complete,
            migrated = report.migrated,
            failed = report.failed,
            cancelled = report.cancelled,
            "backfill: finished"
        );
        Ok(report)
    }

    async fn backfill_document(
        &self,
        id: &str,
        dry_run: bool,
    ) -> Result<DocumentOutcome, DatabaseError> {
        if dry_run {
            let raw = match self.get_student_document(id).await {
                Ok(raw) => raw,
                Err(DatabaseError::NotFound { .. }) => return Ok(DocumentOutcome::Complete),
                Err(other) => return Err(other),
            };
            let missing = missing_fields(&into_object(raw.body)?);
            return Ok(if missing.is_empty() {
                DocumentOutcome::Complete
            } else {
                DocumentOutcome::Migrated(missing)
            });
        }

        let mut added = Vec::new();
        let result = self
            .mutate_document(id, |doc| {
                added = fill_missing_fields(doc);
                Ok(!added.is_empty())
            })
            .await;

        match result {
            Ok(_) if added.is_empty() => Ok(DocumentOutcome::Complete),
            Ok(_) => Ok(DocumentOutcome::Migrated(added)),
            // Deleted between enumeration and repair: nothing left to fix.
            Err(DatabaseError::NotFound { .. }) => Ok(DocumentOutcome::Complete),
            Err(other) => Err(other),
        }
    }
}
