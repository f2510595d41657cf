//! Attendance repository: the consistency engine for daily attendance.
//!
//! Invariant: at most one row per (promotion, student, day). Storage enforces
//! it with a UNIQUE constraint; this module makes sure no write path ever
//! trips over it:
//!
//! - [`CohortService::record_attendance`] is a single keyed upsert
//!   (`INSERT .. ON CONFLICT .. DO UPDATE`).
//! - [`CohortService::record_roll_call`] checks for an existing row, inserts
//!   when absent, and treats a UNIQUE violation on that insert as a signal to
//!   update the row the other writer just created.
//!
//! Input is validated before any storage call: an invalid day or status is a
//! `DatabaseError::Validation`, never a storage failure.

use chrono::Utc;

use cohort_core::dates::{format_iso_day, parse_optional_iso_day};
use cohort_core::entities::{AttendanceKey, AttendanceRecord, RollCallEntry};
use cohort_core::enums::AttendanceStatus;
use cohort_core::ids::PREFIX_ATTENDANCE;

use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, normalize_note, parse_datetime, parse_day, parse_enum};
use crate::retry::is_unique_violation;
use crate::service::CohortService;

const SELECT_COLS: &str = "id, promotion_id, student_id, date, status, note, created_at, updated_at";

fn row_to_attendance(row: &libsql::Row) -> Result<AttendanceRecord, DatabaseError> {
    Ok(AttendanceRecord {
        id: row.get(0)?,
        promotion_id: row.get(1)?,
        student_id: row.get(2)?,
        date: parse_day(&row.get::<String>(3)?)?,
        status: parse_enum(&row.get::<String>(4)?)?,
        note: get_opt_string(row, 5)?,
        created_at: parse_datetime(&row.get::<String>(6)?)?,
        updated_at: parse_datetime(&row.get::<String>(7)?)?,
    })
}

/// Filter criteria for attendance queries within one promotion.
///
/// Date bounds are inclusive `YYYY-MM-DD` strings, validated on use.
#[derive(Debug, Clone, Default)]
pub struct AttendanceFilter {
    pub student_id: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub limit: Option<u32>,
}

impl AttendanceFilter {
    #[must_use]
    pub fn for_student(student_id: impl Into<String>) -> Self {
        Self {
            student_id: Some(student_id.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn between(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.date_from = Some(from.into());
        self.date_to = Some(to.into());
        self
    }
}

impl CohortService {
    /// Create or replace the attendance record for a student on a day.
    ///
    /// Keyed upsert on (promotion, student, day): a new record is created when
    /// none exists, otherwise status and note are replaced and the identity is
    /// left as it was. A blank note is stored as no note.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` for blank ids, a malformed day or an
    /// out-of-domain status, and `DatabaseError` if the write fails.
    pub async fn record_attendance(
        &self,
        promotion_id: &str,
        student_id: &str,
        date: &str,
        status: &str,
        note: Option<&str>,
    ) -> Result<AttendanceRecord, DatabaseError> {
        let key = AttendanceKey::parse(promotion_id, student_id, date)?;
        let status: AttendanceStatus = status.parse()?;
        self.upsert_attendance(&key, status, note).await
    }

    /// Typed variant of [`Self::record_attendance`] for already-validated input.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the write fails.
    pub async fn upsert_attendance(
        &self,
        key: &AttendanceKey,
        status: AttendanceStatus,
        note: Option<&str>,
    ) -> Result<AttendanceRecord, DatabaseError> {
        let now = Utc::now().to_rfc3339();
        let date = format_iso_day(key.date);

        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "INSERT INTO attendance ({SELECT_COLS})
                     VALUES (?1 || '-' || lower(hex(randomblob(4))), ?2, ?3, ?4, ?5, ?6, ?7, ?7)
                     ON CONFLICT (promotion_id, student_id, date) DO UPDATE SET
                         status = excluded.status,
                         note = excluded.note,
                         updated_at = excluded.updated_at
                     RETURNING {SELECT_COLS}"
                ),
                libsql::params![
                    PREFIX_ATTENDANCE,
                    key.promotion_id.as_str(),
                    key.student_id.as_str(),
                    date.as_str(),
                    status.as_str(),
                    normalize_note(note),
                    now.as_str()
                ],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        let record = row_to_attendance(&row)?;

        tracing::debug!(
            promotion_id = %key.promotion_id,
            student_id = %key.student_id,
            date = %date,
            status = %status,
            "attendance: recorded"
        );
        Ok(record)
    }

    /// Record a whole day's roll call for several students.
    ///
    /// Every entry is validated before anything is written. Entries are then
    /// applied in order; a student listed twice ends with the later entry.
    /// Returns the stored records in input order.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` if any entry is invalid (nothing is
    /// written), `DatabaseError::Conflict` if a collision could not be resolved
    /// within the retry budget, and `DatabaseError` on storage failure.
    pub async fn record_roll_call(
        &self,
        promotion_id: &str,
        date: &str,
        entries: &[RollCallEntry],
    ) -> Result<Vec<AttendanceRecord>, DatabaseError> {
        let mut validated = Vec::with_capacity(entries.len());
        for entry in entries {
            let key = AttendanceKey::parse(promotion_id, &entry.student_id, date)?;
            let status: AttendanceStatus = entry.status.parse()?;
            validated.push((key, status, entry.note.as_deref()));
        }

        let mut records = Vec::with_capacity(validated.len());
        for (key, status, note) in validated {
            records.push(self.insert_or_update_attendance(&key, status, note).await?);
        }

        tracing::info!(
            promotion_id,
            date,
            recorded = records.len(),
            "attendance: roll call stored"
        );
        Ok(records)
    }

    /// Non-upsert write path: update if present, insert if absent, and resolve
    /// an insert collision by updating the row that won.
    async fn insert_or_update_attendance(
        &self,
        key: &AttendanceKey,
        status: AttendanceStatus,
        note: Option<&str>,
    ) -> Result<AttendanceRecord, DatabaseError> {
        let retry = self.retry();
        let mut attempt = 1;
        loop {
            let written = if self.get_attendance_by_key(key).await?.is_some() {
                self.update_attendance_row(key, status, note).await?
            } else {
                self.insert_or_take_over(key, status, note, attempt).await?
            };
            if let Some(record) = written {
                return Ok(record);
            }

            // The competing row disappeared between our read and our write.
            if attempt >= retry.max_attempts {
                tracing::warn!(
                    promotion_id = %key.promotion_id,
                    student_id = %key.student_id,
                    date = %key.date,
                    attempts = attempt,
                    "attendance: conflict unresolved"
                );
                return Err(DatabaseError::Conflict {
                    promotion_id: key.promotion_id.clone(),
                    student_id: key.student_id.clone(),
                    date: key.date,
                });
            }
            tokio::time::sleep(retry.delay_for(attempt)).await;
            attempt += 1;
        }
    }

    /// Insert a row believed to be absent. If another writer created it in
    /// the meantime, update that row instead. `None` means the row vanished
    /// again before the update landed.
    pub(crate) async fn insert_or_take_over(
        &self,
        key: &AttendanceKey,
        status: AttendanceStatus,
        note: Option<&str>,
        attempt: u32,
    ) -> Result<Option<AttendanceRecord>, DatabaseError> {
        match self.insert_attendance_row(key, status, note).await {
            Ok(record) => Ok(Some(record)),
            Err(DatabaseError::LibSql(ref e)) if is_unique_violation(e) => {
                tracing::debug!(
                    promotion_id = %key.promotion_id,
                    student_id = %key.student_id,
                    date = %key.date,
                    attempt,
                    "attendance: insert collided, retrying as update"
                );
                self.update_attendance_row(key, status, note).await
            }
            Err(other) => Err(other),
        }
    }

    /// Plain INSERT; fails with a UNIQUE violation if the triple exists.
    pub(crate) async fn insert_attendance_row(
        &self,
        key: &AttendanceKey,
        status: AttendanceStatus,
        note: Option<&str>,
    ) -> Result<AttendanceRecord, DatabaseError> {
        let now = Utc::now().to_rfc3339();
        let id = self.db().generate_id(PREFIX_ATTENDANCE).await?;

        self.db()
            .conn()
            .execute(
                &format!("INSERT INTO attendance ({SELECT_COLS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)"),
                libsql::params![
                    id.as_str(),
                    key.promotion_id.as_str(),
                    key.student_id.as_str(),
                    format_iso_day(key.date),
                    status.as_str(),
                    normalize_note(note),
                    now.as_str()
                ],
            )
            .await?;

        self.get_attendance_by_key(key)
            .await?
            .ok_or(DatabaseError::NoResult)
    }

    /// UPDATE by identity; `None` when no row matched.
    async fn update_attendance_row(
        &self,
        key: &AttendanceKey,
        status: AttendanceStatus,
        note: Option<&str>,
    ) -> Result<Option<AttendanceRecord>, DatabaseError> {
        let now = Utc::now().to_rfc3339();
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "UPDATE attendance SET status = ?1, note = ?2, updated_at = ?3
                     WHERE promotion_id = ?4 AND student_id = ?5 AND date = ?6
                     RETURNING {SELECT_COLS}"
                ),
                libsql::params![
                    status.as_str(),
                    normalize_note(note),
                    now.as_str(),
                    key.promotion_id.as_str(),
                    key.student_id.as_str(),
                    format_iso_day(key.date)
                ],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_attendance(&row)?)),
            None => Ok(None),
        }
    }

    async fn get_attendance_by_key(
        &self,
        key: &AttendanceKey,
    ) -> Result<Option<AttendanceRecord>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM attendance
                     WHERE promotion_id = ?1 AND student_id = ?2 AND date = ?3"
                ),
                libsql::params![
                    key.promotion_id.as_str(),
                    key.student_id.as_str(),
                    format_iso_day(key.date)
                ],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_attendance(&row)?)),
            None => Ok(None),
        }
    }

    /// Point lookup. A missing record is `Ok(None)`, not an error.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` for malformed input.
    pub async fn get_attendance(
        &self,
        promotion_id: &str,
        student_id: &str,
        date: &str,
    ) -> Result<Option<AttendanceRecord>, DatabaseError> {
        let key = AttendanceKey::parse(promotion_id, student_id, date)?;
        self.get_attendance_by_key(&key).await
    }

    /// Point lookup for callers that need the record to exist.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if there is no record for the triple.
    pub async fn confirm_attendance(
        &self,
        promotion_id: &str,
        student_id: &str,
        date: &str,
    ) -> Result<AttendanceRecord, DatabaseError> {
        self.get_attendance(promotion_id, student_id, date)
            .await?
            .ok_or_else(|| {
                DatabaseError::not_found("attendance", format!("{promotion_id}/{student_id}/{date}"))
            })
    }

    /// Attendance of a promotion, ordered by day then student id.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` for a malformed or inverted date
    /// range, and `DatabaseError` if the query fails.
    pub async fn query_attendance(
        &self,
        promotion_id: &str,
        filter: &AttendanceFilter,
    ) -> Result<Vec<AttendanceRecord>, DatabaseError> {
        if promotion_id.trim().is_empty() {
            return Err(DatabaseError::Validation(
                "promotion id must not be empty".into(),
            ));
        }
        let from = parse_optional_iso_day(filter.date_from.as_deref())?;
        let to = parse_optional_iso_day(filter.date_to.as_deref())?;
        if let (Some(from), Some(to)) = (from, to) {
            if from > to {
                return Err(DatabaseError::Validation(format!(
                    "date range is inverted ({from} > {to})"
                )));
            }
        }

        let mut conditions = vec!["promotion_id = ?1".to_string()];
        let mut params: Vec<libsql::Value> = vec![libsql::Value::Text(promotion_id.to_string())];

        if let Some(ref sid) = filter.student_id {
            params.push(libsql::Value::Text(sid.clone()));
            conditions.push(format!("student_id = ?{}", params.len()));
        }
        if let Some(from) = from {
            params.push(libsql::Value::Text(format_iso_day(from)));
            conditions.push(format!("date >= ?{}", params.len()));
        }
        if let Some(to) = to {
            params.push(libsql::Value::Text(format_iso_day(to)));
            conditions.push(format!("date <= ?{}", params.len()));
        }

        let limit_clause = filter
            .limit
            .map_or_else(String::new, |limit| format!(" LIMIT {limit}"));
        let sql = format!(
            "SELECT {SELECT_COLS} FROM attendance
             WHERE {}
             ORDER BY date ASC, student_id ASC{limit_clause}",
            conditions.join(" AND ")
        );

        let mut rows = self
            .db()
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;
        let mut records = Vec::new();
        while let Some(row) = rows.next().await? {
            records.push(row_to_attendance(&row)?);
        }
        Ok(records)
    }

    /// Remove the record for a triple. Returns whether a record was removed;
    /// deleting a missing record is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` for malformed input, and
    /// `DatabaseError` if the delete fails.
    pub async fn delete_attendance(
        &self,
        promotion_id: &str,
        student_id: &str,
        date: &str,
    ) -> Result<bool, DatabaseError> {
        let key = AttendanceKey::parse(promotion_id, student_id, date)?;
        let removed = self
            .db()
            .conn()
            .execute(
                "DELETE FROM attendance WHERE promotion_id = ?1 AND student_id = ?2 AND date = ?3",
                libsql::params![
                    key.promotion_id.as_str(),
                    key.student_id.as_str(),
                    format_iso_day(key.date)
                ],
            )
            .await?;

        if removed > 0 {
            tracing::debug!(promotion_id, student_id, date, "attendance: deleted");
        }
        Ok(removed > 0)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;
    use crate::test_support::helpers::{count_attendance, insert_raw_attendance, test_service};

    #[tokio::test]
    async fn record_then_overwrite_keeps_one_row() {
        let svc = test_service().await;

        let first = svc
            .record_attendance("P1", "S1", "2024-03-04", "Present", Some(""))
            .await
            .unwrap();
        assert_eq!(first.status, AttendanceStatus::Present);
        assert_eq!(first.note, None);
        assert!(first.id.starts_with("att-"));

        let second = svc
            .record_attendance("P1", "S1", "2024-03-04", "Late", Some("arrived 10m late"))
            .await
            .unwrap();
        assert_eq!(second.status, AttendanceStatus::Late);
        assert_eq!(second.note.as_deref(), Some("arrived 10m late"));
        assert_eq!(second.id, first.id, "identity must survive an overwrite");
        assert_eq!(second.created_at, first.created_at);

        assert_eq!(count_attendance(&svc, "P1", "S1", "2024-03-04").await, 1);
    }

    #[tokio::test]
    async fn unset_status_is_stored_distinct_from_absent() {
        let svc = test_service().await;
        let unset = svc
            .record_attendance("P1", "S1", "2024-03-04", "", None)
            .await
            .unwrap();
        let absent = svc
            .record_attendance("P1", "S2", "2024-03-04", "absent", None)
            .await
            .unwrap();
        assert_eq!(unset.status, AttendanceStatus::Unset);
        assert_eq!(absent.status, AttendanceStatus::Absent);
    }

    #[rstest]
    #[case("P1", "S1", "2024-13-01", "present")]
    #[case("P1", "S1", "04-03-2024", "present")]
    #[case("P1", "S1", "2024-03-04", "asleep")]
    #[case("", "S1", "2024-03-04", "present")]
    #[case("P1", " ", "2024-03-04", "present")]
    #[tokio::test]
    async fn invalid_input_is_a_validation_error(
        #[case] promotion_id: &str,
        #[case] student_id: &str,
        #[case] date: &str,
        #[case] status: &str,
    ) {
        let svc = test_service().await;
        let err = svc
            .record_attendance(promotion_id, student_id, date, status, None)
            .await
            .unwrap_err();
        assert!(err.is_validation(), "expected validation error, got {err:?}");
        assert!(!err.is_retryable());
    }

    #[tokio::test]
    async fn query_orders_by_date_then_student() {
        let svc = test_service().await;
        for (student, date) in [
            ("S2", "2024-03-05"),
            ("S1", "2024-03-05"),
            ("S2", "2024-03-04"),
            ("S1", "2024-03-04"),
        ] {
            svc.record_attendance("P1", student, date, "present", None)
                .await
                .unwrap();
        }
        svc.record_attendance("P2", "S1", "2024-03-04", "present", None)
            .await
            .unwrap();

        let records = svc
            .query_attendance("P1", &AttendanceFilter::default())
            .await
            .unwrap();
        let order: Vec<(String, String)> = records
            .iter()
            .map(|r| (format_iso_day(r.date), r.student_id.clone()))
            .collect();
        assert_eq!(
            order,
            vec![
                ("2024-03-04".to_string(), "S1".to_string()),
                ("2024-03-04".to_string(), "S2".to_string()),
                ("2024-03-05".to_string(), "S1".to_string()),
                ("2024-03-05".to_string(), "S2".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn query_filters_by_student_and_inclusive_range() {
        let svc = test_service().await;
        for date in ["2024-03-01", "2024-03-04", "2024-03-08", "2024-03-11"] {
            svc.record_attendance("P1", "S1", date, "present", None)
                .await
                .unwrap();
            svc.record_attendance("P1", "S2", date, "absent", None)
                .await
                .unwrap();
        }

        let records = svc
            .query_attendance(
                "P1",
                &AttendanceFilter::for_student("S2").between("2024-03-04", "2024-03-08"),
            )
            .await
            .unwrap();
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.student_id == "S2"));
        assert_eq!(format_iso_day(records[0].date), "2024-03-04");
        assert_eq!(format_iso_day(records[1].date), "2024-03-08");
    }

    #[tokio::test]
    async fn query_rejects_inverted_range() {
        let svc = test_service().await;
        let err = svc
            .query_attendance(
                "P1",
                &AttendanceFilter::default().between("2024-03-08", "2024-03-04"),
            )
            .await
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let svc = test_service().await;
        svc.record_attendance("P1", "S1", "2024-03-04", "present", None)
            .await
            .unwrap();

        assert!(svc.delete_attendance("P1", "S1", "2024-03-04").await.unwrap());
        assert!(
            svc.get_attendance("P1", "S1", "2024-03-04")
                .await
                .unwrap()
                .is_none()
        );
        assert!(!svc.delete_attendance("P1", "S1", "2024-03-04").await.unwrap());
    }

    #[tokio::test]
    async fn confirm_reports_not_found() {
        let svc = test_service().await;
        let err = svc
            .confirm_attendance("P1", "S1", "2024-03-04")
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::NotFound { .. }));
    }

    #[tokio::test]
    async fn roll_call_updates_rows_created_elsewhere() {
        let svc = test_service().await;
        insert_raw_attendance(&svc, "att-legacy", "P1", "S1", "2024-03-04", "absent").await;

        let records = svc
            .record_roll_call(
                "P1",
                "2024-03-04",
                &[
                    RollCallEntry::new("S1", "Excused").with_note("doctor"),
                    RollCallEntry::new("S2", "Present"),
                ],
            )
            .await
            .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "att-legacy");
        assert_eq!(records[0].status, AttendanceStatus::Excused);
        assert_eq!(records[0].note.as_deref(), Some("doctor"));
        assert_eq!(records[1].status, AttendanceStatus::Present);
        assert_eq!(count_attendance(&svc, "P1", "S1", "2024-03-04").await, 1);
    }

    #[tokio::test]
    async fn roll_call_with_repeated_student_keeps_last_entry() {
        let svc = test_service().await;
        svc.record_roll_call(
            "P1",
            "2024-03-04",
            &[RollCallEntry::new("S1", "present"), RollCallEntry::new("S1", "late")],
        )
        .await
        .unwrap();

        let stored = svc.confirm_attendance("P1", "S1", "2024-03-04").await.unwrap();
        assert_eq!(stored.status, AttendanceStatus::Late);
        assert_eq!(count_attendance(&svc, "P1", "S1", "2024-03-04").await, 1);
    }

    #[tokio::test]
    async fn roll_call_validates_everything_before_writing() {
        let svc = test_service().await;
        let err = svc
            .record_roll_call(
                "P1",
                "2024-03-04",
                &[RollCallEntry::new("S1", "present"), RollCallEntry::new("S2", "maybe")],
            )
            .await
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(count_attendance(&svc, "P1", "S1", "2024-03-04").await, 0);
    }

    #[tokio::test]
    async fn plain_insert_of_existing_triple_is_a_unique_violation() {
        let svc = test_service().await;
        let key = AttendanceKey::parse("P1", "S1", "2024-03-04").unwrap();
        svc.insert_attendance_row(&key, AttendanceStatus::Present, None)
            .await
            .unwrap();

        let err = svc
            .insert_attendance_row(&key, AttendanceStatus::Late, None)
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::LibSql(ref e) if is_unique_violation(e)));
    }

    #[tokio::test]
    async fn concurrent_writers_leave_exactly_one_record() {
        let svc = test_service().await;

        let late = [RollCallEntry::new("S1", "late")];
        let (a, b, c) = tokio::join!(
            svc.record_attendance("P1", "S1", "2024-03-04", "present", None),
            svc.record_roll_call("P1", "2024-03-04", &late),
            svc.record_attendance("P1", "S1", "2024-03-04", "absent", Some("no show")),
        );
        a.unwrap();
        b.unwrap();
        c.unwrap();

        assert_eq!(count_attendance(&svc, "P1", "S1", "2024-03-04").await, 1);
    }

    #[tokio::test]
    async fn insert_collision_updates_the_row_that_won() {
        let svc = test_service().await;
        let key = AttendanceKey::parse("P1", "S1", "2024-03-04").unwrap();
        // Another writer lands between our lookup and our insert.
        insert_raw_attendance(&svc, "att-winner", "P1", "S1", "2024-03-04", "absent").await;

        let record = svc
            .insert_or_take_over(&key, AttendanceStatus::Late, Some("bus"), 1)
            .await
            .unwrap()
            .expect("collision resolves to an update");

        assert_eq!(record.id, "att-winner");
        assert_eq!(record.status, AttendanceStatus::Late);
        assert_eq!(record.note.as_deref(), Some("bus"));
        assert_eq!(count_attendance(&svc, "P1", "S1", "2024-03-04").await, 1);
    }

    #[tokio::test]
    async fn row_that_keeps_vanishing_ends_in_retryable_conflict() {
        let svc = test_service().await;
        // Every insert collides with a row that the failed statement then
        // rolls back, so the follow-up update never finds anything.
        svc.db()
            .conn()
            .execute_batch(
                "CREATE TRIGGER attendance_phantom BEFORE INSERT ON attendance
                 WHEN NEW.id NOT LIKE 'phantom-%'
                 BEGIN
                     INSERT INTO attendance (id, promotion_id, student_id, date, status)
                     VALUES ('phantom-' || NEW.id, NEW.promotion_id, NEW.student_id, NEW.date, NEW.status);
                 END;",
            )
            .await
            .unwrap();

        let err = svc
            .record_roll_call("P1", "2024-03-04", &[RollCallEntry::new("S1", "present")])
            .await
            .unwrap_err();

        assert!(matches!(err, DatabaseError::Conflict { ref student_id, .. } if student_id == "S1"));
        assert!(err.is_retryable());
        assert_eq!(count_attendance(&svc, "P1", "S1", "2024-03-04").await, 0);
    }
}
