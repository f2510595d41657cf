//! Student document repository.
//!
//! Student rows carry a free-form JSON document plus a `revision` counter.
//! Every write after creation is a compare-and-swap on that counter, and
//! mutations work on the raw JSON object so that keys this crate does not
//! know about survive untouched.

use chrono::Utc;
use serde::Serialize;
use serde_json::{Map, Value};

use cohort_core::entities::{NewStudent, Student, StudentDocument, TeacherNote};
use cohort_core::ids::PREFIX_STUDENT;

use crate::error::DatabaseError;
use crate::helpers::{into_object, parse_datetime, parse_json};
use crate::service::CohortService;

const SELECT_COLS: &str = "id, promotion_id, document, revision, created_at, updated_at";

fn row_to_student(row: &libsql::Row) -> Result<Student, DatabaseError> {
    let id: String = row.get(0)?;
    let document: StudentDocument = serde_json::from_value(parse_json(&row.get::<String>(2)?)?)
        .map_err(|e| DatabaseError::InvalidState(format!("student {id}: unreadable document: {e}")))?;
    Ok(Student {
        id,
        promotion_id: row.get(1)?,
        revision: row.get(3)?,
        document,
        created_at: parse_datetime(&row.get::<String>(4)?)?,
        updated_at: parse_datetime(&row.get::<String>(5)?)?,
    })
}

/// A student document exactly as stored, without typed interpretation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawStudentDocument {
    pub id: String,
    pub promotion_id: String,
    pub revision: i64,
    pub body: Value,
}

impl CohortService {
    /// Enroll a student in an existing promotion.
    ///
    /// The stored document carries every tracking field from the start.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` for a blank name and
    /// `DatabaseError::NotFound` if the promotion does not exist.
    pub async fn create_student(
        &self,
        promotion_id: &str,
        input: NewStudent,
    ) -> Result<Student, DatabaseError> {
        if input.name.trim().is_empty() {
            return Err(DatabaseError::Validation(
                "student name must not be empty".into(),
            ));
        }
        self.get_promotion(promotion_id).await?;

        let id = self.db().generate_id(PREFIX_STUDENT).await?;
        let now = Utc::now();
        let document = input.into_document();
        let body = serde_json::to_string(&document)?;

        self.db()
            .conn()
            .execute(
                "INSERT INTO students (id, promotion_id, document, revision, created_at, updated_at)
                 VALUES (?1, ?2, ?3, 0, ?4, ?4)",
                libsql::params![id.as_str(), promotion_id, body, now.to_rfc3339()],
            )
            .await?;

        tracing::info!(student_id = %id, promotion_id, "student: created");

        Ok(Student {
            id,
            promotion_id: promotion_id.to_string(),
            revision: 0,
            document,
            created_at: now,
            updated_at: now,
        })
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if no student has this id, and
    /// `DatabaseError::InvalidState` if the stored document cannot be read.
    pub async fn get_student(&self, id: &str) -> Result<Student, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM students WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found("student", id))?;
        row_to_student(&row)
    }

    /// Students of a promotion ordered by id.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or a document is unreadable.
    pub async fn list_students(
        &self,
        promotion_id: &str,
        limit: u32,
    ) -> Result<Vec<Student>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM students WHERE promotion_id = ?1 ORDER BY id ASC LIMIT ?2"
                ),
                libsql::params![promotion_id, i64::from(limit)],
            )
            .await?;
        let mut students = Vec::new();
        while let Some(row) = rows.next().await? {
            students.push(row_to_student(&row)?);
        }
        Ok(students)
    }

    /// Student ids strictly after `after`, ascending. Used for keyset paging.
    pub(crate) async fn student_ids_after(
        &self,
        after: Option<&str>,
        limit: u32,
    ) -> Result<Vec<String>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT id FROM students WHERE id > ?1 ORDER BY id ASC LIMIT ?2",
                libsql::params![after.unwrap_or(""), i64::from(limit)],
            )
            .await?;
        let mut ids = Vec::new();
        while let Some(row) = rows.next().await? {
            ids.push(row.get::<String>(0)?);
        }
        Ok(ids)
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if no student has this id.
    pub async fn get_student_document(
        &self,
        id: &str,
    ) -> Result<RawStudentDocument, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT id, promotion_id, revision, document FROM students WHERE id = ?1",
                [id],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found("student", id))?;
        Ok(RawStudentDocument {
            id: row.get(0)?,
            promotion_id: row.get(1)?,
            revision: row.get(2)?,
            body: parse_json(&row.get::<String>(3)?)?,
        })
    }

    /// Store a document body verbatim, creating the row if needed.
    ///
    /// This is the import path for documents produced elsewhere; the body is
    /// not checked against the current shape. Overwriting bumps the revision.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the write fails.
    pub async fn put_student_document(
        &self,
        id: &str,
        promotion_id: &str,
        body: &Value,
    ) -> Result<RawStudentDocument, DatabaseError> {
        if id.trim().is_empty() {
            return Err(DatabaseError::Validation(
                "student id must not be empty".into(),
            ));
        }
        let now = Utc::now().to_rfc3339();
        let mut rows = self
            .db()
            .conn()
            .query(
                "INSERT INTO students (id, promotion_id, document, revision, created_at, updated_at)
                 VALUES (?1, ?2, ?3, 0, ?4, ?4)
                 ON CONFLICT (id) DO UPDATE SET
                     promotion_id = excluded.promotion_id,
                     document = excluded.document,
                     revision = students.revision + 1,
                     updated_at = excluded.updated_at
                 RETURNING revision",
                libsql::params![id, promotion_id, body.to_string(), now],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;

        Ok(RawStudentDocument {
            id: id.to_string(),
            promotion_id: promotion_id.to_string(),
            revision: row.get(0)?,
            body: body.clone(),
        })
    }

    /// Write `body` only if the stored revision is still `expected_revision`.
    ///
    /// Returns `false` when another writer got there first (or the row is
    /// gone); the caller decides whether to re-read and try again.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the write fails.
    pub async fn replace_document_if_unchanged(
        &self,
        id: &str,
        expected_revision: i64,
        body: &Map<String, Value>,
    ) -> Result<bool, DatabaseError> {
        let changed = self
            .db()
            .conn()
            .execute(
                "UPDATE students SET document = ?1, revision = revision + 1, updated_at = ?2
                 WHERE id = ?3 AND revision = ?4",
                libsql::params![
                    serde_json::to_string(body)?,
                    Utc::now().to_rfc3339(),
                    id,
                    expected_revision
                ],
            )
            .await?;
        Ok(changed > 0)
    }

    /// Read-modify-write a student document under compare-and-swap.
    ///
    /// `apply` edits the object in place and returns whether it changed
    /// anything; when it returns `false` nothing is written. On a lost race
    /// the document is re-read and `apply` runs again on the fresh copy.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if the student does not exist,
    /// `DatabaseError::InvalidState` if the stored body is not an object, and
    /// `DatabaseError::StaleRevision` once the retry budget is spent.
    pub async fn mutate_document<F>(
        &self,
        id: &str,
        mut apply: F,
    ) -> Result<RawStudentDocument, DatabaseError>
    where
        F: FnMut(&mut Map<String, Value>) -> Result<bool, DatabaseError>,
    {
        let retry = self.retry();
        let mut attempt = 1;
        loop {
            let RawStudentDocument {
                id: stored_id,
                promotion_id,
                revision,
                body,
            } = self.get_student_document(id).await?;
            let mut object = into_object(body)?;

            if !apply(&mut object)? {
                return Ok(RawStudentDocument {
                    id: stored_id,
                    promotion_id,
                    revision,
                    body: Value::Object(object),
                });
            }

            if self
                .replace_document_if_unchanged(id, revision, &object)
                .await?
            {
                return Ok(RawStudentDocument {
                    id: stored_id,
                    promotion_id,
                    revision: revision + 1,
                    body: Value::Object(object),
                });
            }

            if attempt >= retry.max_attempts {
                tracing::warn!(student_id = id, attempts = attempt, "student: revision kept moving");
                return Err(DatabaseError::StaleRevision { id: id.to_string() });
            }
            tracing::debug!(student_id = id, attempt, revision, "student: lost revision race");
            tokio::time::sleep(retry.delay_for(attempt)).await;
            attempt += 1;
        }
    }

    /// Append a teacher note to a student's technical tracking.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` for a blank note, and the errors of
    /// [`Self::mutate_document`].
    pub async fn add_teacher_note(
        &self,
        student_id: &str,
        note: &str,
        author: Option<&str>,
    ) -> Result<Student, DatabaseError> {
        if note.trim().is_empty() {
            return Err(DatabaseError::Validation("note must not be empty".into()));
        }
        let entry = serde_json::to_value(TeacherNote {
            note: note.to_string(),
            author: author.map(ToString::to_string),
            created_at: Utc::now(),
        })?;

        self.mutate_document(student_id, |doc| {
            tracking_list(doc, "teacherNotes")?.push(entry.clone());
            Ok(true)
        })
        .await?;
        self.get_student(student_id).await
    }

    /// Mark a module as completed. Completing it twice is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` for a blank module name, and the
    /// errors of [`Self::mutate_document`].
    pub async fn complete_module(
        &self,
        student_id: &str,
        module: &str,
    ) -> Result<Student, DatabaseError> {
        if module.trim().is_empty() {
            return Err(DatabaseError::Validation(
                "module name must not be empty".into(),
            ));
        }
        self.mutate_document(student_id, |doc| {
            let completed = tracking_list(doc, "completedModules")?;
            if completed.iter().any(|value| value.as_str() == Some(module)) {
                return Ok(false);
            }
            completed.push(Value::String(module.to_string()));
            Ok(true)
        })
        .await?;
        self.get_student(student_id).await
    }
}

/// The array `technicalTracking.<key>`, created empty when missing.
fn tracking_list<'a>(
    doc: &'a mut Map<String, Value>,
    key: &str,
) -> Result<&'a mut Vec<Value>, DatabaseError> {
    if doc.get("technicalTracking").is_none_or(Value::is_null) {
        doc.insert("technicalTracking".into(), Value::Object(Map::new()));
    }
    let Some(Value::Object(tracking)) = doc.get_mut("technicalTracking") else {
        return Err(DatabaseError::InvalidState(
            "technicalTracking is not an object".into(),
        ));
    };
    if tracking.get(key).is_none_or(Value::is_null) {
        tracking.insert(key.to_string(), Value::Array(Vec::new()));
    }
    match tracking.get_mut(key) {
        Some(Value::Array(items)) => Ok(items),
        _ => Err(DatabaseError::InvalidState(format!(
            "technicalTracking.{key} is not an array"
        ))),
    }
}
