//! PostgreSQL implementation of EnrollmentReader.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{PgPool, Row};
use tracing::warn;

use crate::domain::foundation::{DomainError, EnrollmentId, ErrorCode, ProfileId};
use crate::domain::scheduling::{AvailabilitySlot, Enrollment, ProfileRef, WeekWindow};
use crate::ports::EnrollmentReader;

/// PostgreSQL implementation of EnrollmentReader.
#[derive(Clone)]
pub struct PostgresEnrollmentReader {
    pool: PgPool,
}

impl PostgresEnrollmentReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EnrollmentReader for PostgresEnrollmentReader {
    async fn list_active(&self, window: &WeekWindow) -> Result<Vec<Enrollment>, DomainError> {
        // Paused enrollments are returned so the expander can record the skip
        let rows = sqlx::query(
            r#"
            SELECT e.id, e.start_date, e.duration, e.availability, e.meeting_id,
                   e.summary, e.paused,
                   s.id AS student_id, s.first_name AS student_first_name,
                   s.last_name AS student_last_name, s.email AS student_email,
                   t.id AS tutor_id, t.first_name AS tutor_first_name,
                   t.last_name AS tutor_last_name, t.email AS tutor_email
            FROM enrollments e
            LEFT JOIN profiles s ON s.id = e.student_id
            LEFT JOIN profiles t ON t.id = e.tutor_id
            WHERE e.deleted_at IS NULL
              AND e.start_date <= $1
            ORDER BY e.created_at, e.id
            "#,
        )
        .bind(window.last_day())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch enrollments", e))?;

        rows.into_iter().map(row_to_enrollment).collect()
    }
}

fn column_error(column: &str, e: sqlx::Error) -> DomainError {
    DomainError::new(
        ErrorCode::DatabaseError,
        format!("Failed to get {}: {}", column, e),
    )
}

fn row_to_enrollment(row: sqlx::postgres::PgRow) -> Result<Enrollment, DomainError> {
    let id: uuid::Uuid = row.try_get("id").map_err(|e| column_error("id", e))?;
    let start_date: NaiveDate = row
        .try_get("start_date")
        .map_err(|e| column_error("start_date", e))?;
    let duration: f64 = row
        .try_get("duration")
        .map_err(|e| column_error("duration", e))?;
    let availability: serde_json::Value = row
        .try_get("availability")
        .map_err(|e| column_error("availability", e))?;
    let meeting_id: Option<String> = row
        .try_get("meeting_id")
        .map_err(|e| column_error("meeting_id", e))?;
    let summary: String = row
        .try_get("summary")
        .map_err(|e| column_error("summary", e))?;
    let paused: bool = row.try_get("paused").map_err(|e| column_error("paused", e))?;

    let enrollment_id = EnrollmentId::from_uuid(id);

    Ok(Enrollment {
        id: enrollment_id,
        student: profile_from_row(&row, "student")?,
        tutor: profile_from_row(&row, "tutor")?,
        start_date,
        duration,
        availability: decode_availability(&enrollment_id, availability),
        meeting_id,
        summary,
        paused,
    })
}

fn profile_from_row(
    row: &sqlx::postgres::PgRow,
    prefix: &str,
) -> Result<Option<ProfileRef>, DomainError> {
    let id_column = format!("{}_id", prefix);
    let id: Option<uuid::Uuid> = row
        .try_get(id_column.as_str())
        .map_err(|e| column_error(&id_column, e))?;
    let Some(id) = id else {
        return Ok(None);
    };

    let first_column = format!("{}_first_name", prefix);
    let last_column = format!("{}_last_name", prefix);
    let email_column = format!("{}_email", prefix);

    Ok(Some(ProfileRef {
        id: ProfileId::from_uuid(id),
        first_name: row
            .try_get::<Option<String>, _>(first_column.as_str())
            .map_err(|e| column_error(&first_column, e))?
            .unwrap_or_default(),
        last_name: row
            .try_get::<Option<String>, _>(last_column.as_str())
            .map_err(|e| column_error(&last_column, e))?
            .unwrap_or_default(),
        email: row
            .try_get(email_column.as_str())
            .map_err(|e| column_error(&email_column, e))?,
    }))
}

/// Decodes the JSONB availability column.
///
/// A malformed value yields no slots; the expander then skips the
/// enrollment instead of the whole read failing.
fn decode_availability(
    enrollment_id: &EnrollmentId,
    value: serde_json::Value,
) -> Vec<AvailabilitySlot> {
    match serde_json::from_value(value) {
        Ok(slots) => slots,
        Err(e) => {
            warn!(
                enrollment_id = %enrollment_id,
                error = %e,
                "Malformed availability, treating as empty"
            );
            Vec::new()
        }
    }
}
