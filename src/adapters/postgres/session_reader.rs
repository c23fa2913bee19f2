//! PostgreSQL implementation of SessionReader.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use sqlx::{PgPool, Row};

use crate::domain::foundation::{DomainError, ProfileId};
use crate::domain::scheduling::{ExistingSession, ReferenceTimezone, WeekWindow};
use crate::ports::SessionReader;

/// PostgreSQL implementation of SessionReader.
///
/// Reads from one day before the window's first local midnight to one day
/// after its last local day ends, so sessions near the edges still seed the
/// key index.
#[derive(Clone)]
pub struct PostgresSessionReader {
    pool: PgPool,
    timezone: ReferenceTimezone,
}

impl PostgresSessionReader {
    pub fn new(pool: PgPool, timezone: ReferenceTimezone) -> Self {
        Self { pool, timezone }
    }

    fn padded_bounds(
        &self,
        window: &WeekWindow,
    ) -> Result<(DateTime<Utc>, DateTime<Utc>), DomainError> {
        padded_bounds(window, &self.timezone)
    }
}

fn padded_bounds(
    window: &WeekWindow,
    timezone: &ReferenceTimezone,
) -> Result<(DateTime<Utc>, DateTime<Utc>), DomainError> {
    let from = timezone
        .start_of_day(window.first_day())
        .map_err(|e| DomainError::database("Failed to resolve window start", e))?;
    let to = timezone
        .end_of_day(window.last_day())
        .map_err(|e| DomainError::database("Failed to resolve window end", e))?;
    Ok((from - Duration::days(1), to + Duration::days(1)))
}

#[async_trait]
impl SessionReader for PostgresSessionReader {
    async fn list_in_window(
        &self,
        window: &WeekWindow,
    ) -> Result<Vec<ExistingSession>, DomainError> {
        let (from, to) = self.padded_bounds(window)?;

        let rows = sqlx::query(
            r#"
            SELECT starts_at, student_id, tutor_id
            FROM sessions
            WHERE starts_at BETWEEN $1 AND $2
            "#,
        )
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch sessions", e))?;

        rows.into_iter()
            .map(|row| {
                let starts_at: Option<DateTime<Utc>> = row
                    .try_get("starts_at")
                    .map_err(|e| DomainError::database("Failed to get starts_at", e))?;
                let student_id: Option<uuid::Uuid> = row
                    .try_get("student_id")
                    .map_err(|e| DomainError::database("Failed to get student_id", e))?;
                let tutor_id: Option<uuid::Uuid> = row
                    .try_get("tutor_id")
                    .map_err(|e| DomainError::database("Failed to get tutor_id", e))?;

                Ok(ExistingSession {
                    date: starts_at,
                    student_id: student_id.map(ProfileId::from_uuid),
                    tutor_id: tutor_id.map(ProfileId::from_uuid),
                })
            })
            .collect()
    }
}
