//! PostgreSQL implementation of SessionRepository.
//!
//! Inserts a generated batch inside one transaction.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::warn;

use crate::domain::foundation::{DomainError, ErrorCode, SessionId, Timestamp};
use crate::domain::scheduling::{Session, SessionDraft};
use crate::ports::SessionRepository;

/// PostgreSQL implementation of SessionRepository.
#[derive(Clone)]
pub struct PostgresSessionRepository {
    pool: PgPool,
}

impl PostgresSessionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionRepository for PostgresSessionRepository {
    async fn insert_batch(&self, drafts: &[SessionDraft]) -> Result<Vec<Session>, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::database("Failed to begin transaction", e))?;

        let created_at = Timestamp::now();
        let mut created = Vec::with_capacity(drafts.len());

        for draft in drafts {
            let session = Session::from_draft(SessionId::new(), draft.clone(), created_at);

            let result = sqlx::query(
                r#"
                INSERT INTO sessions (
                    id, enrollment_id, starts_at, student_id, tutor_id,
                    status, summary, meeting_id, duration, created_at
                ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                "#,
            )
            .bind(session.id.as_uuid())
            .bind(session.enrollment_id.as_uuid())
            .bind(session.date)
            .bind(session.student_id.as_uuid())
            .bind(session.tutor_id.as_uuid())
            .bind(session.status.as_str())
            .bind(&session.summary)
            .bind(&session.meeting_id)
            .bind(session.duration)
            .bind(session.created_at.as_datetime())
            .execute(&mut *tx)
            .await;

            match result {
                Ok(_) => created.push(session),
                // Dropping the transaction rolls back the rows inserted so far
                Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                    warn!(
                        student_id = %session.student_id,
                        tutor_id = %session.tutor_id,
                        date = %session.date,
                        "Session slot taken by a concurrent run"
                    );
                    return Err(DomainError::new(
                        ErrorCode::SessionConflict,
                        format!(
                            "Session already exists for {} / {} at {}",
                            session.student_id,
                            session.tutor_id,
                            session.date.to_rfc3339()
                        ),
                    ));
                }
                Err(e) => return Err(DomainError::database("Failed to insert session", e)),
            }
        }

        tx.commit()
            .await
            .map_err(|e| DomainError::database("Failed to commit transaction", e))?;

        Ok(created)
    }
}
