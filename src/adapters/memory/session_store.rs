//! In-memory session store for tests and local development.
//!
//! Implements both the read and write session ports and enforces the same
//! one-session-per-pair-per-minute rule as the database index.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, ProfileId, SessionId, Timestamp};
use crate::domain::scheduling::{ExistingSession, Session, SessionDraft, WeekWindow};
use crate::ports::{SessionReader, SessionRepository};

type SlotKey = (ProfileId, ProfileId, i64);

fn slot_of(student_id: ProfileId, tutor_id: ProfileId, date: &DateTime<Utc>) -> SlotKey {
    (student_id, tutor_id, date.timestamp().div_euclid(60))
}

/// Session store held in memory.
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<Vec<Session>>,
    fail_inserts: AtomicBool,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sessions(sessions: Vec<Session>) -> Self {
        Self {
            sessions: RwLock::new(sessions),
            fail_inserts: AtomicBool::new(false),
        }
    }

    /// Makes every following `insert_batch` fail with a database error.
    pub fn set_fail_inserts(&self, fail: bool) {
        self.fail_inserts.store(fail, Ordering::SeqCst);
    }

    pub async fn sessions(&self) -> Vec<Session> {
        self.sessions.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[async_trait]
impl SessionReader for InMemorySessionStore {
    async fn list_in_window(
        &self,
        window: &WeekWindow,
    ) -> Result<Vec<ExistingSession>, DomainError> {
        // Two days either side always covers the window's whole local days
        let from = *window.start() - Duration::days(2);
        let to = *window.end() + Duration::days(2);

        Ok(self
            .sessions
            .read()
            .await
            .iter()
            .filter(|s| s.date >= from && s.date <= to)
            .map(ExistingSession::from)
            .collect())
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionStore {
    async fn insert_batch(&self, drafts: &[SessionDraft]) -> Result<Vec<Session>, DomainError> {
        if self.fail_inserts.load(Ordering::SeqCst) {
            return Err(DomainError::database(
                "Failed to insert sessions",
                "in-memory store configured to fail",
            ));
        }

        let mut sessions = self.sessions.write().await;

        let mut taken: HashSet<SlotKey> = sessions
            .iter()
            .map(|s| slot_of(s.student_id, s.tutor_id, &s.date))
            .collect();
        for draft in drafts {
            if !taken.insert(slot_of(draft.student_id, draft.tutor_id, &draft.date)) {
                return Err(DomainError::new(
                    ErrorCode::SessionConflict,
                    format!(
                        "Session already exists for {} / {} at {}",
                        draft.student_id,
                        draft.tutor_id,
                        draft.date.to_rfc3339()
                    ),
                ));
            }
        }

        let created_at = Timestamp::now();
        let created: Vec<Session> = drafts
            .iter()
            .cloned()
            .map(|draft| Session::from_draft(SessionId::new(), draft, created_at))
            .collect();
        sessions.extend(created.iter().cloned());

        Ok(created)
    }
}
