//! Session records produced by the expander.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{EnrollmentId, ProfileId, SessionId, SessionStatus, Timestamp};

/// A session the expander wants created, not yet persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionDraft {
    pub enrollment_id: EnrollmentId,
    /// Absolute start instant.
    pub date: DateTime<Utc>,
    pub student_id: ProfileId,
    pub tutor_id: ProfileId,
    pub status: SessionStatus,
    pub summary: String,
    pub meeting_id: Option<String>,
    /// Length in hours.
    pub duration: f64,
}

/// A persisted session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: SessionId,
    pub enrollment_id: EnrollmentId,
    pub date: DateTime<Utc>,
    pub student_id: ProfileId,
    pub tutor_id: ProfileId,
    pub status: SessionStatus,
    pub summary: String,
    pub meeting_id: Option<String>,
    pub duration: f64,
    pub created_at: Timestamp,
}

impl Session {
    /// Materializes a draft with store-assigned identity.
    pub fn from_draft(id: SessionId, draft: SessionDraft, created_at: Timestamp) -> Self {
        Self {
            id,
            enrollment_id: draft.enrollment_id,
            date: draft.date,
            student_id: draft.student_id,
            tutor_id: draft.tutor_id,
            status: draft.status,
            summary: draft.summary,
            meeting_id: draft.meeting_id,
            duration: draft.duration,
            created_at,
        }
    }
}

/// The slice of an already-scheduled session needed for deduplication.
///
/// Fields are optional because the rows come from a loosely validated store;
/// incomplete rows are ignored when the key index is built.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExistingSession {
    pub date: Option<DateTime<Utc>>,
    pub student_id: Option<ProfileId>,
    pub tutor_id: Option<ProfileId>,
}

impl From<&Session> for ExistingSession {
    fn from(session: &Session) -> Self {
        Self {
            date: Some(session.date),
            student_id: Some(session.student_id),
            tutor_id: Some(session.tutor_id),
        }
    }
}

impl From<&SessionDraft> for ExistingSession {
    fn from(draft: &SessionDraft) -> Self {
        Self {
            date: Some(draft.date),
            student_id: Some(draft.student_id),
            tutor_id: Some(draft.tutor_id),
        }
    }
}
