//! Session keys and the index of occupied slots.
//!
//! A key is `{studentId}-{tutorId}-{yyyy-MM-dd-HH:mm}` with the timestamp
//! rendered in the reference timezone. Two sessions with the same key book
//! the same pair into the same minute.

use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, Utc};
use tracing::debug;

use super::session::ExistingSession;
use super::time::ReferenceTimezone;
use crate::domain::foundation::ProfileId;

/// Deduplication identity of a session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionKey(String);

impl SessionKey {
    pub fn new(
        student_id: &ProfileId,
        tutor_id: &ProfileId,
        start: &DateTime<Utc>,
        timezone: &ReferenceTimezone,
    ) -> Self {
        Self(format!(
            "{}-{}-{}",
            student_id,
            tutor_id,
            timezone.key_stamp(start)
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Set of occupied slots for one expansion run.
///
/// Seeded from the sessions already in the store, then grown by every draft
/// the run produces.
#[derive(Debug, Clone)]
pub struct SessionKeyIndex {
    timezone: ReferenceTimezone,
    keys: HashSet<SessionKey>,
}

impl SessionKeyIndex {
    /// Empty index.
    pub fn new(timezone: ReferenceTimezone) -> Self {
        Self {
            timezone,
            keys: HashSet::new(),
        }
    }

    /// Index holding one key per complete existing session.
    ///
    /// Rows without a date, student or tutor cannot collide with a generated
    /// session and are left out.
    pub fn from_existing<'a, I>(sessions: I, timezone: ReferenceTimezone) -> Self
    where
        I: IntoIterator<Item = &'a ExistingSession>,
    {
        let mut index = Self::new(timezone);
        for session in sessions {
            match (session.date, session.student_id, session.tutor_id) {
                (Some(date), Some(student_id), Some(tutor_id)) => {
                    let key = index.key_for(&student_id, &tutor_id, &date);
                    index.insert(key);
                }
                _ => debug!(?session, "Ignoring incomplete existing session"),
            }
        }
        index
    }

    /// Key for a pair at an instant, in this index's timezone.
    pub fn key_for(
        &self,
        student_id: &ProfileId,
        tutor_id: &ProfileId,
        start: &DateTime<Utc>,
    ) -> SessionKey {
        SessionKey::new(student_id, tutor_id, start, &self.timezone)
    }

    pub fn contains(&self, key: &SessionKey) -> bool {
        self.keys.contains(key)
    }

    /// Records a key; returns `false` if it was already present.
    pub fn insert(&mut self, key: SessionKey) -> bool {
        self.keys.insert(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn timezone(&self) -> &ReferenceTimezone {
        &self.timezone
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn profile(n: u128) -> ProfileId {
        ProfileId::from_uuid(Uuid::from_u128(n))
    }

    fn utc(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn key_uses_local_minute() {
        let key = SessionKey::new(
            &profile(1),
            &profile(2),
            &utc("2024-03-06T20:00:59Z"),
            &ReferenceTimezone::default(),
        );
        assert_eq!(
            key.as_str(),
            "00000000-0000-0000-0000-000000000001-00000000-0000-0000-0000-000000000002-2024-03-06-15:00"
        );
    }

    #[test]
    fn key_depends_on_reference_timezone() {
        let instant = utc("2024-03-06T20:00:00Z");
        let new_york = SessionKey::new(&profile(1), &profile(2), &instant, &ReferenceTimezone::default());
        let berlin = SessionKey::new(
            &profile(1),
            &profile(2),
            &instant,
            &"Europe/Berlin".parse().unwrap(),
        );
        assert_ne!(new_york, berlin);
        assert!(berlin.as_str().ends_with("2024-03-06-21:00"));
    }

    #[test]
    fn seconds_do_not_split_a_slot() {
        let tz = ReferenceTimezone::default();
        let a = SessionKey::new(&profile(1), &profile(2), &utc("2024-03-06T20:00:00Z"), &tz);
        let b = SessionKey::new(&profile(1), &profile(2), &utc("2024-03-06T20:00:30Z"), &tz);
        assert_eq!(a, b);
    }

    #[test]
    fn from_existing_skips_incomplete_rows() {
        let sessions = vec![
            ExistingSession {
                date: Some(utc("2024-03-06T20:00:00Z")),
                student_id: Some(profile(1)),
                tutor_id: Some(profile(2)),
            },
            ExistingSession {
                date: None,
                student_id: Some(profile(1)),
                tutor_id: Some(profile(2)),
            },
            ExistingSession {
                date: Some(utc("2024-03-07T20:00:00Z")),
                student_id: None,
                tutor_id: Some(profile(2)),
            },
        ];

        let index = SessionKeyIndex::from_existing(&sessions, ReferenceTimezone::default());
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn duplicate_existing_sessions_collapse_to_one_key() {
        let row = ExistingSession {
            date: Some(utc("2024-03-06T20:00:00Z")),
            student_id: Some(profile(1)),
            tutor_id: Some(profile(2)),
        };
        let sessions = vec![row.clone(), row];

        let index = SessionKeyIndex::from_existing(&sessions, ReferenceTimezone::default());
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn insert_reports_new_keys_only() {
        let mut index = SessionKeyIndex::new(ReferenceTimezone::default());
        assert!(index.is_empty());

        let key = index.key_for(&profile(1), &profile(2), &utc("2024-03-06T20:00:00Z"));
        assert!(index.insert(key.clone()));
        assert!(!index.insert(key.clone()));
        assert!(index.contains(&key));
    }
}
