//! In-memory EnrollmentReader for tests and local development.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::foundation::DomainError;
use crate::domain::scheduling::{Enrollment, WeekWindow};
use crate::ports::EnrollmentReader;

/// Enrollment source held in memory.
///
/// Mirrors the PostgreSQL reader: enrollments starting after the window's
/// last day are left out, everything else (paused included) is returned in
/// insertion order.
#[derive(Default)]
pub struct InMemoryEnrollmentStore {
    enrollments: RwLock<Vec<Enrollment>>,
}

impl InMemoryEnrollmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_enrollments(enrollments: Vec<Enrollment>) -> Self {
        Self {
            enrollments: RwLock::new(enrollments),
        }
    }

    pub async fn add(&self, enrollment: Enrollment) {
        self.enrollments.write().await.push(enrollment);
    }

    pub async fn len(&self) -> usize {
        self.enrollments.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.enrollments.read().await.is_empty()
    }
}

#[async_trait]
impl EnrollmentReader for InMemoryEnrollmentStore {
    async fn list_active(&self, window: &WeekWindow) -> Result<Vec<Enrollment>, DomainError> {
        Ok(self
            .enrollments
            .read()
            .await
            .iter()
            .filter(|e| e.start_date <= window.last_day())
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::EnrollmentId;
    use crate::domain::scheduling::ReferenceTimezone;
    use chrono::{DateTime, NaiveDate, Utc};

    fn enrollment(start_date: NaiveDate) -> Enrollment {
        Enrollment {
            id: EnrollmentId::new(),
            student: None,
            tutor: None,
            start_date,
            duration: 1.0,
            availability: Vec::new(),
            meeting_id: None,
            summary: String::new(),
            paused: true,
        }
    }

    fn march_week() -> WeekWindow {
        let utc = |s: &str| DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc);
        WeekWindow::new(
            utc("2024-03-04T05:00:00Z"),
            utc("2024-03-11T03:59:00Z"),
            &ReferenceTimezone::default(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn future_enrollments_are_left_out() {
        let store = InMemoryEnrollmentStore::with_enrollments(vec![
            enrollment(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()),
            enrollment(NaiveDate::from_ymd_opt(2024, 4, 1).unwrap()),
        ]);

        let listed = store.list_active(&march_week()).await.unwrap();

        assert_eq!(listed.len(), 1);
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn paused_enrollments_are_still_listed() {
        let store = InMemoryEnrollmentStore::new();
        assert!(store.is_empty().await);
        store
            .add(enrollment(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()))
            .await;

        let listed = store.list_active(&march_week()).await.unwrap();
        assert!(listed[0].paused);
    }
}
