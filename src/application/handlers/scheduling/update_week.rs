//! UpdateWeekHandler - Command handler that fills a window with sessions.
//!
//! Reads enrollments and already-booked sessions, runs the recurrence
//! expander and persists the resulting drafts as one batch.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{error, info};

use crate::domain::scheduling::{
    RecurrenceExpander, SchedulingError, Session, SkippedOccurrence, WeekWindow,
};
use crate::ports::{EnrollmentReader, SessionReader, SessionRepository};

/// Command to generate sessions for a window.
#[derive(Debug, Clone)]
pub struct UpdateWeekCommand {
    pub week_start: DateTime<Utc>,
    pub week_end: DateTime<Utc>,
}

/// Result of a successful run.
#[derive(Debug, Clone)]
pub struct UpdateWeekResult {
    pub window: WeekWindow,
    pub created: Vec<Session>,
    pub skipped: Vec<SkippedOccurrence>,
}

/// Handler for generating a window's sessions.
pub struct UpdateWeekHandler {
    enrollment_reader: Arc<dyn EnrollmentReader>,
    session_reader: Arc<dyn SessionReader>,
    repository: Arc<dyn SessionRepository>,
    expander: RecurrenceExpander,
}

impl UpdateWeekHandler {
    pub fn new(
        enrollment_reader: Arc<dyn EnrollmentReader>,
        session_reader: Arc<dyn SessionReader>,
        repository: Arc<dyn SessionRepository>,
        expander: RecurrenceExpander,
    ) -> Self {
        Self {
            enrollment_reader,
            session_reader,
            repository,
            expander,
        }
    }

    pub fn expander(&self) -> &RecurrenceExpander {
        &self.expander
    }

    pub async fn handle(&self, cmd: UpdateWeekCommand) -> Result<UpdateWeekResult, SchedulingError> {
        // 1. Validate the window before touching any port
        let window = WeekWindow::new(cmd.week_start, cmd.week_end, self.expander.timezone())?;

        self.run(window).await
    }

    /// Fills an already validated window.
    pub async fn run(&self, window: WeekWindow) -> Result<UpdateWeekResult, SchedulingError> {
        // 2. Snapshot enrollments and booked sessions
        let enrollments = self.enrollment_reader.list_active(&window).await?;
        let existing = self.session_reader.list_in_window(&window).await?;

        // 3. Expand
        let expansion = self.expander.expand(&window, &enrollments, &existing);

        // 4. Persist the batch (all or nothing)
        let created = if expansion.drafts.is_empty() {
            Vec::new()
        } else {
            self.repository
                .insert_batch(&expansion.drafts)
                .await
                .map_err(|e| {
                    error!(
                        error = %e,
                        drafts = expansion.drafts.len(),
                        "Failed to persist generated sessions"
                    );
                    SchedulingError::from(e)
                })?
        };

        info!(
            first_day = %window.first_day(),
            last_day = %window.last_day(),
            enrollments = enrollments.len(),
            existing = existing.len(),
            created = created.len(),
            skipped = expansion.skipped.len(),
            "Week sessions updated"
        );

        Ok(UpdateWeekResult {
            window,
            created,
            skipped: expansion.skipped,
        })
    }
}
