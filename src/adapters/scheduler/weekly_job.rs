//! WeeklySessionJob - Background service that keeps next week scheduled.
//!
//! Every tick runs `ScheduleUpcomingWeekHandler`. Generation is idempotent,
//! so ticking more often than weekly only fills gaps left by enrollments
//! created since the last run.
//!
//! ## Configuration
//!
//! | Setting | Default | Description |
//! |---------|---------|-------------|
//! | `interval` | 1h | Time between runs |
//!
//! A failed run is logged and retried on the next tick.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::application::handlers::scheduling::{ScheduleUpcomingWeekHandler, UpdateWeekResult};
use crate::domain::scheduling::SchedulingError;

/// Configuration for the WeeklySessionJob service.
#[derive(Debug, Clone)]
pub struct WeeklySessionJobConfig {
    /// How often to run generation.
    pub interval: Duration,
}

impl Default for WeeklySessionJobConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(3600),
        }
    }
}

impl WeeklySessionJobConfig {
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }
}

/// Background job generating the upcoming week's sessions.
pub struct WeeklySessionJob {
    handler: Arc<ScheduleUpcomingWeekHandler>,
    config: WeeklySessionJobConfig,
}

impl WeeklySessionJob {
    pub fn new(handler: Arc<ScheduleUpcomingWeekHandler>) -> Self {
        Self::with_config(handler, WeeklySessionJobConfig::default())
    }

    pub fn with_config(
        handler: Arc<ScheduleUpcomingWeekHandler>,
        config: WeeklySessionJobConfig,
    ) -> Self {
        Self { handler, config }
    }

    /// Run the job loop until shutdown signal is received.
    ///
    /// The first run happens immediately.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        let mut interval = time::interval(self.config.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(interval_secs = self.config.interval.as_secs(), "Weekly session job started");

        loop {
            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        info!("Weekly session job stopping");
                        return;
                    }
                }

                _ = interval.tick() => {
                    if self.run_once().await.is_err() {
                        debug!("Weekly session run failed, retrying on next tick");
                    }
                }
            }
        }
    }

    /// Run exactly one generation pass.
    pub async fn run_once(&self) -> Result<UpdateWeekResult, SchedulingError> {
        match self.handler.handle().await {
            Ok(result) => {
                info!(
                    first_day = %result.window.first_day(),
                    created = result.created.len(),
                    skipped = result.skipped.len(),
                    "Weekly session job run complete"
                );
                Ok(result)
            }
            Err(e) => {
                error!(error = %e, "Weekly session job run failed");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryEnrollmentStore, InMemorySessionStore};
    use crate::application::handlers::scheduling::UpdateWeekHandler;
    use crate::domain::foundation::{EnrollmentId, ProfileId};
    use crate::domain::scheduling::{
        AvailabilitySlot, Enrollment, ProfileRef, RecurrenceExpander, ReferenceTimezone,
    };
    use crate::ports::FixedClock;
    use chrono::{DateTime, NaiveDate, Utc, Weekday};

    fn enrollment() -> Enrollment {
        Enrollment {
            id: EnrollmentId::new(),
            student: Some(ProfileRef::with_id(ProfileId::new())),
            tutor: Some(ProfileRef::with_id(ProfileId::new())),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            duration: 1.0,
            availability: vec![AvailabilitySlot {
                day: "Thursday".to_string(),
                start_time: "17:30".to_string(),
                end_time: "18:30".to_string(),
            }],
            meeting_id: None,
            summary: "Physics".to_string(),
            paused: false,
        }
    }

    fn job(store: Arc<InMemorySessionStore>, interval: Duration) -> WeeklySessionJob {
        let now = DateTime::parse_from_rfc3339("2024-03-01T17:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let update_week = Arc::new(UpdateWeekHandler::new(
            Arc::new(InMemoryEnrollmentStore::with_enrollments(vec![enrollment()])),
            store.clone(),
            store,
            RecurrenceExpander::new(ReferenceTimezone::default()),
        ));
        let handler = Arc::new(ScheduleUpcomingWeekHandler::new(
            update_week,
            Arc::new(FixedClock::new(now)),
            Weekday::Mon,
        ));
        WeeklySessionJob::with_config(
            handler,
            WeeklySessionJobConfig::default().with_interval(interval),
        )
    }

    #[tokio::test]
    async fn run_once_creates_next_week() {
        let store = Arc::new(InMemorySessionStore::new());
        let result = job(store.clone(), Duration::from_secs(60))
            .run_once()
            .await
            .unwrap();

        assert_eq!(result.created.len(), 1);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn run_once_reports_failure() {
        let store = Arc::new(InMemorySessionStore::new());
        store.set_fail_inserts(true);

        let result = job(store.clone(), Duration::from_secs(60)).run_once().await;

        assert!(matches!(result, Err(SchedulingError::Infrastructure(_))));
    }

    #[tokio::test]
    async fn loop_survives_failures_and_stops_on_shutdown() {
        let store = Arc::new(InMemorySessionStore::new());
        store.set_fail_inserts(true);
        let job = job(store.clone(), Duration::from_millis(10));

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let handle = tokio::spawn(async move { job.run(shutdown_rx).await });

        tokio::time::sleep(Duration::from_millis(30)).await;
        store.set_fail_inserts(false);
        tokio::time::sleep(Duration::from_millis(50)).await;

        shutdown_tx.send(true).unwrap();
        handle.await.unwrap();

        // Later ticks succeeded once inserts recovered, without duplicating
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn config_defaults_to_hourly() {
        let config = WeeklySessionJobConfig::default();
        assert_eq!(config.interval, Duration::from_secs(3600));
    }
}
