//! ScheduleUpcomingWeekHandler - fills the week after the current one.
//!
//! Entry point for the weekly job and the upcoming-week endpoint. Resolves
//! the window from the injected clock, then delegates to `UpdateWeekHandler`.

use std::sync::Arc;

use chrono::Weekday;
use tracing::debug;

use super::update_week::{UpdateWeekHandler, UpdateWeekResult};
use crate::domain::scheduling::{SchedulingError, WeekWindow};
use crate::ports::Clock;

/// Handler for scheduling the next local week.
pub struct ScheduleUpcomingWeekHandler {
    update_week: Arc<UpdateWeekHandler>,
    clock: Arc<dyn Clock>,
    week_start: Weekday,
}

impl ScheduleUpcomingWeekHandler {
    pub fn new(update_week: Arc<UpdateWeekHandler>, clock: Arc<dyn Clock>, week_start: Weekday) -> Self {
        Self {
            update_week,
            clock,
            week_start,
        }
    }

    /// The window the next run would fill.
    pub fn upcoming_window(&self) -> Result<WeekWindow, SchedulingError> {
        WeekWindow::following(
            self.clock.now(),
            self.week_start,
            self.update_week.expander().timezone(),
        )
    }

    pub async fn handle(&self) -> Result<UpdateWeekResult, SchedulingError> {
        let window = self.upcoming_window()?;
        debug!(
            first_day = %window.first_day(),
            last_day = %window.last_day(),
            "Scheduling upcoming week"
        );
        self.update_week.run(window).await
    }
}
