//! Scheduling command handlers.

mod schedule_upcoming_week;
mod update_week;

pub use schedule_upcoming_week::ScheduleUpcomingWeekHandler;
pub use update_week::{UpdateWeekCommand, UpdateWeekHandler, UpdateWeekResult};
