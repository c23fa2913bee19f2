//! Background scheduling services.

mod weekly_job;

pub use weekly_job::{WeeklySessionJob, WeeklySessionJobConfig};
