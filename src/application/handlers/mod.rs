//! Application handlers.
//!
//! Command handlers that orchestrate domain operations.

pub mod scheduling;

pub use scheduling::{
    ScheduleUpcomingWeekHandler, UpdateWeekCommand, UpdateWeekHandler, UpdateWeekResult,
};
