//! HTTP adapter for scheduling endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{ErrorResponse, HealthResponse, ScheduleWeekResponse, UpdateWeekRequest};
pub use handlers::SchedulingHandlers;
pub use routes::{app_router, scheduling_routes};
