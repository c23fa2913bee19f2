//! HTTP adapters - REST API implementations.

pub mod middleware;
pub mod scheduling;

pub use middleware::with_middleware;
pub use scheduling::{app_router, scheduling_routes, SchedulingHandlers};
