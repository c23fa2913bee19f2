//! HTTP routes for scheduling endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{health, schedule_upcoming_week, update_week, SchedulingHandlers};

/// Creates the scheduling router, mounted under `/api/schedule`.
pub fn scheduling_routes(handlers: SchedulingHandlers) -> Router {
    Router::new()
        .route("/week", post(update_week))
        .route("/upcoming-week", post(schedule_upcoming_week))
        .with_state(handlers)
}

/// Full application router: scheduling API plus health probe.
pub fn app_router(handlers: SchedulingHandlers) -> Router {
    Router::new()
        .route("/health", get(health))
        .with_state(handlers.clone())
        .nest("/api/schedule", scheduling_routes(handlers))
}
