//! HTTP handlers for scheduling endpoints.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{error, warn};

use crate::application::handlers::scheduling::{ScheduleUpcomingWeekHandler, UpdateWeekHandler};
use crate::domain::scheduling::SchedulingError;

use super::dto::{ErrorResponse, HealthResponse, ScheduleWeekResponse, UpdateWeekRequest};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct SchedulingHandlers {
    update_week: Arc<UpdateWeekHandler>,
    upcoming_week: Arc<ScheduleUpcomingWeekHandler>,
}

impl SchedulingHandlers {
    pub fn new(
        update_week: Arc<UpdateWeekHandler>,
        upcoming_week: Arc<ScheduleUpcomingWeekHandler>,
    ) -> Self {
        Self {
            update_week,
            upcoming_week,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/schedule/week - Generate sessions for an explicit window
pub async fn update_week(
    State(handlers): State<SchedulingHandlers>,
    Json(req): Json<UpdateWeekRequest>,
) -> Response {
    let cmd = match req.into_command() {
        Ok(cmd) => cmd,
        Err(e) => return handle_scheduling_error(e),
    };

    match handlers.update_week.handle(cmd).await {
        Ok(result) => (StatusCode::OK, Json(ScheduleWeekResponse::from(&result))).into_response(),
        Err(e) => handle_scheduling_error(e),
    }
}

/// POST /api/schedule/upcoming-week - Generate sessions for next week
pub async fn schedule_upcoming_week(State(handlers): State<SchedulingHandlers>) -> Response {
    match handlers.upcoming_week.handle().await {
        Ok(result) => (StatusCode::OK, Json(ScheduleWeekResponse::from(&result))).into_response(),
        Err(e) => handle_scheduling_error(e),
    }
}

/// GET /health - Liveness probe
pub async fn health(State(handlers): State<SchedulingHandlers>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        timezone: handlers.update_week.expander().timezone().name().to_string(),
    })
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn handle_scheduling_error(error: SchedulingError) -> Response {
    match error {
        SchedulingError::InvalidWindow(msg) => {
            warn!(error = %msg, "Rejected schedule request");
            (StatusCode::BAD_REQUEST, Json(ErrorResponse::bad_request(msg))).into_response()
        }
        SchedulingError::Infrastructure(msg) => {
            error!(error = %msg, "Schedule run failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal(msg)),
            )
                .into_response()
        }
    }
}
