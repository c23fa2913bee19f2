//! HTTP DTOs for scheduling endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::handlers::scheduling::{UpdateWeekCommand, UpdateWeekResult};
use crate::domain::scheduling::SchedulingError;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to generate sessions for a window.
///
/// Bounds are RFC 3339 strings; both are required.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateWeekRequest {
    #[serde(default)]
    pub week_start: Option<String>,
    #[serde(default)]
    pub week_end: Option<String>,
}

impl UpdateWeekRequest {
    pub fn into_command(self) -> Result<UpdateWeekCommand, SchedulingError> {
        Ok(UpdateWeekCommand {
            week_start: parse_bound("week_start", self.week_start)?,
            week_end: parse_bound("week_end", self.week_end)?,
        })
    }
}

fn parse_bound(field: &str, value: Option<String>) -> Result<DateTime<Utc>, SchedulingError> {
    let raw = value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| SchedulingError::invalid_window(format!("{} is required", field)))?;

    DateTime::parse_from_rfc3339(raw.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            SchedulingError::invalid_window(format!("{} is not an RFC 3339 timestamp: {}", field, e))
        })
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Outcome of a generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleWeekResponse {
    pub created: usize,
    pub skipped: usize,
    pub window_start: String,
    pub window_end: String,
}

impl From<&UpdateWeekResult> for ScheduleWeekResponse {
    fn from(result: &UpdateWeekResult) -> Self {
        Self {
            created: result.created.len(),
            skipped: result.skipped.len(),
            window_start: result.window.start().to_rfc3339(),
            window_end: result.window.end().to_rfc3339(),
        }
    }
}

/// Liveness probe body.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timezone: String,
}

/// Standard error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: "INTERNAL_ERROR".to_string(),
            message: message.into(),
        }
    }
}
