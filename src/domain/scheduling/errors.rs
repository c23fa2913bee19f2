//! Scheduling error types.

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Errors raised while parsing or resolving wall-clock values.
///
/// These never abort an expansion run on their own; the expander records
/// them as skipped occurrences.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeError {
    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),

    #[error("Malformed clock time '{0}', expected HH:MM")]
    MalformedClockTime(String),

    #[error("Unknown weekday '{0}'")]
    UnknownWeekday(String),

    #[error("Local time {local} does not exist in {timezone}")]
    NonExistentLocalTime {
        local: NaiveDateTime,
        timezone: &'static str,
    },

    #[error("Date out of supported range")]
    DateOutOfRange,
}

/// Errors that fail a whole scheduling run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchedulingError {
    /// The requested window is missing, inverted or too long.
    #[error("Invalid window: {0}")]
    InvalidWindow(String),

    /// A port (reader or batch sink) failed.
    #[error("Infrastructure error: {0}")]
    Infrastructure(String),
}

impl SchedulingError {
    pub fn invalid_window(message: impl Into<String>) -> Self {
        SchedulingError::InvalidWindow(message.into())
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        SchedulingError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            SchedulingError::InvalidWindow(_) => ErrorCode::InvalidWindow,
            SchedulingError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
}

impl From<DomainError> for SchedulingError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::InvalidWindow | ErrorCode::ValidationFailed => {
                SchedulingError::InvalidWindow(err.message)
            }
            _ => SchedulingError::Infrastructure(err.to_string()),
        }
    }
}

impl From<TimeError> for SchedulingError {
    fn from(err: TimeError) -> Self {
        SchedulingError::InvalidWindow(err.to_string())
    }
}
