//! SessionStatus enum for tracking the lifecycle of a tutoring session.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a tutoring session.
///
/// Generated sessions always start as `Active`; the other states are set by
/// session-management actions outside this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SessionStatus {
    #[default]
    Active,
    Complete,
    Cancelled,
    Rescheduled,
}

impl SessionStatus {
    /// Returns the canonical stored name ("Active", "Complete", ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Active => "Active",
            SessionStatus::Complete => "Complete",
            SessionStatus::Cancelled => "Cancelled",
            SessionStatus::Rescheduled => "Rescheduled",
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
