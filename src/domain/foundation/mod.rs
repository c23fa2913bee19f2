//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, the session status enum, timestamps and error types
//! that form the vocabulary of the scheduling domain.

mod errors;
mod ids;
mod session_status;
mod timestamp;

pub use errors::{DomainError, ErrorCode};
pub use ids::{EnrollmentId, ProfileId, SessionId};
pub use session_status::SessionStatus;
pub use timestamp::Timestamp;
