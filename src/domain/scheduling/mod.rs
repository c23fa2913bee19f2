//! Scheduling domain module.
//!
//! Expands weekly enrollments into concrete, dated tutoring sessions.
//!
//! # Building blocks
//!
//! - `ReferenceTimezone` / `ClockTime` - wall-clock parsing and DST-aware localization
//! - `WeekWindow` - validated window of local dates to fill
//! - `SessionKeyIndex` - occupied (student, tutor, minute) slots
//! - `RecurrenceExpander` - the pure expansion pass producing `SessionDraft`s

mod enrollment;
mod errors;
mod expander;
mod session;
mod session_key;
mod time;
mod window;

pub use enrollment::{AvailabilitySlot, Enrollment, ProfileRef};
pub use errors::{SchedulingError, TimeError};
pub use expander::{Expansion, RecurrenceExpander, SkipReason, SkippedOccurrence};
pub use session::{ExistingSession, Session, SessionDraft};
pub use session_key::{SessionKey, SessionKeyIndex};
pub use time::{parse_weekday, ClockTime, ReferenceTimezone, DEFAULT_REFERENCE_TIMEZONE};
pub use window::{WeekWindow, MAX_WINDOW_DAYS};
