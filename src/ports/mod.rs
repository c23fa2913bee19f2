//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the scheduling domain and the outside world. Adapters implement these ports.
//!
//! - `EnrollmentReader` - active enrollments for a window
//! - `SessionReader` - sessions already booked around a window
//! - `SessionRepository` - atomic batch insert of new sessions
//! - `Clock` - injected current time

mod clock;
mod enrollment_reader;
mod session_reader;
mod session_repository;

pub use clock::{Clock, FixedClock, SystemClock};
pub use enrollment_reader::EnrollmentReader;
pub use session_reader::SessionReader;
pub use session_repository::SessionRepository;
