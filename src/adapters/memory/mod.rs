//! In-memory adapters for tests and local development.

mod enrollment_store;
mod session_store;

pub use enrollment_store::InMemoryEnrollmentStore;
pub use session_store::InMemorySessionStore;
