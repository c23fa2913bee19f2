//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the scheduling core to external systems:
//! - `postgres` - PostgreSQL readers and the batch session repository
//! - `memory` - in-memory stores for tests and local development
//! - `http` - axum endpoints for on-demand generation
//! - `scheduler` - the background weekly job

pub mod http;
pub mod memory;
pub mod postgres;
pub mod scheduler;

pub use memory::{InMemoryEnrollmentStore, InMemorySessionStore};
pub use postgres::{PostgresEnrollmentReader, PostgresSessionReader, PostgresSessionRepository};
pub use scheduler::{WeeklySessionJob, WeeklySessionJobConfig};
