//! PostgreSQL adapters - Database implementations for the scheduling ports.
//!
//! - `PostgresEnrollmentReader` - enrollments joined with their profiles
//! - `PostgresSessionReader` - existing sessions around a window
//! - `PostgresSessionRepository` - transactional batch insert

mod enrollment_reader;
mod session_reader;
mod session_repository;

pub use enrollment_reader::PostgresEnrollmentReader;
pub use session_reader::PostgresSessionReader;
pub use session_repository::PostgresSessionRepository;

use sqlx::migrate::Migrator;

/// Embedded schema migrations.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");
