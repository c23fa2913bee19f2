//! Enrollment reader port.
//!
//! Supplies the enrollments a scheduling run expands.

use crate::domain::foundation::DomainError;
use crate::domain::scheduling::{Enrollment, WeekWindow};
use async_trait::async_trait;

/// Reader port for active enrollments.
#[async_trait]
pub trait EnrollmentReader: Send + Sync {
    /// List active, non-deleted enrollments whose validity overlaps the window.
    ///
    /// Paused enrollments may be included; the expander filters them.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on read failure
    async fn list_active(&self, window: &WeekWindow) -> Result<Vec<Enrollment>, DomainError>;
}
