//! Session reader port (read side).
//!
//! Supplies the sessions already booked around a window. The result only
//! seeds the deduplication index, so readers may return a superset.

use crate::domain::foundation::DomainError;
use crate::domain::scheduling::{ExistingSession, WeekWindow};
use async_trait::async_trait;

/// Reader port for existing sessions.
#[async_trait]
pub trait SessionReader: Send + Sync {
    /// List sessions starting within (or near) the window.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on read failure
    async fn list_in_window(&self, window: &WeekWindow)
        -> Result<Vec<ExistingSession>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Trait object safety test
    #[test]
    fn session_reader_is_object_safe() {
        fn _accepts_dyn(_reader: &dyn SessionReader) {}
    }
}
