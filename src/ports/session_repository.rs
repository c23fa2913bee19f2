//! Session repository port (write side).
//!
//! Persists the drafts produced by a scheduling run.

use crate::domain::foundation::DomainError;
use crate::domain::scheduling::{Session, SessionDraft};
use async_trait::async_trait;

/// Batch persistence sink for session drafts.
///
/// Implementations must ensure:
/// - The batch is committed as a whole or not at all
/// - Returned sessions are in draft order, with store-assigned `id` and `created_at`
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Insert all drafts.
    ///
    /// # Errors
    ///
    /// - `SessionConflict` if a slot uniqueness constraint rejects a draft
    /// - `DatabaseError` on persistence failure
    async fn insert_batch(&self, drafts: &[SessionDraft]) -> Result<Vec<Session>, DomainError>;
}
