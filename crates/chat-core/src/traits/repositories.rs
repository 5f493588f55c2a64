//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. Every method is a single atomic operation
//! with respect to concurrent callers.

use async_trait::async_trait;

use crate::entities::{Message, MessageQuery, NewMessage, Participant};
use crate::error::DomainError;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Participant Repository (presence store)
// ============================================================================

#[async_trait]
pub trait ParticipantRepository: Send + Sync {
    /// Find a live participant by name
    async fn find_by_name(&self, name: &str) -> RepoResult<Option<Participant>>;

    /// Insert a participant.
    ///
    /// Check-and-insert is atomic: of two concurrent calls with the same name
    /// exactly one succeeds, the other gets `ParticipantAlreadyExists`.
    async fn create(&self, participant: &Participant) -> RepoResult<()>;

    /// Raise `last_seen` to `now_ms` (never lowers it).
    ///
    /// Returns `ParticipantNotFound` if no live participant has that name.
    async fn touch(&self, name: &str, now_ms: i64) -> RepoResult<()>;

    /// Snapshot of all live participants
    async fn list(&self) -> RepoResult<Vec<Participant>>;

    /// Number of live participants
    async fn count(&self) -> RepoResult<i64>;

    /// Remove every participant with `last_seen < cutoff_ms` and return them.
    ///
    /// Selection and removal use the same condition in one step, so a
    /// participant touched after `cutoff_ms` was computed is never removed.
    async fn delete_stale_before(&self, cutoff_ms: i64) -> RepoResult<Vec<Participant>>;
}

// ============================================================================
// Message Repository (message log)
// ============================================================================

#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Append to the log, assigning the next sequence id
    async fn append(&self, message: &NewMessage) -> RepoResult<Message>;

    /// Entries visible to `query.reader`, newest first, truncated to `query.limit`
    async fn find_visible(&self, query: &MessageQuery) -> RepoResult<Vec<Message>>;

    /// Total number of entries in the log
    async fn count(&self) -> RepoResult<i64>;
}
