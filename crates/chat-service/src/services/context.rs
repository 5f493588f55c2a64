//! Service context - dependency container for services
//!
//! Holds the presence store, the message log, the clock and presence settings.
//! Built once at startup and shared behind an `Arc`.

use std::sync::Arc;

use chat_common::PresenceConfig;
use chat_core::traits::{Clock, MessageRepository, ParticipantRepository, SystemClock};
use chat_db::{MemMessageRepository, MemParticipantRepository};

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// It provides access to:
/// - Presence store and message log repositories
/// - The time source
/// - Presence settings (broadcast target, inactivity threshold)
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    participant_repo: Arc<dyn ParticipantRepository>,
    message_repo: Arc<dyn MessageRepository>,

    // Time
    clock: Arc<dyn Clock>,

    presence: PresenceConfig,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        participant_repo: Arc<dyn ParticipantRepository>,
        message_repo: Arc<dyn MessageRepository>,
        clock: Arc<dyn Clock>,
        presence: PresenceConfig,
    ) -> Self {
        Self {
            participant_repo,
            message_repo,
            clock,
            presence,
        }
    }

    /// Context backed by fresh in-memory repositories
    pub fn in_memory(clock: Arc<dyn Clock>, presence: PresenceConfig) -> Self {
        Self::new(
            Arc::new(MemParticipantRepository::new()),
            Arc::new(MemMessageRepository::new()),
            clock,
            presence,
        )
    }

    // === Repositories ===

    /// Get the participant repository (presence store)
    pub fn participant_repo(&self) -> &dyn ParticipantRepository {
        self.participant_repo.as_ref()
    }

    /// Get the message repository (message log)
    pub fn message_repo(&self) -> &dyn MessageRepository {
        self.message_repo.as_ref()
    }

    // === Time ===

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Current time in milliseconds since the epoch
    pub fn now_ms(&self) -> i64 {
        self.clock.now_ms()
    }

    /// Current wall-clock time formatted for the message `time` field
    pub fn time_of_day(&self) -> String {
        self.clock.time_of_day()
    }

    // === Settings ===

    pub fn presence_config(&self) -> &PresenceConfig {
        &self.presence
    }

    /// Recipient name that addresses every participant
    pub fn broadcast_target(&self) -> &str {
        &self.presence.broadcast_target
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("presence", &self.presence)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
pub struct ServiceContextBuilder {
    participant_repo: Option<Arc<dyn ParticipantRepository>>,
    message_repo: Option<Arc<dyn MessageRepository>>,
    clock: Option<Arc<dyn Clock>>,
    presence: PresenceConfig,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self {
            participant_repo: None,
            message_repo: None,
            clock: None,
            presence: PresenceConfig::default(),
        }
    }

    pub fn participant_repo(mut self, repo: Arc<dyn ParticipantRepository>) -> Self {
        self.participant_repo = Some(repo);
        self
    }

    pub fn message_repo(mut self, repo: Arc<dyn MessageRepository>) -> Self {
        self.message_repo = Some(repo);
        self
    }

    /// Override the time source (defaults to the system clock)
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn presence(mut self, presence: PresenceConfig) -> Self {
        self.presence = presence;
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::MissingDependency` if a repository is missing
    pub fn build(self) -> super::error::ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.participant_repo
                .ok_or(super::error::ServiceError::MissingDependency("participant_repo"))?,
            self.message_repo
                .ok_or(super::error::ServiceError::MissingDependency("message_repo"))?,
            self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
            self.presence,
        ))
    }
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
