//! Presence service
//!
//! Registration, heartbeats and the live participant list.

use chat_core::entities::{NewMessage, Participant};
use tracing::{info, instrument};

use crate::dto::{ParticipantResponse, RegisterParticipantRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Text of the status message appended when someone joins
pub const JOIN_TEXT: &str = "entra na sala...";

/// Presence service
pub struct PresenceService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PresenceService<'a> {
    /// Create a new PresenceService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a participant and announce the arrival.
    ///
    /// The request is expected to be validated already.
    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn register(
        &self,
        request: RegisterParticipantRequest,
    ) -> ServiceResult<ParticipantResponse> {
        let participant = Participant::new(request.name, self.ctx.now_ms());
        self.ctx.participant_repo().create(&participant).await?;

        // The record stays even if the announcement fails.
        let announcement = NewMessage::status(
            &participant.name,
            self.ctx.broadcast_target(),
            JOIN_TEXT,
            self.ctx.time_of_day(),
        );
        self.ctx.message_repo().append(&announcement).await?;

        info!(name = %participant.name, "Participant registered");

        Ok(ParticipantResponse::from(participant))
    }

    /// Refresh the caller's `last_seen`.
    ///
    /// A missing identity is reported the same way as an unknown name.
    #[instrument(skip(self))]
    pub async fn heartbeat(&self, caller: Option<&str>) -> ServiceResult<()> {
        let name = caller.ok_or(ServiceError::AnonymousHeartbeat)?;
        self.ctx
            .participant_repo()
            .touch(name, self.ctx.now_ms())
            .await?;
        Ok(())
    }

    /// Snapshot of live participants
    #[instrument(skip(self))]
    pub async fn list_participants(&self) -> ServiceResult<Vec<ParticipantResponse>> {
        let participants = self.ctx.participant_repo().list().await?;
        Ok(participants.into_iter().map(ParticipantResponse::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use chat_common::PresenceConfig;
    use chat_core::{ManualClock, MessageQuery, MessageKind};

    use super::*;

    fn context(clock: Arc<ManualClock>) -> ServiceContext {
        ServiceContext::in_memory(clock, PresenceConfig::default())
    }

    fn register_request(name: &str) -> RegisterParticipantRequest {
        RegisterParticipantRequest {
            name: name.to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_creates_participant_and_announces() {
        let clock = Arc::new(ManualClock::new(1_000));
        let ctx = context(clock);
        let service = PresenceService::new(&ctx);

        let response = service.register(register_request("Ana")).await.unwrap();
        assert_eq!(response.name, "Ana");
        assert_eq!(response.last_status, 1_000);

        let log = ctx
            .message_repo()
            .find_visible(&MessageQuery::new("Bia", "Todos"))
            .await
            .unwrap();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].kind, MessageKind::Status);
        assert_eq!(log[0].text, JOIN_TEXT);
        assert_eq!(log[0].to, "Todos");
    }

    #[tokio::test]
    async fn test_duplicate_register_is_conflict() {
        let ctx = context(Arc::new(ManualClock::new(1_000)));
        let service = PresenceService::new(&ctx);

        service.register(register_request("Ana")).await.unwrap();
        let err = service.register(register_request("Ana")).await.unwrap_err();

        assert_eq!(err.status_code(), 409);
        assert_eq!(ctx.participant_repo().count().await.unwrap(), 1);
        // Only the first registration was announced.
        assert_eq!(ctx.message_repo().count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_heartbeat_updates_last_seen() {
        let clock = Arc::new(ManualClock::new(1_000));
        let ctx = context(clock.clone());
        let service = PresenceService::new(&ctx);
        service.register(register_request("Ana")).await.unwrap();

        clock.advance(Duration::from_secs(5));
        service.heartbeat(Some("Ana")).await.unwrap();

        let ana = ctx.participant_repo().find_by_name("Ana").await.unwrap().unwrap();
        assert_eq!(ana.last_seen, 6_000);
    }

    #[tokio::test]
    async fn test_heartbeat_unknown_leaves_store_unchanged() {
        let ctx = context(Arc::new(ManualClock::new(1_000)));
        let service = PresenceService::new(&ctx);

        let err = service.heartbeat(Some("Ghost")).await.unwrap_err();
        assert_eq!(err.status_code(), 404);
        assert_eq!(ctx.participant_repo().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_heartbeat_without_identity_is_not_found() {
        let ctx = context(Arc::new(ManualClock::new(1_000)));
        let err = PresenceService::new(&ctx).heartbeat(None).await.unwrap_err();
        assert_eq!(err.status_code(), 404);
    }

    #[tokio::test]
    async fn test_list_participants() {
        let ctx = context(Arc::new(ManualClock::new(1_000)));
        let service = PresenceService::new(&ctx);
        service.register(register_request("Bia")).await.unwrap();
        service.register(register_request("Ana")).await.unwrap();

        let names: Vec<_> = service
            .list_participants()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Ana", "Bia"]);
    }
}
