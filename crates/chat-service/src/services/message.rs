//! Message service
//!
//! Validates senders and appends user messages to the log.

use chat_core::entities::NewMessage;
use chat_core::value_objects::MessageKind;
use chat_core::DomainError;
use tracing::{debug, instrument};

use crate::dto::{CreateMessageRequest, MessageResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Message service
pub struct MessageService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MessageService<'a> {
    /// Create a new MessageService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Append a message from `sender`.
    ///
    /// The sender must be a live participant. Posting does not count as a
    /// heartbeat.
    #[instrument(skip(self, request), fields(to = %request.to, kind = %request.kind))]
    pub async fn post_message(
        &self,
        sender: Option<&str>,
        request: CreateMessageRequest,
    ) -> ServiceResult<MessageResponse> {
        let kind: MessageKind = request.kind.parse()?;

        let sender = sender.unwrap_or_default();
        if self
            .ctx
            .participant_repo()
            .find_by_name(sender)
            .await?
            .is_none()
        {
            return Err(DomainError::UnknownSender(sender.to_string()).into());
        }

        let message = NewMessage::new(sender, request.to, request.text, kind, self.ctx.time_of_day());
        let stored = self.ctx.message_repo().append(&message).await?;

        debug!(id = stored.id, from = %stored.from, "Message appended");

        Ok(MessageResponse::from(stored))
    }
}
