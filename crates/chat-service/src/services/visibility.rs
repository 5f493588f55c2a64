//! Visibility service
//!
//! Serves each reader the entries of the message log they may see.

use chat_core::entities::MessageQuery;
use chat_core::value_objects::MessageLimit;
use tracing::instrument;

use crate::dto::MessageResponse;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Visibility service
pub struct VisibilityService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> VisibilityService<'a> {
    /// Create a new VisibilityService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Messages visible to `reader`, newest first, at most `limit` of them
    #[instrument(skip(self))]
    pub async fn query_messages(
        &self,
        reader: Option<&str>,
        limit: MessageLimit,
    ) -> ServiceResult<Vec<MessageResponse>> {
        let reader = reader.ok_or(ServiceError::MissingReader)?;

        let query = MessageQuery::new(reader, self.ctx.broadcast_target()).with_limit(limit);
        let messages = self.ctx.message_repo().find_visible(&query).await?;

        Ok(messages.into_iter().map(MessageResponse::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chat_common::PresenceConfig;
    use chat_core::{ManualClock, MessageKind, NewMessage};

    use super::*;

    async fn context_with_log(entries: &[(&str, &str, MessageKind)]) -> ServiceContext {
        let ctx = ServiceContext::in_memory(Arc::new(ManualClock::new(0)), PresenceConfig::default());
        for (i, (from, to, kind)) in entries.iter().enumerate() {
            ctx.message_repo()
                .append(&NewMessage::new(*from, *to, i.to_string(), *kind, "10:00:00"))
                .await
                .unwrap();
        }
        ctx
    }

    fn texts(messages: &[MessageResponse]) -> Vec<&str> {
        messages.iter().map(|m| m.text.as_str()).collect()
    }

    #[tokio::test]
    async fn test_private_messages_do_not_leak() {
        let ctx = context_with_log(&[
            ("Ana", "Bia", MessageKind::PrivateMessage),
            ("Ana", "Todos", MessageKind::Message),
        ])
        .await;
        let service = VisibilityService::new(&ctx);

        let for_ana = service.query_messages(Some("Ana"), MessageLimit::UNBOUNDED).await.unwrap();
        let for_bia = service.query_messages(Some("Bia"), MessageLimit::UNBOUNDED).await.unwrap();
        let for_caio = service.query_messages(Some("Caio"), MessageLimit::UNBOUNDED).await.unwrap();

        assert_eq!(texts(&for_ana), vec!["1", "0"]);
        assert_eq!(texts(&for_bia), vec!["1", "0"]);
        assert_eq!(texts(&for_caio), vec!["1"]);
    }

    #[tokio::test]
    async fn test_limit_returns_most_recent_first() {
        let ctx = context_with_log(&[("Ana", "Todos", MessageKind::Message); 5]).await;

        let page = VisibilityService::new(&ctx)
            .query_messages(Some("Bia"), MessageLimit::new(2))
            .await
            .unwrap();
        assert_eq!(texts(&page), vec!["4", "3"]);
    }

    #[tokio::test]
    async fn test_status_messages_are_public() {
        let ctx = context_with_log(&[("Ana", "Todos", MessageKind::Status)]).await;
        let seen = VisibilityService::new(&ctx)
            .query_messages(Some("Caio"), MessageLimit::UNBOUNDED)
            .await
            .unwrap();
        assert_eq!(seen.len(), 1);
    }

    #[tokio::test]
    async fn test_missing_reader_is_validation_error() {
        let ctx = context_with_log(&[]).await;
        let err = VisibilityService::new(&ctx)
            .query_messages(None, MessageLimit::UNBOUNDED)
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 422);
    }
}
