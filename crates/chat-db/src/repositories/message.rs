//! PostgreSQL implementation of MessageRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use chat_core::entities::{Message, MessageQuery, NewMessage};
use chat_core::traits::{MessageRepository, RepoResult};

use crate::mappers::MessageInsert;
use crate::models::MessageModel;

use super::error::map_db_error;

/// PostgreSQL implementation of MessageRepository
#[derive(Clone)]
pub struct PgMessageRepository {
    pool: PgPool,
}

impl PgMessageRepository {
    /// Create a new PgMessageRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MessageRepository for PgMessageRepository {
    #[instrument(skip(self, message), fields(from = %message.from, kind = %message.kind))]
    async fn append(&self, message: &NewMessage) -> RepoResult<Message> {
        let insert = MessageInsert::new(message);

        let model = sqlx::query_as::<_, MessageModel>(
            r#"
            INSERT INTO messages (sender, recipient, body, kind, time)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, sender, recipient, body, kind, time
            "#,
        )
        .bind(insert.sender)
        .bind(insert.recipient)
        .bind(insert.body)
        .bind(insert.kind)
        .bind(insert.time)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Message::try_from(model)
    }

    #[instrument(skip(self))]
    async fn find_visible(&self, query: &MessageQuery) -> RepoResult<Vec<Message>> {
        // LIMIT NULL means no limit in PostgreSQL.
        let limit = query.limit.get().map(i64::from);

        let results = sqlx::query_as::<_, MessageModel>(
            r#"
            SELECT id, sender, recipient, body, kind, time
            FROM messages
            WHERE sender = $1
               OR recipient = $1
               OR recipient = $2
               OR kind IN ('message', 'status')
            ORDER BY id DESC
            LIMIT $3
            "#,
        )
        .bind(&query.reader)
        .bind(&query.broadcast_target)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(Message::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn count(&self) -> RepoResult<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM messages")
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(count.0)
    }
}
