//! In-memory implementation of MessageRepository

use async_trait::async_trait;
use parking_lot::Mutex;

use chat_core::entities::{Message, MessageQuery, NewMessage};
use chat_core::traits::{MessageRepository, RepoResult};

#[derive(Debug, Default)]
struct Log {
    last_id: i64,
    entries: Vec<Message>,
}

/// Append-only message log
#[derive(Debug, Default)]
pub struct MemMessageRepository {
    log: Mutex<Log>,
}

impl MemMessageRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MessageRepository for MemMessageRepository {
    async fn append(&self, message: &NewMessage) -> RepoResult<Message> {
        let mut log = self.log.lock();
        log.last_id += 1;
        let stored = message.clone().into_message(log.last_id);
        log.entries.push(stored.clone());
        Ok(stored)
    }

    async fn find_visible(&self, query: &MessageQuery) -> RepoResult<Vec<Message>> {
        Ok(query.select(self.log.lock().entries.iter()))
    }

    async fn count(&self) -> RepoResult<i64> {
        Ok(self.log.lock().entries.len() as i64)
    }
}
