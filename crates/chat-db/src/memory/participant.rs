//! In-memory implementation of ParticipantRepository

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;

use chat_core::entities::Participant;
use chat_core::error::DomainError;
use chat_core::traits::{ParticipantRepository, RepoResult};

/// Presence store keyed by participant name
#[derive(Debug, Default)]
pub struct MemParticipantRepository {
    participants: Mutex<HashMap<String, Participant>>,
}

impl MemParticipantRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ParticipantRepository for MemParticipantRepository {
    async fn find_by_name(&self, name: &str) -> RepoResult<Option<Participant>> {
        Ok(self.participants.lock().get(name).cloned())
    }

    async fn create(&self, participant: &Participant) -> RepoResult<()> {
        match self.participants.lock().entry(participant.name.clone()) {
            Entry::Occupied(_) => Err(DomainError::ParticipantAlreadyExists(
                participant.name.clone(),
            )),
            Entry::Vacant(slot) => {
                slot.insert(participant.clone());
                Ok(())
            }
        }
    }

    async fn touch(&self, name: &str, now_ms: i64) -> RepoResult<()> {
        self.participants
            .lock()
            .get_mut(name)
            .map(|p| p.touch(now_ms))
            .ok_or_else(|| DomainError::ParticipantNotFound(name.to_string()))
    }

    async fn list(&self) -> RepoResult<Vec<Participant>> {
        let mut participants: Vec<_> = self.participants.lock().values().cloned().collect();
        participants.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(participants)
    }

    async fn count(&self) -> RepoResult<i64> {
        Ok(self.participants.lock().len() as i64)
    }

    async fn delete_stale_before(&self, cutoff_ms: i64) -> RepoResult<Vec<Participant>> {
        let mut removed = Vec::new();
        self.participants.lock().retain(|_, p| {
            if p.is_stale(cutoff_ms) {
                removed.push(p.clone());
                false
            } else {
                true
            }
        });
        Ok(removed)
    }
}
