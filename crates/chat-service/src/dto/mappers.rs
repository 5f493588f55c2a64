//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use chat_core::entities::{Message, Participant};

use super::responses::{MessageResponse, ParticipantResponse};

// ============================================================================
// Participant Mappers
// ============================================================================

impl From<&Participant> for ParticipantResponse {
    fn from(participant: &Participant) -> Self {
        Self {
            name: participant.name.clone(),
            last_status: participant.last_seen,
        }
    }
}

impl From<Participant> for ParticipantResponse {
    fn from(participant: Participant) -> Self {
        Self {
            name: participant.name,
            last_status: participant.last_seen,
        }
    }
}

// ============================================================================
// Message Mappers
// ============================================================================

impl From<Message> for MessageResponse {
    fn from(message: Message) -> Self {
        Self {
            from: message.from,
            to: message.to,
            text: message.text,
            kind: message.kind.as_str().to_string(),
            time: message.time,
        }
    }
}
