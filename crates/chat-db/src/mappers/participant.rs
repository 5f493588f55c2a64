//! Participant entity <-> model mapper

use chat_core::entities::Participant;

use crate::models::ParticipantModel;

/// Convert ParticipantModel to Participant entity
impl From<ParticipantModel> for Participant {
    fn from(model: ParticipantModel) -> Self {
        Participant {
            name: model.name,
            last_seen: model.last_status,
        }
    }
}
