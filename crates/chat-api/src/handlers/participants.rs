//! Participant handlers
//!
//! Endpoints for joining the room and listing who is in it.

use axum::{extract::State, Json};
use chat_service::{ParticipantResponse, PresenceService, RegisterParticipantRequest};

use crate::extractors::ValidatedJson;
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Register a participant
///
/// POST /participants
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RegisterParticipantRequest>,
) -> ApiResult<Created<Json<ParticipantResponse>>> {
    let service = PresenceService::new(state.service_context());
    let response = service.register(request).await?;
    Ok(Created(Json(response)))
}

/// List live participants
///
/// GET /participants
pub async fn list_participants(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<ParticipantResponse>>> {
    let service = PresenceService::new(state.service_context());
    let participants = service.list_participants().await?;
    Ok(Json(participants))
}
