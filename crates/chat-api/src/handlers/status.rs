//! Heartbeat handler

use axum::{extract::State, http::StatusCode};
use chat_service::PresenceService;

use crate::extractors::CallerName;
use crate::response::ApiResult;
use crate::state::AppState;

/// Keep the caller in the room
///
/// POST /status
pub async fn heartbeat(State(state): State<AppState>, caller: CallerName) -> ApiResult<StatusCode> {
    PresenceService::new(state.service_context())
        .heartbeat(caller.as_deref())
        .await?;
    Ok(StatusCode::OK)
}
