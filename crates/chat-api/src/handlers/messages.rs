//! Message handlers
//!
//! Endpoints for posting and reading messages.

use axum::{extract::State, Json};
use chat_service::{CreateMessageRequest, MessageResponse, MessageService, VisibilityService};

use crate::extractors::{CallerName, MessageLimitQuery, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Messages visible to the caller, newest first
///
/// GET /messages?limit=N
pub async fn get_messages(
    State(state): State<AppState>,
    caller: CallerName,
    MessageLimitQuery(limit): MessageLimitQuery,
) -> ApiResult<Json<Vec<MessageResponse>>> {
    let service = VisibilityService::new(state.service_context());
    let messages = service.query_messages(caller.as_deref(), limit).await?;
    Ok(Json(messages))
}

/// Post a message as the caller
///
/// POST /messages
pub async fn create_message(
    State(state): State<AppState>,
    caller: CallerName,
    ValidatedJson(request): ValidatedJson<CreateMessageRequest>,
) -> ApiResult<Created<Json<MessageResponse>>> {
    let service = MessageService::new(state.service_context());
    let response = service.post_message(caller.as_deref(), request).await?;
    Ok(Created(Json(response)))
}
