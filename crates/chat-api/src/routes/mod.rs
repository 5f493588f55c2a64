//! Route definitions
//!
//! Paths match what existing chat clients already call.

use axum::{routing::{get, post}, Router};

use crate::handlers::{health, messages, participants, status};
use crate::state::AppState;

/// Create the main API router (excluding health for separate middleware handling)
pub fn create_router() -> Router<AppState> {
    Router::new()
        .merge(participant_routes())
        .merge(message_routes())
        .merge(status_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// Participant routes
fn participant_routes() -> Router<AppState> {
    Router::new().route(
        "/participants",
        get(participants::list_participants).post(participants::register),
    )
}

/// Message routes
fn message_routes() -> Router<AppState> {
    Router::new().route(
        "/messages",
        get(messages::get_messages).post(messages::create_message),
    )
}

/// Heartbeat route
fn status_routes() -> Router<AppState> {
    Router::new().route("/status", post(status::heartbeat))
}
