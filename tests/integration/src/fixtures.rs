//! Test fixtures and data generators
//!
//! Provides reusable request and response shapes for integration tests.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Registration request
#[derive(Debug, Serialize)]
pub struct RegisterRequest {
    pub name: String,
}

impl RegisterRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn unique() -> Self {
        Self::new(format!("participant{}", unique_suffix()))
    }
}

/// Message post request
#[derive(Debug, Serialize)]
pub struct PostMessageRequest {
    pub to: String,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl PostMessageRequest {
    pub fn public(text: impl Into<String>) -> Self {
        Self {
            to: "Todos".to_string(),
            text: text.into(),
            kind: "message".to_string(),
        }
    }

    pub fn private(to: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            text: text.into(),
            kind: "private_message".to_string(),
        }
    }
}

/// Participant as listed by the server
#[derive(Debug, Deserialize)]
pub struct ParticipantBody {
    pub name: String,
    #[serde(rename = "lastStatus")]
    pub last_status: i64,
}

/// Message as returned by the server
#[derive(Debug, Deserialize)]
pub struct MessageBody {
    pub from: String,
    pub to: String,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub time: String,
}

/// Error envelope
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}
