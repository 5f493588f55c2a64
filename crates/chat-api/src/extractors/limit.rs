//! Message limit extractor
//!
//! Parses the optional `limit` query parameter of `GET /messages`.

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use chat_core::value_objects::MessageLimit;
use serde::Deserialize;

use crate::response::ApiError;

/// Raw query parameters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LimitParams {
    /// Kept as a string so a bad value gets our own error, not serde's
    pub limit: Option<String>,
}

/// Validated message limit; absent means unbounded
#[derive(Debug, Clone, Copy, Default)]
pub struct MessageLimitQuery(pub MessageLimit);

#[async_trait]
impl<S> FromRequestParts<S> for MessageLimitQuery
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<LimitParams>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_query(e.body_text()))?;

        let limit = match params.limit {
            None => MessageLimit::UNBOUNDED,
            Some(raw) => raw
                .parse::<MessageLimit>()
                .map_err(|e| ApiError::invalid_query(e.to_string()))?,
        };

        Ok(MessageLimitQuery(limit))
    }
}
