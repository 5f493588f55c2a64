//! Caller identity extractor
//!
//! Participants identify themselves with a plain `User` header. There is no
//! authentication; the header is taken at face value.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use std::convert::Infallible;

/// Header carrying the caller's participant name
pub const CALLER_HEADER: &str = "user";

/// Name from the `User` header, if present and non-empty.
///
/// Never rejects: each operation decides what a missing identity means.
#[derive(Debug, Clone, Default)]
pub struct CallerName(pub Option<String>);

impl CallerName {
    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for CallerName
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let name = parts
            .headers
            .get(CALLER_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .map(str::to_string);

        Ok(CallerName(name))
    }
}
