//! Service layer error types

use chat_core::DomainError;

/// Service layer error type
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Domain rule violation or storage failure
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Heartbeat without a caller name; indistinguishable from an unknown participant
    #[error("Participant not found: no caller name given")]
    AnonymousHeartbeat,

    /// Message query without a reader
    #[error("Validation error: the User header is required to read messages")]
    MissingReader,

    /// Service wiring is incomplete
    #[error("Internal error: {0} is required")]
    MissingDependency(&'static str),
}

impl ServiceError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Domain(e) if e.is_not_found() => 404,
            Self::Domain(e) if e.is_conflict() => 409,
            Self::Domain(e) if e.is_validation() || e.is_unprocessable() => 422,
            Self::Domain(_) => 500,
            Self::AnonymousHeartbeat => 404,
            Self::MissingReader => 422,
            Self::MissingDependency(_) => 500,
        }
    }

    /// Get the error code for API responses
    pub fn error_code(&self) -> &str {
        match self {
            Self::Domain(e) => e.code(),
            Self::AnonymousHeartbeat => "UNKNOWN_PARTICIPANT",
            Self::MissingReader => "MISSING_USER",
            Self::MissingDependency(_) => "INTERNAL_ERROR",
        }
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;
