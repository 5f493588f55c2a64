//! Domain errors - error types for the domain layer

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Participant not found: {0}")]
    ParticipantNotFound(String),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Invalid message type: {0}")]
    InvalidMessageKind(String),

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Participant already exists: {0}")]
    ParticipantAlreadyExists(String),

    // =========================================================================
    // Business Rule Violations
    // =========================================================================
    #[error("Sender is not an active participant: {0}")]
    UnknownSender(String),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::ParticipantNotFound(_) => "UNKNOWN_PARTICIPANT",
            Self::InvalidMessageKind(_) => "INVALID_MESSAGE_TYPE",
            Self::ParticipantAlreadyExists(_) => "PARTICIPANT_ALREADY_EXISTS",
            Self::UnknownSender(_) => "UNKNOWN_SENDER",
            Self::StorageUnavailable(_) => "STORAGE_UNAVAILABLE",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ParticipantNotFound(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidMessageKind(_))
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::ParticipantAlreadyExists(_))
    }

    /// Well-formed request that refers to state the server cannot act on
    pub fn is_unprocessable(&self) -> bool {
        matches!(self, Self::UnknownSender(_))
    }

    /// Transient infrastructure failure
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::StorageUnavailable(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = DomainError::ParticipantNotFound("Ana".to_string());
        assert_eq!(err.code(), "UNKNOWN_PARTICIPANT");

        let err = DomainError::ParticipantAlreadyExists("Ana".to_string());
        assert_eq!(err.code(), "PARTICIPANT_ALREADY_EXISTS");
    }

    #[test]
    fn test_classifiers() {
        assert!(DomainError::ParticipantNotFound("x".to_string()).is_not_found());
        assert!(DomainError::ParticipantAlreadyExists("x".to_string()).is_conflict());
        assert!(DomainError::UnknownSender("x".to_string()).is_unprocessable());
        assert!(DomainError::InvalidMessageKind("x".to_string()).is_validation());
        assert!(DomainError::StorageUnavailable("down".to_string()).is_transient());
        assert!(!DomainError::UnknownSender("x".to_string()).is_not_found());
    }

    #[test]
    fn test_error_display() {
        let err = DomainError::UnknownSender("Ana".to_string());
        assert_eq!(err.to_string(), "Sender is not an active participant: Ana");
    }
}
