//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.

use std::borrow::Cow;

use chat_core::value_objects::MessageKind;
use serde::Deserialize;
use validator::{Validate, ValidationError};

// ============================================================================
// Participant Requests
// ============================================================================

/// Join the room under a name
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterParticipantRequest {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
}

// ============================================================================
// Message Requests
// ============================================================================

/// Post a message
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateMessageRequest {
    /// Recipient name, or the broadcast target
    #[validate(length(min = 1, message = "to must not be empty"))]
    pub to: String,

    #[validate(length(min = 1, message = "text must not be empty"))]
    pub text: String,

    /// `message` or `private_message`
    #[serde(rename = "type")]
    #[validate(custom(function = "validate_postable_kind"))]
    pub kind: String,
}

/// Only user-postable kinds are accepted; `status` is reserved for the server
fn validate_postable_kind(kind: &str) -> Result<(), ValidationError> {
    match kind.parse::<MessageKind>() {
        Ok(kind) if kind.is_user_postable() => Ok(()),
        _ => Err(ValidationError::new("message_type")
            .with_message(Cow::Borrowed("type must be message or private_message"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(to: &str, text: &str, kind: &str) -> CreateMessageRequest {
        CreateMessageRequest {
            to: to.to_string(),
            text: text.to_string(),
            kind: kind.to_string(),
        }
    }

    #[test]
    fn test_register_requires_name() {
        let empty = RegisterParticipantRequest {
            name: String::new(),
        };
        assert!(empty.validate().is_err());

        let ok = RegisterParticipantRequest {
            name: "Ana".to_string(),
        };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_message_kinds() {
        assert!(message("Todos", "oi", "message").validate().is_ok());
        assert!(message("Bia", "oi", "private_message").validate().is_ok());
        assert!(message("Todos", "oi", "status").validate().is_err());
        assert!(message("Todos", "oi", "shout").validate().is_err());
    }

    #[test]
    fn test_message_requires_to_and_text() {
        assert!(message("", "oi", "message").validate().is_err());
        assert!(message("Todos", "", "message").validate().is_err());
    }

    #[test]
    fn test_deserialize_type_field() {
        let request: CreateMessageRequest =
            serde_json::from_str(r#"{"to":"Todos","text":"oi","type":"message"}"#).unwrap();
        assert_eq!(request.kind, "message");
    }
}
