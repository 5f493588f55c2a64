//! Message kind - the enumerated set of chat event types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// Kind of entry in the message log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    /// Public chat message
    Message,
    /// Direct message, visible to sender and addressee only
    PrivateMessage,
    /// System event (joined, left)
    Status,
}

impl MessageKind {
    /// Every kind, in declaration order
    pub const ALL: [Self; 3] = [Self::Message, Self::PrivateMessage, Self::Status];

    /// Wire/storage representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Message => "message",
            Self::PrivateMessage => "private_message",
            Self::Status => "status",
        }
    }

    /// Whether every reader may see entries of this kind
    #[inline]
    pub const fn is_public(&self) -> bool {
        matches!(self, Self::Message | Self::Status)
    }

    /// Whether participants may post this kind themselves
    #[inline]
    pub const fn is_user_postable(&self) -> bool {
        matches!(self, Self::Message | Self::PrivateMessage)
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "message" => Ok(Self::Message),
            "private_message" => Ok(Self::PrivateMessage),
            "status" => Ok(Self::Status),
            other => Err(DomainError::InvalidMessageKind(other.to_string())),
        }
    }
}
