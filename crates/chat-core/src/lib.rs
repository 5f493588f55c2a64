//! # chat-core
//!
//! Domain layer containing entities, value objects and repository traits for the
//! presence-aware chat. This crate has zero dependencies on infrastructure
//! (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{Message, MessageQuery, NewMessage, Participant, DEFAULT_BROADCAST_TARGET};
pub use error::DomainError;
pub use traits::{
    Clock, ManualClock, MessageRepository, ParticipantRepository, RepoResult, SystemClock,
};
pub use value_objects::{MessageKind, MessageLimit, MessageLimitParseError};
