//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in chat-core.
//! Each repository handles database operations for a specific domain entity.

mod error;
mod message;
mod participant;

pub use message::PgMessageRepository;
pub use participant::PgParticipantRepository;
