//! In-memory repository implementations
//!
//! Single-process backing for the presence store and message log. Every
//! operation takes one lock for its whole duration, which gives the same
//! atomicity the PostgreSQL statements provide.

mod message;
mod participant;

pub use message::MemMessageRepository;
pub use participant::MemParticipantRepository;
