//! Domain entities - core business objects

mod message;
mod participant;

pub use message::{Message, MessageQuery, NewMessage, DEFAULT_BROADCAST_TARGET};
pub use participant::Participant;
