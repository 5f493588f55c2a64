//! Value objects - immutable types that represent domain concepts

mod message_kind;
mod message_limit;

pub use message_kind::MessageKind;
pub use message_limit::{MessageLimit, MessageLimitParseError};
