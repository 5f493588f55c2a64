//! Message entity <-> model mapper

use chat_core::entities::{Message, NewMessage};
use chat_core::error::DomainError;
use chat_core::value_objects::MessageKind;

use crate::models::MessageModel;

/// Convert MessageModel to Message entity
///
/// Fails only if the `kind` column holds a value outside the known set.
impl TryFrom<MessageModel> for Message {
    type Error = DomainError;

    fn try_from(model: MessageModel) -> Result<Self, Self::Error> {
        let kind: MessageKind = model
            .kind
            .parse()
            .map_err(|_| DomainError::InternalError(format!("corrupt message kind: {}", model.kind)))?;

        Ok(Message {
            id: model.id,
            from: model.sender,
            to: model.recipient,
            text: model.body,
            kind,
            time: model.time,
        })
    }
}

/// Convert NewMessage reference to values for database insertion
pub struct MessageInsert<'a> {
    pub sender: &'a str,
    pub recipient: &'a str,
    pub body: &'a str,
    pub kind: &'static str,
    pub time: &'a str,
}

impl<'a> MessageInsert<'a> {
    pub fn new(message: &'a NewMessage) -> Self {
        Self {
            sender: &message.from,
            recipient: &message.to,
            body: &message.text,
            kind: message.kind.as_str(),
            time: &message.time,
        }
    }
}
