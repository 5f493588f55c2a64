//! Message entity - an entry in the append-only message log

use crate::value_objects::{MessageKind, MessageLimit};

/// Reserved `to` value meaning "everyone in the room"
pub const DEFAULT_BROADCAST_TARGET: &str = "Todos";

/// Message entity as stored in the log
///
/// `id` is assigned by the store on append and is strictly increasing; it is
/// the only ordering authority (`time` is informational).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: i64,
    pub from: String,
    pub to: String,
    pub text: String,
    pub kind: MessageKind,
    pub time: String,
}

impl Message {
    /// Visibility rule for `reader`.
    ///
    /// Public kinds and broadcast traffic are visible to everyone. Anything
    /// else only to its sender and addressee.
    pub fn is_visible_to(&self, reader: &str, broadcast_target: &str) -> bool {
        self.from == reader
            || self.to == reader
            || self.to == broadcast_target
            || self.kind.is_public()
    }
}

/// A message that has not been appended yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    pub from: String,
    pub to: String,
    pub text: String,
    pub kind: MessageKind,
    pub time: String,
}

impl NewMessage {
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        text: impl Into<String>,
        kind: MessageKind,
        time: impl Into<String>,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            text: text.into(),
            kind,
            time: time.into(),
        }
    }

    /// System status event addressed to the whole room
    pub fn status(
        from: impl Into<String>,
        broadcast_target: impl Into<String>,
        text: impl Into<String>,
        time: impl Into<String>,
    ) -> Self {
        Self::new(from, broadcast_target, text, MessageKind::Status, time)
    }

    /// Attach the store-assigned sequence id
    pub fn into_message(self, id: i64) -> Message {
        Message {
            id,
            from: self.from,
            to: self.to,
            text: self.text,
            kind: self.kind,
            time: self.time,
        }
    }
}

/// Per-reader view over the message log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageQuery {
    pub reader: String,
    pub broadcast_target: String,
    pub limit: MessageLimit,
}

impl MessageQuery {
    pub fn new(reader: impl Into<String>, broadcast_target: impl Into<String>) -> Self {
        Self {
            reader: reader.into(),
            broadcast_target: broadcast_target.into(),
            limit: MessageLimit::UNBOUNDED,
        }
    }

    pub fn with_limit(mut self, limit: MessageLimit) -> Self {
        self.limit = limit;
        self
    }

    /// Whether `message` belongs in this reader's view
    #[inline]
    pub fn matches(&self, message: &Message) -> bool {
        message.is_visible_to(&self.reader, &self.broadcast_target)
    }

    /// Apply the visibility rule, newest first, truncated to the limit.
    ///
    /// `log` must be in insertion order (ascending id).
    pub fn select<'a, I>(&self, log: I) -> Vec<Message>
    where
        I: DoubleEndedIterator<Item = &'a Message>,
    {
        let visible = log.rev().filter(|m| self.matches(m)).cloned();
        match self.limit.get() {
            Some(n) => visible.take(n as usize).collect(),
            None => visible.collect(),
        }
    }
}
