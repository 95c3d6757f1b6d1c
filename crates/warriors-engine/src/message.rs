//! Conversation messages and their identifiers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Author of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// Text typed by the person at the keyboard.
    User,
    /// Simulated reply.
    Assistant,
}

impl Sender {
    /// Short lowercase name, used in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Assistant => "assistant",
        }
    }
}

/// Rendering key for a message.
///
/// Derived from the creation time in milliseconds since the Unix epoch. Two
/// messages created within the same millisecond still get distinct ids, see
/// [`IdClock`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MessageId(i64);

impl MessageId {
    /// Raw millisecond value.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Issues strictly increasing [`MessageId`]s from wall-clock timestamps.
#[derive(Debug, Default, Clone)]
pub struct IdClock {
    last: Option<i64>,
}

impl IdClock {
    /// Create a clock that has not issued any ids yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the id for a message created at `now`.
    ///
    /// Returns `now` in milliseconds, or one past the previous id if the clock
    /// has not advanced (or went backwards).
    pub fn next_id(&mut self, now: DateTime<Utc>) -> MessageId {
        let millis = now.timestamp_millis();
        let id = match self.last {
            Some(last) if millis <= last => last + 1,
            _ => millis,
        };
        self.last = Some(id);
        MessageId(id)
    }
}

/// A single entry in the conversation history.
///
/// Messages are immutable: fields are only reachable through accessors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    id: MessageId,
    sender: Sender,
    text: String,
    created_at: DateTime<Utc>,
}

impl Message {
    /// Create a message.
    pub fn new(
        id: MessageId,
        sender: Sender,
        text: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            sender,
            text: text.into(),
            created_at,
        }
    }

    pub fn id(&self) -> MessageId {
        self.id
    }

    pub fn sender(&self) -> Sender {
        self.sender
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Whether this message was typed by the user.
    pub fn is_user(&self) -> bool {
        self.sender == Sender::User
    }
}
