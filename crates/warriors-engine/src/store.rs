//! Append-only message history.

use crate::message::{Message, Sender};

/// Ordered, append-only sequence of messages.
///
/// There is no removal or update: once a message is appended it stays in
/// place for the lifetime of the store.
#[derive(Debug, Default, Clone)]
pub struct MessageStore {
    messages: Vec<Message>,
}

impl MessageStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a message to the end of the history.
    pub(crate) fn append(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// The most recently appended message.
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Iterate in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Message> {
        self.messages.iter()
    }

    /// Plain-text transcript, one line per message.
    ///
    /// User lines are prefixed with `You:` and assistant lines with the given
    /// display name.
    pub fn transcript(&self, assistant_name: &str) -> String {
        use std::fmt::Write;

        let mut out = String::new();
        for msg in &self.messages {
            let who = match msg.sender() {
                Sender::User => "You",
                Sender::Assistant => assistant_name,
            };
            let _ = writeln!(out, "{who}: {}", msg.text());
        }
        out
    }
}

impl<'a> IntoIterator for &'a MessageStore {
    type Item = &'a Message;
    type IntoIter = std::slice::Iter<'a, Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}
