//! A conversation paired with its response simulator.

use tracing::info;

use crate::config::Config;
use crate::conversation::{Conversation, HistoryObserver, PendingReply, SubmitOutcome};
use crate::message::Message;
use crate::simulator::ResponseSimulator;

/// Drives a [`Conversation`] through submit and completion, scheduling
/// replies with a [`ResponseSimulator`].
///
/// Observers are passed per call and notified after each transition that
/// appended a message. Dropping the session cancels any scheduled reply.
#[derive(Debug)]
pub struct ChatSession {
    conversation: Conversation,
    simulator: ResponseSimulator,
}

impl ChatSession {
    /// Create an idle session using the configured delay and draft cap.
    pub fn new(config: &Config) -> Self {
        Self::from_parts(
            Conversation::with_max_draft_chars(config.max_draft_chars),
            ResponseSimulator::new(config.response_delay()),
        )
    }

    pub fn from_parts(conversation: Conversation, simulator: ResponseSimulator) -> Self {
        Self {
            conversation,
            simulator,
        }
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// Replace the draft text.
    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.conversation.set_draft(text);
    }

    pub fn is_submittable(&self) -> bool {
        self.conversation.is_submittable()
    }

    pub fn is_pending(&self) -> bool {
        self.conversation.is_pending()
    }

    /// Submit the draft and, if accepted, schedule the simulated reply.
    pub fn submit(&mut self, observer: &mut dyn HistoryObserver) -> SubmitOutcome {
        let outcome = self.conversation.submit();
        if let SubmitOutcome::Accepted(reply) = &outcome {
            observer.history_changed(self.conversation.history());
            self.simulator.schedule(reply.clone());
        }
        outcome
    }

    /// Wait until the scheduled reply is ready to be applied.
    ///
    /// Cancel safe. Pending forever while nothing is in flight.
    pub async fn next_ready(&mut self) -> Option<PendingReply> {
        self.simulator.next_ready().await
    }

    /// Apply a ready reply, notifying `observer` if it was appended.
    pub fn complete(
        &mut self,
        reply: &PendingReply,
        observer: &mut dyn HistoryObserver,
    ) -> Option<&Message> {
        if self.conversation.complete(reply).is_none() {
            return None;
        }
        observer.history_changed(self.conversation.history());
        info!(
            history_len = self.conversation.history().len(),
            "simulated reply delivered"
        );
        self.conversation.history().last()
    }

    /// Wait for the in-flight reply and apply it.
    ///
    /// Returns `None` immediately if nothing is pending.
    pub async fn wait_for_reply(
        &mut self,
        observer: &mut dyn HistoryObserver,
    ) -> Option<&Message> {
        if !self.conversation.is_pending() {
            return None;
        }
        let reply = self.simulator.next_ready().await?;
        self.complete(&reply, observer)
    }
}
