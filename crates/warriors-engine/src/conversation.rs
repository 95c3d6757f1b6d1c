//! Conversation state and its transitions.
//!
//! A [`Conversation`] owns the draft, the message history and the pending
//! flag. It only changes through [`Conversation::set_draft`],
//! [`Conversation::submit`] and [`Conversation::complete`]:
//!
//! ```text
//!            submit (non-empty draft)
//!   Idle ───────────────────────────────▶ Pending
//!    ▲                                       │
//!    └───────────── complete ────────────────┘
//! ```
//!
//! Scheduling the completion is not done here; see
//! [`ResponseSimulator`](crate::ResponseSimulator).

use chrono::Utc;
use tracing::{debug, info};

use crate::message::{IdClock, Message, Sender};
use crate::store::MessageStore;

/// Default cap on draft length, in characters.
pub const DEFAULT_MAX_DRAFT_CHARS: usize = 4000;

/// Build the simulated reply for a query.
pub fn simulated_response(query: &str) -> String {
    format!("This is a simulated response to: \"{query}\"")
}

/// Receives a callback after every transition that changed the history.
pub trait HistoryObserver {
    /// Called once per appended message, after the transition completed.
    fn history_changed(&mut self, history: &MessageStore);
}

/// Observer that ignores every notification.
impl HistoryObserver for () {
    fn history_changed(&mut self, _history: &MessageStore) {}
}

/// Identifies one in-flight response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

/// A submission that has been accepted and awaits its reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingReply {
    ticket: Ticket,
    query: String,
}

impl PendingReply {
    pub fn ticket(&self) -> Ticket {
        self.ticket
    }

    /// The trimmed query that was submitted.
    pub fn query(&self) -> &str {
        &self.query
    }
}

/// Why a submission was not accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The draft is empty or whitespace only.
    EmptyDraft,
    /// A response is already in flight.
    Pending,
}

/// Result of [`Conversation::submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The user message was appended and a reply must be scheduled.
    Accepted(PendingReply),
    /// Nothing changed.
    Ignored(IgnoreReason),
}

impl SubmitOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, SubmitOutcome::Accepted(_))
    }
}

/// Draft, history and pending state of one conversation.
#[derive(Debug)]
pub struct Conversation {
    draft: String,
    history: MessageStore,
    in_flight: Option<Ticket>,
    next_ticket: u64,
    clock: IdClock,
    max_draft_chars: usize,
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

impl Conversation {
    /// Create an empty, idle conversation.
    pub fn new() -> Self {
        Self::with_max_draft_chars(DEFAULT_MAX_DRAFT_CHARS)
    }

    /// Create an empty conversation with a custom draft length cap.
    pub fn with_max_draft_chars(max_draft_chars: usize) -> Self {
        Self {
            draft: String::new(),
            history: MessageStore::new(),
            in_flight: None,
            next_ticket: 1,
            clock: IdClock::new(),
            max_draft_chars: max_draft_chars.max(1),
        }
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn history(&self) -> &MessageStore {
        &self.history
    }

    /// Whether a simulated response is in flight.
    pub fn is_pending(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn max_draft_chars(&self) -> usize {
        self.max_draft_chars
    }

    /// Replace the draft.
    ///
    /// Text beyond the draft length cap is dropped.
    pub fn set_draft(&mut self, text: impl Into<String>) {
        let mut text = text.into();
        if let Some((cut, _)) = text.char_indices().nth(self.max_draft_chars) {
            debug!(
                max_chars = self.max_draft_chars,
                "draft truncated to length cap"
            );
            text.truncate(cut);
        }
        self.draft = text;
    }

    /// True iff the trimmed draft is non-empty and nothing is pending.
    pub fn is_submittable(&self) -> bool {
        !self.is_pending() && !self.draft.trim().is_empty()
    }

    /// Submit the current draft.
    ///
    /// On acceptance the user message is appended, the draft cleared and the
    /// conversation enters the pending state, in that order. The caller is
    /// responsible for scheduling the returned [`PendingReply`].
    pub fn submit(&mut self) -> SubmitOutcome {
        if self.is_pending() {
            debug!(reason = ?IgnoreReason::Pending, "submission ignored");
            return SubmitOutcome::Ignored(IgnoreReason::Pending);
        }

        let query = self.draft.trim();
        if query.is_empty() {
            debug!(reason = ?IgnoreReason::EmptyDraft, "submission ignored");
            return SubmitOutcome::Ignored(IgnoreReason::EmptyDraft);
        }
        let query = query.to_string();

        self.append(Sender::User, query.clone());
        self.draft.clear();

        let ticket = Ticket(self.next_ticket);
        self.next_ticket += 1;
        self.in_flight = Some(ticket);

        SubmitOutcome::Accepted(PendingReply { ticket, query })
    }

    /// Finish an in-flight response.
    ///
    /// Appends the assistant reply and returns to idle. A reply whose ticket
    /// is not the one in flight is discarded and `None` is returned.
    pub fn complete(&mut self, reply: &PendingReply) -> Option<&Message> {
        if self.in_flight != Some(reply.ticket) {
            debug!(ticket = reply.ticket.0, "stale completion discarded");
            return None;
        }

        self.append(Sender::Assistant, simulated_response(&reply.query));
        self.in_flight = None;
        self.history.last()
    }

    fn append(&mut self, sender: Sender, text: String) {
        let now = Utc::now();
        let id = self.clock.next_id(now);
        info!(
            message_id = %id,
            sender = sender.as_str(),
            chars = text.chars().count(),
            "message appended"
        );
        self.history.append(Message::new(id, sender, text, now));
    }
}
