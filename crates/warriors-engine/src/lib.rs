//! warriors-engine: Headless conversation engine for The Warriors AI
//!
//! This crate provides the state machine behind the chat view:
//! - Messages and the append-only message store
//! - The conversation (draft, history, pending flag) and its transitions
//! - The response simulator that delivers templated replies after a delay
//! - Configuration

pub mod config;
pub mod conversation;
pub mod message;
pub mod session;
pub mod simulator;
pub mod store;

// Re-export commonly used types
pub use config::{Config, ConfigError, IconStyle, ThemeStyle};
pub use conversation::{
    simulated_response, Conversation, HistoryObserver, IgnoreReason, PendingReply,
    SubmitOutcome, Ticket,
};
pub use message::{IdClock, Message, MessageId, Sender};
pub use session::ChatSession;
pub use simulator::ResponseSimulator;
pub use store::MessageStore;

/// Returns the engine version.
pub fn engine_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
