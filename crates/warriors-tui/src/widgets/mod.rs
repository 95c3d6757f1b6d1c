//! UI widgets for the chat view.
//!
//! This module provides:
//! - [`Header`] - Avatar, assistant name and tagline
//! - [`Welcome`] - Placeholder shown before the first message
//! - [`MessageList`] - Scrollable list of message bubbles
//! - [`InputBar`] - Draft field with the Ask button
//! - [`StatusBar`] - Bottom bar with mode and keybinding hints

mod header;
mod input_bar;
mod message_list;
mod status_bar;
mod welcome;

pub use header::{Header, AVATAR};
pub use input_bar::{button_area, button_label, InputBar, PLACEHOLDER};
pub use message_list::{message_lines, MessageList, BUBBLE_PERCENT};
pub use status_bar::{KeyHint, StatusBar, CHAT_HINTS, PENDING_HINTS};
pub use welcome::{Welcome, GREETING, HEADLINE, PROMPT};
