//! warriors-tui: Terminal chat view for The Warriors AI
//!
//! This crate provides the interactive layer on top of `warriors-engine`:
//! - The chat view (header, message bubbles, input bar, status bar)
//! - Keyboard, paste and mouse handling
//! - Smooth auto-scroll to the newest message
//! - Headless mode for testing and automation

mod event;
pub mod headless;
mod input;
mod scroll;
#[cfg(test)]
pub mod test_utils;
mod text;
pub mod theme;
mod view;
pub mod widgets;

pub use event::{key_to_action, Action, Event, EventHandler};
pub use input::{InputController, KeyOutcome};
pub use scroll::{ScrollAnchor, SCROLL_STEP};
pub use theme::{IconMode, IconSet, Theme};
pub use view::{chat_layout, ChatLayout, ConversationView};
pub use warriors_engine;

use crossterm::{
    cursor::Show as ShowCursor,
    event::{DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stdout};
use tracing::{debug, info};
use warriors_engine::{Config, PendingReply};

/// RAII guard for terminal state restoration.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(
            stdout(),
            DisableBracketedPaste,
            DisableMouseCapture,
            LeaveAlternateScreen,
            ShowCursor
        );
    }
}

/// One unit of work for the event loop.
pub(crate) enum Step {
    Event(Event),
    Reply(PendingReply),
    /// The event source is gone.
    Closed,
}

/// Apply a step to the view. Returns `false` when the loop should stop.
pub(crate) fn apply_step(view: &mut ConversationView, step: Step) -> bool {
    match step {
        Step::Event(event) => view.handle_event(event),
        Step::Reply(reply) => view.apply_reply(&reply),
        Step::Closed => {
            debug!("event source closed");
            return false;
        }
    }
    !view.should_quit()
}

/// Run the TUI application.
///
/// This is the main entry point for the TUI. It sets up the terminal,
/// runs the event loop, and restores the terminal on exit.
pub async fn run_tui(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    // Setup terminal with RAII guard for cleanup
    enable_raw_mode()?;
    let _guard = TerminalGuard;

    let mut stdout = stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut view = ConversationView::new(config);
    let mut events = EventHandler::new(config.tick_rate());
    info!(
        delay_ms = config.response_delay_ms,
        tick_ms = config.tick_rate_ms,
        "chat view started"
    );

    let result = run_loop(&mut terminal, &mut view, &mut events).await;

    // Restore cursor before guard drops
    terminal.show_cursor()?;
    info!(
        messages = view.conversation().history().len(),
        "chat view closed"
    );

    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    view: &mut ConversationView,
    events: &mut EventHandler,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| view.render(frame.area(), frame.buffer_mut()))?;

        if view.should_quit() {
            return Ok(());
        }

        let step = tokio::select! {
            event = events.next() => event.map_or(Step::Closed, Step::Event),
            Some(reply) = view.next_ready() => Step::Reply(reply),
        };

        if !apply_step(view, step) {
            return Ok(());
        }
    }
}

/// Returns the TUI version.
pub fn tui_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
