//! Headless mode for the warriors TUI.
//!
//! Runs the chat view against a ratatui [`TestBackend`] instead of a real
//! terminal. Input events are sent over a channel and the rendered screen is
//! published after every frame, which makes end-to-end tests possible
//! without a tty.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use warriors_engine::Config;

use crate::event::Event;
use crate::theme::IconMode;
use crate::view::ConversationView;
use crate::{apply_step, Step};

/// Default terminal dimensions for headless mode.
pub const DEFAULT_WIDTH: u16 = 80;
pub const DEFAULT_HEIGHT: u16 = 24;

/// State captured from the headless TUI after each render.
#[derive(Debug, Clone, Default)]
pub struct HeadlessState {
    /// Text contents of the terminal buffer.
    pub screen_contents: String,
    /// Current draft text.
    pub draft: String,
    /// Whether a reply is in flight.
    pub pending: bool,
    /// Number of messages in the history.
    pub history_len: usize,
    /// First visible line of the message list.
    pub scroll_offset: usize,
    /// Whether the TUI should quit.
    pub should_quit: bool,
}

impl HeadlessState {
    fn capture(view: &ConversationView, buffer: &Buffer) -> Self {
        let conversation = view.conversation();
        Self {
            screen_contents: buffer_to_string(buffer),
            draft: conversation.draft().to_string(),
            pending: conversation.is_pending(),
            history_len: conversation.history().len(),
            scroll_offset: view.scroll().offset(),
            should_quit: view.should_quit(),
        }
    }
}

/// Handle to control a headless TUI instance.
pub struct HeadlessHandle {
    event_tx: mpsc::UnboundedSender<Event>,
    state_rx: watch::Receiver<HeadlessState>,
}

impl HeadlessHandle {
    /// Send a raw event to the TUI.
    ///
    /// Returns `true` if the event was sent successfully.
    pub fn send_event(&self, event: Event) -> bool {
        self.event_tx.send(event).is_ok()
    }

    /// Send a key press without modifiers.
    pub fn send_key(&self, code: KeyCode) -> bool {
        self.send_event(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    /// Type `text` one character at a time.
    pub fn type_text(&self, text: &str) -> bool {
        text.chars().all(|ch| self.send_key(KeyCode::Char(ch)))
    }

    /// Send `text` as a bracketed paste.
    pub fn paste(&self, text: &str) -> bool {
        self.send_event(Event::Paste(text.to_string()))
    }

    /// Get the current state of the TUI.
    pub fn state(&self) -> HeadlessState {
        self.state_rx.borrow().clone()
    }

    /// Wait until a condition is met on the state.
    ///
    /// Returns the state when the condition is met, or `None` if timed out.
    pub async fn wait_for<F>(&mut self, condition: F, timeout: Duration) -> Option<HeadlessState>
    where
        F: Fn(&HeadlessState) -> bool,
    {
        let deadline = tokio::time::Instant::now() + timeout;

        loop {
            let state = self.state();
            if condition(&state) {
                return Some(state);
            }

            let remaining = deadline.saturating_duration_since(tokio::time::Instant::now());
            if remaining.is_zero() {
                return None;
            }

            match tokio::time::timeout(remaining, self.state_rx.changed()).await {
                Ok(Ok(())) => {}
                // the TUI task is gone; its last published state is final
                Ok(Err(_)) => {
                    let state = self.state();
                    return condition(&state).then_some(state);
                }
                Err(_) => return None,
            }
        }
    }

    /// Wait for specific text to appear on screen.
    pub async fn wait_for_text(&mut self, text: &str, timeout: Duration) -> Option<HeadlessState> {
        self.wait_for(|s| s.screen_contents.contains(text), timeout)
            .await
    }

    /// Check if the TUI has quit.
    pub fn has_quit(&self) -> bool {
        self.state().should_quit
    }
}

/// Configuration for headless mode.
#[derive(Debug, Clone)]
pub struct HeadlessConfig {
    /// Terminal width.
    pub width: u16,
    /// Terminal height.
    pub height: u16,
    /// Chat configuration (delay, draft cap, tick rate, labels).
    pub chat: Config,
}

impl Default for HeadlessConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            chat: Config::default(),
        }
    }
}

/// Run the TUI in headless mode.
///
/// Returns a handle to control the TUI and a join handle for the background
/// task. Must be called from within a tokio runtime.
///
/// # Example
///
/// ```ignore
/// let (mut handle, task) = run_tui_headless(HeadlessConfig::default());
///
/// handle.type_text("hello");
/// handle.send_key(KeyCode::Enter);
/// let state = handle.wait_for_text("simulated response", Duration::from_secs(5)).await;
///
/// handle.send_key(KeyCode::Esc);
/// task.await.unwrap();
/// ```
pub fn run_tui_headless(
    config: HeadlessConfig,
) -> (HeadlessHandle, JoinHandle<Result<(), String>>) {
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let (state_tx, state_rx) = watch::channel(HeadlessState::default());

    let task = tokio::spawn(async move {
        run_headless_loop(config, event_rx, state_tx)
            .await
            .map_err(|e| e.to_string())
    });

    let handle = HeadlessHandle { event_tx, state_rx };

    (handle, task)
}

async fn run_headless_loop(
    config: HeadlessConfig,
    mut event_rx: mpsc::UnboundedReceiver<Event>,
    state_tx: watch::Sender<HeadlessState>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let backend = TestBackend::new(config.width, config.height);
    let mut terminal = Terminal::new(backend)?;

    let mut view = ConversationView::with_icon_mode(&config.chat, IconMode::Ascii);
    let tick_duration = config.chat.tick_rate();

    loop {
        terminal.draw(|frame| view.render(frame.area(), frame.buffer_mut()))?;

        let _ = state_tx.send(HeadlessState::capture(&view, terminal.backend().buffer()));

        if view.should_quit() {
            break;
        }

        let step = tokio::select! {
            event = event_rx.recv() => event.map_or(Step::Closed, Step::Event),
            Some(reply) = view.next_ready() => Step::Reply(reply),
            () = tokio::time::sleep(tick_duration) => Step::Event(Event::Tick),
        };

        if !apply_step(&mut view, step) {
            let _ = state_tx.send(HeadlessState::capture(&view, terminal.backend().buffer()));
            break;
        }
    }

    Ok(())
}

/// Convert a terminal buffer to a string representation.
///
/// One line per row, trailing whitespace trimmed, no trailing newline.
pub(crate) fn buffer_to_string(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut result = String::new();

    for y in area.y..area.y + area.height {
        for x in area.x..area.x + area.width {
            if let Some(cell) = buffer.cell((x, y)) {
                result.push_str(cell.symbol());
            }
        }
        while result.ends_with(' ') {
            result.pop();
        }
        result.push('\n');
    }

    if result.ends_with('\n') {
        result.pop();
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    const WAIT: Duration = Duration::from_secs(10);

    #[test]
    fn test_headless_config_default() {
        let config = HeadlessConfig::default();
        assert_eq!(config.width, DEFAULT_WIDTH);
        assert_eq!(config.height, DEFAULT_HEIGHT);
        assert_eq!(config.chat, Config::default());
    }

    #[tokio::test(start_paused = true)]
    async fn test_headless_welcome_then_quit() {
        let (mut handle, task) = run_tui_headless(HeadlessConfig::default());

        let state = handle
            .wait_for_text("Hello future warrior", WAIT)
            .await
            .expect("welcome screen");
        assert_eq!(state.history_len, 0);
        assert!(!state.pending);

        handle.send_key(KeyCode::Esc);
        handle
            .wait_for(|s| s.should_quit, WAIT)
            .await
            .expect("quit");
        task.await.unwrap().unwrap();
        assert!(handle.has_quit());
    }

    #[tokio::test(start_paused = true)]
    async fn test_headless_ctrl_c_publishes_quit() {
        let (mut handle, task) = run_tui_headless(HeadlessConfig::default());
        handle.type_text("draft");
        handle.send_event(Event::Key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        )));

        let state = handle
            .wait_for(|s| s.should_quit, WAIT)
            .await
            .expect("quit state published");
        assert_eq!(state.draft, "draft");
        task.await.unwrap().unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_headless_tick_follows_chat_config() {
        let config = HeadlessConfig {
            chat: Config {
                tick_rate_ms: 20,
                ..Config::default()
            },
            ..HeadlessConfig::default()
        };
        let (mut handle, task) = run_tui_headless(config);
        handle.type_text("a");
        handle.send_key(KeyCode::Enter);
        handle.wait_for(|s| s.pending, WAIT).await.expect("pending");

        // 2000 ms in flight at 20 ms per tick
        let mut frames = 0;
        while handle.state_rx.changed().await.is_ok() && handle.state().pending {
            frames += 1;
        }
        assert!(frames >= 50, "only {frames} frames");

        handle.send_key(KeyCode::Esc);
        task.await.unwrap().unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_headless_round_trip() {
        let (mut handle, task) = run_tui_headless(HeadlessConfig::default());

        handle.type_text("hello");
        handle.send_key(KeyCode::Enter);

        let state = handle
            .wait_for(|s| s.pending, WAIT)
            .await
            .expect("pending after submit");
        assert_eq!(state.history_len, 1);
        assert_eq!(state.draft, "");

        let state = handle
            .wait_for(|s| s.history_len == 2, WAIT)
            .await
            .expect("reply delivered");
        assert!(!state.pending);
        assert!(state
            .screen_contents
            .contains("This is a simulated response to: \"hello\""));

        handle.send_key(KeyCode::Esc);
        task.await.unwrap().unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_headless_paste_and_rejected_second_submit() {
        let (mut handle, task) = run_tui_headless(HeadlessConfig::default());

        handle.paste("a");
        handle.send_key(KeyCode::Enter);
        handle.wait_for(|s| s.pending, WAIT).await.expect("pending");

        handle.type_text("b");
        handle.send_key(KeyCode::Enter);
        let state = handle
            .wait_for(|s| s.history_len == 2, WAIT)
            .await
            .expect("first reply");
        assert!(state.screen_contents.contains("response to: \"a\""));
        assert!(!state.screen_contents.contains("response to: \"b\""));

        drop(handle);
        task.await.unwrap().unwrap();
    }

    #[test]
    fn test_buffer_to_string() {
        use ratatui::layout::Rect;
        use ratatui::style::Style;

        let area = Rect::new(0, 0, 10, 2);
        let mut buffer = Buffer::empty(area);
        buffer.set_string(0, 0, "Hello", Style::default());
        buffer.set_string(0, 1, "World", Style::default());

        assert_eq!(buffer_to_string(&buffer), "Hello\nWorld");
    }
}
