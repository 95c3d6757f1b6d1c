//! The chat view: session state plus everything needed to draw it.

use crossterm::event::{KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Position, Rect},
    widgets::{StatefulWidget, Widget},
};
use tracing::debug;
use warriors_engine::{ChatSession, Config, Conversation, PendingReply, SubmitOutcome};

use crate::event::{key_to_action, Action, Event};
use crate::input::{InputController, KeyOutcome};
use crate::scroll::{ScrollAnchor, SCROLL_STEP};
use crate::theme::{BorderSet, IconMode, IconSet, Theme};
use crate::widgets::{
    button_area, Header, InputBar, MessageList, StatusBar, Welcome, CHAT_HINTS, PENDING_HINTS,
};

/// Screen regions of the chat view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChatLayout {
    pub header: Rect,
    pub messages: Rect,
    pub input: Rect,
    pub status: Rect,
}

/// Split `area` into header, message list, input bar and status bar.
pub fn chat_layout(area: Rect) -> ChatLayout {
    let [header, messages, input, status] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(1),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .areas(area);
    ChatLayout {
        header,
        messages,
        input,
        status,
    }
}

/// Chat view state.
///
/// Owns the [`ChatSession`] and routes terminal events to it. The scroll
/// anchor is notified of every history change and animated on ticks.
pub struct ConversationView {
    session: ChatSession,
    input: InputController,
    scroll: ScrollAnchor,
    theme: Theme,
    icons: IconSet,
    borders: BorderSet,
    title: String,
    tagline: String,
    /// Ask button cells as of the last render.
    ask_button: Option<Rect>,
    tick: usize,
    should_quit: bool,
}

impl ConversationView {
    /// Create an idle view. Icons fall back to ASCII when `NO_COLOR` is set.
    pub fn new(config: &Config) -> Self {
        Self::with_icon_mode(config, IconMode::resolve(config.icons))
    }

    pub fn with_icon_mode(config: &Config, mode: IconMode) -> Self {
        Self {
            session: ChatSession::new(config),
            input: InputController::new(),
            scroll: ScrollAnchor::new(),
            theme: Theme::from(config.theme),
            icons: IconSet::new(mode),
            borders: BorderSet::new(mode),
            title: config.assistant_name.clone(),
            tagline: config.tagline.clone(),
            ask_button: None,
            tick: 0,
            should_quit: false,
        }
    }

    pub fn conversation(&self) -> &Conversation {
        self.session.conversation()
    }

    pub fn scroll(&self) -> &ScrollAnchor {
        &self.scroll
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Route a terminal event.
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Paste(text) => {
                self.input.paste(&text, &mut self.session);
            }
            Event::Tick => self.tick(),
            // the next draw picks up the new size
            Event::Resize(width, height) => debug!(width, height, "terminal resized"),
        }
    }

    /// Handle a key press: view actions first, then draft editing.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind == KeyEventKind::Release {
            return;
        }
        let action = key_to_action(key);
        if action != Action::None {
            self.handle_action(action);
            return;
        }
        if self.input.on_key(key, &mut self.session) == KeyOutcome::Submit {
            self.submit();
        }
    }

    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::ScrollUp => self.scroll.scroll_up(SCROLL_STEP),
            Action::ScrollDown => self.scroll.scroll_down(SCROLL_STEP),
            Action::PageUp => self.scroll.page_up(),
            Action::PageDown => self.scroll.page_down(),
            Action::Top => self.scroll.jump_to_top(),
            Action::Bottom => self.scroll.jump_to_bottom(),
            Action::None => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::ScrollUp => self.scroll.scroll_up(SCROLL_STEP),
            MouseEventKind::ScrollDown => self.scroll.scroll_down(SCROLL_STEP),
            MouseEventKind::Down(MouseButton::Left) => {
                let at = Position::new(mouse.column, mouse.row);
                if self.ask_button.is_some_and(|button| button.contains(at)) {
                    self.submit();
                }
            }
            _ => {}
        }
    }

    /// Replace the draft, as if typed.
    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.input.set_draft(&mut self.session, text);
    }

    /// Submit the current draft.
    pub fn submit(&mut self) -> SubmitOutcome {
        self.session.submit(&mut self.scroll)
    }

    /// Wait for the scheduled reply. Pending forever when nothing is in flight.
    pub async fn next_ready(&mut self) -> Option<PendingReply> {
        self.session.next_ready().await
    }

    /// Append a ready reply and scroll to it.
    pub fn apply_reply(&mut self, reply: &PendingReply) {
        self.session.complete(reply, &mut self.scroll);
    }

    /// Advance animations by one tick.
    pub fn tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
        self.scroll.tick();
    }

    /// Draw the whole view into `buf`.
    pub fn render(&mut self, area: Rect, buf: &mut Buffer) {
        let layout = chat_layout(area);

        Header::new(&self.title, &self.tagline, &self.theme, &self.borders)
            .render(layout.header, buf);

        let history = self.session.conversation().history();
        if history.is_empty() {
            Welcome::new(&self.theme).render(layout.messages, buf);
        } else {
            MessageList::new(history, &self.theme).render(layout.messages, buf, &mut self.scroll);
        }

        let conversation = self.session.conversation();
        let pending = conversation.is_pending();
        self.ask_button = button_area(layout.input, pending);
        InputBar::new(
            conversation.draft(),
            self.input.cursor(conversation.draft()),
            &self.theme,
            &self.icons,
            &self.borders,
        )
        .pending(pending)
        .submittable(self.input.is_submittable(&self.session))
        .render(layout.input, buf);

        let (mode, hints) = if pending {
            (
                format!("{} Thinking", self.icons.spinner_frame(self.tick)),
                &PENDING_HINTS[..],
            )
        } else {
            ("Chat".to_string(), &CHAT_HINTS[..])
        };
        let count = match history.len() {
            1 => "1 message".to_string(),
            n => format!("{n} messages"),
        };
        StatusBar::new(&mode, &self.theme)
            .hints(hints)
            .right(&count)
            .render(layout.status, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::render_view_to_string;
    use crossterm::event::{KeyCode, KeyModifiers};
    use warriors_engine::ThemeStyle;

    fn view() -> ConversationView {
        ConversationView::with_icon_mode(&Config::default(), IconMode::Ascii)
    }

    fn press(view: &mut ConversationView, code: KeyCode) {
        view.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn click(view: &mut ConversationView, column: u16, row: u16) {
        for kind in [
            MouseEventKind::Down(MouseButton::Left),
            MouseEventKind::Up(MouseButton::Left),
        ] {
            view.handle_event(Event::Mouse(MouseEvent {
                kind,
                column,
                row,
                modifiers: KeyModifiers::NONE,
            }));
        }
    }

    fn type_str(view: &mut ConversationView, s: &str) {
        for ch in s.chars() {
            press(view, KeyCode::Char(ch));
        }
    }

    #[test]
    fn test_chat_layout_regions() {
        let layout = chat_layout(Rect::new(0, 0, 80, 24));
        assert_eq!(layout.header.height, 3);
        assert_eq!(layout.messages.height, 17);
        assert_eq!(layout.input.height, 3);
        assert_eq!(layout.status, Rect::new(0, 23, 80, 1));
    }

    #[test]
    fn test_initial_render_shows_welcome() {
        let mut view = view();
        let screen = render_view_to_string(&mut view, 80, 24);
        assert!(screen.contains("The Warriors AI"));
        assert!(screen.contains("Here to assist you"));
        assert!(screen.contains("Hello future warrior"));
        assert!(screen.contains("The warriors are here to assist you"));
        assert!(screen.contains("Ask anything to get started"));
        assert!(screen.contains("Ask whatever you want"));
        assert!(screen.contains("[ Ask ]"));
        assert!(screen.contains("0 messages"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_enter_submits_and_disables() {
        let mut view = view();
        type_str(&mut view, "hello");
        press(&mut view, KeyCode::Enter);

        assert!(view.conversation().is_pending());
        assert_eq!(view.conversation().draft(), "");
        assert_eq!(view.scroll().requests(), 1);

        let screen = render_view_to_string(&mut view, 80, 24);
        assert!(screen.contains("hello"));
        assert!(screen.contains("[ Thinking... ]"));
        assert!(screen.contains("Thinking"));
        assert!(!screen.contains("Enter Ask"));
        assert!(!screen.contains("Hello future warrior"));

        let reply = view.next_ready().await.unwrap();
        view.apply_reply(&reply);
        assert!(!view.conversation().is_pending());
        assert_eq!(view.scroll().requests(), 2);

        let screen = render_view_to_string(&mut view, 80, 24);
        assert!(screen.contains("This is a simulated response to: \"hello\""));
        assert!(screen.contains("[ Ask ]"));
        assert!(screen.contains("2 messages"));
        assert!(screen.contains("Enter Ask"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_typing_while_pending_is_ignored() {
        let mut view = view();
        view.set_draft("a");
        view.submit();
        type_str(&mut view, "b");
        press(&mut view, KeyCode::Enter);
        assert_eq!(view.conversation().history().len(), 1);
        assert_eq!(view.conversation().draft(), "");
    }

    #[test]
    fn test_shift_enter_keeps_draft() {
        let mut view = view();
        view.set_draft("x");
        view.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::SHIFT));
        assert_eq!(view.conversation().draft(), "x");
        assert!(view.conversation().history().is_empty());
    }

    #[test]
    fn test_empty_enter_is_ignored() {
        let mut view = view();
        view.set_draft("   ");
        press(&mut view, KeyCode::Enter);
        assert!(view.conversation().history().is_empty());
        assert_eq!(view.scroll().requests(), 0);
    }

    #[test]
    fn test_quit_keys() {
        let mut esc = view();
        press(&mut esc, KeyCode::Esc);
        assert!(esc.should_quit());

        let mut ctrl_c = view();
        ctrl_c.handle_event(Event::Key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        )));
        assert!(ctrl_c.should_quit());
    }

    #[test]
    fn test_q_types_instead_of_quitting() {
        let mut view = view();
        press(&mut view, KeyCode::Char('q'));
        assert!(!view.should_quit());
        assert_eq!(view.conversation().draft(), "q");
    }

    #[test]
    fn test_paste_event_edits_draft() {
        let mut view = view();
        view.handle_event(Event::Paste("multi\nline".to_string()));
        assert_eq!(view.conversation().draft(), "multi line");
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_glide_to_latest_message() {
        let mut view = view();
        for i in 0..8 {
            view.set_draft(format!("question {i}"));
            view.submit();
            let reply = view.next_ready().await.unwrap();
            view.apply_reply(&reply);
        }
        // render once so the anchor learns the list height
        render_view_to_string(&mut view, 80, 24);
        assert!(view.scroll().max_offset() > 0);

        for _ in 0..20 {
            view.tick();
        }
        assert!(view.scroll().at_bottom());

        view.handle_action(Action::PageUp);
        assert!(!view.scroll().is_following());
        view.handle_action(Action::Bottom);
        assert!(view.scroll().at_bottom());
    }

    #[tokio::test(start_paused = true)]
    async fn test_click_on_ask_submits() {
        let mut view = view();
        view.set_draft("hello");
        render_view_to_string(&mut view, 80, 24);

        // button row of the input bar, inside "[ Ask ]"
        click(&mut view, 75, 21);
        assert!(view.conversation().is_pending());
        assert_eq!(view.conversation().history().len(), 1);
        assert_eq!(view.conversation().draft(), "");
    }

    #[test]
    fn test_click_outside_ask_does_nothing() {
        let mut view = view();
        view.set_draft("hello");
        render_view_to_string(&mut view, 80, 24);

        click(&mut view, 10, 21);
        click(&mut view, 75, 10);
        assert!(view.conversation().history().is_empty());
        assert_eq!(view.conversation().draft(), "hello");
    }

    #[tokio::test(start_paused = true)]
    async fn test_click_while_pending_is_ignored() {
        let mut view = view();
        view.set_draft("first");
        view.submit();
        render_view_to_string(&mut view, 80, 24);

        view.set_draft("second");
        click(&mut view, 75, 21);
        assert_eq!(view.conversation().history().len(), 1);
        assert!(view.conversation().is_pending());
    }

    #[test]
    fn test_theme_follows_config() {
        let config = Config {
            theme: ThemeStyle::HighContrast,
            ..Config::default()
        };
        let mut view = ConversationView::with_icon_mode(&config, IconMode::Ascii);
        let mut terminal = crate::test_utils::create_test_terminal();
        terminal
            .draw(|frame| view.render(frame.area(), frame.buffer_mut()))
            .unwrap();
        // top-left corner of the input bar border
        let cell = &terminal.backend().buffer()[(0, 20)];
        assert_eq!(cell.fg, Theme::high_contrast().border_focused);
    }
}
