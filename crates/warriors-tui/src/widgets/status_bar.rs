//! Status bar widget.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::text::visual_width;
use crate::theme::Theme;

/// A key hint for the status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyHint {
    pub key: &'static str,
    pub label: &'static str,
}

impl KeyHint {
    pub const fn new(key: &'static str, label: &'static str) -> Self {
        Self { key, label }
    }
}

/// Hints shown in the chat view.
pub const CHAT_HINTS: [KeyHint; 3] = [
    KeyHint::new("Enter", "Ask"),
    KeyHint::new("PgUp/PgDn", "Scroll"),
    KeyHint::new("Esc/Ctrl+C", "Quit"),
];

/// Hints shown while a reply is pending.
pub const PENDING_HINTS: [KeyHint; 2] = [
    KeyHint::new("PgUp/PgDn", "Scroll"),
    KeyHint::new("Esc/Ctrl+C", "Quit"),
];

/// Status bar displayed at the bottom of the screen.
#[derive(Debug, Clone)]
pub struct StatusBar<'a> {
    mode: &'a str,
    hints: &'a [KeyHint],
    right_text: Option<&'a str>,
    theme: &'a Theme,
}

impl<'a> StatusBar<'a> {
    /// Create a new status bar showing `mode` on the left.
    pub fn new(mode: &'a str, theme: &'a Theme) -> Self {
        Self {
            mode,
            hints: &CHAT_HINTS,
            right_text: None,
            theme,
        }
    }

    #[must_use]
    pub fn hints(mut self, hints: &'a [KeyHint]) -> Self {
        self.hints = hints;
        self
    }

    /// Set right-aligned text.
    #[must_use]
    pub fn right(mut self, text: &'a str) -> Self {
        self.right_text = Some(text);
        self
    }
}

impl Widget for StatusBar<'_> {
    #[allow(clippy::cast_possible_truncation)]
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 1 {
            return;
        }

        let bar = Style::default().bg(self.theme.surface).fg(self.theme.subtext);
        buf.set_style(Rect::new(area.x, area.y, area.width, 1), bar);

        let mut spans = vec![
            Span::styled(
                format!(" {} ", self.mode),
                Style::default()
                    .bg(self.theme.primary)
                    .fg(self.theme.on_primary)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" ", bar),
        ];
        for hint in self.hints {
            spans.push(Span::styled(
                format!(" {} ", hint.key),
                bar.fg(self.theme.text).add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::styled(format!("{} ", hint.label), bar));
        }
        buf.set_line(area.x, area.y, &Line::from(spans), area.width);

        if let Some(text) = self.right_text {
            let width = visual_width(text) as u16;
            if width < area.width {
                let x = area.x + area.width - width - 1;
                buf.set_string(x, area.y, text, bar);
            }
        }
    }
}
