//! Placeholder shown while the history is empty.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Paragraph, Widget},
};

use crate::theme::Theme;

pub const GREETING: &str = "Hello future warrior";
pub const HEADLINE: &str = "The warriors are here to assist you";
pub const PROMPT: &str = "Ask anything to get started";

/// Welcome placeholder, centered in the message area.
pub struct Welcome<'a> {
    theme: &'a Theme,
}

impl<'a> Welcome<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }
}

impl Widget for Welcome<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines = vec![
            Line::styled(GREETING, Style::default().fg(self.theme.subtext)),
            Line::raw(""),
            Line::styled(
                HEADLINE,
                Style::default()
                    .fg(self.theme.text)
                    .add_modifier(Modifier::BOLD),
            ),
            Line::raw(""),
            Line::styled(PROMPT, Style::default().fg(self.theme.muted)),
        ];

        #[allow(clippy::cast_possible_truncation)]
        let height = lines.len() as u16;
        let top = area.y + area.height.saturating_sub(height) / 2;
        let inner = Rect::new(area.x, top, area.width, height.min(area.height));

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(inner, buf);
    }
}
