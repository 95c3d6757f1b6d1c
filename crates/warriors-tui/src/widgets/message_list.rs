//! Scrollable list of message bubbles.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, StatefulWidget, Widget},
};
use warriors_engine::{Message, MessageStore};

use crate::scroll::ScrollAnchor;
use crate::text::{visual_width, wrap_text};
use crate::theme::Theme;

/// Maximum bubble width as a percentage of the list width.
pub const BUBBLE_PERCENT: usize = 70;

/// Horizontal padding inside a bubble, per side.
const PADDING: usize = 1;

/// Lay out every message as bubble lines for a list `width` cells wide.
///
/// User bubbles are right-aligned, assistant bubbles left-aligned, with a
/// blank line between messages.
pub fn message_lines(history: &MessageStore, width: usize, theme: &Theme) -> Vec<Line<'static>> {
    let bubble_width = (width * BUBBLE_PERCENT / 100).max(PADDING * 2 + 1);
    let text_width = bubble_width - PADDING * 2;

    let mut lines = Vec::new();
    for (i, message) in history.iter().enumerate() {
        if i > 0 {
            lines.push(Line::raw(""));
        }
        lines.extend(bubble(message, text_width, theme));
    }
    lines
}

fn bubble(message: &Message, text_width: usize, theme: &Theme) -> Vec<Line<'static>> {
    let (style, alignment) = if message.is_user() {
        (
            Style::default().bg(theme.user_bubble).fg(theme.user_text),
            Alignment::Right,
        )
    } else {
        (
            Style::default()
                .bg(theme.assistant_bubble)
                .fg(theme.assistant_text),
            Alignment::Left,
        )
    };

    let wrapped = wrap_text(message.text(), text_width);
    let inner = wrapped.iter().map(|l| visual_width(l)).max().unwrap_or(0);
    let pad = " ".repeat(PADDING);

    wrapped
        .into_iter()
        .map(|text| {
            let fill = " ".repeat(inner - visual_width(&text));
            Line::from(Span::styled(format!("{pad}{text}{fill}{pad}"), style)).alignment(alignment)
        })
        .collect()
}

/// Message list rendered at the offset held by a [`ScrollAnchor`].
///
/// Rendering records the content and viewport height on the anchor so the
/// next tick knows where the bottom is.
pub struct MessageList<'a> {
    history: &'a MessageStore,
    theme: &'a Theme,
}

impl<'a> MessageList<'a> {
    pub fn new(history: &'a MessageStore, theme: &'a Theme) -> Self {
        Self { history, theme }
    }
}

impl StatefulWidget for MessageList<'_> {
    type State = ScrollAnchor;

    #[allow(clippy::cast_possible_truncation)]
    fn render(self, area: Rect, buf: &mut Buffer, anchor: &mut ScrollAnchor) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        // one column of margin on each side
        let inner = Rect::new(
            area.x + 1,
            area.y,
            area.width.saturating_sub(2),
            area.height,
        );
        let lines = message_lines(self.history, inner.width as usize, self.theme);
        anchor.set_extent(lines.len(), inner.height as usize);

        let offset = anchor.offset().min(u16::MAX as usize) as u16;
        Paragraph::new(lines)
            .scroll((offset, 0))
            .render(inner, buf);
    }
}
