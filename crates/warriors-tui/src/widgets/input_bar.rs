//! Single-line input bar with the Ask button.
//!
//! The field shows a decorative search icon, the draft (or a placeholder
//! when empty) and the submit button. While a reply is pending the whole bar
//! is dimmed and the button reads "Thinking...".

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Widget},
};
use unicode_width::UnicodeWidthChar;

use crate::text::{tail_to_width, visual_width};
use crate::theme::{BorderSet, IconSet, Theme};

/// Text shown in the empty field.
pub const PLACEHOLDER: &str = "Ask whatever you want";

const CURSOR: &str = "█";

/// Submit button label for the current pending state.
pub fn button_label(pending: bool) -> &'static str {
    if pending {
        "Thinking..."
    } else {
        "Ask"
    }
}

/// Cells covered by the submit button when the bar is drawn in `area`.
///
/// `None` when the bar is too narrow to show the button.
#[allow(clippy::cast_possible_truncation)]
pub fn button_area(area: Rect, pending: bool) -> Option<Rect> {
    let inner = Block::bordered().inner(area);
    if inner.height == 0 {
        return None;
    }
    let width = visual_width(&button_text(pending)) as u16;
    (width < inner.width).then(|| Rect::new(inner.x + inner.width - width, inner.y, width, 1))
}

fn button_text(pending: bool) -> String {
    format!("[ {} ]", button_label(pending))
}

/// Input bar widget. Needs three rows (border, text, border).
pub struct InputBar<'a> {
    draft: &'a str,
    cursor: usize,
    pending: bool,
    submittable: bool,
    theme: &'a Theme,
    icons: &'a IconSet,
    borders: &'a BorderSet,
}

impl<'a> InputBar<'a> {
    /// Create an input bar for `draft` with the cursor at character `cursor`.
    pub fn new(
        draft: &'a str,
        cursor: usize,
        theme: &'a Theme,
        icons: &'a IconSet,
        borders: &'a BorderSet,
    ) -> Self {
        Self {
            draft,
            cursor,
            pending: false,
            submittable: false,
            theme,
            icons,
            borders,
        }
    }

    /// Dim the field and show "Thinking..." while a reply is pending.
    #[must_use]
    pub fn pending(mut self, pending: bool) -> Self {
        self.pending = pending;
        self
    }

    /// Whether the Ask button is enabled.
    #[must_use]
    pub fn submittable(mut self, submittable: bool) -> Self {
        self.submittable = submittable;
        self
    }

    /// Visible part of the draft for a field `width` cells wide, keeping the
    /// cursor in view.
    fn visible_draft(&self, width: usize) -> Vec<Span<'static>> {
        let text_style = if self.pending {
            Style::default()
                .fg(self.theme.muted)
                .add_modifier(Modifier::DIM)
        } else {
            Style::default().fg(self.theme.text)
        };

        if self.draft.is_empty() {
            let placeholder = Style::default().fg(self.theme.muted);
            let placeholder = if self.pending {
                placeholder.add_modifier(Modifier::DIM)
            } else {
                placeholder
            };
            return vec![Span::styled(PLACEHOLDER, placeholder)];
        }

        let split = self
            .draft
            .char_indices()
            .nth(self.cursor)
            .map_or(self.draft.len(), |(i, _)| i);
        let (before, after) = self.draft.split_at(split);
        let cursor = if self.pending { "" } else { CURSOR };

        let head_room = width.saturating_sub(visual_width(cursor));
        let head = tail_to_width(before, head_room);

        let mut room = width.saturating_sub(visual_width(head) + visual_width(cursor));
        let mut tail = String::new();
        for ch in after.chars() {
            let w = UnicodeWidthChar::width(ch).unwrap_or(0);
            if w > room {
                break;
            }
            room -= w;
            tail.push(ch);
        }

        let mut spans = vec![Span::styled(head.to_string(), text_style)];
        if !cursor.is_empty() {
            spans.push(Span::styled(cursor, Style::default().fg(self.theme.primary)));
        }
        spans.push(Span::styled(tail, text_style));
        spans
    }
}

impl Widget for InputBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.pending {
            Style::default().fg(self.theme.border)
        } else {
            Style::default().fg(self.theme.border_focused)
        };
        let block = Block::bordered()
            .border_set(self.borders.normal())
            .border_style(border_style);
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let icon = format!(" {} ", self.icons.search());
        let button = button_text(self.pending);
        let button_style = if self.submittable && !self.pending {
            Style::default()
                .bg(self.theme.primary)
                .fg(self.theme.on_primary)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .fg(self.theme.muted)
                .add_modifier(Modifier::DIM)
        };

        let total = inner.width as usize;
        let field_width = total
            .saturating_sub(visual_width(&icon))
            .saturating_sub(visual_width(&button) + 1);

        let mut spans = vec![Span::styled(icon, Style::default().fg(self.theme.muted))];
        spans.extend(self.visible_draft(field_width));
        buf.set_line(inner.x, inner.y, &Line::from(spans), inner.width);

        if let Some(button_rect) = button_area(area, self.pending) {
            buf.set_string(button_rect.x, button_rect.y, button, button_style);
        }
    }
}
