//! Header widget.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::theme::{BorderSet, Theme};

/// Glyph shown in the avatar badge.
pub const AVATAR: &str = "W";

/// Three-row header: avatar badge with title and tagline, then a divider.
pub struct Header<'a> {
    title: &'a str,
    tagline: &'a str,
    theme: &'a Theme,
    borders: &'a BorderSet,
}

impl<'a> Header<'a> {
    pub fn new(title: &'a str, tagline: &'a str, theme: &'a Theme, borders: &'a BorderSet) -> Self {
        Self {
            title,
            tagline,
            theme,
            borders,
        }
    }
}

impl Widget for Header<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let badge = Style::default()
            .bg(self.theme.avatar)
            .fg(self.theme.on_avatar)
            .add_modifier(Modifier::BOLD);

        let title = Line::from(vec![
            Span::raw(" "),
            Span::styled(format!(" {AVATAR} "), badge),
            Span::raw("  "),
            Span::styled(
                self.title.to_string(),
                Style::default()
                    .fg(self.theme.text)
                    .add_modifier(Modifier::BOLD),
            ),
        ]);
        buf.set_line(area.x, area.y, &title, area.width);

        if area.height > 1 {
            let tagline = Line::from(vec![
                Span::raw(" "),
                Span::styled("   ", badge),
                Span::raw("  "),
                Span::styled(self.tagline.to_string(), Style::default().fg(self.theme.muted)),
            ]);
            buf.set_line(area.x, area.y + 1, &tagline, area.width);
        }

        if area.height > 2 {
            let rule = self.borders.horizontal().repeat(area.width as usize);
            buf.set_string(
                area.x,
                area.y + 2,
                rule,
                Style::default().fg(self.theme.border),
            );
        }
    }
}
