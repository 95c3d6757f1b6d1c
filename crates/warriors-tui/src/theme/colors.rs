//! Catppuccin color palettes for the TUI.

use ratatui::style::Color;
use warriors_engine::ThemeStyle;

/// Theme color palette.
#[derive(Debug, Clone)]
pub struct Theme {
    // Backgrounds
    pub surface: Color,

    // Foregrounds
    pub text: Color,
    pub subtext: Color,
    pub muted: Color,

    // Accents
    pub primary: Color,
    pub on_primary: Color,

    // Message bubbles
    pub user_bubble: Color,
    pub user_text: Color,
    pub assistant_bubble: Color,
    pub assistant_text: Color,

    // Avatar
    pub avatar: Color,
    pub on_avatar: Color,

    // Borders
    pub border: Color,
    pub border_focused: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::mocha()
    }
}

impl From<ThemeStyle> for Theme {
    fn from(style: ThemeStyle) -> Self {
        match style {
            ThemeStyle::Mocha => Self::mocha(),
            ThemeStyle::Latte => Self::latte(),
            ThemeStyle::HighContrast => Self::high_contrast(),
        }
    }
}

impl Theme {
    /// Catppuccin Mocha theme (default dark theme).
    pub fn mocha() -> Self {
        Self {
            surface: Color::Rgb(49, 50, 68), // #313244

            text: Color::Rgb(205, 214, 244),    // #cdd6f4
            subtext: Color::Rgb(166, 173, 200), // #a6adc8
            muted: Color::Rgb(108, 112, 134),   // #6c7086

            primary: Color::Rgb(203, 166, 247), // #cba6f7 (mauve)
            on_primary: Color::Rgb(17, 17, 27), // #11111b (crust)

            user_bubble: Color::Rgb(203, 166, 247), // mauve
            user_text: Color::Rgb(17, 17, 27),
            assistant_bubble: Color::Rgb(49, 50, 68), // surface0
            assistant_text: Color::Rgb(205, 214, 244),

            avatar: Color::Rgb(205, 214, 244),
            on_avatar: Color::Rgb(17, 17, 27),

            border: Color::Rgb(69, 71, 90),             // #45475a
            border_focused: Color::Rgb(203, 166, 247), // mauve
        }
    }

    /// Catppuccin Latte theme (light theme).
    pub fn latte() -> Self {
        Self {
            surface: Color::Rgb(230, 233, 239), // #e6e9ef

            text: Color::Rgb(76, 79, 105),    // #4c4f69
            subtext: Color::Rgb(92, 95, 119), // #5c5f77
            muted: Color::Rgb(140, 143, 161), // #8c8fa1

            primary: Color::Rgb(136, 57, 239),     // #8839ef (mauve)
            on_primary: Color::Rgb(239, 241, 245), // base

            user_bubble: Color::Rgb(136, 57, 239),
            user_text: Color::Rgb(239, 241, 245),
            assistant_bubble: Color::Rgb(220, 224, 232), // #dce0e8
            assistant_text: Color::Rgb(76, 79, 105),

            avatar: Color::Rgb(76, 79, 105),
            on_avatar: Color::Rgb(239, 241, 245),

            border: Color::Rgb(188, 192, 204),        // #bcc0cc
            border_focused: Color::Rgb(136, 57, 239), // mauve
        }
    }

    /// High contrast theme for accessibility.
    pub fn high_contrast() -> Self {
        Self {
            surface: Color::Rgb(20, 20, 20),

            text: Color::White,
            subtext: Color::Rgb(200, 200, 200),
            muted: Color::Rgb(150, 150, 150),

            primary: Color::Magenta,
            on_primary: Color::Black,

            user_bubble: Color::Magenta,
            user_text: Color::Black,
            assistant_bubble: Color::Rgb(40, 40, 40),
            assistant_text: Color::White,

            avatar: Color::White,
            on_avatar: Color::Black,

            border: Color::White,
            border_focused: Color::Magenta,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_mocha() {
        assert_eq!(Theme::default().surface, Theme::mocha().surface);
    }

    #[test]
    fn test_from_style() {
        assert_eq!(Theme::from(ThemeStyle::Latte).text, Color::Rgb(76, 79, 105));
        assert_eq!(Theme::from(ThemeStyle::HighContrast).text, Color::White);
        assert_eq!(Theme::from(ThemeStyle::Mocha).primary, Color::Rgb(203, 166, 247));
    }

    #[test]
    fn test_bubbles_are_distinct() {
        for theme in [Theme::mocha(), Theme::latte(), Theme::high_contrast()] {
            assert_ne!(theme.user_bubble, theme.assistant_bubble);
        }
    }
}
