//! Icon sets for Nerd Fonts, Unicode, and ASCII fallback.

use warriors_engine::IconStyle;

const BRAILLE_SPINNER: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const ASCII_SPINNER: &[&str] = &["|", "/", "-", "\\"];

/// Icon mode configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IconMode {
    /// Nerd Font icons.
    Nerd,
    /// Standard Unicode symbols (default, wide compatibility).
    #[default]
    Unicode,
    /// ASCII-only fallback (maximum compatibility, also used with `NO_COLOR`).
    Ascii,
}

impl IconMode {
    /// Resolve the configured style, forcing ASCII when `NO_COLOR` is set.
    pub fn resolve(style: IconStyle) -> Self {
        if std::env::var_os("NO_COLOR").is_some() {
            return IconMode::Ascii;
        }
        style.into()
    }
}

impl From<IconStyle> for IconMode {
    fn from(style: IconStyle) -> Self {
        match style {
            IconStyle::Nerd => IconMode::Nerd,
            IconStyle::Unicode => IconMode::Unicode,
            IconStyle::Ascii => IconMode::Ascii,
        }
    }
}

/// Icon set based on configured mode.
#[derive(Debug, Clone, Default)]
pub struct IconSet {
    mode: IconMode,
}

impl IconSet {
    /// Create a new icon set with the specified mode.
    pub fn new(mode: IconMode) -> Self {
        Self { mode }
    }

    /// Get the current icon mode.
    pub fn mode(&self) -> IconMode {
        self.mode
    }

    /// Decorative magnifier in front of the input field.
    pub fn search(&self) -> &'static str {
        match self.mode {
            IconMode::Nerd => "\u{f002}",
            IconMode::Unicode => "⌕",
            IconMode::Ascii => "?",
        }
    }

    /// Frames of the "thinking" spinner.
    pub fn spinner(&self) -> &'static [&'static str] {
        match self.mode {
            IconMode::Nerd | IconMode::Unicode => BRAILLE_SPINNER,
            IconMode::Ascii => ASCII_SPINNER,
        }
    }

    /// Spinner frame for a tick count.
    pub fn spinner_frame(&self, tick: usize) -> &'static str {
        let frames = self.spinner();
        frames[tick % frames.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unicode() {
        assert_eq!(IconSet::default().mode(), IconMode::Unicode);
    }

    #[test]
    fn test_from_icon_style() {
        assert_eq!(IconMode::from(IconStyle::Nerd), IconMode::Nerd);
        assert_eq!(IconMode::from(IconStyle::Ascii), IconMode::Ascii);
    }

    #[test]
    fn test_ascii_icons_are_ascii() {
        let icons = IconSet::new(IconMode::Ascii);
        assert!(icons.search().is_ascii());
        assert!(icons.spinner().iter().all(|f| f.is_ascii()));
    }

    #[test]
    fn test_spinner_wraps() {
        let icons = IconSet::new(IconMode::Ascii);
        assert_eq!(icons.spinner_frame(0), "|");
        assert_eq!(icons.spinner_frame(4), "|");
        assert_eq!(icons.spinner_frame(5), "/");
    }
}
