//! Configuration for warriors.
//!
//! Settings are read from a JSON file; every field is optional and falls back
//! to its default, so an empty object is a valid config.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::conversation::DEFAULT_MAX_DRAFT_CHARS;

/// Longest accepted response delay (10 minutes).
pub const MAX_RESPONSE_DELAY_MS: u64 = 600_000;

/// Main configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Delay before the simulated reply arrives, in milliseconds.
    #[serde(default = "default_response_delay_ms")]
    pub response_delay_ms: u64,

    /// Maximum draft length in characters.
    #[serde(default = "default_max_draft_chars")]
    pub max_draft_chars: usize,

    /// UI tick interval in milliseconds (drives scrolling and the spinner).
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,

    /// Name shown in the header and in transcripts.
    #[serde(default = "default_assistant_name")]
    pub assistant_name: String,

    /// Subtitle under the header title.
    #[serde(default = "default_tagline")]
    pub tagline: String,

    /// Icon glyph set.
    #[serde(default)]
    pub icons: IconStyle,

    /// Color palette.
    #[serde(default)]
    pub theme: ThemeStyle,
}

fn default_response_delay_ms() -> u64 {
    2000
}

fn default_max_draft_chars() -> usize {
    DEFAULT_MAX_DRAFT_CHARS
}

fn default_tick_rate_ms() -> u64 {
    100
}

fn default_assistant_name() -> String {
    "The Warriors AI".into()
}

fn default_tagline() -> String {
    "Here to assist you".into()
}

/// Icon glyph set for the terminal UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum IconStyle {
    /// Nerd Font glyphs.
    Nerd,
    /// Standard Unicode symbols.
    #[default]
    Unicode,
    /// ASCII only.
    Ascii,
}

/// Color palette for the terminal UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ThemeStyle {
    /// Dark palette.
    #[default]
    Mocha,
    /// Light palette.
    Latte,
    HighContrast,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            response_delay_ms: default_response_delay_ms(),
            max_draft_chars: default_max_draft_chars(),
            tick_rate_ms: default_tick_rate_ms(),
            assistant_name: default_assistant_name(),
            tagline: default_tagline(),
            icons: IconStyle::default(),
            theme: ThemeStyle::default(),
        }
    }
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        let config: Self = serde_json::from_str(&content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file, or the defaults if it does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigError::Io)?;
        }
        std::fs::write(path, content).map_err(ConfigError::Io)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.response_delay_ms > MAX_RESPONSE_DELAY_MS {
            return Err(ConfigError::Invalid(format!(
                "response_delay_ms must be at most {MAX_RESPONSE_DELAY_MS}, got {}",
                self.response_delay_ms
            )));
        }
        if self.max_draft_chars == 0 {
            return Err(ConfigError::Invalid(
                "max_draft_chars must be greater than zero".into(),
            ));
        }
        if self.tick_rate_ms == 0 {
            return Err(ConfigError::Invalid(
                "tick_rate_ms must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    pub fn response_delay(&self) -> Duration {
        Duration::from_millis(self.response_delay_ms)
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }
}

/// Errors that can occur when working with configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error reading or writing config.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing config JSON.
    #[error("Parse error: {0}")]
    Parse(#[source] serde_json::Error),

    /// Error serializing config to JSON.
    #[error("Serialize error: {0}")]
    Serialize(#[source] serde_json::Error),

    /// A value is out of range.
    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.response_delay(), Duration::from_millis(2000));
        assert_eq!(config.max_draft_chars, 4000);
        assert_eq!(config.assistant_name, "The Warriors AI");
        assert_eq!(config.tagline, "Here to assist you");
        assert_eq!(config.icons, IconStyle::Unicode);
        assert_eq!(config.theme, ThemeStyle::Mocha);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: Config = serde_json::from_str(r#"{"response_delay_ms": 50}"#).unwrap();
        assert_eq!(config.response_delay_ms, 50);
        assert_eq!(config.tick_rate_ms, 100);
        assert_eq!(config.assistant_name, "The Warriors AI");
    }

    #[test]
    fn test_icon_style_snake_case() {
        let config: Config = serde_json::from_str(r#"{"icons": "ascii"}"#).unwrap();
        assert_eq!(config.icons, IconStyle::Ascii);
    }

    #[test]
    fn test_theme_style_snake_case() {
        let config: Config = serde_json::from_str(r#"{"theme": "high_contrast"}"#).unwrap();
        assert_eq!(config.theme, ThemeStyle::HighContrast);
        assert!(serde_json::from_str::<Config>(r#"{"theme": "neon"}"#).is_err());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = Config {
            response_delay_ms: 10,
            tagline: "Ready".into(),
            ..Config::default()
        };
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_or_default(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_rejects_bad_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(Config::load(&path), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_validate_rejects_out_of_range_values() {
        let too_slow = Config {
            response_delay_ms: MAX_RESPONSE_DELAY_MS + 1,
            ..Config::default()
        };
        assert!(matches!(too_slow.validate(), Err(ConfigError::Invalid(_))));

        let no_draft = Config {
            max_draft_chars: 0,
            ..Config::default()
        };
        assert!(matches!(no_draft.validate(), Err(ConfigError::Invalid(_))));

        let no_tick = Config {
            tick_rate_ms: 0,
            ..Config::default()
        };
        assert!(no_tick.validate().is_err());
    }

    #[test]
    fn test_load_validates() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"max_draft_chars": 0}"#).unwrap();
        let err = Config::load(&path).unwrap_err();
        assert!(err.to_string().contains("max_draft_chars"));
    }
}
