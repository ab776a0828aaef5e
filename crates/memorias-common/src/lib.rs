//! Common types shared across Memorias crates: UI language and game configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Logical display width (all map coordinates live in this space)
pub const LOGICAL_WIDTH: u32 = 426;
/// Logical display height
pub const LOGICAL_HEIGHT: u32 = 240;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid setting: {0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Supported UI languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Portuguese,
    English,
}

impl Language {
    /// Cycle to the next language
    pub fn next(self) -> Self {
        match self {
            Language::Portuguese => Language::English,
            Language::English => Language::Portuguese,
        }
    }

    /// Short display code
    pub fn code(&self) -> &'static str {
        match self {
            Language::Portuguese => "PT",
            Language::English => "EN",
        }
    }
}

/// Player configuration, read from `memorias.toml`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Directory holding `maps/` and `images/`. `None` → search well-known places.
    pub asset_dir: Option<PathBuf>,
    /// Integer window scale applied to the 426×240 framebuffer
    pub window_scale: u32,
    pub fullscreen: bool,
    pub language: Language,
    /// Default `tracing` filter directive (overridden by `RUST_LOG`)
    pub log_level: String,
    /// Delay before the first room is loaded
    pub setup_delay_ms: u32,
    /// Room loaded after the setup delay
    pub start_room: u8,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            asset_dir: None,
            window_scale: 3,
            fullscreen: false,
            language: Language::Portuguese,
            log_level: "memorias=info".to_string(),
            setup_delay_ms: 100,
            start_room: 1,
        }
    }
}

impl GameConfig {
    /// Parse a config from TOML text and validate it
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: GameConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read the config file. `Ok(None)` if there is no file at `path`.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.is_file() {
            return Ok(None);
        }
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text).map(Some)
    }

    /// Load the config file if it exists, defaults otherwise
    pub fn load_or_default(path: &Path) -> Result<Self> {
        Ok(Self::load(path)?.unwrap_or_default())
    }

    pub fn validate(&self) -> Result<()> {
        if self.window_scale == 0 || self.window_scale > 8 {
            return Err(ConfigError::Invalid(format!(
                "window_scale must be 1..=8, got {}",
                self.window_scale
            )));
        }
        if self.start_room == 0 {
            return Err(ConfigError::Invalid("start_room is 1-based".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.setup_delay_ms, 100);
        assert_eq!(config.start_room, 1);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = GameConfig::from_toml("window_scale = 2\nlanguage = \"english\"\n").unwrap();
        assert_eq!(config.window_scale, 2);
        assert_eq!(config.language, Language::English);
        assert_eq!(config.start_room, 1);
    }

    #[test]
    fn zero_scale_is_rejected() {
        let err = GameConfig::from_toml("window_scale = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("memorias_no_such_config.toml");
        let config = GameConfig::load_or_default(&path).unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn load_reports_whether_a_file_was_read() {
        let dir = std::env::temp_dir().join("memorias_config_load");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("memorias.toml");
        assert!(GameConfig::load(&path).unwrap().is_none());

        std::fs::write(&path, "start_room = 3\n").unwrap();
        let config = GameConfig::load(&path).unwrap().unwrap();
        assert_eq!(config.start_room, 3);

        std::fs::write(&path, "window_scale = 99\n").unwrap();
        assert!(matches!(GameConfig::load(&path), Err(ConfigError::Invalid(_))));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn language_cycle() {
        assert_eq!(Language::Portuguese.next(), Language::English);
        assert_eq!(Language::English.next(), Language::Portuguese);
    }
}
