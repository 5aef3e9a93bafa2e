use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use termlink_core::GameConfig;

use crate::theme::Theme;

/// Settings file contents, every field is optional.
///
/// ```toml
/// theme = "ascii"
///
/// [board]
/// width = 16
/// height = 16
/// mines = 40
/// seed = 7
/// ```
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub theme: Theme,
    pub board: BoardSettings,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BoardSettings {
    pub width: u8,
    pub height: u8,
    pub mines: u16,
    pub seed: Option<u64>,
}

impl Default for BoardSettings {
    fn default() -> Self {
        let GameConfig {
            size: (width, height),
            mines,
        } = GameConfig::DEFAULT;
        Self {
            width,
            height,
            mines,
            seed: None,
        }
    }
}

impl BoardSettings {
    pub fn game_config(&self) -> termlink_core::Result<GameConfig> {
        GameConfig::new((self.width, self.height), self.mines)
    }
}

impl Settings {
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("Invalid settings")
    }

    /// Reads the settings file, or falls back to defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Could not read settings from {}", path.display()))?;
        let settings = Self::from_toml(&text)
            .with_context(|| format!("Could not load settings from {}", path.display()))?;
        log::debug!("Loaded settings from {}: {:?}", path.display(), settings);
        Ok(settings)
    }
}
