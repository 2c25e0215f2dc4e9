use std::{
    ops::Not,
    path::{Path, PathBuf},
};

use chrono::format::{Item, StrftimeItems};
use eframe::egui;
use serde::{Deserialize, Serialize};

use crate::{alarm::DEFAULT_SNOOZE_MINUTES, error::ConfigError, sound::DEFAULT_SOUND};

#[derive(Debug, Serialize, Deserialize, Default, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Not for Theme {
    type Output = Self;

    fn not(self) -> Self::Output {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }
}

impl From<Theme> for egui::Visuals {
    fn from(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self::dark(),
            Theme::Light => Self::light(),
        }
    }
}

/// Settings only, alarms are never written to disk.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub time_format: String,
    pub theme: Theme,
    pub snooze_minutes: u32,
    /// relative paths are looked up from the working directory
    pub sound: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            time_format: "%H:%M:%S %p\n%D".to_string(),
            theme: Theme::Dark,
            snooze_minutes: DEFAULT_SNOOZE_MINUTES,
            sound: PathBuf::from(DEFAULT_SOUND),
        }
    }
}

impl Config {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the config at `path`, a missing file gives the defaults.
    ///
    /// # Errors
    /// if the file can't be read or parsed, or holds invalid values
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::info!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let config = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&config).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// like [`Config::load`] but falls back to the defaults on any error
    #[must_use]
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            log::error!("{e}, using default config");
            Self::default()
        })
    }

    /// # Errors
    /// if the config can't be serialized or written
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let config = toml::to_string(self)?;
        let write_error = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(write_error)?;
        }
        std::fs::write(path, config).map_err(write_error)
    }

    /// # Errors
    /// if the time format has unknown specifiers or snoozing is shorter than a minute
    pub fn validate(&self) -> Result<(), ConfigError> {
        if StrftimeItems::new(&self.time_format).any(|item| matches!(item, Item::Error)) {
            return Err(ConfigError::InvalidTimeFormat(self.time_format.clone()));
        }
        if self.snooze_minutes == 0 {
            return Err(ConfigError::InvalidSnooze);
        }
        Ok(())
    }

    /// # Errors
    /// if the platform has no config directory
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let mut path = directories::ProjectDirs::from("", "", "alarm_clock")
            .ok_or(ConfigError::NoConfigDir)?
            .config_dir()
            .to_path_buf();
        path.push("config.toml");
        Ok(path)
    }
}
