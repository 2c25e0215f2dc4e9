use std::path::PathBuf;

/// Reasons an alarm entry is rejected.
/// The current alarm is left untouched in both cases.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    /// the entry still shows the `HH:MM:SS` placeholder
    #[error("Please enter a valid alarm time (HH:MM:SS).")]
    Placeholder,
    #[error("Invalid time format! Please use HH:MM:SS (e.g., 14:30:00).")]
    Malformed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SoundError {
    #[error("Alarm sound file '{}' not found. Please ensure it's in the same directory.", .0.display())]
    Missing(PathBuf),
    #[error("Could not play alarm sound: {0}")]
    Playback(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("couldn't find a config directory")]
    NoConfigDir,
    #[error("couldn't read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("couldn't parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("couldn't serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("couldn't write config file {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid time format {0:?}")]
    InvalidTimeFormat(String),
    #[error("snooze must be at least one minute")]
    InvalidSnooze,
}
