//! Board settings loaded from `config.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{PlannerError, Result};
use crate::store::DEFAULT_TIMELINE_DAYS;

pub const APP_DIR: &str = "planboard";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Number of day columns in the timeline.
    pub timeline_days: usize,
    pub slot_start_hour: u32,
    /// Last hour that gets slots (inclusive).
    pub slot_end_hour: u32,
    pub slot_minutes: u32,
    /// Cells the pointer must travel before a press becomes a drag.
    pub drag_threshold: u16,
    pub seed_demo: bool,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timeline_days: DEFAULT_TIMELINE_DAYS,
            slot_start_hour: 8,
            slot_end_hour: 20,
            slot_minutes: 30,
            drag_threshold: 1,
            seed_demo: true,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.timeline_days == 0 {
            return Err(PlannerError::config("timeline_days must be at least 1"));
        }
        if self.slot_minutes == 0 || self.slot_minutes > 60 {
            return Err(PlannerError::config("slot_minutes must be between 1 and 60"));
        }
        if self.slot_end_hour > 23 {
            return Err(PlannerError::config("slot_end_hour must be at most 23"));
        }
        if self.slot_start_hour > self.slot_end_hour {
            return Err(PlannerError::config(
                "slot_start_hour must not be after slot_end_hour",
            ));
        }
        Ok(())
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.toml"))
}

/// Reads the config at `path`; a missing file yields the defaults.
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        debug!(path = %path.display(), "no config file, using defaults");
        return Ok(Config::default());
    }
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    config.validate()?;
    debug!(path = %path.display(), "config loaded");
    Ok(config)
}

/// Loads from `path` when given, otherwise from the platform config directory.
pub fn resolve_config(path: Option<&Path>) -> Result<Config> {
    match path.map(Path::to_path_buf).or_else(default_config_path) {
        Some(path) => load_config(&path),
        None => Ok(Config::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "timeline_days = 7\nseed_demo = false\n").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.timeline_days, 7);
        assert!(!config.seed_demo);
        assert_eq!(config.slot_start_hour, 8);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "timeline_days = \"many\"").unwrap();
        assert!(matches!(load_config(&path), Err(PlannerError::TomlParse(_))));
    }

    #[test]
    fn test_validate_rejects_bad_slots() {
        let config = Config {
            slot_start_hour: 21,
            slot_end_hour: 20,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(PlannerError::Config(_))));

        let config = Config {
            slot_minutes: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            timeline_days: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            slot_end_hour: 24,
            ..Config::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, PlannerError::Config(msg) if msg.contains("slot_end_hour")));
    }
}
