//! Tunables for a playback session, stored as JSON.

use crate::markers::MarkerConfig;
use crate::playback::PlaybackConfig;
use crate::ui::TimescaleConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Globe geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobeConfig {
    /// Radius events are projected onto, in scene units
    pub radius: f64,
}

impl Default for GlobeConfig {
    fn default() -> Self {
        Self { radius: 1.0 }
    }
}

/// Complete session configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub globe: GlobeConfig,
    pub playback: PlaybackConfig,
    pub markers: MarkerConfig,
    pub timescale: TimescaleConfig,
}

impl PlayerConfig {
    /// Default location: `<config dir>/quakescope/config.json`
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("quakescope").join("config.json"))
    }

    /// Load from the default location, falling back to defaults
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                warn!("Ignoring config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Reject values the engine cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.globe.radius > 0.0) {
            return Err(ConfigError::Invalid(format!("globe radius must be positive, got {}", self.globe.radius)));
        }
        if self.playback.min_date > self.playback.max_date {
            return Err(ConfigError::Invalid("playback min_date is after max_date".to_string()));
        }
        if !(self.markers.life_time > 0.0) || !(self.markers.expiry_timeout > 0.0) {
            return Err(ConfigError::Invalid("marker life_time and expiry_timeout must be positive".to_string()));
        }
        let ts = &self.timescale;
        if !(ts.min_days_per_second > 0.0) || !(ts.min_days_per_second < ts.max_days_per_second) {
            return Err(ConfigError::Invalid(format!(
                "timescale bounds must satisfy 0 < min < max, got {} .. {}",
                ts.min_days_per_second, ts.max_days_per_second
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markers::MarkerCapacity;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("quakescope-test-{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn test_defaults_are_valid() {
        assert!(PlayerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{ "globe": { "radius": 6.371 }, "markers": { "life_time": 4.5 } }"#;
        let config: PlayerConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.globe.radius, 6.371);
        assert_eq!(config.markers.life_time, 4.5);
        assert_eq!(config.markers.expiry_timeout, 5.0);
        assert_eq!(config.playback, PlaybackConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let path = temp_path("save_and_load.json");
        let mut config = PlayerConfig::default();
        config.markers.capacity = MarkerCapacity::EvictOldest { max: 500 };
        config.playback.days_per_second = 30.0;

        config.save_to(&path).unwrap();
        let loaded = PlayerConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = PlayerConfig::default();
        config.globe.radius = 0.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = PlayerConfig::default();
        config.markers.life_time = -1.0;
        assert!(config.validate().is_err());

        let mut config = PlayerConfig::default();
        config.timescale.max_days_per_second = 0.01;
        assert!(config.validate().is_err());

        let mut config = PlayerConfig::default();
        std::mem::swap(&mut config.playback.min_date, &mut config.playback.max_date);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_invalid_json() {
        let path = temp_path("broken.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(PlayerConfig::load_from(&path), Err(ConfigError::Json(_))));
        let _ = fs::remove_file(&path);
    }
}
