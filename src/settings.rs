//! Game settings and tuning
//!
//! Loaded from a JSON file; any field left out keeps its default.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{BASE_SPEED, PLAYER_SPEED};
pub use crate::sim::{RestartPolicy, SpawnTrigger};
use crate::sim::Rules;

/// Environment variable naming a settings file
pub const SETTINGS_ENV: &str = "GEM_CROSSING_SETTINGS";

/// Failure reading or writing a settings file
#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    /// A field holds a value the game can't run with
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "settings file I/O failed: {}", e),
            SettingsError::Parse(e) => write!(f, "settings file is not valid JSON: {}", e),
            SettingsError::Invalid { field, reason } => {
                write!(f, "invalid setting `{}`: {}", field, reason)
            }
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(e) => Some(e),
            SettingsError::Parse(e) => Some(e),
            SettingsError::Invalid { .. } => None,
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        SettingsError::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Parse(e)
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// RNG seed; a random one is drawn when unset
    pub seed: Option<u64>,

    // === Gameplay ===
    /// Lane drift speed (units/second)
    pub base_speed: f32,
    /// Player slide pixels per tick
    pub player_speed: i32,
    pub spawn_trigger: SpawnTrigger,
    pub restart_policy: RestartPolicy,

    // === Headless runner ===
    /// Answer given to every restart prompt
    pub auto_restart: bool,
    /// Stop after this many frames
    pub max_frames: u64,
    /// Simulated frame interval (milliseconds)
    pub frame_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,

            base_speed: BASE_SPEED,
            player_speed: PLAYER_SPEED,
            spawn_trigger: SpawnTrigger::AtOrAfter,
            restart_policy: RestartPolicy::RespectAnswer,

            auto_restart: true,
            max_frames: 3_600,
            frame_ms: 16,
        }
    }
}

impl Settings {
    /// Gameplay rules for a new state
    pub fn rules(&self) -> Rules {
        Rules {
            base_speed: self.base_speed,
            player_speed: self.player_speed,
            spawn_trigger: self.spawn_trigger,
            restart_policy: self.restart_policy,
        }
    }

    /// Reject values that would stall or reverse the simulation
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.player_speed <= 0 {
            return Err(SettingsError::Invalid {
                field: "player_speed",
                reason: "must be at least 1",
            });
        }
        if !self.base_speed.is_finite() || self.base_speed < 0.0 {
            return Err(SettingsError::Invalid {
                field: "base_speed",
                reason: "must be a finite, non-negative number",
            });
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load from `path` if given, falling back to defaults on any error
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            log::info!("Using default settings");
            return Self::default();
        };

        match Self::load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "seed": 7, "restart_policy": "AlwaysReset" }"#)
            .expect("valid settings");
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.restart_policy, RestartPolicy::AlwaysReset);
        assert_eq!(settings.base_speed, 90.0);
        assert_eq!(settings.spawn_trigger, SpawnTrigger::AtOrAfter);
    }

    #[test]
    fn test_bad_json_is_parse_error() {
        let err = Settings::from_json("{ seed: ").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
        assert!(err.to_string().contains("not valid JSON"));
    }

    #[test]
    fn test_non_positive_player_speed_rejected() {
        for json in [r#"{ "player_speed": 0 }"#, r#"{ "player_speed": -5 }"#] {
            let err = Settings::from_json(json).unwrap_err();
            assert!(matches!(err, SettingsError::Invalid { field: "player_speed", .. }));
        }
        assert_eq!(
            Settings::from_json(r#"{ "player_speed": 1 }"#).map(|s| s.player_speed).ok(),
            Some(1)
        );
    }

    #[test]
    fn test_negative_base_speed_rejected() {
        let err = Settings::from_json(r#"{ "base_speed": -90.0 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid { field: "base_speed", .. }));
        assert!(err.to_string().contains("base_speed"));
    }

    #[test]
    fn test_invalid_file_falls_back() {
        let path = std::env::temp_dir().join(format!("gem-crossing-bad-{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "seed": 3, "player_speed": -5 }"#).expect("write settings");
        let loaded = Settings::load_or_default(Some(&path));
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, Settings::default());
    }

    #[test]
    fn test_missing_file_falls_back() {
        let path = std::env::temp_dir().join("gem-crossing-does-not-exist.json");
        assert!(matches!(Settings::load(&path), Err(SettingsError::Io(_))));
        assert_eq!(Settings::load_or_default(Some(&path)), Settings::default());
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join(format!("gem-crossing-{}.json", std::process::id()));
        let settings = Settings {
            seed: Some(99),
            spawn_trigger: SpawnTrigger::Exact,
            ..Settings::default()
        };
        settings.save(&path).expect("write settings");
        let loaded = Settings::load(&path).expect("read settings");
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_rules_follow_settings() {
        let settings = Settings {
            player_speed: 10,
            ..Settings::default()
        };
        assert_eq!(settings.rules().player_speed, 10);
        assert_eq!(settings.rules().restart_policy, RestartPolicy::RespectAnswer);
    }
}
