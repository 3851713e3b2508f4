//! TOML-based application configuration.
//!
//! Stored at `<config dir>/vocab-trainer/config.toml`. Every field has a
//! default, so a missing file or a partial file both load.

use crate::error::ConfigError;
use crate::models::SessionPolicy;
use crate::speech::SpeechOptions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "vocab-trainer";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeechConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_speech_program")]
    pub program: String,
    #[serde(default = "default_voice")]
    pub voice: String,
    #[serde(default = "default_rate")]
    pub rate: f32,
    #[serde(default = "default_pitch")]
    pub pitch: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,
    #[serde(default)]
    pub session_policy: SessionPolicy,
    #[serde(default)]
    pub speech: SpeechConfig,
}

fn default_true() -> bool {
    true
}
fn default_speech_program() -> String {
    "espeak-ng".to_string()
}
fn default_voice() -> String {
    SpeechOptions::default().voice
}
fn default_rate() -> f32 {
    SpeechOptions::default().rate
}
fn default_pitch() -> f32 {
    SpeechOptions::default().pitch
}
fn default_database_path() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR))
        .unwrap_or_default()
        .join("decks.sqlite3")
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            program: default_speech_program(),
            voice: default_voice(),
            rate: default_rate(),
            pitch: default_pitch(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            session_policy: SessionPolicy::default(),
            speech: SpeechConfig::default(),
        }
    }
}

impl SpeechConfig {
    pub fn options(&self) -> SpeechOptions {
        SpeechOptions {
            voice: self.voice.clone(),
            rate: self.rate,
            pitch: self.pitch,
        }
    }
}

impl Config {
    pub fn path() -> Result<PathBuf, ConfigError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR).join("config.toml"))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Loads the user's config, falling back to defaults when none exists.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.session_policy, SessionPolicy::DueDate);
    }

    #[test]
    fn test_partial_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
session_policy = "mastery"

[speech]
enabled = false
"#,
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.session_policy, SessionPolicy::Mastery);
        assert!(!config.speech.enabled);
        assert_eq!(config.speech.program, "espeak-ng");
        assert_eq!(config.speech.rate, 0.8);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = Config {
            database_path: PathBuf::from("/tmp/decks.sqlite3"),
            session_policy: SessionPolicy::Mastery,
            speech: SpeechConfig {
                voice: "ja".to_string(),
                ..SpeechConfig::default()
            },
        };

        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_invalid_policy_is_a_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "session_policy = \"sometimes\"").unwrap();

        assert!(matches!(Config::load_from(&path), Err(ConfigError::Parse(_))));
    }
}
