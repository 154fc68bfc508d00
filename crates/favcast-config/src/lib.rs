//! Shared configuration for favcast front-ends.
//!
//! TOML settings with XDG path resolution and figment-layered loading:
//! built-in defaults, then the config file, then `FAVCAST_`-prefixed
//! environment variables. Saving pretty-prints back to the same file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use favcast_core::GroupStyle;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML settings ───────────────────────────────────────────────────

/// User-facing settings shared by every favcast front-end.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Settings {
    /// How the favorites list is grouped into sections.
    #[serde(default)]
    pub favorite_style: GroupStyle,

    /// Per-request timeout for platform API calls, in seconds.
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            favorite_style: GroupStyle::default(),
            request_timeout_secs: default_timeout(),
        }
    }
}

fn default_timeout() -> u64 {
    15
}

impl Settings {
    /// Request timeout as a `Duration`.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("dev", "favcast", "favcast").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("favcast");
    p
}

// ── Settings loading ────────────────────────────────────────────────

/// Load settings from the canonical config path plus environment.
pub fn load_settings() -> Result<Settings, ConfigError> {
    load_settings_from(&config_path())
}

/// Load settings, returning defaults if the file doesn't exist.
pub fn load_settings_or_default() -> Settings {
    load_settings().unwrap_or_default()
}

/// Load settings from an explicit file path plus environment.
pub fn load_settings_from(path: &Path) -> Result<Settings, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Settings::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("FAVCAST_"));

    let settings: Settings = figment.extract()?;
    Ok(settings)
}

// ── Settings saving ─────────────────────────────────────────────────

/// Serialize settings to TOML and write to the canonical config path.
pub fn save_settings(settings: &Settings) -> Result<(), ConfigError> {
    save_settings_to(&config_path(), settings)
}

/// Serialize settings to TOML and write to an explicit path.
pub fn save_settings_to(path: &Path, settings: &Settings) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(settings)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn defaults_apply_without_a_file() {
        let dir = TempDir::new().unwrap();
        let settings = load_settings_from(&dir.path().join("config.toml")).unwrap();

        assert_eq!(settings, Settings::default());
        assert_eq!(settings.favorite_style, GroupStyle::LiveState);
        assert_eq!(settings.request_timeout_secs, 15);
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "favorite_style = \"platform\"\n").unwrap();

        let settings = load_settings_from(&path).unwrap();
        assert_eq!(settings.favorite_style, GroupStyle::Platform);
        assert_eq!(settings.request_timeout_secs, 15);
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let settings = Settings {
            favorite_style: GroupStyle::Platform,
            request_timeout_secs: 30,
        };

        save_settings_to(&path, &settings).unwrap();
        assert_eq!(load_settings_from(&path).unwrap(), settings);
    }

    #[test]
    fn env_overrides_file_values() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("config.toml", "request_timeout_secs = 30\n")?;
            jail.set_env("FAVCAST_REQUEST_TIMEOUT_SECS", "45");

            let settings = load_settings_from(Path::new("config.toml")).unwrap();
            assert_eq!(settings.request_timeout_secs, 45);
            assert_eq!(settings.favorite_style, GroupStyle::LiveState);
            Ok(())
        });
    }

    #[test]
    fn rejects_malformed_values() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "favorite_style = \"sideways\"\n").unwrap();

        let err = load_settings_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Figment(_)));
    }

    #[test]
    fn timeout_converts_to_duration() {
        let settings = Settings {
            request_timeout_secs: 30,
            ..Settings::default()
        };
        assert_eq!(settings.request_timeout(), Duration::from_secs(30));
    }
}
