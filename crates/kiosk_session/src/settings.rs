//! Kiosk settings - API location and timer periods.

use std::path::Path;
use std::time::Duration;

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Environment variable overriding [`KioskSettings::api_base_url`].
pub const API_URL_ENV: &str = "KIOSK_API_URL";

/// User-configurable settings for the kiosk session.
///
/// Every field has a default, so an empty TOML file is valid.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct KioskSettings {
    /// Base URL of the API, including the `/api` prefix.
    #[serde(default = "default_api_base_url")]
    api_base_url: String,

    /// Inactivity before the kiosk falls back to the idle screen.
    #[serde(default = "default_idle_timeout_ms")]
    idle_timeout_ms: u64,

    /// How often inactivity is checked.
    #[serde(default = "default_idle_check_interval_ms")]
    idle_check_interval_ms: u64,

    /// Leaderboard and facts reload period.
    #[serde(default = "default_refresh_interval_ms")]
    refresh_interval_ms: u64,

    /// Displayed fact rotation period.
    #[serde(default = "default_fact_rotation_interval_ms")]
    fact_rotation_interval_ms: u64,
}

fn default_api_base_url() -> String {
    "http://localhost:3001/api".to_string()
}

fn default_idle_timeout_ms() -> u64 {
    120_000
}

fn default_idle_check_interval_ms() -> u64 {
    1_000
}

fn default_refresh_interval_ms() -> u64 {
    30_000
}

fn default_fact_rotation_interval_ms() -> u64 {
    10_000
}

impl Default for KioskSettings {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            idle_timeout_ms: default_idle_timeout_ms(),
            idle_check_interval_ms: default_idle_check_interval_ms(),
            refresh_interval_ms: default_refresh_interval_ms(),
            fact_rotation_interval_ms: default_fact_rotation_interval_ms(),
        }
    }
}

impl KioskSettings {
    /// Creates settings with defaults.
    #[instrument]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the API base URL.
    #[instrument(skip(self, url))]
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Defaults, with the API URL taken from `KIOSK_API_URL` when set.
    #[instrument]
    pub fn from_env() -> Self {
        match std::env::var(API_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => {
                info!(%url, "Using API URL from environment");
                Self::default().with_api_base_url(url.trim())
            }
            _ => Self::default(),
        }
    }

    /// Loads settings from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading settings from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read settings file: {}", e)))?;

        let settings: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse settings: {}", e)))?;
        settings.validate()?;

        info!(api_base_url = %settings.api_base_url, "Settings loaded");
        Ok(settings)
    }

    /// Rejects zero periods, which would spin the scheduler.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        let periods = [
            ("idle_check_interval_ms", self.idle_check_interval_ms),
            ("refresh_interval_ms", self.refresh_interval_ms),
            ("fact_rotation_interval_ms", self.fact_rotation_interval_ms),
        ];
        match periods.iter().find(|(_, ms)| *ms == 0) {
            Some((name, _)) => Err(ConfigError::new(format!("{} must be greater than zero", name))),
            None => Ok(()),
        }
    }

    /// Inactivity timeout.
    #[instrument(skip(self))]
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_millis(self.idle_timeout_ms)
    }

    /// Inactivity check period.
    #[instrument(skip(self))]
    pub fn idle_check_interval(&self) -> Duration {
        Duration::from_millis(self.idle_check_interval_ms)
    }

    /// Data reload period.
    #[instrument(skip(self))]
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_interval_ms)
    }

    /// Fact rotation period.
    #[instrument(skip(self))]
    pub fn fact_rotation_interval(&self) -> Duration {
        Duration::from_millis(self.fact_rotation_interval_ms)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
