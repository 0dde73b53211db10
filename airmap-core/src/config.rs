use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, time::Duration};

use crate::model::{HealthProfile, Location};

pub const DATA_API_ENV: &str = "AIRMAP_DATA_API";
pub const FORECAST_API_ENV: &str = "AIRMAP_FORECAST_API";

pub const DEFAULT_DATA_API_BASE: &str = "http://localhost:8000";
pub const DEFAULT_FORECAST_API_BASE: &str = "http://localhost:8001";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// data_api_base = "https://air.example.com"
/// forecast_api_base = "https://air.example.com"
/// profile = "asthma"
///
/// [[locations]]
/// name = "Iceland"
/// lat = 64.9631
/// lon = -19.0208
/// baseline_aqi = 15
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    pub data_api_base: Option<String>,
    pub forecast_api_base: Option<String>,

    /// Health profile sent as the forecast category, e.g. "general" or "asthma".
    pub profile: Option<String>,

    pub timeout_secs: Option<u64>,

    /// Extra entries appended to the built-in location catalog.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<Location>,
}

/// Resolved base URLs for the two remote channels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub data_api_base: String,
    pub forecast_api_base: String,
}

impl Config {
    /// Resolve base URLs: environment first, then config file, then defaults.
    pub fn endpoints(&self) -> Endpoints {
        self.endpoints_with(|key| std::env::var(key).ok())
    }

    pub fn endpoints_with(&self, env: impl Fn(&str) -> Option<String>) -> Endpoints {
        let pick = |key: &str, configured: &Option<String>, fallback: &str| {
            env(key)
                .filter(|v| !v.trim().is_empty())
                .or_else(|| configured.clone())
                .unwrap_or_else(|| fallback.to_string())
        };

        Endpoints {
            data_api_base: pick(DATA_API_ENV, &self.data_api_base, DEFAULT_DATA_API_BASE),
            forecast_api_base: pick(FORECAST_API_ENV, &self.forecast_api_base, DEFAULT_FORECAST_API_BASE),
        }
    }

    pub fn set_endpoints(&mut self, data_api_base: String, forecast_api_base: String) {
        self.data_api_base = Some(data_api_base);
        self.forecast_api_base = Some(forecast_api_base);
    }

    /// Configured profile, or `general` when none is set.
    pub fn profile(&self) -> Result<HealthProfile> {
        match self.profile.as_deref() {
            None => Ok(HealthProfile::default()),
            Some(s) => HealthProfile::try_from(s).with_context(|| {
                format!(
                    "Invalid profile in config file.\n\
                     Hint: run `airmap configure` or edit {}",
                    Self::config_file_path()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|_| "config.toml".to_string())
                )
            }),
        }
    }

    pub fn set_profile(&mut self, profile: HealthProfile) {
        self.profile = Some(profile.as_str().to_string());
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    /// Add or replace a user-defined location, matched by name.
    pub fn add_location(&mut self, location: Location) {
        match self.locations.iter_mut().find(|l| l.name.eq_ignore_ascii_case(&location.name)) {
            Some(existing) => *existing = location,
            None => self.locations.push(location),
        }
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "airmap", "airmap-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
