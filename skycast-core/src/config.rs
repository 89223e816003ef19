use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::model::Coordinates;

/// Base URLs of the upstream services.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    /// Open-Meteo forecast API.
    pub forecast_base: String,
    /// Open-Meteo geocoding API (forward search only).
    pub geocoding_base: String,
    /// OpenStreetMap Nominatim, used for reverse geocoding.
    pub nominatim_base: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            forecast_base: "https://api.open-meteo.com/v1".to_string(),
            geocoding_base: "https://geocoding-api.open-meteo.com/v1".to_string(),
            nominatim_base: "https://nominatim.openstreetmap.org".to_string(),
        }
    }
}

/// Defaults applied to every lookup request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Lookup {
    pub language: String,
    pub format: String,
}

impl Default for Lookup {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            format: "json".to_string(),
        }
    }
}

/// Top-level configuration stored on disk.
///
/// Every field has a default, so a missing or partial config file degrades
/// to the built-in endpoints and lookup defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub endpoints: Endpoints,
    pub lookup: Lookup,

    /// Coordinates reported by the configured position source, if any.
    ///
    /// Example TOML:
    /// [home]
    /// latitude = 52.52
    /// longitude = 13.41
    pub home: Option<Coordinates>,
}

impl Config {
    #[must_use]
    pub fn forecast_url(&self) -> String {
        format!("{}/forecast", self.endpoints.forecast_base)
    }

    #[must_use]
    pub fn search_url(&self) -> String {
        format!("{}/search", self.endpoints.geocoding_base)
    }

    #[must_use]
    pub fn reverse_url(&self) -> String {
        format!("{}/reverse", self.endpoints.nominatim_base)
    }

    /// Load config from disk, or return the defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
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
        let dirs = ProjectDirs::from("dev", "skycast", "skycast")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
