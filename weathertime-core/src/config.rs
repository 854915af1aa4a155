use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// weather_api_key = "..."
/// timezone_api_key = "..."
/// ```
///
/// A key that is absent from the file deserializes to the empty string and
/// ends up as a blank `key=` query parameter, mirroring how the lookups
/// treat an unconfigured key.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// API key for WeatherAPI.com.
    #[serde(default)]
    pub weather_api_key: String,

    /// API key for TimezoneDB.
    #[serde(default)]
    pub timezone_api_key: String,
}

/// The two opaque API keys handed to the lookup flows at startup.
///
/// Constructed once from [`Config`] and passed into whichever components
/// need it; there is no ambient global to look keys up from.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub weather_key: String,
    pub timezone_key: String,
}

impl Config {
    /// Load config from disk. A missing file is an error: the tool must
    /// not start without its configuration source.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Err(anyhow!(
                "Config file not found: {}.\n\
                 Hint: run `weathertime configure` and enter your API keys.",
                path.display()
            ));
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
        let dirs = ProjectDirs::from("dev", "weathertime", "weathertime")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// The read-only credentials extracted for the lookup flows.
    pub fn credentials(&self) -> Credentials {
        Credentials {
            weather_key: self.weather_api_key.clone(),
            timezone_key: self.timezone_api_key.clone(),
        }
    }
}
