use anyhow::{Context, Result, anyhow, bail};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Where the backend runs when nothing else is configured.
pub const DEFAULT_ORIGIN: &str = "http://localhost:5000";

/// Host settings stored on disk.
///
/// Example TOML:
/// origin = "http://localhost:5000"
/// default_city = "Kyiv"
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Scheme, host and port of the backend serving `/api/weather`.
    pub origin: Option<String>,

    /// City placed in the input when the page opens.
    pub default_city: Option<String>,
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-widget", "weather-widget")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Origin to talk to: an explicit override wins over the stored value.
    pub fn resolve_origin(&self, flag: Option<&str>) -> String {
        flag.or(self.origin.as_deref()).unwrap_or(DEFAULT_ORIGIN).to_owned()
    }

    pub fn set_origin(&mut self, origin: &str) -> Result<()> {
        let origin = origin.trim().trim_end_matches('/');
        if !(origin.starts_with("http://") || origin.starts_with("https://")) {
            bail!("Origin '{origin}' must start with http:// or https://");
        }

        self.origin = Some(origin.to_owned());
        Ok(())
    }

    /// The stored city, or empty text when none is set.
    pub fn default_city(&self) -> &str {
        self.default_city.as_deref().unwrap_or_default()
    }

    pub fn set_default_city(&mut self, city: &str) {
        let city = city.trim();
        self.default_city = (!city.is_empty()).then(|| city.to_owned());
    }
}
