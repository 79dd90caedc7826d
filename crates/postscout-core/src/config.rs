use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use postscout_api::RetryConfig;

/// Main configuration structure
///
/// Loaded from the config file; the CLI layers env vars and flags on top.
/// Priority: CLI > Env > File > Defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

impl Config {
    /// Load config from the default location, falling back to defaults
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    /// Load config from an explicit path. A missing file means defaults.
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)
            .map_err(|e| crate::Error::ConfigError(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to the default location
    pub fn save(&self) -> crate::Result<PathBuf> {
        let config_path = Self::config_path()?;
        self.save_to(&config_path)?;
        Ok(config_path)
    }

    pub fn save_to(&self, path: &Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    pub fn to_toml(&self) -> crate::Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| crate::Error::ConfigError(format!("Failed to serialize config: {}", e)))
    }

    /// Get the config file path (XDG on Linux, AppData on Windows)
    pub fn config_path() -> crate::Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| crate::Error::ConfigError("Could not find config directory".into()))?
            .join("postscout");

        Ok(config_dir.join("config.toml"))
    }

    pub fn validate(&self) -> crate::Result<()> {
        if self.ui.page_size == 0 {
            return Err(crate::Error::ConfigError(
                "ui.page_size must be greater than zero".into(),
            ));
        }
        if self.api.base_url.trim().is_empty() {
            return Err(crate::Error::ConfigError("api.base_url must not be empty".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Search API host
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds. Unset leaves the transport default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// Extra attempts for transient failures
    #[serde(default)]
    pub max_retries: u32,

    #[serde(default = "default_retry_delay")]
    pub initial_retry_delay_ms: u64,
}

fn default_base_url() -> String {
    "https://dummyjson.com".to_string()
}

fn default_retry_delay() -> u64 {
    500
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: None,
            max_retries: 0,
            initial_retry_delay_ms: default_retry_delay(),
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    pub fn retry_config(&self) -> RetryConfig {
        RetryConfig {
            max_retries: self.max_retries,
            initial_delay_ms: self.initial_retry_delay_ms,
            ..RetryConfig::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Rows per page
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Event loop tick (spinner speed, input poll interval)
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
}

fn default_page_size() -> u32 {
    10
}

fn default_tick_rate() -> u64 {
    100
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            tick_rate_ms: default_tick_rate(),
        }
    }
}
