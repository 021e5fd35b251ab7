//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{FallbackDataset, NetworkDataset, PowerDataset};
use crate::models::stats::MAX_AVAILABILITY_DECIMALS;

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Sheet endpoint and HTTP settings
    #[serde(default)]
    pub source: SourceConfig,

    /// Polling settings
    #[serde(default)]
    pub refresh: RefreshConfig,

    /// Aggregate formatting
    #[serde(default)]
    pub stats: StatsConfig,

    /// Dataset shown when the sheet cannot be used
    #[serde(default)]
    pub fallback: FallbackDataset,

    /// Power tickets and outage events
    #[serde(default)]
    pub power: PowerDataset,

    /// Per-unit radio metrics
    #[serde(default)]
    pub network: NetworkDataset,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.source.url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(AppError::validation(format!(
                "source.url must be http(s), got {}",
                url.scheme()
            )));
        }
        if self.source.user_agent.trim().is_empty() {
            return Err(AppError::validation("source.user_agent is empty"));
        }
        if self.source.timeout_secs == 0 {
            return Err(AppError::validation("source.timeout_secs must be > 0"));
        }
        if self.refresh.interval_secs == 0 {
            return Err(AppError::validation("refresh.interval_secs must be > 0"));
        }
        if self.stats.availability_decimals > MAX_AVAILABILITY_DECIMALS {
            return Err(AppError::validation(format!(
                "stats.availability_decimals must be <= {MAX_AVAILABILITY_DECIMALS}"
            )));
        }
        if self.power.window_minutes == 0 {
            return Err(AppError::validation("power.window_minutes must be > 0"));
        }
        if self.fallback.sites.is_empty() {
            return Err(AppError::validation("fallback.sites is empty"));
        }
        if self.fallback.sites.iter().any(|s| s.id.trim().is_empty()) {
            return Err(AppError::validation("fallback site with empty id"));
        }
        Ok(())
    }
}

/// Sheet endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Published CSV export URL
    #[serde(default = "defaults::url")]
    pub url: String,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: defaults::url(),
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
        }
    }
}

/// Polling settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshConfig {
    /// Seconds between refreshes
    #[serde(default = "defaults::interval")]
    pub interval_secs: u64,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval_secs: defaults::interval(),
        }
    }
}

/// Stats formatting settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsConfig {
    /// Decimals in the availability percentage
    #[serde(default = "defaults::availability_decimals")]
    pub availability_decimals: usize,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            availability_decimals: defaults::availability_decimals(),
        }
    }
}

mod defaults {
    use crate::models::stats::DEFAULT_AVAILABILITY_DECIMALS;

    pub fn url() -> String {
        "https://docs.google.com/spreadsheets/d/1WVROxCmhtU9W6GFme3lWaJ4jhYPaAmSAunC3dMPSyys/export?format=csv&gid=1338846885".into()
    }
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; sitewatch/0.1)".into()
    }
    pub fn timeout() -> u64 {
        15
    }
    pub fn interval() -> u64 {
        60
    }
    pub fn availability_decimals() -> usize {
        DEFAULT_AVAILABILITY_DECIMALS
    }
}
