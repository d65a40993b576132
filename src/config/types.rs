//! Core configuration types and loading.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use super::cooldowns::CooldownConfig;
use super::identity::IdentityConfig;
use super::notify::NotifyConfig;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Engine configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Identity decryption settings.
    #[serde(default)]
    pub identity: IdentityConfig,
    /// Role tags consulted by the permission evaluator.
    #[serde(default)]
    pub roles: RolesConfig,
    /// Notification routing.
    #[serde(default)]
    pub notify: NotifyConfig,
    /// Cooldown windows.
    #[serde(default)]
    pub cooldowns: CooldownConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }
}

/// Role tags.
#[derive(Debug, Clone, Deserialize)]
pub struct RolesConfig {
    /// Role tag granting visibility of monetary fields (default: "finance").
    #[serde(default = "default_finance_tag")]
    pub finance_tag: String,
}

impl Default for RolesConfig {
    fn default() -> Self {
        Self {
            finance_tag: default_finance_tag(),
        }
    }
}

fn default_finance_tag() -> String {
    "finance".to_string()
}
