use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub backend: BackendConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the server hosting the admin REST API
    pub base_url: String,
    #[serde(default = "default_api_path")]
    pub api_path: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_alert_ttl_secs")]
    pub alert_ttl_secs: u64,
    #[serde(default = "default_role_prefix")]
    pub role_prefix: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default = "default_console")]
    pub console: bool,
}

// Default value functions
fn default_api_path() -> String {
    "/api/admin".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_alert_ttl_secs() -> u64 {
    5
}

fn default_role_prefix() -> String {
    "ROLE_".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "console".to_string()
}

fn default_console() -> bool {
    true
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            alert_ttl_secs: default_alert_ttl_secs(),
            role_prefix: default_role_prefix(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            console: default_console(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .context("Failed to parse config file")?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        // Validate backend config
        if self.backend.base_url.is_empty() {
            bail!("base_url must not be empty");
        }

        if !self.backend.api_path.starts_with('/') {
            bail!(
                "api_path must start with '/', got '{}'",
                self.backend.api_path
            );
        }

        if self.backend.timeout_secs == 0 {
            bail!("timeout_secs must be greater than 0");
        }

        // Validate ui config
        if !(3..=5).contains(&self.ui.alert_ttl_secs) {
            bail!(
                "alert_ttl_secs must be between 3 and 5, got {}",
                self.ui.alert_ttl_secs
            );
        }

        // Validate logging config
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            bail!(
                "Invalid log level '{}'. Must be one of: trace, debug, info, warn, error",
                self.logging.level
            );
        }

        let valid_formats = ["json", "console"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            bail!(
                "Invalid log format '{}'. Must be one of: json, console",
                self.logging.format
            );
        }

        Ok(())
    }
}
