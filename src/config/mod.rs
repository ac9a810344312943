//! Configuration management.
//!
//! Supports configuration from:
//! - TOML config files
//! - Environment variables
//! - CLI arguments (applied by the binary on top)

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{BotScopeError, Result};

/// Main configuration struct
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Remote classifier configuration
    #[serde(default)]
    pub classifier: ClassifierConfig,

    /// Dashboard server configuration
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| BotScopeError::Config(format!("Failed to read config file: {e}")))?;

        Ok(toml::from_str(&content)?)
    }

    /// Default config file location (`<config dir>/botscope/config.toml`)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("botscope").join("config.toml"))
    }

    /// Load from `path`, or from [`Config::default_path`] when it exists,
    /// then apply environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let base = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path().filter(|p| p.exists()) {
                Some(path) => Self::from_file(path)?,
                None => Self::default(),
            },
        };

        Ok(base.with_env_overrides(|key| std::env::var(key).ok()))
    }

    /// Apply `BOTSCOPE_*` overrides read through `lookup`.
    ///
    /// Values that do not parse are ignored.
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        // Classifier settings
        if let Some(url) = lookup("BOTSCOPE_CLASSIFIER_URL") {
            self.classifier.url = url;
        }
        if let Some(timeout) = lookup("BOTSCOPE_TIMEOUT_SECS") {
            if let Ok(timeout) = timeout.parse() {
                self.classifier.timeout_secs = timeout;
            }
        }

        // Dashboard settings
        if let Some(host) = lookup("BOTSCOPE_HOST") {
            self.dashboard.host = host;
        }
        if let Some(port) = lookup("BOTSCOPE_PORT") {
            if let Ok(port) = port.parse() {
                self.dashboard.port = port;
            }
        }

        self
    }
}

/// Remote classifier configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Base URL of the classifier (e.g., http://localhost:5000)
    pub url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:5000".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Dashboard server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Host to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Allow cross-origin browser clients
    pub cors: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            cors: true,
        }
    }
}

impl DashboardConfig {
    /// Get the full listen address
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
