//! Client configuration loading and management

use std::{path::Path, time::Duration};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Endpoint used when none is configured
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000/post_movies";

/// Configuration file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// TOML configuration format
    Toml,
    /// JSON configuration format
    Json,
}

impl ConfigFormat {
    /// Determine configuration format from file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "toml" => Some(ConfigFormat::Toml),
            "json" => Some(ConfigFormat::Json),
            _ => None,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            ConfigFormat::Toml => "TOML",
            ConfigFormat::Json => "JSON",
        }
    }
}

/// Settings for talking to the query service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Full URL the question is POSTed to
    pub endpoint: String,
    /// Overall request timeout; `None` keeps the transport default (no timeout)
    pub timeout_seconds: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_seconds: None,
        }
    }
}

impl ClientConfig {
    /// Create a configuration for the given endpoint
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }

    /// Parse configuration text in the given format
    pub fn from_str_with_format(content: &str, format: ConfigFormat) -> Result<Self, ConfigError> {
        let parse_err = |message: String| ConfigError::Parse {
            format: format.name(),
            message,
        };

        let config: ClientConfig = match format {
            ConfigFormat::Toml => toml::from_str(content).map_err(|e| parse_err(e.to_string()))?,
            ConfigFormat::Json => {
                serde_json::from_str(content).map_err(|e| parse_err(e.to_string()))?
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a `.toml` or `.json` file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let format = ConfigFormat::from_path(path)
            .ok_or_else(|| ConfigError::UnsupportedFormat(path.to_path_buf()))?;

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::from_str_with_format(&content, format)?;
        tracing::info!(
            "Loaded {:?} configuration from {} (endpoint: {})",
            format,
            path.display(),
            config.endpoint
        );
        Ok(config)
    }

    /// Apply command-line or environment overrides on top of file values
    pub fn apply_overrides(
        mut self,
        endpoint: Option<String>,
        timeout_seconds: Option<u64>,
    ) -> Result<Self, ConfigError> {
        if let Some(endpoint) = endpoint {
            self.endpoint = endpoint;
        }
        if timeout_seconds.is_some() {
            self.timeout_seconds = timeout_seconds;
        }
        self.validate()?;
        Ok(self)
    }

    /// Check that the endpoint is an absolute http(s) URL with a host
    pub fn validate(&self) -> Result<(), ConfigError> {
        let endpoint = self.endpoint.trim();
        let rest = endpoint
            .strip_prefix("http://")
            .or_else(|| endpoint.strip_prefix("https://"))
            .ok_or_else(|| ConfigError::InvalidEndpoint(self.endpoint.clone()))?;

        let host = rest.split(['/', '?', '#']).next().unwrap_or_default();
        if host.is_empty() || endpoint.chars().any(char::is_whitespace) {
            return Err(ConfigError::InvalidEndpoint(self.endpoint.clone()));
        }
        Ok(())
    }

    /// Timeout as a [`Duration`], if one is configured
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }

    /// Render as TOML, for `show-config`
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse {
            format: "TOML",
            message: e.to_string(),
        })
    }
}
