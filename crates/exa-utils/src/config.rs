//! Process configuration for the Exa MCP server

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Default Exa API endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.exa.ai";

/// Environment variable holding the Exa API key
pub const API_KEY_ENV: &str = "EXA_API_KEY";
/// Environment variable overriding the API base URL
pub const BASE_URL_ENV: &str = "EXA_BASE_URL";
/// Environment variable overriding the request timeout, in seconds
pub const TIMEOUT_ENV: &str = "EXA_TIMEOUT_SECS";
/// Environment variable selecting the log output format
pub const LOG_FORMAT_ENV: &str = "EXA_LOG_FORMAT";

/// Configuration errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A value could not be parsed
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    /// The configuration is internally inconsistent
    #[error("Configuration error: {0}")]
    Invalid(String),
}

/// Result type alias for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human readable lines
    #[default]
    Pretty,
    /// One JSON object per event
    Json,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::InvalidValue {
                key: "log format".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pretty => f.write_str("pretty"),
            Self::Json => f.write_str("json"),
        }
    }
}

/// Configuration for the Exa client and server process
///
/// The API key is read once at startup and never validated locally: a missing
/// or wrong key surfaces as the remote call's error.
#[derive(Clone, Serialize, Deserialize)]
pub struct ExaConfig {
    /// Exa API key (optional)
    #[serde(skip_serializing, default)]
    pub api_key: Option<String>,

    /// Base URL of the Exa API
    pub base_url: String,

    /// Request timeout duration
    pub request_timeout: Duration,

    /// User agent sent with every request
    pub user_agent: String,

    /// Log output format
    pub log_format: LogFormat,
}

impl Default for ExaConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(60),
            user_agent: format!("exa-mcp-server/{}", env!("CARGO_PKG_VERSION")),
            log_format: LogFormat::Pretty,
        }
    }
}

impl fmt::Debug for ExaConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExaConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("request_timeout", &self.request_timeout)
            .field("user_agent", &self.user_agent)
            .field("log_format", &self.log_format)
            .finish()
    }
}

impl ExaConfig {
    /// Create a new configuration builder
    pub fn builder() -> ExaConfigBuilder {
        ExaConfigBuilder::default()
    }

    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    ///
    /// Unset and empty variables keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut builder = Self::builder();

        if let Some(key) = lookup(API_KEY_ENV) {
            builder = builder.api_key(key);
        }
        if let Some(url) = get(BASE_URL_ENV) {
            builder = builder.base_url(url);
        }
        if let Some(secs) = get(TIMEOUT_ENV) {
            let secs: u64 = secs.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: TIMEOUT_ENV.to_string(),
                value: secs.clone(),
            })?;
            builder = builder.request_timeout(Duration::from_secs(secs));
        }
        if let Some(format) = get(LOG_FORMAT_ENV) {
            builder = builder.log_format(format.parse()?);
        }

        builder.build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.base_url).map_err(|e| ConfigError::InvalidValue {
            key: "base_url".to_string(),
            value: format!("{} ({e})", self.base_url),
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid(format!(
                "base_url must use http or https, got {}",
                url.scheme()
            )));
        }

        if self.request_timeout.is_zero() {
            return Err(ConfigError::Invalid(
                "request_timeout must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Whether an API key was supplied
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.is_empty())
    }
}

/// Builder for ExaConfig
#[derive(Debug, Default)]
pub struct ExaConfigBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    request_timeout: Option<Duration>,
    user_agent: Option<String>,
    log_format: Option<LogFormat>,
}

impl ExaConfigBuilder {
    /// Set the API key
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the API base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set request timeout
    pub fn request_timeout(mut self, duration: Duration) -> Self {
        self.request_timeout = Some(duration);
        self
    }

    /// Set the user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Set the log format
    pub fn log_format(mut self, format: LogFormat) -> Self {
        self.log_format = Some(format);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<ExaConfig> {
        let defaults = ExaConfig::default();

        let config = ExaConfig {
            api_key: self.api_key,
            base_url: self.base_url.unwrap_or(defaults.base_url),
            request_timeout: self.request_timeout.unwrap_or(defaults.request_timeout),
            user_agent: self.user_agent.unwrap_or(defaults.user_agent),
            log_format: self.log_format.unwrap_or(defaults.log_format),
        };

        config.validate()?;
        Ok(config)
    }
}
