//! Application configuration structures.

use std::fs;
use std::io::ErrorKind;
use std::net::SocketAddr;
use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Upstream feed settings
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// Proxy server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration if the file exists.
    ///
    /// A missing file is `Ok(None)`; an unreadable or malformed file is an error.
    pub fn load_optional(path: impl AsRef<Path>) -> Result<Option<Self>> {
        match Self::load(&path) {
            Ok(config) => Ok(Some(config)),
            Err(AppError::Io(e)) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.upstream.user_agent.trim().is_empty() {
            return Err(AppError::validation("upstream.user_agent is empty"));
        }
        if self.upstream.timeout_secs == 0 {
            return Err(AppError::validation("upstream.timeout_secs must be > 0"));
        }
        let url = Url::parse(&self.upstream.url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(AppError::validation(format!(
                "upstream.url must be http(s), got '{}'",
                url.scheme()
            )));
        }
        self.server.bind_addr()?;
        if self.server.cache_control.trim().is_empty() {
            return Err(AppError::validation("server.cache_control is empty"));
        }
        if !defaults::LOG_LEVELS.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(AppError::validation(format!(
                "logging.level '{}' is not one of {:?}",
                self.logging.level,
                defaults::LOG_LEVELS
            )));
        }
        Ok(())
    }
}

/// Upstream feed settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Feed endpoint returning `{ "restaurants": [...] }`
    #[serde(default = "defaults::upstream_url")]
    pub url: String,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            url: defaults::upstream_url(),
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
        }
    }
}

/// Proxy server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address
    #[serde(default = "defaults::bind")]
    pub bind: String,

    /// Cache-Control directive attached to relayed responses
    #[serde(default = "defaults::cache_control")]
    pub cache_control: String,
}

impl ServerConfig {
    /// Parsed listen address.
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        self.bind
            .parse()
            .map_err(|e| AppError::config(format!("server.bind '{}': {}", self.bind, e)))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: defaults::bind(),
            cache_control: defaults::cache_control(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default level when RUST_LOG is unset
    #[serde(default = "defaults::log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::log_level(),
        }
    }
}

mod defaults {
    pub const LOG_LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

    // Upstream defaults
    pub fn upstream_url() -> String {
        "https://eccdn.com.au/misc/challengedata.json".into()
    }
    pub fn user_agent() -> String {
        concat!("dealscout/", env!("CARGO_PKG_VERSION")).into()
    }
    pub fn timeout() -> u64 {
        10
    }

    // Server defaults
    pub fn bind() -> String {
        "127.0.0.1:3000".into()
    }
    pub fn cache_control() -> String {
        "public, s-maxage=60, stale-while-revalidate=120".into()
    }

    // Logging defaults
    pub fn log_level() -> String {
        "info".into()
    }
}
