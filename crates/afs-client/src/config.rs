//! AetherFS client configuration.
//!
//! The store is reached at `{protocol}://{host}`. Defaults point at a local
//! server. Override via environment variables or explicit construction.

use url::Url;

/// Default protocol for the store endpoint.
pub const DEFAULT_PROTOCOL: &str = "http";

/// Default `host[:port]` for the store endpoint.
pub const DEFAULT_HOST: &str = "localhost:8080";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for connecting to an AetherFS store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// URL scheme, `http` or `https`.
    pub protocol: String,
    /// Host and optional port, e.g. `localhost:8080`.
    pub host: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            protocol: DEFAULT_PROTOCOL.to_string(),
            host: DEFAULT_HOST.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl StoreConfig {
    /// Configuration for `host` with the default protocol and timeout.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            ..Self::default()
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Variables (unset or empty means default):
    /// - `AETHERFS_PROTOCOL` (default: `http`)
    /// - `AETHERFS_HOST` (default: `localhost:8080`)
    /// - `AETHERFS_TIMEOUT_SECS` (default: 30)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let value = |var: &str| lookup(var).filter(|v| !v.is_empty());

        let timeout_secs = match value("AETHERFS_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse()
                .map_err(|_| ConfigError::InvalidTimeout(raw))?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            protocol: value("AETHERFS_PROTOCOL").unwrap_or_else(|| DEFAULT_PROTOCOL.to_string()),
            host: value("AETHERFS_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            timeout_secs,
        })
    }

    /// The base endpoint, `{protocol}://{host}`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUrl`] if the combination does not parse.
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        let raw = format!("{}://{}", self.protocol, self.host);
        Url::parse(&raw).map_err(|e| ConfigError::InvalidUrl(raw, e.to_string()))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid store URL {0}: {1}")]
    InvalidUrl(String, String),
    #[error("invalid AETHERFS_TIMEOUT_SECS value: {0}")]
    InvalidTimeout(String),
    #[error("failed to build HTTP client: {0}")]
    HttpClient(String),
}
