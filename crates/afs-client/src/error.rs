//! Store client error types.

use crate::transport::TransportError;

/// Errors from AetherFS store calls.
///
/// Every failure is surfaced unchanged; the client never retries and never
/// substitutes a default result.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The request never produced a response.
    #[error("network error calling {endpoint}: {source}")]
    Network {
        endpoint: String,
        source: TransportError,
    },
    /// The store answered 404.
    #[error("{endpoint} not found")]
    NotFound { endpoint: String },
    /// The store answered with a 5xx status.
    #[error("store {endpoint} failed with {status}: {body}")]
    ServerError {
        endpoint: String,
        status: u16,
        body: String,
    },
    /// The store answered with any other non-2xx status.
    #[error("store {endpoint} returned {status}: {body}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },
    /// Response body was not the expected JSON.
    #[error("failed to decode response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        source: serde_json::Error,
    },
    /// The operation needs a tag and the address has none.
    #[error("address {address} has no tag")]
    MissingTag { address: String },
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

impl StoreError {
    /// Whether the store reported the addressed resource as absent.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
