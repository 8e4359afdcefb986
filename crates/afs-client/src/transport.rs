//! HTTP transport seam.
//!
//! [`StoreClient`](crate::StoreClient) only needs one capability from the
//! network: issue a GET and hand back the status and body. [`Transport`]
//! captures exactly that, so tests and embedders can substitute their own
//! implementation. [`ReqwestTransport`] is the production implementation.
//!
//! Retries are NOT built into the transport. A failed request is reported
//! once, to the caller.

use std::future::Future;
use std::time::Duration;

use url::Url;

use crate::config::ConfigError;

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// A request that produced no response.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("request timed out: {0}")]
    Timeout(String),
    #[error("connection failed: {0}")]
    Connect(String),
    #[error("{0}")]
    Other(String),
}

/// Issues GET requests on behalf of the store client.
///
/// Implementations must be shareable across tasks.
pub trait Transport: Send + Sync {
    /// Fetch `url`, returning any HTTP status as a response.
    ///
    /// Only failures that prevent a response (DNS, connect, timeout,
    /// truncated body) are errors.
    fn get(&self, url: Url) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send;
}

/// [`Transport`] backed by a `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a transport whose requests time out after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::HttpClient`] if the TLS backend cannot be
    /// initialized.
    pub fn new(timeout: Duration) -> Result<Self, ConfigError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;
        Ok(Self { http })
    }
}

impl Transport for ReqwestTransport {
    async fn get(&self, url: Url) -> Result<HttpResponse, TransportError> {
        let resp = self.http.get(url).send().await.map_err(from_reqwest)?;
        let status = resp.status().as_u16();
        let body = resp.text().await.map_err(from_reqwest)?;
        Ok(HttpResponse { status, body })
    }
}

fn from_reqwest(e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout(e.to_string())
    } else if e.is_connect() {
        TransportError::Connect(e.to_string())
    } else {
        TransportError::Other(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_range_is_2xx() {
        assert!(HttpResponse::new(200, "").is_success());
        assert!(HttpResponse::new(204, "").is_success());
        assert!(!HttpResponse::new(199, "").is_success());
        assert!(!HttpResponse::new(301, "").is_success());
        assert!(!HttpResponse::new(404, "").is_success());
    }

    #[test]
    fn reqwest_transport_build_failure_is_a_config_error() {
        let built: Result<ReqwestTransport, ConfigError> = ReqwestTransport::new(Duration::from_secs(1));
        assert!(built.is_ok());

        let err = ConfigError::HttpClient("no TLS backend".into());
        assert_eq!(err.to_string(), "failed to build HTTP client: no TLS backend");
    }

    #[tokio::test]
    async fn reqwest_transport_reports_connection_failure() {
        let transport = ReqwestTransport::new(Duration::from_millis(200)).unwrap();
        // Port 1 is reserved and closed on test hosts.
        let url = Url::parse("http://127.0.0.1:1/").unwrap();
        let err = transport.get(url).await.unwrap_err();
        assert!(matches!(err, TransportError::Connect(_) | TransportError::Timeout(_)));
    }
}
