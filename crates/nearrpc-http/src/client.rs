//! HTTP JSON-RPC transport backed by `reqwest`.
//!
//! One POST per call to the node's base URL. The body is handed back to the
//! client untouched whenever it is a JSON-RPC envelope, including under a
//! non-2xx status, since NEAR nodes answer most errors that way.

use async_trait::async_trait;
use std::time::Duration;

use nearrpc_core::error::{ClientError, TransportError};
use nearrpc_core::transport::{parse_endpoint, RpcTransport};
use nearrpc_core::RpcClient;

/// Configuration for `HttpTransport`.
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            user_agent: concat!("nearrpc/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// HTTP transport for a single node.
pub struct HttpTransport {
    url: String,
    http: reqwest::Client,
    request_timeout: Duration,
}

impl HttpTransport {
    /// Create a transport for the given base URL.
    ///
    /// The address is checked here, so a bad URL never reaches the first call.
    pub fn new(url: impl AsRef<str>, config: HttpClientConfig) -> Result<Self, ClientError> {
        let url = parse_endpoint(url.as_ref())?;

        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(config.user_agent)
            .build()
            .map_err(|e| TransportError::Other(format!("failed to build http client: {e}")))?;

        Ok(Self {
            url: url.into(),
            http,
            request_timeout: config.request_timeout,
        })
    }

    /// Create with default configuration.
    pub fn default_for(url: impl AsRef<str>) -> Result<Self, ClientError> {
        Self::new(url, HttpClientConfig::default())
    }

    fn map_reqwest(&self, e: reqwest::Error) -> TransportError {
        if e.is_timeout() {
            TransportError::Timeout {
                ms: timeout_ms(self.request_timeout),
            }
        } else {
            TransportError::Http(e.to_string())
        }
    }
}

/// Milliseconds, saturating at `u64::MAX`.
fn timeout_ms(timeout: Duration) -> u64 {
    u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX)
}

/// A non-2xx reply is still worth classifying when it is a JSON-RPC
/// envelope. Other JSON (a gateway's `{"message": ..}`) keeps its status.
fn is_jsonrpc_envelope(body: &str) -> bool {
    serde_json::from_str::<serde_json::Value>(body)
        .map_or(false, |v| v.get("jsonrpc").is_some())
}

#[async_trait]
impl RpcTransport for HttpTransport {
    async fn send(&self, body: String) -> Result<String, TransportError> {
        let resp = self
            .http
            .post(self.url.as_str())
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| self.map_reqwest(e))?;

        let status = resp.status();
        let text = resp.text().await.map_err(|e| self.map_reqwest(e))?;

        if status.is_success() {
            return Ok(text);
        }
        if is_jsonrpc_envelope(&text) {
            tracing::debug!(
                status = status.as_u16(),
                url = %self.url,
                "non-success status with JSON-RPC body, passing through"
            );
            return Ok(text);
        }

        tracing::warn!(status = status.as_u16(), url = %self.url, "http request failed");
        Err(TransportError::Status {
            status: status.as_u16(),
            body: text,
        })
    }

    fn url(&self) -> &str {
        &self.url
    }
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("url", &self.url)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

/// Build an [`RpcClient`] over HTTP with default configuration.
pub fn connect(url: impl AsRef<str>) -> Result<RpcClient, ClientError> {
    connect_with(url, HttpClientConfig::default())
}

/// Build an [`RpcClient`] over HTTP with the given configuration.
pub fn connect_with(
    url: impl AsRef<str>,
    config: HttpClientConfig,
) -> Result<RpcClient, ClientError> {
    Ok(RpcClient::from_transport(HttpTransport::new(url, config)?))
}
