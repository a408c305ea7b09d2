//! The `RpcTransport` trait: the injected capability that moves bytes.

use async_trait::async_trait;

use crate::error::{ClientError, TransportError};

/// Performs one request/response exchange with a node.
///
/// The transport sees serialized JSON text only. Parsing and classifying the
/// reply is the client's job, so a transport must hand back any body the
/// node produced, even under a non-success HTTP status.
///
/// Implementations must be `Send + Sync`; the trait is object-safe and is
/// stored as `Arc<dyn RpcTransport>`.
#[async_trait]
pub trait RpcTransport: Send + Sync + 'static {
    /// Send a serialized JSON-RPC request and return the raw response body.
    async fn send(&self, body: String) -> Result<String, TransportError>;

    /// The transport's identifier (URL or name).
    fn url(&self) -> &str;
}

/// Parse and check a base address eagerly.
///
/// Only absolute `http`/`https` URLs with a host are accepted.
pub fn parse_endpoint(address: &str) -> Result<url::Url, ClientError> {
    let invalid = |reason: String| ClientError::InvalidEndpoint {
        url: address.to_string(),
        reason,
    };
    let parsed = url::Url::parse(address).map_err(|e| invalid(e.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => {}
        other => return Err(invalid(format!("unsupported scheme `{other}`"))),
    }
    if parsed.host_str().map_or(true, str::is_empty) {
        return Err(invalid("missing host".into()));
    }
    Ok(parsed)
}
