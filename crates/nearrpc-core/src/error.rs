//! Transport- and client-level error types.

use std::fmt;

use thiserror::Error;

/// Errors raised by an [`RpcTransport`](crate::RpcTransport) implementation.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The configured base address is not a usable http(s) URL.
    #[error("{url:?} is an invalid url: {reason}")]
    InvalidEndpoint { url: String, reason: String },

    /// HTTP request failed (connection refused, DNS, TLS, ...).
    #[error("HTTP error: {0}")]
    Http(String),

    /// The node answered with a non-success status and no JSON-RPC body.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Request timed out after the configured duration.
    #[error("Request timed out after {ms}ms")]
    Timeout { ms: u64 },

    #[error("{0}")]
    Other(String),
}

/// Which bucket a failed call falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Construction-time: bad base address.
    InvalidEndpoint,
    /// Network or HTTP layer.
    Transport,
    /// The response is not a valid JSON-RPC envelope or has the wrong shape.
    Protocol,
    /// `HANDLER_ERROR`
    Handler,
    /// `REQUEST_VALIDATION_ERROR`
    Validation,
    /// `INTERNAL_ERROR`
    NodeInternal,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::InvalidEndpoint => "invalid endpoint",
            Self::Transport => "transport failure",
            Self::Protocol => "protocol failure",
            Self::Handler => "handler failure",
            Self::Validation => "validation failure",
            Self::NodeInternal => "node internal failure",
        };
        f.write_str(s)
    }
}

/// Faults that stop a call from producing an [`RpcOutcome`](crate::RpcOutcome).
///
/// Errors the node reports in a well-formed envelope are not here; they are
/// returned as [`RpcOutcome::Failure`](crate::RpcOutcome::Failure).
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{url:?} is an invalid url: {reason}")]
    InvalidEndpoint { url: String, reason: String },

    #[error(transparent)]
    Transport(TransportError),

    #[error("protocol error: {0}")]
    Protocol(String),

    #[error("could not encode request: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<TransportError> for ClientError {
    fn from(e: TransportError) -> Self {
        match e {
            TransportError::InvalidEndpoint { url, reason } => Self::InvalidEndpoint { url, reason },
            other => Self::Transport(other),
        }
    }
}

impl ClientError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidEndpoint { .. } => ErrorCategory::InvalidEndpoint,
            Self::Transport(_) => ErrorCategory::Transport,
            Self::Protocol(_) | Self::Serialization(_) => ErrorCategory::Protocol,
        }
    }

    /// Returns `true` if the failure happened below the JSON-RPC layer.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_invalid_endpoint_maps_to_client_invalid_endpoint() {
        let e: ClientError = TransportError::InvalidEndpoint {
            url: "x".into(),
            reason: "r".into(),
        }
        .into();
        assert_eq!(e.category(), ErrorCategory::InvalidEndpoint);

        let e: ClientError = TransportError::Timeout { ms: 5 }.into();
        assert!(e.is_transport());
    }
}
