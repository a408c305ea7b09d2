//! The RPC client: envelope, send, parse, classify.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::endpoint::{self, Operation};
use crate::error::ClientError;
use crate::methods::RpcMethod;
use crate::outcome::RpcOutcome;
use crate::request::{JsonRpcRequest, JsonRpcResponse};
use crate::transport::RpcTransport;

/// Executes JSON-RPC calls over an injected transport.
///
/// Holds no per-call state, so one instance (or clones of it) can serve any
/// number of concurrent calls.
#[derive(Clone)]
pub struct RpcClient {
    transport: Arc<dyn RpcTransport>,
}

impl RpcClient {
    pub fn new(transport: Arc<dyn RpcTransport>) -> Self {
        Self { transport }
    }

    pub fn from_transport(transport: impl RpcTransport) -> Self {
        Self::new(Arc::new(transport))
    }

    pub fn url(&self) -> &str {
        self.transport.url()
    }

    /// Issue one call with an explicit method and params.
    ///
    /// Transport faults and malformed responses come back as `Err`; anything
    /// the node reports in a well-formed envelope comes back as an
    /// [`RpcOutcome`].
    pub async fn call_raw(
        &self,
        method: &str,
        params: Value,
    ) -> Result<RpcOutcome<Value>, ClientError> {
        let body = serde_json::to_string(&JsonRpcRequest::new(method, params))?;

        tracing::debug!(method, url = %self.transport.url(), "sending request");
        let raw = self.transport.send(body).await.map_err(|e| {
            tracing::debug!(method, error = %e, "transport failure");
            ClientError::from(e)
        })?;

        let outcome = JsonRpcResponse::parse(&raw)?.classify()?;
        match &outcome {
            RpcOutcome::Success(_) => tracing::debug!(method, "node returned result"),
            RpcOutcome::Failure(err) => tracing::debug!(
                method,
                kind = %err.name,
                cause = %err.cause.name(),
                "node returned error"
            ),
        }
        Ok(outcome)
    }

    /// Issue a typed request and decode its result.
    pub async fn call<M>(&self, request: &M) -> Result<RpcOutcome<M::Response>, ClientError>
    where
        M: RpcMethod + Sync + ?Sized,
    {
        let resolved = endpoint::resolve(request);
        let outcome = self.call_raw(resolved.method, resolved.params).await?;
        audit_cause(resolved.operation, &outcome);

        match outcome {
            RpcOutcome::Success(value) => serde_json::from_value(value)
                .map(RpcOutcome::Success)
                .map_err(|e| {
                    ClientError::Protocol(format!(
                        "unexpected `{}` result shape: {e}",
                        resolved.operation
                    ))
                }),
            RpcOutcome::Failure(err) => Ok(RpcOutcome::Failure(err)),
        }
    }
}

/// Causes outside an operation's documented set are still returned, but
/// they point at a node/client contract mismatch.
fn audit_cause<T>(operation: Operation, outcome: &RpcOutcome<T>) {
    if let Some(cause) = outcome.cause() {
        if !operation.permits(cause.kind()) {
            tracing::warn!(
                %operation,
                cause = %cause.name(),
                "node returned a cause not documented for this operation"
            );
        }
    }
}

impl fmt::Debug for RpcClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RpcClient")
            .field("url", &self.transport.url())
            .finish()
    }
}
