//! JSON-RPC 2.0 wire types.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::cause::Cause;
use crate::error::{ClientError, ErrorCategory};
use crate::outcome::RpcOutcome;

/// Protocol version tag sent on every request.
pub const JSONRPC_VERSION: &str = "2.0";

/// Calls are 1:1 and synchronous, so the id only has to be present.
pub const REQUEST_ID: &str = "dontcare";

/// The code NEAR nodes attach to every structured error.
pub const SERVER_ERROR_CODE: i64 = -32000;

/// JSON-RPC request ID: string, number, or null.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RpcId {
    Number(u64),
    String(String),
    #[default]
    Null,
}

impl std::fmt::Display for RpcId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => write!(f, "{s}"),
            Self::Null => write!(f, "null"),
        }
    }
}

/// A JSON-RPC 2.0 request.
///
/// `params` is a raw value because its shape (object, array or `null`) is
/// chosen per method by the endpoint registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub id: RpcId,
    pub jsonrpc: String,
    pub method: String,
    pub params: Value,
}

impl JsonRpcRequest {
    pub fn new(method: impl Into<String>, params: Value) -> Self {
        Self {
            id: RpcId::String(REQUEST_ID.into()),
            jsonrpc: JSONRPC_VERSION.into(),
            method: method.into(),
            params,
        }
    }
}

// ─── Error envelope ───────────────────────────────────────────────────────────

/// Top-level classification of a node error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorType {
    /// The node understood the request but failed serving it.
    HandlerError,
    /// The request itself was malformed.
    RequestValidationError,
    /// Node-side fault.
    InternalError,
}

impl ErrorType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::HandlerError => "HANDLER_ERROR",
            Self::RequestValidationError => "REQUEST_VALIDATION_ERROR",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A structured error returned by the node. Carried unchanged to the caller.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[error("{name}: {message} [{cause}]")]
pub struct RpcError {
    pub name: ErrorType,
    pub code: i64,
    pub message: String,
    /// Legacy free-form detail some node versions still populate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    pub cause: Cause,
}

impl RpcError {
    pub fn category(&self) -> ErrorCategory {
        match self.name {
            ErrorType::HandlerError => ErrorCategory::Handler,
            ErrorType::RequestValidationError => ErrorCategory::Validation,
            ErrorType::InternalError => ErrorCategory::NodeInternal,
        }
    }
}

// ─── Response ─────────────────────────────────────────────────────────────────

/// Keeps `"result": null` distinguishable from an absent `result`.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// A JSON-RPC 2.0 response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    #[serde(default)]
    pub id: RpcId,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
}

impl JsonRpcResponse {
    /// Parse a raw response body.
    pub fn parse(body: &str) -> Result<Self, ClientError> {
        let response: Self = serde_json::from_str(body)
            .map_err(|e| ClientError::Protocol(format!("malformed JSON-RPC response: {e}")))?;
        if response.jsonrpc != JSONRPC_VERSION {
            return Err(ClientError::Protocol(format!(
                "unsupported jsonrpc version `{}`",
                response.jsonrpc
            )));
        }
        Ok(response)
    }

    /// Split into success or failure by field presence. A `null` result is
    /// still a result.
    pub fn classify(self) -> Result<RpcOutcome<Value>, ClientError> {
        match (self.result, self.error) {
            (Some(result), None) => Ok(RpcOutcome::Success(result)),
            (None, Some(error)) => Ok(RpcOutcome::Failure(error)),
            (Some(_), Some(_)) => Err(ClientError::Protocol(
                "response carries both `result` and `error`".into(),
            )),
            (None, None) => Err(ClientError::Protocol(
                "response carries neither `result` nor `error`".into(),
            )),
        }
    }
}
