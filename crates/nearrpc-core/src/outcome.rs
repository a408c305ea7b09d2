//! The success/failure envelope every call returns.

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::cause::Cause;
use crate::error::ErrorCategory;
use crate::request::RpcError;

/// Result of a call that reached the node and got a well-formed answer.
///
/// Node-reported errors are expected outcomes and live here as data, never
/// in the `Err` side of the surrounding `Result`.
#[must_use]
#[derive(Debug, Clone, PartialEq)]
pub enum RpcOutcome<T> {
    Success(T),
    Failure(RpcError),
}

impl<T> RpcOutcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    pub fn result(&self) -> Option<&T> {
        match self {
            Self::Success(v) => Some(v),
            Self::Failure(_) => None,
        }
    }

    pub fn error(&self) -> Option<&RpcError> {
        match self {
            Self::Success(_) => None,
            Self::Failure(e) => Some(e),
        }
    }

    pub fn cause(&self) -> Option<&Cause> {
        self.error().map(|e| &e.cause)
    }

    pub fn category(&self) -> Option<ErrorCategory> {
        self.error().map(RpcError::category)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> RpcOutcome<U> {
        match self {
            Self::Success(v) => RpcOutcome::Success(f(v)),
            Self::Failure(e) => RpcOutcome::Failure(e),
        }
    }

    /// Convert into a plain `Result` for callers who want `?`.
    pub fn into_result(self) -> Result<T, RpcError> {
        match self {
            Self::Success(v) => Ok(v),
            Self::Failure(e) => Err(e),
        }
    }
}

impl<T> From<RpcOutcome<T>> for Result<T, RpcError> {
    fn from(outcome: RpcOutcome<T>) -> Self {
        outcome.into_result()
    }
}

/// `{ "ok": true, "result": .. }` or `{ "ok": false, "error": .. }`.
impl<T: Serialize> Serialize for RpcOutcome<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("RpcOutcome", 2)?;
        match self {
            Self::Success(v) => {
                s.serialize_field("ok", &true)?;
                s.serialize_field("result", v)?;
            }
            Self::Failure(e) => {
                s.serialize_field("ok", &false)?;
                s.serialize_field("error", e)?;
            }
        }
        s.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::ErrorType;
    use serde_json::{json, Value};

    fn timeout() -> RpcError {
        RpcError {
            name: ErrorType::HandlerError,
            code: -32000,
            message: "Server error".into(),
            data: None,
            cause: Cause::TimeoutError(Value::Null),
        }
    }

    #[test]
    fn success_accessors() {
        let o: RpcOutcome<u32> = RpcOutcome::Success(3);
        assert!(o.is_success());
        assert_eq!(o.result(), Some(&3));
        assert!(o.error().is_none());
        assert_eq!(o.map(|v| v * 2).into_result().unwrap(), 6);
    }

    #[test]
    fn failure_accessors() {
        let o: RpcOutcome<u32> = RpcOutcome::Failure(timeout());
        assert!(o.is_failure());
        assert_eq!(o.category(), Some(ErrorCategory::Handler));
        assert_eq!(o.cause().map(Cause::name), Some("TIMEOUT_ERROR"));
        let r: Result<u32, RpcError> = o.into();
        assert!(r.is_err());
    }

    #[test]
    fn serializes_as_tagged_union() {
        let ok: RpcOutcome<Value> = RpcOutcome::Success(Value::Null);
        assert_eq!(serde_json::to_value(&ok).unwrap(), json!({ "ok": true, "result": null }));

        let err: RpcOutcome<Value> = RpcOutcome::Failure(timeout());
        let v = serde_json::to_value(&err).unwrap();
        assert_eq!(v["ok"], json!(false));
        assert_eq!(v["error"]["cause"]["name"], json!("TIMEOUT_ERROR"));
    }
}
