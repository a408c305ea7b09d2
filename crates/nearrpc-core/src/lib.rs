//! nearrpc-core: typed dispatch and error taxonomy for the NEAR JSON-RPC API.
//!
//! # Overview
//!
//! - [`RpcTransport`]: the injected capability that performs one exchange
//! - [`RpcClient`]: builds the envelope, sends it, classifies the reply
//! - [`RpcOutcome`]: `Success(result)` or `Failure(RpcError)`, returned by every call
//! - [`Cause`] / [`CauseKind`]: the closed set of node error causes
//! - [`Operation`]: registry of methods, param shapes and per-method cause sets
//! - [`methods`]: one typed request per operation
//! - [`views`]: typed result payloads
//!
//! Transport faults and malformed responses are the only things returned as
//! `Err(ClientError)`. Everything the node says in a well-formed envelope,
//! errors included, arrives as an [`RpcOutcome`].

pub mod cause;
pub mod client;
pub mod endpoint;
pub mod error;
pub mod methods;
pub mod outcome;
pub mod request;
pub mod transport;
pub mod types;
pub mod views;

pub use cause::{Cause, CauseKind};
pub use client::RpcClient;
pub use endpoint::{resolve, Operation, ParamStyle, Resolved};
pub use error::{ClientError, ErrorCategory, TransportError};
pub use methods::RpcMethod;
pub use outcome::RpcOutcome;
pub use request::{ErrorType, JsonRpcRequest, JsonRpcResponse, RpcError, RpcId};
pub use transport::{parse_endpoint, RpcTransport};
pub use types::{BlockId, BlockReference, ChunkId, Finality, SyncCheckpoint};
