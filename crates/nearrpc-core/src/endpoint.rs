//! Endpoint registry: static table of every operation the client can issue.
//!
//! Each [`Operation`] fixes three things: the JSON-RPC method name, the shape
//! of its params, and the set of error causes the node documents for it.
//! The params themselves are built by the typed requests in
//! [`methods`](crate::methods); this table is what they are checked against.

use std::fmt;

use serde_json::Value;

use crate::cause::CauseKind;
use crate::methods::RpcMethod;

/// How a method's params are laid out on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamStyle {
    /// A JSON object.
    Keyed,
    /// A JSON array.
    Positional,
    /// Literal `null`.
    Null,
}

impl ParamStyle {
    pub fn matches(&self, params: &Value) -> bool {
        match self {
            Self::Keyed => params.is_object(),
            Self::Positional => params.is_array(),
            Self::Null => params.is_null(),
        }
    }
}

/// Every logical operation the client knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    ViewAccount,
    ViewCode,
    ViewState,
    ViewAccessKey,
    ViewAccessKeyList,
    CallFunction,
    Block,
    Chunk,
    Tx,
    ExperimentalReceipt,
    Status,
    NetworkInfo,
    Health,
    Validators,
    GasPrice,
    BroadcastTxAsync,
    BroadcastTxCommit,
}

use CauseKind as C;

const QUERY_BASE: &[CauseKind] = &[
    C::UnknownBlock,
    C::InvalidAccount,
    C::UnknownAccount,
    C::UnavailableShard,
    C::NoSyncedBlocks,
    C::ParseError,
    C::InternalError,
];

const VIEW_CODE: &[CauseKind] = &[
    C::UnknownBlock,
    C::InvalidAccount,
    C::UnknownAccount,
    C::NoContractCode,
    C::UnavailableShard,
    C::NoSyncedBlocks,
    C::ParseError,
    C::InternalError,
];

const VIEW_STATE: &[CauseKind] = &[
    C::UnknownBlock,
    C::InvalidAccount,
    C::UnknownAccount,
    C::NoContractCode,
    C::TooLargeContractState,
    C::UnavailableShard,
    C::NoSyncedBlocks,
    C::ParseError,
    C::InternalError,
];

const VIEW_ACCESS_KEY: &[CauseKind] = &[
    C::UnknownBlock,
    C::InvalidAccount,
    C::UnknownAccount,
    C::UnknownAccessKey,
    C::UnavailableShard,
    C::NoSyncedBlocks,
    C::ParseError,
    C::InternalError,
];

const CALL_FUNCTION: &[CauseKind] = &[
    C::InternalError,
    C::ParseError,
    C::UnknownBlock,
    C::UnknownAccount,
    C::NoContractCode,
    C::ContractExecutionError,
    C::UnavailableShard,
    C::NoSyncedBlocks,
];

const BLOCK: &[CauseKind] = &[C::UnknownBlock, C::ParseError, C::InternalError, C::NotSyncedYet];

const CHUNK: &[CauseKind] = &[
    C::UnknownBlock,
    C::ParseError,
    C::InternalError,
    C::UnknownChunk,
    C::InvalidShardId,
];

const TX: &[CauseKind] = &[
    C::InvalidTransaction,
    C::ParseError,
    C::InternalError,
    C::UnknownTransaction,
    C::TimeoutError,
];

const RECEIPT: &[CauseKind] = &[C::ParseError, C::InternalError, C::UnknownReceipt];

const NODE: &[CauseKind] = &[C::InternalError];

const VALIDATORS: &[CauseKind] = &[C::InternalError, C::ParseError, C::UnknownEpoch];

const GAS_PRICE: &[CauseKind] = &[C::InternalError, C::ParseError, C::UnknownBlock];

const BROADCAST_ASYNC: &[CauseKind] = &[C::ParseError, C::InternalError];

const BROADCAST_COMMIT: &[CauseKind] = &[
    C::ParseError,
    C::TimeoutError,
    C::InvalidTransaction,
    C::InternalError,
];

impl Operation {
    pub const ALL: [Operation; 17] = [
        Self::ViewAccount,
        Self::ViewCode,
        Self::ViewState,
        Self::ViewAccessKey,
        Self::ViewAccessKeyList,
        Self::CallFunction,
        Self::Block,
        Self::Chunk,
        Self::Tx,
        Self::ExperimentalReceipt,
        Self::Status,
        Self::NetworkInfo,
        Self::Health,
        Self::Validators,
        Self::GasPrice,
        Self::BroadcastTxAsync,
        Self::BroadcastTxCommit,
    ];

    /// JSON-RPC method name.
    pub const fn method(&self) -> &'static str {
        match self {
            Self::ViewAccount
            | Self::ViewCode
            | Self::ViewState
            | Self::ViewAccessKey
            | Self::ViewAccessKeyList
            | Self::CallFunction => "query",
            Self::Block => "block",
            Self::Chunk => "chunk",
            Self::Tx => "tx",
            Self::ExperimentalReceipt => "EXPERIMENTAL_receipt",
            Self::Status => "status",
            Self::NetworkInfo => "network_info",
            Self::Health => "health",
            Self::Validators => "validators",
            Self::GasPrice => "gas_price",
            Self::BroadcastTxAsync => "broadcast_tx_async",
            Self::BroadcastTxCommit => "broadcast_tx_commit",
        }
    }

    /// `request_type` discriminator for `query` operations.
    pub const fn request_type(&self) -> Option<&'static str> {
        match self {
            Self::ViewAccount => Some("view_account"),
            Self::ViewCode => Some("view_code"),
            Self::ViewState => Some("view_state"),
            Self::ViewAccessKey => Some("view_access_key"),
            Self::ViewAccessKeyList => Some("view_access_key_list"),
            Self::CallFunction => Some("call_function"),
            _ => None,
        }
    }

    /// Node-specific: `status` and `health` take `null`, `network_info` an
    /// empty array.
    pub const fn param_style(&self) -> ParamStyle {
        match self {
            Self::Status | Self::Health => ParamStyle::Null,
            Self::Tx
            | Self::NetworkInfo
            | Self::Validators
            | Self::GasPrice
            | Self::BroadcastTxAsync
            | Self::BroadcastTxCommit => ParamStyle::Positional,
            _ => ParamStyle::Keyed,
        }
    }

    /// Causes the node documents for this operation.
    pub const fn causes(&self) -> &'static [CauseKind] {
        match self {
            Self::ViewAccount | Self::ViewAccessKeyList => QUERY_BASE,
            Self::ViewCode => VIEW_CODE,
            Self::ViewState => VIEW_STATE,
            Self::ViewAccessKey => VIEW_ACCESS_KEY,
            Self::CallFunction => CALL_FUNCTION,
            Self::Block => BLOCK,
            Self::Chunk => CHUNK,
            Self::Tx => TX,
            Self::ExperimentalReceipt => RECEIPT,
            Self::Status | Self::NetworkInfo | Self::Health => NODE,
            Self::Validators => VALIDATORS,
            Self::GasPrice => GAS_PRICE,
            Self::BroadcastTxAsync => BROADCAST_ASYNC,
            Self::BroadcastTxCommit => BROADCAST_COMMIT,
        }
    }

    /// Whether `kind` is a documented outcome of this operation.
    /// `METHOD_NOT_FOUND` is accepted everywhere.
    pub fn permits(&self, kind: CauseKind) -> bool {
        kind == CauseKind::MethodNotFound || self.causes().contains(&kind)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.request_type() {
            Some(kind) => write!(f, "{}/{kind}", self.method()),
            None => f.write_str(self.method()),
        }
    }
}

/// A request resolved to its wire method and params.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    pub operation: Operation,
    pub method: &'static str,
    pub params: Value,
}

/// Resolve a typed request through the registry.
pub fn resolve<M: RpcMethod + ?Sized>(request: &M) -> Resolved {
    let operation = request.operation();
    let params = request.params();
    debug_assert!(
        operation.param_style().matches(&params),
        "{operation} params do not match the registered shape"
    );
    Resolved {
        operation,
        method: operation.method(),
        params,
    }
}
