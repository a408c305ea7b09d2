//! Typed requests, one per [`Operation`].
//!
//! Each request knows its operation, builds its own params in the exact
//! shape the node expects, and names the type its result decodes into.

use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};

use crate::endpoint::Operation;
use crate::types::{AccountId, BlockId, BlockReference, ChunkId, CryptoHash, PublicKey};
use crate::views::{
    AccessKeyList, AccessKeyView, AccountView, BlockView, CallResult, ChunkView, ContractCodeView,
    EpochValidatorInfo, FinalExecutionOutcomeView, GasPriceView, NetworkInfoResponse,
    QueryResponse, ReceiptView, StatusResponse, ViewStateResult,
};

/// A request the client can send.
pub trait RpcMethod {
    /// What a successful `result` decodes into.
    type Response: DeserializeOwned;

    fn operation(&self) -> Operation;

    fn params(&self) -> Value;
}

/// `{ request_type, <block reference>, ..fields }`
fn query_params(operation: Operation, reference: &BlockReference, fields: Value) -> Value {
    let mut params = Map::new();
    if let Some(request_type) = operation.request_type() {
        params.insert("request_type".into(), request_type.into());
    }
    params.extend(reference.to_params());
    if let Value::Object(fields) = fields {
        params.extend(fields);
    }
    Value::Object(params)
}

fn optional_block(block_id: Option<&BlockId>) -> Value {
    json!([block_id.map_or(Value::Null, BlockId::to_value)])
}

// ─── query ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewAccount {
    pub account_id: AccountId,
    pub block_reference: BlockReference,
}

impl RpcMethod for ViewAccount {
    type Response = QueryResponse<AccountView>;

    fn operation(&self) -> Operation {
        Operation::ViewAccount
    }

    fn params(&self) -> Value {
        query_params(
            self.operation(),
            &self.block_reference,
            json!({ "account_id": self.account_id }),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewCode {
    pub account_id: AccountId,
    pub block_reference: BlockReference,
}

impl RpcMethod for ViewCode {
    type Response = QueryResponse<ContractCodeView>;

    fn operation(&self) -> Operation {
        Operation::ViewCode
    }

    fn params(&self) -> Value {
        query_params(
            self.operation(),
            &self.block_reference,
            json!({ "account_id": self.account_id }),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub account_id: AccountId,
    /// Base64 key prefix; empty for the whole state.
    pub prefix_base64: String,
    pub block_reference: BlockReference,
}

impl RpcMethod for ViewState {
    type Response = QueryResponse<ViewStateResult>;

    fn operation(&self) -> Operation {
        Operation::ViewState
    }

    fn params(&self) -> Value {
        query_params(
            self.operation(),
            &self.block_reference,
            json!({ "account_id": self.account_id, "prefix_base64": self.prefix_base64 }),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewAccessKey {
    pub account_id: AccountId,
    pub public_key: PublicKey,
    pub block_reference: BlockReference,
}

impl RpcMethod for ViewAccessKey {
    type Response = QueryResponse<AccessKeyView>;

    fn operation(&self) -> Operation {
        Operation::ViewAccessKey
    }

    fn params(&self) -> Value {
        query_params(
            self.operation(),
            &self.block_reference,
            json!({ "account_id": self.account_id, "public_key": self.public_key }),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewAccessKeyList {
    pub account_id: AccountId,
    pub block_reference: BlockReference,
}

impl RpcMethod for ViewAccessKeyList {
    type Response = QueryResponse<AccessKeyList>;

    fn operation(&self) -> Operation {
        Operation::ViewAccessKeyList
    }

    fn params(&self) -> Value {
        query_params(
            self.operation(),
            &self.block_reference,
            json!({ "account_id": self.account_id }),
        )
    }
}

/// Call a view function. `args_base64` is already encoded; the core never
/// looks inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallFunction {
    pub account_id: AccountId,
    pub method_name: String,
    pub args_base64: String,
    pub block_reference: BlockReference,
}

impl RpcMethod for CallFunction {
    type Response = QueryResponse<CallResult>;

    fn operation(&self) -> Operation {
        Operation::CallFunction
    }

    fn params(&self) -> Value {
        query_params(
            self.operation(),
            &self.block_reference,
            json!({
                "account_id": self.account_id,
                "method_name": self.method_name,
                "args_base64": self.args_base64,
            }),
        )
    }
}

// ─── blocks, chunks, transactions ─────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Block {
    pub block_reference: BlockReference,
}

impl RpcMethod for Block {
    type Response = BlockView;

    fn operation(&self) -> Operation {
        Operation::Block
    }

    fn params(&self) -> Value {
        Value::Object(self.block_reference.to_params())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub chunk_id: ChunkId,
}

impl RpcMethod for Chunk {
    type Response = ChunkView;

    fn operation(&self) -> Operation {
        Operation::Chunk
    }

    fn params(&self) -> Value {
        self.chunk_id.to_params()
    }
}

/// Transaction status lookup. Params are positional: `[hash, sender]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tx {
    pub hash: CryptoHash,
    pub account_id: AccountId,
}

impl RpcMethod for Tx {
    type Response = FinalExecutionOutcomeView;

    fn operation(&self) -> Operation {
        Operation::Tx
    }

    fn params(&self) -> Value {
        json!([self.hash, self.account_id])
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperimentalReceipt {
    pub receipt_id: CryptoHash,
}

impl RpcMethod for ExperimentalReceipt {
    type Response = ReceiptView;

    fn operation(&self) -> Operation {
        Operation::ExperimentalReceipt
    }

    fn params(&self) -> Value {
        json!({ "receipt_id": self.receipt_id })
    }
}

// ─── node ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Status;

impl RpcMethod for Status {
    type Response = StatusResponse;

    fn operation(&self) -> Operation {
        Operation::Status
    }

    fn params(&self) -> Value {
        Value::Null
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NetworkInfo;

impl RpcMethod for NetworkInfo {
    type Response = NetworkInfoResponse;

    fn operation(&self) -> Operation {
        Operation::NetworkInfo
    }

    fn params(&self) -> Value {
        json!([])
    }
}

/// A healthy node answers with a `null` result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Health;

impl RpcMethod for Health {
    type Response = ();

    fn operation(&self) -> Operation {
        Operation::Health
    }

    fn params(&self) -> Value {
        Value::Null
    }
}

/// Validators of the epoch containing `block_id`, or the latest epoch.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Validators {
    pub block_id: Option<BlockId>,
}

impl RpcMethod for Validators {
    type Response = EpochValidatorInfo;

    fn operation(&self) -> Operation {
        Operation::Validators
    }

    fn params(&self) -> Value {
        optional_block(self.block_id.as_ref())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GasPrice {
    pub block_id: Option<BlockId>,
}

impl RpcMethod for GasPrice {
    type Response = GasPriceView;

    fn operation(&self) -> Operation {
        Operation::GasPrice
    }

    fn params(&self) -> Value {
        optional_block(self.block_id.as_ref())
    }
}

// ─── broadcast ────────────────────────────────────────────────────────────────

/// Submit a base64 signed transaction and return its hash immediately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BroadcastTxAsync {
    pub signed_tx_base64: String,
}

impl RpcMethod for BroadcastTxAsync {
    type Response = CryptoHash;

    fn operation(&self) -> Operation {
        Operation::BroadcastTxAsync
    }

    fn params(&self) -> Value {
        json!([self.signed_tx_base64])
    }
}

/// Submit a base64 signed transaction and wait for it to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BroadcastTxCommit {
    pub signed_tx_base64: String,
}

impl RpcMethod for BroadcastTxCommit {
    type Response = FinalExecutionOutcomeView;

    fn operation(&self) -> Operation {
        Operation::BroadcastTxCommit
    }

    fn params(&self) -> Value {
        json!([self.signed_tx_base64])
    }
}
