//! The closed set of error causes a NEAR node reports inside an error envelope.
//!
//! On the wire a cause is `{ "name": "UNKNOWN_ACCOUNT", "info": { ... } }`.
//! The shape of `info` depends entirely on `name`, so each cause is its own
//! variant carrying a typed payload. Causes whose info the node does not
//! document keep the raw JSON so nothing the node said is thrown away.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::{AccountId, BlockHash, BlockHeight, ChunkHash, CryptoHash, PublicKey, ShardId};

// ─── CauseKind ────────────────────────────────────────────────────────────────

/// Payload-free tag of a [`Cause`], used for per-operation cause tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CauseKind {
    UnknownBlock,
    InvalidAccount,
    UnknownAccount,
    NoContractCode,
    TooLargeContractState,
    ContractExecutionError,
    UnknownAccessKey,
    UnavailableShard,
    NoSyncedBlocks,
    NotSyncedYet,
    UnknownChunk,
    InvalidShardId,
    UnknownReceipt,
    UnknownTransaction,
    InvalidTransaction,
    TimeoutError,
    UnknownEpoch,
    ParseError,
    MethodNotFound,
    InternalError,
    /// Anything the taxonomy does not know.
    Other,
}

impl CauseKind {
    pub const ALL: [CauseKind; 20] = [
        Self::UnknownBlock,
        Self::InvalidAccount,
        Self::UnknownAccount,
        Self::NoContractCode,
        Self::TooLargeContractState,
        Self::ContractExecutionError,
        Self::UnknownAccessKey,
        Self::UnavailableShard,
        Self::NoSyncedBlocks,
        Self::NotSyncedYet,
        Self::UnknownChunk,
        Self::InvalidShardId,
        Self::UnknownReceipt,
        Self::UnknownTransaction,
        Self::InvalidTransaction,
        Self::TimeoutError,
        Self::UnknownEpoch,
        Self::ParseError,
        Self::MethodNotFound,
        Self::InternalError,
    ];

    /// Wire name of the cause. `Other` has no fixed name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::UnknownBlock => "UNKNOWN_BLOCK",
            Self::InvalidAccount => "INVALID_ACCOUNT",
            Self::UnknownAccount => "UNKNOWN_ACCOUNT",
            Self::NoContractCode => "NO_CONTRACT_CODE",
            Self::TooLargeContractState => "TOO_LARGE_CONTRACT_STATE",
            Self::ContractExecutionError => "CONTRACT_EXECUTION_ERROR",
            Self::UnknownAccessKey => "UNKNOWN_ACCESS_KEY",
            Self::UnavailableShard => "UNAVAILABLE_SHARD",
            Self::NoSyncedBlocks => "NO_SYNCED_BLOCKS",
            Self::NotSyncedYet => "NOT_SYNCED_YET",
            Self::UnknownChunk => "UNKNOWN_CHUNK",
            Self::InvalidShardId => "INVALID_SHARD_ID",
            Self::UnknownReceipt => "UNKNOWN_RECEIPT",
            Self::UnknownTransaction => "UNKNOWN_TRANSACTION",
            Self::InvalidTransaction => "INVALID_TRANSACTION",
            Self::TimeoutError => "TIMEOUT_ERROR",
            Self::UnknownEpoch => "UNKNOWN_EPOCH",
            Self::ParseError => "PARSE_ERROR",
            Self::MethodNotFound => "METHOD_NOT_FOUND",
            Self::InternalError => "INTERNAL_ERROR",
            Self::Other => "OTHER",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == name)
    }
}

impl fmt::Display for CauseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Info payloads ────────────────────────────────────────────────────────────

/// `INVALID_ACCOUNT` / `UNKNOWN_ACCOUNT`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountAtBlock {
    pub requested_account_id: AccountId,
    pub block_height: BlockHeight,
    pub block_hash: BlockHash,
}

/// `NO_CONTRACT_CODE` / `TOO_LARGE_CONTRACT_STATE`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractAtBlock {
    pub contract_account_id: AccountId,
    pub block_height: BlockHeight,
    pub block_hash: BlockHash,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessKeyAtBlock {
    pub public_key: PublicKey,
    pub block_height: BlockHeight,
    pub block_hash: BlockHash,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VmErrorAtBlock {
    pub vm_error: String,
    pub block_height: BlockHeight,
    pub block_hash: BlockHash,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnavailableShardInfo {
    pub requested_shard_id: ShardId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkInfo {
    pub chunk_hash: ChunkHash,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShardIdInfo {
    pub shard_id: ShardId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptInfo {
    pub receipt_id: CryptoHash,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionInfo {
    pub requested_transaction_hash: CryptoHash,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseErrorInfo {
    pub error_message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodInfo {
    pub method_name: String,
}

// ─── Cause ────────────────────────────────────────────────────────────────────

/// A decoded error cause.
///
/// A known name whose info does not match the documented shape decodes as
/// [`Cause::Untyped`], keeping its kind, rather than failing the whole
/// response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawCause", into = "RawCause")]
pub enum Cause {
    UnknownBlock(Value),
    InvalidAccount(AccountAtBlock),
    UnknownAccount(AccountAtBlock),
    NoContractCode(ContractAtBlock),
    TooLargeContractState(ContractAtBlock),
    ContractExecutionError(VmErrorAtBlock),
    UnknownAccessKey(AccessKeyAtBlock),
    UnavailableShard(UnavailableShardInfo),
    NoSyncedBlocks(Value),
    NotSyncedYet(Value),
    UnknownChunk(ChunkInfo),
    InvalidShardId(ShardIdInfo),
    UnknownReceipt(ReceiptInfo),
    UnknownTransaction(TransactionInfo),
    InvalidTransaction(Value),
    TimeoutError(Value),
    UnknownEpoch(Value),
    ParseError(ParseErrorInfo),
    MethodNotFound(MethodInfo),
    InternalError(Value),
    /// Known cause, info in a shape this crate does not model.
    Untyped { kind: CauseKind, info: Value },
    Other { name: String, info: Value },
}

impl Cause {
    pub fn kind(&self) -> CauseKind {
        match self {
            Self::UnknownBlock(_) => CauseKind::UnknownBlock,
            Self::InvalidAccount(_) => CauseKind::InvalidAccount,
            Self::UnknownAccount(_) => CauseKind::UnknownAccount,
            Self::NoContractCode(_) => CauseKind::NoContractCode,
            Self::TooLargeContractState(_) => CauseKind::TooLargeContractState,
            Self::ContractExecutionError(_) => CauseKind::ContractExecutionError,
            Self::UnknownAccessKey(_) => CauseKind::UnknownAccessKey,
            Self::UnavailableShard(_) => CauseKind::UnavailableShard,
            Self::NoSyncedBlocks(_) => CauseKind::NoSyncedBlocks,
            Self::NotSyncedYet(_) => CauseKind::NotSyncedYet,
            Self::UnknownChunk(_) => CauseKind::UnknownChunk,
            Self::InvalidShardId(_) => CauseKind::InvalidShardId,
            Self::UnknownReceipt(_) => CauseKind::UnknownReceipt,
            Self::UnknownTransaction(_) => CauseKind::UnknownTransaction,
            Self::InvalidTransaction(_) => CauseKind::InvalidTransaction,
            Self::TimeoutError(_) => CauseKind::TimeoutError,
            Self::UnknownEpoch(_) => CauseKind::UnknownEpoch,
            Self::ParseError(_) => CauseKind::ParseError,
            Self::MethodNotFound(_) => CauseKind::MethodNotFound,
            Self::InternalError(_) => CauseKind::InternalError,
            Self::Untyped { kind, .. } => *kind,
            Self::Other { .. } => CauseKind::Other,
        }
    }

    /// The name exactly as the node sent it.
    pub fn name(&self) -> &str {
        match self {
            Self::Other { name, .. } => name,
            other => other.kind().as_str(),
        }
    }

    /// The info payload re-encoded as JSON.
    pub fn info(&self) -> Value {
        RawCause::from(self.clone()).info
    }

    /// Height and hash of the block a state query was evaluated against,
    /// for the causes that report it.
    pub fn block(&self) -> Option<(BlockHeight, &str)> {
        match self {
            Self::InvalidAccount(i) | Self::UnknownAccount(i) => {
                Some((i.block_height, i.block_hash.as_str()))
            }
            Self::NoContractCode(i) | Self::TooLargeContractState(i) => {
                Some((i.block_height, i.block_hash.as_str()))
            }
            Self::UnknownAccessKey(i) => Some((i.block_height, i.block_hash.as_str())),
            Self::ContractExecutionError(i) => Some((i.block_height, i.block_hash.as_str())),
            _ => None,
        }
    }
}

impl fmt::Display for Cause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())?;
        match self {
            Self::InvalidAccount(i) | Self::UnknownAccount(i) => {
                write!(f, " (account {} at block {})", i.requested_account_id, i.block_height)
            }
            Self::NoContractCode(i) | Self::TooLargeContractState(i) => {
                write!(f, " (contract {} at block {})", i.contract_account_id, i.block_height)
            }
            Self::ContractExecutionError(i) => write!(f, ": {}", i.vm_error),
            Self::UnknownAccessKey(i) => write!(f, " (key {})", i.public_key),
            Self::UnavailableShard(i) => write!(f, " (shard {})", i.requested_shard_id),
            Self::UnknownChunk(i) => write!(f, " (chunk {})", i.chunk_hash),
            Self::InvalidShardId(i) => write!(f, " (shard {})", i.shard_id),
            Self::UnknownReceipt(i) => write!(f, " (receipt {})", i.receipt_id),
            Self::UnknownTransaction(i) => write!(f, " (tx {})", i.requested_transaction_hash),
            Self::ParseError(i) => write!(f, ": {}", i.error_message),
            Self::MethodNotFound(i) => write!(f, " ({})", i.method_name),
            _ => Ok(()),
        }
    }
}

// ─── Wire form ────────────────────────────────────────────────────────────────

/// The untyped `{ name, info }` object as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawCause {
    pub name: String,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub info: Value,
}

fn decode<T: DeserializeOwned>(info: &Value) -> Option<T> {
    serde_json::from_value(info.clone()).ok()
}

impl From<RawCause> for Cause {
    fn from(raw: RawCause) -> Self {
        let RawCause { name, info } = raw;
        let Some(kind) = CauseKind::from_name(&name) else {
            tracing::warn!(cause = %name, "unrecognized error cause");
            return Self::Other { name, info };
        };

        let typed = match kind {
            CauseKind::UnknownBlock => return Self::UnknownBlock(info),
            CauseKind::NoSyncedBlocks => return Self::NoSyncedBlocks(info),
            CauseKind::NotSyncedYet => return Self::NotSyncedYet(info),
            CauseKind::InvalidTransaction => return Self::InvalidTransaction(info),
            CauseKind::TimeoutError => return Self::TimeoutError(info),
            CauseKind::UnknownEpoch => return Self::UnknownEpoch(info),
            CauseKind::InternalError => return Self::InternalError(info),
            CauseKind::InvalidAccount => decode(&info).map(Self::InvalidAccount),
            CauseKind::UnknownAccount => decode(&info).map(Self::UnknownAccount),
            CauseKind::NoContractCode => decode(&info).map(Self::NoContractCode),
            CauseKind::TooLargeContractState => decode(&info).map(Self::TooLargeContractState),
            CauseKind::ContractExecutionError => decode(&info).map(Self::ContractExecutionError),
            CauseKind::UnknownAccessKey => decode(&info).map(Self::UnknownAccessKey),
            CauseKind::UnavailableShard => decode(&info).map(Self::UnavailableShard),
            CauseKind::UnknownChunk => decode(&info).map(Self::UnknownChunk),
            CauseKind::InvalidShardId => decode(&info).map(Self::InvalidShardId),
            CauseKind::UnknownReceipt => decode(&info).map(Self::UnknownReceipt),
            CauseKind::UnknownTransaction => decode(&info).map(Self::UnknownTransaction),
            CauseKind::ParseError => decode(&info).map(Self::ParseError),
            CauseKind::MethodNotFound => decode(&info).map(Self::MethodNotFound),
            CauseKind::Other => None,
        };

        typed.unwrap_or_else(|| {
            tracing::warn!(cause = %name, %info, "error cause info has unexpected shape");
            Self::Untyped { kind, info }
        })
    }
}

fn encode<T: Serialize>(info: &T) -> Value {
    serde_json::to_value(info).unwrap_or_default()
}

impl From<Cause> for RawCause {
    fn from(cause: Cause) -> Self {
        let name = cause.name().to_string();
        let info = match cause {
            Cause::UnknownBlock(v)
            | Cause::NoSyncedBlocks(v)
            | Cause::NotSyncedYet(v)
            | Cause::InvalidTransaction(v)
            | Cause::TimeoutError(v)
            | Cause::UnknownEpoch(v)
            | Cause::InternalError(v)
            | Cause::Untyped { info: v, .. }
            | Cause::Other { info: v, .. } => v,
            Cause::InvalidAccount(i) | Cause::UnknownAccount(i) => encode(&i),
            Cause::NoContractCode(i) | Cause::TooLargeContractState(i) => encode(&i),
            Cause::ContractExecutionError(i) => encode(&i),
            Cause::UnknownAccessKey(i) => encode(&i),
            Cause::UnavailableShard(i) => encode(&i),
            Cause::UnknownChunk(i) => encode(&i),
            Cause::InvalidShardId(i) => encode(&i),
            Cause::UnknownReceipt(i) => encode(&i),
            Cause::UnknownTransaction(i) => encode(&i),
            Cause::ParseError(i) => encode(&i),
            Cause::MethodNotFound(i) => encode(&i),
        };
        Self { name, info }
    }
}
