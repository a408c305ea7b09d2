//! Typed result payloads for each method.
//!
//! Only the fields callers commonly need are modelled; unknown fields in a
//! node's answer are ignored.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::{
    AccountId, Balance, BlockHash, BlockHeight, ChunkHash, CryptoHash, Gas, Nonce, PublicKey,
    ShardId,
};

// ─── query ────────────────────────────────────────────────────────────────────

/// Every `query` answer is pinned to the block it was computed against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse<T> {
    pub block_height: BlockHeight,
    pub block_hash: BlockHash,
    #[serde(flatten)]
    pub kind: T,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountView {
    pub amount: Balance,
    pub locked: Balance,
    pub code_hash: CryptoHash,
    pub storage_usage: u64,
    #[serde(default)]
    pub storage_paid_at: BlockHeight,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccessKeyPermission {
    FullAccess,
    FunctionCall {
        allowance: Option<Balance>,
        receiver_id: AccountId,
        method_names: Vec<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessKeyView {
    pub nonce: Nonce,
    pub permission: AccessKeyPermission,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessKeyInfoView {
    pub public_key: PublicKey,
    pub access_key: AccessKeyView,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessKeyList {
    pub keys: Vec<AccessKeyInfoView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractCodeView {
    pub code_base64: String,
    pub hash: CryptoHash,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateItem {
    pub key: String,
    pub value: String,
    #[serde(default)]
    pub proof: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewStateResult {
    pub values: Vec<StateItem>,
    #[serde(default)]
    pub proof: Vec<String>,
}

/// Output of a view function call. `result` holds the raw return bytes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CallResult {
    #[serde(default)]
    pub result: Option<Vec<u8>>,
    #[serde(default)]
    pub logs: Vec<String>,
    /// Older nodes report execution failures here instead of as an error cause.
    #[serde(default)]
    pub error: Option<String>,
}

// ─── transactions & receipts ──────────────────────────────────────────────────

/// One transaction action. Kinds added by later protocol versions decode
/// as [`ActionView::Other`] with their JSON intact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ActionView {
    CreateAccount,
    DeployContract {
        code: String,
    },
    FunctionCall {
        method_name: String,
        args: String,
        gas: Gas,
        deposit: Balance,
    },
    Transfer {
        deposit: Balance,
    },
    Stake {
        stake: Balance,
        public_key: PublicKey,
    },
    AddKey {
        public_key: PublicKey,
        access_key: AccessKeyView,
    },
    DeleteKey {
        public_key: PublicKey,
    },
    DeleteAccount {
        beneficiary_id: AccountId,
    },
    /// Meta-transaction: a signed action list relayed on the sender's behalf.
    Delegate {
        delegate_action: Value,
        signature: String,
    },
    #[serde(untagged)]
    Other(Value),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignedTransactionView {
    pub hash: CryptoHash,
    pub signature: String,
    pub signer_id: AccountId,
    pub public_key: PublicKey,
    pub nonce: Nonce,
    pub receiver_id: AccountId,
    pub actions: Vec<ActionView>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerklePathItem {
    pub hash: CryptoHash,
    pub direction: Direction,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExecutionStatusView {
    Unknown,
    Failure(Value),
    SuccessValue(String),
    SuccessReceiptId(CryptoHash),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionOutcomeView {
    pub logs: Vec<String>,
    pub receipt_ids: Vec<CryptoHash>,
    pub gas_burnt: Gas,
    pub tokens_burnt: Balance,
    pub executor_id: AccountId,
    pub status: ExecutionStatusView,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionOutcomeWithIdView {
    #[serde(default)]
    pub proof: Vec<MerklePathItem>,
    pub block_hash: CryptoHash,
    pub id: CryptoHash,
    pub outcome: ExecutionOutcomeView,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FinalExecutionStatus {
    NotStarted,
    Started,
    Failure(Value),
    SuccessValue(String),
}

/// Answer to `tx` and `broadcast_tx_commit`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalExecutionOutcomeView {
    pub status: FinalExecutionStatus,
    pub transaction: SignedTransactionView,
    pub transaction_outcome: ExecutionOutcomeWithIdView,
    pub receipts_outcome: Vec<ExecutionOutcomeWithIdView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataReceiverView {
    pub data_id: CryptoHash,
    pub receiver_id: AccountId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ReceiptEnumView {
    Action {
        signer_id: AccountId,
        signer_public_key: PublicKey,
        gas_price: Balance,
        output_data_receivers: Vec<DataReceiverView>,
        input_data_ids: Vec<CryptoHash>,
        actions: Vec<ActionView>,
    },
    Data {
        data_id: CryptoHash,
        /// Base64, absent when the data was never produced.
        data: Option<String>,
    },
    #[serde(untagged)]
    Other(Value),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptView {
    pub predecessor_id: AccountId,
    pub receiver_id: AccountId,
    pub receipt_id: CryptoHash,
    pub receipt: ReceiptEnumView,
}

// ─── blocks & chunks ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockHeaderView {
    pub height: BlockHeight,
    #[serde(default)]
    pub prev_height: Option<BlockHeight>,
    pub epoch_id: CryptoHash,
    pub next_epoch_id: CryptoHash,
    pub hash: CryptoHash,
    pub prev_hash: CryptoHash,
    pub prev_state_root: CryptoHash,
    pub chunks_included: u64,
    /// Nanoseconds since the epoch.
    pub timestamp: u64,
    pub timestamp_nanosec: String,
    pub gas_price: Balance,
    pub total_supply: Balance,
    pub last_final_block: CryptoHash,
    pub last_ds_final_block: CryptoHash,
    pub next_bp_hash: CryptoHash,
    pub block_merkle_root: CryptoHash,
    pub latest_protocol_version: u32,
    pub signature: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkHeaderView {
    pub chunk_hash: ChunkHash,
    pub prev_block_hash: BlockHash,
    pub outcome_root: CryptoHash,
    pub prev_state_root: CryptoHash,
    pub encoded_merkle_root: CryptoHash,
    pub encoded_length: u64,
    pub height_created: BlockHeight,
    pub height_included: BlockHeight,
    pub shard_id: ShardId,
    pub gas_used: Gas,
    pub gas_limit: Gas,
    pub balance_burnt: Balance,
    pub outgoing_receipts_root: CryptoHash,
    pub tx_root: CryptoHash,
    pub signature: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockView {
    pub author: AccountId,
    pub header: BlockHeaderView,
    pub chunks: Vec<ChunkHeaderView>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkView {
    pub author: AccountId,
    pub header: ChunkHeaderView,
    pub receipts: Vec<ReceiptView>,
    pub transactions: Vec<SignedTransactionView>,
}

// ─── node ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSyncInfo {
    pub latest_block_hash: CryptoHash,
    pub latest_block_height: BlockHeight,
    pub latest_state_root: CryptoHash,
    pub latest_block_time: String,
    pub syncing: bool,
    #[serde(default)]
    pub earliest_block_hash: Option<CryptoHash>,
    #[serde(default)]
    pub earliest_block_height: Option<BlockHeight>,
    #[serde(default)]
    pub earliest_block_time: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeVersion {
    pub version: String,
    pub build: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorInfo {
    pub account_id: AccountId,
    #[serde(default)]
    pub is_slashed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub chain_id: String,
    #[serde(default)]
    pub rpc_addr: Option<String>,
    pub sync_info: StatusSyncInfo,
    pub validators: Vec<ValidatorInfo>,
    pub version: NodeVersion,
    pub protocol_version: u32,
    pub latest_protocol_version: u32,
    #[serde(default)]
    pub validator_account_id: Option<AccountId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerInfo {
    pub id: PublicKey,
    pub addr: Option<String>,
    pub account_id: Option<AccountId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnownProducer {
    pub account_id: AccountId,
    pub addr: Option<String>,
    pub peer_id: PublicKey,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkInfoResponse {
    pub active_peers: Vec<PeerInfo>,
    pub num_active_peers: u64,
    pub peer_max_count: u64,
    pub sent_bytes_per_sec: u64,
    pub received_bytes_per_sec: u64,
    pub known_producers: Vec<KnownProducer>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GasPriceView {
    pub gas_price: Balance,
}

// ─── validators ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorStakeView {
    pub account_id: AccountId,
    pub public_key: PublicKey,
    pub stake: Balance,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentEpochValidatorInfo {
    pub account_id: AccountId,
    pub public_key: PublicKey,
    pub is_slashed: bool,
    pub stake: Balance,
    #[serde(default)]
    pub shards: Vec<ShardId>,
    pub num_produced_blocks: u64,
    pub num_expected_blocks: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextEpochValidatorInfo {
    pub account_id: AccountId,
    pub public_key: PublicKey,
    pub stake: Balance,
    #[serde(default)]
    pub shards: Vec<ShardId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochValidatorInfo {
    pub current_validators: Vec<CurrentEpochValidatorInfo>,
    pub next_validators: Vec<NextEpochValidatorInfo>,
    #[serde(default, alias = "current_fisherman")]
    pub current_fishermen: Vec<ValidatorStakeView>,
    #[serde(default, alias = "next_fisherman")]
    pub next_fishermen: Vec<ValidatorStakeView>,
    #[serde(default)]
    pub current_proposals: Vec<ValidatorStakeView>,
    /// Kickout entries carry a reason object whose shape varies by version.
    #[serde(default)]
    pub prev_epoch_kickout: Vec<Value>,
    pub epoch_start_height: BlockHeight,
}
