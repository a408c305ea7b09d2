//! `Near`: one async method per RPC operation.
//!
//! Thin layer over [`RpcClient`]: each method builds the typed request and
//! hands back the client's outcome untouched. Block references default to
//! `finality: final`.

use serde_json::Value;

use nearrpc_core::methods::{
    Block, BroadcastTxAsync, BroadcastTxCommit, CallFunction, Chunk, ExperimentalReceipt,
    GasPrice, Health, NetworkInfo, Status, Tx, Validators, ViewAccessKey, ViewAccessKeyList,
    ViewAccount, ViewCode, ViewState,
};
use nearrpc_core::types::{AccountId, CryptoHash, PublicKey};
use nearrpc_core::views::{
    AccessKeyList, AccessKeyView, AccountView, BlockView, CallResult, ChunkView,
    ContractCodeView, EpochValidatorInfo, FinalExecutionOutcomeView, GasPriceView,
    NetworkInfoResponse, QueryResponse, ReceiptView, StatusResponse, ViewStateResult,
};
use nearrpc_core::{BlockId, BlockReference, ChunkId, ClientError, RpcClient, RpcOutcome};
use nearrpc_http::HttpClientConfig;

use crate::args::{encode_args, NO_ARGS};

type Outcome<T> = Result<RpcOutcome<T>, ClientError>;

/// Convenience client for a single node.
#[derive(Debug, Clone)]
pub struct Near {
    client: RpcClient,
}

impl Near {
    pub fn new(client: RpcClient) -> Self {
        Self { client }
    }

    /// HTTP client for `url` with default settings.
    pub fn connect(url: impl AsRef<str>) -> Result<Self, ClientError> {
        Ok(Self::new(nearrpc_http::connect(url)?))
    }

    pub fn connect_with(url: impl AsRef<str>, config: HttpClientConfig) -> Result<Self, ClientError> {
        Ok(Self::new(nearrpc_http::connect_with(url, config)?))
    }

    pub fn client(&self) -> &RpcClient {
        &self.client
    }

    // ─── query ────────────────────────────────────────────────────────────────

    pub async fn view_account(
        &self,
        account_id: impl Into<AccountId>,
        at: impl Into<BlockReference>,
    ) -> Outcome<QueryResponse<AccountView>> {
        self.client
            .call(&ViewAccount {
                account_id: account_id.into(),
                block_reference: at.into(),
            })
            .await
    }

    pub async fn view_access_key(
        &self,
        account_id: impl Into<AccountId>,
        public_key: impl Into<PublicKey>,
        at: impl Into<BlockReference>,
    ) -> Outcome<QueryResponse<AccessKeyView>> {
        self.client
            .call(&ViewAccessKey {
                account_id: account_id.into(),
                public_key: public_key.into(),
                block_reference: at.into(),
            })
            .await
    }

    pub async fn view_access_key_list(
        &self,
        account_id: impl Into<AccountId>,
        at: impl Into<BlockReference>,
    ) -> Outcome<QueryResponse<AccessKeyList>> {
        self.client
            .call(&ViewAccessKeyList {
                account_id: account_id.into(),
                block_reference: at.into(),
            })
            .await
    }

    pub async fn view_code(
        &self,
        account_id: impl Into<AccountId>,
        at: impl Into<BlockReference>,
    ) -> Outcome<QueryResponse<ContractCodeView>> {
        self.client
            .call(&ViewCode {
                account_id: account_id.into(),
                block_reference: at.into(),
            })
            .await
    }

    pub async fn view_state(
        &self,
        account_id: impl Into<AccountId>,
        prefix_base64: impl Into<String>,
        at: impl Into<BlockReference>,
    ) -> Outcome<QueryResponse<ViewStateResult>> {
        self.client
            .call(&ViewState {
                account_id: account_id.into(),
                prefix_base64: prefix_base64.into(),
                block_reference: at.into(),
            })
            .await
    }

    /// Call a view function. `None` args are sent as the JSON string `""`.
    pub async fn function_call(
        &self,
        account_id: impl Into<AccountId>,
        method_name: impl Into<String>,
        args: Option<&Value>,
        at: impl Into<BlockReference>,
    ) -> Outcome<QueryResponse<CallResult>> {
        let args_base64 = match args {
            Some(args) => encode_args(args)?,
            None => NO_ARGS.to_string(),
        };
        self.client
            .call(&CallFunction {
                account_id: account_id.into(),
                method_name: method_name.into(),
                args_base64,
                block_reference: at.into(),
            })
            .await
    }

    // ─── blocks, chunks, transactions ─────────────────────────────────────────

    pub async fn block(&self, at: impl Into<BlockReference>) -> Outcome<BlockView> {
        self.client
            .call(&Block {
                block_reference: at.into(),
            })
            .await
    }

    pub async fn chunk(&self, chunk_id: ChunkId) -> Outcome<ChunkView> {
        self.client.call(&Chunk { chunk_id }).await
    }

    pub async fn tx(
        &self,
        hash: impl Into<CryptoHash>,
        account_id: impl Into<AccountId>,
    ) -> Outcome<FinalExecutionOutcomeView> {
        self.client
            .call(&Tx {
                hash: hash.into(),
                account_id: account_id.into(),
            })
            .await
    }

    pub async fn experimental_receipt(
        &self,
        receipt_id: impl Into<CryptoHash>,
    ) -> Outcome<ReceiptView> {
        self.client
            .call(&ExperimentalReceipt {
                receipt_id: receipt_id.into(),
            })
            .await
    }

    // ─── node ─────────────────────────────────────────────────────────────────

    pub async fn status(&self) -> Outcome<StatusResponse> {
        self.client.call(&Status).await
    }

    pub async fn network_info(&self) -> Outcome<NetworkInfoResponse> {
        self.client.call(&NetworkInfo).await
    }

    pub async fn health(&self) -> Outcome<()> {
        self.client.call(&Health).await
    }

    pub async fn validators(&self, block_id: Option<BlockId>) -> Outcome<EpochValidatorInfo> {
        self.client.call(&Validators { block_id }).await
    }

    pub async fn gas_price(&self, block_id: Option<BlockId>) -> Outcome<GasPriceView> {
        self.client.call(&GasPrice { block_id }).await
    }

    // ─── broadcast ────────────────────────────────────────────────────────────

    pub async fn broadcast_tx_async(&self, signed_tx_base64: impl Into<String>) -> Outcome<CryptoHash> {
        self.client
            .call(&BroadcastTxAsync {
                signed_tx_base64: signed_tx_base64.into(),
            })
            .await
    }

    pub async fn broadcast_tx_commit(
        &self,
        signed_tx_base64: impl Into<String>,
    ) -> Outcome<FinalExecutionOutcomeView> {
        self.client
            .call(&BroadcastTxCommit {
                signed_tx_base64: signed_tx_base64.into(),
            })
            .await
    }
}

impl From<RpcClient> for Near {
    fn from(client: RpcClient) -> Self {
        Self::new(client)
    }
}
