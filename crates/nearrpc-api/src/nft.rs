//! NFT (NEP-171 / NEP-177 / NEP-181) view client.
//!
//! Every method is a `call_function` query whose returned bytes are the
//! contract's JSON answer. Node-side failures are raised as
//! [`NftError::Node`] here rather than returned as an outcome, since a view
//! helper has nothing useful to hand back without a result.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

use nearrpc_core::{BlockReference, ClientError, RpcError, RpcOutcome};

use crate::args::bytes_to_string;
use crate::near::Near;

pub const DEFAULT_FROM_INDEX: u64 = 0;
pub const DEFAULT_LIMIT: u64 = 10;

#[derive(Debug, Error)]
pub enum NftError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("node rejected `{method}`: {error}")]
    Node { method: String, error: RpcError },

    /// The call went through but the contract produced no result.
    #[error("`{method}` failed: {message}")]
    Execution { method: String, message: String },

    #[error("could not decode `{method}` result: {source}")]
    Decode {
        method: String,
        #[source]
        source: serde_json::Error,
    },
}

// ─── Types ────────────────────────────────────────────────────────────────────

/// NEP-177 contract metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NftContractMetadata {
    pub spec: String,
    pub name: String,
    pub symbol: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub base_uri: Option<String>,
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub reference_hash: Option<String>,
}

/// NEP-177 token metadata. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenMetadata {
    pub title: Option<String>,
    pub description: Option<String>,
    pub media: Option<String>,
    pub media_hash: Option<String>,
    pub copies: Option<u64>,
    pub issued_at: Option<String>,
    pub expires_at: Option<String>,
    pub starts_at: Option<String>,
    pub updated_at: Option<String>,
    pub extra: Option<String>,
    pub reference: Option<String>,
    pub reference_hash: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenData {
    pub token_id: String,
    pub owner_id: String,
    #[serde(default)]
    pub metadata: TokenMetadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_account_ids: Option<Value>,
}

/// Where a token's media lives: `media` is resolved against `base_uri`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaUri {
    pub base_uri: Option<String>,
    pub media: Option<String>,
}

// ─── NftClient ────────────────────────────────────────────────────────────────

/// NFT views against any contract.
#[derive(Debug, Clone)]
pub struct NftClient {
    near: Near,
}

impl NftClient {
    pub fn new(near: Near) -> Self {
        Self { near }
    }

    pub fn connect(url: impl AsRef<str>) -> Result<Self, NftError> {
        Ok(Self::new(Near::connect(url)?))
    }

    pub fn near(&self) -> &Near {
        &self.near
    }

    /// Bind this client to one contract.
    pub fn contract(&self, contract: impl Into<String>) -> NftContractClient {
        NftContractClient::new(self.clone(), contract)
    }

    async fn contract_call<T: DeserializeOwned>(
        &self,
        contract: &str,
        method: &str,
        args: Value,
    ) -> Result<T, NftError> {
        let outcome = self
            .near
            .function_call(contract, method, Some(&args), BlockReference::default())
            .await?;

        let call = match outcome {
            RpcOutcome::Success(response) => response.kind,
            RpcOutcome::Failure(error) => {
                return Err(NftError::Node {
                    method: method.to_string(),
                    error,
                })
            }
        };

        let Some(bytes) = call.result else {
            tracing::debug!(contract, method, error = ?call.error, "contract call returned no result");
            return Err(NftError::Execution {
                method: method.to_string(),
                message: call.error.unwrap_or_else(|| "no result".to_string()),
            });
        };

        serde_json::from_str(&bytes_to_string(&bytes)).map_err(|source| NftError::Decode {
            method: method.to_string(),
            source,
        })
    }

    /// `None` when the token does not exist.
    pub async fn nft_token(
        &self,
        contract: &str,
        token_id: &str,
    ) -> Result<Option<TokenData>, NftError> {
        self.contract_call(contract, "nft_token", json!({ "token_id": token_id }))
            .await
    }

    pub async fn nft_metadata(&self, contract: &str) -> Result<NftContractMetadata, NftError> {
        self.contract_call(contract, "nft_metadata", json!({})).await
    }

    /// Token count as the contract reports it (a decimal string).
    pub async fn nft_supply_for_owner(
        &self,
        contract: &str,
        account_id: &str,
    ) -> Result<String, NftError> {
        self.contract_call(
            contract,
            "nft_supply_for_owner",
            json!({ "account_id": account_id }),
        )
        .await
    }

    /// `from_index` defaults to 0 and `limit` to 10.
    pub async fn nft_tokens_for_owner(
        &self,
        contract: &str,
        account_id: &str,
        from_index: Option<u64>,
        limit: Option<u64>,
    ) -> Result<Vec<TokenData>, NftError> {
        self.contract_call(
            contract,
            "nft_tokens_for_owner",
            json!({
                "account_id": account_id,
                "from_index": from_index.unwrap_or(DEFAULT_FROM_INDEX).to_string(),
                "limit": limit.unwrap_or(DEFAULT_LIMIT),
            }),
        )
        .await
    }

    pub async fn nft_tokens(
        &self,
        contract: &str,
        from_index: Option<u64>,
        limit: Option<u64>,
    ) -> Result<Vec<TokenData>, NftError> {
        self.contract_call(
            contract,
            "nft_tokens",
            json!({
                "from_index": from_index.unwrap_or(DEFAULT_FROM_INDEX).to_string(),
                "limit": limit.unwrap_or(DEFAULT_LIMIT),
            }),
        )
        .await
    }

    pub async fn nft_total_supply(&self, contract: &str) -> Result<String, NftError> {
        self.contract_call(contract, "nft_total_supply", json!({})).await
    }

    /// Contract `base_uri` and token `media`, fetched concurrently.
    /// `None` when the token does not exist.
    pub async fn nft_media_uri(
        &self,
        contract: &str,
        token_id: &str,
    ) -> Result<Option<MediaUri>, NftError> {
        let (metadata, token) = futures::try_join!(
            self.nft_metadata(contract),
            self.nft_token(contract, token_id)
        )?;

        Ok(token.map(|token| MediaUri {
            base_uri: metadata.base_uri,
            media: token.metadata.media,
        }))
    }
}

// ─── NftContractClient ────────────────────────────────────────────────────────

/// [`NftClient`] bound to a single contract.
#[derive(Debug, Clone)]
pub struct NftContractClient {
    client: NftClient,
    contract: String,
}

impl NftContractClient {
    pub fn new(client: NftClient, contract: impl Into<String>) -> Self {
        Self {
            client,
            contract: contract.into(),
        }
    }

    pub fn contract(&self) -> &str {
        &self.contract
    }

    pub async fn nft_token(&self, token_id: &str) -> Result<Option<TokenData>, NftError> {
        self.client.nft_token(&self.contract, token_id).await
    }

    pub async fn nft_metadata(&self) -> Result<NftContractMetadata, NftError> {
        self.client.nft_metadata(&self.contract).await
    }

    pub async fn nft_supply_for_owner(&self, account_id: &str) -> Result<String, NftError> {
        self.client
            .nft_supply_for_owner(&self.contract, account_id)
            .await
    }

    pub async fn nft_tokens_for_owner(
        &self,
        account_id: &str,
        from_index: Option<u64>,
        limit: Option<u64>,
    ) -> Result<Vec<TokenData>, NftError> {
        self.client
            .nft_tokens_for_owner(&self.contract, account_id, from_index, limit)
            .await
    }

    pub async fn nft_tokens(
        &self,
        from_index: Option<u64>,
        limit: Option<u64>,
    ) -> Result<Vec<TokenData>, NftError> {
        self.client
            .nft_tokens(&self.contract, from_index, limit)
            .await
    }

    pub async fn nft_total_supply(&self) -> Result<String, NftError> {
        self.client.nft_total_supply(&self.contract).await
    }

    pub async fn nft_media_uri(&self, token_id: &str) -> Result<Option<MediaUri>, NftError> {
        self.client.nft_media_uri(&self.contract, token_id).await
    }
}
