//! nearrpc-api: high-level helpers on top of `nearrpc-core`.
//!
//! - [`Near`]: one async method per RPC operation
//! - [`NftClient`] / [`NftContractClient`]: NEP-171 view calls with decoded results
//! - [`args`]: base64 argument encoding for contract calls
//!
//! # Quick start
//! ```rust,no_run
//! use nearrpc_api::NftClient;
//! use nearrpc_http::network::MAINNET;
//!
//! # async fn run() -> Result<(), nearrpc_api::NftError> {
//! let nft = NftClient::connect(MAINNET)?;
//! let supply = nft.nft_total_supply("x.paras.near").await?;
//! println!("{supply} tokens");
//! # Ok(())
//! # }
//! ```

pub mod args;
pub mod near;
pub mod nft;

pub use args::{bytes_to_string, encode_args};
pub use near::Near;
pub use nft::{MediaUri, NftClient, NftContractClient, NftContractMetadata, NftError, TokenData};
