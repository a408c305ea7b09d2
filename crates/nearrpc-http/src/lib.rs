//! nearrpc-http: HTTP transport for the NEAR JSON-RPC client.
//!
//! # Quick start
//! ```rust,no_run
//! use nearrpc_core::methods::Status;
//!
//! # async fn run() -> Result<(), nearrpc_core::ClientError> {
//! let client = nearrpc_http::connect(nearrpc_http::network::TESTNET)?;
//! let outcome = client.call(&Status).await?;
//! if let Some(status) = outcome.result() {
//!     println!("{} at #{}", status.chain_id, status.sync_info.latest_block_height);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod network;

pub use client::{connect, connect_with, HttpClientConfig, HttpTransport};
pub use network::Network;
