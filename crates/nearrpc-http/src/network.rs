//! Public NEAR RPC endpoints.
//!
//! Free, no-API-key nodes run by the NEAR Foundation. Fine for development
//! and light use; rate limits apply.

use std::fmt;
use std::str::FromStr;

use nearrpc_core::{ClientError, RpcClient};

use crate::client::{connect_with, HttpClientConfig};

pub const MAINNET: &str = "https://rpc.mainnet.near.org";
pub const TESTNET: &str = "https://rpc.testnet.near.org";

/// A named public network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Network {
    Mainnet,
    #[default]
    Testnet,
}

impl Network {
    pub const fn url(&self) -> &'static str {
        match self {
            Self::Mainnet => MAINNET,
            Self::Testnet => TESTNET,
        }
    }

    pub fn connect(&self, config: HttpClientConfig) -> Result<RpcClient, ClientError> {
        connect_with(self.url(), config)
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Mainnet => "mainnet",
            Self::Testnet => "testnet",
        })
    }
}

impl FromStr for Network {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mainnet" => Ok(Self::Mainnet),
            "testnet" => Ok(Self::Testnet),
            other => Err(format!("unknown network `{other}` (expected mainnet or testnet)")),
        }
    }
}
