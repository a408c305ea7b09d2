//! nearrpc CLI: query a NEAR node from the terminal.
//!
//! # Commands
//! ```text
//! nearrpc status
//! nearrpc health
//! nearrpc block      [--block <height|hash>] [--finality <level>]
//! nearrpc gas-price  [--block <height|hash>]
//! nearrpc account    <account-id> [--block ..] [--finality ..]
//! nearrpc call       <contract> <method> [--args <json>] [--block ..] [--finality ..]
//! nearrpc tx         <hash> <sender>
//! nearrpc raw        <method> [--params <json>]
//! ```

use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use nearrpc_api::Near;
use nearrpc_core::{BlockId, BlockReference, Finality};
use nearrpc_http::{HttpClientConfig, Network};

mod cmd_query;
mod output;

#[derive(Parser)]
#[command(
    name = "nearrpc",
    about = "Typed NEAR JSON-RPC client",
    long_about = "
Query a NEAR node over JSON-RPC. Node errors are printed with their
classification (handler, validation, internal) and cause.

ENVIRONMENT VARIABLES:
  NEAR_RPC_URL   Node URL (overrides --network)
  RUST_LOG       Log filter, e.g. nearrpc_core=debug
",
    version
)]
struct Cli {
    /// Node URL
    #[arg(long, env = "NEAR_RPC_URL", global = true)]
    url: Option<String>,

    /// Public network to use when no URL is given
    #[arg(long, default_value = "testnet", global = true)]
    network: Network,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30, global = true)]
    timeout: u64,

    /// Print the full outcome as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Raise log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Where in chain history to evaluate a read.
#[derive(clap::Args)]
struct At {
    /// Block height or hash
    #[arg(long, value_parser = BlockId::from_str)]
    block: Option<BlockId>,

    /// optimistic | near-final | final
    #[arg(long, default_value = "final")]
    finality: Finality,
}

impl From<At> for BlockReference {
    fn from(at: At) -> Self {
        BlockReference::from_parts(at.block, at.finality)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Node status: chain id, version, latest block
    Status,

    /// Whether the node considers itself healthy
    Health,

    /// Fetch a block
    Block {
        #[command(flatten)]
        at: At,
    },

    /// Gas price at a block, or the latest one
    #[command(name = "gas-price")]
    GasPrice {
        /// Block height or hash
        #[arg(long, value_parser = BlockId::from_str)]
        block: Option<BlockId>,
    },

    /// View an account
    Account {
        account_id: String,
        #[command(flatten)]
        at: At,
    },

    /// Call a view function
    Call {
        contract: String,
        method: String,
        /// JSON arguments, e.g. '{"token_id":"1"}'
        #[arg(long)]
        args: Option<String>,
        #[command(flatten)]
        at: At,
    },

    /// Transaction status
    Tx { hash: String, sender: String },

    /// Send any method with JSON params
    Raw {
        method: String,
        /// JSON params (default: null)
        #[arg(long)]
        params: Option<String>,
    },
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let url = cli.url.unwrap_or_else(|| cli.network.url().to_string());
    let config = HttpClientConfig {
        request_timeout: Duration::from_secs(cli.timeout),
        ..HttpClientConfig::default()
    };
    let near = Near::connect_with(&url, config).context("could not set up client")?;
    tracing::debug!(url = %near.client().url(), "client ready");

    let json = cli.json;
    match cli.command {
        Commands::Status => cmd_query::status(&near, json).await,
        Commands::Health => cmd_query::health(&near, json).await,
        Commands::Block { at } => cmd_query::block(&near, at.into(), json).await,
        Commands::GasPrice { block } => cmd_query::gas_price(&near, block, json).await,
        Commands::Account { account_id, at } => {
            cmd_query::account(&near, &account_id, at.into(), json).await
        }
        Commands::Call {
            contract,
            method,
            args,
            at,
        } => cmd_query::call(&near, &contract, &method, args.as_deref(), at.into(), json).await,
        Commands::Tx { hash, sender } => cmd_query::tx(&near, &hash, &sender, json).await,
        Commands::Raw { method, params } => {
            cmd_query::raw(&near, &method, params.as_deref(), json).await
        }
    }
}
