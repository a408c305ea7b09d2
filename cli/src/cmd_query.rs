//! Subcommand implementations.

use anyhow::{Context, Result};
use serde_json::Value;

use nearrpc_api::{bytes_to_string, Near};
use nearrpc_core::{BlockId, BlockReference};

use crate::output::{emit, emit_with};

pub async fn status(near: &Near, json: bool) -> Result<()> {
    let outcome = near.status().await.context("status request failed")?;
    emit_with(&outcome, json, |status| {
        println!("chain:    {}", status.chain_id);
        println!("version:  {} ({})", status.version.version, status.version.build);
        println!("protocol: {}", status.protocol_version);
        println!(
            "latest:   #{} {}",
            status.sync_info.latest_block_height, status.sync_info.latest_block_hash
        );
        println!("syncing:  {}", status.sync_info.syncing);
        Ok(())
    })
}

pub async fn health(near: &Near, json: bool) -> Result<()> {
    let outcome = near.health().await.context("health request failed")?;
    emit_with(&outcome, json, |_| {
        println!("✓ healthy");
        Ok(())
    })
}

pub async fn block(near: &Near, at: BlockReference, json: bool) -> Result<()> {
    let outcome = near.block(at).await.context("block request failed")?;
    emit(&outcome, json)
}

pub async fn gas_price(near: &Near, block: Option<BlockId>, json: bool) -> Result<()> {
    let outcome = near.gas_price(block).await.context("gas_price request failed")?;
    emit_with(&outcome, json, |view| {
        println!("{} yoctoNEAR per gas", view.gas_price);
        Ok(())
    })
}

pub async fn account(near: &Near, account_id: &str, at: BlockReference, json: bool) -> Result<()> {
    let outcome = near
        .view_account(account_id, at)
        .await
        .context("view_account request failed")?;
    emit(&outcome, json)
}

pub async fn call(
    near: &Near,
    contract: &str,
    method: &str,
    args: Option<&str>,
    at: BlockReference,
    json: bool,
) -> Result<()> {
    let args: Option<Value> = args
        .map(serde_json::from_str)
        .transpose()
        .context("--args is not valid JSON")?;

    let outcome = near
        .function_call(contract, method, args.as_ref(), at)
        .await
        .context("call_function request failed")?;

    emit_with(&outcome, json, |response| {
        for log in &response.kind.logs {
            eprintln!("log: {log}");
        }
        match (&response.kind.result, &response.kind.error) {
            (Some(bytes), _) => println!("{}", bytes_to_string(bytes)),
            (None, Some(error)) => anyhow::bail!("execution failed: {error}"),
            (None, None) => println!("(no result)"),
        }
        Ok(())
    })
}

pub async fn tx(near: &Near, hash: &str, sender: &str, json: bool) -> Result<()> {
    let outcome = near.tx(hash, sender).await.context("tx request failed")?;
    emit(&outcome, json)
}

pub async fn raw(near: &Near, method: &str, params: Option<&str>, json: bool) -> Result<()> {
    let params = match params {
        Some(text) => serde_json::from_str(text).context("--params is not valid JSON")?,
        None => Value::Null,
    };
    let outcome = near
        .client()
        .call_raw(method, params)
        .await
        .with_context(|| format!("{method} request failed"))?;
    emit(&outcome, json)
}
