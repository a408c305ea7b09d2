//! Rendering of call outcomes.

use anyhow::{bail, Result};
use serde::Serialize;

use nearrpc_core::{RpcError, RpcOutcome};

/// Print an outcome; a node-reported failure becomes the command's error.
pub fn emit<T: Serialize>(outcome: &RpcOutcome<T>, json: bool) -> Result<()> {
    emit_with(outcome, json, |value| {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    })
}

/// Like [`emit`], with a custom human-readable rendering of the result.
pub fn emit_with<T: Serialize>(
    outcome: &RpcOutcome<T>,
    json: bool,
    human: impl FnOnce(&T) -> Result<()>,
) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(outcome)?);
    }
    match outcome {
        RpcOutcome::Success(value) if !json => human(value),
        RpcOutcome::Success(_) => Ok(()),
        RpcOutcome::Failure(err) => {
            if !json {
                eprintln!("{}", describe(err));
            }
            bail!("node returned {}", err.category())
        }
    }
}

fn describe(err: &RpcError) -> String {
    let mut out = format!("✗ {} ({}): {}", err.name, err.category(), err.message);
    out.push_str(&format!("\n  cause: {}", err.cause));
    let info = err.cause.info();
    if !info.is_null() {
        out.push_str(&format!("\n  info:  {info}"));
    }
    out
}
