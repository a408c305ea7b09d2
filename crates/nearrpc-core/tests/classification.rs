//! End-to-end classification through `RpcClient` against a canned node.
//!
//! Each test wires a `FixedNode` transport that answers every request with
//! the same body, then checks the outcome the client hands back.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use nearrpc_core::methods::{
    BroadcastTxCommit, CallFunction, NetworkInfo, Status, Tx, ViewAccount,
};
use nearrpc_core::views::{ActionView, FinalExecutionStatus};
use nearrpc_core::{
    BlockReference, Cause, CauseKind, ClientError, ErrorCategory, RpcClient, RpcOutcome,
    RpcTransport, TransportError,
};

// ─── Helpers ──────────────────────────────────────────────────────────────────

struct FixedNode {
    body: String,
    calls: AtomicUsize,
}

#[async_trait]
impl RpcTransport for FixedNode {
    async fn send(&self, _body: String) -> Result<String, TransportError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        Ok(self.body.clone())
    }

    fn url(&self) -> &str {
        "fixed://node"
    }
}

fn node(body: impl Into<String>) -> (RpcClient, Arc<FixedNode>) {
    let node = Arc::new(FixedNode {
        body: body.into(),
        calls: AtomicUsize::new(0),
    });
    (RpcClient::new(node.clone()), node)
}

fn error_body(name: &str, cause: Value) -> String {
    json!({
        "jsonrpc": "2.0",
        "id": "dontcare",
        "error": {
            "name": name,
            "code": -32000,
            "message": "Server error",
            "cause": cause
        }
    })
    .to_string()
}

fn status_body() -> String {
    json!({
        "jsonrpc": "2.0",
        "id": "dontcare",
        "result": {
            "chain_id": "testnet",
            "rpc_addr": "0.0.0.0:3030",
            "sync_info": {
                "latest_block_hash": "44p1",
                "latest_block_height": 1000,
                "latest_state_root": "3Xq9",
                "latest_block_time": "2023-01-01T00:00:00.000000000Z",
                "syncing": false
            },
            "validators": [{ "account_id": "node0", "is_slashed": false }],
            "version": { "version": "1.30.0", "build": "abc" },
            "protocol_version": 57,
            "latest_protocol_version": 57,
            "validator_account_id": null
        }
    })
    .to_string()
}

fn meta_tx_body() -> String {
    let outcome = |id: &str| {
        json!({
            "proof": [],
            "block_hash": "Bh1",
            "id": id,
            "outcome": {
                "logs": [],
                "receipt_ids": [],
                "gas_burnt": 223182562500u64,
                "tokens_burnt": "22318256250000000000",
                "executor_id": "relayer.near",
                "status": { "SuccessValue": "" }
            }
        })
    };
    json!({
        "jsonrpc": "2.0",
        "id": "dontcare",
        "result": {
            "status": { "SuccessValue": "" },
            "transaction": {
                "hash": "Tx1",
                "signature": "ed25519:Relayer",
                "signer_id": "relayer.near",
                "public_key": "ed25519:RelayerKey",
                "nonce": 12,
                "receiver_id": "alice.near",
                "actions": [{
                    "Delegate": {
                        "delegate_action": {
                            "sender_id": "alice.near",
                            "receiver_id": "app.near",
                            "actions": [{ "FunctionCall": {
                                "method_name": "ping",
                                "args": "e30=",
                                "gas": 30000000000000u64,
                                "deposit": "0"
                            }}],
                            "nonce": 3,
                            "max_block_height": 120000,
                            "public_key": "ed25519:AliceKey"
                        },
                        "signature": "ed25519:Alice"
                    }
                }]
            },
            "transaction_outcome": outcome("Tx1"),
            "receipts_outcome": [outcome("Rc1")]
        }
    })
    .to_string()
}

// ─── Classification ───────────────────────────────────────────────────────────

#[tokio::test]
async fn unknown_block_is_handler_failure() {
    let (client, _) = node(error_body("HANDLER_ERROR", json!({ "name": "UNKNOWN_BLOCK" })));
    let outcome = client.call_raw("block", json!({ "block_id": 1 })).await.unwrap();

    assert_eq!(outcome.category(), Some(ErrorCategory::Handler));
    assert_eq!(outcome.cause().map(Cause::kind), Some(CauseKind::UnknownBlock));
}

#[tokio::test]
async fn validation_and_internal_categories() {
    let (client, _) = node(error_body(
        "REQUEST_VALIDATION_ERROR",
        json!({ "name": "PARSE_ERROR", "info": { "error_message": "invalid type" } }),
    ));
    let outcome = client.call(&Status).await.unwrap();
    assert_eq!(outcome.category(), Some(ErrorCategory::Validation));

    let (client, _) = node(error_body(
        "INTERNAL_ERROR",
        json!({ "name": "INTERNAL_ERROR", "info": { "error_message": "db" } }),
    ));
    let outcome = client.call(&Status).await.unwrap();
    assert_eq!(outcome.category(), Some(ErrorCategory::NodeInternal));
    assert_eq!(outcome.cause().unwrap().info(), json!({ "error_message": "db" }));
}

#[tokio::test]
async fn contract_execution_error_keeps_diagnostics() {
    let (client, _) = node(error_body(
        "HANDLER_ERROR",
        json!({
            "name": "CONTRACT_EXECUTION_ERROR",
            "info": {
                "vm_error": "wasm execution failed with error: MethodNotFound",
                "block_height": 88,
                "block_hash": "Hx1"
            }
        }),
    ));
    let outcome = client
        .call(&CallFunction {
            account_id: "nft.near".into(),
            method_name: "nope".into(),
            args_base64: String::new(),
            block_reference: BlockReference::default(),
        })
        .await
        .unwrap();

    let err = outcome.error().expect("failure expected");
    assert_eq!(err.message, "Server error");
    match &err.cause {
        Cause::ContractExecutionError(info) => {
            assert!(info.vm_error.contains("MethodNotFound"));
            assert_eq!(info.block_height, 88);
        }
        other => panic!("expected ContractExecutionError, got {other:?}"),
    }
}

#[tokio::test]
async fn undocumented_cause_is_still_surfaced() {
    let (client, _) = node(error_body(
        "HANDLER_ERROR",
        json!({ "name": "UNKNOWN_CHUNK", "info": { "chunk_hash": "C1" } }),
    ));
    let outcome = client.call(&Status).await.unwrap();
    assert_eq!(outcome.cause().map(Cause::kind), Some(CauseKind::UnknownChunk));
}

#[tokio::test]
async fn known_cause_with_unexpected_info_keeps_kind() {
    let (client, _) = node(error_body(
        "HANDLER_ERROR",
        json!({ "name": "UNKNOWN_ACCOUNT", "info": { "account": "ghost.near" } }),
    ));
    let outcome = client
        .call(&ViewAccount {
            account_id: "ghost.near".into(),
            block_reference: BlockReference::default(),
        })
        .await
        .unwrap();

    let cause = outcome.cause().unwrap();
    assert_eq!(cause.kind(), CauseKind::UnknownAccount);
    assert!(matches!(cause, Cause::Untyped { .. }));
    assert_eq!(cause.info(), json!({ "account": "ghost.near" }));
}

#[tokio::test]
async fn non_json_body_is_protocol_failure() {
    let (client, _) = node("<html>502 Bad Gateway</html>");
    let err = client.call(&Status).await.unwrap_err();
    assert!(matches!(err, ClientError::Protocol(_)));
    assert_eq!(err.category(), ErrorCategory::Protocol);
}

#[tokio::test]
async fn malformed_error_envelope_is_protocol_failure() {
    let (client, _) = node(r#"{"jsonrpc":"2.0","id":"dontcare","error":{"code":-32000}}"#);
    let err = client.call_raw("status", Value::Null).await.unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Protocol);
}

// ─── Success ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn status_is_idempotent_against_fixed_node() {
    let (client, node) = node(status_body());
    let first = client.call(&Status).await.unwrap();
    let second = client.call(&Status).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(node.calls.load(Ordering::Relaxed), 2);
    let status = first.result().unwrap();
    assert_eq!(status.chain_id, "testnet");
    assert_eq!(status.sync_info.latest_block_height, 1000);
}

#[tokio::test]
async fn query_result_carries_block() {
    let body = json!({
        "jsonrpc": "2.0",
        "id": "dontcare",
        "result": {
            "amount": "399992611103597728750000000",
            "locked": "0",
            "code_hash": "11111111111111111111111111111111",
            "storage_usage": 642,
            "storage_paid_at": 0,
            "block_height": 17795474,
            "block_hash": "9MjpcnwW3TSdzGweNfPbkx8M74q1XzUcT1PAN8G5bNDz"
        }
    });
    let (client, _) = node(body.to_string());
    let outcome = client
        .call(&ViewAccount {
            account_id: "sender.testnet".into(),
            block_reference: BlockReference::default(),
        })
        .await
        .unwrap();

    let RpcOutcome::Success(account) = outcome else {
        panic!("expected success");
    };
    assert_eq!(account.block_height, 17795474);
    assert_eq!(account.kind.storage_usage, 642);
}

#[tokio::test]
async fn network_info_and_tx_share_one_client_concurrently() {
    let body = json!({
        "jsonrpc": "2.0",
        "id": "dontcare",
        "result": {
            "active_peers": [],
            "num_active_peers": 0,
            "peer_max_count": 40,
            "sent_bytes_per_sec": 0,
            "received_bytes_per_sec": 0,
            "known_producers": []
        }
    });
    let (client, node) = node(body.to_string());

    let tx = Tx {
        hash: "H".into(),
        account_id: "A".into(),
    };
    let (info, raw) = tokio::join!(client.call(&NetworkInfo), client.call_raw("tx", json!(["H", "A"])));
    assert_eq!(info.unwrap().result().unwrap().peer_max_count, 40);
    assert!(raw.unwrap().is_success());
    // A network_info body does not fit the tx result type.
    assert!(client.call(&tx).await.is_err());
    assert_eq!(node.calls.load(Ordering::Relaxed), 3);
}

#[tokio::test]
async fn meta_transaction_result_is_success() {
    let (client, _) = node(meta_tx_body());

    let outcome = client
        .call(&Tx {
            hash: "Tx1".into(),
            account_id: "relayer.near".into(),
        })
        .await
        .unwrap();
    let view = outcome.result().expect("success expected");
    assert_eq!(view.status, FinalExecutionStatus::SuccessValue(String::new()));
    assert!(matches!(
        &view.transaction.actions[0],
        ActionView::Delegate { delegate_action, .. } if delegate_action["sender_id"] == "alice.near"
    ));

    let committed = client
        .call(&BroadcastTxCommit {
            signed_tx_base64: "AAAA".into(),
        })
        .await
        .unwrap();
    assert!(committed.is_success());
}
