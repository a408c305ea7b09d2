//! NFT and convenience-method behavior against a scripted node.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::{json, Value};

use nearrpc_api::{MediaUri, Near, NftClient, NftError};
use nearrpc_core::{
    BlockId, CauseKind, ErrorCategory, Finality, RpcClient, RpcTransport, TransportError,
};

// ─── Scripted node ────────────────────────────────────────────────────────────

/// Answers `call_function` queries by contract method name; everything
/// else gets `fallback`.
struct ScriptedNode {
    views: Vec<(&'static str, Value)>,
    fallback: Value,
    seen: Mutex<Vec<Value>>,
}

impl ScriptedNode {
    fn new(views: Vec<(&'static str, Value)>) -> Arc<Self> {
        Arc::new(Self {
            views,
            fallback: json!({ "jsonrpc": "2.0", "id": "dontcare", "result": null }),
            seen: Mutex::new(Vec::new()),
        })
    }

    fn requests(&self) -> Vec<Value> {
        self.seen.lock().unwrap().clone()
    }
}

/// A successful `call_function` reply whose bytes are `answer` as JSON.
fn view_result(answer: Value) -> Value {
    let bytes: Vec<u8> = answer.to_string().into_bytes();
    json!({
        "jsonrpc": "2.0",
        "id": "dontcare",
        "result": { "result": bytes, "logs": [], "block_height": 10, "block_hash": "B" }
    })
}

#[async_trait]
impl RpcTransport for ScriptedNode {
    async fn send(&self, body: String) -> Result<String, TransportError> {
        let request: Value = serde_json::from_str(&body).unwrap();
        self.seen.lock().unwrap().push(request.clone());

        let method = request["params"]["method_name"].as_str().unwrap_or_default();
        let reply = self
            .views
            .iter()
            .find(|(name, _)| *name == method)
            .map(|(_, reply)| reply.clone())
            .unwrap_or_else(|| self.fallback.clone());
        Ok(reply.to_string())
    }

    fn url(&self) -> &str {
        "scripted://node"
    }
}

fn nft(node: &Arc<ScriptedNode>) -> NftClient {
    NftClient::new(Near::new(RpcClient::new(node.clone())))
}

fn decoded_args(request: &Value) -> Value {
    let encoded = request["params"]["args_base64"].as_str().unwrap();
    serde_json::from_slice(&STANDARD.decode(encoded).unwrap()).unwrap()
}

fn token(id: &str, media: &str) -> Value {
    json!({
        "token_id": id,
        "owner_id": "alice.near",
        "metadata": { "title": "Token", "media": media }
    })
}

// ─── NFT ──────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn tokens_for_owner_sends_defaults() {
    let node = ScriptedNode::new(vec![(
        "nft_tokens_for_owner",
        view_result(json!([token("1", "1.png"), token("2", "2.png")])),
    )]);
    let tokens = nft(&node)
        .nft_tokens_for_owner("nft.near", "alice.near", None, None)
        .await
        .unwrap();
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[1].metadata.media.as_deref(), Some("2.png"));

    let request = &node.requests()[0];
    assert_eq!(request["method"], "query");
    assert_eq!(request["params"]["request_type"], "call_function");
    assert_eq!(request["params"]["account_id"], "nft.near");
    assert_eq!(request["params"]["finality"], "final");
    assert_eq!(
        decoded_args(request),
        json!({ "account_id": "alice.near", "from_index": "0", "limit": 10 })
    );
}

#[tokio::test]
async fn no_arg_views_send_empty_object() {
    let node = ScriptedNode::new(vec![("nft_total_supply", view_result(json!("1500")))]);
    let supply = nft(&node).contract("nft.near").nft_total_supply().await.unwrap();
    assert_eq!(supply, "1500");
    assert_eq!(node.requests()[0]["params"]["args_base64"], "e30=");
}

#[tokio::test]
async fn media_uri_combines_metadata_and_token() {
    let node = ScriptedNode::new(vec![
        (
            "nft_metadata",
            view_result(json!({
                "spec": "nft-1.0.0",
                "name": "Example",
                "symbol": "EX",
                "base_uri": "https://ipfs.io/ipfs"
            })),
        ),
        ("nft_token", view_result(token("7", "bafy7.png"))),
    ]);
    let uri = nft(&node).nft_media_uri("nft.near", "7").await.unwrap();
    assert_eq!(
        uri,
        Some(MediaUri {
            base_uri: Some("https://ipfs.io/ipfs".into()),
            media: Some("bafy7.png".into()),
        })
    );
    assert_eq!(node.requests().len(), 2);
}

#[tokio::test]
async fn missing_token_gives_no_media_uri() {
    let node = ScriptedNode::new(vec![
        (
            "nft_metadata",
            view_result(json!({ "spec": "nft-1.0.0", "name": "Example", "symbol": "EX" })),
        ),
        ("nft_token", view_result(Value::Null)),
    ]);
    let client = nft(&node).contract("nft.near");
    assert_eq!(client.nft_token("404").await.unwrap(), None);
    assert_eq!(client.nft_media_uri("404").await.unwrap(), None);
}

#[tokio::test]
async fn contract_error_is_node_error() {
    let node = ScriptedNode::new(vec![(
        "nft_metadata",
        json!({
            "jsonrpc": "2.0",
            "id": "dontcare",
            "error": {
                "name": "HANDLER_ERROR",
                "code": -32000,
                "message": "Server error",
                "cause": {
                    "name": "CONTRACT_EXECUTION_ERROR",
                    "info": { "vm_error": "MethodNotFound", "block_height": 1, "block_hash": "B" }
                }
            }
        }),
    )]);
    match nft(&node).nft_metadata("not-an-nft.near").await {
        Err(NftError::Node { method, error }) => {
            assert_eq!(method, "nft_metadata");
            assert_eq!(error.category(), ErrorCategory::Handler);
            assert_eq!(error.cause.kind(), CauseKind::ContractExecutionError);
        }
        other => panic!("expected node error, got {other:?}"),
    }
}

#[tokio::test]
async fn legacy_error_field_is_execution_error() {
    let node = ScriptedNode::new(vec![(
        "nft_total_supply",
        json!({
            "jsonrpc": "2.0",
            "id": "dontcare",
            "result": { "error": "wasm execution failed", "logs": [], "block_height": 1, "block_hash": "B" }
        }),
    )]);
    let err = nft(&node).nft_total_supply("nft.near").await.unwrap_err();
    assert!(matches!(err, NftError::Execution { ref message, .. } if message == "wasm execution failed"));
}

#[tokio::test]
async fn garbage_bytes_are_decode_error() {
    let node = ScriptedNode::new(vec![(
        "nft_total_supply",
        json!({
            "jsonrpc": "2.0",
            "id": "dontcare",
            "result": { "result": [110, 111, 112, 101], "logs": [], "block_height": 1, "block_hash": "B" }
        }),
    )]);
    let err = nft(&node).nft_total_supply("nft.near").await.unwrap_err();
    assert!(matches!(err, NftError::Decode { .. }));
}

// ─── Near ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn function_call_without_args_sends_empty_string() {
    let node = ScriptedNode::new(vec![("get_greeting", view_result(json!("hi")))]);
    let near = Near::new(RpcClient::new(node.clone()));
    let outcome = near
        .function_call("greeter.near", "get_greeting", None, BlockId::Height(99))
        .await
        .unwrap();

    let call = outcome.result().unwrap();
    assert_eq!(call.block_height, 10);
    assert_eq!(call.kind.result.as_deref(), Some(&b"\"hi\""[..]));

    let request = &node.requests()[0];
    assert_eq!(request["params"]["args_base64"], "IiI=");
    assert_eq!(request["params"]["block_id"], 99);
    assert!(request["params"].get("finality").is_none());
}

#[tokio::test]
async fn convenience_methods_use_registry_shapes() {
    let node = ScriptedNode::new(vec![]);
    let near = Near::new(RpcClient::new(node.clone()));

    assert!(near.health().await.unwrap().is_success());
    // A null result does not fit the gas price view.
    assert!(near.gas_price(None).await.is_err());
    let _ = near.view_access_key_list("alice.near", Finality::Optimistic).await;

    let requests = node.requests();
    assert_eq!(requests[0]["method"], "health");
    assert_eq!(requests[0]["params"], Value::Null);
    assert_eq!(requests[1]["method"], "gas_price");
    assert_eq!(requests[1]["params"], json!([null]));
    assert_eq!(requests[2]["params"]["request_type"], "view_access_key_list");
    assert_eq!(requests[2]["params"]["finality"], "optimistic");
}
