//! `HttpTransport` against a local fixture node.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use nearrpc_core::methods::{Health, Status, Tx};
use nearrpc_core::{CauseKind, ClientError, ErrorCategory, RpcOutcome, RpcTransport, TransportError};
use nearrpc_http::{connect, connect_with, HttpClientConfig, HttpTransport};

// ─── Fixture server ───────────────────────────────────────────────────────────

type Seen = Arc<Mutex<Vec<String>>>;

/// Serve `status` + `body` to every connection, recording request bodies.
async fn serve(status: u16, body: &'static str) -> (String, Seen) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    let seen: Seen = Arc::default();

    let log = seen.clone();
    tokio::spawn(async move {
        loop {
            let Ok((stream, _)) = listener.accept().await else {
                return;
            };
            let log = log.clone();
            tokio::spawn(async move {
                let _ = answer(stream, status, body, log).await;
            });
        }
    });
    (url, seen)
}

async fn answer(
    mut stream: TcpStream,
    status: u16,
    body: &str,
    seen: Seen,
) -> std::io::Result<()> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    let header_end = loop {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            return Ok(());
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_ascii_lowercase();
    let length = head
        .lines()
        .find_map(|l| l.strip_prefix("content-length:"))
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(0);
    while buf.len() < header_end + length {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }
    seen.lock()
        .unwrap()
        .push(String::from_utf8_lossy(&buf[header_end..]).into_owned());

    let response = format!(
        "HTTP/1.1 {status} Fixture\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
        body.len()
    );
    stream.write_all(response.as_bytes()).await?;
    stream.shutdown().await
}

const STATUS_OK: &str = r#"{"jsonrpc":"2.0","id":"dontcare","result":{"chain_id":"localnet","sync_info":{"latest_block_hash":"B1","latest_block_height":42,"latest_state_root":"S1","latest_block_time":"2024-01-01T00:00:00Z","syncing":false},"validators":[],"version":{"version":"1.0.0","build":"fixture"},"protocol_version":60,"latest_protocol_version":60}}"#;

const UNKNOWN_TX: &str = r#"{"jsonrpc":"2.0","id":"dontcare","error":{"name":"HANDLER_ERROR","code":-32000,"message":"Server error","cause":{"name":"UNKNOWN_TRANSACTION","info":{"requested_transaction_hash":"H"}}}}"#;

// ─── Tests ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn status_round_trip() {
    let (url, seen) = serve(200, STATUS_OK).await;
    let client = connect(&url).unwrap();

    let outcome = client.call(&Status).await.unwrap();
    let status = outcome.result().expect("success");
    assert_eq!(status.chain_id, "localnet");
    assert_eq!(status.sync_info.latest_block_height, 42);

    let sent: Value = serde_json::from_str(&seen.lock().unwrap()[0]).unwrap();
    assert_eq!(
        sent,
        json!({ "id": "dontcare", "jsonrpc": "2.0", "method": "status", "params": null })
    );
}

#[tokio::test]
async fn repeated_status_is_identical() {
    let (url, seen) = serve(200, STATUS_OK).await;
    let client = connect(&url).unwrap();

    let first = client.call(&Status).await.unwrap();
    let second = client.call(&Status).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(seen.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn error_body_under_non_2xx_is_classified() {
    let (url, seen) = serve(500, UNKNOWN_TX).await;
    let client = connect(&url).unwrap();

    let outcome = client
        .call(&Tx {
            hash: "H".into(),
            account_id: "A".into(),
        })
        .await
        .unwrap();
    assert!(matches!(outcome, RpcOutcome::Failure(_)));
    assert_eq!(outcome.category(), Some(ErrorCategory::Handler));
    assert_eq!(outcome.cause().unwrap().kind(), CauseKind::UnknownTransaction);

    let sent: Value = serde_json::from_str(&seen.lock().unwrap()[0]).unwrap();
    assert_eq!(sent["params"], json!(["H", "A"]));
}

#[tokio::test]
async fn non_json_2xx_body_is_protocol_error() {
    let (url, _) = serve(200, "<html>maintenance</html>").await;
    let err = connect(&url).unwrap().call(&Health).await.unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Protocol);
}

#[tokio::test]
async fn non_json_error_status_is_transport_error() {
    let (url, _) = serve(502, "bad gateway").await;
    let transport = HttpTransport::default_for(&url).unwrap();

    match transport.send("{}".into()).await {
        Err(TransportError::Status { status, body }) => {
            assert_eq!(status, 502);
            assert_eq!(body, "bad gateway");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn gateway_json_under_error_status_keeps_status() {
    let (url, _) = serve(429, r#"{"message":"rate limited"}"#).await;
    let err = connect(&url).unwrap().call(&Status).await.unwrap_err();

    match err {
        ClientError::Transport(TransportError::Status { status, ref body }) => {
            assert_eq!(status, 429);
            assert!(body.contains("rate limited"));
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn null_health_result_is_success() {
    let (url, _) = serve(200, r#"{"jsonrpc":"2.0","id":"dontcare","result":null}"#).await;
    let outcome = connect(&url).unwrap().call(&Health).await.unwrap();
    assert_eq!(outcome, RpcOutcome::Success(()));
}

#[tokio::test]
async fn connection_refused_is_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let err = connect(&url).unwrap().call(&Status).await.unwrap_err();
    assert!(matches!(err, ClientError::Transport(TransportError::Http(_))));
    assert!(err.is_transport());
}

#[tokio::test]
async fn silent_node_times_out() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    tokio::spawn(async move {
        // Accept and hold the connection without answering.
        let (_stream, _) = listener.accept().await.unwrap();
        tokio::time::sleep(Duration::from_secs(5)).await;
    });

    let config = HttpClientConfig {
        request_timeout: Duration::from_millis(200),
        ..HttpClientConfig::default()
    };
    let err = connect_with(&url, config).unwrap().call(&Status).await.unwrap_err();
    assert!(matches!(
        err,
        ClientError::Transport(TransportError::Timeout { ms: 200 })
    ));
}
