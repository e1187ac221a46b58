//! HTTP transport integration tests
//!
//! These exercise a real server over a real socket with a bare-bones
//! HTTP/1.1 client, so the transport rules (always 200 on the endpoint,
//! errors inside the body, 404 off the endpoint) are verified end to end.

use jroh_server::{methods, JrohServer};
use serde_json::{json, Value};
use std::net::SocketAddr;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

async fn start_server() -> SocketAddr {
    let server = JrohServer::builder()
        .bind_str("127.0.0.1:0")
        .unwrap()
        .handler("time", methods::time())
        .build()
        .await
        .unwrap();
    let addr = server.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = server.run().await;
    });
    addr
}

/// Send one request and return (status code, body).
async fn roundtrip(addr: SocketAddr, method: &str, path: &str, body: &str) -> (u16, String) {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    let request = format!(
        "{method} {path} HTTP/1.1\r\nHost: {addr}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    stream.write_all(request.as_bytes()).await.unwrap();

    let mut raw = Vec::new();
    stream.read_to_end(&mut raw).await.unwrap();
    let text = String::from_utf8(raw).unwrap();

    let status: u16 = text
        .split_whitespace()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .expect("status line");
    let payload = text
        .split_once("\r\n\r\n")
        .map(|(_, b)| b.to_string())
        .unwrap_or_default();
    (status, payload)
}

async fn post(addr: SocketAddr, body: &str) -> (u16, Value) {
    let (status, payload) = roundtrip(addr, "POST", "/api", body).await;
    let value = serde_json::from_str(&payload).expect("endpoint replies are JSON");
    (status, value)
}

#[tokio::test]
async fn test_successful_call_is_http_200() {
    let addr = start_server().await;
    let (status, value) = post(addr, r#"{"id":1,"method":"time","params":{}}"#).await;

    assert_eq!(status, 200);
    assert_eq!(value["id"], json!(1));
    assert!(value["result"].is_u64());
}

#[tokio::test]
async fn test_protocol_errors_are_still_http_200() {
    let addr = start_server().await;

    let (status, value) = post(addr, r#"{"id":1,"method":"nope","params":{}}"#).await;
    assert_eq!(status, 200);
    assert_eq!(value["error"]["code"], json!(-32601));

    let (status, value) = post(addr, "{malformed").await;
    assert_eq!(status, 200);
    assert_eq!(value["error"]["code"], json!(-32700));
}

#[tokio::test]
async fn test_empty_body_reports_empty_request() {
    let addr = start_server().await;
    let (status, value) = post(addr, "").await;

    assert_eq!(status, 200);
    assert_eq!(value["error"]["code"], json!(-32600));
    assert_eq!(value["error"]["data"], json!("Empty Request"));
    assert_eq!(value["id"], Value::Null);
}

#[tokio::test]
async fn test_non_post_is_invalid_request_envelope() {
    let addr = start_server().await;
    let (status, payload) = roundtrip(addr, "GET", "/api", "").await;

    assert_eq!(status, 200);
    let value: Value = serde_json::from_str(&payload).unwrap();
    assert_eq!(value["error"]["code"], json!(-32600));
}

#[tokio::test]
async fn test_unknown_path_is_404() {
    let addr = start_server().await;
    let (status, _) = roundtrip(addr, "POST", "/elsewhere", "{}").await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn test_batch_over_http_preserves_order() {
    let addr = start_server().await;
    let (status, value) = post(
        addr,
        r#"[{"id":1,"method":"time","params":{}},{"id":2,"method":"nope","params":{}}]"#,
    )
    .await;

    assert_eq!(status, 200);
    let responses = value.as_array().unwrap();
    assert_eq!(responses.len(), 2);
    assert!(responses[0].get("result").is_some());
    assert_eq!(responses[1]["error"]["code"], json!(-32601));
}

#[tokio::test]
async fn test_bad_request_does_not_poison_the_next_one() {
    let addr = start_server().await;

    let (_, value) = post(addr, "{malformed").await;
    assert_eq!(value["error"]["code"], json!(-32700));

    let (status, value) = post(addr, r#"{"id":2,"method":"time","params":{}}"#).await;
    assert_eq!(status, 200);
    assert!(value["result"].is_u64());
}
