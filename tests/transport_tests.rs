//! reqwest transport against a throwaway local HTTP server.

use std::sync::Arc;
use std::time::Duration;

use superpi::adapter::outbound::http::ReqwestTransport;
use superpi::adapter::outbound::token::MemoryTokenStore;
use superpi::application::client::ApiClient;
use superpi::domain::signal::SignalStatistics;
use superpi::domain::Method;
use superpi::error::ApiError;
use superpi::port::outbound::transport::{HttpRequest, HttpTransport, TransportError};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// Serve one canned reply and hand back the raw request text.
async fn serve_once(status_line: &'static str, body: &'static str) -> (String, oneshot::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut raw = Vec::new();
        let mut buf = [0u8; 4096];
        loop {
            let n = socket.read(&mut buf).await.unwrap();
            raw.extend_from_slice(&buf[..n]);
            if n == 0 || request_complete(&raw) {
                break;
            }
        }
        let reply = format!(
            "HTTP/1.1 {status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(reply.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        let _ = tx.send(String::from_utf8_lossy(&raw).into_owned());
    });

    (format!("http://{addr}"), rx)
}

fn request_complete(raw: &[u8]) -> bool {
    let text = String::from_utf8_lossy(raw);
    let Some(end) = text.find("\r\n\r\n") else {
        return false;
    };
    let length = text[..end]
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            name.eq_ignore_ascii_case("content-length")
                .then(|| value.trim().parse::<usize>().ok())
                .flatten()
        })
        .unwrap_or(0);
    raw.len() >= end + 4 + length
}

#[tokio::test]
async fn sends_method_headers_and_body() {
    let (base, raw) = serve_once("200 OK", r#"{"ok":true}"#).await;
    let transport = ReqwestTransport::new(Duration::from_secs(5));

    let response = transport
        .send(HttpRequest {
            method: Method::Put,
            url: format!("{base}/settings"),
            headers: vec![
                ("Content-Type".into(), "application/json".into()),
                ("Authorization".into(), "Bearer abc123".into()),
            ],
            body: Some(r#"{"smsAlerts":true}"#.into()),
        })
        .await
        .unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(response.status_text, "OK");
    assert_eq!(response.body, r#"{"ok":true}"#);

    let raw = raw.await.unwrap();
    assert!(raw.starts_with("PUT /settings HTTP/1.1"));
    assert!(raw.to_ascii_lowercase().contains("authorization: bearer abc123"));
    assert!(raw.ends_with(r#"{"smsAlerts":true}"#));
}

#[tokio::test]
async fn error_statuses_are_not_transport_errors() {
    let (base, _raw) = serve_once("404 Not Found", r#"{"error":{"message":"Signal not found"}}"#).await;
    let transport = ReqwestTransport::new(Duration::from_secs(5));

    let response = transport
        .send(HttpRequest {
            method: Method::Get,
            url: format!("{base}/signals/missing"),
            headers: Vec::new(),
            body: None,
        })
        .await
        .unwrap();

    assert_eq!(response.status, 404);
    assert_eq!(response.status_text, "Not Found");
}

#[tokio::test]
async fn refused_connection_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let transport = ReqwestTransport::new(Duration::from_secs(2));
    let err = transport
        .send(HttpRequest {
            method: Method::Get,
            url: format!("http://{addr}/signals"),
            headers: Vec::new(),
            body: None,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, TransportError::Connect(_) | TransportError::Other(_)));
}

#[tokio::test]
async fn pipeline_over_real_transport() {
    let body = r#"{"activeSignals":3,"todayProfit":120.5,"winRate":66.7,"avgResponseTime":1.2,"totalTrades":9}"#;
    let (base, raw) = serve_once("200 OK", body).await;

    let client = ApiClient::new(
        &base,
        Arc::new(ReqwestTransport::new(Duration::from_secs(5))),
        Arc::new(MemoryTokenStore::with_token("tok-1")),
    );
    let stats: Result<SignalStatistics, ApiError> = client.get("/signals/statistics").await;

    assert_eq!(stats.unwrap().active_signals, 3);
    let raw = raw.await.unwrap();
    assert!(raw.starts_with("GET /signals/statistics HTTP/1.1"));
    assert!(raw.to_ascii_lowercase().contains("authorization: bearer tok-1"));
}
