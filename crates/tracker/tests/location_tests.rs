//! Integration tests for [`OpenNotifyClient`] against a local HTTP stub.
//!
//! Each test binds a one-shot `TcpListener` on localhost that answers a
//! single request with a canned response, so no external service is
//! contacted.

use std::time::Duration;

use assert_matches::assert_matches;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use iss_tracker::config::LocationConfig;
use iss_tracker::location::{LocationError, LocationSource, OpenNotifyClient};

/// Serve exactly one HTTP response and return the URL to request.
async fn serve_once(status_line: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();

        // Drain the request head before answering.
        let mut buf = vec![0u8; 4096];
        let mut read = 0;
        loop {
            let n = socket.read(&mut buf[read..]).await.unwrap();
            read += n;
            if n == 0 || buf[..read].windows(4).any(|w| w == b"\r\n\r\n") {
                break;
            }
        }

        let response = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
    });

    format!("http://{addr}/iss-now.json")
}

/// Client that bypasses any proxy configured in the test environment.
fn client_for(url: String) -> OpenNotifyClient {
    let http = reqwest::Client::builder()
        .no_proxy()
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap();
    OpenNotifyClient::with_client(http, url)
}

#[test]
fn new_uses_configured_url() {
    let client = OpenNotifyClient::new(&LocationConfig {
        api_url: "http://127.0.0.1:1/iss-now.json".into(),
        request_timeout: Duration::from_secs(1),
    })
    .unwrap();
    assert_eq!(client.api_url(), "http://127.0.0.1:1/iss-now.json");
}

#[tokio::test]
async fn fetches_and_parses_position() {
    let url = serve_once(
        "200 OK",
        r#"{"message": "success", "timestamp": 1700000000, "iss_position": {"latitude": "42.0000", "longitude": "-74.0000"}}"#,
    )
    .await;

    let position = client_for(url).current_position().await.unwrap();

    assert_eq!(position.latitude, 42.0);
    assert_eq!(position.longitude, -74.0);
    assert_eq!(
        position.reported_at.map(|t| t.timestamp()),
        Some(1_700_000_000)
    );
}

#[tokio::test]
async fn server_error_is_http_status() {
    let url = serve_once("503 Service Unavailable", r#"{"message": "down"}"#).await;

    let result = client_for(url).current_position().await;

    assert_matches!(result, Err(LocationError::HttpStatus(503)));
}

#[tokio::test]
async fn malformed_body_is_request_error() {
    let url = serve_once("200 OK", r#"{"unexpected": true}"#).await;

    let result = client_for(url).current_position().await;

    assert_matches!(result, Err(LocationError::Request(e)) if e.is_decode());
}

#[tokio::test]
async fn bad_coordinate_string_is_coordinate_error() {
    let url = serve_once(
        "200 OK",
        r#"{"message": "success", "iss_position": {"latitude": "12.5", "longitude": "east"}}"#,
    )
    .await;

    let result = client_for(url).current_position().await;

    assert_matches!(
        result,
        Err(LocationError::Coordinate { field: "longitude", value }) if value == "east"
    );
}

#[tokio::test]
async fn unreachable_host_is_request_error() {
    // Bind then drop to obtain a port with nothing listening.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let result = client_for(format!("http://{addr}/iss-now.json"))
        .current_position()
        .await;

    assert_matches!(result, Err(LocationError::Request(_)));
}
