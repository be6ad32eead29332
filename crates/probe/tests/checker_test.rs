//! End-to-end checker tests against local fixture servers.

use probe::{EndpointChecker, EndpointSpec, HttpChecker, ProbeFailure, ProbeResult};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::time::sleep;

/// Spawn a one-shot HTTP server answering every request with
/// `status_line` after `delay`.
async fn spawn_fixture(status_line: &'static str, delay: Duration) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        while let Ok((mut stream, _)) = listener.accept().await {
            tokio::spawn(async move {
                let mut buf = [0u8; 1024];
                let _ = stream.read(&mut buf).await;

                if !delay.is_zero() {
                    sleep(delay).await;
                }

                let response = format!(
                    "HTTP/1.1 {}\r\ncontent-length: 0\r\nconnection: close\r\n\r\n",
                    status_line
                );
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            });
        }
    });

    addr
}

#[tokio::test]
async fn test_fast_2xx_is_up() {
    let addr = spawn_fixture("200 OK", Duration::ZERO).await;
    let checker = HttpChecker::new().unwrap();

    let result = checker
        .check(&EndpointSpec::get(format!("http://{}/health", addr)))
        .await;

    assert!(result.is_up());
    assert!(matches!(result, ProbeResult::Response { status: 200, .. }));
}

#[tokio::test]
async fn test_server_error_is_down() {
    let addr = spawn_fixture("500 Internal Server Error", Duration::ZERO).await;
    let checker = HttpChecker::new().unwrap();

    let result = checker
        .check(&EndpointSpec::get(format!("http://{}/health", addr)))
        .await;

    assert!(!result.is_up());
    assert!(matches!(result, ProbeResult::Response { status: 500, .. }));
}

#[tokio::test]
async fn test_slow_2xx_is_down() {
    // Responds with 200 but well past the 500ms latency limit.
    let addr = spawn_fixture("200 OK", Duration::from_millis(700)).await;
    let checker = HttpChecker::new().unwrap();

    let result = checker
        .check(&EndpointSpec::get(format!("http://{}/health", addr)))
        .await;

    assert!(!result.is_up());
    match result {
        ProbeResult::Response { status, latency } => {
            assert_eq!(status, 200);
            assert!(latency >= Duration::from_millis(500));
        }
        other => panic!("expected a response, got {:?}", other),
    }
}

#[tokio::test]
async fn test_connection_refused_is_down() {
    // Bind to grab a free port, then drop the listener so nothing is
    // listening when the probe connects.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let checker = HttpChecker::new().unwrap();
    let result = checker
        .check(&EndpointSpec::get(format!("http://{}/health", addr)))
        .await;

    assert!(!result.is_up());
    assert!(matches!(
        result,
        ProbeResult::Failed {
            reason: ProbeFailure::Transport(_),
            ..
        }
    ));
}

#[tokio::test]
async fn test_post_with_body_reaches_server() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let mut buf = vec![0u8; 4096];
        let mut data = Vec::new();
        // Headers and body may arrive in separate reads.
        loop {
            let n = stream.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            data.extend_from_slice(&buf[..n]);
            if String::from_utf8_lossy(&data).contains(r#"{"ping":true}"#) {
                break;
            }
        }
        let request = String::from_utf8_lossy(&data).to_string();
        stream
            .write_all(b"HTTP/1.1 200 OK\r\ncontent-length: 0\r\nconnection: close\r\n\r\n")
            .await
            .unwrap();
        let _ = stream.shutdown().await;
        request
    });

    let mut endpoint = EndpointSpec::get(format!("http://{}/submit", addr));
    endpoint.method = "POST".to_string();
    endpoint
        .headers
        .insert("x-fixture".to_string(), "1".to_string());
    endpoint.body = Some(serde_json::json!({"ping": true}));

    let checker = HttpChecker::new().unwrap();
    let result = checker.check(&endpoint).await;
    assert!(result.is_up());

    let request = server.await.unwrap();
    assert!(request.starts_with("POST /submit"));
    assert!(request.contains("x-fixture: 1"));
    assert!(request.contains(r#"{"ping":true}"#));
}
