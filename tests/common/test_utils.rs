use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use sentiment_relay::{
    config::OllamaConfig,
    llm::OllamaClient,
    sentiment::SentimentService,
    server::{self, AppState},
};
use serde_json::Value;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tower::ServiceExt; // for `oneshot`

/// Ollama settings pointing at a stub server.
pub fn ollama_config(base_url: &str, timeout_secs: u64) -> OllamaConfig {
    OllamaConfig {
        base_url: base_url.to_string(),
        model: "mistral".to_string(),
        timeout_secs,
    }
}

/// Builds the relay router wired to a real `OllamaClient`.
pub fn create_test_app(ollama: OllamaConfig) -> Router {
    let client = OllamaClient::new(ollama).unwrap();
    server::router(AppState {
        service: Arc::new(SentimentService::new(Arc::new(client))),
    })
}

/// Serves the relay on an ephemeral port and returns its base URL.
pub async fn spawn_relay(ollama: OllamaConfig) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = create_test_app(ollama);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

/// A local URL nothing is listening on.
pub fn unused_local_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}

/// Ollama stand-in that accepts each connection and closes it unanswered.
pub async fn spawn_dropping_server() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        while let Ok((socket, _)) = listener.accept().await {
            drop(socket);
        }
    });

    format!("http://{}", addr)
}

/// Ollama stand-in that answers 200 with a body cut short of its
/// advertised `Content-Length`.
pub async fn spawn_truncated_body_server() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            read_request(&mut socket).await;
            let partial = b"HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: 100\r\n\r\n{\"response\": \"Pos";
            let _ = socket.write_all(partial).await;
            let _ = socket.flush().await;
            drop(socket);
        }
    });

    format!("http://{}", addr)
}

/// Reads one request (head plus `Content-Length` body) so closing the socket
/// does not reset the connection under unread data.
async fn read_request(socket: &mut tokio::net::TcpStream) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    loop {
        let Ok(n) = socket.read(&mut chunk).await else {
            return;
        };
        if n == 0 {
            return;
        }
        buf.extend_from_slice(&chunk[..n]);

        let Some(head_end) = buf.windows(4).position(|w| w == b"\r\n\r\n") else {
            continue;
        };
        let head = String::from_utf8_lossy(&buf[..head_end]).to_ascii_lowercase();
        let content_length = head
            .lines()
            .find_map(|line| line.strip_prefix("content-length:"))
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(0);

        if buf.len() >= head_end + 4 + content_length {
            return;
        }
    }
}

/// Sends a raw form body to `POST /analyze/`.
pub async fn post_form(app: Router, body: String) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/analyze/")
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, json)
}

/// Submits `text` the way the frontend does.
pub async fn analyze(app: Router, text: &str) -> (StatusCode, Value) {
    post_form(app, serde_urlencoded::to_string([("text", text)]).unwrap()).await
}

/// Assertion helper for relay error bodies
pub fn assert_detail(body: &Value, expected: &str) {
    let detail = body["detail"].as_str().unwrap_or_default();
    assert!(
        detail.contains(expected),
        "Expected detail containing '{}', got: {}",
        expected,
        body
    );
}
