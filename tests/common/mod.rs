//! Shared helpers for integration tests
//!
//! `StubUpstream` is a loopback stand-in for the generative endpoint: it
//! answers every request with one canned response and records what it saw.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use poi_discovery::{ClientError, DiscoveryConfig, GeminiClient, GenerativeClient};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

pub const TEST_API_KEY: &str = "test-key-do-not-log";

pub struct StubUpstream {
    addr: SocketAddr,
    hits: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl StubUpstream {
    /// Serve `status_line` (e.g. "200 OK") with `body` to every connection
    pub async fn start(status_line: &'static str, body: impl Into<String>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let hits = Arc::new(AtomicUsize::new(0));
        let requests = Arc::new(Mutex::new(Vec::new()));
        let body = body.into();

        let task_hits = hits.clone();
        let task_requests = requests.clone();
        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                task_hits.fetch_add(1, Ordering::SeqCst);
                let request = read_request(&mut socket).await;
                task_requests.lock().unwrap().push(request);

                let response = format!(
                    "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status_line,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        Self {
            addr,
            hits,
            requests,
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}/v1beta/models", self.addr)
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    /// Config pointing at this stub with a test key
    pub fn config(&self) -> DiscoveryConfig {
        DiscoveryConfig::default()
            .with_base_url(self.base_url())
            .with_api_key(TEST_API_KEY)
    }

    /// Config pointing at this stub without a key
    pub fn keyless_config(&self) -> DiscoveryConfig {
        DiscoveryConfig::default().with_base_url(self.base_url())
    }
}

/// Gemini client that talks to loopback directly, ignoring proxy env vars
pub fn loopback_client(config: &DiscoveryConfig) -> GeminiClient {
    let http = reqwest::Client::builder().no_proxy().build().unwrap();
    GeminiClient::with_http_client(config, http)
}

/// Read headers and a Content-Length body
async fn read_request(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    loop {
        let n = match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => n,
        };
        buf.extend_from_slice(&chunk[..n]);

        if let Some(header_end) = find_header_end(&buf) {
            let headers = String::from_utf8_lossy(&buf[..header_end]).to_lowercase();
            let content_length = headers
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= header_end + 4 + content_length {
                break;
            }
        }
    }

    String::from_utf8_lossy(&buf).to_string()
}

fn find_header_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}

/// A 2xx `generateContent` body whose first candidate carries `text`
pub fn gemini_body(text: &str) -> String {
    serde_json::json!({
        "candidates": [
            {
                "content": {"parts": [{"text": text}], "role": "model"},
                "finishReason": "STOP"
            }
        ]
    })
    .to_string()
}

/// One place record as the model would emit it
pub fn place_json(id: &str, name: &str, distance: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "name": name,
        "elevation": "2,400 m",
        "coordinates": {"lat": 30.73, "lng": 79.06},
        "description": "A well-known spot on the valley trail.",
        "risk": "Medium",
        "status": "Caution",
        "distanceFromUser": distance
    })
}

/// Client that returns a fixed result without touching the network
pub struct FixedClient {
    pub reply: Result<String, fn() -> ClientError>,
    pub calls: AtomicUsize,
}

impl FixedClient {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            reply: Ok(text.into()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(error: fn() -> ClientError) -> Self {
        Self {
            reply: Err(error),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl GenerativeClient for FixedClient {
    async fn generate(&self, _prompt: &str) -> Result<String, ClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err(make) => Err(make()),
        }
    }

    fn model_name(&self) -> &str {
        "fixed"
    }
}
