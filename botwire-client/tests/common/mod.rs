//! Common test utilities for botwire-client integration tests
//!
//! - [`MockTransport`]: scripted in-memory transport that records every call
//! - [`MockHttpServer`]: local warp server answering every request with one
//!   canned status and body

#![allow(dead_code)]

use async_trait::async_trait;
use botwire_client::Transport;
use botwire_core::{Error, Parameters, Result};
use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use warp::http::StatusCode;
use warp::hyper::body::Bytes;
use warp::path::FullPath;
use warp::Filter;

/// One call seen by the mock transport
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub path: String,
    pub params: Parameters,
}

/// In-memory transport with scripted answers
///
/// Answers are consumed in order; once the script is exhausted, the fallback
/// answer (if any) is returned for every further call. Clones share state.
#[derive(Clone, Default)]
pub struct MockTransport {
    script: Arc<Mutex<VecDeque<Result<String>>>>,
    fallback: Option<String>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    read_timeout: Option<Duration>,
}

impl MockTransport {
    /// Transport that answers every call with `raw`
    pub fn always(raw: impl Into<String>) -> Self {
        Self {
            fallback: Some(raw.into()),
            ..Default::default()
        }
    }

    /// Transport that plays back `answers` in order
    pub fn scripted(answers: Vec<Result<String>>) -> Self {
        Self {
            script: Arc::new(Mutex::new(answers.into())),
            ..Default::default()
        }
    }

    /// Report a bounded read timeout to the dispatcher
    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = Some(timeout);
        self
    }

    /// Every call seen so far
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of calls seen so far
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, path: &str, params: &Parameters) -> Result<String> {
        self.calls.lock().unwrap().push(RecordedCall {
            path: path.to_string(),
            params: params.clone(),
        });

        let next = self.script.lock().unwrap().pop_front();
        match next {
            Some(answer) => answer,
            None => self
                .fallback
                .clone()
                .ok_or_else(|| Error::Transport("mock script exhausted".to_string())),
        }
    }

    fn read_timeout(&self) -> Option<Duration> {
        self.read_timeout
    }
}

/// Request as seen by the mock HTTP server
#[derive(Debug, Clone)]
pub struct ReceivedRequest {
    pub path: String,
    pub content_type: Option<String>,
    pub body: String,
}

/// Local warp server for exercising `HttpTransport`
///
/// Accepts `POST` on any path, records the request and answers with one
/// canned status and JSON body.
pub struct MockHttpServer {
    addr: SocketAddr,
    shutdown_tx: oneshot::Sender<()>,
    request_rx: mpsc::UnboundedReceiver<ReceivedRequest>,
}

impl MockHttpServer {
    /// Start a server answering every request with `status` and `body`
    pub async fn start(status: u16, body: impl Into<String>) -> Self {
        let status = StatusCode::from_u16(status).unwrap();
        let body = body.into();
        let (request_tx, request_rx) = mpsc::unbounded_channel::<ReceivedRequest>();

        let route = warp::post()
            .and(warp::path::full())
            .and(warp::header::optional::<String>("content-type"))
            .and(warp::body::bytes())
            .map(move |path: FullPath, content_type: Option<String>, raw: Bytes| {
                let _ = request_tx.send(ReceivedRequest {
                    path: path.as_str().to_string(),
                    content_type,
                    body: String::from_utf8_lossy(&raw).into_owned(),
                });
                warp::reply::with_status(
                    warp::reply::with_header(body.clone(), "content-type", "application/json"),
                    status,
                )
            });

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let shutdown = async move {
            shutdown_rx.await.ok();
        };
        let (addr, server) = warp::serve(route)
            .bind_with_graceful_shutdown(([127, 0, 0, 1], 0), shutdown);
        tokio::spawn(server);

        Self {
            addr,
            shutdown_tx,
            request_rx,
        }
    }

    /// Base URL to hand to `HttpTransport`
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Wait for the next request, up to five seconds
    pub async fn next_request(&mut self) -> Option<ReceivedRequest> {
        tokio::time::timeout(Duration::from_secs(5), self.request_rx.recv())
            .await
            .ok()
            .flatten()
    }

    /// Stop the server
    pub fn shutdown(self) {
        let _ = self.shutdown_tx.send(());
    }
}

/// Success envelope around `result`
pub fn success_envelope(result: serde_json::Value) -> String {
    serde_json::json!({ "success": true, "result": result }).to_string()
}

/// Failure envelope with code and description
pub fn failure_envelope(code: i32, description: &str) -> String {
    serde_json::json!({
        "success": false,
        "error_code": code,
        "description": description
    })
    .to_string()
}
