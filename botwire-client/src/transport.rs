//! Transport seam between the dispatcher and the network
//!
//! The dispatcher only needs one capability from the network: send a
//! parameter set to a wire path and hand back the raw answer text. Anything
//! that can do that implements [`Transport`]; tests use an in-memory one.
//!
//! # HTTP transport
//!
//! [`HttpTransport`] POSTs the parameters as a JSON body to
//! `<api_url>/bot<token>/<path>`. The platform reports failures inside the
//! envelope and pairs them with 4xx/5xx statuses, so the body is returned for
//! every status code. Only faults that leave no body to parse (connection
//! refused, read timeout, broken stream) become `Error::Transport`.
//!
//! The bot token is part of the URL. It is never logged, and URLs are stripped
//! from reqwest errors before they are surfaced.

use async_trait::async_trait;
use botwire_core::{codec, Error, Parameters, Result};
use reqwest::header::CONTENT_TYPE;
use std::fmt;
use std::time::Duration;

/// Delivers a request and returns the raw answer text
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send `params` to the wire path `path`
    ///
    /// Returns the raw answer body. Implementations must not interpret the
    /// body; envelope handling belongs to the method.
    async fn send(&self, path: &str, params: &Parameters) -> Result<String>;

    /// How long the transport waits for an answer, if bounded
    ///
    /// Used by the dispatcher to warn when a long poll would outlast it.
    fn read_timeout(&self) -> Option<Duration> {
        None
    }
}

/// Error raised while building a transport or client
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// The HTTP client could not be created
    #[error("HTTP client setup failed: {0}")]
    Http(String),

    /// Logging / OpenTelemetry setup failed
    #[error("Failed to initialize observability: {0}")]
    Observability(String),
}

/// Bot API transport over HTTPS
#[derive(Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
    api_url: String,
    token: String,
    timeout: Duration,
}

impl HttpTransport {
    /// Create a transport for `token` against `api_url`
    ///
    /// `timeout` bounds the whole request, so it has to be longer than any
    /// long-poll hold requested through it.
    pub fn new(
        api_url: impl Into<String>,
        token: impl Into<String>,
        timeout: Duration,
    ) -> std::result::Result<Self, BuildError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BuildError::Http(e.to_string()))?;

        Ok(Self {
            http,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
            timeout,
        })
    }

    /// Base URL without the token
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/bot{}/{}", self.api_url, self.token, path)
    }
}

impl fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpTransport")
            .field("api_url", &self.api_url)
            .field("token", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, path: &str, params: &Parameters) -> Result<String> {
        let body = codec::encode_parameters(params)?;

        let response = self
            .http
            .post(self.endpoint(path))
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| Error::Transport(e.without_url().to_string()))?;

        let status = response.status();
        tracing::debug!(path = %path, status = status.as_u16(), "HTTP answer received");

        response
            .text()
            .await
            .map_err(|e| Error::Transport(e.without_url().to_string()))
    }

    fn read_timeout(&self) -> Option<Duration> {
        Some(self.timeout)
    }
}
