//! Client builder for configuring the transport and observability
//!
//! The `ClientBuilder` provides a fluent API for configuring a [`BotClient`]
//! before use. It allows you to:
//! - Point the client at a different API server
//! - Size the request timeout for long polling
//! - Swap in a custom transport
//! - Configure observability (logging, OpenTelemetry metrics)
//!
//! # Examples
//!
//! ```rust,no_run
//! use botwire_client::ClientBuilder;
//! use std::time::Duration;
//!
//! # fn example() -> Result<(), botwire_client::BuildError> {
//! let client = ClientBuilder::new("123456:ABC-DEF")
//!     .request_timeout(Duration::from_secs(90))
//!     .with_default_observability()
//!     .service_name("echo-bot")
//!     .build()?;
//! # Ok(())
//! # }
//! ```

use crate::transport::{BuildError, HttpTransport, Transport};
use crate::{BotClient, ClientMetrics};
use botwire_core::ObservabilityConfig;
use std::sync::Arc;
use std::time::Duration;

/// Production API server, used when `BOTWIRE_API_URL` is not set
pub const DEFAULT_API_URL: &str = "https://api.telegram.org";

/// Default request timeout; longer than the platform's maximum 50 s long poll
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(75);

/// Builder for configuring and creating a BotClient
pub struct ClientBuilder {
    token: String,
    api_url: String,
    request_timeout: Duration,
    transport: Option<Arc<dyn Transport>>,
    observability_config: Option<ObservabilityConfig>,
    service_name: Option<String>,
}

impl ClientBuilder {
    /// Create a new builder for the bot identified by `token`
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            api_url: std::env::var("BOTWIRE_API_URL")
                .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            transport: None,
            observability_config: None,
            service_name: None,
        }
    }

    /// Use a different API server
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    /// Bound each HTTP request; must exceed any long-poll hold
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Use a custom transport instead of HTTP
    ///
    /// The token, API URL and request timeout are ignored in that case.
    pub fn with_transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    /// Enable observability with custom configuration
    pub fn with_observability(mut self, config: ObservabilityConfig) -> Self {
        self.observability_config = Some(config);
        self
    }

    /// Enable observability with default configuration
    pub fn with_default_observability(mut self) -> Self {
        self.observability_config = Some(ObservabilityConfig::default());
        self
    }

    /// Set service name for observability (used if observability is enabled)
    pub fn service_name(mut self, name: impl Into<String>) -> Self {
        self.service_name = Some(name.into());
        self
    }

    /// Build the client
    ///
    /// Installs the global tracing subscriber when observability is
    /// configured, so call this at most once per process in that case.
    pub fn build(self) -> Result<BotClient, BuildError> {
        let metrics = if let Some(mut config) = self.observability_config {
            if let Some(name) = self.service_name {
                config.service_name = name;
            }

            botwire_core::init_observability(config.clone())
                .map_err(|e| BuildError::Observability(e.to_string()))?;

            Some(Arc::new(ClientMetrics::new(config.service_name.clone())))
        } else {
            None
        };

        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => {
                tracing::info!(api_url = %self.api_url, "Creating HTTP transport");
                Arc::new(HttpTransport::new(
                    self.api_url,
                    self.token,
                    self.request_timeout,
                )?)
            }
        };

        Ok(BotClient { transport, metrics })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use botwire_core::{Parameters, Result};

    struct NullTransport;

    #[async_trait]
    impl Transport for NullTransport {
        async fn send(&self, _path: &str, _params: &Parameters) -> Result<String> {
            Ok(r#"{"success":true,"result":true}"#.to_string())
        }
    }

    #[test]
    fn test_builder_defaults() {
        let builder = ClientBuilder::new("123:abc");

        assert_eq!(builder.token, "123:abc");
        assert_eq!(builder.request_timeout, DEFAULT_REQUEST_TIMEOUT);
        assert!(builder.transport.is_none());
        assert!(builder.observability_config.is_none());
        assert!(builder.service_name.is_none());
    }

    #[test]
    fn test_builder_chaining() {
        let builder = ClientBuilder::new("123:abc")
            .api_url("http://localhost:8081")
            .request_timeout(Duration::from_secs(5))
            .service_name("test-service")
            .with_default_observability();

        assert_eq!(builder.api_url, "http://localhost:8081");
        assert_eq!(builder.request_timeout, Duration::from_secs(5));
        assert_eq!(builder.service_name, Some("test-service".to_string()));
        assert!(builder.observability_config.is_some());
    }

    #[test]
    fn test_builder_observability_config() {
        let config = ObservabilityConfig::new("test-client").with_log_level("debug");
        let builder = ClientBuilder::new("t").with_observability(config);

        let obs_config = builder.observability_config.unwrap();
        assert_eq!(obs_config.service_name, "test-client");
        assert_eq!(obs_config.log_level, "debug");
    }

    #[test]
    fn test_build_http_client() {
        let client = ClientBuilder::new("123:abc")
            .api_url("http://localhost:8081")
            .request_timeout(Duration::from_secs(40))
            .build()
            .unwrap();

        assert_eq!(
            client.transport.read_timeout(),
            Some(Duration::from_secs(40))
        );
        assert!(client.metrics.is_none());
    }

    #[test]
    fn test_build_with_custom_transport() {
        let client = ClientBuilder::new("ignored")
            .with_transport(NullTransport)
            .build()
            .unwrap();

        assert_eq!(client.transport.read_timeout(), None);
    }
}
