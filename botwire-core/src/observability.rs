//! Logging and OpenTelemetry setup
//!
//! botwire logs through the `tracing` macros everywhere. This module wires
//! those events to an output:
//!
//! - a `tracing-subscriber` fmt layer on stdout (JSON or human-readable)
//! - optionally, an OpenTelemetry layer exporting spans over OTLP/gRPC
//! - optionally, a global OpenTelemetry meter provider, so that the client's
//!   request metrics are exported too
//!
//! Applications that already install their own subscriber should skip
//! [`init_observability`] entirely; the library only emits events.
//!
//! # Environment Variables
//!
//! - `OTEL_EXPORTER_OTLP_ENDPOINT`: collector endpoint
//! - `RUST_LOG`: log filter directives (takes precedence over the config)
//!
//! ```rust,no_run
//! use botwire_core::ObservabilityConfig;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ObservabilityConfig::new("echo-bot")
//!         .with_endpoint("http://localhost:4317")
//!         .with_log_level("botwire=debug,info");
//!
//!     botwire_core::init_observability(config).expect("Failed to init observability");
//!     // ... poll for updates ...
//!     botwire_core::shutdown_observability();
//! }
//! ```

use opentelemetry::{global, KeyValue};
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::metrics::SdkMeterProvider;
use opentelemetry_sdk::trace::SdkTracerProvider;
use opentelemetry_sdk::Resource;
use std::sync::OnceLock;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Boxed error returned by the setup functions
pub type InitError = Box<dyn std::error::Error + Send + Sync>;

/// How often the meter provider pushes metrics to the collector
const METRICS_EXPORT_INTERVAL: Duration = Duration::from_secs(30);

// Handles kept for shutdown; the globals only hand out tracers and meters
static TRACER_PROVIDER: OnceLock<SdkTracerProvider> = OnceLock::new();
static METER_PROVIDER: OnceLock<SdkMeterProvider> = OnceLock::new();

/// Observability configuration
///
/// # Defaults
///
/// - service name `botwire`, version from Cargo.toml
/// - OTLP endpoint from `OTEL_EXPORTER_OTLP_ENDPOINT`, else `http://localhost:4317`
/// - traces and metrics export disabled (local logging only)
/// - JSON log lines
/// - log level from `RUST_LOG`, else `info`
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    /// Service name attached to every exported span and metric
    pub service_name: String,
    /// Service version attached to every exported span and metric
    pub service_version: String,
    /// OTLP/gRPC collector endpoint
    pub otlp_endpoint: String,
    /// Export spans over OTLP
    pub enable_traces: bool,
    /// Install a global meter provider exporting over OTLP
    pub enable_metrics: bool,
    /// Emit log lines as JSON objects instead of plain text
    pub json_logs: bool,
    /// Filter directives used when `RUST_LOG` is not set
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            service_name: "botwire".to_string(),
            service_version: env!("CARGO_PKG_VERSION").to_string(),
            otlp_endpoint: std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
                .unwrap_or_else(|_| "http://localhost:4317".to_string()),
            enable_traces: false,
            enable_metrics: false,
            json_logs: true,
            log_level: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        }
    }
}

impl ObservabilityConfig {
    /// Create a configuration with a custom service name
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            ..Default::default()
        }
    }

    /// Set the OTLP collector endpoint
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.otlp_endpoint = endpoint.into();
        self
    }

    /// Set the filter directives ("info", "botwire=debug,warn", ...)
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Set the service version
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.service_version = version.into();
        self
    }

    /// Enable or disable span export
    pub fn with_traces(mut self, enable: bool) -> Self {
        self.enable_traces = enable;
        self
    }

    /// Enable or disable metrics export
    pub fn with_metrics(mut self, enable: bool) -> Self {
        self.enable_metrics = enable;
        self
    }

    /// Choose JSON (true) or plain text (false) log lines
    pub fn with_json_logs(mut self, enable: bool) -> Self {
        self.json_logs = enable;
        self
    }

    fn resource(&self) -> Resource {
        Resource::builder_empty()
            .with_attributes(vec![
                KeyValue::new(
                    opentelemetry_semantic_conventions::resource::SERVICE_NAME,
                    self.service_name.clone(),
                ),
                KeyValue::new(
                    opentelemetry_semantic_conventions::resource::SERVICE_VERSION,
                    self.service_version.clone(),
                ),
            ])
            .build()
    }
}

/// Install the global subscriber and, if enabled, the OpenTelemetry providers
///
/// Call once at startup. A second call fails because the global subscriber is
/// already set.
///
/// # Errors
///
/// - invalid filter directives
/// - OTLP exporter construction failure
/// - a global subscriber was already installed
pub fn init_observability(config: ObservabilityConfig) -> Result<(), InitError> {
    let tracer = if config.enable_traces {
        Some(init_tracer(&config)?)
    } else {
        None
    };

    if config.enable_metrics {
        init_metrics(&config)?;
    }

    init_tracing_subscriber(&config, tracer)?;

    tracing::info!(
        service_name = %config.service_name,
        otlp_endpoint = %config.otlp_endpoint,
        traces = config.enable_traces,
        metrics = config.enable_metrics,
        "Observability initialized"
    );

    Ok(())
}

fn init_tracer(
    config: &ObservabilityConfig,
) -> Result<opentelemetry_sdk::trace::Tracer, InitError> {
    use opentelemetry::trace::TracerProvider as _;
    use opentelemetry_sdk::trace::{RandomIdGenerator, Sampler};

    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(config.otlp_endpoint.clone())
        .build()?;

    let provider = SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .with_resource(config.resource())
        .with_sampler(Sampler::AlwaysOn)
        .with_id_generator(RandomIdGenerator::default())
        .build();

    // The subscriber layer needs a tracer before the provider goes global
    let tracer = provider.tracer(config.service_name.clone());
    register_tracer_provider(provider);

    Ok(tracer)
}

fn init_metrics(config: &ObservabilityConfig) -> Result<(), InitError> {
    use opentelemetry_sdk::metrics::PeriodicReader;

    let exporter = opentelemetry_otlp::MetricExporter::builder()
        .with_tonic()
        .with_endpoint(config.otlp_endpoint.clone())
        .build()?;

    let reader = PeriodicReader::builder(exporter)
        .with_interval(METRICS_EXPORT_INTERVAL)
        .build();

    let provider = SdkMeterProvider::builder()
        .with_reader(reader)
        .with_resource(config.resource())
        .build();

    register_meter_provider(provider);
    Ok(())
}

fn register_tracer_provider(provider: SdkTracerProvider) {
    let _ = TRACER_PROVIDER.set(provider.clone());
    global::set_tracer_provider(provider);
}

fn register_meter_provider(provider: SdkMeterProvider) {
    let _ = METER_PROVIDER.set(provider.clone());
    global::set_meter_provider(provider);
}

fn init_tracing_subscriber(
    config: &ObservabilityConfig,
    tracer: Option<opentelemetry_sdk::trace::Tracer>,
) -> Result<(), InitError> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&config.log_level))?;

    let telemetry_layer = tracer.map(|t| tracing_opentelemetry::layer().with_tracer(t));

    let (json_layer, text_layer) = if config.json_logs {
        let layer = tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_thread_ids(true)
            .with_line_number(true)
            .json();
        (Some(layer), None)
    } else {
        let layer = tracing_subscriber::fmt::layer().with_target(true);
        (None, Some(layer))
    };

    tracing_subscriber::registry()
        .with(telemetry_layer)
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .try_init()?;

    Ok(())
}

/// Flush and stop the OpenTelemetry providers installed by
/// [`init_observability`]
///
/// Pending spans and metrics are exported before this returns. Logging keeps
/// working afterwards. Without exporters configured this only logs.
pub fn shutdown_observability() {
    tracing::info!("Shutting down observability");

    if let Some(provider) = TRACER_PROVIDER.get() {
        if let Err(e) = provider.shutdown() {
            tracing::warn!(error = %e, "Tracer provider shutdown failed");
        }
    }
    if let Some(provider) = METER_PROVIDER.get() {
        if let Err(e) = provider.shutdown() {
            tracing::warn!(error = %e, "Meter provider shutdown failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ObservabilityConfig::default();
        assert_eq!(config.service_name, "botwire");
        assert_eq!(config.service_version, env!("CARGO_PKG_VERSION"));
        assert!(!config.enable_traces);
        assert!(!config.enable_metrics);
        assert!(config.json_logs);
    }

    #[test]
    fn test_builder_chaining() {
        let config = ObservabilityConfig::new("poller")
            .with_endpoint("http://collector:4317")
            .with_log_level("debug")
            .with_version("1.2.3")
            .with_traces(true)
            .with_metrics(true)
            .with_json_logs(false);

        assert_eq!(config.service_name, "poller");
        assert_eq!(config.otlp_endpoint, "http://collector:4317");
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.service_version, "1.2.3");
        assert!(config.enable_traces);
        assert!(config.enable_metrics);
        assert!(!config.json_logs);
    }

    #[test]
    fn test_init_local_logging_only() {
        // No exporters: only the fmt layer is installed
        let config = ObservabilityConfig::new("test-local")
            .with_traces(false)
            .with_metrics(false)
            .with_log_level("warn");

        assert!(init_observability(config.clone()).is_ok());
        // The global subscriber can only be installed once per process
        assert!(init_observability(config).is_err());
    }

    #[test]
    fn test_shutdown_stops_registered_providers() {
        let tracer_provider = SdkTracerProvider::builder().build();
        let meter_provider = SdkMeterProvider::builder().build();
        register_tracer_provider(tracer_provider.clone());
        register_meter_provider(meter_provider.clone());

        shutdown_observability();

        // Both handles were already shut down by the call above
        assert!(tracer_provider.shutdown().is_err());
        assert!(meter_provider.shutdown().is_err());
    }

    #[test]
    fn test_shutdown_is_repeatable() {
        shutdown_observability();
        shutdown_observability();
    }
}
