//! Client metrics definitions
//!
//! OpenTelemetry instruments recorded by [`BotClient`](crate::BotClient) when
//! observability is enabled through the builder.
//!
//! # Metrics Collected
//!
//! - **botwire.client.requests.total**: method calls by path and outcome (counter)
//! - **botwire.client.request.duration**: round-trip time in seconds (histogram)
//! - **botwire.client.errors.total**: failures by error kind (counter)
//! - **botwire.client.updates.received**: updates returned by long polls (counter)
//!
//! Calls rejected by validation are counted with outcome `rejected` and no
//! duration, since nothing was sent.

use opentelemetry::{
    global,
    metrics::{Counter, Histogram, Meter},
    KeyValue,
};

/// Client metrics for monitoring
pub struct ClientMetrics {
    /// Total number of method calls
    pub requests_total: Counter<u64>,
    /// Round-trip duration in seconds
    pub request_duration: Histogram<f64>,
    /// Total number of failed calls
    pub errors_total: Counter<u64>,
    /// Total number of updates received
    pub updates_received: Counter<u64>,
}

impl ClientMetrics {
    /// Create metrics from the global meter provider
    pub fn new(service_name: impl Into<String>) -> Self {
        let meter = global::meter_with_scope(
            opentelemetry::InstrumentationScope::builder(service_name.into()).build(),
        );
        Self::new_with_meter(&meter)
    }

    /// Create metrics from a specific meter
    pub fn new_with_meter(meter: &Meter) -> Self {
        Self {
            requests_total: meter
                .u64_counter("botwire.client.requests.total")
                .with_description("Total number of bot API method calls")
                .build(),
            request_duration: meter
                .f64_histogram("botwire.client.request.duration")
                .with_description("Bot API round-trip duration in seconds")
                .with_unit("s")
                .build(),
            errors_total: meter
                .u64_counter("botwire.client.errors.total")
                .with_description("Total number of failed method calls, by error kind")
                .build(),
            updates_received: meter
                .u64_counter("botwire.client.updates.received")
                .with_description("Total number of updates received")
                .build(),
        }
    }

    /// Record a call that reached the network
    pub fn record_request(&self, path: &str, outcome: &str, duration_secs: f64) {
        let attributes = &[
            KeyValue::new("path", path.to_string()),
            KeyValue::new("outcome", outcome.to_string()),
        ];
        self.requests_total.add(1, attributes);
        self.request_duration.record(duration_secs, attributes);
    }

    /// Record a call stopped by validation
    pub fn record_rejected(&self, path: &str) {
        let attributes = &[
            KeyValue::new("path", path.to_string()),
            KeyValue::new("outcome", "rejected"),
        ];
        self.requests_total.add(1, attributes);
    }

    /// Record a failure of the given kind
    pub fn record_error(&self, path: &str, kind: &'static str) {
        let attributes = &[
            KeyValue::new("path", path.to_string()),
            KeyValue::new("kind", kind),
        ];
        self.errors_total.add(1, attributes);
    }

    /// Record a batch of received updates
    pub fn record_updates(&self, count: u64) {
        if count > 0 {
            self.updates_received.add(count, &[]);
        }
    }
}
