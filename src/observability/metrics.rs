//! Metrics collection and exposition.
//!
//! # Metrics
//! - `relay_requests_total` (counter): inbound requests by operation, status
//! - `relay_request_duration_seconds` (histogram): inbound latency by operation
//! - `relay_upstream_requests_total` (counter): upstream calls by operation, outcome
//! - `relay_upstream_duration_seconds` (histogram): upstream latency by operation
//!
//! Without an installed recorder every macro is a no-op.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its scrape listener.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record one handled inbound request.
pub fn record_request(operation: &'static str, status: u16, start: Instant) {
    metrics::counter!(
        "relay_requests_total",
        "operation" => operation,
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!("relay_request_duration_seconds", "operation" => operation)
        .record(start.elapsed().as_secs_f64());
}

/// Record one upstream round trip and how it ended.
pub fn record_upstream(operation: &'static str, outcome: &'static str, start: Instant) {
    metrics::counter!(
        "relay_upstream_requests_total",
        "operation" => operation,
        "outcome" => outcome
    )
    .increment(1);
    metrics::histogram!("relay_upstream_duration_seconds", "operation" => operation)
        .record(start.elapsed().as_secs_f64());
}
