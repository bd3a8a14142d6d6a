//! Metrics collection and exposition.
//!
//! # Metrics
//! - `custodian_provision_total` (counter): provisioning calls by
//!   status (created / existing)
//! - `custodian_transactions_signed_total` (counter): signed
//!   transactions by kind
//! - `custodian_errors_total` (counter): failures by error kind
//!
//! The recorder is optional: when `init_metrics` has not run, the
//! macros fall through to a no-op, so core code records
//! unconditionally.

use std::net::SocketAddr;

use metrics::counter;
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and exposition listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Count a provisioning call by outcome ("created" / "existing").
pub fn record_provision(status: &'static str) {
    counter!("custodian_provision_total", "status" => status).increment(1);
}

/// Count a signed transaction by kind tag.
pub fn record_signed(kind: &'static str) {
    counter!("custodian_transactions_signed_total", "kind" => kind).increment(1);
}

/// Count a failed operation by error kind.
pub fn record_error(kind: &'static str) {
    counter!("custodian_errors_total", "kind" => kind).increment(1);
}
