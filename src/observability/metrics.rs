//! Metrics collection and exposition.
//!
//! # Metrics
//! - `tipjar_operations_total` (counter): orchestrator operations by name and outcome
//! - `tipjar_contract_balance_wei` (gauge): last observed contract balance
//!
//! Without an installed recorder every call here is a no-op.

use std::net::SocketAddr;

use alloy::primitives::U256;
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its HTTP scrape listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Count one finished orchestrator operation.
pub fn record_operation(operation: &'static str, outcome: &'static str) {
    metrics::counter!("tipjar_operations_total", "operation" => operation, "outcome" => outcome)
        .increment(1);
}

/// Record the contract balance. Values beyond f64 precision are approximated.
pub fn record_contract_balance(wei: U256) {
    let value: f64 = wei.to_string().parse().unwrap_or(f64::MAX);
    metrics::gauge!("tipjar_contract_balance_wei").set(value);
}
