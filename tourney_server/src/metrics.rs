//! Prometheus metrics for monitoring the tournament API.
//!
//! Metrics are exposed in Prometheus text format when an exporter address is
//! configured. Without an installed recorder every recording call is a no-op.
//!
//! # Metrics
//!
//! - `http_requests_total{method, path, status}`
//! - `http_request_duration_ms{method, path}`
//! - `documents_created_total{collection}`

use std::net::SocketAddr;
use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Initialize Prometheus metrics exporter.
///
/// Metrics will be available at `http://<addr>/metrics`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), String> {
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| format!("Failed to install Prometheus exporter: {}", e))
}

/// Record HTTP request.
pub fn http_requests_total(method: &str, path: &str, status: u16) {
    metrics::counter!("http_requests_total",
        "method" => method.to_string(),
        "path" => path.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}

/// Record HTTP request duration in milliseconds.
pub fn http_request_duration_ms(method: &str, path: &str, duration_ms: f64) {
    metrics::histogram!("http_request_duration_ms",
        "method" => method.to_string(),
        "path" => path.to_string()
    )
    .record(duration_ms);
}

/// Increment the created-documents counter for a collection.
pub fn documents_created_total(collection: &'static str, count: usize) {
    metrics::counter!("documents_created_total", "collection" => collection)
        .increment(count as u64);
}

/// Middleware recording request count and latency per route.
///
/// Uses the matched route template (`/tournaments/{tournament_id}`) rather
/// than the raw path so identifiers do not explode label cardinality.
pub async fn track_requests(request: Request, next: Next) -> Response {
    let method = request.method().to_string();
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());

    let start = Instant::now();
    let response = next.run(request).await;
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

    http_requests_total(&method, &path, response.status().as_u16());
    http_request_duration_ms(&method, &path, elapsed_ms);

    response
}
