//! Prometheus metrics for observability.
//!
//! This module provides metrics for monitoring the concierge server:
//! - HTTP request metrics (latency, counts, errors)
//! - Gate rejection metrics
//! - Status stream metrics (active streams, snapshots emitted)
//! - Onboarding counters

use once_cell::sync::Lazy;
use prometheus::{
    self, Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, IntGauge, Opts,
    Registry, TextEncoder,
};

/// Global metrics registry.
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    register_metrics(&registry);
    registry
});

// =============================================================================
// HTTP Request Metrics
// =============================================================================

/// HTTP request duration in seconds.
pub static HTTP_REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "concierge_http_request_duration_seconds",
            "HTTP request duration in seconds",
        )
        .buckets(vec![
            0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
        ]),
        &["method", "path", "status"],
    )
    .unwrap()
});

/// HTTP requests total count.
pub static HTTP_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("concierge_http_requests_total", "Total HTTP requests"),
        &["method", "path", "status"],
    )
    .unwrap()
});

/// HTTP requests currently in flight.
pub static HTTP_REQUESTS_IN_FLIGHT: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "concierge_http_requests_in_flight",
        "Number of HTTP requests currently being processed",
    )
    .unwrap()
});

/// Gate rejections by endpoint.
pub static GATE_REJECTIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "concierge_gate_rejections_total",
            "Total form-key gate rejections",
        ),
        &["endpoint"],
    )
    .unwrap()
});

// =============================================================================
// Status Stream Metrics
// =============================================================================

/// Active status streams.
pub static STATUS_STREAMS_ACTIVE: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "concierge_status_streams_active",
        "Number of open status streams",
    )
    .unwrap()
});

/// Total status streams opened (cumulative).
pub static STATUS_STREAMS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "concierge_status_streams_total",
        "Total status streams opened since startup",
    )
    .unwrap()
});

/// Status snapshots emitted.
pub static STATUS_SNAPSHOTS_SENT: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "concierge_status_snapshots_sent_total",
        "Status snapshots sent over all streams",
    )
    .unwrap()
});

// =============================================================================
// Onboarding Metrics
// =============================================================================

/// Customers onboarded by entry path.
pub static CUSTOMERS_ONBOARDED_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "concierge_customers_onboarded_total",
            "Customer records created, by entry path",
        ),
        &["path"],
    )
    .unwrap()
});

/// Duplicate-name conflicts rejected.
pub static DUPLICATE_NAMES_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "concierge_duplicate_names_total",
        "Onboarding attempts rejected for an already-taken name",
    )
    .unwrap()
});

// =============================================================================
// Registration
// =============================================================================

fn register_metrics(registry: &Registry) {
    // HTTP
    registry
        .register(Box::new(HTTP_REQUEST_DURATION.clone()))
        .unwrap();
    registry
        .register(Box::new(HTTP_REQUESTS_TOTAL.clone()))
        .unwrap();
    registry
        .register(Box::new(HTTP_REQUESTS_IN_FLIGHT.clone()))
        .unwrap();
    registry
        .register(Box::new(GATE_REJECTIONS_TOTAL.clone()))
        .unwrap();

    // Streams
    registry
        .register(Box::new(STATUS_STREAMS_ACTIVE.clone()))
        .unwrap();
    registry
        .register(Box::new(STATUS_STREAMS_TOTAL.clone()))
        .unwrap();
    registry
        .register(Box::new(STATUS_SNAPSHOTS_SENT.clone()))
        .unwrap();

    // Onboarding
    registry
        .register(Box::new(CUSTOMERS_ONBOARDED_TOTAL.clone()))
        .unwrap();
    registry
        .register(Box::new(DUPLICATE_NAMES_TOTAL.clone()))
        .unwrap();
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer).unwrap();
    String::from_utf8(buffer).unwrap()
}

/// Normalize a path for metric labels (replace customer names with placeholders).
pub fn normalize_path(path: &str) -> String {
    // Customer names are free-form, so any /deployment/* tail is collapsed
    let deployment_regex = regex_lite::Regex::new(r"^/deployment/.+$").unwrap();
    let numeric_regex = regex_lite::Regex::new(r"/\d+(/|$)").unwrap();

    let result = deployment_regex.replace(path, "/deployment/{name}");
    let result = numeric_regex.replace_all(&result, "/{id}$1");
    result.to_string()
}
