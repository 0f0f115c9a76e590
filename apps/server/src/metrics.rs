//! Metrics collection for the metadata server
//!
//! This module defines and manages Prometheus metrics for monitoring the server.

use lazy_static::lazy_static;
use prometheus::{
    register_histogram, register_histogram_vec, register_int_counter_vec, register_int_gauge,
    register_int_gauge_vec, Histogram, HistogramVec, IntCounterVec, IntGauge, IntGaugeVec,
};

lazy_static! {
    // HTTP Request Metrics

    /// Total HTTP requests by method, path, and status
    pub static ref HTTP_REQUESTS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "metadata_http_requests_total",
        "Total number of HTTP requests",
        &["method", "path", "status"]
    )
    .expect("Failed to register HTTP_REQUESTS_TOTAL");

    /// HTTP request duration in seconds
    pub static ref HTTP_REQUEST_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "metadata_http_request_duration_seconds",
        "HTTP request duration in seconds",
        &["method", "path"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]
    )
    .expect("Failed to register HTTP_REQUEST_DURATION_SECONDS");

    /// In-flight HTTP requests
    pub static ref HTTP_REQUESTS_IN_FLIGHT: IntGaugeVec = register_int_gauge_vec!(
        "metadata_http_requests_in_flight",
        "Number of HTTP requests currently being processed",
        &["method", "path"]
    )
    .expect("Failed to register HTTP_REQUESTS_IN_FLIGHT");

    /// HTTP request body size in bytes
    pub static ref HTTP_REQUEST_SIZE_BYTES: HistogramVec = register_histogram_vec!(
        "metadata_http_request_size_bytes",
        "HTTP request body size in bytes",
        &["method", "path"],
        vec![100.0, 1_000.0, 10_000.0, 100_000.0, 1_000_000.0]
    )
    .expect("Failed to register HTTP_REQUEST_SIZE_BYTES");

    // Record Metrics

    /// Record API operations by operation and outcome class
    pub static ref RECORD_OPERATIONS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "metadata_record_operations_total",
        "Total number of record operations",
        &["operation", "status"]
    )
    .expect("Failed to register RECORD_OPERATIONS_TOTAL");

    // Search Metrics

    /// Searches by outcome (success, invalid, error)
    pub static ref SEARCH_TOTAL: IntCounterVec = register_int_counter_vec!(
        "metadata_search_total",
        "Total number of searches",
        &["outcome"]
    )
    .expect("Failed to register SEARCH_TOTAL");

    /// Search duration including validation and storage
    pub static ref SEARCH_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "metadata_search_duration_seconds",
        "Search duration in seconds",
        &["outcome"],
        vec![0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0]
    )
    .expect("Failed to register SEARCH_DURATION_SECONDS");

    /// Records returned per successful search
    pub static ref SEARCH_RESULTS: Histogram = register_histogram!(
        "metadata_search_results",
        "Number of records returned by a search",
        vec![0.0, 1.0, 10.0, 50.0, 100.0, 500.0, 1000.0]
    )
    .expect("Failed to register SEARCH_RESULTS");

    /// Searchable fields currently registered
    pub static ref SEARCH_FIELDS_REGISTERED: IntGauge = register_int_gauge!(
        "metadata_search_fields_registered",
        "Number of searchable fields in the registry"
    )
    .expect("Failed to register SEARCH_FIELDS_REGISTERED");

    // Storage Metrics

    /// Store operation duration
    pub static ref STORE_OPERATION_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "metadata_store_operation_duration_seconds",
        "Record store operation duration in seconds",
        &["backend", "operation"],
        vec![0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0]
    )
    .expect("Failed to register STORE_OPERATION_DURATION_SECONDS");
}

pub fn record_search(outcome: &str, duration_seconds: f64, returned: Option<usize>) {
    SEARCH_TOTAL.with_label_values(&[outcome]).inc();
    SEARCH_DURATION_SECONDS
        .with_label_values(&[outcome])
        .observe(duration_seconds);
    if let Some(returned) = returned {
        SEARCH_RESULTS.observe(returned as f64);
    }
}

pub fn record_store_operation(backend: &str, operation: &str, duration_seconds: f64) {
    STORE_OPERATION_DURATION_SECONDS
        .with_label_values(&[backend, operation])
        .observe(duration_seconds);
}

/// Helper to sanitize path for metrics labels (replace ids, limit cardinality)
pub fn sanitize_path(path: &str) -> String {
    if path.is_empty() || path == "/" {
        return "/".to_string();
    }

    let segments: Vec<String> = path
        .split('/')
        .map(|s| {
            if uuid::Uuid::parse_str(s).is_ok() {
                "{id}".to_string()
            } else {
                s.to_string()
            }
        })
        .collect();

    // /api/metadata/{id} is the deepest known route; anything longer is collapsed
    if segments.len() > 4 {
        return segments[..4].join("/");
    }
    segments.join("/")
}

/// Record operation for a path and method, if the path is a record route
pub fn extract_operation(method: &str, path: &str) -> Option<&'static str> {
    let rest = path.strip_prefix("/api/metadata")?;
    let segments: Vec<&str> = rest.split('/').filter(|s| !s.is_empty()).collect();

    match (method, segments.as_slice()) {
        ("GET", []) => Some("list"),
        ("GET", ["fields"]) => Some("fields"),
        ("GET", [_]) => Some("read"),
        ("POST", []) => Some("create"),
        ("PUT", [_]) => Some("update"),
        ("DELETE", [_]) => Some("delete"),
        _ => None,
    }
}
