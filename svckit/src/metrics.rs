use lazy_static::lazy_static;
use prometheus::{
    register_histogram_vec, register_int_counter_vec, Encoder, HistogramVec, IntCounterVec,
    TextEncoder,
};

lazy_static! {
    pub static ref DERIVATION_DURATION: HistogramVec = register_histogram_vec!(
        "insight_derivation_duration_seconds",
        "Dataset derivation duration in seconds",
        &["page"]
    ).unwrap();

    pub static ref DERIVATION_COUNTER: IntCounterVec = register_int_counter_vec!(
        "insight_derivations_total",
        "Total number of dataset derivations",
        &["page"]
    ).unwrap();

    pub static ref REQUEST_COUNTER: IntCounterVec = register_int_counter_vec!(
        "insight_requests_total",
        "Total number of API requests",
        &["route", "status"]
    ).unwrap();
}

pub fn record_derivation(page: &str, duration: f64) {
    DERIVATION_DURATION.with_label_values(&[page]).observe(duration);
    DERIVATION_COUNTER.with_label_values(&[page]).inc();
}

pub fn record_request(route: &str, success: bool) {
    let status = if success { "success" } else { "failure" };
    REQUEST_COUNTER.with_label_values(&[route, status]).inc();
}

/// Render the default registry in the Prometheus text format.
pub fn gather_text() -> String {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&prometheus::gather(), &mut buffer) {
        tracing::warn!("Failed to encode metrics: {}", e);
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}
