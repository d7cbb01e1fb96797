use once_cell::sync::Lazy;
use prometheus::{
    register_int_counter, register_int_counter_vec, Encoder, IntCounter, IntCounterVec, TextEncoder,
};

// Prometheus metrics (default registry)
pub static STUDENTS_UPSERTED_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "busfees_students_upserted_total",
        "Student upserts by outcome (created/updated)",
        &["outcome"]
    )
    .expect("register students_upserted_total")
});

pub static LOCATIONS_TOMBSTONED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "busfees_locations_tombstoned_total",
        "Locations moved into the recycle bin"
    )
    .expect("register locations_tombstoned_total")
});

pub static RECORDS_RESTORED_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "busfees_records_restored_total",
        "Recycle bin entries restored by kind",
        &["kind"]
    )
    .expect("register records_restored_total")
});

pub static REPORT_STAMP_FAILURES_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "busfees_report_stamp_failures_total",
        "Reports whose student reportGenerated stamp could not be applied"
    )
    .expect("register report_stamp_failures_total")
});

/// Render the default registry in the prometheus text format.
pub fn encode_metrics() -> (axum::http::StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            format!("metrics encode error: {e}"),
        );
    }
    (
        axum::http::StatusCode::OK,
        String::from_utf8(buffer).unwrap_or_default(),
    )
}
