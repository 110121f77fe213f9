//! Metric instrument factories for oneonone-insights.
//!
//! Uses the OTel Meter API with the globally-registered `MeterProvider`.
//! All instruments are created lazily from the `"oneonone-insights"` meter.

use opentelemetry::metrics::{Counter, Histogram, Meter};

/// Returns the shared meter for oneonone-insights instruments.
fn meter() -> Meter {
    opentelemetry::global::meter("oneonone-insights")
}

/// Counter: dataset loads.
/// Labels: `result` ("ok" | "error").
pub fn dataset_loads() -> Counter<u64> {
    meter()
        .u64_counter("insights.dataset.loads")
        .with_description("Number of dataset loads")
        .build()
}

/// Counter: records produced by successful loads.
pub fn records_loaded() -> Counter<u64> {
    meter()
        .u64_counter("insights.dataset.records")
        .with_description("Number of records loaded")
        .build()
}

/// Counter: non-empty date cells that could not be parsed.
pub fn dates_coerced() -> Counter<u64> {
    meter()
        .u64_counter("insights.normalize.dates_coerced")
        .with_description("Unparseable dates coerced to missing")
        .build()
}

/// Counter: rows dropped because their sentiment symbol is unrecognized.
pub fn rows_skipped() -> Counter<u64> {
    meter()
        .u64_counter("insights.normalize.rows_skipped")
        .with_description("Rows skipped for an unrecognized sentiment")
        .build()
}

/// Counter: queries served against a view.
/// Labels: `operation` ("filter" | "kpis" | "insights" | "lookup" | "snapshot").
pub fn queries() -> Counter<u64> {
    meter()
        .u64_counter("insights.queries")
        .with_description("Number of queries served")
        .build()
}

/// Histogram: operation duration in milliseconds.
/// Labels: `operation`.
pub fn operation_duration_ms() -> Histogram<f64> {
    meter()
        .f64_histogram("insights.operation.duration_ms")
        .with_description("Operation duration in milliseconds")
        .with_unit("ms")
        .build()
}
