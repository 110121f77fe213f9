//! Span helpers for dataset loads and view queries.

use tracing::Span;

/// Start a span for loading a dataset from `source`.
///
/// `view.size` is declared empty and filled by [`record_view_size`] once
/// the record count is known.
pub fn start_load_span(source: &str) -> Span {
    tracing::info_span!(
        "dataset.load",
        "dataset.source" = source,
        "view.size" = tracing::field::Empty,
    )
}

/// Start a span for a query over a view.
pub fn start_query_span(operation: &str) -> Span {
    tracing::debug_span!(
        "view.query",
        "query.operation" = operation,
        "view.size" = tracing::field::Empty,
    )
}

/// Record how many records the span's operation saw or produced.
pub fn record_view_size(span: &Span, size: usize) {
    span.record("view.size", size as u64);
}
