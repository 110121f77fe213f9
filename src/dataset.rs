//! The loaded dataset and its load-once cache.
//!
//! A [`Dataset`] never changes after it is built. [`DatasetCache`] reads and
//! normalizes the source on first use and hands out the same `Arc` until
//! someone asks for an explicit reload.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

use chrono::NaiveDateTime;
use opentelemetry::KeyValue;
use serde::Serialize;
use tracing::info;

use crate::error::Result;
use crate::model::{Record, Sentiment};
use crate::normalize::normalize;
use crate::source::RowSource;
use crate::telemetry::{metrics, query};

/// Ordered, immutable sequence of records.
#[derive(Debug, Clone, Serialize)]
pub struct Dataset {
    records: Vec<Record>,
    /// Instant the record statuses were derived against.
    evaluated_at: NaiveDateTime,
}

impl Dataset {
    pub fn new(records: Vec<Record>, evaluated_at: NaiveDateTime) -> Self {
        Self {
            records,
            evaluated_at,
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn evaluated_at(&self) -> NaiveDateTime {
        self.evaluated_at
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The whole dataset as a view.
    pub fn view(&self) -> Vec<&Record> {
        self.records.iter().collect()
    }

    /// Distinct persons in first-appearance order.
    pub fn persons(&self) -> Vec<&str> {
        distinct(self.records.iter().map(|r| r.person.as_str()))
    }

    /// Distinct categories in first-appearance order.
    pub fn categories(&self) -> Vec<&str> {
        distinct(self.records.iter().map(|r| r.feature_category.as_str()))
    }

    /// Distinct sentiments in first-appearance order.
    pub fn sentiments(&self) -> Vec<Sentiment> {
        distinct(self.records.iter().map(|r| r.sentiment))
    }
}

fn distinct<T: Copy + Eq + std::hash::Hash>(items: impl Iterator<Item = T>) -> Vec<T> {
    let mut seen = HashSet::new();
    items.filter(|item| seen.insert(*item)).collect()
}

// ---------------------------------------------------------------------------
// Cache
// ---------------------------------------------------------------------------

/// Load-once holder for a dataset read from a [`RowSource`].
pub struct DatasetCache<S: RowSource> {
    source: S,
    dataset: Option<Arc<Dataset>>,
}

impl<S: RowSource> DatasetCache<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            dataset: None,
        }
    }

    /// Return the cached dataset, loading it on first call.
    ///
    /// `now` is only used when a load actually happens.
    pub fn get(&mut self, now: NaiveDateTime) -> Result<Arc<Dataset>> {
        match &self.dataset {
            Some(dataset) => Ok(Arc::clone(dataset)),
            None => self.reload(now),
        }
    }

    /// Drop any cached dataset and read the source again.
    ///
    /// On failure the previous dataset is discarded as well.
    pub fn reload(&mut self, now: NaiveDateTime) -> Result<Arc<Dataset>> {
        self.dataset = None;

        let source = self.source.describe();
        let span = query::start_load_span(&source);
        let _enter = span.enter();
        let start = Instant::now();

        let loaded = self
            .source
            .read_rows()
            .and_then(|rows| normalize(rows, now));

        let result = if loaded.is_ok() { "ok" } else { "error" };
        metrics::dataset_loads().add(1, &[KeyValue::new("result", result)]);
        metrics::operation_duration_ms().record(
            start.elapsed().as_secs_f64() * 1000.0,
            &[KeyValue::new("operation", "load")],
        );

        let dataset = Arc::new(loaded?);
        query::record_view_size(&span, dataset.len());
        metrics::records_loaded().add(dataset.len() as u64, &[]);
        info!(source = %source, records = dataset.len(), "dataset loaded");

        self.dataset = Some(Arc::clone(&dataset));
        Ok(dataset)
    }

    /// Forget the cached dataset without reading the source.
    pub fn invalidate(&mut self) {
        self.dataset = None;
    }

    pub fn is_loaded(&self) -> bool {
        self.dataset.is_some()
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}
