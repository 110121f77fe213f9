//! Core engine. The public entry point for loading and querying a log.
//!
//! The engine owns the dataset cache and the rule parameters. Filter
//! selections and the evaluation instant come from the caller on every
//! call; nothing about a query is remembered between calls.

use std::sync::Arc;
use std::time::Instant;

use chrono::NaiveDateTime;
use opentelemetry::KeyValue;
use serde::Serialize;

use crate::config::Config;
use crate::config::rules::InsightRules;
use crate::dataset::{Dataset, DatasetCache};
use crate::error::Result;
use crate::filter::{FilterSelection, filter};
use crate::insights::generate;
use crate::kpi::{LabelCount, aggregate_at, category_distribution, sentiment_breakdown};
use crate::model::{KpiSummary, Record, Sentiment};
use crate::source::{self, RowSource};
use crate::telemetry::{metrics, query};
use crate::trackers::{action_items, risk_items, upcoming_deadlines};

/// Loads a meeting log once and answers queries over it.
pub struct Engine<S: RowSource = Box<dyn RowSource>> {
    cache: DatasetCache<S>,
    rules: InsightRules,
}

impl Engine {
    /// Build an engine from runtime configuration: opens the configured
    /// source and loads the rules file if one is set.
    pub fn from_config(config: &Config) -> Result<Self> {
        let source = source::open(&config.source, config.sheet.as_deref())?;
        let rules = InsightRules::load_or_default(config.rules_path.as_deref())?;
        Ok(Self::new(source, rules))
    }
}

impl<S: RowSource> Engine<S> {
    pub fn new(source: S, rules: InsightRules) -> Self {
        Self {
            cache: DatasetCache::new(source),
            rules,
        }
    }

    /// The dataset, loaded on first call and cached after.
    pub fn dataset(&mut self, now: NaiveDateTime) -> Result<Arc<Dataset>> {
        self.cache.get(now)
    }

    /// Re-read the source, replacing the cached dataset.
    pub fn reload(&mut self, now: NaiveDateTime) -> Result<Arc<Dataset>> {
        self.cache.reload(now)
    }

    pub fn rules(&self) -> &InsightRules {
        &self.rules
    }
}

/// Apply `selection` to `dataset`, with telemetry.
pub fn select<'a>(dataset: &'a Dataset, selection: &FilterSelection) -> Vec<&'a Record> {
    observe("filter", || filter(dataset, selection), Vec::len)
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// Everything derived from one view: the full dashboard in data form.
///
/// Every due-date status in a snapshot is evaluated at the same `now`,
/// whatever instant the dataset was loaded at.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot<'a> {
    pub kpis: KpiSummary,
    pub insights: Vec<String>,
    pub upcoming_deadlines: Vec<&'a Record>,
    pub risk_items: Vec<&'a Record>,
    pub action_items: Vec<&'a Record>,
    pub categories: Vec<LabelCount<&'a str>>,
    pub sentiments: Vec<LabelCount<Sentiment>>,
    pub topics: Vec<&'a str>,
}

impl<'a> Snapshot<'a> {
    pub fn build(view: &[&'a Record], now: NaiveDateTime, rules: &InsightRules) -> Self {
        observe(
            "snapshot",
            || Self {
                kpis: aggregate_at(view, now),
                insights: generate(view, now, rules),
                upcoming_deadlines: upcoming_deadlines(view, now),
                risk_items: risk_items(view, now),
                action_items: action_items(view, now),
                categories: category_distribution(view),
                sentiments: sentiment_breakdown(view),
                topics: crate::lookup::topics(view),
            },
            |snapshot| snapshot.kpis.total,
        )
    }
}

/// Run `f` inside a query span, counting it and timing it.
pub(crate) fn observe<T>(operation: &str, f: impl FnOnce() -> T, size: impl Fn(&T) -> usize) -> T {
    let span = query::start_query_span(operation);
    let _enter = span.enter();
    let start = Instant::now();

    let out = f();

    let labels = [KeyValue::new("operation", operation.to_string())];
    query::record_view_size(&span, size(&out));
    metrics::queries().add(1, &labels);
    metrics::operation_duration_ms().record(start.elapsed().as_secs_f64() * 1000.0, &labels);
    out
}
