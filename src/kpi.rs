//! Count summaries over a view.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::model::{KpiSummary, Record, Sentiment, Status};

/// Headline counts for a view, using the status stamped at load.
/// Empty views give all zeros.
pub fn aggregate(view: &[&Record]) -> KpiSummary {
    tally(view, |r| r.status)
}

/// Like [`aggregate`], but with due-date status evaluated at `now`.
pub fn aggregate_at(view: &[&Record], now: NaiveDateTime) -> KpiSummary {
    tally(view, |r| r.status_at(now))
}

fn tally(view: &[&Record], status: impl Fn(&Record) -> Status) -> KpiSummary {
    let mut summary = KpiSummary {
        total: view.len(),
        ..KpiSummary::default()
    };
    for record in view {
        match record.sentiment {
            Sentiment::Positive => summary.positive += 1,
            Sentiment::Mixed => summary.mixed += 1,
            Sentiment::Negative => summary.negative += 1,
        }
        match status(record) {
            Status::DueSoon => summary.due_soon += 1,
            Status::Overdue => summary.overdue += 1,
            Status::NoDue | Status::OnTrack => {}
        }
    }
    summary
}

/// Count of records for one label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelCount<T> {
    pub label: T,
    pub count: usize,
}

/// Records per category, most frequent first.
///
/// Equal counts keep first-appearance order.
pub fn category_distribution<'a>(view: &[&'a Record]) -> Vec<LabelCount<&'a str>> {
    let mut counts: Vec<LabelCount<&'a str>> = Vec::new();
    for record in view {
        let label = record.feature_category.as_str();
        match counts.iter_mut().find(|c| c.label == label) {
            Some(entry) => entry.count += 1,
            None => counts.push(LabelCount { label, count: 1 }),
        }
    }
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

/// Records per sentiment, most frequent first. Absent sentiments are omitted.
pub fn sentiment_breakdown(view: &[&Record]) -> Vec<LabelCount<Sentiment>> {
    let mut counts: Vec<LabelCount<Sentiment>> = Vec::new();
    for record in view {
        match counts.iter_mut().find(|c| c.label == record.sentiment) {
            Some(entry) => entry.count += 1,
            None => counts.push(LabelCount {
                label: record.sentiment,
                count: 1,
            }),
        }
    }
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

/// The most frequent category and its count.
///
/// Ties go to the category seen first in view order. `None` for an empty
/// view.
pub fn dominant_category<'a>(view: &[&'a Record]) -> Option<(&'a str, usize)> {
    category_distribution(view)
        .into_iter()
        .next()
        .map(|c| (c.label, c.count))
}

/// `round(100 * num / den)` with halves rounded to even; 0 when `den` is 0.
pub fn percent(num: usize, den: usize) -> u32 {
    if den == 0 {
        return 0;
    }
    (100.0 * num as f64 / den as f64).round_ties_even() as u32
}
