//! Topic lookup and detail display.

use std::collections::HashSet;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::model::Record;

/// First record in view order whose topic equals `topic`.
///
/// # Errors
///
/// [`Error::NotFound`] when no record in the view carries that topic.
pub fn lookup<'a>(view: &[&'a Record], topic: &str) -> Result<&'a Record> {
    view.iter()
        .copied()
        .find(|r| r.topic == topic)
        .ok_or_else(|| Error::NotFound(topic.to_string()))
}

/// Distinct topics of a view in first-appearance order. These are the
/// valid keys for [`lookup`].
pub fn topics<'a>(view: &[&'a Record]) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    view.iter()
        .map(|r| r.topic.as_str())
        .filter(|t| seen.insert(*t))
        .collect()
}

/// What the explorer shows for a selected topic.
#[derive(Debug, Clone, Serialize)]
pub struct RecordDetail<'a> {
    pub header: String,
    pub raw_text: &'a str,
}

impl<'a> RecordDetail<'a> {
    pub fn new(record: &'a Record) -> Self {
        let due = record
            .due_date
            .map(|d| d.date().to_string())
            .unwrap_or_else(|| "N/A".to_string());
        Self {
            header: format!(
                "Person: {} | Category: {} | Sentiment: {} | Due: {due}",
                record.person, record.feature_category, record.sentiment
            ),
            raw_text: &record.raw_text,
        }
    }
}
