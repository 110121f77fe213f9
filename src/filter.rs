//! Three-way membership filter over a dataset.
//!
//! The engine keeps no filter state: callers own a [`FilterSelection`] and
//! pass it in on every query.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::dataset::Dataset;
use crate::model::{Record, Sentiment};

/// Allowed values along each filter dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    pub persons: HashSet<String>,
    pub categories: HashSet<String>,
    pub sentiments: HashSet<Sentiment>,
}

impl FilterSelection {
    /// Everything present in the dataset. Filtering with this is the identity.
    pub fn all(dataset: &Dataset) -> Self {
        Self {
            persons: dataset.persons().into_iter().map(str::to_string).collect(),
            categories: dataset
                .categories()
                .into_iter()
                .map(str::to_string)
                .collect(),
            sentiments: dataset.sentiments().into_iter().collect(),
        }
    }

    /// Replace the allowed persons.
    pub fn persons<I, S>(mut self, persons: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.persons = persons.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the allowed categories.
    pub fn categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the allowed sentiments.
    pub fn sentiments(mut self, sentiments: impl IntoIterator<Item = Sentiment>) -> Self {
        self.sentiments = sentiments.into_iter().collect();
        self
    }

    pub fn matches(&self, record: &Record) -> bool {
        self.persons.contains(&record.person)
            && self.categories.contains(&record.feature_category)
            && self.sentiments.contains(&record.sentiment)
    }
}

/// Records of `dataset` allowed by `selection`, in dataset order.
pub fn filter<'a>(dataset: &'a Dataset, selection: &FilterSelection) -> Vec<&'a Record> {
    dataset
        .records()
        .iter()
        .filter(|record| selection.matches(record))
        .collect()
}
