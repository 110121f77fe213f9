//! Core data model.
//!
//! A record is one meeting note or action item from a one-on-one log. It has
//! who (person), what (category + topic), how it went (sentiment), and when
//! something is due. Status is derived from the due date, never read from
//! the source.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Days ahead of `now` (inclusive) in which a due date counts as "due soon".
pub const DUE_SOON_DAYS: i64 = 7;

// ---------------------------------------------------------------------------
// Record
// ---------------------------------------------------------------------------

/// One meeting note / action item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub person: String,

    /// Open-ended category label (e.g., "Projects/Execution").
    pub feature_category: String,

    pub sentiment: Sentiment,

    /// Not unique within a dataset.
    pub topic: String,

    /// Free text, may be empty.
    pub action: String,

    /// When the note was taken. None if missing or unparseable at the source.
    pub date: Option<NaiveDateTime>,

    /// None if missing or unparseable at the source.
    pub due_date: Option<NaiveDateTime>,

    /// Full conversation transcript.
    pub raw_text: String,

    /// Derived from `due_date` at normalization time.
    pub status: Status,
}

impl Record {
    /// Status of this record evaluated against an arbitrary instant.
    pub fn status_at(&self, now: NaiveDateTime) -> Status {
        Status::derive(self.due_date, now)
    }
}

// ---------------------------------------------------------------------------
// Sentiment
// ---------------------------------------------------------------------------

/// How a topic went, encoded in the source as `+`, `±`, `-`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    Positive,
    Mixed,
    Negative,
}

impl Sentiment {
    /// Source symbol for this sentiment.
    pub fn symbol(self) -> &'static str {
        match self {
            Sentiment::Positive => "+",
            Sentiment::Mixed => "±",
            Sentiment::Negative => "-",
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.symbol())
    }
}

impl std::str::FromStr for Sentiment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "+" | "positive" | "pos" => Ok(Sentiment::Positive),
            "±" | "+/-" | "+-" | "mixed" | "mix" => Ok(Sentiment::Mixed),
            "-" | "−" | "negative" | "neg" => Ok(Sentiment::Negative),
            other => Err(format!("unrecognized sentiment: {other:?}")),
        }
    }
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Due-date classification relative to an evaluation instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    NoDue,
    Overdue,
    DueSoon,
    OnTrack,
}

impl Status {
    /// Classify a due date against `now`.
    ///
    /// Anything due in less than eight whole days (and not already past) is
    /// `DueSoon`.
    pub fn derive(due_date: Option<NaiveDateTime>, now: NaiveDateTime) -> Status {
        let Some(due) = due_date else {
            return Status::NoDue;
        };
        if due < now {
            return Status::Overdue;
        }
        if (0..=DUE_SOON_DAYS).contains(&whole_days(due, now)) {
            Status::DueSoon
        } else {
            Status::OnTrack
        }
    }

    /// Needs attention: due soon or already overdue.
    pub fn is_urgent(self) -> bool {
        matches!(self, Status::DueSoon | Status::Overdue)
    }

    /// Human-readable label as shown in trackers.
    pub fn label(self) -> &'static str {
        match self {
            Status::NoDue => "No Due",
            Status::Overdue => "Overdue",
            Status::DueSoon => "Due Soon",
            Status::OnTrack => "On Track",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.label())
    }
}

/// Whole days from `now` until `due`, rounded toward negative infinity.
pub fn whole_days(due: NaiveDateTime, now: NaiveDateTime) -> i64 {
    (due - now).num_seconds().div_euclid(86_400)
}

// ---------------------------------------------------------------------------
// KPI Summary
// ---------------------------------------------------------------------------

/// Fixed-shape counts over a view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KpiSummary {
    pub total: usize,
    pub positive: usize,
    pub mixed: usize,
    pub negative: usize,
    pub due_soon: usize,
    pub overdue: usize,
}
