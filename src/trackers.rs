//! Deadline, risk, and action trackers over a view.

use std::cmp::Ordering;

use chrono::NaiveDateTime;

use crate::model::{DUE_SOON_DAYS, Record, Sentiment, Status, whole_days};

/// Records due within the next week (inclusive), earliest first.
///
/// Uses floor-of-days, so something due an hour ago is not "upcoming".
pub fn upcoming_deadlines<'a>(view: &[&'a Record], now: NaiveDateTime) -> Vec<&'a Record> {
    let mut upcoming: Vec<&Record> = view
        .iter()
        .copied()
        .filter(|r| {
            r.due_date
                .is_some_and(|due| (0..=DUE_SOON_DAYS).contains(&whole_days(due, now)))
        })
        .collect();
    upcoming.sort_by_key(|r| r.due_date);
    upcoming
}

/// Mixed/negative records, or records urgent as of `now`.
///
/// Ordered by status label descending, then due date ascending with
/// missing due dates last.
pub fn risk_items<'a>(view: &[&'a Record], now: NaiveDateTime) -> Vec<&'a Record> {
    let mut risky: Vec<(&Record, Status)> = view
        .iter()
        .map(|r| (*r, r.status_at(now)))
        .filter(|(r, status)| {
            matches!(r.sentiment, Sentiment::Mixed | Sentiment::Negative) || status.is_urgent()
        })
        .collect();
    risky.sort_by(|(a, a_status), (b, b_status)| {
        b_status
            .label()
            .cmp(a_status.label())
            .then_with(|| due_nulls_last(a.due_date, b.due_date))
    });
    risky.into_iter().map(|(r, _)| r).collect()
}

/// Records due soon or overdue as of `now`, in view order.
pub fn action_items<'a>(view: &[&'a Record], now: NaiveDateTime) -> Vec<&'a Record> {
    view.iter()
        .copied()
        .filter(|r| r.status_at(now).is_urgent())
        .collect()
}

fn due_nulls_last(a: Option<NaiveDateTime>, b: Option<NaiveDateTime>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
