//! Rule-based insight lines.
//!
//! Rules run in a fixed order and each appends zero or more lines:
//!
//! 0. empty guard (short-circuits everything else)
//! 1. overall focus
//! 2. per-person snapshot, alphabetical
//! 3. urgency signal and next deadlines
//! 4. wins and friction hotspots
//!
//! Output depends only on the view, `now`, and the rule parameters.

use std::collections::BTreeSet;

use chrono::NaiveDateTime;

use crate::config::rules::InsightRules;
use crate::kpi::{dominant_category, percent};
use crate::model::{Record, Sentiment, Status};

/// The only line produced for an empty view.
pub const EMPTY_VIEW: &str = "No data under current filters.";

/// Sample-size cap quoted in the wins line.
const WIN_SAMPLE_CAP: usize = 3;

/// Insight lines for `view` using the default rule parameters.
pub fn insights(view: &[&Record], now: NaiveDateTime) -> Vec<String> {
    generate(view, now, &InsightRules::default())
}

/// Insight lines for `view`.
///
/// Statuses are re-derived against `now`, so the result does not depend on
/// when the dataset was loaded.
pub fn generate(view: &[&Record], now: NaiveDateTime, rules: &InsightRules) -> Vec<String> {
    if view.is_empty() {
        return vec![EMPTY_VIEW.to_string()];
    }

    let mut lines = Vec::new();
    overall_focus(view, &mut lines);
    person_snapshots(view, now, &mut lines);
    urgency(view, now, rules, &mut lines);
    wins_and_friction(view, rules, &mut lines);
    lines
}

fn overall_focus(view: &[&Record], lines: &mut Vec<String>) {
    if let Some((category, count)) = dominant_category(view) {
        lines.push(format!(
            "Focus is on {category} ({}% of topics).",
            percent(count, view.len())
        ));
    }
}

/// One line per distinct person, in ascending order.
fn person_snapshots(view: &[&Record], now: NaiveDateTime, lines: &mut Vec<String>) {
    let persons: BTreeSet<&str> = view.iter().map(|r| r.person.as_str()).collect();

    for person in persons {
        let sub: Vec<&Record> = view
            .iter()
            .copied()
            .filter(|r| r.person == person)
            .collect();

        let (category, count) = dominant_category(&sub).unwrap_or(("N/A", 0));
        let count_of = |s: Sentiment| sub.iter().filter(|r| r.sentiment == s).count();
        let pos = count_of(Sentiment::Positive);
        let mix = count_of(Sentiment::Mixed);
        let neg = count_of(Sentiment::Negative);
        let urgent = sub.iter().filter(|r| r.status_at(now).is_urgent()).count();

        lines.push(format!(
            "{person}: mainly {category} ({}%). Sentiment → +:{pos}, ±:{mix}, -:{neg} ({}% positive). Urgent items: {urgent}.",
            percent(count, sub.len()),
            percent(pos, sub.len()),
        ));
    }
}

fn urgency(view: &[&Record], now: NaiveDateTime, rules: &InsightRules, lines: &mut Vec<String>) {
    let mut due: Vec<(&Record, Status)> = view
        .iter()
        .map(|r| (*r, r.status_at(now)))
        .filter(|(_, status)| status.is_urgent())
        .collect();
    if due.is_empty() {
        return;
    }

    let overdue = due.iter().filter(|(_, s)| *s == Status::Overdue).count();
    lines.push(format!(
        "Urgency: {} items require attention ({overdue} overdue).",
        due.len()
    ));

    due.sort_by_key(|(r, _)| r.due_date);
    let labels: Vec<String> = due
        .iter()
        .take(rules.next_deadlines)
        .filter_map(|(r, _)| {
            r.due_date
                .map(|d| format!("{}–{}: {}", d.date(), r.person, r.topic))
        })
        .collect();
    if !labels.is_empty() {
        lines.push(labels.join(" | "));
    }
}

fn wins_and_friction(view: &[&Record], rules: &InsightRules, lines: &mut Vec<String>) {
    let wins: Vec<&Record> = view
        .iter()
        .copied()
        .filter(|r| r.sentiment == Sentiment::Positive)
        .collect();
    if let Some((category, _)) = dominant_category(&wins) {
        lines.push(format!(
            "Wins cluster in {category} (e.g., {} recent positives).",
            wins.len().min(WIN_SAMPLE_CAP)
        ));
    }

    let friction: Vec<&Record> = view
        .iter()
        .copied()
        .filter(|r| {
            r.sentiment != Sentiment::Positive && rules.is_friction_category(&r.feature_category)
        })
        .collect();
    if let Some((category, _)) = dominant_category(&friction) {
        lines.push(format!(
            "Friction hotspots: {category} (prioritize coaching/unblocking)."
        ));
    }
}
