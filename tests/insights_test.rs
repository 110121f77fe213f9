//! Integration tests for the insight rule set.

use chrono::{NaiveDateTime, TimeDelta};
use oneonone_insights::config::rules::InsightRules;
use oneonone_insights::insights::{EMPTY_VIEW, generate, insights};
use oneonone_insights::model::{Record, Sentiment, Status};

fn now() -> NaiveDateTime {
    NaiveDateTime::parse_from_str("2025-03-10 09:00:00", "%Y-%m-%d %H:%M:%S").unwrap()
}

fn record(
    person: &str,
    category: &str,
    sentiment: Sentiment,
    topic: &str,
    due_in_days: Option<i64>,
) -> Record {
    let due_date = due_in_days.map(|d| now() + TimeDelta::days(d));
    Record {
        person: person.to_string(),
        feature_category: category.to_string(),
        sentiment,
        topic: topic.to_string(),
        action: String::new(),
        date: None,
        due_date,
        raw_text: String::new(),
        status: Status::derive(due_date, now()),
    }
}

/// Alice twice in Process/Quality Metrics (one due soon, one overdue),
/// Bob once in Projects/Execution with no due date.
fn three_records() -> Vec<Record> {
    vec![
        record(
            "Alice",
            "Process/Quality Metrics",
            Sentiment::Positive,
            "Release checklist",
            Some(3),
        ),
        record(
            "Alice",
            "Process/Quality Metrics",
            Sentiment::Negative,
            "Escaped defects",
            Some(-2),
        ),
        record(
            "Bob",
            "Projects/Execution",
            Sentiment::Mixed,
            "Migration plan",
            None,
        ),
    ]
}

// ---------------------------------------------------------------------------
// Rule 0
// ---------------------------------------------------------------------------

#[test]
fn empty_view_yields_single_line() {
    assert_eq!(insights(&[], now()), vec![EMPTY_VIEW.to_string()]);
    assert_eq!(EMPTY_VIEW, "No data under current filters.");
}

// ---------------------------------------------------------------------------
// Full rule set on a small view
// ---------------------------------------------------------------------------

#[test]
fn three_record_example_produces_every_rule() {
    let records = three_records();
    let view: Vec<&Record> = records.iter().collect();

    let lines = insights(&view, now());
    assert_eq!(
        lines,
        vec![
            "Focus is on Process/Quality Metrics (67% of topics).",
            "Alice: mainly Process/Quality Metrics (100%). Sentiment → +:1, ±:0, -:1 (50% positive). Urgent items: 2.",
            "Bob: mainly Projects/Execution (100%). Sentiment → +:0, ±:1, -:0 (0% positive). Urgent items: 0.",
            "Urgency: 2 items require attention (1 overdue).",
            "2025-03-08–Alice: Escaped defects | 2025-03-13–Alice: Release checklist",
            "Wins cluster in Process/Quality Metrics (e.g., 1 recent positives).",
            "Friction hotspots: Process/Quality Metrics (prioritize coaching/unblocking).",
        ]
    );
}

#[test]
fn insights_are_deterministic() {
    let records = three_records();
    let view: Vec<&Record> = records.iter().collect();
    assert_eq!(insights(&view, now()), insights(&view, now()));
}

// ---------------------------------------------------------------------------
// Rule 1
// ---------------------------------------------------------------------------

#[test]
fn focus_tie_goes_to_first_seen_category() {
    let records = vec![
        record("Alice", "People/Growth", Sentiment::Mixed, "a", None),
        record("Alice", "Strategy", Sentiment::Mixed, "b", None),
        record("Alice", "Strategy", Sentiment::Mixed, "c", None),
        record("Alice", "People/Growth", Sentiment::Mixed, "d", None),
    ];
    let view: Vec<&Record> = records.iter().collect();

    let lines = insights(&view, now());
    assert_eq!(lines[0], "Focus is on People/Growth (50% of topics).");
}

#[test]
fn focus_percentage_rounds_half_to_even() {
    // 1 of 8 is 12.5%
    let mut records = vec![record("Alice", "Strategy", Sentiment::Mixed, "s", None)];
    for i in 0..7 {
        records.push(record(
            "Bob",
            &format!("Category {i}"),
            Sentiment::Mixed,
            "x",
            None,
        ));
    }
    let view: Vec<&Record> = records.iter().collect();
    assert_eq!(insights(&view, now())[0], "Focus is on Strategy (12% of topics).");
}

// ---------------------------------------------------------------------------
// Rule 2
// ---------------------------------------------------------------------------

#[test]
fn person_lines_are_alphabetical_regardless_of_input_order() {
    let records = vec![
        record("Carol", "Strategy", Sentiment::Positive, "a", None),
        record("Alice", "Strategy", Sentiment::Positive, "b", None),
        record("Bob", "Strategy", Sentiment::Positive, "c", None),
        record("Alice", "Strategy", Sentiment::Negative, "d", None),
    ];
    let view: Vec<&Record> = records.iter().collect();

    let lines = insights(&view, now());
    let person_lines: Vec<&String> = lines.iter().filter(|l| l.contains(": mainly ")).collect();
    assert_eq!(person_lines.len(), 3);
    assert!(person_lines[0].starts_with("Alice: "));
    assert!(person_lines[1].starts_with("Bob: "));
    assert!(person_lines[2].starts_with("Carol: "));
    assert!(person_lines[0].contains("+:1, ±:0, -:1 (50% positive)"));
}

#[test]
fn person_urgency_uses_evaluation_instant() {
    let records = vec![record(
        "Alice",
        "Strategy",
        Sentiment::Positive,
        "Offsite",
        Some(20),
    )];
    let view: Vec<&Record> = records.iter().collect();

    let today = insights(&view, now());
    assert!(today[1].ends_with("Urgent items: 0."));

    let later = insights(&view, now() + TimeDelta::days(15));
    assert!(later[1].ends_with("Urgent items: 1."));
}

// ---------------------------------------------------------------------------
// Rule 3
// ---------------------------------------------------------------------------

#[test]
fn urgency_lists_three_earliest_deadlines() {
    let records = vec![
        record("Dan", "Strategy", Sentiment::Mixed, "fourth", Some(6)),
        record("Ann", "Strategy", Sentiment::Mixed, "first", Some(-4)),
        record("Cat", "Strategy", Sentiment::Mixed, "third", Some(2)),
        record("Bea", "Strategy", Sentiment::Mixed, "second", Some(1)),
        record("Eve", "Strategy", Sentiment::Mixed, "later", Some(30)),
    ];
    let view: Vec<&Record> = records.iter().collect();

    let lines = insights(&view, now());
    let idx = lines
        .iter()
        .position(|l| l.starts_with("Urgency: "))
        .expect("urgency line");
    assert_eq!(lines[idx], "Urgency: 4 items require attention (1 overdue).");
    assert_eq!(
        lines[idx + 1],
        "2025-03-06–Ann: first | 2025-03-11–Bea: second | 2025-03-12–Cat: third"
    );
}

#[test]
fn urgency_sort_is_stable_for_equal_due_dates() {
    let records = vec![
        record("Zed", "Strategy", Sentiment::Mixed, "one", Some(1)),
        record("Amy", "Strategy", Sentiment::Mixed, "two", Some(1)),
    ];
    let view: Vec<&Record> = records.iter().collect();

    let lines = insights(&view, now());
    assert!(lines.contains(&"2025-03-11–Zed: one | 2025-03-11–Amy: two".to_string()));
}

#[test]
fn no_urgency_lines_without_due_items() {
    let records = vec![record("Amy", "Strategy", Sentiment::Mixed, "one", None)];
    let view: Vec<&Record> = records.iter().collect();
    assert!(
        insights(&view, now())
            .iter()
            .all(|l| !l.starts_with("Urgency: "))
    );
}

#[test]
fn deadline_count_follows_rules() {
    let records = three_records();
    let view: Vec<&Record> = records.iter().collect();
    let rules = InsightRules {
        next_deadlines: 1,
        ..InsightRules::default()
    };

    let lines = generate(&view, now(), &rules);
    assert!(lines.contains(&"2025-03-08–Alice: Escaped defects".to_string()));
}

// ---------------------------------------------------------------------------
// Rule 4
// ---------------------------------------------------------------------------

#[test]
fn wins_count_is_capped_at_three() {
    let records: Vec<Record> = (0..5)
        .map(|i| record("Amy", "Strategy", Sentiment::Positive, &format!("t{i}"), None))
        .collect();
    let view: Vec<&Record> = records.iter().collect();

    let lines = insights(&view, now());
    assert!(lines.contains(&"Wins cluster in Strategy (e.g., 3 recent positives).".to_string()));
    assert!(lines.iter().all(|l| !l.starts_with("Friction hotspots")));
}

#[test]
fn friction_ignores_categories_outside_the_set() {
    let records = vec![
        record("Amy", "Strategy", Sentiment::Negative, "a", None),
        record("Amy", "Strategy", Sentiment::Negative, "b", None),
        record("Amy", "Risk/Incident Management", Sentiment::Mixed, "c", None),
    ];
    let view: Vec<&Record> = records.iter().collect();

    let lines = insights(&view, now());
    assert_eq!(
        lines.last().unwrap(),
        "Friction hotspots: Risk/Incident Management (prioritize coaching/unblocking)."
    );
    assert!(lines.iter().all(|l| !l.starts_with("Wins cluster")));
}

#[test]
fn friction_categories_are_configurable() {
    let records = vec![record("Amy", "Strategy", Sentiment::Negative, "a", None)];
    let view: Vec<&Record> = records.iter().collect();
    let rules = InsightRules {
        friction_categories: vec!["Strategy".to_string()],
        ..InsightRules::default()
    };

    let lines = generate(&view, now(), &rules);
    assert_eq!(
        lines.last().unwrap(),
        "Friction hotspots: Strategy (prioritize coaching/unblocking)."
    );
}
