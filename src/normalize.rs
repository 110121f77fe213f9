//! Record normalizer: raw rows in, typed records out.
//!
//! Dates that cannot be parsed become `None` rather than errors. Rows with
//! an unrecognized sentiment symbol are skipped. Text columns accept
//! strings, numbers, and booleans. Status is stamped onto each record
//! against the caller's `now`.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use serde_json::Value;
use tracing::{debug, warn};

use crate::dataset::Dataset;
use crate::error::{Error, Result};
use crate::model::{Record, Sentiment, Status};
use crate::source::RawRow;
use crate::telemetry::metrics;

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d-%b-%Y", "%d %B %Y", "%d %b %Y", "%B %d, %Y",
    "%b %d, %Y", "%Y%m%d",
];

/// Turn a batch of raw rows into a dataset, preserving row order.
///
/// Rows whose sentiment is not one of the known symbols are dropped with a
/// warning. Bad dates never fail.
///
/// # Errors
///
/// Returns [`Error::InvalidRow`] when a row lacks `person`,
/// `feature_category`, `sentiment`, or `topic`.
pub fn normalize(rows: Vec<RawRow>, now: NaiveDateTime) -> Result<Dataset> {
    let mut records = Vec::with_capacity(rows.len());
    let mut coerced = 0u64;
    let mut skipped = 0u64;

    for (idx, row) in rows.iter().enumerate() {
        match normalize_row(idx, row, now)? {
            Some((record, row_coerced)) => {
                coerced += row_coerced;
                records.push(record);
            }
            None => skipped += 1,
        }
    }

    if coerced > 0 {
        warn!(coerced, "unparseable dates coerced to missing");
        metrics::dates_coerced().add(coerced, &[]);
    }
    if skipped > 0 {
        metrics::rows_skipped().add(skipped, &[]);
    }
    debug!(records = records.len(), skipped, %now, "rows normalized");

    Ok(Dataset::new(records, now))
}

/// `None` when the row is skipped for an unrecognized sentiment.
fn normalize_row(idx: usize, row: &RawRow, now: NaiveDateTime) -> Result<Option<(Record, u64)>> {
    let required = |column: &str| {
        text_field(row, column).ok_or_else(|| Error::InvalidRow {
            row: idx,
            reason: format!("missing {column}"),
        })
    };

    let person = required("person")?;
    let feature_category = required("feature_category")?;
    let symbol = required("sentiment")?;
    let topic = required("topic")?;
    let sentiment: Sentiment = match symbol.parse() {
        Ok(sentiment) => sentiment,
        Err(reason) => {
            warn!(row = idx, %reason, "skipping row");
            return Ok(None);
        }
    };

    let (date, date_coerced) = date_field(row, "date");
    let (due_date, due_coerced) = date_field(row, "due_date");

    let record = Record {
        person,
        feature_category,
        sentiment,
        topic,
        action: text_field(row, "action").unwrap_or_default(),
        date,
        due_date,
        raw_text: text_field(row, "raw_text").unwrap_or_default(),
        status: Status::derive(due_date, now),
    };

    Ok(Some((record, u64::from(date_coerced) + u64::from(due_coerced))))
}

fn text_field(row: &RawRow, column: &str) -> Option<String> {
    match row.get(column)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

/// Parsed value plus whether a non-empty cell had to be discarded.
fn date_field(row: &RawRow, column: &str) -> (Option<NaiveDateTime>, bool) {
    match row.get(column) {
        None | Some(Value::Null) => (None, false),
        Some(Value::String(s)) if s.trim().is_empty() => (None, false),
        Some(Value::String(s)) => {
            let parsed = parse_timestamp(s);
            (parsed, parsed.is_none())
        }
        Some(Value::Number(n)) => {
            let parsed = n.as_f64().and_then(excel_serial_to_datetime);
            (parsed, parsed.is_none())
        }
        Some(_) => (None, true),
    }
}

/// Parse a timestamp from text in any of the common spreadsheet layouts.
///
/// Offsets are dropped after converting to UTC. Date-only values land on
/// midnight.
pub fn parse_timestamp(input: &str) -> Option<NaiveDateTime> {
    let s = input.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d.and_time(NaiveTime::MIN));
        }
    }
    None
}

/// Convert an Excel serial date (days since 1899-12-30) to a timestamp.
///
/// Sub-second precision is rounded to milliseconds.
pub fn excel_serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || !(0.0..2_958_466.0).contains(&serial) {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_time(NaiveTime::MIN);
    let millis = (serial * 86_400_000.0).round() as i64;
    epoch.checked_add_signed(TimeDelta::try_milliseconds(millis)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    #[test]
    fn parses_common_layouts() {
        let midnight = ts("2025-03-04 00:00:00");
        assert_eq!(parse_timestamp("2025-03-04"), Some(midnight));
        assert_eq!(parse_timestamp("03/04/2025"), Some(midnight));
        assert_eq!(parse_timestamp("2025/03/04"), Some(midnight));
        assert_eq!(parse_timestamp("4 March 2025"), Some(midnight));
        assert_eq!(parse_timestamp("Mar 4, 2025"), Some(midnight));
        assert_eq!(
            parse_timestamp("2025-03-04 09:30:00"),
            Some(ts("2025-03-04 09:30:00"))
        );
        assert_eq!(
            parse_timestamp("2025-03-04T09:30:00Z"),
            Some(ts("2025-03-04 09:30:00"))
        );
    }

    #[test]
    fn garbage_is_none() {
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("next tuesday"), None);
        assert_eq!(parse_timestamp("2025-13-45"), None);
    }

    #[test]
    fn excel_serial_dates() {
        assert_eq!(excel_serial_to_datetime(45_000.0), Some(ts("2023-03-15 00:00:00")));
        assert_eq!(excel_serial_to_datetime(45_000.5), Some(ts("2023-03-15 12:00:00")));
        assert_eq!(excel_serial_to_datetime(f64::NAN), None);
        assert_eq!(excel_serial_to_datetime(-1.0), None);
    }

    #[test]
    fn unparseable_date_is_flagged_as_coerced() {
        let mut row = RawRow::new();
        row.insert("due_date".into(), Value::String("soon".into()));
        row.insert("date".into(), Value::Null);
        assert_eq!(date_field(&row, "due_date"), (None, true));
        assert_eq!(date_field(&row, "date"), (None, false));
        assert_eq!(date_field(&row, "missing"), (None, false));
    }
}
