//! Row sources: where raw meeting rows come from.
//!
//! A source produces an ordered batch of loosely-typed rows, one map of
//! column name to value per row. Typing happens later, in
//! [`crate::normalize`]. A source that cannot be read is a load failure.

pub mod json;
pub mod workbook;

use std::path::Path;

use crate::error::{Error, Result};

/// One raw row: column name to loosely-typed cell value.
pub type RawRow = serde_json::Map<String, serde_json::Value>;

/// Columns every source must provide.
pub const REQUIRED_COLUMNS: [&str; 8] = [
    "person",
    "feature_category",
    "sentiment",
    "topic",
    "action",
    "date",
    "due_date",
    "raw_text",
];

/// Something that can produce a batch of raw rows.
pub trait RowSource {
    /// Short description for logs (usually a path).
    fn describe(&self) -> String;

    /// Read every row, in source order.
    fn read_rows(&self) -> Result<Vec<RawRow>>;
}

impl<S: RowSource + ?Sized> RowSource for Box<S> {
    fn describe(&self) -> String {
        (**self).describe()
    }

    fn read_rows(&self) -> Result<Vec<RawRow>> {
        (**self).read_rows()
    }
}

/// Rows already held in memory. Used for embedding and tests.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    rows: Vec<RawRow>,
}

impl MemorySource {
    pub fn new(rows: Vec<RawRow>) -> Self {
        Self { rows }
    }
}

impl RowSource for MemorySource {
    fn describe(&self) -> String {
        format!("memory ({} rows)", self.rows.len())
    }

    fn read_rows(&self) -> Result<Vec<RawRow>> {
        Ok(self.rows.clone())
    }
}

/// Open a file source, picking the reader by extension.
///
/// Spreadsheets go through calamine; `.json` files must hold an array of
/// row objects. `sheet` selects a worksheet and is ignored for JSON.
pub fn open(path: &Path, sheet: Option<&str>) -> Result<Box<dyn RowSource>> {
    if !path.exists() {
        return Err(Error::Load(format!("source not found: {}", path.display())));
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "xlsx" | "xlsm" | "xls" | "xlsb" | "ods" => Ok(Box::new(workbook::WorkbookSource::new(
            path,
            sheet.map(str::to_string),
        ))),
        "json" => Ok(Box::new(json::JsonSource::new(path))),
        other => Err(Error::Load(format!(
            "unsupported source type {other:?}: {}",
            path.display()
        ))),
    }
}

/// Reject a batch whose header lacks a required column.
///
/// Only checks the first row; rows are expected to share one header.
pub(crate) fn check_columns(rows: &[RawRow], source: &str) -> Result<()> {
    let Some(first) = rows.first() else {
        return Ok(());
    };
    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|col| !first.contains_key(*col))
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(Error::Load(format!(
            "{source} is missing required columns: {}",
            missing.join(", ")
        )))
    }
}
