//! Spreadsheet row source backed by calamine.
//!
//! The first row of the worksheet is the header. Fully empty rows are
//! skipped. Excel date cells are converted to ISO timestamps so the
//! normalizer sees them as text.

use std::path::{Path, PathBuf};

use calamine::{Data, Reader, open_workbook_auto};
use serde_json::Value;

use super::{RawRow, RowSource, check_columns};
use crate::error::{Error, Result};
use crate::normalize::excel_serial_to_datetime;

pub struct WorkbookSource {
    path: PathBuf,
    sheet: Option<String>,
}

impl WorkbookSource {
    /// `sheet` picks a worksheet by name; `None` reads the first one.
    pub fn new(path: &Path, sheet: Option<String>) -> Self {
        Self {
            path: path.to_path_buf(),
            sheet,
        }
    }
}

impl RowSource for WorkbookSource {
    fn describe(&self) -> String {
        match &self.sheet {
            Some(sheet) => format!("{}[{sheet}]", self.path.display()),
            None => self.path.display().to_string(),
        }
    }

    fn read_rows(&self) -> Result<Vec<RawRow>> {
        let mut workbook = open_workbook_auto(&self.path)
            .map_err(|e| Error::Load(format!("cannot open {}: {e}", self.path.display())))?;

        let sheet_name = match &self.sheet {
            Some(name) => name.clone(),
            None => workbook.sheet_names().first().cloned().ok_or_else(|| {
                Error::Load(format!("{} has no worksheets", self.path.display()))
            })?,
        };

        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| Error::Load(format!("cannot read sheet {sheet_name:?}: {e}")))?;

        let mut rows = range.rows();
        let Some(header) = rows.next() else {
            return Ok(Vec::new());
        };
        let columns: Vec<String> = header
            .iter()
            .map(cell_to_value)
            .map(|v| match v {
                Value::String(s) => s.trim().to_string(),
                Value::Null => String::new(),
                other => other.to_string(),
            })
            .collect();

        let mut out = Vec::new();
        for row in rows {
            if row.iter().all(|cell| matches!(cell, Data::Empty)) {
                continue;
            }
            let mut raw = RawRow::new();
            for (column, cell) in columns.iter().zip(row.iter()) {
                if column.is_empty() {
                    continue;
                }
                raw.insert(column.clone(), cell_to_value(cell));
            }
            out.push(raw);
        }

        check_columns(&out, &self.describe())?;
        Ok(out)
    }
}

fn cell_to_value(cell: &Data) -> Value {
    match cell {
        Data::Empty | Data::Error(_) => Value::Null,
        Data::String(s) => Value::String(s.clone()),
        Data::Int(n) => Value::from(*n),
        Data::Float(f) => serde_json::Number::from_f64(*f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        Data::Bool(b) => Value::Bool(*b),
        Data::DateTime(dt) => excel_serial_to_datetime(dt.as_f64())
            .map(|ts| Value::String(ts.format("%Y-%m-%dT%H:%M:%S").to_string()))
            .unwrap_or(Value::Null),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Value::String(s.clone()),
    }
}
