//! JSON row source: a file holding an array of row objects.

use std::path::{Path, PathBuf};

use super::{RawRow, RowSource, check_columns};
use crate::error::{Error, Result};

pub struct JsonSource {
    path: PathBuf,
}

impl JsonSource {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }
}

impl RowSource for JsonSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn read_rows(&self) -> Result<Vec<RawRow>> {
        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| Error::Load(format!("cannot read {}: {e}", self.path.display())))?;
        let rows: Vec<RawRow> = serde_json::from_str(&content).map_err(|e| {
            Error::Load(format!(
                "{} is not an array of row objects: {e}",
                self.path.display()
            ))
        })?;
        check_columns(&rows, &self.describe())?;
        Ok(rows)
    }
}
