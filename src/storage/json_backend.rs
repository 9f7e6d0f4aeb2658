use std::{
    fs,
    path::{Path, PathBuf},
};

use serde_json::Value;
use tracing::{debug, warn};

use crate::{ledger::Record, utils::persistence::write_atomic};

use super::{record_to_row, LedgerStore, Result, Row, StoreError};

/// Sheet store backed by a single JSON document holding an array of rows.
#[derive(Debug, Clone)]
pub struct JsonSheetStore {
    path: PathBuf,
}

impl JsonSheetStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw sheet entries, untouched.
    fn read_values(&self) -> Result<Vec<Value>> {
        let data = fs::read_to_string(&self.path).map_err(|err| {
            StoreError::Unavailable(format!("cannot read `{}`: {err}", self.path.display()))
        })?;
        if data.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&data).map_err(|err| {
            StoreError::Unavailable(format!(
                "`{}` is not a table of rows: {err}",
                self.path.display()
            ))
        })
    }

    fn read_rows(&self) -> Result<Vec<Row>> {
        let values = self.read_values()?;
        let mut rows = Vec::with_capacity(values.len());
        for (idx, value) in values.into_iter().enumerate() {
            match value {
                Value::Object(row) => rows.push(row),
                other => warn!(row = idx + 1, value = %other, "skipping non-object sheet row"),
            }
        }
        Ok(rows)
    }
}

impl LedgerStore for JsonSheetStore {
    fn load(&self) -> Result<Vec<Row>> {
        if !self.path.exists() {
            return Err(StoreError::Unavailable(format!(
                "sheet `{}` not found",
                self.path.display()
            )));
        }
        let rows = self.read_rows()?;
        if rows.is_empty() {
            return Err(StoreError::Empty);
        }
        debug!(rows = rows.len(), path = %self.path.display(), "loaded sheet rows");
        Ok(rows)
    }

    fn append(&self, record: &Record) -> Result<()> {
        // Existing entries are written back as read, including ones load skips.
        let mut values = if self.path.exists() {
            self.read_values()
                .map_err(|err| StoreError::Write(err.to_string()))?
        } else {
            Vec::new()
        };
        values.push(Value::Object(record_to_row(record)));
        let json = serde_json::to_string_pretty(&values)
            .map_err(|err| StoreError::Write(err.to_string()))?;
        write_atomic(&self.path, &json).map_err(|err| {
            StoreError::Write(format!("cannot write `{}`: {err}", self.path.display()))
        })?;
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
