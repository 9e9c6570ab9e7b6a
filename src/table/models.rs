//! In-memory tabular data
//!
//! A [`DataTable`] is a list of named columns over rectangular rows of JSON
//! values. `null` marks a missing cell.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::TableHandlerError;

/// One row keyed by column name, in column order
pub type Record = serde_json::Map<String, Value>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawDataTable")]
pub struct DataTable {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

/// Wire form of [`DataTable`]; rows are squared up on conversion
#[derive(Deserialize)]
struct RawDataTable {
    #[serde(default)]
    columns: Vec<String>,
    #[serde(default)]
    rows: Vec<Vec<Value>>,
}

impl From<RawDataTable> for DataTable {
    fn from(raw: RawDataTable) -> Self {
        Self::new(raw.columns, raw.rows)
    }
}

impl DataTable {
    /// Build a table; rows are padded with `null` or truncated to the column count
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, Value::Null);
                row
            })
            .collect();

        Self { columns, rows }
    }

    /// Build from rows alone; columns are numbered `"0"`, `"1"`, ... over the widest row
    pub fn from_rows(rows: Vec<Vec<Value>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        let columns = (0..width).map(|i| i.to_string()).collect();
        Self::new(columns, rows)
    }

    /// Build from records; columns are the union of keys in first-seen order
    pub fn from_records(records: &[Record]) -> Self {
        let mut columns: Vec<String> = Vec::new();
        for record in records {
            for key in record.keys() {
                if !columns.iter().any(|column| column == key) {
                    columns.push(key.clone());
                }
            }
        }

        let rows = records
            .iter()
            .map(|record| {
                columns
                    .iter()
                    .map(|column| record.get(column).cloned().unwrap_or(Value::Null))
                    .collect()
            })
            .collect();

        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// `(rows, columns)`
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.columns.len())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    pub fn to_records(&self) -> Vec<Record> {
        self.rows
            .iter()
            .map(|row| {
                self.columns
                    .iter()
                    .cloned()
                    .zip(row.iter().cloned())
                    .collect()
            })
            .collect()
    }

    /// Replace the column names; the count must match
    pub fn set_columns(&mut self, columns: Vec<String>) -> Result<(), TableHandlerError> {
        if columns.len() != self.columns.len() {
            return Err(TableHandlerError::ColumnCountMismatch {
                expected: self.columns.len(),
                found: columns.len(),
            });
        }
        self.columns = columns;
        Ok(())
    }

    /// Rename columns by `(old, new)` pairs, then keep only the new names in
    /// mapping order
    pub fn rename_and_select(
        self,
        mapping: &[(String, String)],
    ) -> Result<Self, TableHandlerError> {
        let renamed: Vec<&str> = self
            .columns
            .iter()
            .map(|column| {
                mapping
                    .iter()
                    .find(|(old, _)| old == column)
                    .map_or(column.as_str(), |(_, new)| new.as_str())
            })
            .collect();

        let mut indices = Vec::with_capacity(mapping.len());
        for (_, new) in mapping {
            let index = renamed
                .iter()
                .position(|column| column == new)
                .ok_or_else(|| TableHandlerError::MissingColumn(new.clone()))?;
            indices.push(index);
        }

        let columns = mapping.iter().map(|(_, new)| new.clone()).collect();
        let rows = self
            .rows
            .iter()
            .map(|row| {
                indices
                    .iter()
                    .map(|&i| row.get(i).cloned().unwrap_or(Value::Null))
                    .collect()
            })
            .collect();

        Ok(Self { columns, rows })
    }
}
