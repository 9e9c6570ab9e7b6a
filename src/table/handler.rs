//! Table handler
//!
//! A [`TableHandler`] pairs a [`DataTable`] with a label. The label becomes
//! the worksheet name when tables are written into a workbook by
//! [`ExcelHandler`](crate::excel::ExcelHandler).

use std::fmt;
use std::io::Read;
use std::path::Path;

use super::models::{DataTable, Record};
use super::reader::read_first_sheet;
use crate::error::TableHandlerError;

#[derive(Debug, Clone, PartialEq)]
pub struct TableHandler {
    data: DataTable,
    label: String,
}

impl TableHandler {
    pub fn new(data: DataTable, label: impl Into<String>) -> Self {
        Self {
            data,
            label: label.into(),
        }
    }

    /// Build from records
    ///
    /// `col_headers` is an ordered `(old, new)` rename map. When given, the
    /// columns are renamed and only the new names are kept, in map order.
    pub fn from_records(
        records: &[Record],
        col_headers: Option<&[(String, String)]>,
        label: impl Into<String>,
    ) -> Result<Self, TableHandlerError> {
        let mut data = DataTable::from_records(records);
        if let Some(mapping) = col_headers.filter(|mapping| !mapping.is_empty()) {
            data = data.rename_and_select(mapping)?;
        }
        Ok(Self::new(data, label))
    }

    /// Build from rows of values, optionally naming the columns
    pub fn from_list(
        rows: Vec<Vec<serde_json::Value>>,
        col_headers: Option<Vec<String>>,
        label: impl Into<String>,
    ) -> Result<Self, TableHandlerError> {
        let mut data = DataTable::from_rows(rows);
        if let Some(headers) = col_headers.filter(|headers| !headers.is_empty()) {
            data.set_columns(headers)?;
        }
        Ok(Self::new(data, label))
    }

    /// Read the first worksheet of an xlsx workbook; the label is the sheet name
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, TableHandlerError> {
        let (label, data) = read_first_sheet(bytes).inspect_err(|err| {
            tracing::warn!("rejected workbook: {err}");
        })?;
        Ok(Self::new(data, label))
    }

    /// Load from an uploaded file-like object
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, TableHandlerError> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Self::from_bytes(bytes)
    }

    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, TableHandlerError> {
        let bytes = tokio::fs::read(path.as_ref()).await?;
        Self::from_bytes(bytes)
    }

    pub fn data(&self) -> &DataTable {
        &self.data
    }

    pub fn into_data(self) -> DataTable {
        self.data
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Column names, in order
    pub fn schema(&self) -> &[String] {
        self.data.columns()
    }

    pub fn records(&self) -> Vec<Record> {
        self.data.to_records()
    }

    /// Number of data rows
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl fmt::Display for TableHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (rows, columns) = self.data.shape();
        let schema = self
            .schema()
            .iter()
            .map(|column| format!("'{column}'"))
            .collect::<Vec<_>>()
            .join(", ");
        write!(
            f,
            "TableHandler(df=(({rows}, {columns})), [{schema}], {})",
            self.label
        )
    }
}
