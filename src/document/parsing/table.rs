//! Table extraction
//!
//! This module turns Word tables into [`DataTable`]s. The first row of a
//! Word table is taken as the header row.

use serde_json::Value;

use super::text::extract_cell_text;
use crate::table::DataTable;

/// Extract the raw cell text of every row of a docx-rs Table
pub(crate) fn extract_table_rows(table: &docx_rs::Table) -> Vec<Vec<String>> {
    let mut rows = Vec::new();

    for table_child in &table.rows {
        let docx_rs::TableChild::TableRow(row) = table_child;
        let mut row_cells = Vec::new();

        for row_child in &row.cells {
            let docx_rs::TableRowChild::TableCell(cell) = row_child;
            row_cells.push(extract_cell_text(cell).trim().to_string());
        }

        if !row_cells.is_empty() {
            rows.push(row_cells);
        }
    }

    rows
}

/// Convert a docx-rs Table into a DataTable using its first row as headers
pub(crate) fn extract_table_data(table: &docx_rs::Table) -> DataTable {
    let mut rows = extract_table_rows(table).into_iter();

    let Some(headers) = rows.next() else {
        return DataTable::default();
    };

    let headers = headers
        .into_iter()
        .enumerate()
        .map(|(index, header)| {
            if header.is_empty() {
                format!("Unnamed: {index}")
            } else {
                header
            }
        })
        .collect();

    let data_rows = rows
        .map(|row| row.into_iter().map(Value::String).collect())
        .collect();

    DataTable::new(headers, data_rows)
}
