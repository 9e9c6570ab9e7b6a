//! Workbook reading
//!
//! Reads the first worksheet of an xlsx workbook into a [`DataTable`] with
//! calamine. The first non-empty row becomes the header row. Columns count
//! from column A, so a sheet starting at column C has two leading
//! `Unnamed` columns of nulls.

use std::io::Cursor;

use calamine::{Data, Reader, Xlsx};
use serde_json::Value;

use super::models::DataTable;
use crate::error::TableHandlerError;

/// Read the first worksheet, returning its name and contents
pub(crate) fn read_first_sheet(bytes: Vec<u8>) -> Result<(String, DataTable), TableHandlerError> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or(TableHandlerError::Malformed)?;
    let range = workbook.worksheet_range(&sheet_name)?;

    // Used range origin; calamine drops empty leading rows and columns
    let leading_columns = range.start().map_or(0, |(_, col)| col as usize);
    let table = table_from_rows(leading_columns, range.rows());
    tracing::debug!(sheet = %sheet_name, shape = ?table.shape(), "read worksheet");
    Ok((sheet_name, table))
}

/// Header row plus data rows, shifted right by `leading_columns` empty cells
fn table_from_rows<'a>(
    leading_columns: usize,
    mut rows: impl Iterator<Item = &'a [Data]>,
) -> DataTable {
    let Some(header) = rows.next() else {
        return DataTable::default();
    };

    let columns = (0..leading_columns)
        .map(|index| header_name(index, &Data::Empty))
        .chain(
            header
                .iter()
                .enumerate()
                .map(|(index, cell)| header_name(leading_columns + index, cell)),
        )
        .collect();
    let data = rows
        .map(|row| {
            std::iter::repeat_n(Value::Null, leading_columns)
                .chain(row.iter().map(cell_to_value))
                .collect()
        })
        .collect();

    DataTable::new(columns, data)
}

fn header_name(index: usize, cell: &Data) -> String {
    match cell {
        Data::Empty => format!("Unnamed: {index}"),
        Data::String(s) if s.trim().is_empty() => format!("Unnamed: {index}"),
        Data::String(s) => s.clone(),
        Data::Float(f) => match float_to_value(*f) {
            Value::Number(n) => n.to_string(),
            _ => f.to_string(),
        },
        other => other.to_string(),
    }
}

pub(crate) fn cell_to_value(cell: &Data) -> Value {
    match cell {
        Data::Empty | Data::Error(_) => Value::Null,
        Data::Int(i) => Value::from(*i),
        Data::Float(f) => float_to_value(*f),
        Data::Bool(b) => Value::Bool(*b),
        Data::String(s) => Value::String(s.clone()),
        other => Value::String(other.to_string()),
    }
}

/// Whole floats come back as integers; xlsx stores every number as a double
fn float_to_value(f: f64) -> Value {
    if f.fract() == 0.0 && f.abs() < 9.0e15 {
        Value::from(f as i64)
    } else {
        serde_json::Number::from_f64(f).map_or(Value::Null, Value::Number)
    }
}
