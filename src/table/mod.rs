//! Tabular data handling
//!
//! Tables come from records, plain rows, or the first sheet of an uploaded
//! workbook, and are exported through [`ExcelHandler`](crate::excel::ExcelHandler).

mod handler;
pub mod models;
pub(crate) mod reader;

pub use handler::TableHandler;
pub use models::{DataTable, Record};
