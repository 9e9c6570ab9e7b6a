//! Workbook export
//!
//! [`ExcelHandler`] combines several [`TableHandler`]s into a single xlsx
//! workbook, one worksheet per table in the order given. Each table's label
//! names its worksheet.

pub(crate) mod writer;

use std::fmt;
use std::path::{Path, PathBuf};

use crate::codec;
use crate::document::io::write_bytes;
use crate::error::ExcelHandlerError;
use crate::handler::Handler;
use crate::html::{DownloadLink, FileType};
use crate::table::TableHandler;
use writer::{Sheet, write_workbook};

pub use writer::MAX_SHEET_NAME_LEN;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExcelHandler {
    tables: Vec<TableHandler>,
}

impl ExcelHandler {
    pub fn new(tables: Vec<TableHandler>) -> Self {
        Self { tables }
    }

    pub fn from_table_handlers<I>(handlers: I) -> Self
    where
        I: IntoIterator<Item = TableHandler>,
    {
        Self::new(handlers.into_iter().collect())
    }

    pub fn tables(&self) -> &[TableHandler] {
        &self.tables
    }

    pub fn push(&mut self, table: TableHandler) {
        self.tables.push(table);
    }

    /// Write all tables into one workbook
    pub fn to_bytes(&self) -> Result<Vec<u8>, ExcelHandlerError> {
        let sheets: Vec<Sheet<'_>> = self
            .tables
            .iter()
            .map(|table| Sheet {
                name: table.label(),
                data: table.data(),
            })
            .collect();

        write_workbook(&sheets).inspect_err(|err| {
            tracing::warn!(tables = self.tables.len(), "could not build workbook: {err}");
        })
    }

    pub fn to_base64_str(&self) -> Result<String, ExcelHandlerError> {
        Ok(codec::encode(&self.to_bytes()?))
    }

    /// HTML anchor that downloads the workbook as `filename`
    pub fn create_download_link(&self, filename: &str) -> Result<String, ExcelHandlerError> {
        self.create_download_link_with(filename, &DownloadLink::default())
    }

    pub fn create_download_link_with(
        &self,
        filename: &str,
        link: &DownloadLink,
    ) -> Result<String, ExcelHandlerError> {
        let content = self.to_base64_str()?;
        Ok(link.render(&content, filename, FileType::Xlsx))
    }

    pub async fn write_to_local(
        &self,
        path: impl AsRef<Path>,
        filename: &str,
    ) -> Result<PathBuf, ExcelHandlerError> {
        let bytes = self.to_bytes()?;
        Ok(write_bytes(path.as_ref(), filename, &bytes).await?)
    }

    /// Number of tables
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl FromIterator<TableHandler> for ExcelHandler {
    fn from_iter<I: IntoIterator<Item = TableHandler>>(iter: I) -> Self {
        Self::from_table_handlers(iter)
    }
}

impl fmt::Display for ExcelHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ExcelHandler([TableHandler(...), ...])")
    }
}

impl Handler for ExcelHandler {
    fn file_type(&self) -> FileType {
        FileType::Xlsx
    }

    fn to_bytes(&self) -> crate::Result<Vec<u8>> {
        Ok(ExcelHandler::to_bytes(self)?)
    }

    fn len(&self) -> usize {
        ExcelHandler::len(self)
    }
}
