//! xfilios: document and spreadsheet conversion for web front ends
//!
//! This library wraps Word documents and spreadsheet tables so they can be
//! moved between uploads, bytes, base64 strings and data-URI download links.

pub mod codec;
pub mod config;
pub mod document;
pub mod error;
pub mod excel;
pub mod handler;
pub mod html;
pub mod logging;
pub mod table;

/// Payload kind accepted on the command line
#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileKind {
    Docx,
    Xlsx,
}

impl From<FileKind> for html::FileType {
    fn from(kind: FileKind) -> Self {
        match kind {
            FileKind::Docx => html::FileType::Docx,
            FileKind::Xlsx => html::FileType::Xlsx,
        }
    }
}

// Re-export commonly used types
pub use config::Config;
pub use document::{DocumentStats, DocxHandler};
pub use error::{
    DocxHandlerError, Error, ExcelHandlerError, FileTypeError, Result, TableHandlerError,
};
pub use excel::ExcelHandler;
pub use handler::Handler;
pub use html::{DownloadLink, FileType, create_download_link};
pub use table::{DataTable, Record, TableHandler};
