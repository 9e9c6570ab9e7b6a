//! Error types for every handler
//!
//! Each handler has its own error type so callers can tell a malformed
//! upload apart from an unsupported download type. [`Error`] unifies them for
//! the [`Handler`](crate::handler::Handler) trait.

use thiserror::Error;

/// Accepted download file types, in the order they are reported
pub const ACCEPTED_FILE_TYPES: [&str; 2] = ["docx", "xlsx"];

pub type Result<T> = std::result::Result<T, Error>;

/// Raised when a download link is requested for an unsupported file type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "{filetype} is not an accepted file type. Only accepted file types are {}",
    ACCEPTED_FILE_TYPES.join(", ")
)]
pub struct FileTypeError {
    pub filetype: String,
}

impl FileTypeError {
    pub fn new(filetype: impl Into<String>) -> Self {
        Self {
            filetype: filetype.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum DocxHandlerError {
    #[error(
        "Could not read the content from docx file, either no content in the file or it is malformed."
    )]
    Malformed,

    #[error("{0}")]
    InvalidPackage(String),

    #[error("failed to parse docx: {0}")]
    Parse(#[from] docx_rs::ReaderError),

    #[error("failed to serialize docx: {0}")]
    Write(String),

    #[error("invalid base64 payload: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum TableHandlerError {
    #[error(
        "Could not read the content from excel file, either no excel sheet provided, or it is malformed."
    )]
    Malformed,

    #[error("Length of col_headers does not match with the length of DataFrame columns")]
    ColumnCountMismatch { expected: usize, found: usize },

    #[error("column {0:?} not found after renaming")]
    MissingColumn(String),

    #[error("failed to read workbook: {0}")]
    Read(#[from] calamine::XlsxError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ExcelHandlerError {
    #[error("Workbook must contain at least one sheet")]
    EmptyWorkbook,

    #[error("invalid sheet name {name:?}: {reason}")]
    InvalidSheetName { name: String, reason: &'static str },

    #[error("duplicate sheet name {0:?}")]
    DuplicateSheetName(String),

    #[error("failed to write workbook: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Crate-wide error
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    FileType(#[from] FileTypeError),

    #[error(transparent)]
    Docx(#[from] DocxHandlerError),

    #[error(transparent)]
    Table(#[from] TableHandlerError),

    #[error(transparent)]
    Excel(#[from] ExcelHandlerError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_type_error_message() {
        let err = FileTypeError::new("pdf");
        assert_eq!(
            err.to_string(),
            "pdf is not an accepted file type. Only accepted file types are docx, xlsx"
        );
    }

    #[test]
    fn test_default_messages() {
        assert!(
            DocxHandlerError::Malformed
                .to_string()
                .starts_with("Could not read the content from docx file")
        );
        assert!(
            TableHandlerError::Malformed
                .to_string()
                .starts_with("Could not read the content from excel file")
        );
    }

    #[test]
    fn test_error_wraps_transparently() {
        let err: Error = ExcelHandlerError::EmptyWorkbook.into();
        assert_eq!(err.to_string(), "Workbook must contain at least one sheet");
    }
}
