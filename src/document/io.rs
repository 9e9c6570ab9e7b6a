//! Package validation and file I/O
//!
//! This module checks uploaded bytes before they reach the docx parser and
//! handles reading and writing documents on disk.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use zip::ZipArchive;

use crate::error::DocxHandlerError;

/// Validates that the bytes are a legitimate .docx package
pub(crate) fn validate_docx_bytes(bytes: &[u8]) -> Result<(), DocxHandlerError> {
    if bytes.is_empty() {
        return Err(DocxHandlerError::Malformed);
    }

    // Check ZIP structure contains word/document.xml
    let mut archive = ZipArchive::new(Cursor::new(bytes)).map_err(|_| {
        DocxHandlerError::InvalidPackage(
            "Invalid .docx file: not a ZIP package\n\
            Only Word .docx documents are supported (not .doc, .rtf, etc.)"
                .to_string(),
        )
    })?;

    if archive.by_name("word/document.xml").is_err() {
        // Check if it might be an Excel file
        if archive.by_name("xl/workbook.xml").is_ok() {
            return Err(DocxHandlerError::InvalidPackage(
                "This appears to be an Excel file (.xlsx).\n\
                Use TableHandler for spreadsheets."
                    .to_string(),
            ));
        }

        return Err(DocxHandlerError::InvalidPackage(
            "Invalid .docx file: missing word/document.xml\n\
            This file may be corrupted or is not a valid Word document."
                .to_string(),
        ));
    }

    Ok(())
}

/// File name component of `path`, used as a handler name
pub(crate) fn file_name_of(path: &Path) -> Option<String> {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
}

/// Write `bytes` to `dir/filename`, returning the full path
pub(crate) async fn write_bytes(
    dir: &Path,
    filename: &str,
    bytes: &[u8],
) -> std::io::Result<PathBuf> {
    let full_path = dir.join(filename);
    tokio::fs::write(&full_path, bytes).await?;
    tracing::debug!(path = %full_path.display(), size = bytes.len(), "wrote file");
    Ok(full_path)
}
