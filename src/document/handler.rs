//! Word document handler
//!
//! [`DocxHandler`] owns a parsed docx-rs document and converts it to bytes,
//! base64 and download links, and back.

use std::fmt;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};

use docx_rs::Docx;

use super::io::{file_name_of, validate_docx_bytes, write_bytes};
use super::models::DocumentStats;
use super::parsing::table::extract_table_data;
use super::parsing::text::extract_paragraph_text;
use crate::codec;
use crate::error::DocxHandlerError;
use crate::handler::Handler;
use crate::html::{DownloadLink, FileType};
use crate::table::TableHandler;

/// Name given to documents decoded without a file name
pub const DEFAULT_DOCUMENT_NAME: &str = "document";

#[derive(Clone)]
pub struct DocxHandler {
    document: Docx,
    name: String,
}

impl DocxHandler {
    pub fn new(document: Docx, name: impl Into<String>) -> Self {
        Self {
            document,
            name: name.into(),
        }
    }

    /// Parse a .docx package held in memory
    pub fn from_bytes(bytes: &[u8], name: impl Into<String>) -> Result<Self, DocxHandlerError> {
        let name = name.into();
        validate_docx_bytes(bytes).inspect_err(|err| {
            tracing::warn!(name = %name, "rejected document: {err}");
        })?;

        let document = docx_rs::read_docx(bytes)?;
        tracing::debug!(name = %name, size = bytes.len(), "loaded document");
        Ok(Self::new(document, name))
    }

    /// Load from an uploaded file-like object
    pub fn from_reader<R: Read>(
        mut reader: R,
        name: impl Into<String>,
    ) -> Result<Self, DocxHandlerError> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Self::from_bytes(&bytes, name)
    }

    /// Load from disk; the handler is named after the file
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, DocxHandlerError> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let name = file_name_of(path).unwrap_or_else(|| DEFAULT_DOCUMENT_NAME.to_string());
        Self::from_bytes(&bytes, name)
    }

    /// Decode a base64 payload; an absent or empty filename falls back to
    /// [`DEFAULT_DOCUMENT_NAME`]
    pub fn from_base64(b64_str: &str, filename: Option<&str>) -> Result<Self, DocxHandlerError> {
        Self::from_base64_or(b64_str, filename, DEFAULT_DOCUMENT_NAME)
    }

    /// Like [`DocxHandler::from_base64`] with a caller-chosen fallback name
    pub fn from_base64_or(
        b64_str: &str,
        filename: Option<&str>,
        default_name: &str,
    ) -> Result<Self, DocxHandlerError> {
        let bytes = codec::decode(b64_str)?;
        let name = filename
            .filter(|name| !name.is_empty())
            .unwrap_or(default_name);
        Self::from_bytes(&bytes, name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn document(&self) -> &Docx {
        &self.document
    }

    pub fn into_document(self) -> Docx {
        self.document
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, DocxHandlerError> {
        let mut buffer = Cursor::new(Vec::new());
        self.document
            .clone()
            .build()
            .pack(&mut buffer)
            .map_err(|e| DocxHandlerError::Write(e.to_string()))?;

        let bytes = buffer.into_inner();
        tracing::debug!(name = %self.name, size = bytes.len(), "serialized document");
        Ok(bytes)
    }

    pub fn to_base64_str(&self) -> Result<String, DocxHandlerError> {
        Ok(codec::encode(&self.to_bytes()?))
    }

    pub async fn write_to_local(
        &self,
        path: impl AsRef<Path>,
        filename: &str,
    ) -> Result<PathBuf, DocxHandlerError> {
        let bytes = self.to_bytes()?;
        Ok(write_bytes(path.as_ref(), filename, &bytes).await?)
    }

    /// HTML anchor that downloads this document as `filename`
    pub fn create_download_link(&self, filename: &str) -> Result<String, DocxHandlerError> {
        self.create_download_link_with(filename, &DownloadLink::default())
    }

    pub fn create_download_link_with(
        &self,
        filename: &str,
        link: &DownloadLink,
    ) -> Result<String, DocxHandlerError> {
        let content = self.to_base64_str()?;
        Ok(link.render(&content, filename, FileType::Docx))
    }

    /// Text of each body paragraph that is not blank, trimmed
    pub fn paragraphs(&self) -> Vec<String> {
        self.document
            .document
            .children
            .iter()
            .filter_map(|child| match child {
                docx_rs::DocumentChild::Paragraph(para) => {
                    let text = extract_paragraph_text(para);
                    let text = text.trim();
                    (!text.is_empty()).then(|| text.to_string())
                }
                _ => None,
            })
            .collect()
    }

    pub fn table_count(&self) -> usize {
        self.document
            .document
            .children
            .iter()
            .filter(|child| matches!(child, docx_rs::DocumentChild::Table(_)))
            .count()
    }

    /// Convert every body table into a [`TableHandler`] labelled `Table {n}`
    pub fn table_handlers(&self) -> Vec<TableHandler> {
        self.document
            .document
            .children
            .iter()
            .filter_map(|child| match child {
                docx_rs::DocumentChild::Table(table) => Some(extract_table_data(table)),
                _ => None,
            })
            .enumerate()
            .map(|(index, data)| TableHandler::new(data, format!("Table {}", index + 1)))
            .collect()
    }

    pub fn stats(&self) -> DocumentStats {
        DocumentStats {
            tables: self.table_count(),
            paragraphs: self.len(),
        }
    }

    /// Number of body paragraphs that contain text
    pub fn len(&self) -> usize {
        self.document
            .document
            .children
            .iter()
            .filter(|child| match child {
                docx_rs::DocumentChild::Paragraph(para) => {
                    !extract_paragraph_text(para).trim().is_empty()
                }
                _ => false,
            })
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for DocxHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, r#"DocxHandler(document="...", name={})"#, self.name)
    }
}

// The document tree is too large to be useful in debug output
impl fmt::Debug for DocxHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocxHandler")
            .field("name", &self.name)
            .field("stats", &self.stats())
            .finish_non_exhaustive()
    }
}

impl Handler for DocxHandler {
    fn file_type(&self) -> FileType {
        FileType::Docx
    }

    fn to_bytes(&self) -> crate::Result<Vec<u8>> {
        Ok(DocxHandler::to_bytes(self)?)
    }

    fn len(&self) -> usize {
        DocxHandler::len(self)
    }
}
