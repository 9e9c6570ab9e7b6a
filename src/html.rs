//! Data-URI download links
//!
//! Front ends render these anchors directly; the payload is embedded as
//! base64 so no extra request is needed to download the file.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FileTypeError;

pub const DEFAULT_LINK_TEXT: &str = "Click To Download";
pub const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

/// File types a download link can be created for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Docx,
    Xlsx,
}

impl FileType {
    pub fn extension(&self) -> &'static str {
        match self {
            FileType::Docx => "docx",
            FileType::Xlsx => "xlsx",
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for FileType {
    type Err = FileTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "docx" => Ok(FileType::Docx),
            "xlsx" => Ok(FileType::Xlsx),
            other => Err(FileTypeError::new(other)),
        }
    }
}

/// Presentation options for a download anchor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DownloadLink {
    /// Text shown inside the anchor
    pub text: String,
    /// MIME type of the data URI
    pub mime: String,
}

impl Default for DownloadLink {
    fn default() -> Self {
        Self {
            text: DEFAULT_LINK_TEXT.to_string(),
            mime: DEFAULT_MIME_TYPE.to_string(),
        }
    }
}

impl DownloadLink {
    /// Render an anchor tag for an already base64-encoded payload
    pub fn render(&self, base64_str: &str, filename: &str, filetype: FileType) -> String {
        tracing::debug!(
            %filetype,
            filename,
            payload_len = base64_str.len(),
            "creating download link"
        );
        format!(
            r#"<a href="data:{};base64,{}" download="{}">{}</a>"#,
            escape_attribute(&self.mime),
            base64_str,
            escape_attribute(filename),
            escape_text(&self.text)
        )
    }
}

/// Create a download anchor for `filetype` ("docx" or "xlsx")
///
/// The file type is checked before anything is rendered, so an unsupported
/// type never produces a link.
pub fn create_download_link(
    base64_str: &str,
    filename: &str,
    filetype: &str,
) -> Result<String, FileTypeError> {
    let filetype = filetype.parse::<FileType>().inspect_err(|err| {
        tracing::warn!("{err}");
    })?;
    Ok(DownloadLink::default().render(base64_str, filename, filetype))
}

fn escape_attribute(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
