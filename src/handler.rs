//! Common contract for document handlers

use std::fmt;

use crate::codec;
use crate::error::Result;
use crate::html::{DownloadLink, FileType};

/// A handler owns one in-memory file and knows how to serialize it
pub trait Handler: fmt::Display + fmt::Debug {
    /// Type used when rendering download links
    fn file_type(&self) -> FileType;

    /// Serialize the handled file into its on-disk representation
    fn to_bytes(&self) -> Result<Vec<u8>>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn to_base64_str(&self) -> Result<String> {
        Ok(codec::encode(&self.to_bytes()?))
    }

    /// HTML anchor that downloads the file as `filename`
    fn create_download_link(&self, filename: &str) -> Result<String> {
        self.create_download_link_with(filename, &DownloadLink::default())
    }

    fn create_download_link_with(&self, filename: &str, link: &DownloadLink) -> Result<String> {
        let content = self.to_base64_str()?;
        Ok(link.render(&content, filename, self.file_type()))
    }
}
