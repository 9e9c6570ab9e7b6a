//! Word document handling
//!
//! This module loads Microsoft Word (.docx) documents from uploads, bytes,
//! base64 or disk and serializes them back for download.

mod handler;
pub(crate) mod io;
pub mod models;
pub(crate) mod parsing;

pub use handler::{DEFAULT_DOCUMENT_NAME, DocxHandler};
pub use models::*;
