//! Data structures describing a loaded document

use serde::{Deserialize, Serialize};

/// Summary counts for a document's body
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentStats {
    /// Body-level tables
    pub tables: usize,
    /// Body-level paragraphs with non-whitespace text
    pub paragraphs: usize,
}
