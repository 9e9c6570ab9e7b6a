//! Document parsing utilities
//!
//! This module contains the text and table extraction functions used on
//! parsed docx-rs documents.

pub(crate) mod table;
pub(crate) mod text;
