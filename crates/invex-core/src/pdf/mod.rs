//! Raw-text retrieval from input documents.

mod extractor;

pub use extractor::PdfTextProvider;

use std::path::Path;

use crate::error::PdfError;
use crate::models::record::RawDocument;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// A source of raw document text for the extraction pipeline.
///
/// Retrieval failure is data, not control flow: a provider always
/// returns a [`RawDocument`], recording any failure on it, so a batch
/// caller never aborts because one file is unreadable.
pub trait TextProvider {
    fn retrieve(&self, path: &Path) -> RawDocument;
}
