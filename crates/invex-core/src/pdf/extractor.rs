//! PDF text extraction using lopdf and pdf-extract.

use std::path::Path;

use lopdf::Document;
use tracing::{debug, warn};

use super::{Result, TextProvider};
use crate::error::PdfError;
use crate::models::record::RawDocument;

/// PDF-backed text provider.
///
/// lopdf handles structural concerns (parse, encryption, page count);
/// pdf-extract does the actual text extraction from the raw bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextProvider;

impl PdfTextProvider {
    pub fn new() -> Self {
        Self
    }

    /// Extract the full text of a PDF held in memory.
    pub fn extract_text(&self, data: &[u8]) -> Result<String> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // PDFs encrypted with an empty password are common in the wild;
        // decrypt and re-save so pdf_extract sees plain bytes.
        let raw_data = if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("decrypted PDF with empty password");
            let mut decrypted = Vec::new();
            doc.save_to(&mut decrypted)
                .map_err(|e| PdfError::Parse(format!("failed to save decrypted PDF: {e}")))?;
            decrypted
        } else {
            data.to_vec()
        };

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }
        debug!("loaded PDF with {} pages", page_count);

        pdf_extract::extract_text_from_mem(&raw_data)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))
    }
}

impl TextProvider for PdfTextProvider {
    fn retrieve(&self, path: &Path) -> RawDocument {
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let data = match std::fs::read(path) {
            Ok(data) => data,
            Err(e) => {
                warn!(file = %path.display(), error = %e, "could not read file");
                return RawDocument::failed(filename, e.to_string());
            }
        };

        match self.extract_text(&data) {
            Ok(text) => RawDocument::new(filename, text),
            Err(e) => {
                warn!(file = %path.display(), error = %e, "text extraction failed");
                RawDocument::failed(filename, e.to_string())
            }
        }
    }
}
