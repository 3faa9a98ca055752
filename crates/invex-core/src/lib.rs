//! Core library for invoice text extraction.
//!
//! This crate provides:
//! - PDF raw-text retrieval (lopdf + pdf-extract)
//! - Ranked-pattern field extraction (vendor, invoice number, date, amount)
//! - Value normalization (dates, amounts, currency detection)
//! - Score-based invoice classification and vendor categorization
//! - Batch record assembly that never aborts on a bad document

pub mod error;
pub mod extract;
pub mod models;
pub mod pdf;

pub use error::{ConfigError, InvexError, PdfError, Result};
pub use extract::{ExtractionPipeline, PatternLibrary, PatternTables};
pub use models::{
    BatchReport, BatchSummary, ClassifierThresholds, ExtractionConfig, ExtractionStatus,
    InvoiceRecord, InvoiceType, RawDocument,
};
pub use pdf::{PdfTextProvider, TextProvider};
