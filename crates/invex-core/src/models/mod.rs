//! Data models: input documents, output records, configuration.

pub mod config;
pub mod record;

pub use config::{ClassifierThresholds, ExtractionConfig};
pub use record::{
    BatchReport, BatchSummary, ExtractionStatus, InvoiceRecord, InvoiceType, RawDocument,
    TEXT_PLACEHOLDER,
};
