//! Record models: raw input documents and assembled invoice records.

use serde::{Deserialize, Serialize};

/// Canonical "absent data" value for text fields.
pub const TEXT_PLACEHOLDER: &str = "N/A";

/// A raw document as delivered by the text provider.
///
/// Created once per input file and never mutated. A retrieval failure is
/// recorded here rather than surfaced as an error, so a batch is never
/// aborted by a single unreadable file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawDocument {
    /// Source filename.
    pub filename: String,
    /// Extracted raw text (empty when retrieval failed).
    pub text: String,
    /// Whether raw-text retrieval succeeded.
    pub retrieved: bool,
    /// Human-readable retrieval failure reason, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<String>,
}

impl RawDocument {
    /// A successfully retrieved document.
    pub fn new(filename: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            text: text.into(),
            retrieved: true,
            failure: None,
        }
    }

    /// A document whose raw-text retrieval failed.
    pub fn failed(filename: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            text: String::new(),
            retrieved: false,
            failure: Some(reason.into()),
        }
    }
}

/// Whether the document was judged to be an invoice at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvoiceType {
    #[serde(rename = "Invoice")]
    Invoice,
    #[serde(rename = "Not an invoice")]
    NotAnInvoice,
}

impl InvoiceType {
    pub fn label(&self) -> &'static str {
        match self {
            InvoiceType::Invoice => "Invoice",
            InvoiceType::NotAnInvoice => "Not an invoice",
        }
    }
}

/// Per-record extraction status reported to the downstream consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionStatus {
    /// All stages ran and the classifier did not report partial data.
    /// Non-invoices are still a success: the pipeline completed.
    Success,
    /// The classifier reported partial data.
    Partial,
    /// Raw-text retrieval itself failed; every field is a placeholder.
    Failed,
}

impl ExtractionStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ExtractionStatus::Success => "success",
            ExtractionStatus::Partial => "partial",
            ExtractionStatus::Failed => "failed",
        }
    }
}

/// The canonical output record, one per input document.
///
/// Every field is populated: extracted values where matching succeeded,
/// explicit placeholders (`"N/A"` for text, `0.0` for amount) otherwise.
/// Never mutated after assembly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceRecord {
    pub filename: String,
    pub vendor: String,
    pub invoice_number: String,
    /// ISO `YYYY-MM-DD`, `"N/A"` (no date found) or `"Invalid Date"`
    /// (date text found but unparseable).
    pub date: String,
    pub amount: f64,
    /// ISO currency code, or `"N/A"` when no indicator was detected.
    pub currency: String,
    pub currency_symbol: String,
    pub currency_region: String,
    pub category: String,
    pub invoice_type: InvoiceType,
    /// True iff the record carries a normalized date and a positive amount.
    pub is_complete: bool,
    pub extraction_status: ExtractionStatus,
}

/// Aggregate counts for one processed batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total: usize,
    pub success: usize,
    pub partial: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn tally(records: &[InvoiceRecord]) -> Self {
        let mut summary = Self {
            total: records.len(),
            ..Self::default()
        };
        for record in records {
            match record.extraction_status {
                ExtractionStatus::Success => summary.success += 1,
                ExtractionStatus::Partial => summary.partial += 1,
                ExtractionStatus::Failed => summary.failed += 1,
            }
        }
        summary
    }
}

/// Records plus aggregate counts: the only surface the core exposes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    pub records: Vec<InvoiceRecord>,
    pub summary: BatchSummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(status: ExtractionStatus) -> InvoiceRecord {
        InvoiceRecord {
            filename: "a.pdf".to_string(),
            vendor: TEXT_PLACEHOLDER.to_string(),
            invoice_number: TEXT_PLACEHOLDER.to_string(),
            date: TEXT_PLACEHOLDER.to_string(),
            amount: 0.0,
            currency: TEXT_PLACEHOLDER.to_string(),
            currency_symbol: String::new(),
            currency_region: "Unknown".to_string(),
            category: "Others".to_string(),
            invoice_type: InvoiceType::NotAnInvoice,
            is_complete: false,
            extraction_status: status,
        }
    }

    #[test]
    fn test_summary_counts() {
        let records = vec![
            record(ExtractionStatus::Success),
            record(ExtractionStatus::Success),
            record(ExtractionStatus::Partial),
            record(ExtractionStatus::Failed),
        ];
        let summary = BatchSummary::tally(&records);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.success, 2);
        assert_eq!(summary.partial, 1);
        assert_eq!(summary.failed, 1);
    }

    #[test]
    fn test_invoice_type_labels() {
        assert_eq!(InvoiceType::Invoice.label(), "Invoice");
        assert_eq!(InvoiceType::NotAnInvoice.label(), "Not an invoice");
    }

    #[test]
    fn test_failed_document_has_empty_text() {
        let doc = RawDocument::failed("broken.pdf", "encrypted");
        assert!(!doc.retrieved);
        assert!(doc.text.is_empty());
        assert_eq!(doc.failure.as_deref(), Some("encrypted"));
    }
}
