//! The end-to-end extraction pipeline and record assembly.

use tracing::{debug, info};

use crate::error::ConfigError;
use crate::models::config::{ClassifierThresholds, ExtractionConfig};
use crate::models::record::{
    BatchReport, BatchSummary, ExtractionStatus, InvoiceRecord, InvoiceType, RawDocument,
    TEXT_PLACEHOLDER,
};

use super::amounts::parse_amount;
use super::category::{categorize, CATEGORY_OTHERS};
use super::classify::{classify, Completeness};
use super::currency::detect_currency;
use super::dates::{normalize_date, DATE_INVALID};
use super::engine::extract_field;
use super::normalize::normalize_text;
use super::patterns::PatternLibrary;
use super::Field;

/// The compiled pipeline: pattern library plus classifier thresholds.
///
/// Construction validates all configuration up front; after that the
/// pipeline is immutable and every per-document stage is infallible.
/// Shared by reference across callers.
#[derive(Debug, Clone)]
pub struct ExtractionPipeline {
    library: PatternLibrary,
    thresholds: ClassifierThresholds,
}

impl ExtractionPipeline {
    /// Compile a pipeline from configuration. Pattern compilation errors
    /// are fatal here, before any document is touched.
    pub fn new(config: &ExtractionConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            library: PatternLibrary::compile(&config.patterns)?,
            thresholds: config.classifier,
        })
    }

    /// Run every stage on one document's raw text and assemble the record.
    ///
    /// Pure and infallible: the same text always yields the same record,
    /// and absent fields resolve to placeholders instead of errors.
    pub fn parse_text(&self, filename: &str, raw_text: &str) -> InvoiceRecord {
        let text = normalize_text(raw_text);

        let vendor_field = extract_field(&self.library, Field::Vendor, &text);
        let number_field = extract_field(&self.library, Field::InvoiceNumber, &text);
        let date_field = extract_field(&self.library, Field::Date, &text);
        let amount_field = extract_field(&self.library, Field::Amount, &text);

        let vendor = vendor_field
            .raw
            .unwrap_or_else(|| TEXT_PLACEHOLDER.to_string());
        let invoice_number = number_field
            .raw
            .unwrap_or_else(|| TEXT_PLACEHOLDER.to_string());

        // A date that matched but does not parse is "Invalid Date", which
        // is distinct from "N/A" (nothing date-like was found).
        let date = match date_field.raw {
            Some(raw) => normalize_date(&raw),
            None => TEXT_PLACEHOLDER.to_string(),
        };

        let amount = amount_field.raw.as_deref().map(parse_amount).unwrap_or(0.0);

        let (currency, currency_symbol, currency_region) = match detect_currency(&text) {
            Some(entry) => (
                entry.code.to_string(),
                entry.symbol.to_string(),
                entry.region.to_string(),
            ),
            None => (TEXT_PLACEHOLDER.to_string(), String::new(), "Unknown".to_string()),
        };

        let category = categorize(&vendor, &text, self.library.categories());

        let classification = classify(
            &vendor,
            &invoice_number,
            amount,
            self.library.has_invoice_keyword(&text),
            &self.thresholds,
        );

        let is_complete = date != TEXT_PLACEHOLDER && date != DATE_INVALID && amount > 0.0;

        let extraction_status = match classification.completeness {
            Completeness::Partial => ExtractionStatus::Partial,
            Completeness::Complete | Completeness::NotApplicable => ExtractionStatus::Success,
        };

        debug!(
            filename,
            vendor = vendor.as_str(),
            score = classification.score,
            invoice_type = classification.invoice_type.label(),
            "document parsed"
        );

        InvoiceRecord {
            filename: filename.to_string(),
            vendor,
            invoice_number,
            date,
            amount,
            currency,
            currency_symbol,
            currency_region,
            category,
            invoice_type: classification.invoice_type,
            is_complete,
            extraction_status,
        }
    }

    /// Process one raw document, honoring upstream retrieval failures.
    ///
    /// A document whose raw-text retrieval failed still yields a record:
    /// all placeholders, status `failed`.
    pub fn process(&self, document: &RawDocument) -> InvoiceRecord {
        if !document.retrieved {
            return InvoiceRecord {
                filename: document.filename.clone(),
                vendor: TEXT_PLACEHOLDER.to_string(),
                invoice_number: TEXT_PLACEHOLDER.to_string(),
                date: TEXT_PLACEHOLDER.to_string(),
                amount: 0.0,
                currency: TEXT_PLACEHOLDER.to_string(),
                currency_symbol: String::new(),
                currency_region: "Unknown".to_string(),
                category: CATEGORY_OTHERS.to_string(),
                invoice_type: InvoiceType::NotAnInvoice,
                is_complete: false,
                extraction_status: ExtractionStatus::Failed,
            };
        }

        self.parse_text(&document.filename, &document.text)
    }

    /// Process a whole batch. Always returns exactly one record per input
    /// document, in input order; a bad document never aborts the batch.
    pub fn process_batch(&self, documents: &[RawDocument]) -> BatchReport {
        let records: Vec<InvoiceRecord> =
            documents.iter().map(|doc| self.process(doc)).collect();
        let summary = BatchSummary::tally(&records);

        info!(
            total = summary.total,
            success = summary.success,
            partial = summary.partial,
            failed = summary.failed,
            "batch processed"
        );

        BatchReport { records, summary }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn pipeline() -> ExtractionPipeline {
        ExtractionPipeline::new(&ExtractionConfig::default()).unwrap()
    }

    #[test]
    fn test_empty_text_yields_placeholder_record() {
        let record = pipeline().parse_text("empty.pdf", "");
        assert_eq!(record.vendor, "N/A");
        assert_eq!(record.invoice_number, "N/A");
        assert_eq!(record.date, "N/A");
        assert_eq!(record.amount, 0.0);
        assert_eq!(record.currency, "N/A");
        assert_eq!(record.currency_region, "Unknown");
        assert_eq!(record.category, "Others");
        assert_eq!(record.invoice_type, InvoiceType::NotAnInvoice);
        assert!(!record.is_complete);
        assert_eq!(record.extraction_status, ExtractionStatus::Success);
    }

    #[test]
    fn test_invalid_date_blocks_completeness() {
        let text = "Invoice Number: X-123\nDate: 99/99/2024\nTotal: ₹400\n";
        let record = pipeline().parse_text("a.pdf", text);
        assert_eq!(record.date, "Invalid Date");
        assert!(record.amount > 0.0);
        assert!(!record.is_complete);
    }

    #[test]
    fn test_partial_status_from_classifier() {
        // Amount alone: score 2, Invoice/Partial.
        let record = pipeline().parse_text("a.pdf", "grand total: 450.00\n");
        assert_eq!(record.invoice_type, InvoiceType::Invoice);
        assert_eq!(record.extraction_status, ExtractionStatus::Partial);
    }

    #[test]
    fn test_failed_retrieval_still_produces_record() {
        let doc = RawDocument::failed("broken.pdf", "encrypted");
        let record = pipeline().process(&doc);
        assert_eq!(record.filename, "broken.pdf");
        assert_eq!(record.extraction_status, ExtractionStatus::Failed);
        assert_eq!(record.vendor, "N/A");
        assert!(!record.is_complete);
    }

    #[test]
    fn test_batch_never_aborts() {
        let docs = vec![
            RawDocument::new("a.txt", "INVOICE\nFrom: Swiggy\nTotal: ₹400\n"),
            RawDocument::failed("b.pdf", "no pages"),
            RawDocument::new("c.txt", ""),
        ];
        let report = pipeline().process_batch(&docs);
        assert_eq!(report.records.len(), 3);
        assert_eq!(report.summary.total, 3);
        assert_eq!(report.summary.failed, 1);
        assert_eq!(report.records[1].extraction_status, ExtractionStatus::Failed);
    }

    #[test]
    fn test_idempotent_on_same_text() {
        let text = "INVOICE\nFrom: Swiggy\nInvoice Number: SWG-12345\nDate: 07/12/2024\nTotal: ₹400\n";
        let p = pipeline();
        assert_eq!(p.parse_text("x.pdf", text), p.parse_text("x.pdf", text));
    }
}
