//! Score-based document classification.

use crate::models::config::ClassifierThresholds;
use crate::models::record::{InvoiceType, TEXT_PLACEHOLDER};

/// How complete the extracted evidence is. Only meaningful for documents
/// classified as invoices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completeness {
    Complete,
    Partial,
    /// The document is not an invoice; completeness does not apply.
    NotApplicable,
}

/// Classifier verdict with the evidence score that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub invoice_type: InvoiceType,
    pub completeness: Completeness,
    pub score: u32,
}

/// Classify a document from its extracted fields.
///
/// Evidence is additive and no single signal is decisive:
/// a plausible vendor scores 1, an invoice number 2, a positive amount 2,
/// and an invoice keyword anywhere in the text 1. A score at or above the
/// complete threshold is a complete invoice, at or above the partial
/// threshold a partial one, and anything below is not an invoice.
pub fn classify(
    vendor: &str,
    invoice_number: &str,
    amount: f64,
    has_invoice_keyword: bool,
    thresholds: &ClassifierThresholds,
) -> Classification {
    let mut score = 0;

    if vendor != TEXT_PLACEHOLDER && vendor.len() > 2 {
        score += 1;
    }
    if invoice_number != TEXT_PLACEHOLDER {
        score += 2;
    }
    if amount > 0.0 {
        score += 2;
    }
    if has_invoice_keyword {
        score += 1;
    }

    if score >= thresholds.complete_score {
        Classification {
            invoice_type: InvoiceType::Invoice,
            completeness: Completeness::Complete,
            score,
        }
    } else if score >= thresholds.partial_score {
        Classification {
            invoice_type: InvoiceType::Invoice,
            completeness: Completeness::Partial,
            score,
        }
    } else {
        Classification {
            invoice_type: InvoiceType::NotAnInvoice,
            completeness: Completeness::NotApplicable,
            score,
        }
    }
}
