//! Field extraction: text normalization, the ranked pattern engine,
//! value normalizers, classification and categorization.

pub mod amounts;
pub mod category;
pub mod classify;
pub mod currency;
pub mod dates;
pub mod engine;
pub mod normalize;
mod parser;
pub mod patterns;

pub use amounts::parse_amount;
pub use category::categorize;
pub use classify::{classify, Classification, Completeness};
pub use currency::{detect_currency, CurrencyEntry, CURRENCIES};
pub use dates::{normalize_date, DATE_INVALID};
pub use engine::extract_field;
pub use normalize::normalize_text;
pub use parser::ExtractionPipeline;
pub use patterns::{PatternLibrary, PatternTables};

/// One of the four pattern-driven canonical fields. Currency is the
/// fifth canonical field but is detected by its own fixed-priority scan
/// (see [`currency`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Vendor,
    InvoiceNumber,
    Date,
    Amount,
}

impl Field {
    pub fn name(&self) -> &'static str {
        match self {
            Field::Vendor => "vendor",
            Field::InvoiceNumber => "invoice_number",
            Field::Date => "date",
            Field::Amount => "amount",
        }
    }
}

/// Result of running one field's pattern list against normalized text.
/// Ephemeral, scoped to one document's processing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedField {
    /// The matched raw substring, if any.
    pub raw: Option<String>,
    /// Rank of the pattern that produced the match.
    pub rank: Option<u32>,
    /// Whether any pattern matched at all.
    pub matched: bool,
}

impl ExtractedField {
    pub fn found(raw: impl Into<String>, rank: u32) -> Self {
        Self {
            raw: Some(raw.into()),
            rank: Some(rank),
            matched: true,
        }
    }

    /// No pattern matched. Not an error: the field resolves to its
    /// placeholder downstream.
    pub fn none() -> Self {
        Self::default()
    }
}
