//! Pattern library: ranked field patterns, category rules and keywords.
//!
//! The tables are process-wide, read-only configuration: compiled once at
//! pipeline construction and shared by reference across workers. A table
//! that fails to compile is a fatal configuration error (it would
//! invalidate every subsequent result), surfaced before any document is
//! processed.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::extract::Field;

/// One ranked pattern source entry: lower rank is tried first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternEntry {
    pub rank: u32,
    pub expression: String,
}

impl PatternEntry {
    fn new(rank: u32, expression: &str) -> Self {
        Self {
            rank,
            expression: expression.to_string(),
        }
    }
}

/// One category rule source entry. Declaration order is the priority
/// order: the first rule whose pattern matches wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryEntry {
    pub name: String,
    pub expression: String,
}

impl CategoryEntry {
    fn new(name: &str, expression: &str) -> Self {
        Self {
            name: name.to_string(),
            expression: expression.to_string(),
        }
    }
}

/// Serializable source of the pattern library.
///
/// Field patterns are ordered lists of `(rank, expression)`; every
/// expression must contain at least one capture group, which yields the
/// extracted value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternTables {
    pub vendor: Vec<PatternEntry>,
    pub invoice_number: Vec<PatternEntry>,
    pub date: Vec<PatternEntry>,
    pub amount: Vec<PatternEntry>,
    pub categories: Vec<CategoryEntry>,
    pub invoice_keywords: String,
}

impl Default for PatternTables {
    fn default() -> Self {
        Self {
            vendor: vec![
                // Labeled vendor line: "From: Acme Corp"
                PatternEntry::new(
                    1,
                    r"(?im)\b(?:from|vendor|company|sold\s+by|billed\s+by)[\s:]+([A-Za-z][A-Za-z0-9\s&.,'-]+?)\s*(?:\n|invoice|$)",
                ),
                // Fallback: a standalone capitalized line near the top.
                // Requires a lowercase second letter so all-caps banner
                // lines like "INVOICE" do not masquerade as a vendor.
                PatternEntry::new(2, r"(?m)^([A-Z][a-z][A-Za-z0-9 .,&'-]{1,38})\s*$"),
            ],
            invoice_number: vec![
                PatternEntry::new(
                    1,
                    r"(?i)invoice\s*(?:number|num|no\.?|#)[\s:]*([A-Za-z0-9][A-Za-z0-9/-]{2,})",
                ),
                PatternEntry::new(2, r"(?m)^(?i:invoice|inv)\b[\s#:]*([A-Z0-9-]{3,})"),
            ],
            date: vec![
                // Labeled numeric dates win over bare date-like tokens.
                PatternEntry::new(
                    1,
                    r"(?i)(?:invoice\s+date|date\s+of\s+issue|dated|date)[\s:]*(\d{1,2}[/-]\d{1,2}[/-]\d{2,4})",
                ),
                PatternEntry::new(
                    2,
                    r"(?i)(?:invoice\s+date|dated|date)[\s:]*(\d{4}[/-]\d{1,2}[/-]\d{1,2})",
                ),
                PatternEntry::new(
                    3,
                    r"(?i)\b(\d{1,2}\s+(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\s+\d{4})\b",
                ),
                PatternEntry::new(4, r"\b(\d{1,2}[/-]\d{1,2}[/-]\d{2,4})\b"),
                PatternEntry::new(5, r"\b(\d{4}[/-]\d{1,2}[/-]\d{1,2})\b"),
            ],
            amount: vec![
                // Strong total labels.
                PatternEntry::new(
                    1,
                    r"(?i)(?:grand\s*total|total\s*amount|amount\s*payable|net\s*amount|invoice\s*total)\s*[:\-]?\s*([₹$€£¥]?\s*[0-9][0-9,]*(?:\.[0-9]{1,2})?)",
                ),
                // Generic "total / amount due / balance" lines.
                PatternEntry::new(
                    2,
                    r"(?i)(?:total|amount\s+due|balance)\s*[:\-]?\s*([₹$€£¥]?\s*[0-9][0-9,]*(?:\.[0-9]{1,2})?)",
                ),
                // Any currency-prefixed number, anywhere.
                PatternEntry::new(3, r"([₹$€£¥]\s*[0-9][0-9,]*(?:\.[0-9]{1,2})?)"),
                // Rs / INR prefixed formats.
                PatternEntry::new(
                    4,
                    r"(?i)\b(?:rs\.?|inr)\s*[:\-]?\s*([0-9][0-9,]*(?:\.[0-9]{1,2})?)",
                ),
                // Money-like fallback: grouped thousands or explicit cents.
                PatternEntry::new(
                    5,
                    r"\b([0-9]{1,3}(?:,[0-9]{2,3})+(?:\.[0-9]{1,2})?|[0-9]+\.[0-9]{2})\b",
                ),
            ],
            categories: vec![
                CategoryEntry::new(
                    "Food",
                    r"(?i)swiggy|zomato|dominos|pizza|restaurant|cafe|food|uber\s*eats",
                ),
                CategoryEntry::new("Shopping", r"(?i)amazon|flipkart|myntra|ajio|shopping|retail"),
                CategoryEntry::new(
                    "Utilities",
                    r"(?i)electricity|water|gas|internet|broadband|utility|bill",
                ),
                CategoryEntry::new("Travel", r"(?i)uber|ola|flight|hotel|booking|airbnb|travel"),
            ],
            invoice_keywords:
                r"(?i)\b(?:tax\s+invoice|invoice|bill|receipt|payment|due|total|amount)\b"
                    .to_string(),
        }
    }
}

/// A compiled field pattern with its priority rank.
#[derive(Debug, Clone)]
pub struct RankedPattern {
    pub rank: u32,
    pub regex: Regex,
}

/// A compiled category rule.
#[derive(Debug, Clone)]
pub struct CategoryRule {
    pub name: String,
    pub regex: Regex,
}

/// The compiled, immutable pattern library.
#[derive(Debug, Clone)]
pub struct PatternLibrary {
    vendor: Vec<RankedPattern>,
    invoice_number: Vec<RankedPattern>,
    date: Vec<RankedPattern>,
    amount: Vec<RankedPattern>,
    categories: Vec<CategoryRule>,
    invoice_keywords: Regex,
}

impl PatternLibrary {
    /// Compile the source tables, validating every expression.
    pub fn compile(tables: &PatternTables) -> Result<Self, ConfigError> {
        Ok(Self {
            vendor: compile_field(Field::Vendor, &tables.vendor)?,
            invoice_number: compile_field(Field::InvoiceNumber, &tables.invoice_number)?,
            date: compile_field(Field::Date, &tables.date)?,
            amount: compile_field(Field::Amount, &tables.amount)?,
            categories: compile_categories(&tables.categories)?,
            invoice_keywords: Regex::new(&tables.invoice_keywords)
                .map_err(|e| ConfigError::InvalidKeywordExpression(e.to_string()))?,
        })
    }

    /// The built-in library. The default tables are covered by tests, so
    /// compilation cannot fail at runtime.
    pub fn builtin() -> Self {
        Self::compile(&PatternTables::default()).expect("built-in pattern tables must compile")
    }

    /// Ranked patterns for one field, in ascending rank order.
    pub fn patterns_for(&self, field: Field) -> &[RankedPattern] {
        match field {
            Field::Vendor => &self.vendor,
            Field::InvoiceNumber => &self.invoice_number,
            Field::Date => &self.date,
            Field::Amount => &self.amount,
        }
    }

    /// Category rules in declaration (priority) order.
    pub fn categories(&self) -> &[CategoryRule] {
        &self.categories
    }

    /// True when the text contains an invoice-indicating keyword.
    pub fn has_invoice_keyword(&self, text: &str) -> bool {
        self.invoice_keywords.is_match(text)
    }
}

fn compile_field(field: Field, entries: &[PatternEntry]) -> Result<Vec<RankedPattern>, ConfigError> {
    if entries.is_empty() {
        return Err(ConfigError::EmptyField(field.name().to_string()));
    }

    let mut compiled = Vec::with_capacity(entries.len());
    for entry in entries {
        let regex = Regex::new(&entry.expression).map_err(|e| ConfigError::InvalidPattern {
            field: field.name().to_string(),
            rank: entry.rank,
            reason: e.to_string(),
        })?;

        // Group 1 carries the extracted value.
        if regex.captures_len() < 2 {
            return Err(ConfigError::MissingCaptureGroup {
                field: field.name().to_string(),
                rank: entry.rank,
            });
        }

        compiled.push(RankedPattern {
            rank: entry.rank,
            regex,
        });
    }

    compiled.sort_by_key(|p| p.rank);
    Ok(compiled)
}

fn compile_categories(entries: &[CategoryEntry]) -> Result<Vec<CategoryRule>, ConfigError> {
    entries
        .iter()
        .map(|entry| {
            Regex::new(&entry.expression)
                .map(|regex| CategoryRule {
                    name: entry.name.clone(),
                    regex,
                })
                .map_err(|e| ConfigError::InvalidCategoryRule {
                    name: entry.name.clone(),
                    reason: e.to_string(),
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_tables_compile() {
        let library = PatternLibrary::builtin();
        assert_eq!(library.patterns_for(Field::Date).len(), 5);
        assert_eq!(library.categories().len(), 4);
    }

    #[test]
    fn test_patterns_sorted_by_rank() {
        let mut tables = PatternTables::default();
        tables.date.reverse();
        let library = PatternLibrary::compile(&tables).unwrap();
        let ranks: Vec<u32> = library.patterns_for(Field::Date).iter().map(|p| p.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_invalid_pattern_is_fatal() {
        let mut tables = PatternTables::default();
        tables.vendor.push(PatternEntry::new(9, r"([unclosed"));
        let err = PatternLibrary::compile(&tables).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPattern { rank: 9, .. }));
    }

    #[test]
    fn test_pattern_without_capture_group_rejected() {
        let mut tables = PatternTables::default();
        tables.amount = vec![PatternEntry::new(1, r"total")];
        let err = PatternLibrary::compile(&tables).unwrap_err();
        assert!(matches!(err, ConfigError::MissingCaptureGroup { .. }));
    }

    #[test]
    fn test_empty_field_rejected() {
        let mut tables = PatternTables::default();
        tables.invoice_number.clear();
        let err = PatternLibrary::compile(&tables).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyField(_)));
    }

    #[test]
    fn test_keyword_detection() {
        let library = PatternLibrary::builtin();
        assert!(library.has_invoice_keyword("TAX INVOICE no. 42"));
        assert!(library.has_invoice_keyword("Please remit payment"));
        assert!(!library.has_invoice_keyword("Meeting notes for Tuesday"));
    }

    #[test]
    fn test_category_declaration_order() {
        let library = PatternLibrary::builtin();
        let names: Vec<&str> = library.categories().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Food", "Shopping", "Utilities", "Travel"]);
    }
}
