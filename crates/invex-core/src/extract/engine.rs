//! The ordered, fallback-capable field extraction engine.

use tracing::trace;

use super::amounts::parse_amount;
use super::patterns::PatternLibrary;
use super::{ExtractedField, Field};

/// How to choose among multiple matches of the winning pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TieBreak {
    /// Smallest text offset wins: vendor and document identifiers are
    /// conventionally declared near the top.
    Earliest,
    /// Largest parsed numeric value wins: totals dominate line items.
    LargestValue,
}

impl Field {
    fn tie_break(&self) -> TieBreak {
        match self {
            Field::Amount => TieBreak::LargestValue,
            // Date label preference is expressed by pattern rank: labeled
            // date patterns hold lower ranks than bare date tokens, so
            // within one pattern all matches are equally labeled.
            Field::Vendor | Field::InvoiceNumber | Field::Date => TieBreak::Earliest,
        }
    }
}

/// Apply one field's pattern list to normalized text.
///
/// Patterns are tried in ascending priority rank; the first pattern with
/// at least one match wins and lower-ranked patterns are never consulted.
/// No match is not an error: the field resolves to its placeholder later.
pub fn extract_field(library: &PatternLibrary, field: Field, text: &str) -> ExtractedField {
    for pattern in library.patterns_for(field) {
        let candidates: Vec<(usize, &str)> = pattern
            .regex
            .captures_iter(text)
            .filter_map(|caps| caps.get(1).map(|m| (m.start(), m.as_str())))
            .collect();

        if candidates.is_empty() {
            continue;
        }

        trace!(
            field = field.name(),
            rank = pattern.rank,
            candidates = candidates.len(),
            "pattern matched"
        );

        let chosen = match field.tie_break() {
            // captures_iter yields matches in text order; keep the
            // selection explicit anyway.
            TieBreak::Earliest => {
                candidates
                    .iter()
                    .min_by_key(|(offset, _)| *offset)
                    .map(|(_, raw)| *raw)
            }
            TieBreak::LargestValue => candidates
                .iter()
                .max_by(|(_, a), (_, b)| parse_amount(a).total_cmp(&parse_amount(b)))
                .map(|(_, raw)| *raw),
        };

        if let Some(raw) = chosen {
            return ExtractedField::found(raw.trim(), pattern.rank);
        }
    }

    ExtractedField::none()
}
