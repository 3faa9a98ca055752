//! Date normalization to ISO `YYYY-MM-DD`.

use chrono::NaiveDate;

/// Placeholder for a date that was found but could not be parsed.
/// Distinct from `"N/A"`, which means no date text was found at all.
pub const DATE_INVALID: &str = "Invalid Date";

/// Templates tried in order. Day-first forms come before month-first:
/// an ambiguous numeric date such as `03/04/2024` always resolves
/// day-first (3 April), and month-first is reached only when the
/// day-first reading is not a valid calendar date (e.g. `01/13/2024`).
const DATE_FORMATS: &[&str] = &[
    "%d/%m/%Y",
    "%d-%m-%Y",
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%d/%m/%y",
    "%d-%m-%y",
    "%d %B %Y",
    "%d %b %Y",
];

/// Normalize a raw matched date substring.
///
/// Returns the first template that parses to a valid calendar date,
/// formatted as `YYYY-MM-DD`; returns [`DATE_INVALID`] when nothing does.
pub fn normalize_date(raw: &str) -> String {
    let trimmed = raw.trim();
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return date.format("%Y-%m-%d").to_string();
        }
    }
    DATE_INVALID.to_string()
}
