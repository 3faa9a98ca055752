//! Currency detection against a fixed table of known currencies.
//!
//! Detection is a pure lookup in three tiers of descending strength:
//! symbol match, then ISO three-letter code, then spelled-out name. The
//! table is never inferred; an unrecognized indicator simply yields no
//! match.

use lazy_static::lazy_static;
use regex::Regex;

/// One entry of the static currency table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrencyEntry {
    pub code: &'static str,
    pub symbol: &'static str,
    pub region: &'static str,
    pub name: &'static str,
    /// Detection priority within a tier; lower is checked first.
    /// Multi-character symbols (`C$`, `HK$`, ...) outrank the bare `$`
    /// so they are never shadowed by it, and `¥` resolves to JPY (CNY is
    /// reachable only via its ISO code).
    pub priority: u8,
}

/// Fixed, process-wide currency table, loaded at startup.
pub static CURRENCIES: &[CurrencyEntry] = &[
    CurrencyEntry { code: "INR", symbol: "₹", region: "India", name: "Indian Rupee", priority: 1 },
    CurrencyEntry { code: "CAD", symbol: "C$", region: "Canada", name: "Canadian Dollar", priority: 2 },
    CurrencyEntry { code: "AUD", symbol: "A$", region: "Australia", name: "Australian Dollar", priority: 3 },
    CurrencyEntry { code: "SGD", symbol: "S$", region: "Singapore", name: "Singapore Dollar", priority: 4 },
    CurrencyEntry { code: "HKD", symbol: "HK$", region: "Hong Kong", name: "Hong Kong Dollar", priority: 5 },
    CurrencyEntry { code: "MYR", symbol: "RM", region: "Malaysia", name: "Malaysian Ringgit", priority: 6 },
    CurrencyEntry { code: "THB", symbol: "฿", region: "Thailand", name: "Thai Baht", priority: 7 },
    CurrencyEntry { code: "AED", symbol: "د.إ", region: "UAE", name: "UAE Dirham", priority: 8 },
    CurrencyEntry { code: "EUR", symbol: "€", region: "Europe", name: "Euro", priority: 9 },
    CurrencyEntry { code: "GBP", symbol: "£", region: "United Kingdom", name: "British Pound", priority: 10 },
    CurrencyEntry { code: "USD", symbol: "$", region: "United States", name: "US Dollar", priority: 11 },
    CurrencyEntry { code: "JPY", symbol: "¥", region: "Japan", name: "Japanese Yen", priority: 12 },
    CurrencyEntry { code: "CNY", symbol: "¥", region: "China", name: "Chinese Yuan", priority: 13 },
];

lazy_static! {
    /// Symbol matchers in priority order. Alphabetic symbols get a
    /// leading word boundary so `RM` does not fire inside "FORM".
    static ref SYMBOL_MATCHERS: Vec<(Regex, &'static CurrencyEntry)> = {
        let mut entries: Vec<&CurrencyEntry> = CURRENCIES.iter().collect();
        entries.sort_by_key(|e| e.priority);
        entries
            .into_iter()
            .map(|entry| {
                let escaped = regex::escape(entry.symbol);
                let pattern = if entry.symbol.starts_with(|c: char| c.is_ascii_alphanumeric()) {
                    format!(r"\b{escaped}")
                } else {
                    escaped
                };
                (Regex::new(&pattern).expect("currency symbol pattern"), entry)
            })
            .collect()
    };

    static ref CODE_MATCHER: Regex = Regex::new(
        r"(?i)\b(INR|USD|EUR|GBP|CAD|AUD|SGD|AED|JPY|CNY|HKD|MYR|THB)\b"
    ).expect("currency code pattern");

    /// Spelled-out currency names, checked last.
    static ref NAME_MATCHERS: Vec<(Regex, &'static str)> = vec![
        (Regex::new(r"(?i)\b(?:rupees?|rs\.?)(?:\b|\s)").unwrap(), "INR"),
        (Regex::new(r"(?i)\bdollars?\b").unwrap(), "USD"),
        (Regex::new(r"(?i)\beuros?\b").unwrap(), "EUR"),
        (Regex::new(r"(?i)\b(?:pounds?|sterling)\b").unwrap(), "GBP"),
        (Regex::new(r"(?i)\byen\b").unwrap(), "JPY"),
        (Regex::new(r"(?i)\b(?:yuan|renminbi)\b").unwrap(), "CNY"),
        (Regex::new(r"(?i)\bringgit\b").unwrap(), "MYR"),
        (Regex::new(r"(?i)\bbaht\b").unwrap(), "THB"),
        (Regex::new(r"(?i)\bdirhams?\b").unwrap(), "AED"),
    ];
}

/// Look up a table entry by ISO code.
pub fn lookup(code: &str) -> Option<&'static CurrencyEntry> {
    CURRENCIES.iter().find(|entry| entry.code == code)
}

/// Detect the document currency from normalized text.
///
/// Tiers are exhausted in order: a symbol anywhere in the text beats any
/// ISO code, which beats any spelled-out name. Returns `None` when no
/// known indicator is present; the caller resolves that to the `"N/A"`
/// placeholder.
pub fn detect_currency(text: &str) -> Option<&'static CurrencyEntry> {
    for (matcher, entry) in SYMBOL_MATCHERS.iter() {
        if matcher.is_match(text) {
            return Some(*entry);
        }
    }

    if let Some(caps) = CODE_MATCHER.captures(text) {
        let code = caps[1].to_uppercase();
        return lookup(&code);
    }

    for (matcher, code) in NAME_MATCHERS.iter() {
        if matcher.is_match(text) {
            return lookup(code);
        }
    }

    None
}
