//! Amount normalization: raw matched substrings to `f64`.

/// Parse a raw amount substring into a numeric value.
///
/// Currency symbols, codes and whitespace are stripped first. The last
/// `.` or `,` is treated as the decimal point iff it is followed by
/// exactly 1–2 trailing digits; every other `.`/`,` is a grouping
/// separator and removed. This resolves 3-digit grouping
/// (`1,234,567.89`), Indian 2/3-digit grouping (`1,50,000.50`) and
/// European decimal commas (`1.234,56`) under one rule, since grouping
/// position does not affect the digit sequence once the decimal point is
/// identified.
///
/// Returns `0.0` when no digits are present.
pub fn parse_amount(raw: &str) -> f64 {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == ',')
        .collect();

    if !cleaned.chars().any(|c| c.is_ascii_digit()) {
        return 0.0;
    }

    let (integer_part, fraction) = match cleaned.rfind(['.', ',']) {
        Some(idx) => {
            let after = &cleaned[idx + 1..];
            if (1..=2).contains(&after.len()) && after.chars().all(|c| c.is_ascii_digit()) {
                (&cleaned[..idx], after)
            } else {
                (cleaned.as_str(), "")
            }
        }
        None => (cleaned.as_str(), ""),
    };

    let mut digits: String = integer_part.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        digits.push('0');
    }

    if fraction.is_empty() {
        digits.parse().unwrap_or(0.0)
    } else {
        format!("{digits}.{fraction}").parse().unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_integer() {
        assert_eq!(parse_amount("400"), 400.0);
        assert_eq!(parse_amount("₹400"), 400.0);
    }

    #[test]
    fn test_three_digit_grouping() {
        assert_eq!(parse_amount("$2,500"), 2500.0);
        assert_eq!(parse_amount("1,234,567.89"), 1234567.89);
    }

    #[test]
    fn test_indian_grouping() {
        assert_eq!(parse_amount("₹1,50,000.50"), 150000.50);
        assert_eq!(parse_amount("1,50,000"), 150000.0);
    }

    #[test]
    fn test_european_decimal_comma() {
        assert_eq!(parse_amount("1.234,56"), 1234.56);
        assert_eq!(parse_amount("1234,56"), 1234.56);
    }

    #[test]
    fn test_single_decimal_digit() {
        assert_eq!(parse_amount("99.5"), 99.5);
    }

    #[test]
    fn test_currency_codes_and_whitespace_stripped() {
        assert_eq!(parse_amount("Rs. 1,200.00"), 1200.0);
        assert_eq!(parse_amount("USD 3 500.25"), 3500.25);
    }

    #[test]
    fn test_no_digits_yields_zero() {
        assert_eq!(parse_amount("N/A"), 0.0);
        assert_eq!(parse_amount(""), 0.0);
        assert_eq!(parse_amount("₹"), 0.0);
    }

    #[test]
    fn test_trailing_three_digits_are_grouping() {
        // Last separator followed by 3 digits is grouping, not decimal.
        assert_eq!(parse_amount("2.500"), 2500.0);
    }
}
