//! Vendor categorization against ordered keyword rules.

use crate::models::record::TEXT_PLACEHOLDER;

use super::patterns::CategoryRule;

/// Fallback category when no rule matches.
pub const CATEGORY_OTHERS: &str = "Others";

/// Assign a spend category.
///
/// The vendor string is the primary signal: each rule is tried against it
/// in declaration order and the first hit wins. Only when no rule matches
/// the vendor is the full normalized text scanned, again in declaration
/// order. Rules are independent of classification; even a document judged
/// not to be an invoice still gets a category.
pub fn categorize(vendor: &str, text: &str, rules: &[CategoryRule]) -> String {
    if vendor != TEXT_PLACEHOLDER {
        for rule in rules {
            if rule.regex.is_match(vendor) {
                return rule.name.clone();
            }
        }
    }

    for rule in rules {
        if rule.regex.is_match(text) {
            return rule.name.clone();
        }
    }

    CATEGORY_OTHERS.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::patterns::PatternLibrary;

    fn rules() -> Vec<CategoryRule> {
        PatternLibrary::builtin().categories().to_vec()
    }

    #[test]
    fn test_vendor_match() {
        assert_eq!(categorize("Swiggy", "some text", &rules()), "Food");
        assert_eq!(categorize("Amazon Retail", "some text", &rules()), "Shopping");
    }

    #[test]
    fn test_vendor_beats_text() {
        // Vendor says food delivery even though the text mentions travel.
        let text = "flight booking confirmation";
        assert_eq!(categorize("Zomato", text, &rules()), "Food");
    }

    #[test]
    fn test_text_fallback() {
        let text = "Electricity bill for March, broadband included";
        assert_eq!(categorize("N/A", text, &rules()), "Utilities");
        assert_eq!(categorize("Unknown Vendor Ltd", text, &rules()), "Utilities");
    }

    #[test]
    fn test_declaration_order_wins() {
        // Matches both Food ("restaurant") and Shopping ("retail");
        // Food is declared first and wins.
        let text = "restaurant in the retail park";
        assert_eq!(categorize("N/A", text, &rules()), "Food");
    }

    #[test]
    fn test_no_match_is_others() {
        assert_eq!(categorize("N/A", "consulting services", &rules()), "Others");
    }

    #[test]
    fn test_placeholder_vendor_skips_vendor_scan() {
        // "N/A" must not be pattern-matched as a vendor name.
        assert_eq!(categorize("N/A", "", &rules()), "Others");
    }
}
