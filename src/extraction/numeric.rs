//! Locale-tolerant numeric token parsing for rate candidates.
//!
//! The BCV page renders rates with a comma decimal separator ("36,50"),
//! though some revisions have shipped period decimals instead. The
//! normalization here keeps the page's historical contract: the first comma
//! in a matched fragment becomes the decimal point. Fragments where commas
//! are thousands separators ("1,234.56") or that carry more than one comma
//! fail the final float parse and are discarded as candidates — intent for
//! large values is unspecified by the source page, so they are rejected
//! rather than reinterpreted.

use regex::Regex;

/// Pattern for a rate-like token: one or more digits optionally grouped
/// with commas, optionally followed by a period-introduced fraction.
pub const RATE_TOKEN: &str = r"[\d,]+(?:\.\d+)?";

/// Find the first rate-like token in `text` and parse it.
pub fn find_rate(text: &str) -> Option<f64> {
    let re = Regex::new(RATE_TOKEN).expect("rate token regex is valid");
    re.find(text).and_then(|m| parse_rate(m.as_str()))
}

/// Parse an already-matched numeric fragment.
///
/// Replaces the first comma with a period; a fragment that still fails the
/// float parse (further commas included) yields `None`. Values must be
/// finite and non-negative to uphold the record invariant.
pub fn parse_rate(fragment: &str) -> Option<f64> {
    let normalized = fragment.replacen(',', ".", 1);
    normalized
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comma_decimal() {
        assert_eq!(parse_rate("36,50"), Some(36.5));
    }

    #[test]
    fn test_period_decimal() {
        assert_eq!(parse_rate("36.50"), Some(36.5));
    }

    #[test]
    fn test_integer() {
        assert_eq!(parse_rate("36"), Some(36.0));
    }

    #[test]
    fn test_thousands_separated_is_discarded() {
        // First comma becomes the decimal point, the parse then fails on
        // the second separator. Documented limitation, not a bug.
        assert_eq!(parse_rate("1,234.56"), None);
    }

    #[test]
    fn test_multiple_commas_discarded() {
        assert_eq!(parse_rate("1,234,567"), None);
    }

    #[test]
    fn test_garbage_discarded() {
        assert_eq!(parse_rate(""), None);
        assert_eq!(parse_rate(","), None);
        assert_eq!(parse_rate("abc"), None);
    }

    #[test]
    fn test_find_rate_in_label_text() {
        assert_eq!(find_rate("Tasa oficial: 36,50 Bs/USD"), Some(36.5));
        assert_eq!(find_rate("USD 36.50"), Some(36.5));
        assert_eq!(find_rate("sin datos"), None);
    }
}
