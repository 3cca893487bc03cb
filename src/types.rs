//! Wire types for rate extraction results.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Currencies the extractor knows how to locate.
///
/// Serialized as the ISO 4217 code, so a `BTreeMap<Currency, f64>` lands on
/// the wire as `{"USD": 36.5, "EUR": 39.8}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Currency {
    #[serde(rename = "USD")]
    Usd,
    #[serde(rename = "EUR")]
    Eur,
}

impl Currency {
    /// ISO 4217 code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Eur => "EUR",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// The result of one extraction attempt.
///
/// Constructed fresh per call and never mutated after being returned. A
/// currency missing from `rates` means "unknown", not zero — the heuristics
/// simply found nothing for it. Every value present is finite and
/// non-negative.
#[derive(Debug, Clone, Serialize)]
pub struct RateRecord {
    /// Always `true` for a record that was produced at all; a document with
    /// zero recognizable rates is still a successful partial result.
    pub success: bool,
    /// Publication date as found on the page, or today's UTC date in
    /// `YYYY-MM-DD` form when no date cue was located.
    pub date: String,
    /// Located rates, keyed by currency code.
    pub rates: BTreeMap<Currency, f64>,
    /// Origin URL the document came from.
    pub source: String,
    /// Instant the extraction ran.
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_serializes_as_code() {
        let mut rates = BTreeMap::new();
        rates.insert(Currency::Usd, 36.5);
        rates.insert(Currency::Eur, 39.8);
        let json = serde_json::to_value(&rates).unwrap();
        assert_eq!(json["USD"], 36.5);
        assert_eq!(json["EUR"], 39.8);
    }

    #[test]
    fn test_absent_currency_is_absent_key() {
        let record = RateRecord {
            success: true,
            date: "2026-08-30".to_string(),
            rates: BTreeMap::new(),
            source: "https://www.bcv.org.ve/".to_string(),
            timestamp: Utc::now(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["success"], true);
        assert!(json["rates"].as_object().unwrap().is_empty());
        assert!(json["rates"].get("USD").is_none());
    }
}
