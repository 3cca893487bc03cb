//! Best-effort extraction of official exchange rates from BCV page markup.
//!
//! The source page's structure is externally owned and changes without
//! notice, so this is not a strict parse of a known schema: a cascade of
//! independent heuristics recovers whatever it can, and a document with zero
//! recognizable rates is still a successful partial result.
//!
//! The entry point [`extract_rates`] is **synchronous** because the
//! `scraper` crate's types are `!Send` — async callers should wrap it in
//! `tokio::task::spawn_blocking`.

pub mod date;
pub mod numeric;
pub mod strategies;

use chrono::Utc;
use scraper::{ElementRef, Html, Selector};
use std::collections::BTreeMap;

use crate::error::RateError;
use crate::types::{Currency, RateRecord};

/// Run the full extraction pipeline against a raw HTML document.
///
/// Parses once, runs the four-strategy cascade, locates the publication
/// date, and composes the record. Fails only at the document level: the
/// HTML5 parser is error-tolerant, so the observable unparseable case is a
/// blank payload. Everything below that degrades gracefully.
pub fn extract_rates(html: &str, source_url: &str) -> Result<RateRecord, RateError> {
    if html.trim().is_empty() {
        return Err(RateError::Parse("empty document".to_string()));
    }

    let document = Html::parse_document(html);
    let found = strategies::run_cascade(&document);
    let date = date::locate_date(&document)
        .unwrap_or_else(|| Utc::now().format("%Y-%m-%d").to_string());

    let mut rates = BTreeMap::new();
    if let Some(usd) = found.usd {
        rates.insert(Currency::Usd, usd);
    }
    if let Some(eur) = found.eur {
        rates.insert(Currency::Eur, eur);
    }

    tracing::debug!(usd = ?found.usd, eur = ?found.eur, %date, "extraction finished");

    Ok(RateRecord {
        success: true,
        date,
        rates,
        source: source_url.to_string(),
        timestamp: Utc::now(),
    })
}

// ── Shared text helpers ─────────────────────────────────────────────────────

/// Visible text of an element, trimmed and whitespace-collapsed.
pub(crate) fn element_text(el: &ElementRef<'_>) -> String {
    el.text()
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// All visible text under `<body>`.
pub(crate) fn body_text(document: &Html) -> String {
    let sel = Selector::parse("body").expect("body selector is valid");
    document
        .select(&sel)
        .next()
        .map(|body| element_text(&body))
        .unwrap_or_default()
}
