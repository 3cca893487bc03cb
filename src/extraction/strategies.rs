//! The four-strategy extraction cascade.
//!
//! Each source page revision tends to preserve at least one structural cue,
//! so four independent heuristics run in order from most structure-specific
//! to least. Every strategy returns only the currencies it newly resolved;
//! the orchestrator merges with first-found-wins precedence, so a later,
//! fuzzier heuristic can never displace a value found by an earlier one.

use regex::Regex;
use scraper::{Html, Selector};

use super::numeric::{self, RATE_TOKEN};
use super::{body_text, element_text};

/// Rates resolved so far, threaded functionally through the cascade.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RateSet {
    pub usd: Option<f64>,
    pub eur: Option<f64>,
}

impl RateSet {
    /// Merge `later` into `self`, keeping existing values. First wins.
    pub fn merge(self, later: RateSet) -> RateSet {
        RateSet {
            usd: self.usd.or(later.usd),
            eur: self.eur.or(later.eur),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.usd.is_some() && self.eur.is_some()
    }
}

/// Run all four strategies in order against a parsed document.
pub fn run_cascade(document: &Html) -> RateSet {
    let mut found = RateSet::default();
    found = found.merge(labeled_blocks(document));
    found = found.merge(known_identifiers(document, found));
    found = found.merge(table_scan(document, found));
    found = found.merge(text_fallback(document, found));
    found
}

// ── Strategy 1: labeled content blocks ──────────────────────────────────────

/// Drupal view classes the BCV site has used for its official rate block.
const OFFICIAL_VIEW_SELECTORS: &[&str] = &[
    ".view-tipo-de-cambio-oficial-del-bcv",
    ".view-tipo-de-cambio-oficial-del-bcv .field-content",
    ".view-id-tipo_de_cambio_oficial_del_bcv",
];

/// Scan the official rate view blocks for currency-labeled numbers.
fn labeled_blocks(document: &Html) -> RateSet {
    let usd_re =
        Regex::new(&format!(r"USD[\s:]*({RATE_TOKEN})")).expect("usd label regex is valid");
    let eur_re =
        Regex::new(&format!(r"EUR[\s:]*({RATE_TOKEN})")).expect("eur label regex is valid");

    let mut out = RateSet::default();
    for sel_str in OFFICIAL_VIEW_SELECTORS {
        let Ok(sel) = Selector::parse(sel_str) else {
            continue;
        };
        for el in document.select(&sel) {
            let text = element_text(&el);
            if out.usd.is_none() {
                out.usd = capture_rate(&usd_re, &text);
            }
            if out.eur.is_none() {
                out.eur = capture_rate(&eur_re, &text);
            }
            if out.is_complete() {
                return out;
            }
        }
    }
    out
}

// ── Strategy 2: known element identifiers ───────────────────────────────────

/// Selector candidates with dollar semantics, in probe order. Spanish and
/// English spellings, full word and code, id and class and substring forms.
const DOLLAR_SELECTORS: &[&str] = &[
    "#dolar",
    ".dolar",
    "#dollar",
    ".dollar",
    "#usd",
    ".usd",
    r#"[id*="dolar"]"#,
    r#"[class*="dolar"]"#,
    r#"[id*="dollar"]"#,
    r#"[class*="dollar"]"#,
];

/// Selector candidates with euro semantics.
const EURO_SELECTORS: &[&str] = &[
    "#euro",
    ".euro",
    "#eur",
    ".eur",
    r#"[id*="euro"]"#,
    r#"[class*="euro"]"#,
];

/// Probe fixed selector lists; route each hit by its semantic group.
fn known_identifiers(document: &Html, have: RateSet) -> RateSet {
    let mut out = RateSet::default();
    if have.usd.is_none() {
        out.usd = probe_selectors(document, DOLLAR_SELECTORS);
    }
    if have.eur.is_none() {
        out.eur = probe_selectors(document, EURO_SELECTORS);
    }
    out
}

/// Take only the first matching element per selector; first parsed number
/// wins.
fn probe_selectors(document: &Html, selectors: &[&str]) -> Option<f64> {
    for sel_str in selectors {
        let Ok(sel) = Selector::parse(sel_str) else {
            continue;
        };
        if let Some(el) = document.select(&sel).next() {
            if let Some(value) = numeric::find_rate(&element_text(&el)) {
                return Some(value);
            }
        }
    }
    None
}

// ── Strategy 3: tabular scan ────────────────────────────────────────────────

/// Walk every table row with at least two cells: first cell is the currency
/// label, second the value field. No early exit, no overwrite.
fn table_scan(document: &Html, have: RateSet) -> RateSet {
    let table_sel = Selector::parse("table").expect("table selector is valid");
    let row_sel = Selector::parse("tr").expect("row selector is valid");
    let cell_sel = Selector::parse("td, th").expect("cell selector is valid");

    let mut out = RateSet::default();
    for table in document.select(&table_sel) {
        for row in table.select(&row_sel) {
            let cells: Vec<_> = row.select(&cell_sel).collect();
            if cells.len() < 2 {
                continue;
            }
            let label = element_text(&cells[0]).to_uppercase();
            if label.contains("USD") || label.contains("DOLAR") || label.contains("DÓLAR") {
                if have.usd.is_none() && out.usd.is_none() {
                    out.usd = numeric::find_rate(&element_text(&cells[1]));
                }
            } else if label.contains("EUR") && have.eur.is_none() && out.eur.is_none() {
                out.eur = numeric::find_rate(&element_text(&cells[1]));
            }
        }
    }
    out
}

// ── Strategy 4: full-page text fallback ─────────────────────────────────────

/// Regex the whole body text, only for currencies still missing. Patterns
/// are an ordered sequence evaluated lazily — the first one that matches
/// and parses supplies the value, the rest are never consulted.
fn text_fallback(document: &Html, have: RateSet) -> RateSet {
    if have.is_complete() {
        return RateSet::default();
    }
    let body = body_text(document);

    let mut out = RateSet::default();
    if have.usd.is_none() {
        out.usd = first_pattern_match(
            &body,
            &[
                // code-labeled, name-labeled, symbol-labeled
                format!(r"USD[\s:]*({RATE_TOKEN})"),
                format!(r"(?i)d[oó]lar\w*[\s:]*({RATE_TOKEN})"),
                format!(r"\$\s*({RATE_TOKEN})"),
            ],
        );
    }
    if have.eur.is_none() {
        out.eur = first_pattern_match(
            &body,
            &[
                format!(r"EUR[\s:]*({RATE_TOKEN})"),
                format!(r"(?i)euro\w*[\s:]*({RATE_TOKEN})"),
            ],
        );
    }
    out
}

fn first_pattern_match(text: &str, patterns: &[String]) -> Option<f64> {
    patterns.iter().find_map(|p| {
        let re = Regex::new(p).expect("fallback pattern is valid");
        capture_rate(&re, text)
    })
}

// ── Helpers ─────────────────────────────────────────────────────────────────

/// Apply a one-capture-group regex and parse the captured fragment.
fn capture_rate(re: &Regex, text: &str) -> Option<f64> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| numeric::parse_rate(m.as_str()))
}
