//! Best-effort lookup of the "last updated" date on the page.

use scraper::{Html, Selector};

use super::element_text;

/// Selector candidates with date semantics, most specific first. The BCV
/// site is Drupal and renders its value date inside
/// `span.date-display-single`; the rest cover id/class spellings seen in
/// earlier page revisions, Spanish and English.
const DATE_SELECTORS: &[&str] = &[
    "span.date-display-single",
    ".fecha",
    "#fecha",
    r#"[class*="fecha"]"#,
    r#"[id*="fecha"]"#,
    ".date",
    "#date",
    r#"[class*="date"]"#,
    r#"[id*="date"]"#,
    r#"[class*="actualizado"]"#,
    r#"[class*="updated"]"#,
];

/// Return the trimmed text of the first date-like element that has any.
///
/// `None` when no cue is found; the caller substitutes the current date.
/// The text is returned verbatim — the source page owns its date format.
pub fn locate_date(document: &Html) -> Option<String> {
    for sel_str in DATE_SELECTORS {
        let Ok(sel) = Selector::parse(sel_str) else {
            continue;
        };
        if let Some(el) = document.select(&sel).next() {
            let text = element_text(&el);
            if !text.is_empty() {
                return Some(text);
            }
        }
    }
    None
}
