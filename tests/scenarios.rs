//! End-to-end extraction scenarios against synthetic source page revisions.
//!
//! Each test feeds a document shaped like one historical revision of the
//! BCV homepage through the full pipeline and checks the composed record.

use bcv_rates::error::RateError;
use bcv_rates::extraction::extract_rates;
use bcv_rates::types::Currency;
use chrono::Utc;

const SOURCE: &str = "https://www.bcv.org.ve/";

// ── Spec scenarios ──

#[test]
fn scenario_labeled_view_block() {
    let html = r#"<html><body>
        <div class="view-tipo-de-cambio-oficial-del-bcv">
            <span class="field-content">USD: 36,50</span>
        </div>
    </body></html>"#;

    let record = extract_rates(html, SOURCE).unwrap();
    assert!(record.success);
    assert_eq!(record.rates.get(&Currency::Usd), Some(&36.5));
}

#[test]
fn scenario_table_only() {
    let html = r#"<html><body>
        <table><tr><td>EUR</td><td>39,80</td></tr></table>
    </body></html>"#;

    let record = extract_rates(html, SOURCE).unwrap();
    assert_eq!(record.rates.get(&Currency::Eur), Some(&39.8));
    assert!(record.rates.get(&Currency::Usd).is_none());
}

#[test]
fn scenario_free_text_fallback() {
    let html = "<html><body><p>Tasa de referencia USD 36.50</p></body></html>";

    let record = extract_rates(html, SOURCE).unwrap();
    assert_eq!(record.rates.get(&Currency::Usd), Some(&36.5));
}

#[test]
fn scenario_blank_input_fails_with_parse_error() {
    let err = extract_rates("", SOURCE).unwrap_err();
    assert!(matches!(err, RateError::Parse(_)));
    assert_eq!(err.code(), "parse_error");
}

#[test]
fn scenario_no_currency_mentions_is_partial_success() {
    let html = "<html><body><h1>Banco Central</h1><p>portal en mantenimiento</p></body></html>";

    let record = extract_rates(html, SOURCE).unwrap();
    assert!(record.success);
    assert!(record.rates.is_empty());
}

// ── Precedence and invariants ──

#[test]
fn earlier_strategy_wins_over_conflicting_table() {
    let html = r#"<html><body>
        <div class="view-tipo-de-cambio-oficial-del-bcv">USD: 36,50</div>
        <table><tr><td>USD</td><td>40,00</td></tr></table>
    </body></html>"#;

    let record = extract_rates(html, SOURCE).unwrap();
    assert_eq!(record.rates.get(&Currency::Usd), Some(&36.5));
}

#[test]
fn later_strategies_fill_gaps_only() {
    // USD comes from the view block, EUR only exists in a table.
    let html = r#"<html><body>
        <div class="view-tipo-de-cambio-oficial-del-bcv">USD: 36,50</div>
        <table>
            <tr><td>USD</td><td>40,00</td></tr>
            <tr><td>EUR</td><td>39,80</td></tr>
        </table>
    </body></html>"#;

    let record = extract_rates(html, SOURCE).unwrap();
    assert_eq!(record.rates.get(&Currency::Usd), Some(&36.5));
    assert_eq!(record.rates.get(&Currency::Eur), Some(&39.8));
}

#[test]
fn all_rates_are_finite_and_non_negative() {
    let html = r#"<html><body>
        <span id="dolar">36,50</span>
        <span class="euro">39,80</span>
    </body></html>"#;

    let record = extract_rates(html, SOURCE).unwrap();
    assert_eq!(record.rates.len(), 2);
    for value in record.rates.values() {
        assert!(value.is_finite());
        assert!(*value >= 0.0);
    }
}

#[test]
fn date_falls_back_to_current_utc_date() {
    let before = Utc::now().format("%Y-%m-%d").to_string();
    let record = extract_rates("<html><body><p>USD 36,50</p></body></html>", SOURCE).unwrap();
    let after = Utc::now().format("%Y-%m-%d").to_string();

    assert!(record.date == before || record.date == after);
}

// ── A full realistic revision ──

#[test]
fn realistic_page_extracts_everything() {
    let html = r#"<html><body>
        <div id="block-views-tipo-de-cambio-oficial-del-bcv-block">
          <div class="view-tipo-de-cambio-oficial-del-bcv">
            <div class="views-row">
              <span class="field-content">EUR: 39,80</span>
            </div>
            <div class="views-row">
              <span class="field-content">USD: 36,50</span>
            </div>
          </div>
          <span class="date-display-single">Viernes, 29 Agosto 2026</span>
        </div>
        <table>
          <tr><th>Moneda</th><th>Tasa</th></tr>
          <tr><td>Dólar</td><td>40,00</td></tr>
          <tr><td>Euro</td><td>44,00</td></tr>
        </table>
    </body></html>"#;

    let record = extract_rates(html, SOURCE).unwrap();
    assert_eq!(record.rates.get(&Currency::Usd), Some(&36.5));
    assert_eq!(record.rates.get(&Currency::Eur), Some(&39.8));
    assert_eq!(record.date, "Viernes, 29 Agosto 2026");
    assert_eq!(record.source, SOURCE);
}

#[test]
fn record_serializes_to_the_wire_shape() {
    let html = r#"<html><body>
        <div class="view-tipo-de-cambio-oficial-del-bcv">USD: 36,50</div>
    </body></html>"#;

    let record = extract_rates(html, SOURCE).unwrap();
    let json = serde_json::to_value(&record).unwrap();

    assert_eq!(json["success"], true);
    assert_eq!(json["rates"]["USD"], 36.5);
    assert!(json["rates"].get("EUR").is_none());
    assert_eq!(json["source"], SOURCE);
    let ts = json["timestamp"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(ts).is_ok());
}
