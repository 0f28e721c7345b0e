//! Heuristic extraction of market and list prices from storefront price text.
//!
//! The presentation text is not contractually stable; extraction is pattern
//! driven and best-effort. Observed live shapes:
//!
//! - `"1,320円（税込） 定価より220円おトク"` — used price plus an advertised
//!   "below list" differential.
//! - `"550円（税込）"` — used price only; the copy sells at list price.

use std::sync::LazyLock;

use regex::Regex;
use shelfdb_core::PriceQuote;

/// Digit run (optionally comma-grouped in thousands) followed by the yen
/// unit, allowing whitespace before the unit.
static YEN_AMOUNT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{1,3}(?:,\d{3})*|\d+)\s*円").expect("valid yen-amount regex")
});

/// "cheaper than list price by N yen" marker with its amount.
static LIST_DIFFERENTIAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"定価より\s*(\d{1,3}(?:,\d{3})*|\d+)\s*円").expect("valid differential regex")
});

/// Extracts a [`PriceQuote`] from the flattened text of a price element.
///
/// The differential defaults to 0 when the marker phrase is absent. The
/// market price is the first yen amount outside the matched differential
/// span — the span is removed before scanning so the differential digits can
/// never be read as the market price, whichever side of it they appear on.
/// Without a market-price run the quote is absent regardless of the
/// differential.
pub(crate) fn parse_price_text(text: &str) -> Option<PriceQuote> {
    let (differential, remainder) = match LIST_DIFFERENTIAL.captures(text) {
        Some(caps) => {
            let span = caps.get(0)?;
            let amount = parse_yen(caps.get(1)?.as_str())?;
            let remainder = format!("{}{}", &text[..span.start()], &text[span.end()..]);
            (amount, remainder)
        }
        None => (0, text.to_owned()),
    };

    let market_price = YEN_AMOUNT
        .captures(&remainder)
        .and_then(|caps| caps.get(1))
        .and_then(|m| parse_yen(m.as_str()))?;

    Some(PriceQuote {
        market_price,
        list_price: market_price + differential,
    })
}

fn parse_yen(digits: &str) -> Option<i64> {
    digits.replace(',', "").parse().ok()
}
