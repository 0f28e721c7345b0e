//! HTTP client for the Book-Off Online storefront search page.
//!
//! Pricing is read off a user-facing search-results page because the
//! retailer exposes no stable price API. The whole adapter is best-effort:
//! every failure mode collapses to "no quote".

use std::time::Duration;

use reqwest::Client;
use scraper::Html;
use shelfdb_core::{normalize_isbn, PriceQuote};

use crate::error::PriceError;
use crate::parse::parse_price_text;
use crate::selectors::PRICE_CANDIDATES;

/// Best-effort price scraper for a single storefront.
///
/// Each call builds its own short-lived `reqwest::Client` and issues exactly
/// one GET; there is no retry and no pooling across calls.
#[derive(Debug, Clone)]
pub struct PriceClient {
    base_url: String,
    user_agent: String,
    timeout_secs: u64,
}

impl PriceClient {
    #[must_use]
    pub fn new(base_url: &str, user_agent: &str, timeout_secs: u64) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
            user_agent: user_agent.to_owned(),
            timeout_secs,
        }
    }

    /// Fetches the used-market price quote for `isbn` from the storefront
    /// search page.
    ///
    /// Transport failures, blocked or non-success responses, unrecognized
    /// markup, and unparseable price text all collapse to `None`; callers
    /// cannot distinguish "site is down" from "price not listed".
    pub async fn fetch_price(&self, isbn: &str) -> Option<PriceQuote> {
        let isbn = normalize_isbn(isbn);

        match self.fetch_search_page(&isbn).await {
            Ok(body) => {
                let quote = extract_quote(&body);
                if quote.is_none() {
                    tracing::debug!(isbn = %isbn, "no price element or parseable amount on search page");
                }
                quote
            }
            Err(e) => {
                tracing::warn!(isbn = %isbn, error = %e, "price scrape failed");
                None
            }
        }
    }

    async fn fetch_search_page(&self, isbn: &str) -> Result<String, PriceError> {
        let url = format!("{}/search/keyword/{isbn}", self.base_url);

        let client = Client::builder()
            .timeout(Duration::from_secs(self.timeout_secs))
            .user_agent(&self.user_agent)
            .build()?;

        let response = client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(PriceError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }

        Ok(response.text().await?)
    }
}

/// Locates the price element via the selector candidates and parses its
/// flattened text. `None` when no candidate matches or no amount parses.
fn extract_quote(body: &str) -> Option<PriceQuote> {
    let document = Html::parse_document(body);

    let element = PRICE_CANDIDATES
        .iter()
        .find_map(|selector| document.select(selector).next())?;

    // Inner text with single-space separators, nested tags flattened.
    let joined = element.text().collect::<Vec<_>>().join(" ");
    let text = joined.split_whitespace().collect::<Vec<_>>().join(" ");

    parse_price_text(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_markup_class_is_matched() {
        let html = r#"<html><body>
            <p class="productItem__price">1,320円（税込）<span>定価より220円おトク</span></p>
        </body></html>"#;
        let quote = extract_quote(html).unwrap();
        assert_eq!(quote.market_price, 1320);
        assert_eq!(quote.list_price, 1540);
    }

    #[test]
    fn legacy_markup_class_is_matched() {
        let html = r#"<html><body>
            <span class="item-price__price">550円</span>
        </body></html>"#;
        let quote = extract_quote(html).unwrap();
        assert_eq!(quote.market_price, 550);
        assert_eq!(quote.list_price, 550);
    }

    #[test]
    fn first_matching_candidate_wins() {
        let html = r#"<html><body>
            <p class="productItem__price">1,100円</p>
            <span class="item-price__price">999円</span>
        </body></html>"#;
        let quote = extract_quote(html).unwrap();
        assert_eq!(quote.market_price, 1100);
    }

    #[test]
    fn no_candidate_selector_is_a_miss() {
        let html = r#"<html><body><p class="some-other-class">1,320円</p></body></html>"#;
        assert!(extract_quote(html).is_none());
    }

    #[test]
    fn price_element_without_amount_is_a_miss() {
        let html = r#"<html><body><p class="productItem__price">在庫なし</p></body></html>"#;
        assert!(extract_quote(html).is_none());
    }

    #[test]
    fn nested_tags_are_flattened_with_separators() {
        // Without the separator the digits of both amounts would run together.
        let html = r#"<p class="productItem__price"><b>550円</b><i>定価より1,540円おトク</i></p>"#;
        let quote = extract_quote(html).unwrap();
        assert_eq!(quote.market_price, 550);
        assert_eq!(quote.list_price, 2090);
    }
}
