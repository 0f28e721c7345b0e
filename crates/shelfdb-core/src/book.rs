//! Domain types produced by the external lookup layer.
//!
//! Both types are ephemeral: created fresh per lookup request and discarded
//! after being folded into a record create or patch. They hold no state
//! across calls.

use serde::{Deserialize, Serialize};

/// Canonical bibliographic record assembled from one external source.
///
/// Every field except `isbn` is optional; which fields are populated depends
/// on the source that answered (NDL never carries `page_count` or `size`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookInfo {
    /// Normalized ISBN the lookup was issued for.
    pub isbn: String,
    pub title: Option<String>,
    pub author: Option<String>,
    pub publisher: Option<String>,
    pub page_count: Option<i32>,
    /// Format/binding descriptor, e.g. an ONIX product form detail code.
    pub size: Option<String>,
}

impl BookInfo {
    /// Returns `true` when every field except the queried ISBN is absent.
    ///
    /// An all-empty result carries no usable data and is treated as a miss
    /// by the lookup orchestrator.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.author.is_none()
            && self.publisher.is_none()
            && self.page_count.is_none()
            && self.size.is_none()
    }
}

/// A used-market price quote scraped from a storefront search page.
///
/// Amounts are whole yen. A quote only exists when a market price was
/// extracted; there is no partially-populated form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceQuote {
    /// Advertised used price.
    pub market_price: i64,
    /// Nominal list price, derived as market price plus the advertised
    /// "below list" differential. Always >= `market_price`.
    pub list_price: i64,
}
