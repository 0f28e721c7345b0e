//! CSS selectors for the Book-Off Online search-results page.
//!
//! The storefront has shipped at least two class names for the same semantic
//! price element; candidates are tried in order and the first match wins.
//!
//! **Update process**: when extraction starts missing, capture an HTML
//! sample, add the new selector here, and add a fixture test. Markup
//! variants are a data change in this module, never client-logic changes.

use std::sync::LazyLock;

use scraper::Selector;

/// Price-bearing element candidates, newest markup first.
pub(crate) static PRICE_CANDIDATES: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    ["p.productItem__price", "span.item-price__price"]
        .into_iter()
        .map(|css| Selector::parse(css).expect("valid price selector"))
        .collect()
});
