use thiserror::Error;

/// Transport-level failure while fetching the storefront search page.
///
/// Markup and text-extraction misses are not errors — they are ordinary
/// "price not listed" outcomes and surface as `None` from
/// [`crate::PriceClient::fetch_price`].
#[derive(Debug, Error)]
pub enum PriceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },
}
