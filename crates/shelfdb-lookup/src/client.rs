//! Ordered-fallback bibliographic lookup over openBD and NDL.

use std::time::Duration;

use reqwest::Client;
use shelfdb_core::{normalize_isbn, BookInfo};

use crate::error::LookupError;
use crate::{ndl, openbd};

/// Bibliographic lookup client trying openBD first and NDL second.
///
/// Each fetch builds its own short-lived `reqwest::Client`, issues exactly
/// one request, and drops the client on completion — no pooling or reuse
/// across calls, and the two sources are never queried concurrently.
#[derive(Debug, Clone)]
pub struct LookupClient {
    openbd_base_url: String,
    ndl_base_url: String,
    timeout_secs: u64,
}

impl LookupClient {
    #[must_use]
    pub fn new(openbd_base_url: &str, ndl_base_url: &str, timeout_secs: u64) -> Self {
        Self {
            openbd_base_url: openbd_base_url.trim_end_matches('/').to_owned(),
            ndl_base_url: ndl_base_url.trim_end_matches('/').to_owned(),
            timeout_secs,
        }
    }

    /// Looks up bibliographic data for `isbn`.
    ///
    /// The first source to yield a populated record wins wholly; fields are
    /// never merged across sources, so NDL is only contacted on a total
    /// openBD miss. Transport failures, non-success statuses, and parse
    /// failures at a source are logged and treated as a miss for that
    /// source, never surfaced to the caller.
    pub async fn lookup(&self, isbn: &str) -> Option<BookInfo> {
        let isbn = normalize_isbn(isbn);

        match self.fetch_openbd(&isbn).await {
            Ok(Some(info)) => return Some(info),
            Ok(None) => {
                tracing::debug!(isbn = %isbn, "openBD miss; falling back to NDL");
            }
            Err(e) => {
                tracing::warn!(isbn = %isbn, error = %e, "openBD lookup failed; falling back to NDL");
            }
        }

        match self.fetch_ndl(&isbn).await {
            Ok(found) => found,
            Err(e) => {
                tracing::warn!(isbn = %isbn, error = %e, "NDL lookup failed");
                None
            }
        }
    }

    async fn fetch_openbd(&self, isbn: &str) -> Result<Option<BookInfo>, LookupError> {
        let url = format!("{}/get?isbn={isbn}", self.openbd_base_url);
        let body = self.get_text(&url).await?;

        let payload: openbd::OpenBdPayload =
            serde_json::from_str(&body).map_err(|source| LookupError::Deserialize {
                url,
                source,
            })?;

        // Slot 0 corresponds to the queried ISBN; null means "not in catalog".
        let Some(record) = payload.into_iter().next().flatten() else {
            return Ok(None);
        };

        let info = openbd::book_info_from_record(record, isbn);
        Ok((!info.is_empty()).then_some(info))
    }

    async fn fetch_ndl(&self, isbn: &str) -> Result<Option<BookInfo>, LookupError> {
        let url = format!("{}/opensearch?isbn={isbn}", self.ndl_base_url);
        let body = self.get_text(&url).await?;

        let info = ndl::parse_opensearch(&body, isbn)?;
        Ok(info.filter(|i| !i.is_empty()))
    }

    /// One request per short-lived client; dropped on return either way.
    async fn get_text(&self, url: &str) -> Result<String, LookupError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(self.timeout_secs))
            .build()?;

        let response = client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        Ok(response.text().await?)
    }
}
