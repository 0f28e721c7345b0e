use thiserror::Error;

/// Failure at a single bibliographic source.
///
/// These never cross the public lookup boundary: [`crate::LookupClient`]
/// collapses them into a miss for that source and moves on. Callers see only
/// "found" or "not found".
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("JSON deserialization error for {url}: {source}")]
    Deserialize {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),
}
