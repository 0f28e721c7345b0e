//! openBD response types and field mapping (primary bibliographic source).
//!
//! ## Observed payload shape
//!
//! The `/get` endpoint answers with a batch-style JSON array: element 0
//! corresponds to the queried ISBN and is `null` when the book is not in the
//! catalog. A present element carries a flat `summary` section plus a richer
//! ONIX-style nested section; only the paths mapped below are modeled, and
//! every one of them may be absent (`#[serde(default)]` throughout).

use serde::Deserialize;
use shelfdb_core::BookInfo;

/// Batch response from `GET /get?isbn=...`; one slot per queried ISBN.
pub(crate) type OpenBdPayload = Vec<Option<OpenBdRecord>>;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct OpenBdRecord {
    #[serde(default)]
    summary: OpenBdSummary,
    #[serde(default)]
    onix: OpenBdOnix,
}

/// Flat convenience section; all fields are plain strings.
#[derive(Debug, Default, Deserialize)]
struct OpenBdSummary {
    #[serde(default)]
    isbn: Option<String>,
    #[serde(default)]
    title: Option<String>,
    /// Single credit string; multiple authors arrive space-separated,
    /// e.g. `"著者A／著 著者B／著"`.
    #[serde(default)]
    author: Option<String>,
    #[serde(default)]
    publisher: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct OpenBdOnix {
    #[serde(rename = "DescriptiveDetail", default)]
    descriptive_detail: OpenBdDescriptiveDetail,
}

#[derive(Debug, Default, Deserialize)]
struct OpenBdDescriptiveDetail {
    #[serde(rename = "Extent", default)]
    extent: Vec<OpenBdExtent>,
    #[serde(rename = "ProductFormDetail", default)]
    product_form_detail: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct OpenBdExtent {
    /// Page count as a decimal string, e.g. `"200"`.
    #[serde(rename = "ExtentValue", default)]
    extent_value: Option<String>,
}

/// Maps a present openBD record onto the canonical [`BookInfo`] shape.
///
/// Only the first whitespace-separated token of the credit string is kept as
/// the author; the source does not split multi-author credits and neither do
/// we. Missing nested paths and empty strings become absent fields, never
/// errors.
pub(crate) fn book_info_from_record(record: OpenBdRecord, isbn: &str) -> BookInfo {
    let OpenBdRecord { summary, onix } = record;

    let author = summary
        .author
        .as_deref()
        .and_then(|credit| credit.split_whitespace().next())
        .map(str::to_owned);

    let detail = onix.descriptive_detail;
    let page_count = detail
        .extent
        .first()
        .and_then(|e| e.extent_value.as_deref())
        .and_then(|v| v.parse::<i32>().ok());

    BookInfo {
        isbn: summary
            .isbn
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| isbn.to_owned()),
        title: summary.title.filter(|s| !s.is_empty()),
        author: author.filter(|s| !s.is_empty()),
        publisher: summary.publisher.filter(|s| !s.is_empty()),
        page_count,
        size: detail.product_form_detail.filter(|s| !s.is_empty()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_from_json(json: &str) -> OpenBdRecord {
        serde_json::from_str(json).expect("valid openBD record fixture")
    }

    #[test]
    fn full_record_maps_every_field() {
        let record = record_from_json(
            r#"{
                "summary": {
                    "isbn": "9784000000000",
                    "title": "T",
                    "author": "A B",
                    "publisher": "P"
                },
                "onix": {
                    "DescriptiveDetail": {
                        "Extent": [{"ExtentValue": "200"}],
                        "ProductFormDetail": "X"
                    }
                }
            }"#,
        );
        let info = book_info_from_record(record, "9784000000000");

        assert_eq!(info.isbn, "9784000000000");
        assert_eq!(info.title.as_deref(), Some("T"));
        assert_eq!(info.author.as_deref(), Some("A"));
        assert_eq!(info.publisher.as_deref(), Some("P"));
        assert_eq!(info.page_count, Some(200));
        assert_eq!(info.size.as_deref(), Some("X"));
    }

    #[test]
    fn author_keeps_only_first_token() {
        let record = record_from_json(r#"{"summary": {"author": "著者A／著 著者B／著"}}"#);
        let info = book_info_from_record(record, "111");
        assert_eq!(info.author.as_deref(), Some("著者A／著"));
    }

    #[test]
    fn empty_author_becomes_absent() {
        let record = record_from_json(r#"{"summary": {"title": "T", "author": ""}}"#);
        let info = book_info_from_record(record, "111");
        assert!(info.author.is_none());
    }

    #[test]
    fn missing_onix_paths_yield_absent_fields() {
        let record = record_from_json(r#"{"summary": {"title": "T"}}"#);
        let info = book_info_from_record(record, "111");
        assert!(info.page_count.is_none());
        assert!(info.size.is_none());
    }

    #[test]
    fn empty_extent_list_yields_absent_page_count() {
        let record =
            record_from_json(r#"{"onix": {"DescriptiveDetail": {"Extent": []}}}"#);
        let info = book_info_from_record(record, "111");
        assert!(info.page_count.is_none());
    }

    #[test]
    fn non_numeric_extent_value_yields_absent_page_count() {
        let record = record_from_json(
            r#"{"onix": {"DescriptiveDetail": {"Extent": [{"ExtentValue": "n/a"}]}}}"#,
        );
        let info = book_info_from_record(record, "111");
        assert!(info.page_count.is_none());
    }

    #[test]
    fn missing_summary_isbn_falls_back_to_queried_isbn() {
        let record = record_from_json(r#"{"summary": {"title": "T"}}"#);
        let info = book_info_from_record(record, "9784000000000");
        assert_eq!(info.isbn, "9784000000000");
    }

    #[test]
    fn payload_with_null_slot_deserializes() {
        let payload: OpenBdPayload = serde_json::from_str("[null]").unwrap();
        assert!(payload.into_iter().next().flatten().is_none());
    }
}
