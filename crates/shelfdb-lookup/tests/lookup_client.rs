//! Integration tests for `LookupClient::lookup`.
//!
//! Uses `wiremock` to stand up a local HTTP server per test so no real
//! network traffic is made. One server plays both sources: openBD under
//! `/get`, NDL under `/opensearch`. Precedence tests pin the source-ordering
//! contract via `expect(0)` on the source that must not be contacted.

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shelfdb_lookup::LookupClient;

fn client_for(server: &MockServer) -> LookupClient {
    LookupClient::new(&server.uri(), &server.uri(), 5)
}

/// openBD payload with a populated slot 0, matching the live field layout.
fn openbd_hit() -> serde_json::Value {
    json!([{
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
    }])
}

const NDL_HIT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:dc="http://purl.org/dc/elements/1.1/">
  <channel>
    <title>results</title>
    <item>
      <title>T2</title>
      <author>A2</author>
      <dc:publisher>P2</dc:publisher>
    </item>
  </channel>
</rss>"#;

const NDL_MISS: &str = r#"<rss><channel><title>no results</title></channel></rss>"#;

#[tokio::test]
async fn primary_hit_wins_and_secondary_is_not_contacted() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/get"))
        .and(query_param("isbn", "9784000000000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(openbd_hit()))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/opensearch"))
        .respond_with(ResponseTemplate::new(200).set_body_string(NDL_HIT))
        .expect(0)
        .mount(&server)
        .await;

    let info = client_for(&server)
        .lookup("9784000000000")
        .await
        .expect("expected a populated result from openBD");

    assert_eq!(info.isbn, "9784000000000");
    assert_eq!(info.title.as_deref(), Some("T"));
    assert_eq!(info.author.as_deref(), Some("A"));
    assert_eq!(info.publisher.as_deref(), Some("P"));
    assert_eq!(info.page_count, Some(200));
    assert_eq!(info.size.as_deref(), Some("X"));
}

#[tokio::test]
async fn null_primary_slot_falls_back_to_secondary() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/get"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([null])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/opensearch"))
        .and(query_param("isbn", "111"))
        .respond_with(ResponseTemplate::new(200).set_body_string(NDL_HIT))
        .mount(&server)
        .await;

    let info = client_for(&server)
        .lookup("111")
        .await
        .expect("expected the NDL result");

    assert_eq!(info.isbn, "111");
    assert_eq!(info.title.as_deref(), Some("T2"));
    assert_eq!(info.author.as_deref(), Some("A2"));
    assert_eq!(info.publisher.as_deref(), Some("P2"));
    assert!(info.page_count.is_none());
    assert!(info.size.is_none());
}

#[tokio::test]
async fn both_sources_missing_yields_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/get"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([null])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/opensearch"))
        .respond_with(ResponseTemplate::new(200).set_body_string(NDL_MISS))
        .mount(&server)
        .await;

    assert!(client_for(&server).lookup("111").await.is_none());
}

#[tokio::test]
async fn primary_server_error_falls_back_to_secondary() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/get"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/opensearch"))
        .respond_with(ResponseTemplate::new(200).set_body_string(NDL_HIT))
        .mount(&server)
        .await;

    let info = client_for(&server).lookup("111").await.unwrap();
    assert_eq!(info.title.as_deref(), Some("T2"));
}

#[tokio::test]
async fn malformed_primary_body_falls_back_to_secondary() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/get"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/opensearch"))
        .respond_with(ResponseTemplate::new(200).set_body_string(NDL_HIT))
        .mount(&server)
        .await;

    let info = client_for(&server).lookup("111").await.unwrap();
    assert_eq!(info.title.as_deref(), Some("T2"));
}

#[tokio::test]
async fn malformed_secondary_body_yields_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/get"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([null])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/opensearch"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<rss><channel><item>"))
        .mount(&server)
        .await;

    assert!(client_for(&server).lookup("111").await.is_none());
}

#[tokio::test]
async fn all_empty_primary_record_is_a_miss() {
    let server = MockServer::start().await;

    // Present slot whose every mapped field is empty: no usable data.
    Mock::given(method("GET"))
        .and(path("/get"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"summary": {"isbn": "111", "title": "", "author": ""}}])),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/opensearch"))
        .respond_with(ResponseTemplate::new(200).set_body_string(NDL_HIT))
        .mount(&server)
        .await;

    let info = client_for(&server).lookup("111").await.unwrap();
    assert_eq!(info.title.as_deref(), Some("T2"));
}

#[tokio::test]
async fn fullwidth_isbn_is_normalized_before_the_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/get"))
        .and(query_param("isbn", "9784000000000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(openbd_hit()))
        .mount(&server)
        .await;

    let info = client_for(&server)
        .lookup("９７８４０００００００００")
        .await
        .expect("normalized ISBN should hit the mocked route");
    assert_eq!(info.isbn, "9784000000000");
}
