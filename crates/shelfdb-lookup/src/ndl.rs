//! NDL OpenSearch XML parsing (fallback bibliographic source).
//!
//! The endpoint answers with an RSS-like document; only the first
//! `channel/item` is read. The feed does not carry page counts or sizes, and
//! it does not reliably echo the queried ISBN, so the result's `isbn` is
//! always the one we asked for.

use quick_xml::events::Event;
use quick_xml::Reader;
use shelfdb_core::BookInfo;

use crate::error::LookupError;

/// Parses an NDL OpenSearch response into a [`BookInfo`], or `None` when the
/// feed carries no `item`.
///
/// Extracts `<title>`, `<author>`, and the Dublin-Core `<dc:publisher>` from
/// the first item; repeated elements keep the first occurrence.
///
/// # Errors
///
/// Returns [`LookupError::Xml`] when the document is not well-formed.
pub(crate) fn parse_opensearch(xml: &str, isbn: &str) -> Result<Option<BookInfo>, LookupError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut in_channel = false;
    let mut in_item = false;
    let mut saw_item = false;
    let mut current_tag = String::new();

    let mut title: Option<String> = None;
    let mut author: Option<String> = None;
    let mut publisher: Option<String> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name_buf = e.name().as_ref().to_vec();
                let name = String::from_utf8_lossy(&name_buf).into_owned();
                if name == "channel" {
                    in_channel = true;
                } else if name == "item" && in_channel && !saw_item {
                    in_item = true;
                }
                current_tag = name;
            }
            Ok(Event::End(e)) => {
                let name_buf = e.name().as_ref().to_vec();
                let name = String::from_utf8_lossy(&name_buf);
                if name == "item" && in_item {
                    // First item only; later items are lower-relevance hits.
                    break;
                }
            }
            Ok(Event::Text(e)) => {
                if in_item {
                    let text = e.unescape().unwrap_or_default().into_owned();
                    assign_field(&current_tag, text, &mut title, &mut author, &mut publisher);
                }
            }
            Ok(Event::CData(e)) => {
                if in_item {
                    let text = String::from_utf8_lossy(e.as_ref()).into_owned();
                    assign_field(&current_tag, text, &mut title, &mut author, &mut publisher);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(LookupError::Xml(e)),
            _ => {}
        }
        if in_item {
            saw_item = true;
        }
    }

    if !saw_item {
        return Ok(None);
    }

    Ok(Some(BookInfo {
        isbn: isbn.to_owned(),
        title,
        author,
        publisher,
        page_count: None,
        size: None,
    }))
}

fn assign_field(
    tag: &str,
    text: String,
    title: &mut Option<String>,
    author: &mut Option<String>,
    publisher: &mut Option<String>,
) {
    if text.is_empty() {
        return;
    }
    match tag {
        "title" if title.is_none() => *title = Some(text),
        "author" if author.is_none() => *author = Some(text),
        "dc:publisher" if publisher.is_none() => *publisher = Some(text),
        _ => {}
    }
}
