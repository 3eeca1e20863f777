use crate::*;
use crate::google::parse_search_response;
use crate::html::html_to_text;
use pc_core::config::SearchConfig;
use pc_core::error::PcError;
use serde_json::json;
use std::time::Duration;

// ========== Response Parsing ==========

#[test]
fn test_parse_items() {
    let body = json!({
        "items": [
            {"link": "https://a.example", "title": "A", "snippet": "first"},
            {"link": "https://b.example", "title": "B"},
        ]
    });
    let hits = parse_search_response(&body, 5).unwrap();
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0], SearchHit::new("https://a.example", "A", "first"));
    assert_eq!(hits[1].snippet, "");
}

#[test]
fn test_parse_caps_results() {
    let items: Vec<_> = (0..8)
        .map(|i| json!({"link": format!("https://{i}.example"), "title": i.to_string()}))
        .collect();
    let hits = parse_search_response(&json!({ "items": items }), 5).unwrap();
    assert_eq!(hits.len(), 5);
    assert_eq!(hits[4].url, "https://4.example");
}

#[test]
fn test_parse_no_items_is_empty() {
    let hits = parse_search_response(&json!({"searchInformation": {"totalResults": "0"}}), 5).unwrap();
    assert!(hits.is_empty());
}

#[test]
fn test_parse_malformed() {
    assert!(matches!(
        parse_search_response(&json!({"items": "nope"}), 5),
        Err(SearchError::Malformed(_))
    ));
    assert!(parse_search_response(&json!({"items": [{"title": "no link"}]}), 5).is_err());
}

#[test]
fn test_parse_api_error() {
    let body = json!({"error": {"code": 403, "message": "quota exceeded"}});
    let err = parse_search_response(&body, 5).unwrap_err();
    assert!(err.to_string().contains("quota exceeded"));
}

// ========== HTML ==========

#[test]
fn test_html_strips_tags_and_scripts() {
    let html = "<html><head><style>p{color:red}</style><script>var x = 1;</script></head>\
        <body><h1>Title</h1><p>Hello <b>world</b></p><!-- hidden --></body></html>";
    assert_eq!(html_to_text(html), "Title\nHello world");
}

#[test]
fn test_html_entities() {
    assert_eq!(html_to_text("<p>Fish &amp; chips &#8211; &lt;3&nbsp;&#x41;</p>"), "Fish & chips \u{2013} <3 A");
}

#[test]
fn test_html_named_and_hex_entities() {
    let text = html_to_text("<p>Caf&eacute; cr&egrave;me &mdash; d&#X1EB9;p &copy;</p>");
    assert_eq!(text, "Café crème \u{2014} dẹp ©");
}

#[test]
fn test_html_title_hidden_blocks_split() {
    let html = "<html><head><title>Site name</title></head>\
        <body><ul><li>First&nbsp;item</li><li>Second   item</li></ul></body></html>";
    assert_eq!(html_to_text(html), "First item\nSecond item");
}

#[test]
fn test_html_plain_text_passthrough() {
    assert_eq!(html_to_text("just text"), "just text");
}

// ========== Backends ==========

#[tokio::test]
async fn test_null_search_finds_nothing() {
    let search = NullSearch;
    assert!(search.search("anything", 5).await.unwrap().is_empty());
    assert_eq!(search.fetch("https://example.com").await.unwrap(), "");
}

#[test]
fn test_google_requires_credentials() {
    let cfg = SearchConfig::default();
    assert!(matches!(
        GoogleSearch::new(&cfg, Duration::from_secs(10)),
        Err(SearchError::NotConfigured)
    ));
}

#[test]
fn test_google_builds_with_credentials() {
    let cfg = SearchConfig {
        api_key: Some("key".into()),
        engine_id: Some("cx".into()),
        ..Default::default()
    };
    assert!(GoogleSearch::new(&cfg, Duration::from_secs(10)).is_ok());
}

#[test]
fn test_search_error_into_collaborator() {
    let err: PcError = SearchError::Status(503).into();
    assert!(matches!(err, PcError::Collaborator(ref m) if m.contains("503")));
}
