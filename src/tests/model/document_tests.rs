use super::*;

use serde_json::json;

#[test]
fn id_takes_priority_over_collections_and_links() {
    let doc = classify(&json!({
        "id": "c1",
        "collections": [],
        "links": [{"rel": "data", "href": "x"}]
    }));
    assert!(matches!(doc, Document::Container(_)));
}

#[test]
fn collections_shape_matches_collections_or_children_keys() {
    assert!(matches!(
        classify(&json!({"collections": []})),
        Document::Collections(_)
    ));
    assert!(matches!(
        classify(&json!({"children": []})),
        Document::Collections(_)
    ));
}

#[test]
fn links_only_is_a_landing_page() {
    let doc = classify(&json!({"links": [{"rel": "self", "href": "https://x/"}]}));
    assert!(matches!(doc, Document::LandingPage(_)));
}

#[test]
fn anything_else_is_unrecognized() {
    assert!(matches!(classify(&json!({"foo": 1})), Document::Unrecognized));
    assert!(matches!(classify(&json!([1, 2])), Document::Unrecognized));
    assert!(matches!(classify(&json!("nope")), Document::Unrecognized));
}

#[test]
fn legacy_children_entries_are_used_when_collections_absent() {
    let doc = classify(&json!({"children": [{"id": "a"}]}));
    let Document::Collections(collections) = doc else {
        panic!("expected collections");
    };
    assert_eq!(collections.entries().len(), 1);
    assert_eq!(collections.entries()[0].id.as_deref(), Some("a"));
}

#[test]
fn self_link_href_skips_other_rels_and_missing_hrefs() {
    let links = vec![
        Link {
            rel: Some("data".to_string()),
            href: Some("d".to_string()),
            ..Default::default()
        },
        Link {
            rel: Some("self".to_string()),
            href: None,
            ..Default::default()
        },
        Link {
            rel: Some("self".to_string()),
            href: Some("s".to_string()),
            ..Default::default()
        },
    ];
    assert_eq!(self_link_href(&links), Some("s"));
    assert_eq!(self_link_href(&[]), None);
}
