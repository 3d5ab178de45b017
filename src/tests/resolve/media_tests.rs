use super::*;

use url::Url;

use crate::model::NodeKind;

#[test]
fn both_3dtiles_spellings_are_native() {
    assert_eq!(
        classify_media_type(Some("application/3dtiles+json")),
        MediaKind::Tiles3d
    );
    assert_eq!(
        classify_media_type(Some("application/json+3dtiles")),
        MediaKind::Tiles3d
    );
}

#[test]
fn both_i3s_spellings_convert() {
    assert_eq!(
        classify_media_type(Some("application/i3s+json")),
        MediaKind::I3s
    );
    assert_eq!(
        classify_media_type(Some("application/json+i3s")),
        MediaKind::I3s
    );
}

#[test]
fn unknown_or_missing_types_are_unsupported() {
    assert_eq!(classify_media_type(Some("text/html")), MediaKind::Unsupported);
    assert_eq!(classify_media_type(None), MediaKind::Unsupported);
}

#[test]
fn i3s_distribution_is_rewritten_through_the_conversion_service() {
    let options = ResolveOptions::default();
    let resolved = Url::parse("https://host/base/x.json").unwrap();
    let mapped = map_distribution(&resolved, Some("application/i3s+json"), &options);
    assert_eq!(mapped.kind, NodeKind::Tiles3d);
    assert_eq!(
        mapped.url,
        format!("{}https://host/base/x.json", I3S_CONVERSION_BASE)
    );
    assert!(mapped.note.is_some());
}

#[test]
fn unsupported_distribution_keeps_url_and_names_the_type() {
    let options = ResolveOptions::default();
    let resolved = Url::parse("https://host/page.html").unwrap();
    let mapped = map_distribution(&resolved, Some("text/html"), &options);
    assert_eq!(mapped.kind, NodeKind::Unsupported);
    assert_eq!(mapped.url, "https://host/page.html");
    assert!(mapped.note.unwrap().contains("text/html"));
}
