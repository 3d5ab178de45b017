mod common;

use anyhow::Result;
use serde_json::json;

use canopy::fetch::DirectUrls;
use canopy::model::BoundingBox;
use canopy::registry::NodeRegistry;
use canopy::resolve::{Reference, ResolveOptions, Resolver};

use common::MapFetcher;

const NY: BoundingBox = BoundingBox {
    west: Some(-74.021),
    south: Some(40.701),
    east: Some(-73.990),
    north: Some(40.775),
};

const NY_QUERY: &str = "-74.021,40.701,-73.99,40.775";

#[test]
fn container_fetches_carry_the_bbox_query() -> Result<()> {
    let fetch_url = format!("https://api.test/c1?bbox={}", NY_QUERY);
    let mut fetcher = MapFetcher::new();
    fetcher.insert(
        &fetch_url,
        json!({"id": "c1", "children": [
            {"id": "k1", "links": [{"rel": "self", "href": "k1"}]}
        ]}),
    );

    let mut registry = NodeRegistry::new();
    let mut resolver = Resolver {
        registry: &mut registry,
        fetcher: &fetcher,
        rewriter: &DirectUrls,
        options: ResolveOptions::default(),
    };
    let mut reference = Reference::new("root", "https://api.test/c1");
    reference.bbox = Some(NY);

    reference.resolve(&mut resolver)?.expect("root group");
    assert_eq!(fetcher.fetched(), vec![fetch_url]);

    // Every nested group reference carries the identical four edges.
    let kid = registry.get("root/children/k1").expect("kid reference");
    assert_eq!(
        kid.get("bbox"),
        Some(&json!({"west": -74.021, "south": 40.701, "east": -73.99, "north": 40.775}))
    );
    Ok(())
}

#[test]
fn landing_page_refetch_never_carries_the_bbox_query() -> Result<()> {
    let landing_url = format!("https://api.test/?bbox={}", NY_QUERY);
    let mut fetcher = MapFetcher::new();
    fetcher.insert(
        &landing_url,
        json!({"links": [{"rel": "data", "href": "collections"}]}),
    );
    fetcher.insert(
        "https://api.test/collections",
        json!({"collections": [
            {"id": "nested", "children": [{}], "links": [{"rel": "self", "href": "nested/"}]}
        ]}),
    );

    let mut registry = NodeRegistry::new();
    let mut resolver = Resolver {
        registry: &mut registry,
        fetcher: &fetcher,
        rewriter: &DirectUrls,
        options: ResolveOptions::default(),
    };
    let mut reference = Reference::new("root", "https://api.test/");
    reference.bbox = Some(NY);

    reference.resolve(&mut resolver)?.expect("root group");
    assert_eq!(
        fetcher.fetched(),
        vec![landing_url, "https://api.test/collections".to_string()]
    );

    // The box still propagates onto references created from the list.
    let nested = registry.get("root/nested").expect("nested reference");
    assert_eq!(
        nested.get("bbox"),
        Some(&json!({"west": -74.021, "south": 40.701, "east": -73.99, "north": 40.775}))
    );
    Ok(())
}

#[test]
fn partial_boxes_neither_filter_nor_propagate() -> Result<()> {
    let mut fetcher = MapFetcher::new();
    fetcher.insert(
        "https://api.test/c1",
        json!({"id": "c1", "children": [
            {"id": "k1", "links": [{"rel": "self", "href": "k1"}]}
        ]}),
    );

    let mut registry = NodeRegistry::new();
    let mut resolver = Resolver {
        registry: &mut registry,
        fetcher: &fetcher,
        rewriter: &DirectUrls,
        options: ResolveOptions::default(),
    };
    let mut reference = Reference::new("root", "https://api.test/c1");
    reference.bbox = Some(BoundingBox {
        west: Some(-74.021),
        ..Default::default()
    });

    reference.resolve(&mut resolver)?.expect("root group");
    assert_eq!(fetcher.fetched(), vec!["https://api.test/c1".to_string()]);

    let kid = registry.get("root/children/k1").expect("kid reference");
    assert_eq!(kid.get("bbox"), None);
    Ok(())
}
