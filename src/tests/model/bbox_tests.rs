use super::*;

#[test]
fn query_value_joins_all_four_edges() {
    let bbox = BoundingBox::new(-74.021, 40.701, -73.990, 40.775);
    assert_eq!(
        bbox.query_value().unwrap(),
        "-74.021,40.701,-73.99,40.775"
    );
}

#[test]
fn partial_box_is_invalid_and_serializes_to_nothing() {
    let bbox = BoundingBox {
        west: Some(1.0),
        south: Some(2.0),
        east: None,
        north: Some(4.0),
    };
    assert!(!bbox.is_valid());
    assert_eq!(bbox.query_value(), None);
}

#[test]
fn deserializes_from_catalog_json() {
    let bbox: BoundingBox = serde_json::from_value(serde_json::json!({
        "west": -74.021, "south": 40.701, "east": -73.990, "north": 40.775
    }))
    .unwrap();
    assert!(bbox.is_valid());
    assert_eq!(bbox.north, Some(40.775));
}
