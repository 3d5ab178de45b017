use super::*;

use serde_json::json;

#[test]
fn later_strata_override_earlier_ones() {
    let mut node = Node::new("a", NodeKind::Group);
    node.set(Stratum::Definition, "name", "from api");
    node.set(Stratum::Override, "name", "user name");
    assert_eq!(node.name(), Some("user name"));

    // Refreshing the data-driven value must not clobber the override.
    node.set(Stratum::Definition, "name", "refreshed");
    assert_eq!(node.name(), Some("user name"));
}

#[test]
fn members_round_trip_in_order() {
    let mut node = Node::new("g", NodeKind::Group);
    node.set_members(vec!["g/a".to_string(), "g/b".to_string()]);
    assert_eq!(node.members(), vec!["g/a", "g/b"]);
}

#[test]
fn describe_flattens_strata_and_tags_the_kind() {
    let mut node = Node::new("t", NodeKind::Tiles3d);
    node.set(Stratum::Definition, "url", "https://x/a.json");
    node.set(Stratum::Definition, "name", "api");
    node.set(Stratum::Override, "name", "mine");

    let desc = node.describe();
    assert_eq!(desc["type"], json!("3d-tiles"));
    assert_eq!(desc["id"], json!("t"));
    assert_eq!(desc["name"], json!("mine"));
    assert_eq!(desc["url"], json!("https://x/a.json"));
}
