use serde_json::{json, Value};

use crate::model::BoundingBox;

/// One endpoint of a generated seed catalog.
#[derive(Clone, Debug)]
pub struct CatalogEndpoint {
    pub name: String,
    pub url: String,
}

/// Builds the `{"catalog": [...]}` document that seeds a host application
/// with one group per endpoint: an unfiltered "All" reference plus, when a
/// bounding box is given, a filtered sibling. Each reference carries an
/// info section naming the TIE functions it exercises.
pub fn generate_catalog(endpoints: &[CatalogEndpoint], bbox: Option<&BoundingBox>) -> Value {
    let groups = endpoints
        .iter()
        .map(|endpoint| endpoint_group(endpoint, bbox))
        .collect::<Vec<_>>();
    json!({ "catalog": groups })
}

fn endpoint_group(endpoint: &CatalogEndpoint, bbox: Option<&BoundingBox>) -> Value {
    let mut members = vec![json!({
        "name": "All",
        "type": "ogc3d",
        "isGroup": true,
        "url": endpoint.url,
        "override": {
            "info": [
                {
                    "name": "OGC 3D Container and Tiles API",
                    "content": "This is the landing page. Opening this group tests the `LandingPage` TIE function."
                },
                {
                    "name": "OGC 3D Container and Tiles API URL",
                    "content": endpoint.url
                }
            ]
        }
    })];

    if let Some(query) = bbox.and_then(BoundingBox::query_value) {
        members.push(json!({
            "name": "Inside bounding box",
            "type": "ogc3d",
            "isGroup": true,
            "url": endpoint.url,
            "bbox": bbox,
            "override": {
                "info": [
                    {
                        "name": "OGC 3D Container and Tiles API",
                        "content": format!(
                            "This is the landing page. Opening this group tests the `LandingPage` TIE function. \
                             Collections and children in this group will be filtered using `?bbox={}`. This group \
                             also tests the `CollectionsBboxQuery` and `3dContainerBboxQuery` TIE functions.",
                            query
                        )
                    },
                    {
                        "name": "OGC 3D Container and Tiles API URL",
                        "content": endpoint.url
                    }
                ]
            }
        }));
    }

    json!({
        "name": endpoint.name,
        "type": "group",
        "members": members
    })
}

#[cfg(test)]
#[path = "tests/catalog_tests.rs"]
mod tests;
