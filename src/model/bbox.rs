use serde::{Deserialize, Serialize};

/// Geographic extent used to filter containers and collections. Only
/// meaningful when all four edges are present.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    #[serde(default)]
    pub west: Option<f64>,
    #[serde(default)]
    pub south: Option<f64>,
    #[serde(default)]
    pub east: Option<f64>,
    #[serde(default)]
    pub north: Option<f64>,
}

impl BoundingBox {
    pub fn new(west: f64, south: f64, east: f64, north: f64) -> Self {
        Self {
            west: Some(west),
            south: Some(south),
            east: Some(east),
            north: Some(north),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.west.is_some() && self.south.is_some() && self.east.is_some() && self.north.is_some()
    }

    /// Value for the `bbox` query parameter: `west,south,east,north`.
    /// Partial boxes serialize to nothing.
    pub fn query_value(&self) -> Option<String> {
        match (self.west, self.south, self.east, self.north) {
            (Some(w), Some(s), Some(e), Some(n)) => Some(format!("{},{},{},{}", w, s, e, n)),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../tests/model/bbox_tests.rs"]
mod tests;
