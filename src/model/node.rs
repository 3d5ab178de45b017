use std::collections::BTreeMap;

use serde_json::{Map, Value};

/// Concrete node kinds understood by the host catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    /// Materialized group holding an ordered member list.
    Group,
    /// Streamable 3D Tiles distribution.
    Tiles3d,
    /// Distribution with a media type the viewer cannot display.
    Unsupported,
    /// Lazily-resolved pointer at another container endpoint.
    Reference,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Group => "group",
            NodeKind::Tiles3d => "3d-tiles",
            NodeKind::Unsupported => "unsupported",
            NodeKind::Reference => "ogc3d",
        }
    }
}

/// Attribute layers, lowest priority first. A later stratum overrides an
/// earlier one per attribute, so user-supplied overrides survive a refresh
/// of the data-driven values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stratum {
    /// Values derived from the upstream API documents.
    Definition,
    /// Values supplied by a reference's `override` block or the user.
    Override,
}

/// A catalog node: an id, a concrete kind, and layered attributes.
#[derive(Clone, Debug)]
pub struct Node {
    id: String,
    kind: NodeKind,
    strata: BTreeMap<Stratum, Map<String, Value>>,
}

impl Node {
    pub fn new(id: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            kind,
            strata: BTreeMap::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Sets one attribute on the given stratum.
    pub fn set(&mut self, stratum: Stratum, key: &str, value: impl Into<Value>) {
        self.strata
            .entry(stratum)
            .or_default()
            .insert(key.to_string(), value.into());
    }

    /// Merges every key of `patch` onto the given stratum.
    pub fn merge(&mut self, stratum: Stratum, patch: &Map<String, Value>) {
        let attrs = self.strata.entry(stratum).or_default();
        for (key, value) in patch {
            attrs.insert(key.clone(), value.clone());
        }
    }

    /// Drops every attribute on the given stratum, leaving other strata
    /// untouched.
    pub fn clear_stratum(&mut self, stratum: Stratum) {
        self.strata.remove(&stratum);
    }

    /// Effective value of an attribute: the highest stratum that defines it
    /// wins.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.strata
            .iter()
            .rev()
            .find_map(|(_, attrs)| attrs.get(key))
    }

    pub fn name(&self) -> Option<&str> {
        self.get("name")?.as_str()
    }

    pub fn url(&self) -> Option<&str> {
        self.get("url")?.as_str()
    }

    /// Ordered member ids of a group node; empty for leaves.
    pub fn members(&self) -> Vec<String> {
        match self.get("members").and_then(Value::as_array) {
            Some(ids) => ids
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn set_members(&mut self, ids: Vec<String>) {
        let ids = ids.into_iter().map(Value::String).collect::<Vec<_>>();
        self.set(Stratum::Definition, "members", Value::Array(ids));
    }

    /// Flattened description (effective attributes plus `id` and `type`),
    /// for hosts that consume plain JSON.
    pub fn describe(&self) -> Map<String, Value> {
        let mut out = Map::new();
        for attrs in self.strata.values() {
            for (key, value) in attrs {
                out.insert(key.clone(), value.clone());
            }
        }
        out.insert("id".to_string(), Value::String(self.id.clone()));
        out.insert(
            "type".to_string(),
            Value::String(self.kind.as_str().to_string()),
        );
        out
    }
}

#[cfg(test)]
#[path = "../tests/model/node_tests.rs"]
mod tests;
