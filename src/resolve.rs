use anyhow::{Context, Result};
use serde_json::{Map, Value};
use url::Url;

use crate::fetch::{FetchJson, UrlRewriter};
use crate::model::{classify, BoundingBox, Document, Node, NodeKind, Stratum};
use crate::registry::NodeRegistry;

mod collections;
mod container;
mod landing;
mod media;

pub use self::media::{classify_media_type, MediaKind, I3S_CONVERSION_BASE};

/// Tunables for reference resolution.
#[derive(Clone, Debug)]
pub struct ResolveOptions {
    /// Base prefixed to I3S distribution URLs so they stream as 3D Tiles.
    pub i3s_conversion_base: String,
    /// Depth cap for eager expansion of nested references.
    pub max_depth: usize,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            i3s_conversion_base: I3S_CONVERSION_BASE.to_string(),
            max_depth: 8,
        }
    }
}

/// A lazily-resolved pointer at a container endpoint. Resolution is
/// memoized; the cached outcome is the id of the produced root node, or
/// `None` when the endpoint had nothing to show.
#[derive(Clone, Debug)]
pub struct Reference {
    pub id: String,
    pub name: Option<String>,
    pub url: String,
    pub bbox: Option<BoundingBox>,
    pub override_json: Option<Map<String, Value>>,
    target: Option<Option<String>>,
}

impl Reference {
    pub fn new(id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            url: url.into(),
            bbox: None,
            override_json: None,
            target: None,
        }
    }

    /// Rebuilds a lazy reference from a registered reference node.
    pub fn from_node(node: &Node) -> Option<Self> {
        if node.kind() != NodeKind::Reference {
            return None;
        }
        let url = node.url()?.to_string();
        let bbox = node
            .get("bbox")
            .and_then(|v| serde_json::from_value(v.clone()).ok());
        let override_json = node.get("override").and_then(|v| v.as_object().cloned());
        Some(Self {
            id: node.id().to_string(),
            name: node.name().map(str::to_string),
            url,
            bbox,
            override_json,
            target: None,
        })
    }

    /// Resolved target node id, fetching on first use.
    pub fn resolve(&mut self, resolver: &mut Resolver) -> Result<Option<String>> {
        if let Some(cached) = &self.target {
            return Ok(cached.clone());
        }
        let outcome = resolver.load_reference(self)?;
        self.target = Some(outcome.clone());
        Ok(outcome)
    }

    /// Drops the memoized target so the next access re-fetches.
    pub fn refresh(&mut self) {
        self.target = None;
    }

    fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }

    fn valid_bbox(&self) -> Option<BoundingBox> {
        self.bbox.filter(BoundingBox::is_valid)
    }
}

/// Everything one resolution needs from the host: the node registry, the
/// fetch and proxy collaborators, and the tunables.
pub struct Resolver<'a> {
    pub registry: &'a mut NodeRegistry,
    pub fetcher: &'a dyn FetchJson,
    pub rewriter: &'a dyn UrlRewriter,
    pub options: ResolveOptions,
}

impl Resolver<'_> {
    /// Fetches the reference's URL, classifies the response and builds the
    /// matching subtree. `Ok(None)` means the endpoint had nothing usable;
    /// only a failed fetch is an error.
    pub fn load_reference(&mut self, reference: &Reference) -> Result<Option<String>> {
        let mut url = Url::parse(&reference.url)
            .with_context(|| format!("parse reference url {}", reference.url))?;
        // The box rides on this primary request only; the collections
        // re-fetch behind a landing page's data link never carries it.
        // Appended by hand to keep the comma-joined value unescaped.
        if let Some(q) = reference.valid_bbox().and_then(|b| b.query_value()) {
            let query = match url.query() {
                Some(existing) if !existing.is_empty() => format!("{}&bbox={}", existing, q),
                _ => format!("bbox={}", q),
            };
            url.set_query(Some(&query));
        }
        let url = self.rewriter.rewrite(url);
        let json = self.fetcher.fetch_json(&url)?;

        match classify(&json) {
            Document::Container(doc) => self.load_container(reference, &url, &doc).map(Some),
            Document::Collections(doc) => self.load_collections(reference, &url, &doc).map(Some),
            Document::LandingPage(doc) => self.load_landing_page(reference, &url, &doc),
            Document::Unrecognized => {
                tracing::debug!(url = %reference.url, "unrecognized document shape");
                Ok(None)
            }
        }
    }

    /// Resolves `reference`, then eagerly resolves every nested reference it
    /// produced, down to the configured depth cap.
    pub fn expand(&mut self, reference: &mut Reference) -> Result<Option<String>> {
        let Some(root_id) = reference.resolve(self)? else {
            return Ok(None);
        };
        self.expand_from(&root_id, 0)?;
        Ok(Some(root_id))
    }

    fn expand_from(&mut self, group_id: &str, depth: usize) -> Result<()> {
        let member_ids = match self.registry.get(group_id) {
            Some(node) => node.members(),
            None => return Ok(()),
        };
        for member_id in member_ids {
            let nested = self.registry.get(&member_id).and_then(Reference::from_node);
            match nested {
                Some(mut nested) => {
                    if depth + 1 >= self.options.max_depth {
                        tracing::debug!(node = %member_id, "expansion depth cap reached");
                        continue;
                    }
                    // A sibling's failure does not abort the walk; the
                    // reference node simply stays unresolved.
                    match nested.resolve(self) {
                        Ok(Some(id)) => self.expand_from(&id, depth + 1)?,
                        Ok(None) => {}
                        Err(err) => {
                            tracing::warn!(node = %member_id, error = %format!("{:#}", err), "nested resolution failed");
                        }
                    }
                }
                // Plain sub-groups do not consume a depth level.
                None => self.expand_from(&member_id, depth)?,
            }
        }
        Ok(())
    }

    /// Registers a nested lazy reference node for a child collection.
    fn add_nested_reference(
        &mut self,
        id: &str,
        name: Option<&str>,
        target: &Url,
        bbox: Option<BoundingBox>,
        override_json: Option<Value>,
    ) -> Result<()> {
        let bbox_value = match bbox.filter(BoundingBox::is_valid) {
            Some(bbox) => Some(serde_json::to_value(bbox).context("serialize bbox")?),
            None => None,
        };
        let node = self.registry.obtain(id, NodeKind::Reference);
        if let Some(name) = name {
            node.set(Stratum::Definition, "name", name);
        }
        node.set(Stratum::Definition, "url", target.to_string());
        node.set(Stratum::Definition, "isGroup", true);
        if let Some(bbox_value) = bbox_value {
            node.set(Stratum::Definition, "bbox", bbox_value);
        }
        if let Some(override_json) = override_json {
            node.set(Stratum::Definition, "override", override_json);
        }
        Ok(())
    }
}

fn dedupe_members(ids: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    ids.into_iter().filter(|id| seen.insert(id.clone())).collect()
}
