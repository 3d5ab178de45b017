use serde::Deserialize;
use serde_json::Value;

/// One entry of a `links` array. Only the `self`, `data` and `item`/`items`
/// relations are significant to the resolver; other relations are carried
/// but ignored.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Link {
    #[serde(default)]
    pub rel: Option<String>,
    #[serde(default)]
    pub href: Option<String>,
    #[serde(default, rename = "type")]
    pub media_type: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

impl Link {
    pub fn is_rel(&self, rel: &str) -> bool {
        self.rel.as_deref() == Some(rel)
    }
}

/// One entry of a container's `content` array: a distribution with a
/// declared media type.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ContentEntry {
    #[serde(default)]
    pub href: Option<String>,
    #[serde(default)]
    pub rel: Option<String>,
    #[serde(default, rename = "type")]
    pub media_type: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// One entry of a collections list. Entries either nest further
/// (`children` non-empty, addressed through a `self` link) or carry
/// distributions in `links`/`content`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct CollectionEntry {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub links: Vec<Link>,
    #[serde(default)]
    pub children: Vec<Value>,
    #[serde(default)]
    pub content: Vec<ContentEntry>,
}

/// An `id`-bearing container document.
#[derive(Clone, Debug, Deserialize)]
pub struct Container {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub children: Vec<CollectionEntry>,
    #[serde(default)]
    pub content: Vec<ContentEntry>,
    #[serde(default)]
    pub links: Vec<Link>,
}

/// A collections list. Current servers publish `collections`; legacy ones
/// publish `children`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Collections {
    #[serde(default)]
    pub collections: Vec<CollectionEntry>,
    #[serde(default)]
    pub children: Vec<CollectionEntry>,
}

impl Collections {
    pub fn entries(&self) -> &[CollectionEntry] {
        if !self.collections.is_empty() {
            &self.collections
        } else {
            &self.children
        }
    }
}

/// A landing page: nothing but links, one of which (`rel == "data"`) leads
/// to the collections list.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct LandingPage {
    #[serde(default)]
    pub links: Vec<Link>,
}

/// A fetched API document, classified by shape.
#[derive(Clone, Debug)]
pub enum Document {
    Container(Container),
    Collections(Collections),
    LandingPage(LandingPage),
    Unrecognized,
}

impl Document {
    pub fn shape_name(&self) -> &'static str {
        match self {
            Document::Container(_) => "container",
            Document::Collections(_) => "collections",
            Document::LandingPage(_) => "landing-page",
            Document::Unrecognized => "unrecognized",
        }
    }
}

/// Classifies a raw JSON document. Key checks run in priority order: an
/// `id`-bearing document is always a container, even when `collections` or
/// `links` keys are also present. Documents that fail to deserialize as the
/// shape their keys announce are treated as unrecognized.
pub fn classify(json: &Value) -> Document {
    let Some(obj) = json.as_object() else {
        return Document::Unrecognized;
    };
    if obj.contains_key("id") {
        return serde_json::from_value(json.clone())
            .map(Document::Container)
            .unwrap_or(Document::Unrecognized);
    }
    if obj.contains_key("collections") || obj.contains_key("children") {
        return serde_json::from_value(json.clone())
            .map(Document::Collections)
            .unwrap_or(Document::Unrecognized);
    }
    if obj.contains_key("links") {
        return serde_json::from_value(json.clone())
            .map(Document::LandingPage)
            .unwrap_or(Document::Unrecognized);
    }
    Document::Unrecognized
}

/// Href of the first `rel == "self"` link that actually carries one.
pub fn self_link_href(links: &[Link]) -> Option<&str> {
    links
        .iter()
        .filter(|l| l.is_rel("self"))
        .find_map(|l| l.href.as_deref())
}

#[cfg(test)]
#[path = "../tests/model/document_tests.rs"]
mod tests;
