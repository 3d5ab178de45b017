use anyhow::Result;
use serde_json::json;
use url::Url;

use crate::fetch::resolve_href;
use crate::model::{self_link_href, Container, NodeKind, Stratum};

use super::media::map_distribution;
use super::{dedupe_members, Reference, Resolver};

impl Resolver<'_> {
    /// Materializes an id-bearing container: a root group plus up to three
    /// sub-groups (children, content, links), each created only when it has
    /// members. Content and link items always surface, even when their
    /// media type is unsupported; children without a usable self link do
    /// not.
    pub(super) fn load_container(
        &mut self,
        reference: &Reference,
        base_url: &Url,
        doc: &Container,
    ) -> Result<String> {
        let group_id = reference.id.clone();
        let ref_name = reference
            .name
            .clone()
            .or_else(|| doc.title.clone())
            .unwrap_or_else(|| doc.id.clone());

        let mut members = Vec::new();

        let mut child_ids = Vec::new();
        for child in &doc.children {
            let Some(child_key) = child.id.as_deref() else {
                tracing::debug!("child without id dropped");
                continue;
            };
            let Some(href) = self_link_href(&child.links) else {
                tracing::debug!(child = child_key, "child without self link dropped");
                continue;
            };
            let target = match resolve_href(base_url, href) {
                Ok(url) => url,
                Err(err) => {
                    tracing::warn!(
                        child = child_key,
                        error = %format!("{:#}", err),
                        "unresolvable self link dropped"
                    );
                    continue;
                }
            };
            let target = self.rewriter.rewrite(target);
            let child_id = format!("{}/children/{}", group_id, child_key);
            self.add_nested_reference(
                &child_id,
                child.title.as_deref().or(Some(child_key)),
                &target,
                reference.valid_bbox(),
                None,
            )?;
            child_ids.push(child_id);
        }
        if !child_ids.is_empty() {
            members.push(self.add_subgroup(&group_id, "children", "Children", child_ids));
        }

        let mut content_ids = Vec::new();
        for (i, entry) in doc.content.iter().enumerate() {
            let Some(href) = entry.href.as_deref() else {
                tracing::debug!("content entry without href dropped");
                continue;
            };
            let resolved = match resolve_href(base_url, href) {
                Ok(url) => url,
                Err(err) => {
                    tracing::warn!(
                        href,
                        error = %format!("{:#}", err),
                        "unresolvable content href dropped"
                    );
                    continue;
                }
            };
            let mapped = map_distribution(&resolved, entry.media_type.as_deref(), &self.options);
            let item_id = format!("{}/content/{}", group_id, i);
            let label = entry.title.as_deref().unwrap_or(href);

            let node = self.registry.obtain(&item_id, mapped.kind);
            node.set(
                Stratum::Definition,
                "name",
                format!("{} - {}", ref_name, label),
            );
            if let Some(description) = entry.description.as_deref() {
                node.set(Stratum::Definition, "description", description);
            }
            node.set(Stratum::Definition, "url", mapped.url);
            if let Some(rel) = entry.rel.as_deref() {
                node.set(Stratum::Definition, "rel", rel);
            }
            if let Some(media_type) = entry.media_type.as_deref() {
                node.set(Stratum::Definition, "mediaType", media_type);
            }
            if let Some(note) = mapped.note {
                node.set(
                    Stratum::Definition,
                    "info",
                    json!([{"name": "Notes", "content": note}]),
                );
            }
            content_ids.push(item_id);
        }
        if !content_ids.is_empty() {
            members.push(self.add_subgroup(&group_id, "content", "Content", content_ids));
        }

        let item_links = doc
            .links
            .iter()
            .filter(|l| l.is_rel("item") || l.is_rel("items"))
            .collect::<Vec<_>>();
        let mut link_ids = Vec::new();
        for (i, link) in item_links.iter().enumerate() {
            let Some(href) = link.href.as_deref() else {
                tracing::debug!("item link without href dropped");
                continue;
            };
            let resolved = match resolve_href(base_url, href) {
                Ok(url) => url,
                Err(err) => {
                    tracing::warn!(
                        href,
                        error = %format!("{:#}", err),
                        "unresolvable item link dropped"
                    );
                    continue;
                }
            };
            let mapped = map_distribution(&resolved, link.media_type.as_deref(), &self.options);
            let item_id = format!("{}/links/{}", group_id, i);
            let label = link.title.as_deref().unwrap_or(href);

            let node = self.registry.obtain(&item_id, mapped.kind);
            node.set(
                Stratum::Definition,
                "name",
                format!("{} - {}", ref_name, label),
            );
            node.set(Stratum::Definition, "url", mapped.url);
            if let Some(rel) = link.rel.as_deref() {
                node.set(Stratum::Definition, "rel", rel);
            }
            if let Some(media_type) = link.media_type.as_deref() {
                node.set(Stratum::Definition, "mediaType", media_type);
            }
            if let Some(note) = mapped.note {
                node.set(
                    Stratum::Definition,
                    "info",
                    json!([{"name": "Notes", "content": note}]),
                );
            }
            link_ids.push(item_id);
        }
        if !link_ids.is_empty() {
            members.push(self.add_subgroup(&group_id, "links", "Links", link_ids));
        }

        let group = self.registry.obtain(&group_id, NodeKind::Group);
        group.set(Stratum::Definition, "name", ref_name);
        if let Some(description) = doc.description.as_deref() {
            group.set(Stratum::Definition, "description", description);
        }
        group.set_members(dedupe_members(members));
        if let Some(override_json) = &reference.override_json {
            group.merge(Stratum::Override, override_json);
        }
        Ok(group_id)
    }

    fn add_subgroup(
        &mut self,
        parent_id: &str,
        key: &str,
        name: &str,
        member_ids: Vec<String>,
    ) -> String {
        let sub_id = format!("{}/{}", parent_id, key);
        let sub = self.registry.obtain(&sub_id, NodeKind::Group);
        sub.set(Stratum::Definition, "name", name);
        sub.set_members(dedupe_members(member_ids));
        sub_id
    }
}
