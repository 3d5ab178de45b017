use anyhow::Result;
use serde_json::json;
use url::Url;

use crate::fetch::resolve_href;
use crate::model::{self_link_href, Collections, NodeKind, Stratum};

use super::media::{classify_media_type, map_distribution, MediaKind};
use super::{dedupe_members, Reference, Resolver};

impl Resolver<'_> {
    /// Materializes a collections list into a group. Entries with children
    /// become nested lazy references; flat entries become leaves sourced
    /// from their first compatible distribution; everything else is
    /// dropped, never failed.
    pub(super) fn load_collections(
        &mut self,
        reference: &Reference,
        base_url: &Url,
        doc: &Collections,
    ) -> Result<String> {
        let group_id = reference.id.clone();
        let mut members = Vec::new();

        for entry in doc.entries() {
            let Some(entry_id) = entry.id.as_deref() else {
                tracing::debug!("collection entry without id dropped");
                continue;
            };
            let member_id = format!("{}/{}", group_id, entry_id);

            if !entry.children.is_empty() {
                // Nested collections are only reachable through a self link.
                let Some(href) = self_link_href(&entry.links) else {
                    tracing::debug!(
                        collection = entry_id,
                        "nested collection without self link dropped"
                    );
                    continue;
                };
                let target = match resolve_href(base_url, href) {
                    Ok(url) => url,
                    Err(err) => {
                        tracing::warn!(
                            collection = entry_id,
                            error = %format!("{:#}", err),
                            "unresolvable self link dropped"
                        );
                        continue;
                    }
                };
                let target = self.rewriter.rewrite(target);
                self.add_nested_reference(
                    &member_id,
                    entry.title.as_deref().or(Some(entry_id)),
                    &target,
                    reference.valid_bbox(),
                    Some(json!({"isGroup": true})),
                )?;
                members.push(member_id);
                continue;
            }

            // Flat collection: the first compatible distribution, searching
            // links before content, becomes the leaf's source.
            let candidate = entry
                .links
                .iter()
                .map(|l| (l.href.as_deref(), l.media_type.as_deref()))
                .chain(
                    entry
                        .content
                        .iter()
                        .map(|c| (c.href.as_deref(), c.media_type.as_deref())),
                )
                .find(|(href, media_type)| {
                    href.is_some() && classify_media_type(*media_type) != MediaKind::Unsupported
                });
            let Some((Some(href), media_type)) = candidate else {
                tracing::debug!(collection = entry_id, "no compatible distribution, dropped");
                continue;
            };
            let resolved = match resolve_href(base_url, href) {
                Ok(url) => url,
                Err(err) => {
                    tracing::warn!(
                        collection = entry_id,
                        error = %format!("{:#}", err),
                        "unresolvable distribution href dropped"
                    );
                    continue;
                }
            };
            let mapped = map_distribution(&resolved, media_type, &self.options);

            let node = self.registry.obtain(&member_id, mapped.kind);
            node.set(
                Stratum::Definition,
                "name",
                entry.title.as_deref().unwrap_or(entry_id),
            );
            if let Some(description) = entry.description.as_deref() {
                node.set(Stratum::Definition, "description", description);
            }
            node.set(Stratum::Definition, "url", mapped.url);
            if let Some(media_type) = media_type {
                node.set(Stratum::Definition, "mediaType", media_type);
            }
            if let Some(note) = mapped.note {
                node.set(
                    Stratum::Definition,
                    "info",
                    json!([{"name": "Notes", "content": note}]),
                );
            }
            members.push(member_id);
        }

        let group = self.registry.obtain(&group_id, NodeKind::Group);
        group.set(Stratum::Definition, "name", reference.display_name());
        group.set_members(dedupe_members(members));
        if let Some(override_json) = &reference.override_json {
            group.merge(Stratum::Override, override_json);
        }
        Ok(group_id)
    }
}
