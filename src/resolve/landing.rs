use anyhow::Result;
use url::Url;

use crate::fetch::resolve_href;
use crate::model::{classify, Document, LandingPage};

use super::{Reference, Resolver};

impl Resolver<'_> {
    /// Follows the first usable `data` link of a landing page and resolves
    /// the collections list behind it. Anything else behind that link,
    /// including another container, yields no node.
    pub(super) fn load_landing_page(
        &mut self,
        reference: &Reference,
        page_url: &Url,
        page: &LandingPage,
    ) -> Result<Option<String>> {
        let Some(href) = page
            .links
            .iter()
            .filter(|l| l.is_rel("data"))
            .find_map(|l| l.href.as_deref())
        else {
            tracing::debug!(url = %page_url, "landing page has no data link");
            return Ok(None);
        };

        // Relative to the page's own URL, not the original request URL.
        let collections_url = resolve_href(page_url, href)?;
        let collections_url = self.rewriter.rewrite(collections_url);
        let json = self.fetcher.fetch_json(&collections_url)?;

        match classify(&json) {
            Document::Collections(doc) => self
                .load_collections(reference, &collections_url, &doc)
                .map(Some),
            other => {
                tracing::debug!(
                    url = %collections_url,
                    shape = other.shape_name(),
                    "data link did not lead to a collections list"
                );
                Ok(None)
            }
        }
    }
}
