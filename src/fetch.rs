use anyhow::{Context, Result};
use serde_json::Value;
use url::Url;

/// Fetches and parses one JSON document. The production implementation
/// speaks HTTP; tests inject canned documents.
pub trait FetchJson {
    fn fetch_json(&self, url: &Url) -> Result<Value>;
}

/// Rewrites outbound URLs, e.g. to route them through a CORS proxy. Applied
/// to every fetch URL the resolver builds. Nested reference URLs are stored
/// already rewritten and pass through again on fetch, so implementations
/// must be idempotent.
pub trait UrlRewriter {
    fn rewrite(&self, url: Url) -> Url;
}

/// No-op rewriter.
pub struct DirectUrls;

impl UrlRewriter for DirectUrls {
    fn rewrite(&self, url: Url) -> Url {
        url
    }
}

pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent("canopy")
            .build()
            .context("build reqwest client")?;
        Ok(Self { client })
    }
}

impl FetchJson for HttpFetcher {
    fn fetch_json(&self, url: &Url) -> Result<Value> {
        tracing::debug!(%url, "fetch");
        let resp = self.client.get(url.clone()).send().context("send")?;
        let resp = resp
            .error_for_status()
            .with_context(|| format!("fetch {}", url))?;
        resp.json().with_context(|| format!("parse json from {}", url))
    }
}

/// Resolves a possibly-relative href against the URL of the document it came
/// from.
pub fn resolve_href(base: &Url, href: &str) -> Result<Url> {
    base.join(href)
        .with_context(|| format!("resolve {} against {}", href, base))
}
