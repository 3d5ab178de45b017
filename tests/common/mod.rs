#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;

use anyhow::{anyhow, Result};
use serde_json::Value;
use url::Url;

use canopy::fetch::FetchJson;

/// Serves canned documents from memory and records every URL fetched.
#[derive(Default)]
pub struct MapFetcher {
    docs: HashMap<String, Value>,
    log: RefCell<Vec<String>>,
}

impl MapFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, url: &str, doc: Value) {
        self.docs.insert(url.to_string(), doc);
    }

    /// Every URL fetched so far, in order.
    pub fn fetched(&self) -> Vec<String> {
        self.log.borrow().clone()
    }
}

impl FetchJson for MapFetcher {
    fn fetch_json(&self, url: &Url) -> Result<Value> {
        self.log.borrow_mut().push(url.to_string());
        self.docs
            .get(url.as_str())
            .cloned()
            .ok_or_else(|| anyhow!("no document at {}", url))
    }
}
