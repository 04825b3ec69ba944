//! Link metadata for bare-URL paragraphs
//!
//! A paragraph consisting of a single URL becomes a `linkTool` block whose
//! `meta` is fetched from the page behind the link. Fetching is the one
//! effectful step in an otherwise pure conversion, so it is injected: the
//! caller hands the parser a [`LinkMetadataProvider`] and tests stub it with
//! a pure function. Providers never fail; on any problem they return empty
//! metadata, and they are expected to bound their own fetch time so a slow
//! page cannot stall a conversion.

use std::collections::HashMap;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

/// Metadata describing the target of a bare link.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinkMeta {
    pub title: String,
    pub description: String,
    pub image: LinkImage,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinkImage {
    pub url: String,
}

/// Fetches `{title, description, image.url}` for a URL.
pub trait LinkMetadataProvider {
    /// Must not fail; return empty metadata on any error or timeout.
    fn fetch(&self, url: &str) -> LinkMeta;
}

/// Provider that always returns empty metadata. Keeps parsing fully
/// deterministic when no fetcher is wired up.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLinkMetadata;

impl LinkMetadataProvider for NoLinkMetadata {
    fn fetch(&self, _url: &str) -> LinkMeta {
        LinkMeta::default()
    }
}

/// Caches another provider's results per URL, so a document that repeats a
/// link costs one fetch. Safe to share across threads.
pub struct MemoizedLinks<P> {
    inner: P,
    cache: Mutex<HashMap<String, LinkMeta>>,
}

impl<P: LinkMetadataProvider> MemoizedLinks<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            cache: Mutex::new(HashMap::new()),
        }
    }
}

impl<P: LinkMetadataProvider> LinkMetadataProvider for MemoizedLinks<P> {
    fn fetch(&self, url: &str) -> LinkMeta {
        if let Ok(cache) = self.cache.lock() {
            if let Some(meta) = cache.get(url) {
                return meta.clone();
            }
        }
        let meta = self.inner.fetch(url);
        if let Ok(mut cache) = self.cache.lock() {
            cache.insert(url.to_string(), meta.clone());
        }
        meta
    }
}
