//! Render cache.
//!
//! Keeps the last rendered HTML per document key together with the
//! fingerprint of the document and config it was rendered from, so an
//! unchanged document is never rendered twice.

use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::error::AstResult;
use crate::hash::{Fingerprint, StableHasher};
use crate::node::Document;
use crate::render::{RenderConfig, RenderEmbed, render_document};

// =============================================================================
// Cache Key
// =============================================================================

/// Cache key, typically the document's path or URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(Arc<str>);

impl CacheKey {
    /// Create a new cache key.
    pub fn new(key: &str) -> Self {
        Self(Arc::from(key))
    }

    /// Get the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// Cache Entry
// =============================================================================

/// Rendered output with the fingerprint it was produced from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    /// Fingerprint of document and config.
    pub fingerprint: u64,
    /// Rendered HTML.
    pub html: Arc<str>,
    /// Bumped each time the entry is re-rendered.
    pub version: u64,
}

impl CacheEntry {
    /// Create a new cache entry with version 0.
    pub fn new(fingerprint: u64, html: impl Into<Arc<str>>) -> Self {
        Self {
            fingerprint,
            html: html.into(),
            version: 0,
        }
    }
}

// =============================================================================
// RenderCache
// =============================================================================

/// Non-thread-safe cache map.
pub type RenderCacheMap = FxHashMap<CacheKey, CacheEntry>;

/// Thread-safe shared render cache.
///
/// Clones share the same storage. The lock is never held while rendering.
#[derive(Debug, Clone, Default)]
pub struct RenderCache {
    inner: Arc<RwLock<RenderCacheMap>>,
}

impl RenderCache {
    /// Create a new empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Execute a closure with read access to the cache.
    pub fn with_read<R>(&self, f: impl FnOnce(&RenderCacheMap) -> R) -> R {
        let guard = self.inner.read();
        f(&guard)
    }

    /// Execute a closure with write access to the cache.
    pub fn with_write<R>(&self, f: impl FnOnce(&mut RenderCacheMap) -> R) -> R {
        let mut guard = self.inner.write();
        f(&mut guard)
    }

    /// Get a clone of a cached entry.
    pub fn get(&self, key: &CacheKey) -> Option<CacheEntry> {
        self.with_read(|c| c.get(key).cloned())
    }

    /// Insert or update a cache entry.
    pub fn insert(&self, key: CacheKey, entry: CacheEntry) {
        self.with_write(|c| {
            c.insert(key, entry);
        });
    }

    /// Remove an entry from the cache.
    pub fn remove(&self, key: &CacheKey) -> Option<CacheEntry> {
        self.with_write(|c| c.remove(key))
    }

    /// Check if the cache contains a key.
    pub fn contains(&self, key: &CacheKey) -> bool {
        self.with_read(|c| c.contains_key(key))
    }

    /// Get the number of entries in the cache.
    pub fn len(&self) -> usize {
        self.with_read(|c| c.len())
    }

    /// Check if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clear all entries from the cache.
    pub fn clear(&self) {
        self.with_write(|c| c.clear());
    }

    /// Return cached HTML for `key`, rendering `doc` only if it or `config`
    /// changed since the last render.
    ///
    /// # Errors
    ///
    /// Propagates render errors; the cache is left untouched on failure.
    pub fn get_or_render<T>(
        &self,
        key: &CacheKey,
        doc: &Document<T>,
        config: &RenderConfig,
    ) -> AstResult<Arc<str>>
    where
        T: RenderEmbed + Fingerprint,
    {
        let fingerprint = config
            .fingerprint_into(doc.fingerprint_into(StableHasher::new()))
            .finish();

        let cached = self.with_read(|c| {
            c.get(key)
                .filter(|entry| entry.fingerprint == fingerprint)
                .map(|entry| Arc::clone(&entry.html))
        });
        if let Some(html) = cached {
            trace!(%key, "render cache hit");
            return Ok(html);
        }

        let html: Arc<str> = render_document(doc, config)?.into();
        let version = self.with_write(|c| {
            let entry = c
                .entry(key.clone())
                .and_modify(|entry| {
                    entry.fingerprint = fingerprint;
                    entry.html = Arc::clone(&html);
                    entry.version += 1;
                })
                .or_insert_with(|| CacheEntry::new(fingerprint, Arc::clone(&html)));
            entry.version
        });
        debug!(%key, version, "render cache miss");
        Ok(html)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{Element, Node};
    use crate::payload::{Hiccup, Payload};
    use crate::render::EmbedPolicy;
    use static_assertions::assert_impl_all;

    assert_impl_all!(RenderCache: Send, Sync, Clone);

    fn doc_with(payload: Payload) -> Document {
        let mut doc = Document::new(Element::new("body"));
        doc.splice(doc.root(), payload).unwrap();
        doc
    }

    #[test]
    fn test_cache_key() {
        let key = CacheKey::new("/blog/post");
        assert_eq!(key.as_str(), "/blog/post");
        assert_eq!(key.to_string(), "/blog/post");
    }

    #[test]
    fn test_shared_cache() {
        let cache = RenderCache::new();
        cache.insert(CacheKey::new("/test"), CacheEntry::new(1, "<p></p>"));
        assert!(cache.contains(&CacheKey::new("/test")));
        assert_eq!(cache.len(), 1);

        let clone = cache.clone();
        clone.remove(&CacheKey::new("/test"));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_get_or_render_reuses_unchanged() {
        let cache = RenderCache::new();
        let key = CacheKey::new("/post");
        let doc = doc_with(Payload::html("<b>raw</b>"));

        let first = cache.get_or_render(&key, &doc, &RenderConfig::PROD).unwrap();
        let second = cache.get_or_render(&key, &doc, &RenderConfig::PROD).unwrap();
        assert_eq!(&*first, "<body><b>raw</b></body>");
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.get(&key).unwrap().version, 0);
    }

    #[test]
    fn test_get_or_render_tracks_changes() {
        let cache = RenderCache::new();
        let key = CacheKey::new("/post");
        let mut doc = doc_with(Payload::html("<b>raw</b>"));
        cache.get_or_render(&key, &doc, &RenderConfig::PROD).unwrap();

        let embed = doc.children(doc.root())[0];
        doc.replace(embed, Node::embedded(Payload::Hiccup(Hiccup::new("hr"))))
            .unwrap();
        let html = cache.get_or_render(&key, &doc, &RenderConfig::PROD).unwrap();
        assert_eq!(&*html, "<body><hr /></body>");
        assert_eq!(cache.get(&key).unwrap().version, 1);

        // Config changes invalidate too
        let config = RenderConfig::PROD.with_embed(EmbedPolicy::Drop);
        let html = cache.get_or_render(&key, &doc, &config).unwrap();
        assert_eq!(&*html, "<body></body>");
        assert_eq!(cache.get(&key).unwrap().version, 2);
    }

    #[test]
    fn test_get_or_render_tracks_spans() {
        let cache = RenderCache::new();
        let key = CacheKey::new("/post");
        let mut doc: Document = Document::new(Element::new("body"));
        let h1 = doc
            .append(doc.root(), Element::new("h1").with_segment(0..2))
            .unwrap();

        let html = cache.get_or_render(&key, &doc, &RenderConfig::DEV).unwrap();
        assert_eq!(&*html, "<body><h1 data-src=\"0-2\"></h1>\n</body>\n");

        // Source edited above the heading: only the span moves
        doc.replace(h1, Element::new("h1").with_segment(5..7)).unwrap();
        let html = cache.get_or_render(&key, &doc, &RenderConfig::DEV).unwrap();
        assert_eq!(&*html, "<body><h1 data-src=\"5-7\"></h1>\n</body>\n");
        assert_eq!(cache.get(&key).unwrap().version, 1);
    }

    #[test]
    fn test_get_or_render_error_leaves_cache() {
        let cache = RenderCache::new();
        let key = CacheKey::new("/broken");
        let doc = doc_with(Payload::bytes(vec![0xff]));
        assert!(cache.get_or_render(&key, &doc, &RenderConfig::PROD).is_err());
        assert!(!cache.contains(&key));
    }
}
