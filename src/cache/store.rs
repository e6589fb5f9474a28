//! In-memory document cache with TTL expiry.
//!
//! Holds parsed documents keyed by file name plus one derived slot for the
//! lightweight game projection. Locks are held only for map operations and
//! never across an `.await`.

use std::{
    collections::HashMap,
    sync::{Arc, LockResult, RwLock},
    time::Duration,
};

use metrics::counter;
use serde_json::Value;
use tokio::time::Instant;
use tracing::warn;

use crate::domain::{documents::Document, games::LightweightGame};

use super::config::CacheConfig;

const SOURCE: &str = "cache::store";

#[derive(Debug, Clone)]
struct CacheEntry<T> {
    data: T,
    loaded_at: Instant,
}

impl<T: Clone> CacheEntry<T> {
    fn new(data: T) -> Self {
        Self {
            data,
            loaded_at: Instant::now(),
        }
    }

    fn live(&self, ttl: Duration) -> Option<T> {
        (self.loaded_at.elapsed() < ttl).then(|| self.data.clone())
    }
}

/// Process-local cache of parsed documents.
pub struct DocumentCache {
    ttl: Duration,
    documents: RwLock<HashMap<&'static str, CacheEntry<Arc<Value>>>>,
    lightweight_games: RwLock<Option<CacheEntry<Arc<Vec<LightweightGame>>>>>,
}

impl DocumentCache {
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            ttl: config.ttl(),
            documents: RwLock::new(HashMap::new()),
            lightweight_games: RwLock::new(None),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Return the cached document if it is younger than the TTL.
    pub fn get(&self, document: Document) -> Option<Arc<Value>> {
        let key = document.file_name();
        let hit = recover(self.documents.read(), "get")
            .get(key)
            .and_then(|entry| entry.live(self.ttl));

        match hit {
            Some(_) => counter!("arcadia_document_cache_hit_total", "document" => key).increment(1),
            None => counter!("arcadia_document_cache_miss_total", "document" => key).increment(1),
        }
        hit
    }

    pub fn insert(&self, document: Document, data: Arc<Value>) {
        recover(self.documents.write(), "insert")
            .insert(document.file_name(), CacheEntry::new(data));
    }

    pub fn evict(&self, document: Document) {
        recover(self.documents.write(), "evict").remove(document.file_name());
    }

    pub fn lightweight_games(&self) -> Option<Arc<Vec<LightweightGame>>> {
        recover(self.lightweight_games.read(), "lightweight_games")
            .as_ref()
            .and_then(|entry| entry.live(self.ttl))
    }

    pub fn set_lightweight_games(&self, games: Arc<Vec<LightweightGame>>) {
        *recover(self.lightweight_games.write(), "set_lightweight_games") =
            Some(CacheEntry::new(games));
    }

    pub fn reset_lightweight_games(&self) {
        *recover(self.lightweight_games.write(), "reset_lightweight_games") = None;
    }

    /// Drop every document entry and the projection.
    pub fn clear(&self) {
        recover(self.documents.write(), "clear.documents").clear();
        *recover(self.lightweight_games.write(), "clear.lightweight_games") = None;
    }

    /// Number of entries currently held, live or stale.
    pub fn len(&self) -> usize {
        recover(self.documents.read(), "len").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn recover<G>(result: LockResult<G>, op: &'static str) -> G {
    result.unwrap_or_else(|poisoned| {
        warn!(
            op,
            target_module = SOURCE,
            result = "poisoned_recovered",
            hint = "state may be stale after panic in another thread",
            "Recovered from poisoned cache lock"
        );
        poisoned.into_inner()
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn cache_with_ttl(ttl_ms: u64) -> DocumentCache {
        DocumentCache::new(&CacheConfig { ttl_ms })
    }

    #[tokio::test(start_paused = true)]
    async fn entry_expires_after_ttl() {
        let cache = cache_with_ttl(1_000);
        cache.insert(Document::Ads, Arc::new(json!([])));
        assert!(cache.get(Document::Ads).is_some());

        tokio::time::advance(Duration::from_millis(999)).await;
        assert!(cache.get(Document::Ads).is_some());

        tokio::time::advance(Duration::from_millis(1)).await;
        assert!(cache.get(Document::Ads).is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn reinsert_restarts_the_clock() {
        let cache = cache_with_ttl(1_000);
        cache.insert(Document::Games, Arc::new(json!([])));
        tokio::time::advance(Duration::from_millis(800)).await;
        cache.insert(Document::Games, Arc::new(json!([{ "id": "g1" }])));
        tokio::time::advance(Duration::from_millis(800)).await;

        let cached = cache.get(Document::Games).expect("still live");
        assert_eq!(*cached, json!([{ "id": "g1" }]));
    }

    #[tokio::test]
    async fn evict_only_touches_one_document() {
        let cache = cache_with_ttl(60_000);
        cache.insert(Document::Games, Arc::new(json!([])));
        cache.insert(Document::Ads, Arc::new(json!([])));

        cache.evict(Document::Games);

        assert!(cache.get(Document::Games).is_none());
        assert!(cache.get(Document::Ads).is_some());
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn clear_resets_documents_and_projection() {
        let cache = cache_with_ttl(60_000);
        cache.insert(Document::SeoSettings, Arc::new(json!({})));
        cache.set_lightweight_games(Arc::new(Vec::new()));

        cache.clear();

        assert!(cache.is_empty());
        assert!(cache.lightweight_games().is_none());
    }
}
