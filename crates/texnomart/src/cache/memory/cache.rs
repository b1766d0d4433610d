//! Process-local list cache.
//!
//! Entries live in an LRU bounded by `CACHE_MAX_ENTRIES` and are dropped
//! lazily: an entry past its deadline is removed by the read that finds it.

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use lru::LruCache;
use tokio::sync::Mutex;

use texnomart_core::cache::{Cache, Result};

/// Stored bytes plus the instant after which they must not be served.
#[derive(Debug)]
struct Expiring {
    bytes: Vec<u8>,
    deadline: Option<Instant>,
}

impl Expiring {
    fn fresh_at(&self, now: Instant) -> bool {
        self.deadline.is_none_or(|deadline| now < deadline)
    }
}

/// LRU-bounded in-memory [`Cache`].
///
/// Clones share the same store.
#[derive(Debug, Clone)]
pub struct MemoryCache {
    entries: Arc<Mutex<LruCache<String, Expiring>>>,
}

impl MemoryCache {
    /// Creates a cache holding at most `max_entries` keys (at least one).
    pub fn new(max_entries: usize) -> Self {
        let capacity = NonZeroUsize::new(max_entries).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Arc::new(Mutex::new(LruCache::new(capacity))),
        }
    }
}

#[async_trait]
impl Cache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let now = Instant::now();
        // A hit bumps recency, so reads take the lock exclusively too.
        let mut entries = self.entries.lock().await;

        match entries.get(key) {
            Some(entry) if entry.fresh_at(now) => Ok(Some(entry.bytes.clone())),
            Some(_) => {
                entries.pop(key);
                tracing::trace!(key, "Dropped expired cache entry");
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<()> {
        let entry = Expiring {
            bytes: value.to_vec(),
            deadline: ttl.map(|ttl| Instant::now() + ttl),
        };
        self.entries.lock().await.put(key.to_string(), entry);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use texnomart_core::cache::{CATEGORY_LIST_KEY, PRODUCT_LIST_KEY, USER_LIST_KEY};

    #[tokio::test]
    async fn stores_and_returns_list_bytes() {
        let cache = MemoryCache::new(16);
        let listing = br#"[{"id":1,"title":"Phones"}]"#;

        cache
            .set(CATEGORY_LIST_KEY, listing, Some(Duration::from_secs(180)))
            .await
            .unwrap();

        assert_eq!(
            cache.get(CATEGORY_LIST_KEY).await.unwrap(),
            Some(listing.to_vec())
        );
        assert_eq!(cache.get(PRODUCT_LIST_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn expired_entry_is_a_miss_and_is_removed() {
        let cache = MemoryCache::new(16);

        cache
            .set(PRODUCT_LIST_KEY, b"[]", Some(Duration::from_millis(30)))
            .await
            .unwrap();
        assert!(cache.get(PRODUCT_LIST_KEY).await.unwrap().is_some());

        tokio::time::sleep(Duration::from_millis(60)).await;

        assert!(cache.get(PRODUCT_LIST_KEY).await.unwrap().is_none());
        assert!(cache.entries.lock().await.is_empty());
    }

    #[tokio::test]
    async fn set_replaces_value_and_deadline() {
        let cache = MemoryCache::new(16);

        cache
            .set(USER_LIST_KEY, b"old", Some(Duration::from_millis(30)))
            .await
            .unwrap();
        cache.set(USER_LIST_KEY, b"new", None).await.unwrap();

        tokio::time::sleep(Duration::from_millis(60)).await;
        assert_eq!(cache.get(USER_LIST_KEY).await.unwrap(), Some(b"new".to_vec()));
    }

    #[tokio::test]
    async fn least_recently_read_key_is_evicted() {
        let cache = MemoryCache::new(2);

        cache.set(CATEGORY_LIST_KEY, b"c", None).await.unwrap();
        cache.set(PRODUCT_LIST_KEY, b"p", None).await.unwrap();
        cache.get(CATEGORY_LIST_KEY).await.unwrap();
        cache.set(USER_LIST_KEY, b"u", None).await.unwrap();

        assert!(cache.get(CATEGORY_LIST_KEY).await.unwrap().is_some());
        assert!(cache.get(PRODUCT_LIST_KEY).await.unwrap().is_none());
        assert!(cache.get(USER_LIST_KEY).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn zero_capacity_still_holds_one_entry() {
        let cache = MemoryCache::new(0);

        cache.set(CATEGORY_LIST_KEY, b"c", None).await.unwrap();
        cache.set(PRODUCT_LIST_KEY, b"p", None).await.unwrap();

        assert!(cache.get(CATEGORY_LIST_KEY).await.unwrap().is_none());
        assert!(cache.get(PRODUCT_LIST_KEY).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn clones_share_entries() {
        let cache = MemoryCache::new(4);
        let other = cache.clone();

        cache.set(CATEGORY_LIST_KEY, b"[]", None).await.unwrap();

        assert_eq!(other.get(CATEGORY_LIST_KEY).await.unwrap(), Some(b"[]".to_vec()));
    }
}
