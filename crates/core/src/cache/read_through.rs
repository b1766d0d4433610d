//! Read-through caching for collection listings.

use std::future::Future;
use std::time::Duration;

use serde::{de::DeserializeOwned, Serialize};

use super::serialization::{deserialize_value, serialize_value};
use super::Cache;

/// Returns the value cached under `key`, computing and storing it on a miss.
///
/// - A present, decodable value is returned as-is without calling `compute`,
///   even when it is an empty list.
/// - On a miss `compute` runs once and its result is stored with expiry
///   `now + ttl` before being returned.
/// - If `compute` fails its error is returned and nothing is stored.
/// - Cache read failures and undecodable values count as misses; write
///   failures are logged and the computed value is still returned.
pub async fn get_or_compute<C, T, E, F, Fut>(
    cache: &C,
    key: &str,
    ttl: Duration,
    compute: F,
) -> std::result::Result<T, E>
where
    C: Cache + ?Sized,
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> Fut,
    Fut: Future<Output = std::result::Result<T, E>>,
{
    match cache.get(key).await {
        Ok(Some(bytes)) => match deserialize_value::<T>(&bytes) {
            Ok(value) => {
                tracing::trace!(key, "Cache hit");
                return Ok(value);
            }
            Err(err) => tracing::warn!(key, error = %err, "Cached value could not be decoded"),
        },
        Ok(None) => tracing::trace!(key, "Cache miss"),
        Err(err) => tracing::warn!(key, error = %err, "Cache read failed"),
    }

    let value = compute().await?;

    match serialize_value(&value) {
        Ok(bytes) => {
            if let Err(err) = cache.set(key, &bytes, Some(ttl)).await {
                tracing::warn!(key, error = %err, "Failed to populate cache");
            }
        }
        Err(err) => tracing::warn!(key, error = %err, "Failed to serialize value for cache"),
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::cache::{CacheError, Result as CacheResult};

    #[derive(Default)]
    struct TestCache {
        store: Mutex<HashMap<String, (Vec<u8>, Option<Duration>)>>,
        fail_get: bool,
        fail_set: bool,
        set_calls: AtomicUsize,
    }

    #[async_trait]
    impl Cache for TestCache {
        async fn get(&self, key: &str) -> CacheResult<Option<Vec<u8>>> {
            if self.fail_get {
                return Err(CacheError::ConnectionFailed("down".to_string()));
            }
            Ok(self.store.lock().unwrap().get(key).map(|(v, _)| v.clone()))
        }

        async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> CacheResult<()> {
            self.set_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_set {
                return Err(CacheError::OperationFailed("read only".to_string()));
            }
            self.store
                .lock()
                .unwrap()
                .insert(key.to_string(), (value.to_vec(), ttl));
            Ok(())
        }
    }

    const TTL: Duration = Duration::from_secs(180);

    #[tokio::test]
    async fn test_miss_computes_and_stores_with_ttl() {
        let cache = TestCache::default();
        let calls = AtomicUsize::new(0);

        let value: Vec<String> = get_or_compute(&cache, "category_list", TTL, || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok::<_, String>(vec!["Phones".to_string()])
        })
        .await
        .unwrap();

        assert_eq!(value, vec!["Phones".to_string()]);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        let store = cache.store.lock().unwrap();
        let (bytes, ttl) = store.get("category_list").unwrap();
        assert_eq!(bytes.as_slice(), br#"["Phones"]"#);
        assert_eq!(*ttl, Some(TTL));
    }

    #[tokio::test]
    async fn test_hit_skips_compute() {
        let cache = TestCache::default();
        cache
            .set("product_list", br#"["cached"]"#, Some(TTL))
            .await
            .unwrap();
        let calls = AtomicUsize::new(0);

        let value: Vec<String> = get_or_compute(&cache, "product_list", TTL, || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok::<_, String>(vec!["fresh".to_string()])
        })
        .await
        .unwrap();

        assert_eq!(value, vec!["cached".to_string()]);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_empty_cached_list_is_a_hit() {
        let cache = TestCache::default();
        cache.set("product_list", b"[]", Some(TTL)).await.unwrap();

        let value: Vec<String> = get_or_compute(&cache, "product_list", TTL, || async {
            Ok::<_, String>(vec!["fresh".to_string()])
        })
        .await
        .unwrap();

        assert!(value.is_empty());
    }

    #[tokio::test]
    async fn test_compute_error_propagates_and_nothing_is_cached() {
        let cache = TestCache::default();

        let result: std::result::Result<Vec<String>, String> =
            get_or_compute(&cache, "category_list", TTL, || async {
                Err("database unavailable".to_string())
            })
            .await;

        assert_eq!(result, Err("database unavailable".to_string()));
        assert_eq!(cache.set_calls.load(Ordering::SeqCst), 0);
        assert!(cache.store.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_cache_read_failure_falls_back_to_compute() {
        let cache = TestCache {
            fail_get: true,
            ..Default::default()
        };

        let value: Vec<i64> = get_or_compute(&cache, "authentication-list", TTL, || async {
            Ok::<_, String>(vec![1, 2])
        })
        .await
        .unwrap();

        assert_eq!(value, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_cache_write_failure_still_returns_value() {
        let cache = TestCache {
            fail_set: true,
            ..Default::default()
        };

        let value: Vec<i64> = get_or_compute(&cache, "authentication-list", TTL, || async {
            Ok::<_, String>(vec![7])
        })
        .await
        .unwrap();

        assert_eq!(value, vec![7]);
        assert_eq!(cache.set_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_undecodable_value_is_recomputed_and_overwritten() {
        let cache = TestCache::default();
        cache
            .set("category_list", b"not json", Some(TTL))
            .await
            .unwrap();

        let value: Vec<i64> = get_or_compute(&cache, "category_list", TTL, || async {
            Ok::<_, String>(vec![3])
        })
        .await
        .unwrap();

        assert_eq!(value, vec![3]);
        let store = cache.store.lock().unwrap();
        assert_eq!(store.get("category_list").unwrap().0.as_slice(), b"[3]");
    }
}
