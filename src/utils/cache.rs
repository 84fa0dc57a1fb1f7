//! Time-boxed in-memory cache for provider responses, backed by moka

use moka::future::Cache;
use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

/// Caches values for a fixed time-to-live.
///
/// Failed producers are not cached, so the next call after an error
/// tries again. Concurrent callers for the same key share one producer run.
#[derive(Clone)]
pub struct TtlCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    inner: Cache<K, V>,
}

impl<K, V> TtlCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    pub fn new(ttl: Duration, max_capacity: u64) -> Self {
        Self {
            inner: Cache::builder()
                .time_to_live(ttl)
                .max_capacity(max_capacity)
                .build(),
        }
    }

    /// Return the cached value for `key`, or run `producer` and cache its success
    pub async fn get_or_try_fetch<F, Fut, E>(&self, key: K, producer: F) -> Result<V, Arc<E>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
        E: Send + Sync + 'static,
    {
        self.inner.try_get_with(key, producer()).await
    }

    pub fn invalidate_all(&self) {
        self.inner.invalidate_all();
    }
}
