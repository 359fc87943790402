//! Process-lifetime memoization for version-scoped metadata.
//!
//! The external data behind a cache key (a doozer sweep, a recipe document)
//! is deterministic for a fixed version, so entries never expire; the cache
//! lives exactly as long as the fetcher that owns it. Callers construct the
//! cache and hand it to the fetcher, which keeps lifetime and invalidation
//! explicit and testable.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use tokio::sync::RwLock;

/// A read-mostly memoization map.
///
/// Values are stored behind `Arc` so hits are clone-cheap. Two tasks racing
/// on the same missing key may both compute it; the second insert wins,
/// which is harmless because the upstream data is idempotent per key.
pub struct MemoCache<K, V> {
    entries: RwLock<HashMap<K, Arc<V>>>,
}

impl<K, V> Default for MemoCache<K, V> {
    fn default() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }
}

impl<K, V> MemoCache<K, V> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<K: Eq + Hash, V> MemoCache<K, V> {
    /// Look up a previously memoized value.
    pub async fn get(&self, key: &K) -> Option<Arc<V>> {
        self.entries.read().await.get(key).cloned()
    }

    /// Memoize `value` under `key`, returning the shared handle.
    pub async fn insert(&self, key: K, value: V) -> Arc<V> {
        let value = Arc::new(value);
        self.entries
            .write()
            .await
            .insert(key, Arc::clone(&value));
        value
    }

    /// Number of memoized entries.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}
