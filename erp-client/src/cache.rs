//! Resource cache
//!
//! Keyed store of raw JSON payloads fetched from the API. Keys are request
//! paths including their query string. Each key owns a `OnceCell` slot:
//! concurrent readers of a key share one in-flight fetch, and invalidation
//! swaps the slot out so the next read fetches again. Entries are replaced
//! or dropped, never patched.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use serde_json::Value;
use tokio::sync::{OnceCell, broadcast};
use tokio::time::Instant;

use crate::ClientResult;

const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Cache key: API path plus query string, compared verbatim
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// Path with query parameters appended in the given order.
    ///
    /// No pairs yields the bare path, so a filter-less key equals the list key.
    pub fn with_query<K, V>(path: &str, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        let mut any = false;
        for (k, v) in pairs {
            serializer.append_pair(k.as_ref(), v.as_ref());
            any = true;
        }
        if any {
            Self(format!("{path}?{}", serializer.finish()))
        } else {
            Self(path.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn starts_with(&self, prefix: &str) -> bool {
        self.0.starts_with(prefix)
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CacheKey {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

/// Change notification for subscribers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheEvent {
    /// A fresh payload was stored for the key
    Updated(CacheKey),
    /// The key was dropped; the next read fetches again
    Invalidated(CacheKey),
}

#[derive(Debug, Clone)]
struct Entry {
    value: Arc<Value>,
    fetched_at: Instant,
}

type Slot = Arc<OnceCell<Entry>>;

/// Shared cache of server resources
#[derive(Debug)]
pub struct ResourceCache {
    slots: Mutex<HashMap<CacheKey, Slot>>,
    events: broadcast::Sender<CacheEvent>,
    max_age: Option<Duration>,
}

impl Default for ResourceCache {
    fn default() -> Self {
        Self::new(None)
    }
}

impl ResourceCache {
    /// # Arguments
    /// * `max_age` - entries older than this are refetched on read; `None` keeps them until invalidated
    pub fn new(max_age: Option<Duration>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            slots: Mutex::new(HashMap::new()),
            events,
            max_age,
        }
    }

    fn slots(&self) -> MutexGuard<'_, HashMap<CacheKey, Slot>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn is_stale(&self, entry: &Entry) -> bool {
        self.max_age
            .is_some_and(|max_age| entry.fetched_at.elapsed() >= max_age)
    }

    /// Return the cached payload for `key`, fetching it if absent or stale.
    ///
    /// Concurrent callers for the same key wait on the same fetch. A failed
    /// fetch stores nothing; the error goes back to the caller.
    pub async fn get_or_fetch<F, Fut>(&self, key: &CacheKey, fetch: F) -> ClientResult<Arc<Value>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = ClientResult<Value>>,
    {
        let slot = {
            let mut slots = self.slots();
            match slots.get(key) {
                Some(slot) if slot.get().is_none_or(|entry| !self.is_stale(entry)) => {
                    slot.clone()
                }
                _ => {
                    let slot = Slot::default();
                    slots.insert(key.clone(), slot.clone());
                    slot
                }
            }
        };
        self.resolve(key, slot, fetch).await
    }

    /// Force a refetch of `key`, joining a fetch already in flight.
    pub async fn revalidate<F, Fut>(&self, key: &CacheKey, fetch: F) -> ClientResult<Arc<Value>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = ClientResult<Value>>,
    {
        let slot = {
            let mut slots = self.slots();
            match slots.get(key) {
                Some(slot) if !slot.initialized() => slot.clone(),
                _ => {
                    let slot = Slot::default();
                    slots.insert(key.clone(), slot.clone());
                    slot
                }
            }
        };
        self.resolve(key, slot, fetch).await
    }

    async fn resolve<F, Fut>(&self, key: &CacheKey, slot: Slot, fetch: F) -> ClientResult<Arc<Value>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = ClientResult<Value>>,
    {
        if let Some(entry) = slot.get() {
            tracing::debug!(key = %key, "cache hit");
            return Ok(entry.value.clone());
        }

        let mut fetched = false;
        let outcome = slot
            .get_or_try_init(|| async {
                fetched = true;
                tracing::debug!(key = %key, "cache miss, fetching");
                let value = fetch().await?;
                Ok::<_, crate::ClientError>(Entry {
                    value: Arc::new(value),
                    fetched_at: Instant::now(),
                })
            })
            .await;
        let value = match outcome {
            Ok(entry) => entry.value.clone(),
            Err(e) => {
                self.discard_empty(key, &slot);
                return Err(e);
            }
        };

        if fetched {
            // Only announce if the slot was not swapped out while fetching.
            let current = self
                .slots()
                .get(key)
                .is_some_and(|current| Arc::ptr_eq(current, &slot));
            if current {
                let _ = self.events.send(CacheEvent::Updated(key.clone()));
            } else {
                tracing::debug!(key = %key, "key invalidated during fetch, result not cached");
            }
        }
        Ok(value)
    }

    /// Remove `slot` if it is still the key's current slot and holds no
    /// data, so failed keys are neither counted nor announced.
    fn discard_empty(&self, key: &CacheKey, slot: &Slot) {
        let mut slots = self.slots();
        let current = slots
            .get(key)
            .is_some_and(|current| Arc::ptr_eq(current, slot) && !current.initialized());
        if current {
            slots.remove(key);
            tracing::debug!(key = %key, "fetch failed, key left empty");
        }
    }

    /// Cached payload without fetching.
    pub fn peek(&self, key: &CacheKey) -> Option<Arc<Value>> {
        self.slots()
            .get(key)
            .and_then(|slot| slot.get().map(|entry| entry.value.clone()))
    }

    /// Whether `key` holds a payload that a read would return as-is.
    pub fn is_fresh(&self, key: &CacheKey) -> bool {
        self.slots()
            .get(key)
            .and_then(|slot| slot.get().map(|entry| !self.is_stale(entry)))
            .unwrap_or(false)
    }

    /// Drop one exact key. Returns whether it was present.
    pub fn invalidate(&self, key: &CacheKey) -> bool {
        let removed = self.slots().remove(key).is_some();
        if removed {
            tracing::debug!(key = %key, "cache key invalidated");
            let _ = self.events.send(CacheEvent::Invalidated(key.clone()));
        }
        removed
    }

    /// Drop every key starting with `prefix`. Returns how many were dropped.
    pub fn invalidate_prefix(&self, prefix: &str) -> usize {
        let removed: Vec<CacheKey> = {
            let mut slots = self.slots();
            let keys: Vec<CacheKey> = slots
                .keys()
                .filter(|key| key.starts_with(prefix))
                .cloned()
                .collect();
            for key in &keys {
                slots.remove(key);
            }
            keys
        };
        for key in &removed {
            let _ = self.events.send(CacheEvent::Invalidated(key.clone()));
        }
        tracing::debug!(prefix, count = removed.len(), "cache prefix invalidated");
        removed.len()
    }

    /// Drop everything.
    pub fn clear(&self) {
        let removed: Vec<CacheKey> = self.slots().drain().map(|(key, _)| key).collect();
        for key in removed {
            let _ = self.events.send(CacheEvent::Invalidated(key));
        }
    }

    /// Keys currently tracked, sorted.
    pub fn keys(&self) -> Vec<CacheKey> {
        let mut keys: Vec<CacheKey> = self.slots().keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn len(&self) -> usize {
        self.slots().len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots().is_empty()
    }

    /// Subscribe to cache events. Dropping the receiver unsubscribes.
    pub fn subscribe(&self) -> broadcast::Receiver<CacheEvent> {
        self.events.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ClientError;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_fetch(
        calls: &AtomicUsize,
        value: Value,
    ) -> impl Future<Output = ClientResult<Value>> + '_ {
        async move {
            calls.fetch_add(1, Ordering::SeqCst);
            tokio::task::yield_now().await;
            Ok(value)
        }
    }

    #[test]
    fn query_keys_are_deterministic() {
        let key = CacheKey::with_query("/api/ubicaciones/", [("bodega_id", "3")]);
        assert_eq!(key.as_str(), "/api/ubicaciones/?bodega_id=3");
        assert!(key.starts_with("/api/ubicaciones/"));

        let empty: [(&str, &str); 0] = [];
        assert_eq!(CacheKey::with_query("/api/stock/", empty), CacheKey::from("/api/stock/"));

        let key = CacheKey::with_query("/api/x/", [("q", "a b&c")]);
        assert_eq!(key.as_str(), "/api/x/?q=a+b%26c");
    }

    #[tokio::test]
    async fn second_read_is_served_from_cache() {
        let cache = ResourceCache::default();
        let calls = AtomicUsize::new(0);
        let key = CacheKey::from("/api/bodegas/");

        let first = cache
            .get_or_fetch(&key, || counting_fetch(&calls, json!([1])))
            .await
            .unwrap();
        let second = cache
            .get_or_fetch(&key, || counting_fetch(&calls, json!([2])))
            .await
            .unwrap();

        assert_eq!(*first, json!([1]));
        assert_eq!(*second, json!([1]));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn concurrent_reads_share_one_fetch() {
        let cache = ResourceCache::default();
        let calls = AtomicUsize::new(0);
        let key = CacheKey::from("/api/productos/");

        let (a, b, c) = tokio::join!(
            cache.get_or_fetch(&key, || counting_fetch(&calls, json!(["a"]))),
            cache.get_or_fetch(&key, || counting_fetch(&calls, json!(["b"]))),
            cache.get_or_fetch(&key, || counting_fetch(&calls, json!(["c"]))),
        );

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(a.unwrap(), b.unwrap());
        assert_eq!(*c.unwrap(), json!(["a"]));
    }

    #[tokio::test]
    async fn invalidation_forces_a_new_fetch() {
        let cache = ResourceCache::default();
        let calls = AtomicUsize::new(0);
        let key = CacheKey::from("/api/stock/");

        cache
            .get_or_fetch(&key, || counting_fetch(&calls, json!([1])))
            .await
            .unwrap();
        assert!(cache.invalidate(&key));
        assert!(!cache.invalidate(&key));
        assert!(cache.peek(&key).is_none());

        let fresh = cache
            .get_or_fetch(&key, || counting_fetch(&calls, json!([2])))
            .await
            .unwrap();
        assert_eq!(*fresh, json!([2]));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn prefix_invalidation_covers_filtered_keys() {
        let cache = ResourceCache::default();
        let calls = AtomicUsize::new(0);
        for key in ["/api/stock/", "/api/stock/?bodega=2", "/api/productos/"] {
            cache
                .get_or_fetch(&CacheKey::from(key), || counting_fetch(&calls, json!([])))
                .await
                .unwrap();
        }

        assert_eq!(cache.invalidate_prefix("/api/stock/"), 2);
        assert_eq!(cache.keys(), vec![CacheKey::from("/api/productos/")]);
    }

    #[tokio::test]
    async fn failed_fetch_is_not_cached() {
        let cache = ResourceCache::default();
        let key = CacheKey::from("/api/pagos/");

        let err = cache
            .get_or_fetch(&key, || async {
                Err(ClientError::Connection("refused".into()))
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Connection(_)));
        assert!(cache.peek(&key).is_none());
        assert!(cache.is_empty());

        let value = cache
            .get_or_fetch(&key, || async { Ok(json!([{"id": 1}])) })
            .await
            .unwrap();
        assert_eq!(value[0]["id"], 1);
    }

    #[tokio::test]
    async fn failed_keys_are_not_tracked() {
        let cache = ResourceCache::default();
        let mut events = cache.subscribe();

        for producto in 1..=3 {
            let key = CacheKey::with_query(
                "/api/movimientos-inventario/kardex/",
                [("producto", producto.to_string())],
            );
            let result = cache
                .get_or_fetch(&key, || async {
                    Err(ClientError::Connection("timeout".into()))
                })
                .await;
            assert!(result.is_err());
        }

        assert!(cache.is_empty());
        assert!(cache.keys().is_empty());
        assert_eq!(cache.invalidate_prefix("/api/movimientos-inventario/"), 0);
        assert!(matches!(
            events.try_recv(),
            Err(broadcast::error::TryRecvError::Empty)
        ));
    }

    #[tokio::test]
    async fn failed_revalidate_drops_nothing_else() {
        let cache = ResourceCache::default();
        let ok = CacheKey::from("/api/bodegas/");
        let failing = CacheKey::from("/api/pagos/");
        cache.get_or_fetch(&ok, || async { Ok(json!([])) }).await.unwrap();

        let result = cache
            .revalidate(&failing, || async {
                Err(ClientError::Connection("refused".into()))
            })
            .await;
        assert!(result.is_err());
        assert_eq!(cache.keys(), vec![ok]);
    }

    #[tokio::test]
    async fn revalidate_replaces_ready_entries() {
        let cache = ResourceCache::default();
        let calls = AtomicUsize::new(0);
        let key = CacheKey::from("/api/categorias/");

        cache
            .get_or_fetch(&key, || counting_fetch(&calls, json!(["viejo"])))
            .await
            .unwrap();
        let fresh = cache
            .revalidate(&key, || counting_fetch(&calls, json!(["nuevo"])))
            .await
            .unwrap();

        assert_eq!(*fresh, json!(["nuevo"]));
        assert_eq!(cache.peek(&key).as_deref(), Some(&json!(["nuevo"])));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn revalidate_joins_inflight_fetch() {
        let cache = ResourceCache::default();
        let calls = AtomicUsize::new(0);
        let key = CacheKey::from("/api/categorias/");

        let (read, revalidated) = tokio::join!(
            cache.get_or_fetch(&key, || counting_fetch(&calls, json!(["leido"]))),
            cache.revalidate(&key, || counting_fetch(&calls, json!(["revalidado"]))),
        );

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(read.unwrap(), revalidated.unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn stale_entries_are_refetched() {
        let cache = ResourceCache::new(Some(Duration::from_secs(60)));
        let calls = AtomicUsize::new(0);
        let key = CacheKey::from("/api/core/ciudades/");

        cache
            .get_or_fetch(&key, || counting_fetch(&calls, json!([1])))
            .await
            .unwrap();
        assert!(cache.is_fresh(&key));

        tokio::time::advance(Duration::from_secs(61)).await;
        assert!(!cache.is_fresh(&key));

        let value = cache
            .get_or_fetch(&key, || counting_fetch(&calls, json!([2])))
            .await
            .unwrap();
        assert_eq!(*value, json!([2]));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn invalidation_during_fetch_does_not_repopulate() {
        let cache = Arc::new(ResourceCache::default());
        let key = CacheKey::from("/api/stock/");
        let (release_tx, release_rx) = tokio::sync::oneshot::channel::<()>();
        let (started_tx, started_rx) = tokio::sync::oneshot::channel::<()>();

        let reader = {
            let cache = cache.clone();
            let key = key.clone();
            tokio::spawn(async move {
                cache
                    .get_or_fetch(&key, || async move {
                        let _ = started_tx.send(());
                        let _ = release_rx.await;
                        Ok(json!(["stale"]))
                    })
                    .await
            })
        };

        started_rx.await.unwrap();
        assert!(cache.invalidate(&key));
        release_tx.send(()).unwrap();

        let value = reader.await.unwrap().unwrap();
        assert_eq!(*value, json!(["stale"]));
        assert!(cache.peek(&key).is_none());
    }

    #[tokio::test]
    async fn subscribers_see_updates_and_invalidations() {
        let cache = ResourceCache::default();
        let mut events = cache.subscribe();
        let key = CacheKey::from("/api/bodegas/");

        cache.get_or_fetch(&key, || async { Ok(json!([])) }).await.unwrap();
        cache.invalidate(&key);

        assert_eq!(events.recv().await.unwrap(), CacheEvent::Updated(key.clone()));
        assert_eq!(events.recv().await.unwrap(), CacheEvent::Invalidated(key));
    }
}
