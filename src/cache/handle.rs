//! Cache Handle Module
//!
//! The public front door: a cloneable handle serializing all operations
//! (and the background sweeper) through one lock over the store.

use std::sync::Arc;

use tokio::sync::{Notify, RwLock};
use tokio::time::Instant;

use crate::cache::store::CacheStore;
use crate::cache::{CacheStats, EvictionListener};
use crate::config::CacheConfig;
use crate::error::Result;
use crate::tasks::sweep::{spawn_sweep_task, SweepGuard};

// == Cache ==
/// In-memory key-value cache with composable LRU and TTL eviction.
///
/// Cloning produces another handle to the same cache. The configured
/// eviction listener fires exactly once per removed entry, whatever removed
/// it (explicit [`remove`](Self::remove), capacity eviction, TTL sweep, or
/// [`clear`](Self::clear)), and always *after* the internal lock has been
/// released — a listener may call back into the cache freely, at the cost
/// that it can race with a concurrent `set` of the same key.
///
/// Note that [`get`](Self::get) is a mutating read: under a bounded
/// capacity it promotes the entry to most-recently-used, and under the
/// sliding TTL discipline it pushes the entry's expiry deadline forward.
/// This is the intended behavior of a touch-based cache, not a side effect
/// to engineer around.
///
/// When a TTL is configured, construction spawns the sweeper task and must
/// therefore happen inside a tokio runtime. The sweeper is aborted when the
/// last handle is dropped.
pub struct Cache<V> {
    store: Arc<RwLock<CacheStore<V>>>,
    on_evicted: Option<EvictionListener<V>>,
    /// Wakes the sweeper when the earliest deadline may have moved
    wake: Option<Arc<Notify>>,
    _sweeper: Option<Arc<SweepGuard>>,
}

impl<V> Clone for Cache<V> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            on_evicted: self.on_evicted.clone(),
            wake: self.wake.clone(),
            _sweeper: self._sweeper.clone(),
        }
    }
}

impl<V> Cache<V>
where
    V: Clone + Send + Sync + 'static,
{
    // == Constructors ==
    /// Creates a cache without an eviction listener.
    pub fn new(config: CacheConfig) -> Result<Self> {
        Self::build(config, None)
    }

    /// Creates a cache whose `listener` receives every removed entry with
    /// its last stored value.
    pub fn with_eviction_listener(
        config: CacheConfig,
        listener: impl Fn(String, V) + Send + Sync + 'static,
    ) -> Result<Self> {
        Self::build(config, Some(Arc::new(listener)))
    }

    fn build(config: CacheConfig, on_evicted: Option<EvictionListener<V>>) -> Result<Self> {
        config.validate()?;
        let store = Arc::new(RwLock::new(CacheStore::new(&config)));

        // A disabled cache never holds entries, so nothing can ever expire.
        let (wake, sweeper) = if config.ttl_enabled() && !config.capacity.is_disabled() {
            let wake = Arc::new(Notify::new());
            let guard = spawn_sweep_task(store.clone(), wake.clone(), on_evicted.clone());
            (Some(wake), Some(Arc::new(guard)))
        } else {
            (None, None)
        };

        Ok(Self {
            store,
            on_evicted,
            wake,
            _sweeper: sweeper,
        })
    }

    // == Set ==
    /// Inserts or overwrites a key.
    ///
    /// Overwriting counts as a fresh touch (recency promoted, TTL deadline
    /// reset) and never fires the listener. A fresh insert past a bounded
    /// capacity evicts the least-recently-used entry, for which the
    /// listener fires. No-op on a disabled cache.
    pub async fn set(&self, key: impl Into<String>, value: V) {
        self.set_tagged(key, value, None).await
    }

    /// [`set`](Self::set) with an opaque group tag stored on the entry.
    ///
    /// The tag is an extension point carried on the entry; the cache itself
    /// does not interpret it.
    pub async fn set_tagged(&self, key: impl Into<String>, value: V, group_tag: Option<String>) {
        let evicted = {
            let mut store = self.store.write().await;
            store.set(key.into(), value, group_tag, Instant::now())
        };
        self.wake_sweeper();
        if let Some((key, value)) = evicted {
            self.dispatch(key, value);
        }
    }

    // == Get ==
    /// Looks up a key, returning None when it was never set, was removed,
    /// or has expired.
    ///
    /// A hit touches the entry: recency promotion when capacity-bounded,
    /// deadline refresh when the TTL discipline is sliding.
    pub async fn get(&self, key: &str) -> Option<V> {
        let (value, expired) = {
            let mut store = self.store.write().await;
            store.get(key, Instant::now())
        };
        if let Some((key, value)) = expired {
            self.wake_sweeper();
            self.dispatch(key, value);
        }
        value
    }

    // == Remove ==
    /// Removes a key if live, firing the listener. Silent no-op otherwise;
    /// removing twice fires the listener only once.
    pub async fn remove(&self, key: &str) {
        let removed = {
            let mut store = self.store.write().await;
            store.remove(key)
        };
        if let Some((key, value)) = removed {
            self.wake_sweeper();
            self.dispatch(key, value);
        }
    }

    // == Clear ==
    /// Removes every entry, firing the listener for each in unspecified
    /// order, and leaves the sweeper idle.
    pub async fn clear(&self) {
        let removed = {
            let mut store = self.store.write().await;
            store.clear()
        };
        self.wake_sweeper();
        for (key, value) in removed {
            self.dispatch(key, value);
        }
    }

    // == Length ==
    /// Number of live entries. The background sweep keeps this accurate
    /// for TTL caches even without read traffic.
    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    /// True when no entries are live.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    // == Keys ==
    /// Snapshot of all live keys, in no particular order.
    pub async fn keys(&self) -> Vec<String> {
        self.store.read().await.keys()
    }

    // == Stats ==
    /// Snapshot of the performance counters.
    pub async fn stats(&self) -> CacheStats {
        self.store.read().await.stats()
    }

    /// Signals the sweeper to re-read the earliest pending deadline.
    fn wake_sweeper(&self) {
        if let Some(wake) = &self.wake {
            wake.notify_one();
        }
    }

    /// Invokes the eviction listener outside the lock.
    fn dispatch(&self, key: String, value: V) {
        if let Some(listener) = &self.on_evicted {
            listener(key, value);
        }
    }
}
