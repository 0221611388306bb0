//! TTL Sweep Task
//!
//! Background task that removes expired cache entries on their deadlines,
//! independent of read and write traffic.
//!
//! The task arms a timer at the earliest pending deadline. Any mutation
//! that can move that deadline signals the shared [`Notify`], which makes
//! the loop re-read the expiry index and re-arm. When no deadline is
//! pending the task parks on the notify alone, so an idle or cleared cache
//! costs nothing.

use std::sync::Arc;

use tokio::sync::{Notify, RwLock};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info};

use crate::cache::store::CacheStore;
use crate::cache::EvictionListener;

/// Owns the sweeper task for one cache instance. Dropping the last cache
/// handle drops this guard, which aborts the task so no scheduled work
/// outlives the cache.
#[derive(Debug)]
pub(crate) struct SweepGuard {
    handle: JoinHandle<()>,
}

impl Drop for SweepGuard {
    fn drop(&mut self) {
        self.handle.abort();
        debug!("expiry sweeper stopped");
    }
}

/// Spawns the sweeper for a TTL-enabled cache.
///
/// The task acquires the same lock as foreign callers for each pass, then
/// releases it before invoking the eviction listener on what it removed.
///
/// Must be called from within a tokio runtime.
pub(crate) fn spawn_sweep_task<V>(
    store: Arc<RwLock<CacheStore<V>>>,
    wake: Arc<Notify>,
    on_evicted: Option<EvictionListener<V>>,
) -> SweepGuard
where
    V: Clone + Send + Sync + 'static,
{
    let handle = tokio::spawn(async move {
        debug!("expiry sweeper started");
        loop {
            let deadline = { store.read().await.next_deadline() };
            match deadline {
                // Nothing pending; wait for a mutation to schedule work.
                None => wake.notified().await,
                Some(at) => {
                    tokio::select! {
                        // Deadline set changed; re-arm.
                        _ = wake.notified() => {}
                        _ = tokio::time::sleep_until(at) => {
                            let removed = { store.write().await.sweep(Instant::now()) };
                            if !removed.is_empty() {
                                info!("sweep removed {} expired entries", removed.len());
                                if let Some(listener) = &on_evicted {
                                    for (key, value) in removed {
                                        listener(key, value);
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    });
    SweepGuard { handle }
}
