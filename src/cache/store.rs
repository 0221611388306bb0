//! Cache Store Module
//!
//! The eviction engine: primary HashMap storage coordinated with the
//! recency list and the expiry index.
//!
//! The store is single-threaded on purpose; `Cache` wraps it in a lock and
//! owns callback dispatch. Every mutating operation therefore *returns* the
//! `(key, value)` pairs it removed instead of firing the eviction listener
//! itself, so the listener can run after the lock is released.

use std::collections::HashMap;
use std::time::Duration;

use tokio::time::Instant;

use crate::cache::entry::CacheEntry;
use crate::cache::lru::RecencyList;
use crate::cache::ttl::ExpiryIndex;
use crate::cache::CacheStats;
use crate::config::{CacheConfig, Capacity};

// == Cache Store ==
/// Engine holding the three coordinated structures.
///
/// Invariants, enforced by routing every removal through [`Self::take`]:
/// - a key is in `entries` iff it is live;
/// - when capacity is bounded, `lru.len() == entries.len()` and each live
///   entry holds exactly one recency slot handle;
/// - when TTL is engaged, `ttl_idx.len() == entries.len()` and each live
///   entry holds exactly one expiry handle matching its current deadline.
#[derive(Debug)]
pub(crate) struct CacheStore<V> {
    /// Primary key-value storage, the single source of truth for liveness
    entries: HashMap<String, CacheEntry<V>>,
    /// Recency index, maintained only when capacity is bounded
    lru: RecencyList,
    /// Expiry index, maintained only when a TTL is configured
    ttl_idx: ExpiryIndex,
    capacity: Capacity,
    /// None when expiry is disabled
    ttl: Option<Duration>,
    static_ttl: bool,
    stats: CacheStats,
}

impl<V: Clone> CacheStore<V> {
    // == Constructor ==
    /// Creates an empty store for a validated configuration.
    pub(crate) fn new(config: &CacheConfig) -> Self {
        Self {
            entries: HashMap::new(),
            lru: RecencyList::new(),
            ttl_idx: ExpiryIndex::new(),
            capacity: config.capacity,
            ttl: if config.ttl_enabled() {
                Some(config.ttl)
            } else {
                None
            },
            static_ttl: config.static_ttl,
            stats: CacheStats::new(),
        }
    }

    // == Set ==
    /// Inserts or overwrites a key, treating either as a fresh touch.
    ///
    /// Overwriting replaces the value in place, promotes recency, and
    /// resets the deadline under both TTL disciplines; the entry count does
    /// not change and nothing is returned. A fresh insert that pushes a
    /// bounded cache over its limit evicts the current recency tail, which
    /// is returned for listener dispatch. Under `Capacity::Disabled` this
    /// is a no-op.
    pub(crate) fn set(
        &mut self,
        key: String,
        value: V,
        group_tag: Option<String>,
        now: Instant,
    ) -> Option<(String, V)> {
        if self.capacity.is_disabled() {
            return None;
        }

        if let Some(entry) = self.entries.get_mut(&key) {
            entry.value = value;
            entry.group_tag = group_tag;
            if let Some(idx) = entry.lru_ref {
                self.lru.move_to_front(idx);
            }
            if let Some(old) = entry.ttl_ref.take() {
                self.ttl_idx.remove(&old);
            }
            if let Some(ttl) = self.ttl {
                entry.ttl_ref = Some(self.ttl_idx.insert(now + ttl, key));
            }
            return None;
        }

        let mut entry = CacheEntry::new(value, group_tag);
        if self.capacity.is_bounded() {
            entry.lru_ref = Some(self.lru.push_front(key.clone()));
        }
        if let Some(ttl) = self.ttl {
            entry.ttl_ref = Some(self.ttl_idx.insert(now + ttl, key.clone()));
        }
        self.entries.insert(key, entry);
        self.stats.entries = self.entries.len();

        // Over the bound by exactly the entry just inserted; shed the tail.
        if let Some(limit) = self.capacity.limit() {
            if self.entries.len() > limit {
                let victim = self.lru.back().map(str::to_string);
                if let Some(victim) = victim {
                    let removed = self.take(&victim);
                    self.stats.record_eviction();
                    return removed;
                }
            }
        }
        None
    }

    // == Get ==
    /// Looks up a key, returning `(value, lazily_expired_removal)`.
    ///
    /// A hit is a touch: recency is promoted when bounded, and under the
    /// sliding discipline the deadline moves to `now + ttl`. An entry whose
    /// deadline has already passed is removed on the spot and reported as
    /// the second tuple element so the caller can fire the listener; the
    /// lookup itself reports a miss.
    pub(crate) fn get(&mut self, key: &str, now: Instant) -> (Option<V>, Option<(String, V)>) {
        let Some(entry) = self.entries.get_mut(key) else {
            self.stats.record_miss();
            return (None, None);
        };

        if entry.is_expired(now) {
            self.stats.record_miss();
            self.stats.record_expiration();
            return (None, self.take(key));
        }

        let value = entry.value.clone();
        if let Some(idx) = entry.lru_ref {
            self.lru.move_to_front(idx);
        }
        if !self.static_ttl {
            if let Some(ttl) = self.ttl {
                if let Some(old) = entry.ttl_ref.take() {
                    self.ttl_idx.remove(&old);
                }
                entry.ttl_ref = Some(self.ttl_idx.insert(now + ttl, key.to_string()));
            }
        }
        self.stats.record_hit();
        (Some(value), None)
    }

    // == Remove ==
    /// Explicitly removes a key; None when it was not live (idempotent).
    pub(crate) fn remove(&mut self, key: &str) -> Option<(String, V)> {
        self.take(key)
    }

    // == Sweep ==
    /// Removes every entry whose deadline is at or before `now`, in
    /// deadline order, and returns the pairs for listener dispatch.
    pub(crate) fn sweep(&mut self, now: Instant) -> Vec<(String, V)> {
        let mut removed = Vec::new();
        while let Some(key) = self.ttl_idx.pop_due(now) {
            if let Some(pair) = self.take(&key) {
                self.stats.record_expiration();
                removed.push(pair);
            }
        }
        removed
    }

    // == Clear ==
    /// Removes everything, returning the pairs for listener dispatch.
    pub(crate) fn clear(&mut self) -> Vec<(String, V)> {
        let removed: Vec<(String, V)> = self
            .entries
            .drain()
            .map(|(key, entry)| (key, entry.value))
            .collect();
        self.lru.clear();
        self.ttl_idx.clear();
        self.stats.entries = 0;
        removed
    }

    // == Take ==
    /// Central removal procedure shared by every trigger path (explicit
    /// remove, capacity eviction, sweep, lazy expiry on read): detaches the
    /// entry from whichever indices hold it, deletes it from the primary
    /// store, and hands the pair back. No-op on absent keys, so a key can
    /// never be removed twice.
    fn take(&mut self, key: &str) -> Option<(String, V)> {
        let entry = self.entries.remove(key)?;
        if let Some(idx) = entry.lru_ref {
            self.lru.unlink(idx);
        }
        if let Some(handle) = entry.ttl_ref {
            // Already popped when the sweep path got here; harmless then.
            self.ttl_idx.remove(&handle);
        }
        self.stats.entries = self.entries.len();
        Some((key.to_string(), entry.value))
    }

    // == Next Deadline ==
    /// Earliest pending expiry deadline; what the sweeper arms to.
    pub(crate) fn next_deadline(&self) -> Option<Instant> {
        self.ttl_idx.next_deadline()
    }

    // == Length ==
    /// Number of live entries.
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    // == Keys ==
    /// Snapshot of live keys, in no particular order.
    pub(crate) fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    // == Stats ==
    /// Current counters with the live-entry count refreshed.
    pub(crate) fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.entries = self.entries.len();
        stats
    }

    #[cfg(test)]
    pub(crate) fn recency(&self) -> &RecencyList {
        &self.lru
    }

    #[cfg(test)]
    pub(crate) fn expiry(&self) -> &ExpiryIndex {
        &self.ttl_idx
    }
}
