//! Cache Module
//!
//! In-memory key-value caching with two composable eviction policies: a
//! maximum-entry-count (LRU) bound and a TTL bound, each optionally
//! disabled.

mod entry;
mod handle;
mod lru;
mod stats;
pub(crate) mod store;
mod ttl;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use handle::Cache;
pub use stats::CacheStats;

use std::sync::Arc;

// == Eviction Listener ==
/// Callback receiving every removed entry `(key, last value)` exactly once,
/// regardless of the removal cause.
pub type EvictionListener<V> = Arc<dyn Fn(String, V) + Send + Sync>;
