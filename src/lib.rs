//! Dualcache - an in-memory key-value cache with composable eviction
//!
//! Two independent bounds, each optionally disabled: a maximum-entry-count
//! (LRU) bound and a time-to-live bound with a sliding or static refresh
//! discipline. Expired entries are removed by a background sweeper on
//! their deadlines, not just when traffic happens to touch them, and an
//! optional eviction listener observes every removal exactly once.
//!
//! ```no_run
//! use std::time::Duration;
//! use dualcache::{Cache, CacheConfig, Capacity};
//!
//! # async fn demo() {
//! let cache = Cache::new(
//!     CacheConfig::new()
//!         .capacity(Capacity::Bounded(1000))
//!         .ttl(Duration::from_secs(30)),
//! )
//! .unwrap();
//!
//! cache.set("session:42", "alice".to_string()).await;
//! assert_eq!(cache.get("session:42").await.as_deref(), Some("alice"));
//! # }
//! ```

pub mod cache;
pub mod config;
pub mod error;
mod tasks;

pub use cache::{Cache, CacheStats, EvictionListener};
pub use config::{CacheConfig, Capacity};
pub use error::{CacheError, Result};
