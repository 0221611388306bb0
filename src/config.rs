//! Configuration Module
//!
//! Immutable cache construction parameters: the capacity bound, the TTL
//! bound, and the TTL refresh discipline.

use std::time::Duration;

use crate::error::{CacheError, Result};

// == Capacity ==
/// Entry-count bound for the cache.
///
/// Modeled as a tagged enum rather than sentinel integers so that "no
/// limit" and "caching off" cannot be confused with a real bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capacity {
    /// Every `set` is a no-op and every `get` misses. Used to switch a
    /// caching layer off without changing call sites.
    Disabled,
    /// No entry-count bound; the recency index is not maintained.
    Unbounded,
    /// At most this many live entries; least-recently-used entries are
    /// evicted to hold the bound. Must be positive.
    Bounded(usize),
}

impl Capacity {
    /// Returns the bound when finite.
    pub fn limit(&self) -> Option<usize> {
        match self {
            Capacity::Bounded(n) => Some(*n),
            _ => None,
        }
    }

    /// True when the recency index is engaged.
    pub fn is_bounded(&self) -> bool {
        matches!(self, Capacity::Bounded(_))
    }

    /// True when the cache is switched off entirely.
    pub fn is_disabled(&self) -> bool {
        matches!(self, Capacity::Disabled)
    }
}

// == Cache Config ==
/// Cache construction parameters.
///
/// Immutable after construction. Both bounds are optional and independent:
/// `Capacity::Unbounded` disables capacity eviction, a zero `ttl` disables
/// expiry.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Entry-count bound
    pub capacity: Capacity,
    /// Time-to-live per entry; `Duration::ZERO` means entries never expire
    pub ttl: Duration,
    /// When true, the TTL deadline is fixed at insertion and reads do not
    /// extend it. When false (the default), every successful read slides
    /// the deadline forward by `ttl`.
    pub static_ttl: bool,
}

impl CacheConfig {
    /// Creates a config with the default parameters (unbounded, no TTL).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the capacity bound.
    pub fn capacity(mut self, capacity: Capacity) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the time-to-live; `Duration::ZERO` disables expiry.
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Selects the static TTL discipline (deadline fixed at insertion).
    pub fn static_ttl(mut self, static_ttl: bool) -> Self {
        self.static_ttl = static_ttl;
        self
    }

    /// True when the expiry index is engaged.
    pub fn ttl_enabled(&self) -> bool {
        !self.ttl.is_zero()
    }

    /// Validates the configuration, rejecting combinations that would
    /// corrupt internal invariants later (a zero capacity bound cannot hold
    /// even the entry being inserted).
    pub fn validate(&self) -> Result<()> {
        if self.capacity == Capacity::Bounded(0) {
            return Err(CacheError::InvalidConfig(
                "bounded capacity must be positive, use Capacity::Disabled to turn caching off"
                    .to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: Capacity::Unbounded,
            ttl: Duration::ZERO,
            static_ttl: false,
        }
    }
}
