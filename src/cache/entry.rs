//! Cache Entry Module
//!
//! Defines the record owned by the primary store for each live key.

use tokio::time::Instant;

use crate::cache::ttl::ExpiryRef;

// == Cache Entry ==
/// A single live entry.
///
/// The entry owns the value; `lru_ref` and `ttl_ref` are non-owning
/// back-references into the recency and expiry indices, present only while
/// the corresponding policy is engaged. They exist so removal and
/// repositioning never have to search either index.
#[derive(Debug)]
pub(crate) struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Slot handle in the recency list, when capacity-bounded
    pub lru_ref: Option<usize>,
    /// Position handle in the expiry index, when TTL is engaged
    pub ttl_ref: Option<ExpiryRef>,
    /// Opaque extension tag, stored but not interpreted
    #[allow(dead_code)]
    pub group_tag: Option<String>,
}

impl<V> CacheEntry<V> {
    /// Creates an entry not yet linked into any index.
    pub(crate) fn new(value: V, group_tag: Option<String>) -> Self {
        Self {
            value,
            lru_ref: None,
            ttl_ref: None,
            group_tag,
        }
    }

    // == Deadline ==
    /// Absolute expiry deadline, when TTL is engaged.
    pub(crate) fn deadline(&self) -> Option<Instant> {
        self.ttl_ref.map(|(deadline, _)| deadline)
    }

    // == Is Expired ==
    /// True when a deadline is set and `now` has reached it. Entries
    /// without a deadline never expire.
    pub(crate) fn is_expired(&self, now: Instant) -> bool {
        match self.deadline() {
            Some(deadline) => now >= deadline,
            None => false,
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_entry_unlinked_on_creation() {
        let entry = CacheEntry::new("v".to_string(), None);
        assert!(entry.lru_ref.is_none());
        assert!(entry.ttl_ref.is_none());
        assert!(entry.group_tag.is_none());
        assert!(entry.deadline().is_none());
    }

    #[test]
    fn test_entry_never_expires_without_deadline() {
        let entry = CacheEntry::new(42, None);
        assert!(!entry.is_expired(Instant::now() + Duration::from_secs(3600)));
    }

    #[test]
    fn test_entry_expiry_boundary() {
        let now = Instant::now();
        let deadline = now + Duration::from_millis(10);
        let mut entry = CacheEntry::new(42, None);
        entry.ttl_ref = Some((deadline, 1));

        assert!(!entry.is_expired(now));
        // Expired exactly at the deadline, not one tick later
        assert!(entry.is_expired(deadline));
        assert!(entry.is_expired(deadline + Duration::from_millis(1)));
    }

    #[test]
    fn test_entry_keeps_group_tag() {
        let entry = CacheEntry::new("v", Some("grp1".to_string()));
        assert_eq!(entry.group_tag.as_deref(), Some("grp1"));
    }
}
