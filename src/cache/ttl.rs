//! Expiry Index Module
//!
//! Orders live keys by their absolute expiry deadline so the sweeper can
//! remove everything due without scanning the primary store.
//!
//! The index is a `BTreeMap` keyed by `(deadline, seq)`, where `seq` is a
//! monotonically increasing counter that keeps entries with identical
//! deadlines distinct. The composite key doubles as the non-owning handle
//! the primary store keeps on each entry for O(log n) removal and
//! repositioning.

use tokio::time::Instant;

use std::collections::BTreeMap;

/// Non-owning handle to a position in the expiry index.
pub(crate) type ExpiryRef = (Instant, u64);

// == Expiry Index ==
/// Keys ordered by ascending expiry deadline.
#[derive(Debug, Default)]
pub(crate) struct ExpiryIndex {
    index: BTreeMap<ExpiryRef, String>,
    /// Tiebreak for equal deadlines
    seq: u64,
}

impl ExpiryIndex {
    /// Creates an empty expiry index.
    pub(crate) fn new() -> Self {
        Self::default()
    }

    // == Insert ==
    /// Registers a key under `deadline` and returns the handle to store on
    /// the entry.
    pub(crate) fn insert(&mut self, deadline: Instant, key: String) -> ExpiryRef {
        self.seq += 1;
        let handle = (deadline, self.seq);
        self.index.insert(handle, key);
        handle
    }

    // == Remove ==
    /// Drops the position behind `handle`. No-op if it was already popped
    /// by a sweep.
    pub(crate) fn remove(&mut self, handle: &ExpiryRef) {
        self.index.remove(handle);
    }

    // == Next Deadline ==
    /// Earliest pending deadline, if any. This is what the sweeper arms
    /// its timer to.
    pub(crate) fn next_deadline(&self) -> Option<Instant> {
        self.index.keys().next().map(|(deadline, _)| *deadline)
    }

    // == Pop Due ==
    /// Removes and returns the key with the earliest deadline if that
    /// deadline is at or before `now`.
    pub(crate) fn pop_due(&mut self, now: Instant) -> Option<String> {
        let (deadline, _) = *self.index.keys().next()?;
        if deadline > now {
            return None;
        }
        self.index.pop_first().map(|(_, key)| key)
    }

    // == Length ==
    /// Number of indexed keys.
    #[allow(dead_code)]
    pub(crate) fn len(&self) -> usize {
        self.index.len()
    }

    /// Drops all positions.
    pub(crate) fn clear(&mut self) {
        self.index.clear();
    }
}
