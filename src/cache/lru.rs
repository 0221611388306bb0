//! Recency Index Module
//!
//! Implements least-recently-used ordering for capacity eviction.
//!
//! Keys live in a slab-backed doubly linked list:
//! - Head = most recently used
//! - Tail = least recently used
//!
//! Each node is addressed by its slot index, which the primary store keeps
//! as a non-owning back-reference on the entry. All repositioning and
//! unlinking is O(1) through that handle; only the slab itself owns the
//! nodes.

// == Node ==
#[derive(Debug)]
struct Node {
    key: String,
    prev: Option<usize>,
    next: Option<usize>,
}

// == Recency List ==
/// Doubly linked list over keys, ordered from most to least recently used.
#[derive(Debug, Default)]
pub(crate) struct RecencyList {
    /// Slab of nodes; freed slots are recycled via `free`
    slots: Vec<Node>,
    /// Indices of vacant slots
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl RecencyList {
    /// Creates an empty recency list.
    pub(crate) fn new() -> Self {
        Self::default()
    }

    // == Push Front ==
    /// Inserts a new key at the head (most recently used) and returns its
    /// slot handle.
    pub(crate) fn push_front(&mut self, key: String) -> usize {
        let node = Node {
            key,
            prev: None,
            next: self.head,
        };
        let idx = match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = node;
                idx
            }
            None => {
                self.slots.push(node);
                self.slots.len() - 1
            }
        };
        if let Some(old_head) = self.head {
            self.slots[old_head].prev = Some(idx);
        }
        self.head = Some(idx);
        if self.tail.is_none() {
            self.tail = Some(idx);
        }
        self.len += 1;
        idx
    }

    // == Move To Front ==
    /// Promotes the node at `idx` to the head in O(1).
    pub(crate) fn move_to_front(&mut self, idx: usize) {
        if self.head == Some(idx) {
            return;
        }
        self.detach(idx);
        self.slots[idx].prev = None;
        self.slots[idx].next = self.head;
        if let Some(old_head) = self.head {
            self.slots[old_head].prev = Some(idx);
        }
        self.head = Some(idx);
        if self.tail.is_none() {
            self.tail = Some(idx);
        }
    }

    // == Unlink ==
    /// Removes the node at `idx` from the list, freeing its slot.
    pub(crate) fn unlink(&mut self, idx: usize) {
        self.detach(idx);
        self.free.push(idx);
        self.len -= 1;
    }

    /// Unhooks `idx` from its neighbors and the head/tail pointers without
    /// freeing the slot.
    fn detach(&mut self, idx: usize) {
        let (prev, next) = (self.slots[idx].prev, self.slots[idx].next);
        match prev {
            Some(p) => self.slots[p].next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.slots[n].prev = prev,
            None => self.tail = prev,
        }
        self.slots[idx].prev = None;
        self.slots[idx].next = None;
    }

    // == Front / Back ==
    /// Key of the most-recently-used node.
    #[allow(dead_code)]
    pub(crate) fn front(&self) -> Option<&str> {
        self.head.map(|idx| self.slots[idx].key.as_str())
    }

    /// Key of the least-recently-used node.
    pub(crate) fn back(&self) -> Option<&str> {
        self.tail.map(|idx| self.slots[idx].key.as_str())
    }

    // == Length ==
    /// Number of linked nodes.
    #[allow(dead_code)]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Drops all nodes and recycled slots.
    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    /// Keys in order from most to least recently used.
    #[cfg(test)]
    pub(crate) fn keys_mru_first(&self) -> Vec<&str> {
        let mut out = Vec::with_capacity(self.len);
        let mut cursor = self.head;
        while let Some(idx) = cursor {
            out.push(self.slots[idx].key.as_str());
            cursor = self.slots[idx].next;
        }
        out
    }
}
