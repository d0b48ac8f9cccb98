//! Doubly linked recency list stored in an index arena.
//!
//! Nodes live in a `Vec` and link to each other by slot index instead of by
//! pointer, so the list owns every entry outright and needs no `unsafe`.
//! Released slots go on a free list and are handed out again by the next
//! insertion.

// Internal node structure for the doubly linked list
struct Node<K, V> {
    entry: Option<(K, V)>,
    prev: Option<usize>,
    next: Option<usize>,
}

/// Entries ordered from most recently used (head) to least recently used
/// (tail).
pub(crate) struct RecencyList<K, V> {
    nodes: Vec<Node<K, V>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl<K, V> RecencyList<K, V> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    /// Inserts an entry at the head and returns the slot it landed in.
    pub(crate) fn push_front(&mut self, key: K, value: V) -> usize {
        let node = Node {
            entry: Some((key, value)),
            prev: None,
            next: None,
        };
        let idx = match self.free.pop() {
            Some(idx) => {
                self.nodes[idx] = node;
                idx
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        };
        self.link_front(idx);
        self.len += 1;
        idx
    }

    /// Marks the entry in `idx` as the most recently used one.
    pub(crate) fn move_to_front(&mut self, idx: usize) {
        debug_assert!(self.nodes[idx].entry.is_some(), "slot {idx} is free");
        if self.head == Some(idx) {
            return;
        }
        self.unlink(idx);
        self.link_front(idx);
    }

    /// Unlinks the entry in `idx` and releases its slot.
    pub(crate) fn remove(&mut self, idx: usize) -> Option<(K, V)> {
        let entry = self.nodes.get_mut(idx)?.entry.take()?;
        self.unlink(idx);
        self.free.push(idx);
        self.len -= 1;
        Some(entry)
    }

    /// Removes the least recently used entry.
    pub(crate) fn pop_back(&mut self) -> Option<(K, V)> {
        let tail = self.tail?;
        self.remove(tail)
    }

    pub(crate) fn get(&self, idx: usize) -> Option<&V> {
        self.nodes.get(idx)?.entry.as_ref().map(|(_, value)| value)
    }

    pub(crate) fn get_mut(&mut self, idx: usize) -> Option<&mut V> {
        self.nodes.get_mut(idx)?.entry.as_mut().map(|(_, value)| value)
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drops every entry. Allocated arena capacity is kept.
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    /// Walks the entries from most to least recently used.
    pub(crate) fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            list: self,
            cursor: self.head,
        }
    }

    fn link_front(&mut self, idx: usize) {
        self.nodes[idx].prev = None;
        self.nodes[idx].next = self.head;
        match self.head {
            Some(head) => self.nodes[head].prev = Some(idx),
            // Empty list case
            None => self.tail = Some(idx),
        }
        self.head = Some(idx);
    }

    fn unlink(&mut self, idx: usize) {
        let prev = self.nodes[idx].prev.take();
        let next = self.nodes[idx].next.take();

        match prev {
            Some(prev) => self.nodes[prev].next = next,
            None => self.head = next,
        }
        match next {
            Some(next) => self.nodes[next].prev = prev,
            None => self.tail = prev,
        }
    }

    #[cfg(test)]
    pub(crate) fn key_at(&self, idx: usize) -> Option<&K> {
        self.nodes.get(idx)?.entry.as_ref().map(|(key, _)| key)
    }

    /// Walks the links from head to tail and checks them against `len` and
    /// the free list.
    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        let mut forward = Vec::new();
        let mut cursor = self.head;
        let mut prev = None;
        while let Some(idx) = cursor {
            let node = &self.nodes[idx];
            assert!(node.entry.is_some(), "linked slot {idx} is free");
            assert_eq!(node.prev, prev, "broken prev link at slot {idx}");
            forward.push(idx);
            assert!(forward.len() <= self.nodes.len(), "cycle in list");
            prev = Some(idx);
            cursor = node.next;
        }
        assert_eq!(self.tail, prev, "tail does not end the list");
        assert_eq!(forward.len(), self.len);
        assert_eq!(self.len + self.free.len(), self.nodes.len());
        for &idx in &self.free {
            assert!(self.nodes[idx].entry.is_none(), "free slot {idx} is occupied");
        }
    }
}

pub(crate) struct Iter<'a, K, V> {
    list: &'a RecencyList<K, V>,
    cursor: Option<usize>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let list = self.list;
        let node = &list.nodes[self.cursor?];
        self.cursor = node.next;
        node.entry.as_ref().map(|(key, value)| (key, value))
    }
}
