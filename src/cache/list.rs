//! Arena-backed doubly linked list that keeps cache entries in recency order.
//!
//! ```text
//!   slots: Vec<Option<Node>>            free: Vec<SlotId>
//!
//!   head ──► [2] ⇄ [0] ⇄ [3] ◄── tail       [1]  (vacant, reused by next push)
//!            MRU              LRU
//! ```
//!
//! Links are `Option<SlotId>` rather than references, so the list owns every node and
//! nothing else can keep a node alive. A slot index stays valid until the node in it is
//! removed; after that the slot may be handed out again.

use crate::cache::entry::Entry;
use crate::common::config::SlotId;

#[derive(Debug)]
struct Node<K, V> {
    entry: Entry<K, V>,
    prev: Option<SlotId>,
    next: Option<SlotId>,
}

/// Doubly linked list of [`Entry`] values stored in a slot arena.
#[derive(Debug)]
pub struct RecencyList<K, V> {
    slots: Vec<Option<Node<K, V>>>,
    free: Vec<SlotId>,
    head: Option<SlotId>,
    tail: Option<SlotId>,
    len: usize,
}

impl<K, V> RecencyList<K, V> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        RecencyList {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Slot of the most recently used entry.
    pub fn head(&self) -> Option<SlotId> {
        self.head
    }

    /// Slot of the least recently used entry.
    pub fn tail(&self) -> Option<SlotId> {
        self.tail
    }

    pub fn entry(&self, slot: SlotId) -> Option<&Entry<K, V>> {
        self.node(slot).map(|node| &node.entry)
    }

    pub fn entry_mut(&mut self, slot: SlotId) -> Option<&mut Entry<K, V>> {
        self.node_mut(slot).map(|node| &mut node.entry)
    }

    /// Links a new entry in front of the current head and returns its slot.
    pub fn push_front(&mut self, entry: Entry<K, V>) -> SlotId {
        let node = Node {
            entry,
            prev: None,
            next: None,
        };
        let slot = match self.free.pop() {
            Some(slot) => {
                self.slots[slot] = Some(node);
                slot
            }
            None => {
                self.slots.push(Some(node));
                self.slots.len() - 1
            }
        };

        self.link_front(slot);
        self.len += 1;
        slot
    }

    /// Relocates a live node to the head, keeping the relative order of every other node.
    ///
    /// Returns `false` if `slot` does not hold a node.
    pub fn move_to_front(&mut self, slot: SlotId) -> bool {
        if self.node(slot).is_none() {
            return false;
        }
        if self.head == Some(slot) {
            return true;
        }

        self.unlink(slot);
        self.link_front(slot);
        true
    }

    /// Unlinks the node in `slot` and frees the slot.
    pub fn remove(&mut self, slot: SlotId) -> Option<Entry<K, V>> {
        self.node(slot)?;
        self.unlink(slot);

        let node = self.slots[slot].take()?;
        self.free.push(slot);
        self.len -= 1;
        Some(node.entry)
    }

    /// Unlinks and returns the tail entry.
    pub fn pop_back(&mut self) -> Option<Entry<K, V>> {
        let tail = self.tail?;
        self.remove(tail)
    }

    /// Drops every node and releases all slots.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    /// Head-to-tail traversal. Does not modify the list and can be restarted at will.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            slots: &self.slots,
            cursor: self.head,
            remaining: self.len,
        }
    }

    fn node(&self, slot: SlotId) -> Option<&Node<K, V>> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, slot: SlotId) -> Option<&mut Node<K, V>> {
        self.slots.get_mut(slot).and_then(Option::as_mut)
    }

    // Node at `slot` must be detached (prev and next both None).
    fn link_front(&mut self, slot: SlotId) {
        let old_head = self.head;
        if let Some(node) = self.node_mut(slot) {
            node.prev = None;
            node.next = old_head;
        }

        match old_head.and_then(|head| self.node_mut(head)) {
            Some(head) => head.prev = Some(slot),
            None => self.tail = Some(slot),
        }
        self.head = Some(slot);
    }

    fn unlink(&mut self, slot: SlotId) {
        let (prev, next) = match self.node(slot) {
            Some(node) => (node.prev, node.next),
            None => return,
        };

        match prev.and_then(|p| self.node_mut(p)) {
            Some(prev_node) => prev_node.next = next,
            None => self.head = next,
        }
        match next.and_then(|n| self.node_mut(n)) {
            Some(next_node) => next_node.prev = prev,
            None => self.tail = prev,
        }

        if let Some(node) = self.node_mut(slot) {
            node.prev = None;
            node.next = None;
        }
    }
}

impl<K, V> Default for RecencyList<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over list entries from most to least recently used.
pub struct Iter<'a, K, V> {
    slots: &'a [Option<Node<K, V>>],
    cursor: Option<SlotId>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = &'a Entry<K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        // `remaining` bounds the walk even if the links ever form a cycle
        if self.remaining == 0 {
            return None;
        }
        let node = self.slots.get(self.cursor?)?.as_ref()?;
        self.cursor = node.next;
        self.remaining -= 1;
        Some(&node.entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining))
    }
}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Iter {
            slots: self.slots,
            cursor: self.cursor,
            remaining: self.remaining,
        }
    }
}
