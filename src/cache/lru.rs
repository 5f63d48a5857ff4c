//! # LRU (Least Recently Used) Cache Implementation
//!
//! A fixed-capacity cache that evicts the least recently touched entry when a new key would
//! exceed capacity. Lookup, promotion to most-recently-used, and eviction are all O(1).
//! An optional access budget clears the whole cache after a set number of accepted writes.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────────┐
//!   │                            LruCache<K, V>                                │
//!   │                                                                          │
//!   │   ┌────────────────────────────────────────────────────────────────────┐ │
//!   │   │  index: HashMap<K, SlotId>                                         │ │
//!   │   │                                                                    │ │
//!   │   │    "A" ─► 0      "C" ─► 2      "D" ─► 3                            │ │
//!   │   │                                                                    │ │
//!   │   │  O(1) key → slot, never owns a node                                │ │
//!   │   └────────────────────────────────────────────────────────────────────┘ │
//!   │                                 │                                        │
//!   │                                 ▼                                        │
//!   │   ┌────────────────────────────────────────────────────────────────────┐ │
//!   │   │  list: RecencyList<K, V>   (owns every node)                       │ │
//!   │   │                                                                    │ │
//!   │   │  head ──► [3:D] ⇄ [2:C] ⇄ [0:A] ◄── tail                           │ │
//!   │   │           (MRU)            (LRU)                                   │ │
//!   │   └────────────────────────────────────────────────────────────────────┘ │
//!   │                                                                          │
//!   │   capacity: usize    accesses: usize    max_accesses: Option<NonZero>    │
//!   └──────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Touch Flow
//!
//! ```text
//!   touch(key, value)
//!        │
//!        ▼
//!   budget configured and accesses >= max?  ── YES ─► clear(), Err(BudgetExceeded)
//!        │ NO
//!        ▼
//!   capacity == 0?                          ── YES ─► Err(CapacityZero)
//!        │ NO
//!        ▼
//!   accesses += 1
//!        │
//!        ▼
//!   key indexed? ── YES ─► replace value if different, move node to head
//!        │ NO
//!        ▼
//!   push node at head, index it, evict tail if len > capacity
//! ```
//!
//! ## Operations
//!
//! | Method             | Complexity | Counts against budget | Changes order |
//! |--------------------|------------|-----------------------|---------------|
//! | `touch` / `insert` | O(1)       | yes                   | yes           |
//! | `get`              | O(1)       | no                    | yes           |
//! | `peek`             | O(1)       | no                    | no            |
//! | `evict` / `pop_lru`| O(1)       | no                    | -             |
//! | `remove`           | O(1)       | no                    | -             |
//! | `recency_rank`     | O(n)       | no                    | no            |
//! | `iter`             | O(n)       | no                    | no            |
//! | `clear`            | O(n)       | resets counter        | -             |
//!
//! ## Thread Safety
//!
//! - `LruCache` is **NOT thread-safe**
//! - Wrap in `Arc<Mutex<LruCache>>` and hold the lock across each logical operation
//! - Slot indices never leave the cache, so no caller can observe a stale node position

use std::collections::HashMap;
use std::hash::Hash;
use std::mem;
use std::num::NonZeroUsize;

use log::{debug, error, info, warn};

use crate::cache::cache_traits::{CoreCache, LRUCacheTrait, MutableCache};
use crate::cache::entry::Entry;
use crate::cache::list::{self, RecencyList};
use crate::common::config::{CacheConfig, SlotId};
use crate::common::exception::CacheError;

/// Fixed-capacity LRU cache with an optional access budget.
///
/// See module-level documentation for details.
#[derive(Debug)]
pub struct LruCache<K, V>
where
    K: Eq + Hash,
{
    capacity: usize,
    max_accesses: Option<NonZeroUsize>,
    accesses: usize,
    index: HashMap<K, SlotId>,
    list: RecencyList<K, V>,
}

/// Outcome of an accepted write.
struct Admitted<V> {
    slot: SlotId,
    previous: Option<V>,
}

impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
    V: PartialEq,
{
    /// Creates a cache holding at most `capacity` entries, with no access budget.
    pub fn new(capacity: usize) -> Self {
        Self::with_config(CacheConfig::default().with_capacity(capacity))
    }

    /// Creates a cache that clears itself once `max_accesses` writes have been accepted.
    pub fn with_access_budget(capacity: usize, max_accesses: NonZeroUsize) -> Self {
        Self::with_config(CacheConfig {
            capacity,
            max_accesses: Some(max_accesses),
            ..CacheConfig::default()
        })
    }

    pub fn with_config(config: CacheConfig) -> Self {
        info!(
            "Initializing LruCache with capacity {} and access budget {:?}",
            config.capacity, config.max_accesses
        );
        let slots = config.initial_slots();
        LruCache {
            capacity: config.capacity,
            max_accesses: config.max_accesses,
            accesses: 0,
            index: HashMap::with_capacity(slots),
            list: RecencyList::with_capacity(slots),
        }
    }

    /// Inserts or refreshes `key`, making it the most recently used entry.
    ///
    /// Returns `true` iff `key` sits at the head of the recency order afterwards. Every
    /// rejection (zero capacity, exhausted budget) returns `false`; use
    /// [`try_touch`](Self::try_touch) to learn which one.
    pub fn touch(&mut self, key: K, value: V) -> bool {
        match self.admit(key, value) {
            Ok(admitted) => self.list.head() == Some(admitted.slot),
            Err(err) => {
                debug!("Touch rejected: {}", err);
                false
            }
        }
    }

    /// Same as [`touch`](Self::touch), reporting the reason for a rejection.
    pub fn try_touch(&mut self, key: K, value: V) -> Result<(), CacheError> {
        self.admit(key, value).map(|_| ())
    }

    /// Removes the least recently used entry. Returns `false` if nothing was evicted.
    pub fn evict(&mut self) -> bool {
        matches!(self.try_evict(), Ok(Some(_)))
    }

    /// Removes and returns the least recently used entry.
    ///
    /// An empty cache yields `Ok(None)`. If the tail node is not indexed under its own key
    /// the list and index have diverged: debug builds panic, release builds log the fault,
    /// drop every entry, and return [`CacheError::InternalInconsistency`].
    pub fn try_evict(&mut self) -> Result<Option<(K, V)>, CacheError> {
        let Some(tail) = self.list.tail() else {
            return Ok(None);
        };

        let indexed = self
            .list
            .entry(tail)
            .is_some_and(|entry| self.index.get(&entry.key) == Some(&tail));
        if !indexed {
            return Err(self.inconsistency(format!(
                "tail slot {} is not indexed under its key",
                tail
            )));
        }

        let Some(entry) = self.list.remove(tail) else {
            return Err(self.inconsistency(format!("tail slot {} holds no node", tail)));
        };
        self.index.remove(&entry.key);
        debug!("Evicted tail slot {}; {} entries remain", tail, self.list.len());
        Ok(Some(entry.into_parts()))
    }

    /// Drops every entry and resets the access counter.
    pub fn clear(&mut self) {
        self.discard_entries();
        self.accesses = 0;
        debug!("Cache cleared");
    }

    /// Entries from most to least recently used. Does not affect recency.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.list.iter(),
        }
    }

    /// Owned copy of the entries, most recently used first.
    pub fn snapshot(&self) -> Vec<Entry<K, V>>
    where
        V: Clone,
    {
        self.list.iter().cloned().collect()
    }

    /// Looks up `key` without changing its recency.
    pub fn peek(&self, key: &K) -> Option<&V> {
        let slot = *self.index.get(key)?;
        self.list.entry(slot).map(Entry::value)
    }

    /// The most recently used entry.
    pub fn peek_mru(&self) -> Option<(&K, &V)> {
        let head = self.list.head()?;
        self.list.entry(head).map(|entry| (&entry.key, &entry.value))
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Writes accepted since construction or the last clear.
    pub fn access_count(&self) -> usize {
        self.accesses
    }

    pub fn max_accesses(&self) -> Option<NonZeroUsize> {
        self.max_accesses
    }

    fn admit(&mut self, key: K, value: V) -> Result<Admitted<V>, CacheError> {
        if let Some(max) = self.max_accesses {
            if self.accesses >= max.get() {
                self.clear();
                warn!(
                    "Maximum number of cache accesses achieved ({} times); cache cleared",
                    max
                );
                return Err(CacheError::BudgetExceeded {
                    max_accesses: max.get(),
                });
            }
        }

        if self.capacity == 0 {
            warn!("Could not add element: cache capacity is 0");
            return Err(CacheError::CapacityZero);
        }

        self.accesses += 1;

        if let Some(&slot) = self.index.get(&key) {
            let previous = match self.list.entry_mut(slot) {
                Some(entry) if entry.value != value => Some(mem::replace(&mut entry.value, value)),
                // equal values: keep the stored one, hand back the caller's copy
                Some(_) => Some(value),
                None => {
                    return Err(self.inconsistency(format!(
                        "key indexed at vacant slot {}",
                        slot
                    )))
                }
            };
            self.list.move_to_front(slot);
            debug!("Promoted slot {} to head", slot);
            return Ok(Admitted { slot, previous });
        }

        let slot = self.list.push_front(Entry::new(key.clone(), value));
        self.index.insert(key, slot);
        debug!("Inserted new entry at slot {}", slot);

        if self.list.len() > self.capacity {
            self.try_evict()?;
        }
        Ok(Admitted {
            slot,
            previous: None,
        })
    }

    fn discard_entries(&mut self) {
        self.list.clear();
        self.index.clear();
    }

    // Reports a list/index mismatch. Panics in debug builds; otherwise the structure is
    // rebuilt empty so later calls see a consistent cache.
    fn inconsistency(&mut self, detail: String) -> CacheError {
        let err = CacheError::InternalInconsistency { detail };
        error!("{}; discarding {} entries", err, self.list.len());
        if cfg!(debug_assertions) {
            panic!("{}", err);
        }
        self.discard_entries();
        err
    }
}

impl<K, V> CoreCache<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
    V: PartialEq,
{
    /// Goes through the same admission path as `touch`, so it counts against the budget.
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.admit(key, value).ok().and_then(|admitted| admitted.previous)
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        let slot = *self.index.get(key)?;
        self.list.move_to_front(slot);
        self.list.entry(slot).map(Entry::value)
    }

    fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    fn len(&self) -> usize {
        LruCache::len(self)
    }

    fn capacity(&self) -> usize {
        LruCache::capacity(self)
    }

    fn clear(&mut self) {
        LruCache::clear(self)
    }
}

impl<K, V> MutableCache<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
    V: PartialEq,
{
    fn remove(&mut self, key: &K) -> Option<V> {
        let slot = self.index.remove(key)?;
        self.list.remove(slot).map(|entry| entry.value)
    }
}

impl<K, V> LRUCacheTrait<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
    V: PartialEq,
{
    fn pop_lru(&mut self) -> Option<(K, V)> {
        self.try_evict().ok().flatten()
    }

    fn peek_lru(&self) -> Option<(&K, &V)> {
        let tail = self.list.tail()?;
        self.list.entry(tail).map(|entry| (&entry.key, &entry.value))
    }

    fn promote(&mut self, key: &K) -> bool {
        match self.index.get(key) {
            Some(&slot) => self.list.move_to_front(slot),
            None => false,
        }
    }

    fn recency_rank(&self, key: &K) -> Option<usize> {
        if !self.index.contains_key(key) {
            return None;
        }
        self.list.iter().position(|entry| &entry.key == key)
    }
}

/// Iterator over `(key, value)` pairs, most recently used first.
pub struct Iter<'a, K, V> {
    inner: list::Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|entry| (&entry.key, &entry.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K, V> IntoIterator for &'a LruCache<K, V>
where
    K: Eq + Hash + Clone,
    V: PartialEq,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
