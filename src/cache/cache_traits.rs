//! # Cache Trait Hierarchy
//!
//! Policy-neutral operations live in [`CoreCache`]; key-based removal is layered on in
//! [`MutableCache`]; recency-specific operations are in [`LRUCacheTrait`].
//!
//! ```text
//!   ┌─────────────────────────────────────────┐
//!   │            CoreCache<K, V>              │
//!   │                                         │
//!   │  insert(&mut, K, V) → Option<V>         │
//!   │  get(&mut, &K) → Option<&V>             │
//!   │  contains(&, &K) → bool                 │
//!   │  len(&) → usize                         │
//!   │  is_empty(&) → bool                     │
//!   │  capacity(&) → usize                    │
//!   │  clear(&mut)                            │
//!   └──────────────────┬──────────────────────┘
//!                      │
//!                      ▼
//!   ┌─────────────────────────────────────────┐
//!   │          MutableCache<K, V>             │
//!   │                                         │
//!   │  remove(&K) → Option<V>                 │
//!   │  remove_batch(&[K]) → Vec<Option<V>>    │
//!   └──────────────────┬──────────────────────┘
//!                      │
//!                      ▼
//!   ┌─────────────────────────────────────────┐
//!   │          LRUCacheTrait<K, V>            │
//!   │                                         │
//!   │  pop_lru() → (K, V)                     │
//!   │  peek_lru() → (&K, &V)                  │
//!   │  promote(&K) → bool                     │
//!   │  recency_rank(&K) → usize               │
//!   └─────────────────────────────────────────┘
//! ```
//!
//! ## Example Usage
//!
//! ```rust
//! use lrukit::cache::cache_traits::{CoreCache, LRUCacheTrait, MutableCache};
//! use lrukit::cache::lru::LruCache;
//!
//! // Function accepting any cache
//! fn warm_cache<C: CoreCache<u64, Vec<u8>>>(cache: &mut C, data: &[(u64, Vec<u8>)]) {
//!     for (key, value) in data {
//!         cache.insert(*key, value.clone());
//!     }
//! }
//!
//! // Function requiring removal capability
//! fn invalidate_keys<C: MutableCache<u64, Vec<u8>>>(cache: &mut C, keys: &[u64]) {
//!     for key in keys {
//!         cache.remove(key);
//!     }
//! }
//!
//! let mut cache = LruCache::new(2);
//! warm_cache(&mut cache, &[(1, vec![1]), (2, vec![2])]);
//! invalidate_keys(&mut cache, &[1]);
//! assert_eq!(cache.peek_lru(), Some((&2, &vec![2])));
//! ```
//!
//! ## Thread Safety
//!
//! None of these traits imply synchronization. Wrap the cache in `Arc<Mutex<C>>` and hold
//! the lock for the whole logical operation when it has to be shared.

/// Core cache operations that all caches support.
pub trait CoreCache<K, V> {
    /// Insert a key-value pair, returning the previous value if it existed
    fn insert(&mut self, key: K, value: V) -> Option<V>;

    /// Get a value by key (may update internal state for access tracking)
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Check if a key exists without updating access state
    fn contains(&self, key: &K) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn capacity(&self) -> usize;

    fn clear(&mut self);
}

/// Caches that support arbitrary key-based removal
pub trait MutableCache<K, V>: CoreCache<K, V> {
    /// Remove a specific key-value pair
    /// Returns the removed value if the key existed
    fn remove(&mut self, key: &K) -> Option<V>;

    fn remove_batch(&mut self, keys: &[K]) -> Vec<Option<V>> {
        keys.iter().map(|k| self.remove(k)).collect()
    }
}

/// LRU-specific operations that respect access order
pub trait LRUCacheTrait<K, V>: MutableCache<K, V> {
    /// Remove and return the least recently used entry
    fn pop_lru(&mut self) -> Option<(K, V)>;

    /// Peek at the LRU entry without removing it
    fn peek_lru(&self) -> Option<(&K, &V)>;

    /// Mark an entry as most recently used without reading or replacing its value
    /// Returns true if the key was found
    fn promote(&mut self, key: &K) -> bool;

    /// Get the recency rank of a key (0 = most recent, higher = less recent)
    /// Returns None if key not found
    fn recency_rank(&self, key: &K) -> Option<usize>;
}
