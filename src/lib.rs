//! Bounded-capacity LRU cache with O(1) lookup, promotion, and eviction.
//!
//! ```rust
//! use lrukit::cache::lru::LruCache;
//!
//! let mut cache = LruCache::new(3);
//! cache.touch("A", 1);
//! cache.touch("B", 2);
//! cache.touch("C", 3);
//! cache.touch("D", 4); // evicts "A"
//!
//! let order: Vec<_> = cache.iter().map(|(k, _)| *k).collect();
//! assert_eq!(order, ["D", "C", "B"]);
//! ```

pub mod cache;
pub mod common;
