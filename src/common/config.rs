use std::num::NonZeroUsize;

pub type SlotId = usize; // arena slot index of a list node

pub const DEFAULT_CACHE_CAPACITY: usize = 1000; // default number of entries

/// Upper bound on the number of slots reserved up front when `prealloc_memory` is set.
/// Larger caches still grow on demand; this only caps the initial reservation.
pub const MAX_PREALLOC_SLOTS: usize = 1 << 16;

/// Construction-time settings for an [`LruCache`](crate::cache::lru::LruCache).
///
/// | Field            | Default | Description                                  |
/// |------------------|---------|----------------------------------------------|
/// | `capacity`       | 1000    | Maximum number of live entries (may be 0)    |
/// | `max_accesses`   | `None`  | Accepted touches before a forced reset       |
/// | `prealloc_memory`| `true`  | Reserve arena and index space for `capacity` |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    pub capacity: usize,
    pub max_accesses: Option<NonZeroUsize>,
    pub prealloc_memory: bool,
}

impl CacheConfig {
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the access budget. A budget of 0 disables it.
    pub fn with_max_accesses(mut self, max_accesses: usize) -> Self {
        self.max_accesses = NonZeroUsize::new(max_accesses);
        self
    }

    /// Number of slots to reserve when the cache is built.
    pub(crate) fn initial_slots(&self) -> usize {
        if self.prealloc_memory {
            self.capacity.min(MAX_PREALLOC_SLOTS)
        } else {
            0
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CACHE_CAPACITY,
            max_accesses: None,
            prealloc_memory: true,
        }
    }
}
