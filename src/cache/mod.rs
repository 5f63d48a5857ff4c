pub mod cache_traits;
pub mod entry;
pub mod list;
pub mod lru;
